pub mod commands;
pub mod download;
pub mod github;
pub mod http;
pub mod marker;
pub mod runtime;
pub mod share;
