//! HTTP client and its error types.

mod client;
mod error;

pub use client::{Download, HttpClient};
pub use error::HttpError;
