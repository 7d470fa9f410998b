//! Typed HTTP failures surfaced to the user.

use reqwest::StatusCode;

/// A request that reached the server but came back with a non-success status.
#[derive(Debug)]
pub enum HttpError {
    /// The releases API refused the request
    Api { url: String, status: StatusCode },
    /// An asset download came back with a non-success status
    Download { url: String, status: StatusCode },
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::Api { status, .. } | HttpError::Download { status, .. } => *status,
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::Api { url, status }
                if *status == StatusCode::FORBIDDEN || *status == StatusCode::TOO_MANY_REQUESTS =>
            {
                write!(
                    f,
                    "GitHub API request to {} failed, status code: {}. The API rate limit may be exhausted, try again later.",
                    url,
                    status.as_u16()
                )
            }
            HttpError::Api { url, status } => {
                write!(
                    f,
                    "GitHub API request to {} failed, status code: {}",
                    url,
                    status.as_u16()
                )
            }
            HttpError::Download { url, status } => {
                write!(
                    f,
                    "Unable to download {}, status code: {}",
                    url,
                    status.as_u16()
                )
            }
        }
    }
}

impl std::error::Error for HttpError {}
