//! Thin wrapper over reqwest for the two request shapes the fetcher needs.

use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{ACCEPT, CONTENT_DISPOSITION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::error::HttpError;

/// A fully buffered download.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub status: StatusCode,
    /// Raw `content-disposition` header value, if the server sent one
    pub content_disposition: Option<String>,
    pub content: Vec<u8>,
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request with the given `Accept` header and deserializes the JSON response.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, accept: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Api {
                url: url.to_string(),
                status,
            }
            .into());
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse JSON response")
    }

    /// Downloads the body at `url` into memory.
    /// A non-success status is returned as [`HttpError::Download`] without reading the body.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn download(&self, url: &str) -> Result<Download> {
        debug!("Downloading file from {}...", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to start download request for {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Download {
                url: url.to_string(),
                status,
            }
            .into());
        }

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut content = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .context("Failed to read chunk from download stream")?
        {
            content.extend_from_slice(&chunk);
        }

        debug!(
            "Downloaded {:.2} MB",
            content.len() as f64 / (1024.0 * 1024.0)
        );

        Ok(Download {
            status,
            content_disposition,
            content,
        })
    }
}
