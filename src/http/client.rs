//! HTTP client with bounded timeouts and typed status errors.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::io::Write;
use std::time::Duration;

use super::error::check_status;

/// Upper bound on any single network call. Resolution must never block the
/// user; an expired request degrades like any other transport failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client wrapping a shared reqwest Client.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a client configured with the bounded timeout and a User-Agent
    /// header (the GitHub API rejects anonymous requests without one).
    pub fn with_defaults() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("ghrr/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// Performs a GET request and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let response = response.error_for_status().map_err(check_status)?;

        let result = response
            .json::<T>()
            .await
            .context("Failed to parse JSON response")?;

        Ok(result)
    }

    /// Performs a HEAD request and returns the final status after redirects.
    #[tracing::instrument(skip(self))]
    pub async fn head(&self, url: &str) -> Result<StatusCode> {
        debug!("HEAD {}...", url);

        let response = self
            .client
            .head(url)
            .send()
            .await
            .context("Failed to send request")?;

        Ok(response.status())
    }

    /// Downloads a file from a URL, streaming chunks into the writer.
    /// Uses a writer factory so the destination is only created once the
    /// response headers check out.
    #[tracing::instrument(skip(self, create_writer))]
    pub async fn download_file<W, F>(&self, url: &str, create_writer: F) -> Result<u64>
    where
        W: Write,
        F: Fn() -> Result<W>,
    {
        debug!("Downloading file from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to start download request")?;

        let mut response = response.error_for_status().map_err(check_status)?;

        let mut writer = create_writer()?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .context("Failed to read chunk from download stream")?
        {
            writer
                .write_all(&chunk)
                .context("Failed to write chunk to file")?;
            downloaded_bytes += chunk.len() as u64;
        }

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }
}
