//! Picture fetching over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use menagerie_core::picture::{FetchError, FetchedPicture, PictureFetcher};
use reqwest::header::CONTENT_TYPE;

/// Fetches picture bytes with a bounded timeout. No retries.
pub struct HttpPictureFetcher {
    client: reqwest::Client,
}

impl HttpPictureFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PictureFetcher for HttpPictureFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPicture, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(FetchedPicture {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}
