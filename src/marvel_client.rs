use crate::models::{Comic, ListingPayload};
use log::debug;
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// Text shown to the user when a listing can't be loaded.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport(detail) => {
                format!("Could not reach the comics service ({detail})")
            }
            FetchError::Decode(_) => "The comics service sent a response we could not read".into(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Remote calls the list controller depends on.
pub trait ComicApi: Send + Sync + 'static {
    fn fetch_comics(&self, url: &str)
        -> impl Future<Output = Result<Vec<Comic>, FetchError>> + Send;

    fn fetch_image(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct MarvelClient {
    http: reqwest::Client,
}

impl MarvelClient {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let res = self.http.get(url).send().await?.error_for_status()?;
        let bytes = res.bytes().await?;
        Ok(bytes.to_vec())
    }
}

impl ComicApi for MarvelClient {
    async fn fetch_comics(&self, url: &str) -> Result<Vec<Comic>, FetchError> {
        let body = self.get_bytes(url).await?;
        debug!("Listing body is {} bytes", body.len());
        decode_listing(&body)
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.get_bytes(url).await
    }
}

pub fn decode_listing(body: &[u8]) -> Result<Vec<Comic>, FetchError> {
    let payload: ListingPayload = serde_json::from_slice(body)?;
    Ok(payload.into_comics())
}
