use std::time::Duration;

use async_trait::async_trait;
use model::track::ParsedTrack;
use thiserror::Error;
use tracks::{source::TrackSource, SourceError};

pub mod parser;

pub use parser::parse_igc;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum IgcError {
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid Response ({status_code}) {url}")]
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
    },
    #[error("malformed {kind} record in line {line}: {content}")]
    MalformedRecord {
        kind: char,
        line: usize,
        content: String,
    },
    #[error("track has no flight date")]
    MissingDate,
}

/// Fetches IGC files over HTTP.
#[derive(Debug, Clone)]
pub struct IgcClient {
    http: reqwest::Client,
}

impl IgcClient {
    pub fn new() -> Result<Self, IgcError> {
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { http })
    }

    pub async fn fetch(&self, url: &str) -> Result<ParsedTrack, IgcError> {
        log::debug!("fetching track from {}", url);
        let response = self.http.get(url).send().await?;
        let status_code = response.status();
        if !status_code.is_success() {
            return Err(IgcError::InvalidResponse {
                status_code,
                url: url.to_owned(),
            });
        }
        let text = response.text().await?;
        parse_igc(&text)
    }
}

#[async_trait]
impl TrackSource for IgcClient {
    async fn parse(&self, url: &str) -> Result<ParsedTrack, SourceError> {
        Ok(self.fetch(url).await?)
    }
}
