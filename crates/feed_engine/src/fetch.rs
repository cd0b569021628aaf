use std::time::Duration;

use feed_core::Article;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use thiserror::Error;
use url::Url;

use crate::{ArticleEndpoint, FailureKind, FetchError, RequestId};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub endpoint: ArticleEndpoint,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            endpoint: ArticleEndpoint::All,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}

/// Where article collections come from. One call is one outbound request.
#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_articles(&self, request_id: RequestId) -> Result<Vec<Article>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestArticleSource {
    client: reqwest::Client,
    url: Url,
    max_bytes: u64,
}

impl ReqwestArticleSource {
    pub fn new(settings: FetchSettings) -> Result<Self, SourceError> {
        let base = Url::parse(&settings.base_url)?;
        let url = settings.endpoint.resolve(&base)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            client,
            url,
            max_bytes: settings.max_bytes,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn too_large(&self, actual: Option<u64>) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl ArticleSource for ReqwestArticleSource {
    async fn fetch_articles(&self, request_id: RequestId) -> Result<Vec<Article>, FetchError> {
        feed_logging::feed_debug!("Request {} GET {}", request_id, self.url);

        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = self.read_body(response).await?;
        serde_json::from_slice::<Vec<Article>>(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
