use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, REFERER, USER_AGENT};
use reqwest::Client as ReqwestClient;
use thiserror::Error;

pub const ARTICLE_TIMEOUT: Duration = Duration::from_secs(15);
pub const IMAGE_TIMEOUT: Duration = Duration::from_secs(20);
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const WECHAT_REFERER: &str = "https://mp.weixin.qq.com/";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),
}

/// Raw image payload plus the content type the upstream declared, if any.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// The two outbound calls the cover pipeline makes.
///
/// Kept behind a trait so handlers and tests can swap in a double.
#[async_trait]
pub trait CoverFetcher: Send + Sync {
    async fn fetch_article(&self, url: &str) -> Result<String, FetchError>;

    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub article_timeout: Duration,
    pub image_timeout: Duration,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            article_timeout: ARTICLE_TIMEOUT,
            image_timeout: IMAGE_TIMEOUT,
            user_agent: BROWSER_USER_AGENT.to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "zh-CN,zh;q=0.9,en;q=0.8".to_string(),
            referer: WECHAT_REFERER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: ReqwestClient,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl CoverFetcher for ReqwestFetcher {
    async fn fetch_article(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .header(ACCEPT, self.settings.accept.as_str())
            .header(ACCEPT_LANGUAGE, self.settings.accept_language.as_str())
            .header(REFERER, self.settings.referer.as_str())
            .timeout(self.settings.article_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(map_reqwest_error)
    }

    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .header(REFERER, self.settings.referer.as_str())
            .timeout(self.settings.image_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout;
    }
    FetchError::Network(err.to_string())
}
