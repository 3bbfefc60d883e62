//! Minimal LINE Messaging API client: reply messages and message content.

use async_trait::async_trait;
use serde_json::json;
use url::Url;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::pipeline::{ImageRef, ImageRetriever, ReplySender};

#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    channel_token: String,
    api_base: Url,
    data_api_base: Url,
}

impl LineClient {
    /// Creates a client against the given API hosts
    ///
    /// # Arguments
    /// * `channel_token` - Channel access token (sent as a bearer token)
    /// * `api_base` - Messaging API host, e.g. `https://api.line.me`
    /// * `data_api_base` - Content host, e.g. `https://api-data.line.me`
    pub fn new(channel_token: &str, api_base: &str, data_api_base: &str) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config::network::reply_timeout())
            .build()?;
        Ok(Self {
            http,
            channel_token: channel_token.to_string(),
            api_base: Url::parse(api_base)?,
            data_api_base: Url::parse(data_api_base)?,
        })
    }

    /// Creates a client from `LINE_CHANNEL_TOKEN`, `LINE_API_BASE` and `LINE_DATA_API_BASE`
    pub fn from_env() -> AppResult<Self> {
        if config::LINE_CHANNEL_TOKEN.is_empty() {
            return Err(AppError::Validation("LINE_CHANNEL_TOKEN is not set".to_string()));
        }
        Self::new(
            &config::LINE_CHANNEL_TOKEN,
            &config::LINE_API_BASE,
            &config::LINE_DATA_API_BASE,
        )
    }

    fn endpoint(base: &Url, segments: &[&str]) -> AppResult<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Validation(format!("API base cannot take a path: {}", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn download(&self, request: reqwest::RequestBuilder) -> AppResult<Vec<u8>> {
        let response = request.timeout(config::network::content_timeout()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus(status));
        }

        if let Some(len) = response.content_length() {
            if len as usize > config::MAX_IMAGE_BYTES {
                return Err(AppError::Validation(format!("image too large: {} bytes", len)));
            }
        }

        let bytes = response.bytes().await?;
        if bytes.len() > config::MAX_IMAGE_BYTES {
            return Err(AppError::Validation(format!("image too large: {} bytes", bytes.len())));
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ReplySender for LineClient {
    async fn reply(&self, reply_token: &str, text: &str) -> AppResult<()> {
        let url = Self::endpoint(&self.api_base, &["v2", "bot", "message", "reply"])?;
        let body = json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.channel_token)
            .json(&body)
            .timeout(config::network::reply_timeout())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            log::warn!("LINE reply rejected with {}: {}", status, detail);
            return Err(AppError::HttpStatus(status));
        }
        Ok(())
    }
}

#[async_trait]
impl ImageRetriever for LineClient {
    async fn fetch(&self, image: &ImageRef) -> AppResult<Vec<u8>> {
        match image {
            ImageRef::Platform { message_id } => {
                let url = Self::endpoint(&self.data_api_base, &["v2", "bot", "message", message_id.as_str(), "content"])?;
                self.download(self.http.get(url).bearer_auth(&self.channel_token)).await
            }
            ImageRef::External { url } => {
                let url = Url::parse(url)?;
                self.download(self.http.get(url)).await
            }
        }
    }
}
