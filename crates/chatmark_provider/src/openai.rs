use anyhow::{Context as _, Result};
use async_trait::async_trait;
use chatmark_config::ProviderConfig;
use chatmark_domain::ChatMessage;
use chatmark_eventsource::{into_message_fragments, status_failure_notice};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, error, info};

use crate::request::Request;
use crate::response::Response;
use crate::utils::sanitize_headers;

/// Reply used when a completion carries no text.
pub const EMPTY_REPLY: &str = "抱歉，我无法生成回复。";

/// Reply used when a completion fails for any reason other than an error
/// status from upstream.
pub fn failure_reply(error: &anyhow::Error) -> String {
    format!("发生错误: {error:#}")
}

/// Source of assistant replies.
///
/// Neither method fails: problems reaching upstream come back as reply text
/// so they render like any other message.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Stream the reply to `prompt` as text fragments.
    async fn chat_stream(&self, history: &[ChatMessage], prompt: &str) -> BoxStream<'static, String>;

    /// The whole reply to `prompt` in one piece.
    async fn complete(&self, history: &[ChatMessage], prompt: &str) -> String;
}

#[derive(Clone)]
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config, client: reqwest::Client::new() }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &self.config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .with_context(|| "API key is not a valid header value")?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn prepare(&self, request: &Request) -> Result<reqwest::RequestBuilder> {
        let headers = self.headers()?;
        info!(
            url = %self.config.url,
            model = %request.model,
            headers = ?sanitize_headers(&headers),
            message_count = request.message_count(),
            stream = request.stream,
            "Connecting Upstream"
        );

        let body = serde_json::to_vec(request).with_context(|| "Failed to serialize request")?;
        Ok(self
            .client
            .post(self.config.url.clone())
            .headers(headers)
            .body(body))
    }

    async fn inner_complete(&self, request: Request) -> Result<String> {
        let response = self
            .prepare(&request)?
            .send()
            .await
            .with_context(|| format!("POST {}", self.config.url))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| "Failed to decode response into text")?;

        if !status.is_success() {
            error!(status = %status, body = %text, "Upstream rejected the request");
            return Ok(status_failure_notice(status, &text));
        }

        let response: Response = serde_json::from_str(&text)
            .with_context(|| "Failed to deserialize completion response")?;
        Ok(response.into_content().unwrap_or_else(|| {
            debug!("Completion carried no content");
            EMPTY_REPLY.to_string()
        }))
    }
}

#[async_trait]
impl ChatProvider for OpenAIProvider {
    async fn chat_stream(&self, history: &[ChatMessage], prompt: &str) -> BoxStream<'static, String> {
        let request = Request::new(&self.config, history, prompt);
        match self.prepare(&request) {
            Ok(builder) => into_message_fragments(builder.send().await),
            Err(error) => {
                error!(error = ?error, "Failed to prepare request");
                stream::once(async move { failure_reply(&error) }).boxed()
            }
        }
    }

    async fn complete(&self, history: &[ChatMessage], prompt: &str) -> String {
        let request = Request::new(&self.config, history, prompt).stream(false);
        match self.inner_complete(request).await {
            Ok(reply) => reply,
            Err(error) => {
                error!(error = ?error, "Completion failed");
                failure_reply(&error)
            }
        }
    }
}
