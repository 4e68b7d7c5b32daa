//! REST client for the OpenAI HTTP endpoints.
//!
//! Wraps the two endpoints this platform consumes -- chat completions (with
//! image content blocks, strict-JSON response mode) and image generation --
//! using [`reqwest`].

use std::time::Duration;

use serde::Deserialize;

/// Chat model used for marketing-copy generation.
const CHAT_MODEL: &str = "gpt-4o";
/// Image model used for hero and promotional renders.
const IMAGE_MODEL: &str = "dall-e-3";
/// Fixed render size for all generated imagery.
const IMAGE_SIZE: &str = "1024x1024";

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base API URL (default `https://api.openai.com`). Overridable so
    /// tests and proxies can redirect traffic.
    pub api_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Per-call timeout. A timed-out call surfaces as a request error and
    /// takes the same fallback path as any other failure.
    pub timeout: Duration,
}

/// One element of a multimodal user message.
#[derive(Debug, Clone)]
pub enum ContentBlock {
    /// Plain instruction text.
    Text(String),
    /// An image the model should look at, by URL.
    ImageUrl(String),
}

impl ContentBlock {
    /// Wire form expected by the chat completions endpoint.
    fn to_json(&self) -> serde_json::Value {
        match self {
            ContentBlock::Text(text) => serde_json::json!({
                "type": "text",
                "text": text,
            }),
            ContentBlock::ImageUrl(url) => serde_json::json!({
                "type": "image_url",
                "image_url": { "url": url, "detail": "high" },
            }),
        }
    }
}

/// Errors from the OpenAI REST layer.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("OpenAI API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response that is missing the expected payload (no choices,
    /// no image URL).
    #[error("OpenAI response missing expected content: {0}")]
    EmptyResponse(&'static str),
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: Option<String>,
}

/// HTTP client for the OpenAI API.
pub struct OpenAiApi {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiApi {
    /// Create a new API client. The per-call timeout from `config` is baked
    /// into the underlying [`reqwest::Client`].
    pub fn new(config: OpenAiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("reqwest client construction cannot fail with these options");
        Self { client, config }
    }

    /// Run one chat completion in strict-JSON mode.
    ///
    /// Sends the given content blocks as a single user message with
    /// `response_format: json_object`, and returns the raw assistant text.
    pub async fn chat_json(
        &self,
        blocks: &[ContentBlock],
        max_tokens: u32,
    ) -> Result<String, OpenAiError> {
        let content: Vec<serde_json::Value> = blocks.iter().map(ContentBlock::to_json).collect();
        let body = serde_json::json!({
            "model": CHAT_MODEL,
            "messages": [{ "role": "user", "content": content }],
            "response_format": { "type": "json_object" },
            "max_tokens": max_tokens,
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: ChatResponse = Self::parse_response(response).await?;
        tracing::debug!(blocks = blocks.len(), "Chat completion returned");
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(OpenAiError::EmptyResponse("chat completion had no content"))
    }

    /// Render one image and return its (ephemeral) URL.
    ///
    /// `vivid` selects the renderer's vivid style; otherwise natural.
    pub async fn create_image(&self, prompt: &str, vivid: bool) -> Result<String, OpenAiError> {
        let body = serde_json::json!({
            "model": IMAGE_MODEL,
            "prompt": prompt,
            "n": 1,
            "size": IMAGE_SIZE,
            "quality": "hd",
            "style": if vivid { "vivid" } else { "natural" },
        });

        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: ImageResponse = Self::parse_response(response).await?;
        tracing::debug!(vivid, "Image generation returned");
        parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or(OpenAiError::EmptyResponse("image response had no URL"))
    }

    /// Check the status code and deserialize a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, OpenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_block_wire_form() {
        let block = ContentBlock::Text("describe this".to_string()).to_json();
        assert_eq!(block["type"], "text");
        assert_eq!(block["text"], "describe this");
    }

    #[test]
    fn image_block_requests_high_detail() {
        let block = ContentBlock::ImageUrl("https://img.example/a.jpg".to_string()).to_json();
        assert_eq!(block["type"], "image_url");
        assert_eq!(block["image_url"]["url"], "https://img.example/a.jpg");
        assert_eq!(block["image_url"]["detail"], "high");
    }
}
