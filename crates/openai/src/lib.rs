//! OpenAI HTTP API client and the generation capability traits.
//!
//! The traits are what the rest of the workspace programs against; the
//! orchestration engine receives `Arc<dyn TextGenerator>` /
//! `Arc<dyn ImageGenerator>` so tests can substitute fakes for the real
//! [`OpenAiApi`] client.

mod api;

pub use api::{ContentBlock, OpenAiApi, OpenAiConfig, OpenAiError};

use async_trait::async_trait;

/// Structured-text generation: instruction blocks in, one JSON object out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one chat completion in strict-JSON mode and return the raw
    /// response text (expected, not guaranteed, to parse as JSON).
    async fn generate_json(
        &self,
        blocks: &[ContentBlock],
        max_tokens: u32,
    ) -> Result<String, OpenAiError>;
}

/// Image generation: prompt in, ephemeral image URL out.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Render one image and return its URL. The URL is short-lived and must
    /// be copied to persistent storage by the caller.
    async fn generate_image(&self, prompt: &str, vivid: bool) -> Result<String, OpenAiError>;
}

#[async_trait]
impl TextGenerator for OpenAiApi {
    async fn generate_json(
        &self,
        blocks: &[ContentBlock],
        max_tokens: u32,
    ) -> Result<String, OpenAiError> {
        self.chat_json(blocks, max_tokens).await
    }
}

#[async_trait]
impl ImageGenerator for OpenAiApi {
    async fn generate_image(&self, prompt: &str, vivid: bool) -> Result<String, OpenAiError> {
        self.create_image(prompt, vivid).await
    }
}
