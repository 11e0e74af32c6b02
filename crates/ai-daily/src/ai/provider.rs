//! LLM completion seam used by the summarizer.

use async_trait::async_trait;

use crate::error::Result;

/// One single-turn completion: a user prompt and a response budget.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
}

/// Text returned by the model, with token counts for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Completion {
    /// A completion with no usage figures.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// A model backend able to answer summary prompts.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// False when no credential is available; the summarizer then skips
    /// enrichment entirely.
    fn is_configured(&self) -> bool;

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion>;
}
