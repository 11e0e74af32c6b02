//! LLM access for the summarizer: a provider seam and the Anthropic backend.

pub mod anthropic;
pub mod provider;

pub use anthropic::AnthropicProvider;
pub use provider::{Completion, CompletionRequest, LlmProvider};
