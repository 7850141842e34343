//! Provider trait for completion backends

use async_trait::async_trait;

use crate::llm::{errors::GatewayResult, types::Turn};

/// A chat-completion backend.
///
/// One call per user submission: the full turn history goes in, the
/// assistant's reply text comes out. Implementations hold their own model
/// and sampling configuration; they keep no state across calls, so two
/// calls with identical input are independent requests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send the turn sequence to the provider and return the reply text,
    /// already trimmed of leading/trailing whitespace.
    async fn complete(&self, turns: &[Turn]) -> GatewayResult<String>;

    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the model name
    fn model(&self) -> &str;
}
