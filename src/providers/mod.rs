//! Upstream LLM provider implementations

use async_trait::async_trait;
use crate::prompts::ComposedPrompt;

pub mod chat;
pub mod mistral;
pub mod openai;

// Re-export for convenience
pub use mistral::MistralClient;
pub use openai::OpenAiClient;

/// One stage of the provider chain that talks to a remote API
#[async_trait]
pub trait GenerationProvider: Send + Sync
{   /// Name used in logs and attempt records
    fn name(&self) -> &str;

    /// `false` when the credential is absent; the stage is then skipped
    /// without any network call.
    fn is_configured(&self) -> bool;

    /// Single attempt, no retries. `Ok("")` means the upstream answered
    /// but produced no usable text.
    async fn generate(
      &self
    , prompt: &ComposedPrompt
    ) -> Result<String, crate::error::Error>;
}
