pub mod chat;
pub mod decode;
pub mod prompts;

use async_trait::async_trait;

use crate::error::GenerationError;

pub use chat::ChatCompletionsGenerator;
pub use decode::{decode_problem, strip_code_fences};

/// One text-generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// External text-generation collaborator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `request` and return the raw text reply.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the service is disabled, the request fails,
    /// or the reply is empty.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
