//! Interactive key entry

use async_trait::async_trait;

/// Source of a secret key when none was supplied with the request
#[async_trait]
pub trait KeyPrompt: Send + Sync {
    /// Ask the operator for their key; `None` if they cancel
    async fn request_key(&self) -> Option<String>;
}

/// Prompt that never yields a key
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

#[async_trait]
impl KeyPrompt for NoPrompt {
    async fn request_key(&self) -> Option<String> {
        None
    }
}
