use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

mod deepseek;

pub use deepseek::DeepSeek;

#[derive(Debug, Clone, Copy)]
pub enum MessageRole {
    System,
    User,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: String) -> Self {
        Self {
            role: MessageRole::System,
            content,
        }
    }

    pub fn user(content: String) -> Self {
        Self {
            role: MessageRole::User,
            content,
        }
    }
}

/// Sampling and output budget for a single completion call.
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

pub type ProviderFuture = Pin<Box<dyn Future<Output = Result<String>> + Send>>;

/// A chat-style language-model collaborator. Implementations accumulate
/// messages and resolve to the assistant's raw text reply.
pub trait Provider: Clone + Send + Sync {
    fn append_system_input(self, input: String) -> Self;
    fn append_user_input(self, input: String) -> Self;
    fn complete(self, params: CompletionParams) -> ProviderFuture;
}
