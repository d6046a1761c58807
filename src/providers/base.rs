//! Base provider trait and common types for SocietyReport
//!
//! This module defines the Provider trait that completion backends implement,
//! along with the message and response types exchanged with them.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions injected ahead of the conversation
    System,
    /// The person chatting
    User,
    /// The completion backend
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Message structure sent to and received from a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use societyreport::providers::{Message, Role};
    ///
    /// let msg = Message::user("Hello, assistant!");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Token usage information from a completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use societyreport::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Completion response with message and optional token usage
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The response message from the provider
    pub message: Message,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a new CompletionResponse
    pub fn new(message: Message) -> Self {
        Self {
            message,
            usage: None,
        }
    }

    /// Create a new CompletionResponse with token usage
    pub fn with_usage(message: Message, usage: TokenUsage) -> Self {
        Self {
            message,
            usage: Some(usage),
        }
    }
}

/// Provider trait for completion backends
///
/// A provider receives an ordered conversation (optionally starting with a
/// system message) and returns the assistant's reply. Implementations make a
/// single round trip per call and never retry.
///
/// # Examples
///
/// ```no_run
/// use societyreport::providers::{CompletionResponse, Message, Provider};
/// use societyreport::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn model(&self) -> String {
///         "echo-1".to_string()
///     }
///
///     async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
///         let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
///         Ok(CompletionResponse::new(Message::assistant(last)))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short provider identifier used in logs and status output
    fn name(&self) -> &str;

    /// Model the provider sends requests to
    fn model(&self) -> String;

    /// Completes a conversation
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response is invalid
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse>;
}
