//! OpenAI-compatible provider implementation
//!
//! Talks to any server exposing the `/chat/completions` endpoint with bearer
//! authentication (OpenAI itself, Azure-style gateways, local proxies).

use crate::config::OpenAiConfig;
use crate::error::{Result, SocietyReportError};
use crate::providers::{CompletionResponse, Message, Provider, Role, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible chat completions provider
///
/// # Examples
///
/// ```no_run
/// use societyreport::config::OpenAiConfig;
/// use societyreport::providers::{Message, OpenAiProvider, Provider};
///
/// # async fn example() -> societyreport::error::Result<()> {
/// let config = OpenAiConfig {
///     api_key: Some("sk-...".to_string()),
///     ..OpenAiConfig::default()
/// };
/// let provider = OpenAiProvider::new(config)?;
/// let completion = provider.complete(&[Message::user("Hello!")]).await?;
/// println!("{}", completion.message.content);
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

/// Request structure for the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

/// Response structure from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

/// Choice in a chat completions response
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageBody,
}

/// Message body inside a choice
#[derive(Debug, Deserialize)]
struct ChatMessageBody {
    #[serde(default)]
    content: Option<String>,
}

/// Token usage reported by the API
#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

/// Error envelope returned by OpenAI-compatible servers
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiProvider {
    /// Create a new provider instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use societyreport::config::OpenAiConfig;
    /// use societyreport::providers::OpenAiProvider;
    ///
    /// let provider = OpenAiProvider::new(OpenAiConfig::default());
    /// assert!(provider.is_ok());
    /// ```
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("societyreport/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SocietyReportError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized OpenAI provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }
}

/// Turn a non-success response body into a readable message
fn describe_api_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => format!("API returned {}: {}", status, envelope.error.message),
        Err(_) if body.is_empty() => format!("API returned {}", status),
        Err(_) => format!("API returned {}: {}", status, body),
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }

    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            SocietyReportError::MissingCredentials("openai (set OPENAI_API_KEY)".to_string())
        })?;

        let request = ChatRequest {
            model: &self.config.model,
            messages,
        };

        tracing::debug!("Sending OpenAI request: {} messages", messages.len());

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI request failed: {}", e);
                SocietyReportError::Provider(format!("OpenAI request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI returned error {}: {}", status, error_text);
            return Err(
                SocietyReportError::Provider(describe_api_error(status, &error_text)).into(),
            );
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            SocietyReportError::Provider(format!("Failed to parse OpenAI response: {}", e))
        })?;

        let choice = chat_response.choices.into_iter().next().ok_or_else(|| {
            SocietyReportError::Provider("No choices in OpenAI response".to_string())
        })?;

        let content = choice.message.content.unwrap_or_default();
        let message = Message {
            role: Role::Assistant,
            content: content.trim().to_string(),
        };

        let response = match chat_response.usage {
            Some(u) => {
                CompletionResponse::with_usage(message, TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            }
            None => CompletionResponse::new(message),
        };

        tracing::debug!("OpenAI response received successfully");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_provider_creation() {
        let provider = OpenAiProvider::new(OpenAiConfig::default()).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let provider = OpenAiProvider::new(OpenAiConfig {
            api_base: "http://localhost:8080/v1/".to_string(),
            ..OpenAiConfig::default()
        })
        .unwrap();
        assert_eq!(
            provider.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![Message::system("ctx"), Message::user("hi")];
        let request = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_describe_api_error_uses_error_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        let described = describe_api_error(reqwest::StatusCode::UNAUTHORIZED, body);
        assert!(described.contains("401"));
        assert!(described.contains("Incorrect API key provided"));
    }

    #[test]
    fn test_describe_api_error_plain_body() {
        let described = describe_api_error(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(described.ends_with("upstream down"));
        let empty = describe_api_error(reqwest::StatusCode::BAD_GATEWAY, "");
        assert_eq!(empty, "API returned 502 Bad Gateway");
    }

    #[tokio::test]
    async fn test_complete_without_api_key_fails() {
        let provider = OpenAiProvider::new(OpenAiConfig::default()).unwrap();
        let err = provider.complete(&[Message::user("hi")]).await.unwrap_err();
        assert!(err.to_string().contains("Missing credentials"));
    }
}
