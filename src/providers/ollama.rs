//! Ollama provider implementation for SocietyReport
//!
//! This module implements the Provider trait for Ollama, connecting to a local
//! or remote Ollama server through its `/api/chat` endpoint.

use crate::config::OllamaConfig;
use crate::error::{Result, SocietyReportError};
use crate::providers::{CompletionResponse, Message, Provider, Role, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama API provider
///
/// # Examples
///
/// ```no_run
/// use societyreport::config::OllamaConfig;
/// use societyreport::providers::{Message, OllamaProvider, Provider};
///
/// # async fn example() -> societyreport::error::Result<()> {
/// let provider = OllamaProvider::new(OllamaConfig::default())?;
/// let completion = provider.complete(&[Message::user("Hello!")]).await?;
/// println!("{}", completion.message.content);
/// # Ok(())
/// # }
/// ```
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

/// Request structure for Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

/// Message structure returned by Ollama
#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}

/// Response structure from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

impl OllamaProvider {
    /// Create a new Ollama provider instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use societyreport::config::OllamaConfig;
    /// use societyreport::providers::OllamaProvider;
    ///
    /// let provider = OllamaProvider::new(OllamaConfig::default());
    /// assert!(provider.is_ok());
    /// ```
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("societyreport/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SocietyReportError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Ollama provider: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self { client, config })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.config.host.trim_end_matches('/'))
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }

    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let url = self.chat_url();
        let request = OllamaRequest {
            model: &self.config.model,
            messages,
            stream: false,
        };

        tracing::debug!("Sending Ollama request: {} messages", messages.len());

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                SocietyReportError::Provider(format!("Ollama request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned error {}: {}", status, error_text);
            return Err(SocietyReportError::Provider(format!(
                "Ollama returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let ollama_response: OllamaResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            SocietyReportError::Provider(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!(
            "Ollama response: done={}, prompt_tokens={}, completion_tokens={}",
            ollama_response.done,
            ollama_response.prompt_eval_count,
            ollama_response.eval_count
        );

        let message = Message {
            role: Role::Assistant,
            content: ollama_response.message.content.trim().to_string(),
        };

        let response = if ollama_response.prompt_eval_count > 0 || ollama_response.eval_count > 0 {
            let usage = TokenUsage::new(
                ollama_response.prompt_eval_count,
                ollama_response.eval_count,
            );
            CompletionResponse::with_usage(message, usage)
        } else {
            CompletionResponse::new(message)
        };

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_chat_url_and_model() {
        let config = OllamaConfig {
            host: "http://localhost:11434/".to_string(),
            model: "llama3.2:latest".to_string(),
            ..OllamaConfig::default()
        };
        let provider = OllamaProvider::new(config).unwrap();
        assert_eq!(provider.chat_url(), "http://localhost:11434/api/chat");
        assert_eq!(provider.model(), "llama3.2:latest");
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn test_request_is_not_streaming() {
        let messages = vec![Message::user("hi")];
        let request = OllamaRequest {
            model: "llama3.2:latest",
            messages: &messages,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_response_parsing_with_counts() {
        let body = r#"{"message":{"role":"assistant","content":" Hello! "},"done":true,"prompt_eval_count":12,"eval_count":3}"#;
        let parsed: OllamaResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.done);
        assert_eq!(parsed.message.content, " Hello! ");
        assert_eq!(parsed.prompt_eval_count, 12);
    }
}
