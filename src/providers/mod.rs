//! Provider module for SocietyReport
//!
//! This module contains the completion provider abstraction and the
//! OpenAI-compatible and Ollama implementations.

pub mod base;
pub mod ollama;
pub mod openai;

pub use base::{CompletionResponse, Message, Provider, Role, TokenUsage};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `provider_type` - Type of provider ("openai" or "ollama")
/// * `config` - Provider configuration
///
/// # Errors
///
/// Returns error if provider type is invalid or initialization fails
///
/// # Examples
///
/// ```
/// use societyreport::config::ProviderConfig;
/// use societyreport::providers::create_provider;
///
/// let provider = create_provider("ollama", &ProviderConfig::default()).unwrap();
/// assert_eq!(provider.name(), "ollama");
/// ```
pub fn create_provider(provider_type: &str, config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match provider_type {
        "openai" => Ok(Box::new(OpenAiProvider::new(config.openai.clone())?)),
        "ollama" => Ok(Box::new(OllamaProvider::new(config.ollama.clone())?)),
        _ => Err(crate::error::SocietyReportError::Provider(format!(
            "Unknown provider type: {}",
            provider_type
        ))
        .into()),
    }
}
