//! Configuration management for SocietyReport
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//!
//! Secrets (the completion API key and the SMTP password) are never read
//! from the configuration file; they only come from the environment.

use crate::error::{Result, SocietyReportError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for SocietyReport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Completion provider configuration
    pub provider: ProviderConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Report export configuration
    #[serde(default)]
    pub report: ReportConfig,
}

/// Provider configuration
///
/// Specifies which completion backend to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use ("openai" or "ollama")
    #[serde(rename = "type")]
    pub provider_type: String,

    /// OpenAI-compatible provider configuration
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: "openai".to_string(),
            openai: OpenAiConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

/// OpenAI-compatible chat completions configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    /// Model to use
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// HTTP timeout for a single completion call (seconds)
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u64,

    /// API key, populated from `OPENAI_API_KEY` or `SOCIETYREPORT_OPENAI_API_KEY`
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_provider_timeout() -> u64 {
    120
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_base: default_openai_api_base(),
            model: default_openai_model(),
            timeout_seconds: default_provider_timeout(),
            api_key: None,
        }
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// HTTP timeout for a single completion call (seconds)
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u64,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
            timeout_seconds: default_provider_timeout(),
        }
    }
}

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// TLS from the first byte (SMTPS, usually port 465)
    Implicit,
    /// Plain connection upgraded with STARTTLS (usually port 587)
    Starttls,
}

impl TlsMode {
    /// Derive the TLS mode from the port convention
    ///
    /// # Examples
    ///
    /// ```
    /// use societyreport::config::TlsMode;
    ///
    /// assert_eq!(TlsMode::from_port(465), Some(TlsMode::Implicit));
    /// assert_eq!(TlsMode::from_port(587), Some(TlsMode::Starttls));
    /// assert_eq!(TlsMode::from_port(25), None);
    /// ```
    pub fn from_port(port: u16) -> Option<Self> {
        match port {
            465 => Some(Self::Implicit),
            587 => Some(Self::Starttls),
            _ => None,
        }
    }
}

/// Email delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP relay port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Explicit TLS mode; derived from the port when unset
    #[serde(default)]
    pub tls: Option<TlsMode>,

    /// Sender address, also used as the SMTP login
    #[serde(default)]
    pub sender: String,

    /// Recipient address
    #[serde(default)]
    pub recipient: String,

    /// Subject line
    #[serde(default = "default_subject")]
    pub subject: String,

    /// SMTP timeout (seconds)
    #[serde(default = "default_smtp_timeout")]
    pub timeout_seconds: u64,

    /// SMTP password, populated from `SOCIETYREPORT_SMTP_PASSWORD`
    #[serde(skip)]
    pub password: Option<String>,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_subject() -> String {
    "Consolidated Pharma Society Report".to_string()
}

fn default_smtp_timeout() -> u64 {
    30
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            tls: None,
            sender: String::new(),
            recipient: String::new(),
            subject: default_subject(),
            timeout_seconds: default_smtp_timeout(),
            password: None,
        }
    }
}

impl EmailConfig {
    /// Resolve the TLS mode from the explicit setting or the port convention
    ///
    /// # Errors
    ///
    /// Returns `SocietyReportError::Config` when no mode is set and the port
    /// is neither 465 nor 587.
    pub fn resolve_tls(&self) -> Result<TlsMode> {
        self.tls
            .or_else(|| TlsMode::from_port(self.smtp_port))
            .ok_or_else(|| {
                SocietyReportError::Config(format!(
                    "Cannot infer TLS mode for SMTP port {}; set email.tls to implicit or starttls",
                    self.smtp_port
                ))
                .into()
            })
    }

    /// Check that everything needed to send is present
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing setting.
    pub fn ensure_sendable(&self) -> Result<()> {
        if self.smtp_host.is_empty() {
            return Err(SocietyReportError::Config("email.smtp_host is not set".to_string()).into());
        }
        if self.sender.is_empty() {
            return Err(SocietyReportError::Config("email.sender is not set".to_string()).into());
        }
        if self.recipient.is_empty() {
            return Err(
                SocietyReportError::Config("email.recipient is not set".to_string()).into(),
            );
        }
        if self.password.as_deref().unwrap_or_default().is_empty() {
            return Err(SocietyReportError::MissingCredentials(
                "SMTP (set SOCIETYREPORT_SMTP_PASSWORD)".to_string(),
            )
            .into());
        }
        self.resolve_tls()?;
        Ok(())
    }
}

/// Report export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default path for exported spreadsheets
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

fn default_export_path() -> String {
    crate::export::EXPORT_FILENAME.to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default_config()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn default_config() -> Self {
        Self {
            provider: ProviderConfig::default(),
            email: EmailConfig::default(),
            report: ReportConfig::default(),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SocietyReportError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SocietyReportError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        // Provider overrides
        if let Ok(provider_type) = std::env::var("SOCIETYREPORT_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("SOCIETYREPORT_OPENAI_MODEL") {
            self.provider.openai.model = model;
        }

        if let Ok(api_base) = std::env::var("SOCIETYREPORT_OPENAI_API_BASE") {
            self.provider.openai.api_base = api_base;
        }

        if let Ok(key) = std::env::var("SOCIETYREPORT_OPENAI_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
        {
            self.provider.openai.api_key = Some(key);
        }

        if let Ok(ollama_host) = std::env::var("SOCIETYREPORT_OLLAMA_HOST") {
            self.provider.ollama.host = ollama_host;
        }

        if let Ok(ollama_model) = std::env::var("SOCIETYREPORT_OLLAMA_MODEL") {
            self.provider.ollama.model = ollama_model;
        }

        // Email overrides
        if let Ok(host) = std::env::var("SOCIETYREPORT_SMTP_HOST") {
            self.email.smtp_host = host;
        }

        if let Ok(port) = std::env::var("SOCIETYREPORT_SMTP_PORT") {
            if let Ok(value) = port.parse() {
                self.email.smtp_port = value;
            } else {
                tracing::warn!("Invalid SOCIETYREPORT_SMTP_PORT: {}", port);
            }
        }

        if let Ok(sender) = std::env::var("SOCIETYREPORT_EMAIL_SENDER") {
            self.email.sender = sender;
        }

        if let Ok(recipient) = std::env::var("SOCIETYREPORT_EMAIL_RECIPIENT") {
            self.email.recipient = recipient;
        }

        if let Ok(password) = std::env::var("SOCIETYREPORT_SMTP_PASSWORD") {
            self.email.password = Some(password);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
        if let Some(provider) = &cli.provider {
            self.provider.provider_type = provider.clone();
        }
    }

    /// Validate the configuration
    ///
    /// Email settings are checked only when a report is actually sent, so a
    /// session without email configured is still valid.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(
                SocietyReportError::Config("Provider type cannot be empty".to_string()).into(),
            );
        }

        let valid_providers = ["openai", "ollama"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(SocietyReportError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.provider.openai.model.is_empty() || self.provider.ollama.model.is_empty() {
            return Err(
                SocietyReportError::Config("Provider model cannot be empty".to_string()).into(),
            );
        }

        if self.provider.openai.timeout_seconds == 0 || self.provider.ollama.timeout_seconds == 0
        {
            return Err(SocietyReportError::Config(
                "Provider timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.email.smtp_port == 0 {
            return Err(
                SocietyReportError::Config("email.smtp_port must be greater than 0".to_string())
                    .into(),
            );
        }

        if self.report.export_path.is_empty() {
            return Err(
                SocietyReportError::Config("report.export_path cannot be empty".to_string())
                    .into(),
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
