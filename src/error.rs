//! Error types for SocietyReport
//!
//! This module defines the error types used throughout the application,
//! using `thiserror` for ergonomic error handling.
//!
//! Session operations (selecting societies, chat turns, email delivery)
//! degrade to visible outcomes instead of returning these errors; the enum
//! covers startup, configuration and collaborator plumbing.

use thiserror::Error;

/// Main error type for SocietyReport operations
#[derive(Error, Debug)]
pub enum SocietyReportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion provider errors (API calls, unexpected responses)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Spreadsheet export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Email composition or transport errors
    #[error("Email error: {0}")]
    Email(String),

    /// A society name that is not in the knowledge base
    #[error("Unknown society: {0}")]
    UnknownSociety(String),

    /// Missing credentials for a collaborator
    #[error("Missing credentials for {0}")]
    MissingCredentials(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SocietyReport operations
///
/// Uses `anyhow::Error` so callers get rich context and easy propagation.
pub type Result<T> = anyhow::Result<T>;
