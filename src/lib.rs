//! SocietyReport - pharma society report generator library
//!
//! This library builds a consolidated report of pharmaceutical societies
//! from a fixed knowledge base, exports it as a spreadsheet, emails it, and
//! runs two chat surfaces against a completion provider.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `knowledge`: Static society records
//! - `report`: Deduplicating report table and its text and HTML renderings
//! - `export`: XLSX serialization
//! - `notify`: Email composition and SMTP delivery
//! - `chat`: Chat surfaces with append-only transcripts
//! - `session`: Per-user state tying the above together
//! - `providers`: Completion provider abstraction (OpenAI, Ollama)
//! - `prompts`: System prompt, greetings and suggested prompts
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use societyreport::{Config, Session};
//! use societyreport::providers::create_provider;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider.provider_type, &config.provider)?;
//!     let mut session = Session::new();
//!     session.add_organization("IOWA Oncology Society");
//!     session.ask_report(provider.as_ref(), "Summarize the report").await;
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod knowledge;
pub mod notify;
pub mod prompts;
pub mod providers;
pub mod report;
pub mod session;

// Re-export commonly used types
pub use chat::{ChatMessage, ChatSurface, SurfaceKind};
pub use config::Config;
pub use error::{Result, SocietyReportError};
pub use notify::DeliveryOutcome;
pub use report::{AddOutcome, ReportTable};
pub use session::Session;
