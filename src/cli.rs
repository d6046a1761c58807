//! Command-line interface definition for SocietyReport
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the interactive session, one-shot exports,
//! emailing a report, and asking a single report question.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SocietyReport - pharma society report generator
///
/// Build a consolidated report of pharmaceutical societies, export it,
/// email it, and chat about it with an AI provider.
#[derive(Parser, Debug, Clone)]
#[command(name = "societyreport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml", global = true)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the completion provider from config (openai, ollama)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for SocietyReport
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive report and chat session
    Session,

    /// List the societies that can be added to a report
    Societies,

    /// Build a report from the given societies and write it as XLSX
    Export {
        /// Society to include (repeatable, in report order)
        #[arg(short, long = "society", required = true)]
        societies: Vec<String>,

        /// Output path (defaults to report.export_path from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a report from the given societies and email it
    Email {
        /// Society to include (repeatable, in report order)
        #[arg(short, long = "society", required = true)]
        societies: Vec<String>,

        /// Override the configured recipient
        #[arg(long)]
        to: Option<String>,
    },

    /// Ask one question about a report built from the given societies
    Ask {
        /// Society to include (repeatable, in report order)
        #[arg(short, long = "society")]
        societies: Vec<String>,

        /// The question to ask
        question: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            provider: None,
            command: Commands::Session,
        }
    }
}
