//! SocietyReport - pharma society report generator
//!
#![doc = "SocietyReport - pharma society report generator"]
#![doc = "Main entry point for the SocietyReport application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use societyreport::cli::{Cli, Commands};
use societyreport::commands;
use societyreport::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Session => {
            commands::session::run_session(config).await?;
            Ok(())
        }
        Commands::Societies => {
            commands::societies::list_societies()?;
            Ok(())
        }
        Commands::Export { societies, output } => {
            tracing::info!("Exporting report for {} societies", societies.len());
            if let Some(path) = &output {
                tracing::debug!("Writing export to: {}", path.display());
            }
            commands::export::run_export(&config, &societies, output)?;
            Ok(())
        }
        Commands::Email { societies, to } => {
            tracing::info!("Emailing report for {} societies", societies.len());
            if let Some(recipient) = &to {
                tracing::debug!("Using recipient override: {}", recipient);
            }
            commands::email::run_email(config, &societies, to).await?;
            Ok(())
        }
        Commands::Ask {
            societies,
            question,
        } => {
            tracing::info!("Asking report question over {} societies", societies.len());
            commands::ask::run_ask(config, &societies, &question).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins; otherwise `--verbose` selects debug for this crate.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "societyreport=debug"
    } else {
        "societyreport=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
