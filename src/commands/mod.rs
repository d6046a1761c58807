/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes these top-level command modules:

- `session`   - Interactive report and chat session
- `societies` - List the knowledge base
- `export`    - Build a report and write it as XLSX
- `email`     - Build a report and email it
- `ask`       - Ask one report question

The one-shot commands build a fresh [`Session`] from `--society` arguments
and reject names that are not in the knowledge base.
*/

use crate::config::Config;
use crate::error::{Result, SocietyReportError};
use crate::knowledge;
use crate::report::{AddOutcome, ReportTable};
use crate::session::Session;

use colored::Colorize;
use prettytable::{cell, row, Table};

// Special commands parser for the interactive session
pub mod special_commands;

/// Build a session whose report holds `societies` in the given order
///
/// Repeated names are kept once.
///
/// # Errors
///
/// Returns `SocietyReportError::UnknownSociety` for the first name that is
/// not in the knowledge base
///
/// # Examples
///
/// ```
/// use societyreport::commands::build_report_session;
///
/// let names = vec!["IOWA Oncology Society".to_string()];
/// let session = build_report_session(&names).unwrap();
/// assert_eq!(session.report().len(), 1);
///
/// assert!(build_report_session(&["Atlantis".to_string()]).is_err());
/// ```
pub fn build_report_session(societies: &[String]) -> Result<Session> {
    let mut session = Session::new();
    for name in societies {
        if session.add_organization(name) == AddOutcome::Unknown {
            return Err(SocietyReportError::UnknownSociety(name.clone()).into());
        }
    }
    Ok(session)
}

/// Print the report as a table of its key columns
pub fn print_report_table(report: &ReportTable) {
    if report.is_empty() {
        println!("{}", "No societies added yet. Use /available and /add.".yellow());
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["#", "Society Name", "Membership Count", "Region"]);
    for (i, row) in report.rows().iter().enumerate() {
        table.add_row(row![
            i + 1,
            row.name(),
            row.membership_count(),
            row.record().region
        ]);
    }

    println!("\nConsolidated report ({} societies):\n", report.len());
    table.printstd();
    println!();
}

/// Print one society with every column
pub fn print_society_detail(name: &str) {
    let Some(record) = knowledge::lookup(name) else {
        return;
    };

    let mut table = Table::new();
    table.add_row(row!["Society Name", record.name]);
    table.add_row(row!["Membership Count", record.membership_count]);
    for (label, value) in record.descriptive_fields() {
        table.add_row(row![label, value]);
    }
    table.add_row(row!["Region", record.region]);
    table.printstd();
}

fn print_numbered_names(names: &[&str]) {
    let mut table = Table::new();
    table.add_row(row!["#", "Society Name"]);
    for (i, name) in names.iter().enumerate() {
        table.add_row(row![i + 1, name]);
    }
    table.printstd();
}

// Societies command handler
pub mod societies {
    //! Knowledge base listing.

    use super::*;

    /// Print every known society with membership and region
    pub fn list_societies() -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["Society Name", "Membership Count", "Region"]);
        for record in knowledge::KNOWLEDGE_BASE {
            table.add_row(row![record.name, record.membership_count, record.region]);
        }

        println!("\nKnown societies:\n");
        table.printstd();
        println!();
        Ok(())
    }
}

// Export command handler
pub mod export {
    //! One-shot spreadsheet export.

    use super::*;
    use std::path::PathBuf;

    /// Build a report from `societies` and write it as XLSX
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `societies` - Society names in report order
    /// * `output` - Destination, falling back to `report.export_path`
    ///
    /// # Errors
    ///
    /// Returns error on an unknown society or if the file cannot be written
    pub fn run_export(config: &Config, societies: &[String], output: Option<PathBuf>) -> Result<()> {
        let session = build_report_session(societies)?;
        let path = output.unwrap_or_else(|| PathBuf::from(&config.report.export_path));
        let bytes = session.export_to_file(&path)?;
        println!(
            "{}",
            format!(
                "Wrote {} societies to {} ({} bytes)",
                session.report().len(),
                path.display(),
                bytes
            )
            .green()
        );
        Ok(())
    }
}

// Email command handler
pub mod email {
    //! One-shot report email.

    use super::*;
    use crate::notify::{DeliveryOutcome, SmtpMailer};

    /// Build a report from `societies` and email it
    ///
    /// # Errors
    ///
    /// Returns error on an unknown society, incomplete email settings, or a
    /// failed delivery
    pub async fn run_email(config: Config, societies: &[String], to: Option<String>) -> Result<()> {
        let session = build_report_session(societies)?;

        let mut email_config = config.email;
        if let Some(recipient) = to {
            email_config.recipient = recipient;
        }

        let mailer = SmtpMailer::from_config(&email_config)?;
        let outcome = session.email_report(&mailer, &email_config).await;
        match &outcome {
            DeliveryOutcome::Sent => {
                println!("{}", outcome.to_string().green());
                Ok(())
            }
            DeliveryOutcome::Failed { reason } => {
                Err(SocietyReportError::Email(reason.clone()).into())
            }
        }
    }
}

// Ask command handler
pub mod ask {
    //! One-shot report question.

    use super::*;
    use crate::providers::create_provider;

    /// Ask a single report chat question and print the reply
    ///
    /// A provider failure is printed as the reply, like in the session.
    ///
    /// # Errors
    ///
    /// Returns error on an unknown society or if the provider cannot be created
    pub async fn run_ask(config: Config, societies: &[String], question: &str) -> Result<()> {
        let mut session = build_report_session(societies)?;
        let provider = create_provider(&config.provider.provider_type, &config.provider)?;

        if let Some(reply) = session.ask_report(provider.as_ref(), question).await {
            if reply.is_error() {
                eprintln!("{}", reply.text.red());
            } else {
                println!("{}", reply.text);
            }
        }
        Ok(())
    }
}

// Interactive session handler
pub mod session {
    //! Interactive report session.
    //!
    //! Runs a readline loop over one [`Session`]. Slash commands manage the
    //! report; anything else is sent to the active chat surface.

    use super::special_commands::{parse_special_command, print_help, Selection, SpecialCommand};
    use super::*;
    use crate::chat::{ChatSurface, SurfaceKind};
    use crate::notify::SmtpMailer;
    use crate::providers::{create_provider, Provider, Role};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::path::PathBuf;

    /// Start the interactive session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Errors
    ///
    /// Returns error if the provider or the line editor cannot be created
    pub async fn run_session(config: Config) -> Result<()> {
        tracing::info!("Starting interactive session");

        let provider = create_provider(&config.provider.provider_type, &config.provider)?;
        let mut session = Session::new();
        let mut active = SurfaceKind::Report;
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(provider.as_ref());
        print_last_message(session.report_chat());

        loop {
            let prompt = format_prompt(active, session.report().len());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::Add(selection) => add_selection(&mut session, selection),
                        SpecialCommand::Available => {
                            let available = session.available_organizations();
                            if available.is_empty() {
                                println!("{}", "Every society is already in the report.".yellow());
                            } else {
                                print_numbered_names(&available);
                            }
                        }
                        SpecialCommand::ShowReport => print_report_table(session.report()),
                        SpecialCommand::Export(path) => export_report(&session, &config, path),
                        SpecialCommand::Email => email_report(&session, &config).await,
                        SpecialCommand::SwitchChat(kind) => {
                            active = kind;
                            println!("Switched to {} chat\n", kind);
                            print_last_message(surface(&session, active));
                        }
                        SpecialCommand::Suggest(None) => {
                            for (i, suggestion) in
                                surface(&session, active).suggestions().iter().enumerate()
                            {
                                println!("  {}. {}", i + 1, suggestion.label);
                            }
                            println!();
                        }
                        SpecialCommand::Suggest(Some(n)) => {
                            let query = surface(&session, active)
                                .suggestions()
                                .get(n - 1)
                                .map(|s| s.query);
                            match query {
                                Some(query) => {
                                    println!("{}", format!("> {}", query).cyan());
                                    ask(&mut session, provider.as_ref(), active, query).await;
                                }
                                None => eprintln!("{}", format!("No suggestion {}", n).red()),
                            }
                        }
                        SpecialCommand::History => print_history(surface(&session, active)),
                        SpecialCommand::ShowStatus => {
                            print_status(&session, provider.as_ref(), active)
                        }
                        SpecialCommand::Help => print_help(),
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            ask(&mut session, provider.as_ref(), active, trimmed).await;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn surface(session: &Session, kind: SurfaceKind) -> &ChatSurface {
        match kind {
            SurfaceKind::Report => session.report_chat(),
            SurfaceKind::General => session.general_chat(),
        }
    }

    async fn ask(session: &mut Session, provider: &dyn Provider, kind: SurfaceKind, text: &str) {
        let reply = match kind {
            SurfaceKind::Report => session.ask_report(provider, text).await,
            SurfaceKind::General => session.ask_general(provider, text).await,
        };

        if let Some(reply) = reply {
            if reply.is_error() {
                eprintln!("\n{}\n", reply.text.red());
            } else {
                println!("\n{}\n", reply.text);
            }
        }
    }

    fn add_selection(session: &mut Session, selection: Selection) {
        let added = match selection {
            Selection::Position(n) => match session.select_available(n - 1) {
                Some(name) => name.to_string(),
                None => {
                    eprintln!(
                        "{}",
                        format!("No available society at position {}", n).red()
                    );
                    return;
                }
            },
            Selection::Name(name) => match session.add_organization(&name) {
                AddOutcome::Added => name,
                AddOutcome::AlreadySelected => {
                    println!("{}", format!("{} is already in the report", name).yellow());
                    return;
                }
                AddOutcome::Unknown => {
                    eprintln!("{}", format!("Unknown society: {}", name).red());
                    return;
                }
            },
        };

        println!("{}", format!("Added {}", added).green());
        print_society_detail(&added);
        println!();
    }

    fn export_report(session: &Session, config: &Config, path: Option<PathBuf>) {
        let path = path.unwrap_or_else(|| PathBuf::from(&config.report.export_path));
        match session.export_to_file(&path) {
            Ok(bytes) => println!(
                "{}",
                format!("Saved report to {} ({} bytes)", path.display(), bytes).green()
            ),
            Err(e) => eprintln!("{}", format!("Export failed: {}", e).red()),
        }
    }

    async fn email_report(session: &Session, config: &Config) {
        let outcome = match SmtpMailer::from_config(&config.email) {
            Ok(mailer) => session.email_report(&mailer, &config.email).await,
            Err(e) => crate::notify::DeliveryOutcome::Failed {
                reason: e.to_string(),
            },
        };

        if outcome.is_sent() {
            println!("{}", outcome.to_string().green());
        } else {
            eprintln!("{}", outcome.to_string().red());
        }
    }

    fn format_prompt(kind: SurfaceKind, rows: usize) -> String {
        let tag = match kind {
            SurfaceKind::Report => "[REPORT]".cyan(),
            SurfaceKind::General => "[GENERAL]".magenta(),
        };
        format!("{} ({} societies) >> ", tag, rows)
    }

    fn print_last_message(chat: &ChatSurface) {
        if let Some(message) = chat.last() {
            println!("{}\n", message.text.bold());
        }
    }

    fn print_history(chat: &ChatSurface) {
        for message in chat.transcript() {
            let who = match message.role {
                Role::User => "you".cyan(),
                Role::Assistant => "assistant".green(),
                Role::System => "system".dimmed(),
            };
            println!(
                "[{}] {}: {}",
                message.sent_at.format("%H:%M:%S"),
                who,
                message.text
            );
        }
        println!();
    }

    fn print_welcome_banner(provider: &dyn Provider) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║        Pharma Society QnA Report Generator                   ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Provider: {} ({})", provider.name(), provider.model());
        println!("Type '/available' to see societies, '/help' for commands, 'exit' to quit\n");
    }

    fn print_status(session: &Session, provider: &dyn Provider, active: SurfaceKind) {
        println!("\nSession:      {}", session.id());
        println!(
            "Started:      {}",
            session.started_at().format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!("Provider:     {} ({})", provider.name(), provider.model());
        println!("Report rows:  {}", session.report().len());
        println!("Active chat:  {}", active);
        println!(
            "Transcripts:  report={}, general={}\n",
            session.report_chat().transcript().len(),
            session.general_chat().transcript().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_report_session_keeps_order_and_dedups() {
        let names = vec![
            "IOS (Indiana Oncology Society)".to_string(),
            "IOWA Oncology Society".to_string(),
            "IOS (Indiana Oncology Society)".to_string(),
        ];
        let session = build_report_session(&names).unwrap();
        assert_eq!(
            session.report().names(),
            vec!["IOS (Indiana Oncology Society)", "IOWA Oncology Society"]
        );
    }

    #[test]
    fn test_build_report_session_rejects_unknown() {
        let names = vec!["IOWA Oncology Society".to_string(), "Nowhere".to_string()];
        let err = build_report_session(&names).unwrap_err();
        assert!(err.to_string().contains("Unknown society: Nowhere"));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        let names = vec!["GASCO (Georgia Society of Clinical Oncology)".to_string()];
        export::run_export(&Config::default(), &names, Some(path.clone())).unwrap();
        assert!(path.exists());
    }
}
