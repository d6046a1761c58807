//! Special commands parser for the interactive session
//!
//! Special commands drive the report and switch between chat surfaces:
//! - Add societies to the report and list what is still available
//! - Show, export and email the report
//! - Switch between the report chat and the general chat
//! - Send a suggested prompt
//! - Show history, status and help
//! - Exit the session
//!
//! Commands are prefixed with `/` and the command word is case-insensitive.
//! Anything else is sent to the active chat.

use crate::chat::SurfaceKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// How a society is picked by `/add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 1-based position in the `/available` listing
    Position(usize),
    /// Exact society name
    Name(String),
}

/// Special commands that can be executed during the interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Add a society to the report
    Add(Selection),

    /// List societies not yet in the report
    Available,

    /// Print the report table
    ShowReport,

    /// Write the report spreadsheet, optionally to a specific path
    Export(Option<PathBuf>),

    /// Email the report
    Email,

    /// Make a chat surface the target of plain input
    SwitchChat(SurfaceKind),

    /// List suggestions for the active chat, or send the n-th one (1-based)
    Suggest(Option<usize>),

    /// Print the active chat transcript
    History,

    /// Display session status
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the active chat.
    None,
}

fn parse_position(command: &str, arg: &str) -> Result<usize, CommandError> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        }),
    }
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an invalid argument.
/// Returns CommandError::MissingArgument if a command requires an argument but none was provided.
///
/// # Examples
///
/// ```
/// use societyreport::chat::SurfaceKind;
/// use societyreport::commands::special_commands::{parse_special_command, Selection, SpecialCommand};
///
/// let cmd = parse_special_command("/add 2").unwrap();
/// assert_eq!(cmd, SpecialCommand::Add(Selection::Position(2)));
///
/// let cmd = parse_special_command("/chat general").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchChat(SurfaceKind::General));
///
/// let cmd = parse_special_command("which society is largest?").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(SpecialCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    // Arguments keep their case; society names are matched exactly
    let (word, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match (word.as_str(), arg) {
        ("/add", "") => Err(CommandError::MissingArgument {
            command: "/add".to_string(),
            usage: "/add <number|society name>".to_string(),
        }),
        ("/add", arg) => {
            if arg.chars().all(|c| c.is_ascii_digit()) {
                Ok(SpecialCommand::Add(Selection::Position(parse_position(
                    "/add", arg,
                )?)))
            } else {
                Ok(SpecialCommand::Add(Selection::Name(arg.to_string())))
            }
        }

        ("/available" | "/societies", "") => Ok(SpecialCommand::Available),
        ("/report", "") => Ok(SpecialCommand::ShowReport),

        ("/export", "") => Ok(SpecialCommand::Export(None)),
        ("/export", path) => Ok(SpecialCommand::Export(Some(PathBuf::from(path)))),

        ("/email", "") => Ok(SpecialCommand::Email),

        ("/chat", "") => Err(CommandError::MissingArgument {
            command: "/chat".to_string(),
            usage: "/chat <report|general>".to_string(),
        }),
        ("/chat", arg) => match arg.to_lowercase().as_str() {
            "report" => Ok(SpecialCommand::SwitchChat(SurfaceKind::Report)),
            "general" => Ok(SpecialCommand::SwitchChat(SurfaceKind::General)),
            _ => Err(CommandError::UnsupportedArgument {
                command: "/chat".to_string(),
                arg: arg.to_string(),
            }),
        },
        ("/report-chat", "") => Ok(SpecialCommand::SwitchChat(SurfaceKind::Report)),
        ("/general", "") => Ok(SpecialCommand::SwitchChat(SurfaceKind::General)),

        ("/suggest", "") => Ok(SpecialCommand::Suggest(None)),
        ("/suggest", arg) => Ok(SpecialCommand::Suggest(Some(parse_position(
            "/suggest", arg,
        )?))),

        ("/history", "") => Ok(SpecialCommand::History),
        ("/status", "") => Ok(SpecialCommand::ShowStatus),
        ("/help" | "/?", "") => Ok(SpecialCommand::Help),
        ("/exit" | "/quit", "") => Ok(SpecialCommand::Exit),

        (
            "/available" | "/societies" | "/report" | "/email" | "/history" | "/status" | "/help"
            | "/report-chat" | "/general",
            arg,
        ) => Err(CommandError::UnsupportedArgument {
            command: word.clone(),
            arg: arg.to_string(),
        }),

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help for all special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for the Report Session
=======================================

REPORT:
  /available            - List societies not yet in the report
  /add <number>         - Add the society at that position of /available
  /add <society name>   - Add a society by its exact name
  /report               - Show the consolidated report
  /export [path]        - Save the report as an XLSX spreadsheet
  /email                - Email the report to the configured recipient

CHAT:
  /chat report          - Ask questions about the report (default)
  /chat general         - General oncology society questions
  /suggest              - List suggested prompts for the active chat
  /suggest <number>     - Send a suggested prompt
  /history              - Show the active chat transcript

SESSION INFORMATION:
  /status               - Show provider, report size and active chat
  /help                 - Show this help message

EXIT:
  exit, quit, /exit     - Leave the session

Anything that does not start with '/' is sent to the active chat.
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(
            parse_special_command("List the societies").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_exit_aliases() {
        for input in ["exit", "QUIT", "/exit", "/quit"] {
            assert_eq!(parse_special_command(input).unwrap(), SpecialCommand::Exit);
        }
    }

    #[test]
    fn test_add_by_position() {
        assert_eq!(
            parse_special_command("/add 3").unwrap(),
            SpecialCommand::Add(Selection::Position(3))
        );
    }

    #[test]
    fn test_add_position_zero_is_rejected() {
        assert!(matches!(
            parse_special_command("/add 0"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_add_by_name_preserves_case() {
        assert_eq!(
            parse_special_command("/ADD IOWA Oncology Society").unwrap(),
            SpecialCommand::Add(Selection::Name("IOWA Oncology Society".to_string()))
        );
    }

    #[test]
    fn test_add_without_argument() {
        assert!(matches!(
            parse_special_command("/add"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_export_with_and_without_path() {
        assert_eq!(
            parse_special_command("/export").unwrap(),
            SpecialCommand::Export(None)
        );
        assert_eq!(
            parse_special_command("/export out/report.xlsx").unwrap(),
            SpecialCommand::Export(Some(PathBuf::from("out/report.xlsx")))
        );
    }

    #[test]
    fn test_switch_chat() {
        assert_eq!(
            parse_special_command("/chat Report").unwrap(),
            SpecialCommand::SwitchChat(SurfaceKind::Report)
        );
        assert_eq!(
            parse_special_command("/general").unwrap(),
            SpecialCommand::SwitchChat(SurfaceKind::General)
        );
        assert!(matches!(
            parse_special_command("/chat sideways"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_suggest() {
        assert_eq!(
            parse_special_command("/suggest").unwrap(),
            SpecialCommand::Suggest(None)
        );
        assert_eq!(
            parse_special_command("/suggest 2").unwrap(),
            SpecialCommand::Suggest(Some(2))
        );
        assert!(parse_special_command("/suggest two").is_err());
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_special_command("/report").unwrap(), SpecialCommand::ShowReport);
        assert_eq!(parse_special_command("/email").unwrap(), SpecialCommand::Email);
        assert_eq!(parse_special_command("/available").unwrap(), SpecialCommand::Available);
        assert_eq!(parse_special_command("/history").unwrap(), SpecialCommand::History);
        assert_eq!(parse_special_command("/status").unwrap(), SpecialCommand::ShowStatus);
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }

    #[test]
    fn test_argument_to_bare_command_is_rejected() {
        let err = parse_special_command("/status now").unwrap_err();
        assert_eq!(
            err,
            CommandError::UnsupportedArgument {
                command: "/status".to_string(),
                arg: "now".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_special_command("/frobnicate").unwrap_err();
        assert!(err.to_string().contains("Unknown command: /frobnicate"));
    }
}
