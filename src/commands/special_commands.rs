//! Special commands parser for the interactive coaching session
//!
//! This module parses the slash commands a user can enter during a session.
//! Special commands allow users to:
//! - View session status
//! - Ask the coach to clarify a piece of text
//! - Request the end-of-session summary
//! - Export the transcript
//! - Reset the session and start over
//! - Display help information
//!
//! Commands are prefixed with `/` and are case-insensitive, except for the
//! quoted text passed to `/clarify`, which is kept as typed.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during a coaching session
///
/// These commands modify the session state or provide information,
/// rather than being sent to the coach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display session status
    ///
    /// Shows the gateway in use, the message count, and whether the
    /// session has ended.
    ShowStatus,

    /// Ask the coach to elaborate on a quoted piece of text
    Clarify(String),

    /// Request the end-of-session summary
    ///
    /// Only honored once the coach has closed the session.
    Summary,

    /// Print the transcript as plain text
    Export,

    /// Discard the current session and start a new one
    Reset,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the coach as a regular message.
    None,
}

/// Parse a user input string into a special command
///
/// Commands are case-insensitive and must start with `/`, except the bare
/// words `exit` and `quit`. Anything else is treated as a message for the
/// coach.
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is
/// not a valid command, and `CommandError::MissingArgument` if `/clarify`
/// is given no text.
///
/// # Examples
///
/// ```
/// use coachsim::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/status").unwrap();
/// assert_eq!(cmd, SpecialCommand::ShowStatus);
///
/// let cmd = parse_special_command("/clarify active listening").unwrap();
/// assert_eq!(cmd, SpecialCommand::Clarify("active listening".to_string()));
///
/// let cmd = parse_special_command("hello coach").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// // Invalid command returns error
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // If input doesn't start with "/", it's not a command (except exit/quit)
    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/summary" => Ok(SpecialCommand::Summary),
        "/export" => Ok(SpecialCommand::Export),
        "/reset" => Ok(SpecialCommand::Reset),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/quit" | "/exit" | "exit" | "quit" => Ok(SpecialCommand::Exit),

        // Handle /clarify with its free-form argument, preserving case
        "/clarify" => Err(CommandError::MissingArgument {
            command: "/clarify".to_string(),
            usage: "/clarify <text to clarify>".to_string(),
        }),
        _ if lower.starts_with("/clarify ") => {
            // The argument comes from the original input, not the lowered
            // copy; checked slicing guards against any boundary mismatch
            // between the two.
            let text = trimmed.get(9..).map(str::trim).unwrap_or_default();
            if text.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/clarify".to_string(),
                    usage: "/clarify <text to clarify>".to_string(),
                })
            } else {
                Ok(SpecialCommand::Clarify(text.to_string()))
            }
        }

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help information for all special commands
pub fn print_help() {
    println!("\nAvailable commands:");
    println!("  /status              Show gateway, message count, and session state");
    println!("  /clarify <text>      Ask the coach to elaborate on <text>");
    println!("  /summary             Request the session summary (after the session ends)");
    println!("  /export              Print the transcript as plain text");
    println!("  /reset               Discard this session and start a new one");
    println!("  /help, /?            Show this help");
    println!("  /quit, exit          Leave the session");
    println!("\nAnything else is sent to the coach.\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(
            parse_special_command("/status").unwrap(),
            SpecialCommand::ShowStatus
        );
        assert_eq!(
            parse_special_command("  /STATUS  ").unwrap(),
            SpecialCommand::ShowStatus
        );
    }

    #[test]
    fn test_parse_summary_export_reset() {
        assert_eq!(
            parse_special_command("/summary").unwrap(),
            SpecialCommand::Summary
        );
        assert_eq!(
            parse_special_command("/export").unwrap(),
            SpecialCommand::Export
        );
        assert_eq!(
            parse_special_command("/reset").unwrap(),
            SpecialCommand::Reset
        );
    }

    #[test]
    fn test_parse_help_aliases() {
        assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }

    #[test]
    fn test_parse_exit_aliases() {
        for input in ["/quit", "/exit", "exit", "quit", "EXIT"] {
            assert_eq!(parse_special_command(input).unwrap(), SpecialCommand::Exit);
        }
    }

    #[test]
    fn test_clarify_preserves_case() {
        assert_eq!(
            parse_special_command("/clarify Active Listening").unwrap(),
            SpecialCommand::Clarify("Active Listening".to_string())
        );
    }

    #[test]
    fn test_clarify_mixed_case_command_keeps_argument_intact() {
        assert_eq!(
            parse_special_command("/ClArIfY Trust Issues").unwrap(),
            SpecialCommand::Clarify("Trust Issues".to_string())
        );
        assert_eq!(
            parse_special_command("/CLARIFY 360° feedback").unwrap(),
            SpecialCommand::Clarify("360° feedback".to_string())
        );
    }

    #[test]
    fn test_clarify_requires_argument() {
        assert!(matches!(
            parse_special_command("/clarify"),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            parse_special_command("/clarify   "),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_unknown_command_is_error() {
        assert!(matches!(
            parse_special_command("/frobnicate"),
            Err(CommandError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(
            parse_special_command("I had a rough week").unwrap(),
            SpecialCommand::None
        );
        assert_eq!(parse_special_command("").unwrap(), SpecialCommand::None);
    }
}
