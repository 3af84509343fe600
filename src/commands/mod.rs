/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes the interactive coaching session handler plus the slash-command
parser it uses:

- `chat`             — Interactive coaching session
- `special_commands` — Parser for in-session slash commands

These handlers are intentionally small and use the library components:
the gateway factory and the session orchestrator.
*/

use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::create_gateway;
use crate::session::{Session, Submission, SummaryOutcome};

// Slash-command parser for the interactive session
pub mod special_commands;

// Chat command handler
pub mod chat {
    //! Interactive coaching session handler.
    //!
    //! Instantiates a gateway, creates a `Session`, and runs a
    //! readline-based loop that submits user input to the coach. Slash
    //! commands are intercepted before anything reaches the gateway.

    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start an interactive coaching session
    ///
    /// Prompts for a display name when none was given on the command line,
    /// runs the greeting exchange, then loops until the user quits. `/reset`
    /// discards the session and starts the flow over from name entry.
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `name` - Optional display name from the command line
    ///
    /// # Examples
    ///
    /// ```
    /// use coachsim::commands::chat;
    /// use coachsim::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default(), None).await?;
    /// ```
    pub async fn run_chat(config: Config, name: Option<String>) -> Result<()> {
        tracing::info!("Starting interactive coaching session");

        let coach_name = config.session.coach_name.clone();
        let mut rl = DefaultEditor::new()?;
        let mut preset_name = name;

        // Each pass through this loop is one complete session. `/reset`
        // falls through to the next pass with a fresh name prompt.
        loop {
            let display_name = match preset_name.take() {
                Some(n) if !n.trim().is_empty() => n.trim().to_string(),
                _ => match prompt_display_name(&mut rl)? {
                    Some(n) => n,
                    None => break,
                },
            };

            let gateway = create_gateway(&config.gateway)?;
            tracing::debug!(gateway = gateway.name(), "Gateway created");
            let mut session = Session::new(display_name, gateway)?;

            print_welcome_banner(&coach_name, session.display_name());

            session.start().await?;
            print_coach_reply(&coach_name, &session);

            match run_session_loop(&mut rl, &mut session, &coach_name).await? {
                LoopExit::Reset => {
                    println!("{}", "Session discarded. Starting over.\n".yellow());
                    continue;
                }
                LoopExit::Quit => break,
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Why the inner readline loop stopped
    enum LoopExit {
        Reset,
        Quit,
    }

    /// Read lines and dispatch them until the user resets or quits
    async fn run_session_loop(
        rl: &mut DefaultEditor,
        session: &mut Session,
        coach_name: &str,
    ) -> Result<LoopExit> {
        loop {
            match rl.readline("You> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::ShowStatus => {
                            print_status_display(session);
                        }
                        SpecialCommand::Help => {
                            print_help();
                        }
                        SpecialCommand::Export => {
                            println!("\n{}\n", session.export_transcript());
                        }
                        SpecialCommand::Summary => {
                            handle_summary(session, coach_name).await?;
                        }
                        SpecialCommand::Clarify(text) => {
                            match session.clarify(&text).await? {
                                Submission::Sent => {
                                    print_coach_reply(coach_name, session);
                                    announce_end_if_needed(session);
                                }
                                Submission::Ignored => {}
                                Submission::Rejected => print_rejection(session),
                            }
                        }
                        SpecialCommand::Reset => return Ok(LoopExit::Reset),
                        SpecialCommand::Exit => return Ok(LoopExit::Quit),
                        SpecialCommand::None => {
                            match session.submit_user_message(trimmed).await? {
                                Submission::Sent => {
                                    print_coach_reply(coach_name, session);
                                    announce_end_if_needed(session);
                                }
                                Submission::Ignored => {}
                                Submission::Rejected => print_rejection(session),
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    return Ok(LoopExit::Quit);
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    return Ok(LoopExit::Quit);
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    return Ok(LoopExit::Quit);
                }
            }
        }
    }

    /// Request the end-of-session summary and report the outcome
    async fn handle_summary(session: &mut Session, coach_name: &str) -> Result<()> {
        if !session.is_ended() {
            println!(
                "{}",
                "The coach hasn't closed the session yet. The summary becomes available once it ends."
                    .yellow()
            );
            return Ok(());
        }

        println!("{}", "Generating session summary...".cyan());
        match session.request_summary().await? {
            SummaryOutcome::Resumed => {
                println!(
                    "{}",
                    "The coach found unfinished business. Session resumed.".green()
                );
                print_coach_reply(coach_name, session);
            }
            SummaryOutcome::Completed => {
                print_coach_reply(coach_name, session);
            }
        }
        Ok(())
    }

    /// Print the most recent coach message
    fn print_coach_reply(coach_name: &str, session: &Session) {
        if let Some(message) = session.transcript().messages().last() {
            println!("\n{} {}\n", format!("{}:", coach_name).cyan().bold(), message.text);
        }
    }

    /// Announce session completion the first time the end marker lands
    fn announce_end_if_needed(session: &Session) {
        if session.is_ended() {
            println!(
                "{}",
                "Session complete. Type '/summary' for your action plan, '/export' for the transcript, or '/reset' to start over."
                    .green()
                    .bold()
            );
        }
    }

    /// Explain why a submission was not sent
    fn print_rejection(session: &Session) {
        if session.is_ended() {
            println!(
                "{}",
                "The session has ended. Type '/summary', '/export', '/reset', or '/quit'.".yellow()
            );
        } else {
            println!("{}", "Hold on, the coach is still replying.".yellow());
        }
    }

    /// Ask for a display name, retrying until one is entered
    ///
    /// Returns `None` if the user aborts with Ctrl-C or Ctrl-D.
    fn prompt_display_name(rl: &mut DefaultEditor) -> Result<Option<String>> {
        loop {
            match rl.readline("What's your name? ") {
                Ok(line) => {
                    let name = line.trim();
                    if name.is_empty() {
                        println!("{}", "A name is required to start the session.".yellow());
                        continue;
                    }
                    return Ok(Some(name.to_string()));
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    return Ok(None);
                }
            }
        }
    }

    /// Display welcome banner at the start of a coaching session
    fn print_welcome_banner(coach_name: &str, display_name: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              CoachSim 360 - Leadership Coaching              ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Coach: {}", coach_name.cyan().bold());
        println!("You:   {}\n", display_name);
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display detailed status information about the current session
    ///
    /// Shows the gateway in use, the message count, and whether the session
    /// has ended. This is called when the user types the '/status' command.
    fn print_status_display(session: &Session) {
        let state = if session.is_ended() {
            "ended".yellow()
        } else {
            "active".green()
        };

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    CoachSim Session Status                   ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Gateway:   {}", session.gateway_name());
        println!("User:      {}", session.display_name());
        println!("Messages:  {}", session.transcript().len());
        println!("State:     {}", state);
        println!();
    }

}
