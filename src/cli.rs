//! Command-line interface definition for CoachSim
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};

/// CoachSim 360 - Coaching session chat client
///
/// Converse with an AI coach persona in the terminal, backed by a
/// generative language gateway.
#[derive(Parser, Debug, Clone)]
#[command(name = "coachsim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for CoachSim
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive coaching session
    Chat {
        /// Display name of the person being coached (prompted for if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Override the configured gateway (gemini, ollama)
        #[arg(short, long)]
        gateway: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Chat {
                name: None,
                gateway: None,
            },
        }
    }
}
