//! CoachSim 360 - Coaching session chat client
//!
#![doc = "CoachSim 360 - Coaching session chat client"]
#![doc = "Main entry point for the CoachSim application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coachsim::cli::{Cli, Commands};
use coachsim::commands;
use coachsim::config::Config;

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
        Commands::Chat { name, gateway } => {
            tracing::info!("Starting interactive coaching session");
            if let Some(g) = &gateway {
                tracing::debug!("Using gateway override: {}", g);
            }

            // Delegate to the chat command handler. The gateway override was
            // already folded into `config` during load.
            commands::chat::run_chat(config, name).await?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "coachsim=debug" } else { "coachsim=info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
