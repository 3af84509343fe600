//! CoachSim 360 - Coaching session chat client library
//!
//! This library provides the core functionality for the CoachSim coaching
//! simulator, including the session orchestrator, the marker protocol,
//! gateway abstractions, and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Session orchestration, state gating, and the transcript lifecycle
//! - `transcript`: Message and transcript types
//! - `protocol`: Session-control markers and fixed fallback text
//! - `prompts`: Persona instruction and summary prompt builders
//! - `gateway`: Language-model gateway abstraction and implementations (Gemini, Ollama)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use coachsim::{Config, Session};
//! use coachsim::gateway::create_gateway;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let gateway = create_gateway(&config.gateway)?;
//!     let mut session = Session::new("Jordan", gateway)?;
//!     session.start().await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod prompts;
pub mod protocol;
pub mod session;
pub mod transcript;

// Re-export commonly used types
pub use config::Config;
pub use error::{CoachError, Result};
pub use session::{Session, Submission, SummaryOutcome};
pub use transcript::{Message, Role, Transcript};

#[cfg(test)]
pub mod test_utils;
