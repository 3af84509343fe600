//! Gateway module for CoachSim
//!
//! Contains the upstream language-model abstraction and the Gemini and
//! Ollama integrations. The session orchestrator only ever sees the
//! `Gateway` trait; integrations are swappable through configuration.

pub mod base;
pub mod gemini;
pub mod ollama;

pub use base::{ChatMessage, Gateway};
pub use gemini::GeminiGateway;
pub use ollama::OllamaGateway;

use crate::config::GatewayConfig;
use crate::error::{CoachError, Result};

/// Create a gateway instance based on configuration
///
/// # Arguments
///
/// * `config` - Gateway configuration naming the integration to use
///
/// # Returns
///
/// Returns a boxed gateway instance
///
/// # Errors
///
/// Returns error if the gateway type is unknown or initialization fails
/// (for example a missing Gemini API key)
pub fn create_gateway(config: &GatewayConfig) -> Result<Box<dyn Gateway>> {
    match config.gateway_type.as_str() {
        "gemini" => Ok(Box::new(GeminiGateway::new(config.gemini.clone())?)),
        "ollama" => Ok(Box::new(OllamaGateway::new(config.ollama.clone())?)),
        other => {
            Err(CoachError::Gateway(format!("Unknown gateway type: {}", other)).into())
        }
    }
}
