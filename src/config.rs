//! Configuration management for CoachSim
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{CoachError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for CoachSim
///
/// Holds the gateway selection and settings plus session presentation
/// options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gateway configuration (Gemini, Ollama)
    pub gateway: GatewayConfig,

    /// Session presentation configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Gateway configuration
///
/// Specifies which language-model gateway to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Type of gateway to use
    #[serde(rename = "type")]
    pub gateway_type: String,

    /// Google Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

/// Google Gemini gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Sampling temperature for conversational replies
    #[serde(default = "default_gemini_temperature")]
    pub temperature: f32,

    /// API key; usually supplied via the GEMINI_API_KEY environment variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Optional API base URL override (useful for tests and local mocks)
    ///
    /// When set, this base is used to build the `generateContent` endpoint,
    /// which allows tests to point the gateway at a mock server.
    #[serde(default)]
    pub api_base: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_gemini_temperature() -> f32 {
    0.7
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            temperature: default_gemini_temperature(),
            api_key: None,
            api_base: None,
        }
    }
}

/// Ollama gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

/// Session presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Display name of the coach persona
    #[serde(default = "default_coach_name")]
    pub coach_name: String,
}

fn default_coach_name() -> String {
    "Coach Cammy".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            coach_name: default_coach_name(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// Precedence, lowest to highest: config file, environment variables,
    /// CLI arguments.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CoachError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| CoachError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(gateway_type) = std::env::var("COACHSIM_GATEWAY") {
            self.gateway.gateway_type = gateway_type;
        }

        if let Ok(model) = std::env::var("COACHSIM_GEMINI_MODEL") {
            self.gateway.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("COACHSIM_GEMINI_API_BASE") {
            self.gateway.gemini.api_base = Some(api_base);
        }

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            self.gateway.gemini.api_key = Some(api_key);
        }

        if let Ok(host) = std::env::var("COACHSIM_OLLAMA_HOST") {
            self.gateway.ollama.host = host;
        }

        if let Ok(model) = std::env::var("COACHSIM_OLLAMA_MODEL") {
            self.gateway.ollama.model = model;
        }

        if let Ok(coach_name) = std::env::var("COACHSIM_COACH_NAME") {
            self.session.coach_name = coach_name;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        let crate::cli::Commands::Chat { gateway, .. } = &cli.command;
        if let Some(gateway_type) = gateway {
            self.gateway.gateway_type = gateway_type.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the gateway type is unknown or the Gemini
    /// temperature is out of range
    pub fn validate(&self) -> Result<()> {
        match self.gateway.gateway_type.as_str() {
            "gemini" | "ollama" => {}
            other => {
                return Err(CoachError::Config(format!(
                    "Unknown gateway type: {} (expected gemini or ollama)",
                    other
                ))
                .into());
            }
        }

        if !(0.0..=2.0).contains(&self.gateway.gemini.temperature) {
            return Err(CoachError::Config(format!(
                "Gemini temperature must be between 0.0 and 2.0, got {}",
                self.gateway.gemini.temperature
            ))
            .into());
        }

        if self.session.coach_name.trim().is_empty() {
            return Err(CoachError::Config("Coach name must not be empty".to_string()).into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig {
                gateway_type: "gemini".to_string(),
                gemini: GeminiConfig::default(),
                ollama: OllamaConfig::default(),
            },
            session: SessionConfig::default(),
        }
    }
}
