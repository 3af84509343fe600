//! Error types for CoachSim
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.
//!
//! External failures (IO, HTTP, serde) are wrapped into these variants at
//! the call site with a context string, rather than carried as raw source
//! errors.

use thiserror::Error;

/// Main error type for CoachSim operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, gateway interactions, and session management.
#[derive(Error, Debug)]
pub enum CoachError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gateway-related errors (API calls, authentication, quota, etc.)
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Session contract violations (operations invoked in an invalid state)
    #[error("Session error: {0}")]
    Session(String),

    /// Missing credentials for a gateway
    #[error("Missing credentials for gateway: {0}")]
    MissingCredentials(String),
}

/// Result type alias for CoachSim operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = CoachError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_gateway_error_display() {
        let error = CoachError::Gateway("API timeout".to_string());
        assert_eq!(error.to_string(), "Gateway error: API timeout");
    }

    #[test]
    fn test_session_error_display() {
        let error = CoachError::Session("session not started".to_string());
        assert_eq!(error.to_string(), "Session error: session not started");
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = CoachError::MissingCredentials("gemini".to_string());
        assert_eq!(error.to_string(), "Missing credentials for gateway: gemini");
    }

    #[test]
    fn test_wrapped_external_error_keeps_context() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = CoachError::Config(format!("Failed to read config file: {}", io_error));
        assert_eq!(
            error.to_string(),
            "Configuration error: Failed to read config file: file not found"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoachError>();
    }
}
