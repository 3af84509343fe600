//! Base gateway trait and common types
//!
//! This module defines the `Gateway` trait that all language-model
//! integrations must implement, along with the chat message type used to
//! carry session context across the boundary. The trait intentionally
//! exposes exactly the two operations the session orchestrator consumes,
//! so the core never depends on a specific vendor SDK shape.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single turn of session context sent to a gateway
///
/// Roles are the wire-level strings the integrations translate into their
/// vendor's vocabulary: "system" for the persona instruction, "user" and
/// "model" for conversation turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author (system, user, model)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use coachsim::gateway::ChatMessage;
    ///
    /// let msg = ChatMessage::user("Hello, coach!");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new model message
    ///
    /// # Examples
    ///
    /// ```
    /// use coachsim::gateway::ChatMessage;
    ///
    /// let msg = ChatMessage::model("What's on your mind?");
    /// assert_eq!(msg.role, "model");
    /// ```
    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use coachsim::gateway::ChatMessage;
    ///
    /// let msg = ChatMessage::system("You are an executive coach");
    /// assert_eq!(msg.role, "system");
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Gateway trait for upstream language-model providers
///
/// All integrations (Gemini, Ollama, test doubles) implement this trait.
/// Both operations make a single attempt; failures propagate as errors for
/// the session orchestrator to catch and mask. The free-form reply text may
/// contain the protocol markers of `crate::protocol`, which are parsed by
/// the orchestrator, never here.
///
/// # Examples
///
/// ```no_run
/// use coachsim::gateway::{ChatMessage, Gateway};
/// use coachsim::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoGateway;
///
/// #[async_trait]
/// impl Gateway for EchoGateway {
///     async fn converse(&self, _context: &[ChatMessage], user_text: &str) -> Result<String> {
///         Ok(user_text.to_string())
///     }
///
///     async fn summarize(&self, transcript_text: &str) -> Result<String> {
///         Ok(transcript_text.to_string())
///     }
///
///     fn name(&self) -> &str {
///         "echo"
///     }
/// }
/// ```
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Completes a conversational exchange
    ///
    /// # Arguments
    ///
    /// * `context` - The persona system instruction and all prior turns
    /// * `user_text` - The new user turn, appended after the context
    ///
    /// # Returns
    ///
    /// Returns the model's free-form reply text
    ///
    /// # Errors
    ///
    /// Returns error on network, authentication, or quota problems
    async fn converse(&self, context: &[ChatMessage], user_text: &str) -> Result<String>;

    /// Generates a summary classification over a serialized transcript
    ///
    /// A stateless single-shot request; the reply either begins with the
    /// resume marker or contains the formatted action plan.
    ///
    /// # Errors
    ///
    /// Returns error on network, authentication, or quota problems
    async fn summarize(&self, transcript_text: &str) -> Result<String>;

    /// Short gateway name for logging and the session banner
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_user() {
        let msg = ChatMessage::user("Hello");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_chat_message_model() {
        let msg = ChatMessage::model("Hi there");
        assert_eq!(msg.role, "model");
        assert_eq!(msg.content, "Hi there");
    }

    #[test]
    fn test_chat_message_system() {
        let msg = ChatMessage::system("Persona prompt");
        assert_eq!(msg.role, "system");
        assert_eq!(msg.content, "Persona prompt");
    }

    #[test]
    fn test_chat_message_serialization() {
        let msg = ChatMessage::user("Test");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"content\":\"Test\""));
    }
}
