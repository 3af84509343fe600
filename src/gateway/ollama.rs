//! Ollama gateway implementation
//!
//! Connects to a local or remote Ollama server via `/api/chat`
//! (non-streaming) as the second swappable integration behind the
//! `Gateway` trait. The wire vocabulary calls the coach role `assistant`,
//! so roles are translated at this boundary.

use crate::config::OllamaConfig;
use crate::error::{CoachError, Result};
use crate::gateway::{ChatMessage, Gateway};
use crate::prompts;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reply substituted when a successful response carries no text
const EMPTY_REPLY_FALLBACK: &str = "I'm listening...";

/// Summary substituted when a successful response carries no text
const EMPTY_SUMMARY_FALLBACK: &str = "Unable to generate summary.";

/// Ollama API gateway
///
/// # Examples
///
/// ```no_run
/// use coachsim::config::OllamaConfig;
/// use coachsim::gateway::{ChatMessage, Gateway, OllamaGateway};
///
/// # async fn example() -> coachsim::error::Result<()> {
/// let config = OllamaConfig {
///     host: "http://localhost:11434".to_string(),
///     model: "llama3.2:latest".to_string(),
/// };
/// let gateway = OllamaGateway::new(config)?;
/// let reply = gateway.converse(&[], "Hello!").await?;
/// # Ok(())
/// # }
/// ```
pub struct OllamaGateway {
    client: Client,
    config: OllamaConfig,
}

/// Request structure for the Ollama chat API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

/// Message structure for the Ollama chat API
#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    #[serde(default)]
    content: String,
}

/// Response structure from the Ollama chat API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
    #[serde(default)]
    done: bool,
}

impl OllamaGateway {
    /// Create a new Ollama gateway instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent("coachsim/0.1.0")
            .build()
            .map_err(|e| CoachError::Gateway(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Ollama gateway: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Translate session context into Ollama chat messages
    ///
    /// The `model` role becomes `assistant`; system and user pass through.
    fn convert_context(context: &[ChatMessage]) -> Vec<OllamaMessage> {
        context
            .iter()
            .map(|m| OllamaMessage {
                role: match m.role.as_str() {
                    "model" => "assistant".to_string(),
                    other => other.to_string(),
                },
                content: m.content.clone(),
            })
            .collect()
    }

    async fn chat(&self, messages: Vec<OllamaMessage>) -> Result<String> {
        let url = format!("{}/api/chat", self.config.host.trim_end_matches('/'));
        let request = OllamaRequest {
            model: self.config.model.clone(),
            messages,
            stream: false,
        };

        tracing::debug!(model = %self.config.model, "Sending Ollama chat request");

        let response = self.client.post(&url).json(&request).send().await.map_err(|e| {
            tracing::warn!("Ollama request failed: {}", e);
            CoachError::Gateway(format!("Failed to connect to Ollama server: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned error {}: {}", status, error_text);
            return Err(CoachError::Gateway(format!(
                "Ollama returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: OllamaResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            CoachError::Gateway(format!("Failed to parse Ollama response: {}", e))
        })?;

        if !body.done {
            tracing::warn!("Ollama reported an incomplete response");
        }

        Ok(body.message.content)
    }
}

#[async_trait]
impl Gateway for OllamaGateway {
    async fn converse(&self, context: &[ChatMessage], user_text: &str) -> Result<String> {
        let mut messages = Self::convert_context(context);
        messages.push(OllamaMessage {
            role: "user".to_string(),
            content: user_text.to_string(),
        });

        let text = self.chat(messages).await?;
        if text.is_empty() {
            tracing::debug!("Ollama reply was empty, substituting placeholder");
            return Ok(EMPTY_REPLY_FALLBACK.to_string());
        }
        Ok(text)
    }

    async fn summarize(&self, transcript_text: &str) -> Result<String> {
        let messages = vec![OllamaMessage {
            role: "user".to_string(),
            content: prompts::summary_prompt(transcript_text),
        }];

        let text = self.chat(messages).await?;
        if text.is_empty() {
            return Ok(EMPTY_SUMMARY_FALLBACK.to_string());
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_context_maps_model_to_assistant() {
        let context = vec![
            ChatMessage::system("Persona"),
            ChatMessage::user("Hi"),
            ChatMessage::model("Hello!"),
        ];
        let messages = OllamaGateway::convert_context(&context);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[2].content, "Hello!");
    }

    #[test]
    fn test_new_with_default_config() {
        let gateway = OllamaGateway::new(OllamaConfig::default());
        assert!(gateway.is_ok());
        assert_eq!(gateway.unwrap().name(), "ollama");
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "message": {"role": "assistant", "content": "Tell me more."},
            "done": true
        }"#;
        let response: OllamaResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message.content, "Tell me more.");
        assert!(response.done);
    }
}
