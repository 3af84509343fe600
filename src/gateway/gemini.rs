//! Google Gemini gateway implementation
//!
//! Connects to the Generative Language REST API (`generateContent`) to
//! produce conversational replies and session summaries. The persona
//! instruction travels as `systemInstruction`; conversation turns map to
//! `contents` entries with `user`/`model` roles. Requests make a single
//! attempt; there is no retry or backoff.

use crate::config::GeminiConfig;
use crate::error::{CoachError, Result};
use crate::gateway::{ChatMessage, Gateway};
use crate::prompts;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API base for the Generative Language service
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Reply substituted when a successful response carries no text
const EMPTY_REPLY_FALLBACK: &str = "I'm listening...";

/// Summary substituted when a successful response carries no text
const EMPTY_SUMMARY_FALLBACK: &str = "Unable to generate summary.";

/// Google Gemini gateway
///
/// # Examples
///
/// ```no_run
/// use coachsim::config::GeminiConfig;
/// use coachsim::gateway::{ChatMessage, Gateway, GeminiGateway};
///
/// # async fn example() -> coachsim::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("secret".to_string()),
///     ..Default::default()
/// };
/// let gateway = GeminiGateway::new(config)?;
/// let context = vec![ChatMessage::system("You are a coach")];
/// let reply = gateway.converse(&context, "Hello!").await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

/// Request body for generateContent
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiInstruction>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

/// A conversation turn in Gemini format
#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

/// System instruction block (role-less parts)
#[derive(Debug, Serialize)]
struct GeminiInstruction {
    parts: Vec<GeminiPart>,
}

/// A text part of a content entry
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

/// Generation tuning parameters
#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
}

/// Response body from generateContent
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiGateway {
    /// Create a new Gemini gateway instance
    ///
    /// The API key comes from the configuration (normally populated from
    /// the GEMINI_API_KEY environment variable during config load).
    ///
    /// # Errors
    ///
    /// Returns `CoachError::MissingCredentials` if no API key is available,
    /// or an error if HTTP client initialization fails
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| CoachError::MissingCredentials("gemini".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent("coachsim/0.1.0")
            .build()
            .map_err(|e| CoachError::Gateway(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized Gemini gateway: model={}", config.model);

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        let base = self
            .config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        format!(
            "{}/models/{}:generateContent?key={}",
            base, self.config.model, self.api_key
        )
    }

    /// Convert session context to Gemini wire format
    ///
    /// System messages merge into one instruction block; user and model
    /// turns map to contents entries with the same role names.
    fn convert_context(context: &[ChatMessage]) -> (Option<GeminiInstruction>, Vec<GeminiContent>) {
        let mut instruction_text = String::new();
        let mut contents = Vec::new();

        for message in context {
            if message.role == "system" {
                if !instruction_text.is_empty() {
                    instruction_text.push_str("\n\n");
                }
                instruction_text.push_str(&message.content);
                continue;
            }

            contents.push(GeminiContent {
                role: message.role.clone(),
                parts: vec![GeminiPart {
                    text: message.content.clone(),
                }],
            });
        }

        let instruction = if instruction_text.is_empty() {
            None
        } else {
            Some(GeminiInstruction {
                parts: vec![GeminiPart {
                    text: instruction_text,
                }],
            })
        };

        (instruction, contents)
    }

    async fn generate(&self, request: &GeminiRequest) -> Result<String> {
        let url = self.endpoint();
        tracing::debug!(model = %self.config.model, "Sending Gemini generateContent request");

        let response = self.client.post(&url).json(request).send().await.map_err(|e| {
            tracing::warn!("Gemini request failed: {}", e);
            CoachError::Gateway(format!("Failed to reach Gemini: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(CoachError::Gateway(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoachError::Gateway(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .concat()
            })
            .unwrap_or_default();

        Ok(text)
    }
}

#[async_trait]
impl Gateway for GeminiGateway {
    async fn converse(&self, context: &[ChatMessage], user_text: &str) -> Result<String> {
        let (system_instruction, mut contents) = Self::convert_context(context);
        contents.push(GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: user_text.to_string(),
            }],
        });

        let request = GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.config.temperature,
            }),
        };

        let text = self.generate(&request).await?;
        if text.is_empty() {
            tracing::debug!("Gemini reply was empty, substituting placeholder");
            return Ok(EMPTY_REPLY_FALLBACK.to_string());
        }
        Ok(text)
    }

    async fn summarize(&self, transcript_text: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompts::summary_prompt(transcript_text),
                }],
            }],
            system_instruction: None,
            generation_config: None,
        };

        let text = self.generate(&request).await?;
        if text.is_empty() {
            return Ok(EMPTY_SUMMARY_FALLBACK.to_string());
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed_config() -> GeminiConfig {
        GeminiConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        // Blank key must not satisfy the credential check.
        let config = GeminiConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert!(GeminiGateway::new(config).is_err());
        }
    }

    #[test]
    fn test_endpoint_uses_default_base() {
        let gateway = GeminiGateway::new(keyed_config()).unwrap();
        let url = gateway.endpoint();
        assert!(url.starts_with("https://generativelanguage.googleapis.com/v1beta/models/"));
        assert!(url.contains(":generateContent?key=test-key"));
    }

    #[test]
    fn test_endpoint_honors_api_base_override() {
        let config = GeminiConfig {
            api_key: Some("test-key".to_string()),
            api_base: Some("http://127.0.0.1:9999/".to_string()),
            ..Default::default()
        };
        let gateway = GeminiGateway::new(config).unwrap();
        assert!(gateway
            .endpoint()
            .starts_with("http://127.0.0.1:9999/models/"));
    }

    #[test]
    fn test_convert_context_merges_system_messages() {
        let context = vec![
            ChatMessage::system("Persona"),
            ChatMessage::system("More rules"),
            ChatMessage::user("Hi"),
            ChatMessage::model("Hello!"),
        ];
        let (instruction, contents) = GeminiGateway::convert_context(&context);

        let instruction = instruction.unwrap();
        assert_eq!(instruction.parts[0].text, "Persona\n\nMore rules");
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[1].role, "model");
    }

    #[test]
    fn test_convert_context_without_system_messages() {
        let context = vec![ChatMessage::user("Hi")];
        let (instruction, contents) = GeminiGateway::convert_context(&context);
        assert!(instruction.is_none());
        assert_eq!(contents.len(), 1);
    }

    #[test]
    fn test_response_parsing_extracts_candidate_text() {
        let json = r#"{
            "candidates": [{
                "content": { "parts": [{"text": "Hello "}, {"text": "there"}], "role": "model" }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let text: String = response.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .iter()
            .map(|p| p.text.clone())
            .collect();
        assert_eq!(text, "Hello there");
    }

    #[test]
    fn test_response_parsing_tolerates_empty_body() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
    }
}
