//! Coaching session orchestrator
//!
//! The `Session` owns the transcript and all session state, drives message
//! submission, applies the marker protocol to gateway replies, and triggers
//! the two upstream operations (converse, summarize). One session is live
//! at a time; reset means dropping the value and constructing a new one, so
//! no state can leak between sessions.
//!
//! Gateway failures never reach the transcript raw: every failed call is
//! masked by a fixed, hand-authored model message and the conversation
//! continues.

use crate::error::{CoachError, Result};
use crate::gateway::{ChatMessage, Gateway};
use crate::prompts;
use crate::protocol::{
    self, parse_model_reply, parse_summary_reply, SummaryReply, FALLBACK_APOLOGY,
    FALLBACK_GREETING, GREETING_REQUEST, SUMMARY_FAILURE, SUMMARY_HEADER,
};
use crate::transcript::{Role, Transcript};

/// Outcome of submitting user text to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The message was sent and a model reply (or fallback) was appended
    Sent,
    /// Blank or whitespace-only input; the transcript is unchanged
    Ignored,
    /// The session is ended or already awaiting a reply
    Rejected,
}

/// Outcome of a summary request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// The gateway found no confirmed action steps; the session reopened
    Resumed,
    /// A summary (or the fixed failure notice) was appended; still ended
    Completed,
}

/// One coaching conversation from name entry to reset
pub struct Session {
    display_name: String,
    transcript: Transcript,
    started: bool,
    ended: bool,
    awaiting_reply: bool,
    summarizing: bool,
    gateway: Box<dyn Gateway>,
}

impl Session {
    /// Create a fresh session for a named user
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Session` if the display name is blank
    pub fn new(display_name: impl Into<String>, gateway: Box<dyn Gateway>) -> Result<Self> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(
                CoachError::Session("Display name must not be empty".to_string()).into(),
            );
        }

        Ok(Self {
            display_name,
            transcript: Transcript::new(),
            started: false,
            ended: false,
            awaiting_reply: false,
            summarizing: false,
            gateway,
        })
    }

    /// Build the gateway context: persona instruction plus all prior turns
    fn context(&self) -> Vec<ChatMessage> {
        let mut context = vec![ChatMessage::system(prompts::system_instruction(
            &self.display_name,
        ))];
        for message in self.transcript.messages() {
            context.push(match message.role {
                Role::User => ChatMessage::user(message.text.clone()),
                Role::Model => ChatMessage::model(message.text.clone()),
            });
        }
        context
    }

    /// Apply the marker protocol to a model reply and append it
    fn append_model_reply(&mut self, raw: &str) {
        let reply = parse_model_reply(raw);
        if reply.ends_session() {
            tracing::info!("End marker received, session ended");
            self.ended = true;
        }
        self.transcript.push_model(reply.text());
    }

    /// Run the initial greeting exchange
    ///
    /// Synthesizes an opening request on the user's behalf rather than
    /// waiting for input. The request itself is never recorded; a failed
    /// exchange is masked with the hand-authored fallback greeting so the
    /// session always has a first model message.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Session` if the session was already started
    pub async fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(CoachError::Session("Session already started".to_string()).into());
        }
        self.started = true;

        self.awaiting_reply = true;
        let result = self.gateway.converse(&self.context(), GREETING_REQUEST).await;
        match result {
            Ok(text) => self.append_model_reply(&text),
            Err(e) => {
                tracing::warn!("Initial greeting failed, using fallback: {}", e);
                self.transcript.push_model(FALLBACK_GREETING);
            }
        }
        self.awaiting_reply = false;

        Ok(())
    }

    /// Submit a user message and append the model's reply
    ///
    /// Blank input is silently ignored; submissions are rejected while a
    /// reply is outstanding or after the session has ended. A gateway
    /// failure is replaced by a fixed apologetic model message.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Session` if the session was never started
    pub async fn submit_user_message(&mut self, text: &str) -> Result<Submission> {
        if !self.started {
            return Err(CoachError::Session("Session not started".to_string()).into());
        }
        if text.trim().is_empty() {
            return Ok(Submission::Ignored);
        }
        if self.awaiting_reply || self.ended {
            tracing::debug!(
                awaiting_reply = self.awaiting_reply,
                ended = self.ended,
                "Rejected user submission"
            );
            return Ok(Submission::Rejected);
        }

        let context = self.context();
        self.transcript.push_user(text);

        self.awaiting_reply = true;
        let result = self.gateway.converse(&context, text).await;
        match result {
            Ok(reply) => self.append_model_reply(&reply),
            Err(e) => {
                tracing::warn!("Gateway converse failed, substituting apology: {}", e);
                self.transcript.push_model(FALLBACK_APOLOGY);
            }
        }
        self.awaiting_reply = false;

        Ok(Submission::Sent)
    }

    /// Ask the coach to elaborate on a quoted piece of text
    ///
    /// Synthesizes a clarification request and runs it through the normal
    /// submission path.
    pub async fn clarify(&mut self, context_text: &str) -> Result<Submission> {
        let request = protocol::clarify_request(context_text);
        self.submit_user_message(&request).await
    }

    /// Request a session summary from the gateway
    ///
    /// Only valid once the session has ended. A reply beginning with the
    /// resume marker reopens the session; anything else is appended under
    /// the fixed summary header and the session stays ended. A gateway
    /// failure appends a fixed notice and also leaves the session ended.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Session` if the session has not ended (or was
    /// never started)
    pub async fn request_summary(&mut self) -> Result<SummaryOutcome> {
        if !self.started {
            return Err(CoachError::Session("Session not started".to_string()).into());
        }
        if !self.ended {
            return Err(CoachError::Session(
                "Summary is only available after the session has ended".to_string(),
            )
            .into());
        }

        self.summarizing = true;
        let transcript_text = self.transcript.serialize_for_summary();
        let result = self.gateway.summarize(&transcript_text).await;
        let outcome = match result {
            Ok(summary) => match parse_summary_reply(&summary) {
                SummaryReply::Resumed(text) => {
                    tracing::info!("Resume marker received, session reopened");
                    self.transcript.push_model(text);
                    self.ended = false;
                    SummaryOutcome::Resumed
                }
                SummaryReply::Completed(text) => {
                    self.transcript
                        .push_model(format!("{}{}", SUMMARY_HEADER, text));
                    SummaryOutcome::Completed
                }
            },
            Err(e) => {
                tracing::warn!("Summary generation failed: {}", e);
                self.transcript.push_model(SUMMARY_FAILURE);
                SummaryOutcome::Completed
            }
        };
        self.summarizing = false;

        Ok(outcome)
    }

    /// Renders the transcript as plain "ROLE: text" lines
    pub fn export_transcript(&self) -> String {
        self.transcript.export_text()
    }

    /// The user's display name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The session transcript
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// True once a model reply carried the end marker (and no resume since)
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// True while a gateway request is outstanding
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// True while a summary request is outstanding
    pub fn is_summarizing(&self) -> bool {
        self.summarizing
    }

    /// Name of the gateway backing this session
    pub fn gateway_name(&self) -> &str {
        self.gateway.name()
    }
}
