//! Session transcript data model
//!
//! A transcript is the ordered record of all messages exchanged in one
//! coaching session. Messages are immutable once created and are only ever
//! appended; the transcript is never reordered or mutated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person being coached
    User,
    /// The coach persona (gateway reply)
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "USER"),
            Self::Model => write!(f, "MODEL"),
        }
    }
}

/// A single message in a coaching session
///
/// Created once and immutable thereafter. The `id` is unique within a
/// session and serves as a stable key for rendering and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message
    pub id: Uuid,
    /// Who authored the message
    pub role: Role,
    /// Message text, with protocol markers already stripped
    pub text: String,
    /// When the message was appended to the transcript
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use coachsim::transcript::{Message, Role};
    ///
    /// let msg = Message::user("I need help with my team");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Creates a new model message
    ///
    /// # Examples
    ///
    /// ```
    /// use coachsim::transcript::{Message, Role};
    ///
    /// let msg = Message::model("What's on your mind today?");
    /// assert_eq!(msg.role, Role::Model);
    /// ```
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only record of one session's messages
///
/// Owned exclusively by the session orchestrator for the lifetime of a
/// single session; discarded whole on reset.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message and returns a reference to it
    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.messages.push(Message::user(text));
        self.messages.last().expect("just pushed")
    }

    /// Appends a model message and returns a reference to it
    pub fn push_model(&mut self, text: impl Into<String>) -> &Message {
        self.messages.push(Message::model(text));
        self.messages.last().expect("just pushed")
    }

    /// Returns all messages in insertion (chronological) order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the transcript has no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Renders the transcript as plain "ROLE: text" lines for export
    ///
    /// Entries are separated by a blank line, matching the copyable log
    /// format shown to the user after a session ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use coachsim::transcript::Transcript;
    ///
    /// let mut transcript = Transcript::new();
    /// transcript.push_model("Hello!");
    /// transcript.push_user("Hi");
    /// assert_eq!(transcript.export_text(), "MODEL: Hello!\n\nUSER: Hi");
    /// ```
    pub fn export_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Serializes the transcript into the single-string form sent to the
    /// gateway's summarize operation, one "ROLE: text" line per message.
    pub fn serialize_for_summary(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
