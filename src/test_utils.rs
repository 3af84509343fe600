//! Test utilities for CoachSim
//!
//! This module provides a scripted in-memory gateway for unit testing the
//! session orchestrator without network access, plus small config helpers.

use crate::error::{CoachError, Result};
use crate::gateway::{ChatMessage, Gateway};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted replies shared between a `MockGateway` and its recorder
#[derive(Default)]
struct MockState {
    replies: VecDeque<std::result::Result<String, String>>,
    converse_calls: Vec<(Vec<ChatMessage>, String)>,
    summarize_calls: Vec<String>,
}

/// Handle for inspecting the calls a `MockGateway` received
#[derive(Clone)]
pub struct MockRecorder {
    state: Arc<Mutex<MockState>>,
}

impl MockRecorder {
    /// All converse calls as (context, user_text) pairs, in order
    pub fn converse_calls(&self) -> Vec<(Vec<ChatMessage>, String)> {
        self.state.lock().unwrap().converse_calls.clone()
    }

    /// All transcript texts passed to summarize, in order
    pub fn summarize_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().summarize_calls.clone()
    }
}

/// A gateway that replays a scripted queue of replies and failures
///
/// Both `converse` and `summarize` consume from the same queue, in the
/// order the replies were queued. Running past the end of the script is a
/// test bug and panics.
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Queue a successful reply
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Ok(text.into()));
        self
    }

    /// Queue a gateway failure
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Err(message.into()));
        self
    }

    /// Recorder handle that stays valid after the gateway is boxed
    pub fn recorder(&self) -> MockRecorder {
        MockRecorder {
            state: Arc::clone(&self.state),
        }
    }

    fn next_reply(&self) -> Result<String> {
        let scripted = self
            .state
            .lock()
            .unwrap()
            .replies
            .pop_front()
            .expect("MockGateway script exhausted");
        scripted.map_err(|message| CoachError::Gateway(message).into())
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn converse(&self, context: &[ChatMessage], user_text: &str) -> Result<String> {
        self.state
            .lock()
            .unwrap()
            .converse_calls
            .push((context.to_vec(), user_text.to_string()));
        self.next_reply()
    }

    async fn summarize(&self, transcript_text: &str) -> Result<String> {
        self.state
            .lock()
            .unwrap()
            .summarize_calls
            .push(transcript_text.to_string());
        self.next_reply()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway_replays_script() {
        let gateway = MockGateway::new().with_reply("one").with_failure("boom");
        let reply = gateway.converse(&[], "hi").await.unwrap();
        assert_eq!(reply, "one");
        assert!(gateway.summarize("transcript").await.is_err());
    }

    #[tokio::test]
    async fn test_recorder_captures_calls() {
        let gateway = MockGateway::new().with_reply("ok");
        let recorder = gateway.recorder();
        gateway
            .converse(&[ChatMessage::system("persona")], "hello")
            .await
            .unwrap();

        let calls = recorder.converse_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "hello");
    }
}
