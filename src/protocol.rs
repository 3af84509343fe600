//! Coaching session protocol
//!
//! Defines the textual contract between the session orchestrator and the
//! gateway's replies, independent of any specific model or SDK. The coach
//! persona signals session termination by embedding a reserved marker in a
//! reply; a summary reply may instead begin with a resume marker that
//! reopens the session. Marker matching is substring-based, case-sensitive,
//! and exact; at most one occurrence is ever stripped.

/// Reserved token a model reply embeds to end the session.
pub const END_MARKER: &str = "[SESSION_END]";

/// Reserved token a summary reply begins with to reopen the session.
pub const RESUME_MARKER: &str = "[RESUME_SESSION]";

/// Fixed header prefixed to a completed session summary.
pub const SUMMARY_HEADER: &str = "**SESSION SUMMARY & ANALYSIS**\n\n";

/// Opening request synthesized on the user's behalf at session start.
pub const GREETING_REQUEST: &str = "Hello, I am ready to start my coaching session.";

/// Hand-authored greeting used when the initial gateway exchange fails,
/// so the session always has a first model message.
pub const FALLBACK_GREETING: &str = "Hi there! I'm really looking forward to our session. \
What's on your mind regarding your team today?";

/// Apologetic model message substituted for any failed send.
pub const FALLBACK_APOLOGY: &str =
    "I apologize, I lost my train of thought. Could you say that again?";

/// Model message substituted when summary generation fails.
pub const SUMMARY_FAILURE: &str = "I could not generate the summary at this time.";

/// Parse result for an ordinary model reply
///
/// `End` means the reply carried the end marker; the contained text has the
/// first marker occurrence removed and surrounding whitespace trimmed, and
/// the visible message text never contains the raw marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelReply {
    /// Session continues; text stored verbatim
    Continue(String),
    /// Session ends; text stored with the marker stripped
    End(String),
}

impl ModelReply {
    /// Returns the text to store as the model message
    pub fn text(&self) -> &str {
        match self {
            Self::Continue(text) | Self::End(text) => text,
        }
    }

    /// Returns true if this reply terminates the session
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::End(_))
    }
}

/// Parse result for a summary reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryReply {
    /// No confirmed action steps; the session reopens with this follow-up
    Resumed(String),
    /// Action plan confirmed; the session stays ended
    Completed(String),
}

/// Parses a model reply for the end-of-session marker
///
/// Only the first occurrence of the marker is removed (source behavior for
/// multiple markers); the remainder is whitespace-trimmed. A reply that is
/// nothing but the marker yields `End("")`.
///
/// # Examples
///
/// ```
/// use coachsim::protocol::{parse_model_reply, ModelReply};
///
/// let reply = parse_model_reply("Great, see you then! [SESSION_END]");
/// assert_eq!(reply, ModelReply::End("Great, see you then!".to_string()));
///
/// let reply = parse_model_reply("Tell me more.");
/// assert_eq!(reply, ModelReply::Continue("Tell me more.".to_string()));
/// ```
pub fn parse_model_reply(raw: &str) -> ModelReply {
    match raw.find(END_MARKER) {
        Some(idx) => {
            let mut text = String::with_capacity(raw.len() - END_MARKER.len());
            text.push_str(&raw[..idx]);
            text.push_str(&raw[idx + END_MARKER.len()..]);
            ModelReply::End(text.trim().to_string())
        }
        None => ModelReply::Continue(raw.to_string()),
    }
}

/// Parses a summary reply for the resume marker
///
/// The marker only counts when the reply *begins* with it; an embedded
/// occurrence elsewhere leaves the summary completed. The match is against
/// the raw text with no preliminary trim.
///
/// # Examples
///
/// ```
/// use coachsim::protocol::{parse_summary_reply, SummaryReply};
///
/// let reply = parse_summary_reply("[RESUME_SESSION] What will you do next?");
/// assert_eq!(
///     reply,
///     SummaryReply::Resumed("What will you do next?".to_string())
/// );
/// ```
pub fn parse_summary_reply(raw: &str) -> SummaryReply {
    match raw.strip_prefix(RESUME_MARKER) {
        Some(rest) => SummaryReply::Resumed(rest.trim().to_string()),
        None => SummaryReply::Completed(raw.to_string()),
    }
}

/// Formats the synthesized clarification request for a quoted message
///
/// # Examples
///
/// ```
/// use coachsim::protocol::clarify_request;
///
/// assert_eq!(
///     clarify_request("active listening"),
///     "What do you mean by: \"active listening\"? Could you elaborate?"
/// );
/// ```
pub fn clarify_request(context_text: &str) -> String {
    format!(
        "What do you mean by: \"{}\"? Could you elaborate?",
        context_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_with_trailing_marker_ends_session() {
        let reply = parse_model_reply("Great, see you then! [SESSION_END]");
        assert!(reply.ends_session());
        assert_eq!(reply.text(), "Great, see you then!");
    }

    #[test]
    fn test_reply_with_embedded_marker_strips_in_place() {
        let reply = parse_model_reply("Well done.[SESSION_END] Goodbye!");
        assert_eq!(reply, ModelReply::End("Well done. Goodbye!".to_string()));
    }

    #[test]
    fn test_reply_without_marker_is_verbatim() {
        let text = "What specifically will you do differently tomorrow? ";
        let reply = parse_model_reply(text);
        assert_eq!(reply, ModelReply::Continue(text.to_string()));
        assert!(!reply.ends_session());
    }

    #[test]
    fn test_marker_only_reply_yields_empty_text() {
        let reply = parse_model_reply("[SESSION_END]");
        assert_eq!(reply, ModelReply::End(String::new()));
    }

    #[test]
    fn test_only_first_marker_is_stripped() {
        let reply = parse_model_reply("Bye [SESSION_END] really [SESSION_END]");
        assert_eq!(
            reply,
            ModelReply::End("Bye  really [SESSION_END]".to_string())
        );
    }

    #[test]
    fn test_marker_matching_is_case_sensitive() {
        let reply = parse_model_reply("See you! [session_end]");
        assert!(!reply.ends_session());
    }

    #[test]
    fn test_summary_with_resume_prefix() {
        let reply = parse_summary_reply(
            "[RESUME_SESSION] It seems we haven't nailed down your next steps yet.",
        );
        assert_eq!(
            reply,
            SummaryReply::Resumed(
                "It seems we haven't nailed down your next steps yet.".to_string()
            )
        );
    }

    #[test]
    fn test_summary_without_resume_prefix_is_completed() {
        let text = "**Your Agreed Action Plan:**\n1. Schedule the 1:1";
        assert_eq!(
            parse_summary_reply(text),
            SummaryReply::Completed(text.to_string())
        );
    }

    #[test]
    fn test_summary_with_embedded_resume_marker_is_completed() {
        let text = "The plan mentions [RESUME_SESSION] in passing.";
        assert_eq!(
            parse_summary_reply(text),
            SummaryReply::Completed(text.to_string())
        );
    }

    #[test]
    fn test_summary_with_leading_whitespace_does_not_resume() {
        // startsWith semantics: leading whitespace defeats the prefix match.
        let text = "  [RESUME_SESSION] follow-up";
        assert_eq!(
            parse_summary_reply(text),
            SummaryReply::Completed(text.to_string())
        );
    }

    #[test]
    fn test_clarify_request_format() {
        assert_eq!(
            clarify_request("delegation"),
            "What do you mean by: \"delegation\"? Could you elaborate?"
        );
    }
}
