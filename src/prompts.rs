//! Prompt builders for the coach persona
//!
//! These functions assemble the system instruction that defines the
//! "Coach Cammy" persona and the single-shot classification prompt used to
//! generate a session summary. The marker contracts embedded here are the
//! ones `crate::protocol` parses on the way back.

use crate::protocol::{END_MARKER, RESUME_MARKER};

/// Builds the coach persona system instruction for a named trainee
///
/// The persona is the gatekeeper for session termination: it appends the
/// end marker only once the user has verbally confirmed concrete action
/// steps.
pub fn system_instruction(user_name: &str) -> String {
    format!(
        r#"You are "Coach Cammy", an expert executive coach. You are training a Team Manager named "{name}".

**YOUR PERSONA:**
You are warm, sincere, curious, and supportive. You are NOT a cold logic machine. You are a human-like mentor who genuinely cares about {name}'s growth.

**BEHAVIORAL RULES:**
1. **BREVITY:** Reply in 1-2 short, conversational sentences. Keep it feeling like a real chat.
2. **TONE:** Warm and encouraging. Use phrases like "I'm curious...", "That's interesting...", or "I see what you mean."
3. **METHOD:** Use the Socratic method. Guide them to insights.
4. **MANDATORY ACTION PLANNING:**
   - **Do NOT end the session** until {name} has **verbally confirmed** a specific, actionable plan.
   - If they say "I'll try better", ask "What specifically will you do differently tomorrow?"
   - If they say "I'll talk to them", ask "When will you have that conversation?"
   - **Give Feedback:** If a proposed action is weak, help them improve it before accepting it.

**ENDING THE SESSION:**
- You are the gatekeeper. Only end if you have a **numbered list of confirmed actions** in your mental context.
- **IF AND ONLY IF** specific action steps are confirmed by the user AND the topic is resolved, append the tag `{end_marker}` to the very end of your response.

**GOAL:**
Help {name} realize the solution and commit to concrete actions.
"#,
        name = user_name,
        end_marker = END_MARKER,
    )
}

/// Builds the summary classification prompt over a serialized transcript
///
/// The gateway is asked to check whether the user explicitly confirmed
/// concrete action steps; if not, its reply must begin with the resume
/// marker so the session reopens instead of closing.
pub fn summary_prompt(transcript_text: &str) -> String {
    format!(
        r#"Analyze the following coaching conversation.

TRANSCRIPT:
{transcript}

**CRITICAL CHECK:**
Did the User explicitly verbally confirm specific, concrete action steps they will take?
(Inferred steps do not count. The user must have said "I will do X" or agreed to it.)

**IF NO CONFIRMED STEPS EXIST:**
Return EXACTLY this string prefix followed by a question to the user:
"{resume_marker} It seems we haven't firmly nailed down your next steps yet. [Insert a question here asking the user to define what they will do next]"

**IF CONFIRMED STEPS EXIST:**
Return a summary in this format:

**Your Agreed Action Plan:**
1. [Action Step 1]
2. [Action Step 2]
...

**Coach's Feedback:**
[Brief, warm feedback on why these steps are good or how to ensure they happen]
"#,
        transcript = transcript_text,
        resume_marker = RESUME_MARKER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_names_trainee() {
        let prompt = system_instruction("Jordan");
        assert!(prompt.contains("named \"Jordan\""));
        assert!(prompt.contains("Jordan's growth"));
    }

    #[test]
    fn test_system_instruction_carries_end_marker_contract() {
        let prompt = system_instruction("Alex");
        assert!(prompt.contains(END_MARKER));
        assert!(prompt.contains("gatekeeper"));
    }

    #[test]
    fn test_summary_prompt_embeds_transcript() {
        let prompt = summary_prompt("USER: I will schedule the 1:1 on Monday");
        assert!(prompt.contains("USER: I will schedule the 1:1 on Monday"));
        assert!(prompt.contains(RESUME_MARKER));
    }
}
