// All LLM prompt constants for the conversation coach.

use once_cell::sync::Lazy;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt — same JSON-only stance as the analysis pipeline.
pub static COACH_SYSTEM: Lazy<String> =
    Lazy::new(|| format!("You are a sharp, warm dating conversation coach. {JSON_ONLY_SYSTEM}"));

/// Opening clause of every coach prompt; the pipeline appends one clause per
/// present request field.
pub const COACH_INTRO: &str =
    "Help this user start and keep a great conversation with their match.";

/// Closing schema instruction. Kept in sync with `models::CoachWire`.
pub const COACH_SCHEMA: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "openers": ["three ready-to-send opening messages"],
  "tips": ["three short conversation tips"],
  "followUps": ["three follow-up messages for when the chat stalls"]
}

Give exactly three items per list."#;

/// Placeholder opener when nothing could be recovered for the category.
pub const GENERIC_OPENER: &str =
    "Hey! Something in your profile made me smile — what's the story behind your first photo?";

/// Placeholder tip.
pub const GENERIC_TIP: &str =
    "Ask one specific question about something in their profile instead of opening with 'hey'.";

/// Placeholder follow-up.
pub const GENERIC_FOLLOW_UP: &str =
    "Circle back to something they mentioned earlier and ask how it went.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coach_system_prompt_carries_json_only_fragment() {
        assert!(COACH_SYSTEM.contains(JSON_ONLY_SYSTEM));
    }
}
