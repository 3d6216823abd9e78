// All LLM prompt constants for the analysis pipeline.

use once_cell::sync::Lazy;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt for the aggregate profile analysis. Composed from the shared
/// JSON-only fragment (the model does not always comply; the extractor copes).
pub static ANALYSIS_SYSTEM: Lazy<String> = Lazy::new(|| {
    format!(
        "You are an experienced dating-profile coach reviewing a profile the way \
        a discerning match would. Be specific, kind, and actionable. {JSON_ONLY_SYSTEM}"
    )
});

/// Opening clause of every analysis prompt. The builder appends one clause
/// per present request field after this.
pub const ANALYSIS_INTRO: &str =
    "Review this dating profile and give an honest, constructive assessment.";

/// Closing schema instruction. Kept in sync with `models::NestedAnalysis`.
pub const ANALYSIS_SCHEMA: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "overallScore": 7.5,
  "swipeVerdict": {"favorable": true, "reason": "one sentence"},
  "feedback": [
    {"tag": "positive", "text": "what already works"},
    {"tag": "needs_improvement", "text": "what to fix"}
  ],
  "suggestions": [
    {"title": "short title", "description": "what to change and why", "action": "button label"}
  ],
  "photoFeedback": [
    {"description": "what the photo shows", "verdict": "Good", "suggestion": "optional improvement"}
  ]
}

Rules:
- overallScore is 1-10.
- verdict must be exactly one of "Good", "Okay", "Needs Improvement".
- Give exactly three feedback entries and exactly three suggestions.
- photoFeedback entries must follow the order the photos appear above."#;

/// System prompt for the one-photo vision call.
pub static PHOTO_SYSTEM: Lazy<String> =
    Lazy::new(|| format!("You are a dating-profile photo reviewer. {JSON_ONLY_SYSTEM}"));

/// Prompt for the one-photo vision call.
pub const PHOTO_PROMPT: &str = r#"Review this single dating-profile photo.

Return a JSON object with this EXACT schema:
{
  "description": "one sentence on what the photo shows",
  "verdict": "Good",
  "suggestion": "one concrete improvement, or null if none"
}

verdict must be exactly one of "Good", "Okay", "Needs Improvement",
and must be the first word of your verdict."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_system_prompts_carry_json_only_fragment() {
        assert!(ANALYSIS_SYSTEM.contains(JSON_ONLY_SYSTEM));
        assert!(PHOTO_SYSTEM.contains(JSON_ONLY_SYSTEM));
    }
}
