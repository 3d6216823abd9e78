// Shared prompt fragments. Each pipeline defines its own prompts.rs alongside
// it; this file holds only the cross-cutting pieces.

/// JSON-only fragment appended to every system prompt. The service is not
/// contractually bound to honor it — the extractor must cope either way.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Tone fragment appended when the user picked a tone. The selector is an
/// open string — whatever the UI sent is handed to the model verbatim.
pub fn tone_clause(tone: &str) -> String {
    format!("Write all suggestions in a {tone} tone.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_clause_embeds_tone_verbatim() {
        assert_eq!(
            tone_clause("witty"),
            "Write all suggestions in a witty tone."
        );
    }
}
