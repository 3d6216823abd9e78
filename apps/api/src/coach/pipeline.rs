//! Coach pipeline: render the prompt, one text-model round trip, recover the
//! reply. Invoker failures degrade to the generic fallback reply — the caller
//! always gets something to show.

use tracing::{info, warn};

use crate::coach::extractor::{extract_coach_reply, fallback_reply};
use crate::coach::models::{CoachReply, CoachRequest};
use crate::coach::prompts::{COACH_INTRO, COACH_SCHEMA, COACH_SYSTEM};
use crate::llm_client::prompts::tone_clause;
use crate::llm_client::{CompletionRequest, Invoker};

/// Renders the coach prompt: one clause per present field, absent fields
/// silently omitted.
pub fn build_coach_prompt(request: &CoachRequest) -> String {
    let mut clauses: Vec<String> = vec![COACH_INTRO.to_string()];

    if let Some(bio) = present(&request.match_bio) {
        clauses.push(format!("The match's profile bio:\n{bio}"));
    }
    if let Some(conversation) = present(&request.conversation) {
        clauses.push(format!("The conversation so far:\n{conversation}"));
    }
    if let Some(tone) = present(&request.tone) {
        clauses.push(tone_clause(tone));
    }

    clauses.push(COACH_SCHEMA.to_string());
    clauses.join("\n\n")
}

/// Runs one coach round trip. Never returns an invoker error to the caller.
pub async fn run_coach(
    invoker: &dyn Invoker,
    request: &CoachRequest,
    cap: Option<usize>,
) -> CoachReply {
    let prompt = build_coach_prompt(request);

    match invoker
        .complete(&CompletionRequest::text(&prompt, COACH_SYSTEM.as_str()))
        .await
    {
        Ok(raw) => {
            let reply = extract_coach_reply(&raw, cap);
            info!("Coach reply recovered (origin: {})", reply.origin.as_str());
            reply
        }
        Err(e) => {
            warn!("Coach model call failed, serving fallback reply: {e}");
            fallback_reply()
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionOrigin;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    struct ScriptedInvoker(Result<String, ()>);

    #[async_trait]
    impl Invoker for ScriptedInvoker {
        async fn complete(&self, _: &CompletionRequest<'_>) -> Result<String, LlmError> {
            match &self.0 {
                Ok(reply) => Ok(reply.clone()),
                Err(()) => Err(LlmError::Timeout { secs: 60 }),
            }
        }
    }

    #[tokio::test]
    async fn test_structured_reply_comes_back_parsed() {
        let invoker = ScriptedInvoker(Ok(
            r#"{"openers": ["Hi!"], "tips": ["Be brief"], "followUps": ["How was it?"]}"#
                .to_string(),
        ));
        let reply = run_coach(&invoker, &CoachRequest::default(), None).await;
        assert_eq!(reply.origin, ExtractionOrigin::Parsed);
        assert_eq!(reply.openers, vec!["Hi!"]);
    }

    #[tokio::test]
    async fn test_invoker_failure_degrades_to_fallback() {
        let invoker = ScriptedInvoker(Err(()));
        let reply = run_coach(&invoker, &CoachRequest::default(), None).await;
        assert_eq!(reply.origin, ExtractionOrigin::Fallback);
        assert!(!reply.openers.is_empty());
    }

    #[test]
    fn test_prompt_includes_present_fields_only() {
        let prompt = build_coach_prompt(&CoachRequest {
            match_bio: Some("Marathon runner, terrible cook".to_string()),
            conversation: None,
            tone: Some("friendly".to_string()),
        });
        assert!(prompt.contains("Marathon runner"));
        assert!(prompt.contains("friendly tone"));
        assert!(!prompt.contains("conversation so far"));
    }

    #[test]
    fn test_prompt_always_carries_schema() {
        let prompt = build_coach_prompt(&CoachRequest::default());
        assert!(prompt.contains("followUps"));
    }
}
