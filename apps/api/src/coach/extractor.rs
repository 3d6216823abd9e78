//! Coach-side extraction: same recovery chain as the analysis pipeline, with
//! the keyword classes for openers, tips, and follow-ups.

use crate::coach::models::{CoachReply, CoachWire};
use crate::coach::prompts::{GENERIC_FOLLOW_UP, GENERIC_OPENER, GENERIC_TIP};
use crate::extract::heuristic::{pick_category, split_sections};
use crate::extract::json::recover;
use crate::extract::ExtractionOrigin;

const OPENER_KEYWORDS: &[&str] = &["message", "opener", "opening", "send"];
const TIP_KEYWORDS: &[&str] = &["tip", "advice", "keep in mind"];
const FOLLOW_UP_KEYWORDS: &[&str] = &["follow-up", "follow up", "followup"];

/// Recovers a [`CoachReply`] from raw reply text. Never fails; every category
/// ends up with at least one item.
pub fn extract_coach_reply(raw: &str, cap: Option<usize>) -> CoachReply {
    if let Some(wire) = recover::<CoachWire>(raw).filter(CoachWire::is_usable) {
        return finish(wire.openers, wire.tips, wire.follow_ups, ExtractionOrigin::Parsed, cap);
    }

    let sections = split_sections(raw);
    // Follow-ups are classified first: a section mentioning "follow-up
    // message" must not be eaten by the opener keywords.
    let follow_ups = pick_category(&sections, FOLLOW_UP_KEYWORDS);
    let remaining: Vec<String> = sections
        .into_iter()
        .filter(|s| !follow_ups.iter().any(|f| s.contains(f.as_str())))
        .collect();
    let openers = pick_category(&remaining, OPENER_KEYWORDS);
    let tips = pick_category(&remaining, TIP_KEYWORDS);

    finish(openers, tips, follow_ups, ExtractionOrigin::Heuristic, cap)
}

/// The fallback reply for a full invoker failure: one generic item per
/// category, labeled so the UI can present it as a sample.
pub fn fallback_reply() -> CoachReply {
    CoachReply {
        openers: vec![GENERIC_OPENER.to_string()],
        tips: vec![GENERIC_TIP.to_string()],
        follow_ups: vec![GENERIC_FOLLOW_UP.to_string()],
        origin: ExtractionOrigin::Fallback,
    }
}

fn finish(
    mut openers: Vec<String>,
    mut tips: Vec<String>,
    mut follow_ups: Vec<String>,
    origin: ExtractionOrigin,
    cap: Option<usize>,
) -> CoachReply {
    if openers.is_empty() {
        openers.push(GENERIC_OPENER.to_string());
    }
    if tips.is_empty() {
        tips.push(GENERIC_TIP.to_string());
    }
    if follow_ups.is_empty() {
        follow_ups.push(GENERIC_FOLLOW_UP.to_string());
    }
    if let Some(cap) = cap {
        openers.truncate(cap);
        tips.truncate(cap);
        follow_ups.truncate(cap);
    }
    CoachReply {
        openers,
        tips,
        follow_ups,
        origin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_reply_round_trips() {
        let raw = r#"{
            "openers": ["Loved the hiking photo — which trail?", "Your dog or a rental?", "Settle a debate: pineapple on pizza?"],
            "tips": ["Keep it under two lines", "Ask, don't announce", "Match their energy"],
            "followUps": ["How did the race go?", "Still thinking about that taco place?", "Weekend plans pan out?"]
        }"#;
        let reply = extract_coach_reply(raw, None);
        assert_eq!(reply.origin, ExtractionOrigin::Parsed);
        assert_eq!(reply.openers.len(), 3);
        assert_eq!(reply.openers[0], "Loved the hiking photo — which trail?");
        assert_eq!(reply.follow_ups.len(), 3);
    }

    #[test]
    fn test_three_numbered_message_sections_recovered_in_order() {
        let raw = "Here are some ideas:\n\
            1. Message: Loved the hiking photo — which trail?\n\
            2. Message: Is that your dog in the second picture?\n\
            3. Message: Your taste in books is dangerously good.";
        let reply = extract_coach_reply(raw, None);
        assert_eq!(reply.origin, ExtractionOrigin::Heuristic);
        assert_eq!(reply.openers.len(), 3);
        assert_eq!(reply.openers[0], "Loved the hiking photo — which trail?");
        assert_eq!(reply.openers[1], "Is that your dog in the second picture?");
        assert_eq!(reply.openers[2], "Your taste in books is dangerously good.");
    }

    #[test]
    fn test_more_than_three_matches_keeps_first_three() {
        let raw = "1. Message: one\n2. Message: two\n3. Message: three\n4. Message: four";
        let reply = extract_coach_reply(raw, None);
        assert_eq!(reply.openers, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_empty_category_gets_one_generic_placeholder() {
        let raw = "1. Tip: ask about their weekend\n2. Tip: avoid one-word replies";
        let reply = extract_coach_reply(raw, None);
        assert_eq!(reply.tips.len(), 2);
        assert_eq!(reply.openers, vec![GENERIC_OPENER.to_string()]);
        assert_eq!(reply.follow_ups, vec![GENERIC_FOLLOW_UP.to_string()]);
    }

    #[test]
    fn test_follow_up_sections_not_claimed_by_openers() {
        let raw = "1. Message: hi there, love the skiing shot\n\
            2. Follow-up message: how was the trip you mentioned?";
        let reply = extract_coach_reply(raw, None);
        assert_eq!(reply.follow_ups.len(), 1);
        assert_eq!(reply.follow_ups[0], "how was the trip you mentioned?");
        assert_eq!(reply.openers.len(), 1);
        assert_eq!(reply.openers[0], "hi there, love the skiing shot");
    }

    #[test]
    fn test_plain_prose_yields_all_placeholders() {
        let reply = extract_coach_reply("I can't help with that.", None);
        assert_eq!(reply.origin, ExtractionOrigin::Heuristic);
        assert_eq!(reply.openers.len(), 1);
        assert_eq!(reply.tips.len(), 1);
        assert_eq!(reply.follow_ups.len(), 1);
    }

    #[test]
    fn test_fallback_reply_is_labeled() {
        let reply = fallback_reply();
        assert_eq!(reply.origin, ExtractionOrigin::Fallback);
        assert!(!reply.openers.is_empty());
    }
}
