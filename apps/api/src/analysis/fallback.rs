//! Placeholder content for degraded and failed runs.
//!
//! The UI must always have something to render: heuristic extraction pads
//! empty required categories with one placeholder item, and a full invoker
//! failure returns the sample analysis below, flagged `origin = fallback`.

use crate::analysis::models::{
    Analysis, FeedbackEntry, FeedbackTag, Suggestion, SwipeVerdict,
};

/// Generic feedback entry used when heuristics recover nothing for the
/// feedback category.
pub fn placeholder_feedback() -> FeedbackEntry {
    FeedbackEntry {
        tag: FeedbackTag::NeedsImprovement,
        text: "We couldn't pull specific feedback this time — try again with a clearer bio or different photos.".to_string(),
    }
}

/// Generic suggestion used when heuristics recover nothing for the
/// suggestions category.
pub fn placeholder_suggestion() -> Suggestion {
    Suggestion {
        title: "Refresh your first photo".to_string(),
        description: "A clear, well-lit solo photo of your face is the single biggest profile improvement.".to_string(),
        action: Some("Upload photo".to_string()),
    }
}

/// The sample analysis rendered when the pipeline fails end-to-end.
/// Clearly generic on purpose; the response labels it as a fallback.
pub fn sample_analysis() -> Analysis {
    Analysis {
        overall_score: Some(6.0),
        swipe_verdict: Some(SwipeVerdict {
            favorable: true,
            reason: "Sample verdict — we couldn't analyze your profile right now.".to_string(),
        }),
        feedback: vec![
            FeedbackEntry {
                tag: FeedbackTag::Positive,
                text: "Profiles with a clear face photo get noticeably more matches.".to_string(),
            },
            FeedbackEntry {
                tag: FeedbackTag::NeedsImprovement,
                text: "Bios under 20 words tend to read as low-effort.".to_string(),
            },
        ],
        suggestions: vec![placeholder_suggestion()],
        photo_feedback: Vec::new(),
    }
}
