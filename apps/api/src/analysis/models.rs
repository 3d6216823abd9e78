//! Data model for the profile-analysis pipeline.
//!
//! The model has been prompted with two schema generations over the app's
//! life: a legacy flat shape (`strengths` / `weaknesses` string arrays) and
//! the current nested shape (tagged feedback entries, suggestion objects,
//! per-photo breakdown). Replies in either shape are accepted and normalized
//! to one canonical [`Analysis`] immediately after extraction; nothing
//! downstream ever sees the raw shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm_client::ImageRef;

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// One profile-analysis submission. Every field is optional on its own;
/// the handler rejects requests where nothing usable is present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRequest {
    pub images: Vec<ImageRef>,
    pub bio: Option<String>,
    pub goals: Option<String>,
    pub tone: Option<String>,
    pub age: Option<u8>,
    pub job: Option<String>,
    pub interests: Vec<String>,
}

impl AnalysisRequest {
    /// A request is usable when it carries at least one photo or some text
    /// worth analyzing.
    pub fn has_content(&self) -> bool {
        !self.images.is_empty()
            || self.bio.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.goals.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Canonical result
// ────────────────────────────────────────────────────────────────────────────

/// Per-photo verdict. Closed three-way classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhotoVerdict {
    Good,
    Okay,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl PhotoVerdict {
    /// Classifies free verdict text by its leading token, first-match-wins
    /// and case-sensitive as the model emits it: "Good…" → Good, "Okay…" →
    /// Okay, anything else → NeedsImprovement. Total over all inputs.
    pub fn classify(text: &str) -> Self {
        let text = text.trim_start();
        if text.starts_with("Good") {
            PhotoVerdict::Good
        } else if text.starts_with("Okay") {
            PhotoVerdict::Okay
        } else {
            PhotoVerdict::NeedsImprovement
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTag {
    Positive,
    NeedsImprovement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub tag: FeedbackTag,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    /// Short action label for the UI button, when the model offered one.
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoFeedback {
    pub description: String,
    pub verdict: PhotoVerdict,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeVerdict {
    pub favorable: bool,
    pub reason: String,
}

/// The canonical analysis shape. Every field is best-effort: the extractor
/// fills what it recovered and presentation renders whatever is there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Analysis {
    pub overall_score: Option<f64>,
    pub swipe_verdict: Option<SwipeVerdict>,
    pub feedback: Vec<FeedbackEntry>,
    pub suggestions: Vec<Suggestion>,
    pub photo_feedback: Vec<PhotoFeedback>,
}

impl Analysis {
    /// True when at least one field was recovered — the bar a parse must
    /// clear before the chain stops trying further steps.
    pub fn is_usable(&self) -> bool {
        self.overall_score.is_some()
            || self.swipe_verdict.is_some()
            || !self.feedback.is_empty()
            || !self.suggestions.is_empty()
            || !self.photo_feedback.is_empty()
    }
}

/// Badge shown next to the overall score. The ≥7 threshold is part of the
/// UI contract; computing it here keeps the threshold out of the front end.
pub fn score_badge(score: f64) -> &'static str {
    if score >= 7.0 {
        "Good"
    } else if score >= 5.0 {
        "Okay"
    } else {
        "Needs Improvement"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire shapes and normalization
// ────────────────────────────────────────────────────────────────────────────

/// Legacy flat reply shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlatAnalysis {
    pub overall_score: Option<f64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub would_swipe_right: Option<bool>,
    pub swipe_reason: Option<String>,
}

/// Current nested reply shape — structurally identical to [`Analysis`] but
/// kept distinct so normalization is the only path into the canonical type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NestedAnalysis {
    pub overall_score: Option<f64>,
    pub swipe_verdict: Option<SwipeVerdict>,
    pub feedback: Vec<FeedbackEntry>,
    pub suggestions: Vec<Suggestion>,
    pub photo_feedback: Vec<PhotoFeedback>,
}

/// The two reply shapes the model is known to emit.
#[derive(Debug, Clone)]
pub enum RawAnalysis {
    Flat(FlatAnalysis),
    Nested(NestedAnalysis),
}

impl RawAnalysis {
    /// Decides which shape a parsed JSON object is. Signature keys pick the
    /// shape; nested wins when both could apply because the flat keys were
    /// retired and never coexist with nested ones in practice.
    pub fn from_value(value: Value) -> Option<RawAnalysis> {
        let object = value.as_object()?;

        let looks_nested = object.contains_key("swipeVerdict")
            || object.contains_key("feedback")
            || object.contains_key("photoFeedback");
        let looks_flat = object.contains_key("strengths")
            || object.contains_key("weaknesses")
            || object.contains_key("wouldSwipeRight");

        let looks_partial =
            object.contains_key("overallScore") || object.contains_key("suggestions");

        if looks_nested {
            serde_json::from_value(value).ok().map(RawAnalysis::Nested)
        } else if looks_flat {
            serde_json::from_value(value).ok().map(RawAnalysis::Flat)
        } else if looks_partial {
            // Score-only partial replies parse as nested; a string-array
            // `suggestions` field falls through to the flat shape.
            serde_json::from_value::<NestedAnalysis>(value.clone())
                .ok()
                .map(RawAnalysis::Nested)
                .or_else(|| serde_json::from_value(value).ok().map(RawAnalysis::Flat))
        } else {
            None
        }
    }

    /// Normalizes either shape to the canonical [`Analysis`].
    pub fn normalize(self) -> Analysis {
        match self {
            RawAnalysis::Nested(nested) => Analysis {
                overall_score: nested.overall_score,
                swipe_verdict: nested.swipe_verdict,
                feedback: nested.feedback,
                suggestions: nested.suggestions,
                photo_feedback: nested.photo_feedback,
            },
            RawAnalysis::Flat(flat) => {
                let mut feedback: Vec<FeedbackEntry> = flat
                    .strengths
                    .into_iter()
                    .map(|text| FeedbackEntry {
                        tag: FeedbackTag::Positive,
                        text,
                    })
                    .collect();
                feedback.extend(flat.weaknesses.into_iter().map(|text| FeedbackEntry {
                    tag: FeedbackTag::NeedsImprovement,
                    text,
                }));

                let suggestions = flat
                    .suggestions
                    .into_iter()
                    .map(|text| match text.split_once(':') {
                        Some((title, description)) => Suggestion {
                            title: title.trim().to_string(),
                            description: description.trim().to_string(),
                            action: None,
                        },
                        None => Suggestion {
                            title: "Suggestion".to_string(),
                            description: text,
                            action: None,
                        },
                    })
                    .collect();

                let swipe_verdict = flat.would_swipe_right.map(|favorable| SwipeVerdict {
                    favorable,
                    reason: flat.swipe_reason.unwrap_or_default(),
                });

                Analysis {
                    overall_score: flat.overall_score,
                    swipe_verdict,
                    feedback,
                    suggestions,
                    photo_feedback: Vec::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_good_prefix() {
        assert_eq!(PhotoVerdict::classify("Good lighting and framing"), PhotoVerdict::Good);
    }

    #[test]
    fn test_classify_okay_prefix() {
        assert_eq!(PhotoVerdict::classify("Okay but a bit dark"), PhotoVerdict::Okay);
    }

    #[test]
    fn test_classify_is_case_sensitive_on_leading_token() {
        // "good" (lowercase) is not the token the model emits for Good
        assert_eq!(PhotoVerdict::classify("good angle"), PhotoVerdict::NeedsImprovement);
        assert_eq!(PhotoVerdict::classify("OKAY"), PhotoVerdict::NeedsImprovement);
    }

    #[test]
    fn test_classify_is_total() {
        for text in ["", "Blurry", "Needs work", "   Good one", "Okayish"] {
            // Every input maps to exactly one of the three variants.
            let _ = PhotoVerdict::classify(text);
        }
        assert_eq!(PhotoVerdict::classify(""), PhotoVerdict::NeedsImprovement);
        assert_eq!(PhotoVerdict::classify("   Good one"), PhotoVerdict::Good);
        assert_eq!(PhotoVerdict::classify("Okayish"), PhotoVerdict::Okay);
    }

    #[test]
    fn test_score_badge_thresholds() {
        assert_eq!(score_badge(8.0), "Good");
        assert_eq!(score_badge(7.0), "Good");
        assert_eq!(score_badge(6.9), "Okay");
        assert_eq!(score_badge(5.0), "Okay");
        assert_eq!(score_badge(4.9), "Needs Improvement");
    }

    #[test]
    fn test_flat_shape_detected_and_normalized() {
        let value: Value = serde_json::from_str(
            r#"{"overallScore":7.5,"strengths":["Good lighting"],"weaknesses":["Bio too short"],"wouldSwipeRight":true,"swipeReason":"Strong first photo"}"#,
        )
        .unwrap();
        let raw = RawAnalysis::from_value(value).unwrap();
        assert!(matches!(raw, RawAnalysis::Flat(_)));

        let analysis = raw.normalize();
        assert_eq!(analysis.overall_score, Some(7.5));
        assert_eq!(analysis.feedback.len(), 2);
        assert_eq!(analysis.feedback[0].tag, FeedbackTag::Positive);
        assert_eq!(analysis.feedback[0].text, "Good lighting");
        assert_eq!(analysis.feedback[1].tag, FeedbackTag::NeedsImprovement);
        let verdict = analysis.swipe_verdict.unwrap();
        assert!(verdict.favorable);
        assert_eq!(verdict.reason, "Strong first photo");
    }

    #[test]
    fn test_nested_shape_detected_and_normalized() {
        let value: Value = serde_json::from_str(
            r#"{
                "overallScore": 8,
                "swipeVerdict": {"favorable": true, "reason": "Great variety"},
                "feedback": [{"tag": "positive", "text": "Clear first photo"}],
                "suggestions": [{"title": "Add a hobby shot", "description": "Show an interest", "action": "Upload photo"}],
                "photoFeedback": [{"description": "Beach photo", "verdict": "Good", "suggestion": null}]
            }"#,
        )
        .unwrap();
        let raw = RawAnalysis::from_value(value).unwrap();
        assert!(matches!(raw, RawAnalysis::Nested(_)));

        let analysis = raw.normalize();
        assert_eq!(analysis.overall_score, Some(8.0));
        assert_eq!(analysis.photo_feedback[0].verdict, PhotoVerdict::Good);
        assert_eq!(analysis.suggestions[0].action.as_deref(), Some("Upload photo"));
    }

    #[test]
    fn test_score_only_reply_is_usable() {
        let value: Value = serde_json::from_str(r#"{"overallScore": 6}"#).unwrap();
        let analysis = RawAnalysis::from_value(value).unwrap().normalize();
        assert!(analysis.is_usable());
        assert_eq!(analysis.overall_score, Some(6.0));
    }

    #[test]
    fn test_unrelated_object_is_rejected() {
        let value: Value = serde_json::from_str(r#"{"model": "x", "tokens": 12}"#).unwrap();
        assert!(RawAnalysis::from_value(value).is_none());
    }

    #[test]
    fn test_flat_suggestion_with_colon_becomes_titled() {
        let flat = FlatAnalysis {
            suggestions: vec!["Better lighting: retake the first photo outdoors".to_string()],
            ..Default::default()
        };
        let analysis = RawAnalysis::Flat(flat).normalize();
        assert_eq!(analysis.suggestions[0].title, "Better lighting");
        assert_eq!(analysis.suggestions[0].description, "retake the first photo outdoors");
    }

    #[test]
    fn test_empty_analysis_is_not_usable() {
        assert!(!Analysis::default().is_usable());
    }

    #[test]
    fn test_request_content_check() {
        assert!(!AnalysisRequest::default().has_content());
        let with_bio = AnalysisRequest {
            bio: Some("I like hiking".to_string()),
            ..Default::default()
        };
        assert!(with_bio.has_content());
        let blank_bio = AnalysisRequest {
            bio: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!blank_bio.has_content());
    }
}
