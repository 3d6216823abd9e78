//! Result Extractor — turns raw model text into an [`Analysis`], maximizing
//! recovered structure and never failing outright. See `extract` for the
//! shared chain; this module owns the analysis-specific classification.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::analysis::fallback::{placeholder_feedback, placeholder_suggestion};
use crate::analysis::models::{
    Analysis, FeedbackEntry, FeedbackTag, PhotoFeedback, PhotoVerdict, RawAnalysis, Suggestion,
    SwipeVerdict,
};
use crate::extract::heuristic::{pick_category, split_sections};
use crate::extract::json::{fenced_block, first_json_object};
use crate::extract::ExtractionOrigin;

// Keyword classes for heuristic section classification.
const POSITIVE_KEYWORDS: &[&str] = &["strength", "works well", "great", "love", "stands out"];
const IMPROVE_KEYWORDS: &[&str] = &["improve", "weak", "fix", "avoid", "hurting"];
const SUGGEST_KEYWORDS: &[&str] = &["suggest", "tip", "try", "recommend", "consider"];

static SCORE: Lazy<Regex> = Lazy::new(|| {
    // "7/10", "7.5 out of 10", "score: 8", "score is 8.5"
    Regex::new(r"(?i)(?:\b(\d{1,2}(?:\.\d+)?)\s*(?:/|out of)\s*10\b|score\s*(?:is|:)?\s*(\d{1,2}(?:\.\d+)?))")
        .expect("score regex is valid")
});

/// Extraction result: the analysis plus how it was recovered.
#[derive(Debug, Clone)]
pub struct Extracted {
    pub analysis: Analysis,
    pub origin: ExtractionOrigin,
}

/// Recovers an [`Analysis`] from raw reply text. Never fails: if no JSON is
/// recoverable the heuristic path runs, and empty required categories are
/// padded with one placeholder each. `cap`, when set, truncates every list
/// category (the model is asked for three per category but not trusted).
pub fn extract_analysis(raw: &str, cap: Option<usize>) -> Extracted {
    // Steps 1-3: whole reply, fenced block, first embedded object.
    let candidates = [
        Some(raw),
        fenced_block(raw),
        first_json_object(raw),
    ];
    for candidate in candidates.into_iter().flatten() {
        if let Some(analysis) = try_parse(candidate) {
            if analysis.is_usable() {
                let mut analysis = analysis;
                apply_cap(&mut analysis, cap);
                return Extracted {
                    analysis,
                    origin: ExtractionOrigin::Parsed,
                };
            }
        }
    }

    debug!("No structured analysis in reply; falling back to heuristics");

    // Step 4: heuristic section splitting.
    let mut analysis = heuristic_analysis(raw);

    // Step 5: required categories always have at least one item.
    if analysis.feedback.is_empty() {
        analysis.feedback.push(placeholder_feedback());
    }
    if analysis.suggestions.is_empty() {
        analysis.suggestions.push(placeholder_suggestion());
    }
    apply_cap(&mut analysis, cap);

    Extracted {
        analysis,
        origin: ExtractionOrigin::Heuristic,
    }
}

fn try_parse(text: &str) -> Option<Analysis> {
    let value: Value = serde_json::from_str(text.trim()).ok()?;
    RawAnalysis::from_value(value).map(RawAnalysis::normalize)
}

fn heuristic_analysis(raw: &str) -> Analysis {
    let sections = split_sections(raw);

    let feedback: Vec<FeedbackEntry> = pick_category(&sections, POSITIVE_KEYWORDS)
        .into_iter()
        .map(|text| FeedbackEntry {
            tag: FeedbackTag::Positive,
            text,
        })
        .chain(
            pick_category(&sections, IMPROVE_KEYWORDS)
                .into_iter()
                .map(|text| FeedbackEntry {
                    tag: FeedbackTag::NeedsImprovement,
                    text,
                }),
        )
        .collect();

    let suggestions: Vec<Suggestion> = pick_category(&sections, SUGGEST_KEYWORDS)
        .into_iter()
        .map(|text| Suggestion {
            title: "Suggestion".to_string(),
            description: text,
            action: None,
        })
        .collect();

    Analysis {
        overall_score: find_score(raw),
        swipe_verdict: find_swipe_verdict(&sections),
        feedback,
        suggestions,
        photo_feedback: Vec::new(),
    }
}

fn find_score(raw: &str) -> Option<f64> {
    let captures = SCORE.captures(raw)?;
    let matched = captures.get(1).or_else(|| captures.get(2))?;
    matched.as_str().parse::<f64>().ok().filter(|s| *s <= 10.0)
}

fn find_swipe_verdict(sections: &[String]) -> Option<SwipeVerdict> {
    let section = sections
        .iter()
        .find(|s| s.to_lowercase().contains("swipe"))?;
    let lowered = section.to_lowercase();
    Some(SwipeVerdict {
        favorable: lowered.contains("swipe right"),
        reason: section.clone(),
    })
}

fn apply_cap(analysis: &mut Analysis, cap: Option<usize>) {
    if let Some(cap) = cap {
        analysis.feedback.truncate(cap);
        analysis.suggestions.truncate(cap);
        analysis.photo_feedback.truncate(cap);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-photo extraction
// ────────────────────────────────────────────────────────────────────────────

/// Wire shape of the one-photo vision reply. `verdict` stays a free string
/// here; classification happens in one place below.
#[derive(Debug, Deserialize)]
struct PhotoReply {
    description: Option<String>,
    verdict: Option<String>,
    suggestion: Option<String>,
}

/// Recovers per-photo feedback from a single-photo reply. Same chain, scaled
/// down: JSON first, then the whole reply treated as the description with the
/// verdict classified from its leading token.
pub fn extract_photo_feedback(raw: &str) -> PhotoFeedback {
    if let Some(reply) = crate::extract::json::recover::<PhotoReply>(raw) {
        let verdict_text = reply.verdict.unwrap_or_default();
        return PhotoFeedback {
            description: reply.description.unwrap_or_else(|| verdict_text.clone()),
            verdict: PhotoVerdict::classify(&verdict_text),
            suggestion: reply.suggestion.filter(|s| !s.trim().is_empty()),
        };
    }

    let trimmed = raw.trim();
    PhotoFeedback {
        description: trimmed
            .lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("No description available")
            .trim()
            .to_string(),
        verdict: PhotoVerdict::classify(trimmed),
        suggestion: None,
    }
}
