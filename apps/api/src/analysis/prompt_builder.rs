//! Prompt Builder — renders the analysis instruction from whichever optional
//! request fields are present. Pure function of its input: each present field
//! appends one clause, absent fields are silently omitted, and the image list
//! passes through in submission order so per-photo feedback can be zipped
//! back to thumbnails by position.

use crate::analysis::models::AnalysisRequest;
use crate::analysis::prompts::{ANALYSIS_INTRO, ANALYSIS_SCHEMA};
use crate::llm_client::prompts::tone_clause;
use crate::llm_client::ImageRef;

/// The rendered instruction plus the images to interleave, in the order the
/// caller supplied them.
#[derive(Debug, Clone)]
pub struct BuiltPrompt {
    pub instruction: String,
    pub images: Vec<ImageRef>,
}

/// Renders the aggregate-analysis prompt. Callers must reject empty requests
/// before getting here — an empty request still renders, it just says nothing.
pub fn build_analysis_prompt(request: &AnalysisRequest) -> BuiltPrompt {
    let mut clauses: Vec<String> = vec![ANALYSIS_INTRO.to_string()];

    if !request.images.is_empty() {
        clauses.push(format!(
            "The profile has {} photo(s), attached above in the order they appear on the profile.",
            request.images.len()
        ));
    }
    if let Some(bio) = present(&request.bio) {
        clauses.push(format!("Bio:\n{bio}"));
    }
    if let Some(goals) = present(&request.goals) {
        clauses.push(format!("They are looking for: {goals}"));
    }
    if let Some(age) = request.age {
        clauses.push(format!("Age: {age}."));
    }
    if let Some(job) = present(&request.job) {
        clauses.push(format!("Occupation: {job}."));
    }
    if !request.interests.is_empty() {
        clauses.push(format!("Interests: {}.", request.interests.join(", ")));
    }
    if let Some(tone) = present(&request.tone) {
        clauses.push(tone_clause(tone));
    }

    clauses.push(ANALYSIS_SCHEMA.to_string());

    BuiltPrompt {
        instruction: clauses.join("\n\n"),
        images: request.images.clone(),
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
