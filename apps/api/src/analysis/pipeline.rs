//! Profile Analysis — orchestrates the full pipeline.
//!
//! Flow: submission ticket → build prompt → one vision call per photo (in
//! submission order) → one aggregate call → extract → persist (fire-and-
//! forget) → respond.
//!
//! Availability over correctness: invoker failures degrade to the sample
//! analysis, flagged `origin = fallback`, instead of surfacing provider
//! errors. Only stale submissions (last-submission-wins) return an error.

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::extractor::{extract_analysis, extract_photo_feedback};
use crate::analysis::fallback::sample_analysis;
use crate::analysis::models::{
    score_badge, Analysis, AnalysisRequest, PhotoFeedback, PhotoVerdict,
};
use crate::analysis::prompt_builder::build_analysis_prompt;
use crate::analysis::prompts::{ANALYSIS_SYSTEM, PHOTO_PROMPT, PHOTO_SYSTEM};
use crate::analysis::store::{insert_analysis, NewAnalysis};
use crate::errors::AppError;
use crate::extract::ExtractionOrigin;
use crate::llm_client::{CompletionRequest, Invoker};
use crate::state::SubmissionLedger;

/// What the analysis endpoint returns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub id: Uuid,
    pub origin: ExtractionOrigin,
    /// "Good" / "Okay" / "Needs Improvement", present when a score was
    /// recovered. Computed here so the UI threshold lives in one place.
    pub badge: Option<&'static str>,
    pub analysis: Analysis,
}

/// Runs the full analysis pipeline for one submission.
pub async fn run_analysis(
    pool: &PgPool,
    invoker: &dyn Invoker,
    ledger: &SubmissionLedger,
    cap: Option<usize>,
    user_id: Uuid,
    request: AnalysisRequest,
) -> Result<AnalysisOutcome, AppError> {
    let ticket = ledger.begin(user_id);
    let built = build_analysis_prompt(&request);

    // One vision call per photo, sequential, results kept in submission
    // order so the UI can zip them back to thumbnails.
    let mut photo_feedback: Vec<PhotoFeedback> = Vec::with_capacity(request.images.len());
    let mut any_photo_recovered = false;
    for (index, image) in request.images.iter().enumerate() {
        let photo_request =
            CompletionRequest::vision(PHOTO_PROMPT, PHOTO_SYSTEM.as_str(), std::slice::from_ref(image));
        match invoker.complete(&photo_request).await {
            Ok(raw) => {
                photo_feedback.push(extract_photo_feedback(&raw));
                any_photo_recovered = true;
            }
            Err(e) => {
                warn!("Photo {} analysis call failed: {e}", index + 1);
                photo_feedback.push(PhotoFeedback {
                    description: "This photo could not be analyzed.".to_string(),
                    verdict: PhotoVerdict::NeedsImprovement,
                    suggestion: None,
                });
            }
        }
    }

    // Aggregate call: vision when photos are present, plain text otherwise.
    let aggregate_request = if built.images.is_empty() {
        CompletionRequest::text(&built.instruction, ANALYSIS_SYSTEM.as_str())
    } else {
        CompletionRequest::vision(&built.instruction, ANALYSIS_SYSTEM.as_str(), &built.images)
    };

    let (mut analysis, origin) = match invoker.complete(&aggregate_request).await {
        Ok(raw) => {
            let extracted = extract_analysis(&raw, cap);
            (extracted.analysis, extracted.origin)
        }
        Err(e) => {
            warn!("Aggregate analysis call failed, serving sample result: {e}");
            (sample_analysis(), ExtractionOrigin::Fallback)
        }
    };

    // Per-photo calls are authoritative for the photo breakdown: they carry
    // the ordering guarantee the aggregate reply does not.
    if any_photo_recovered {
        analysis.photo_feedback = photo_feedback;
    }

    // Last-submission-wins: a stale run's result is discarded on arrival.
    // Settling also drops the user's ledger entry, so the map stays bounded
    // by the number of submissions actually in flight.
    if !ledger.finish(user_id, ticket) {
        info!("Analysis for user {user_id} superseded by a newer submission; discarding");
        return Err(AppError::Superseded);
    }

    let outcome = AnalysisOutcome {
        id: Uuid::new_v4(),
        origin,
        badge: analysis.overall_score.map(score_badge),
        analysis,
    };

    // Fire-and-forget audit write. Sample results are not worth a row.
    if origin != ExtractionOrigin::Fallback {
        let record = NewAnalysis {
            id: outcome.id,
            user_id,
            photo_count: request.images.len() as i32,
            bio_chars: request.bio.as_deref().map_or(0, |b| b.len()) as i32,
            analysis: outcome.analysis.clone(),
            origin,
        };
        let pool = pool.clone();
        tokio::spawn(async move {
            if let Err(e) = insert_analysis(&pool, &record).await {
                warn!("Failed to persist analysis {}: {e}", record.id);
            }
        });
    }

    info!(
        "Analysis completed for user {user_id} (origin: {}, photos: {})",
        origin.as_str(),
        request.images.len()
    );

    Ok(outcome)
}
