//! Persistence Adapter — one write per completed analysis, fire-and-forget.
//!
//! The write never blocks the response: the pipeline spawns it and a failure
//! is logged and forgotten. The pipeline never reads back; the GET route
//! below exists for the UI's history view.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::analysis::models::Analysis;
use crate::extract::ExtractionOrigin;

/// A completed analysis ready to persist.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub id: Uuid,
    pub user_id: Uuid,
    pub photo_count: i32,
    pub bio_chars: i32,
    pub analysis: Analysis,
    pub origin: ExtractionOrigin,
}

impl NewAnalysis {
    /// The JSONB payload written to the `analysis` column.
    pub fn analysis_json(&self) -> Value {
        serde_json::to_value(&self.analysis).unwrap_or(Value::Null)
    }
}

/// Stored analysis row, as returned to the history endpoint.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub photo_count: i32,
    pub bio_chars: i32,
    pub analysis: Value,
    pub origin: String,
    pub created_at: DateTime<Utc>,
}

pub async fn insert_analysis(pool: &PgPool, record: &NewAnalysis) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO analyses (id, user_id, photo_count, bio_chars, analysis, origin, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(record.id)
    .bind(record.user_id)
    .bind(record.photo_count)
    .bind(record.bio_chars)
    .bind(record.analysis_json())
    .bind(record.origin.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn fetch_analysis(pool: &PgPool, id: Uuid) -> Result<Option<AnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
