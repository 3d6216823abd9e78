//! Structure recovery from model replies.
//!
//! The completion service is asked for JSON but is free to ignore that, wrap
//! the JSON in prose or code fences, or answer in plain numbered lists. Both
//! pipelines recover what they can through the same priority chain:
//!
//! 1. parse the whole reply as JSON;
//! 2. parse the contents of a fenced code block;
//! 3. parse the first balanced `{...}` substring;
//! 4. heuristic section splitting with keyword classification;
//! 5. placeholders for any required category left empty.
//!
//! Recovery never fails — callers always get a best-effort result tagged with
//! an [`ExtractionOrigin`] so telemetry can tell real output from placeholders.

pub mod heuristic;
pub mod json;

use serde::{Deserialize, Serialize};

/// How much of a result was actually recovered from the model reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionOrigin {
    /// Steps 1-3: the reply carried parseable structured data.
    Parsed,
    /// Step 4-5: recovered by section splitting, possibly padded with
    /// placeholders.
    Heuristic,
    /// The invoker produced no usable text at all; the result is a sample.
    Fallback,
}

impl ExtractionOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionOrigin::Parsed => "parsed",
            ExtractionOrigin::Heuristic => "heuristic",
            ExtractionOrigin::Fallback => "fallback",
        }
    }
}
