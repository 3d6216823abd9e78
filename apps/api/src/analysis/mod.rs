//! Profile analysis: prompt building, model invocation, structure recovery,
//! persistence.

pub mod extractor;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod store;
