//! Conversation coach: opening messages, tips, and follow-ups for a match.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
