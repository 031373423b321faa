//! SkillSwap Match - skill matching service for the SkillSwap barter marketplace
//!
//! This library provides the matching engine behind the "find a barter
//! partner" search: a deterministic two-sided skill matcher, an optional
//! generative suggestion backend, and an aggregator that merges both into
//! one ranked, explainable list.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{AiStatus, DeterministicMatcher, MatchEngine, MatchError, MatchOutcome};
pub use models::{CandidateProfile, MatchQuery, MatchResult, MatchSource, Suggestion};
pub use services::{CandidateDirectory, InMemoryDirectory, NullSuggester, Suggester};
