// Core algorithm exports
pub mod aggregator;
pub mod engine;
pub mod generation;
pub mod matcher;
pub mod search;
pub mod skills;

pub use aggregator::aggregate;
pub use engine::{AiStatus, MatchEngine, MatchError, MatchOutcome};
pub use generation::{QueryGeneration, QueryTicket};
pub use matcher::{matching_ids, DeterministicMatch, DeterministicMatcher};
pub use search::search_candidates;
pub use skills::{normalize_skills, parse_skill_list, skill_contains};
