// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AggregationSettings, CandidateProfile, MatchQuery, MatchResult, MatchSource, RosterEntry,
    Suggestion, SuggestionRequest,
};
pub use requests::{FindMatchesRequest, SearchCandidatesRequest, SkillInput};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, SearchCandidatesResponse};
