use serde::{Deserialize, Serialize};

use crate::core::engine::AiStatus;
use crate::models::domain::{CandidateProfile, MatchResult};

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    #[serde(rename = "queryId")]
    pub query_id: String,
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "aiStatus")]
    pub ai_status: AiStatus,
}

/// Response for candidate keyword search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCandidatesResponse {
    pub query: String,
    pub results: Vec<CandidateProfile>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub directory: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
