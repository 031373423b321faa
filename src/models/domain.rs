use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::skills::normalize_skills;

/// Longest skill token accepted in a query
pub const MAX_SKILL_LEN: usize = 100;

/// Barterable user profile as held by the candidate directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    pub name: String,
    #[serde(rename = "skillsOffered", default)]
    pub skills_offered: Vec<String>,
    #[serde(rename = "skillsWanted", default)]
    pub skills_wanted: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "avatarUrl", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A single skill search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MatchQuery {
    #[serde(rename = "skillsOffered", default)]
    #[validate(length(max = 50), custom(function = "validate_skill_tokens"))]
    pub skills_offered: Vec<String>,
    #[serde(rename = "skillsDesired", default)]
    #[validate(length(max = 50), custom(function = "validate_skill_tokens"))]
    pub skills_desired: Vec<String>,
    #[serde(rename = "contextDescription", default)]
    #[validate(length(max = 2000))]
    pub context_description: Option<String>,
    /// Id of the searching user, never returned as their own match
    #[serde(rename = "requesterId", default)]
    pub requester_id: Option<String>,
}

impl MatchQuery {
    pub fn new<O, D, S>(skills_offered: O, skills_desired: D) -> Self
    where
        O: IntoIterator<Item = S>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skills_offered: skills_offered.into_iter().map(Into::into).collect(),
            skills_desired: skills_desired.into_iter().map(Into::into).collect(),
            context_description: None,
            requester_id: None,
        }
    }

    pub fn with_context(mut self, description: impl Into<String>) -> Self {
        self.context_description = Some(description.into());
        self
    }

    pub fn with_requester(mut self, requester_id: impl Into<String>) -> Self {
        self.requester_id = Some(requester_id.into());
        self
    }

    /// Copy of the query with trimmed, non-empty skill tokens and blank
    /// optional fields collapsed to `None`
    pub fn normalized(&self) -> Self {
        Self {
            skills_offered: normalize_skills(&self.skills_offered),
            skills_desired: normalize_skills(&self.skills_desired),
            context_description: non_blank(self.context_description.as_deref()),
            requester_id: non_blank(self.requester_id.as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.skills_offered.is_empty() && self.skills_desired.is_empty()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[allow(clippy::ptr_arg)]
fn validate_skill_tokens(skills: &Vec<String>) -> Result<(), ValidationError> {
    if skills.iter().any(|s| s.trim().chars().count() > MAX_SKILL_LEN) {
        let mut err = ValidationError::new("skill_too_long");
        err.message = Some(format!("skills must be at most {} characters", MAX_SKILL_LEN).into());
        return Err(err);
    }
    Ok(())
}

/// Where a match came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Confirmed two-sided skill containment
    Deterministic,
    /// Suggested by the generative backend only
    Ai,
    /// Confirmed match that the generative backend also suggested
    Both,
}

/// Ranked match handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub score: f64,
    pub reason: String,
    pub source: MatchSource,
}

/// One entry returned by a suggestion backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(default)]
    pub reason: String,
}

/// Compact candidate line included in a suggestion prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub offers: Vec<String>,
    pub wants: Vec<String>,
}

impl From<&CandidateProfile> for RosterEntry {
    fn from(profile: &CandidateProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            offers: profile.skills_offered.clone(),
            wants: profile.skills_wanted.clone(),
        }
    }
}

/// Input handed to a suggestion backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    #[serde(rename = "offeredSkills")]
    pub offered_skills: Vec<String>,
    #[serde(rename = "desiredSkills")]
    pub desired_skills: Vec<String>,
    #[serde(rename = "profileDescription")]
    pub profile_description: Option<String>,
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
}

/// Merge policy knobs for the aggregator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationSettings {
    /// Score assigned to every confirmed two-sided match
    pub baseline_score: f64,
    /// AI-only suggestions below this score are dropped
    pub min_ai_score: f64,
    /// Whether suggestions without a confirmed match are surfaced at all
    pub include_ai_only: bool,
    pub max_results: Option<usize>,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            baseline_score: 1.0,
            min_ai_score: 0.0,
            include_ai_only: true,
            max_results: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_drops_blank_tokens() {
        let query = MatchQuery::new(vec!["  Design ", "", "   "], vec!["Marketing"])
            .with_context("   ")
            .with_requester(" user1 ");

        let normalized = query.normalized();

        assert_eq!(normalized.skills_offered, vec!["Design"]);
        assert_eq!(normalized.skills_desired, vec!["Marketing"]);
        assert_eq!(normalized.context_description, None);
        assert_eq!(normalized.requester_id.as_deref(), Some("user1"));
    }

    #[test]
    fn test_validation_rejects_long_skill() {
        let query = MatchQuery::new(vec!["x".repeat(MAX_SKILL_LEN + 1)], vec!["SEO".to_string()]);
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_too_many_skills() {
        let skills: Vec<String> = (0..51).map(|i| format!("skill {}", i)).collect();
        let query = MatchQuery::new(skills, Vec::new());
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_empty_query() {
        let query = MatchQuery::default();
        assert!(query.validate().is_ok());
        assert!(query.is_empty());
    }

    #[test]
    fn test_profile_deserializes_camel_case() {
        let json = r#"{
            "id": "user1",
            "name": "Aditya Mehta",
            "skillsOffered": ["UI/UX Design"],
            "skillsWanted": ["React Development"],
            "location": "Mumbai, Maharashtra"
        }"#;

        let profile: CandidateProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.skills_offered, vec!["UI/UX Design"]);
        assert_eq!(profile.bio, None);
    }
}
