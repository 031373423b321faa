use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::skills::parse_skill_list;
use crate::models::domain::MatchQuery;

/// Skill field as sent by clients: a JSON array, or the comma separated text
/// typed into the search form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillInput {
    List(Vec<String>),
    Text(String),
}

impl Default for SkillInput {
    fn default() -> Self {
        SkillInput::List(Vec::new())
    }
}

impl SkillInput {
    pub fn into_skills(self) -> Vec<String> {
        match self {
            SkillInput::List(skills) => skills,
            SkillInput::Text(text) => parse_skill_list(&text),
        }
    }
}

/// Request to find barter matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[serde(alias = "skills_offered", rename = "skillsOffered", default)]
    pub skills_offered: SkillInput,
    #[serde(alias = "skills_desired", rename = "skillsDesired", default)]
    pub skills_desired: SkillInput,
    #[validate(length(max = 2000))]
    #[serde(alias = "context_description", rename = "contextDescription", default)]
    pub context_description: Option<String>,
    #[validate(length(min = 1))]
    #[serde(alias = "requester_id", rename = "requesterId", default)]
    pub requester_id: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl FindMatchesRequest {
    pub fn into_query(self) -> MatchQuery {
        MatchQuery {
            skills_offered: self.skills_offered.into_skills(),
            skills_desired: self.skills_desired.into_skills(),
            context_description: self.context_description,
            requester_id: self.requester_id,
        }
    }
}

/// Keyword search over the candidate directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCandidatesRequest {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    5
}
