use crate::core::skills::{contained_skills, lowercase_all};
use crate::models::{CandidateProfile, MatchQuery};

/// A confirmed two-sided match, with the candidate skills that satisfied it
#[derive(Debug, Clone, PartialEq)]
pub struct DeterministicMatch {
    pub candidate_id: String,
    /// Candidate's wanted skills containing something the query offers
    pub wanted_skills: Vec<String>,
    /// Candidate's offered skills containing something the query desires
    pub offered_skills: Vec<String>,
}

impl DeterministicMatch {
    /// Human readable explanation of why the candidate matched
    pub fn reason(&self) -> String {
        format!(
            "Wants {} which you offer, and offers {} which you are looking for.",
            self.wanted_skills.join(", "),
            self.offered_skills.join(", ")
        )
    }
}

/// Ids of the matches, in pool order
pub fn matching_ids(matches: &[DeterministicMatch]) -> Vec<&str> {
    matches.iter().map(|m| m.candidate_id.as_str()).collect()
}

/// Two-sided containment matcher
///
/// # Pipeline Stages
/// 1. Requester exclusion
/// 2. Wants check: a candidate wanted skill contains a query offered token
/// 3. Offers check: a candidate offered skill contains a query desired token
///
/// Both checks must pass. Output keeps candidate-pool order; ranking belongs
/// to the aggregator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicMatcher;

impl DeterministicMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Find every candidate that is a two-sided match for `query`
    ///
    /// Tokens are compared trimmed and blank tokens are ignored, so a query
    /// with no usable offered or desired skill matches nobody.
    pub fn find_matches(
        &self,
        query: &MatchQuery,
        candidates: &[CandidateProfile],
    ) -> Vec<DeterministicMatch> {
        if query.is_empty() {
            return Vec::new();
        }

        let offered = lowercase_all(&query.skills_offered);
        let desired = lowercase_all(&query.skills_desired);
        let requester = query.requester_id.as_deref();

        candidates
            .iter()
            // Stage 1: never match the requester with themselves
            .filter(|profile| Some(profile.id.as_str()) != requester)
            .filter_map(|profile| {
                // Stage 2: they want what the query offers
                let wanted = contained_skills(&profile.skills_wanted, &offered);
                if wanted.is_empty() {
                    return None;
                }

                // Stage 3: they offer what the query desires
                let offered_back = contained_skills(&profile.skills_offered, &desired);
                if offered_back.is_empty() {
                    return None;
                }

                Some(DeterministicMatch {
                    candidate_id: profile.id.clone(),
                    wanted_skills: wanted.into_iter().map(str::to_string).collect(),
                    offered_skills: offered_back.into_iter().map(str::to_string).collect(),
                })
            })
            .collect()
    }
}
