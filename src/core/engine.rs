use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::core::aggregator::aggregate;
use crate::core::matcher::DeterministicMatcher;
use crate::models::{
    AggregationSettings, CandidateProfile, MatchQuery, MatchResult, RosterEntry, Suggestion,
    SuggestionRequest,
};
use crate::services::directory::{CandidateDirectory, DirectoryError};
use crate::services::suggester::Suggester;

/// Errors surfaced by [`MatchEngine`]
///
/// Suggestion backend failures never appear here; they degrade the result.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid match query: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Candidate directory error: {0}")]
    Directory(#[from] DirectoryError),
}

/// What happened to the AI side of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiStatus {
    /// Backend answered and its suggestions were merged
    Used,
    /// Query had no skills, backend not consulted
    Skipped,
    /// No backend configured
    Disabled,
    /// Backend returned an error
    Failed,
    /// Backend did not answer within the timeout
    TimedOut,
}

/// Result of one query plus bookkeeping for callers
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Fresh per query; lets callers drop responses to superseded searches
    pub query_id: Uuid,
    pub results: Vec<MatchResult>,
    pub total_candidates: usize,
    pub ai_status: AiStatus,
}

/// Skill matching entry point
///
/// Stateless between calls: every query reads a fresh directory snapshot,
/// runs the deterministic scan, makes at most one bounded suggestion call
/// and aggregates. Dropping the returned future abandons the in-flight
/// suggestion call.
#[derive(Clone)]
pub struct MatchEngine {
    directory: Arc<dyn CandidateDirectory>,
    suggester: Arc<dyn Suggester>,
    matcher: DeterministicMatcher,
    settings: AggregationSettings,
    ai_timeout: Duration,
    max_roster: usize,
}

impl MatchEngine {
    pub fn new(directory: Arc<dyn CandidateDirectory>, suggester: Arc<dyn Suggester>) -> Self {
        Self {
            directory,
            suggester,
            matcher: DeterministicMatcher::new(),
            settings: AggregationSettings::default(),
            ai_timeout: Duration::from_secs(8),
            max_roster: 100,
        }
    }

    pub fn with_settings(mut self, settings: AggregationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_ai_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = timeout;
        self
    }

    /// Cap on candidates described to the suggestion backend
    pub fn with_max_roster(mut self, max_roster: usize) -> Self {
        self.max_roster = max_roster;
        self
    }

    pub fn directory(&self) -> &Arc<dyn CandidateDirectory> {
        &self.directory
    }

    /// Ranked matches for `query`
    ///
    /// An empty vector means "no matches"; only an invalid query or an
    /// unreachable directory is an error.
    pub async fn match_query(&self, query: &MatchQuery) -> Result<Vec<MatchResult>, MatchError> {
        Ok(self.find_matches(query).await?.results)
    }

    /// Ranked matches plus query id, pool size and AI status
    pub async fn find_matches(&self, query: &MatchQuery) -> Result<MatchOutcome, MatchError> {
        query.validate()?;

        let query = query.normalized();
        let query_id = Uuid::new_v4();

        let pool = self.directory.list_candidates().await?;
        let total_candidates = pool.len();

        if query.is_empty() {
            tracing::debug!("Query {} has no skills, returning no matches", query_id);
            return Ok(MatchOutcome {
                query_id,
                results: Vec::new(),
                total_candidates,
                ai_status: AiStatus::Skipped,
            });
        }

        let deterministic = self.matcher.find_matches(&query, &pool);

        tracing::debug!(
            "Query {}: {} confirmed matches from {} candidates",
            query_id,
            deterministic.len(),
            total_candidates
        );

        let (suggestions, ai_status) = self.fetch_suggestions(&query, &pool).await;

        let results = aggregate(
            &deterministic,
            &suggestions,
            &pool,
            query.requester_id.as_deref(),
            &self.settings,
        );

        tracing::info!(
            "Query {} returned {} matches ({} confirmed, ai: {:?})",
            query_id,
            results.len(),
            deterministic.len(),
            ai_status
        );

        Ok(MatchOutcome {
            query_id,
            results,
            total_candidates,
            ai_status,
        })
    }

    /// One bounded attempt at the suggestion backend; never fails
    async fn fetch_suggestions(
        &self,
        query: &MatchQuery,
        pool: &[CandidateProfile],
    ) -> (Vec<Suggestion>, AiStatus) {
        if !self.suggester.is_enabled() {
            return (Vec::new(), AiStatus::Disabled);
        }

        let requester = query.requester_id.as_deref();
        let request = SuggestionRequest {
            offered_skills: query.skills_offered.clone(),
            desired_skills: query.skills_desired.clone(),
            profile_description: query.context_description.clone(),
            roster: pool
                .iter()
                .filter(|p| Some(p.id.as_str()) != requester)
                .take(self.max_roster)
                .map(RosterEntry::from)
                .collect(),
        };

        match tokio::time::timeout(self.ai_timeout, self.suggester.suggest(&request)).await {
            Ok(Ok(suggestions)) => (suggestions, AiStatus::Used),
            Ok(Err(e)) => {
                tracing::warn!("Suggestion backend failed, using confirmed matches only: {}", e);
                (Vec::new(), AiStatus::Failed)
            }
            Err(_) => {
                tracing::warn!(
                    "Suggestion backend timed out after {:?}, using confirmed matches only",
                    self.ai_timeout
                );
                (Vec::new(), AiStatus::TimedOut)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchSource;
    use crate::services::directory::InMemoryDirectory;
    use crate::services::suggester::{NullSuggester, ProviderError};
    use async_trait::async_trait;

    enum Behavior {
        Fixed(Vec<Suggestion>),
        Fail,
        Hang,
    }

    struct StubSuggester(Behavior);

    #[async_trait]
    impl Suggester for StubSuggester {
        async fn suggest(&self, _request: &SuggestionRequest) -> Result<Vec<Suggestion>, ProviderError> {
            match &self.0 {
                Behavior::Fixed(s) => Ok(s.clone()),
                Behavior::Fail => Err(ProviderError::MalformedResponse("not json".into())),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(Vec::new())
                }
            }
        }
    }

    fn create_candidate(id: &str, offers: &[&str], wants: &[&str]) -> CandidateProfile {
        CandidateProfile {
            id: id.to_string(),
            name: format!("User {}", id),
            skills_offered: offers.iter().map(|s| s.to_string()).collect(),
            skills_wanted: wants.iter().map(|s| s.to_string()).collect(),
            bio: None,
            location: None,
            avatar_url: None,
        }
    }

    fn directory() -> Arc<dyn CandidateDirectory> {
        Arc::new(
            InMemoryDirectory::new(vec![
                create_candidate("u1", &["React Development"], &["Marketing Strategy"]),
                create_candidate("u2", &["Marketing Strategy"], &["React Development"]),
                create_candidate("u3", &["Copywriting"], &["Photography"]),
            ])
            .unwrap(),
        )
    }

    fn engine(behavior: Behavior) -> MatchEngine {
        MatchEngine::new(directory(), Arc::new(StubSuggester(behavior)))
            .with_ai_timeout(Duration::from_millis(50))
    }

    fn query() -> MatchQuery {
        MatchQuery::new(vec!["React Development"], vec!["Marketing Strategy"])
    }

    fn suggestion(id: &str, score: f64) -> Suggestion {
        Suggestion {
            user_id: id.to_string(),
            match_score: score,
            reason: "complementary".to_string(),
        }
    }

    #[tokio::test]
    async fn test_deterministic_with_null_suggester() {
        let engine = MatchEngine::new(directory(), Arc::new(NullSuggester));

        let outcome = engine.find_matches(&query()).await.unwrap();

        assert_eq!(outcome.ai_status, AiStatus::Disabled);
        assert_eq!(outcome.total_candidates, 3);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].candidate_id, "u2");
        assert_eq!(outcome.results[0].score, 1.0);
    }

    #[tokio::test]
    async fn test_ai_suggestions_merged() {
        let engine = engine(Behavior::Fixed(vec![
            suggestion("u2", 0.4),
            suggestion("u3", 0.6),
            suggestion("ghost", 0.9),
        ]));

        let outcome = engine.find_matches(&query()).await.unwrap();
        let ids: Vec<&str> = outcome.results.iter().map(|r| r.candidate_id.as_str()).collect();

        assert_eq!(outcome.ai_status, AiStatus::Used);
        assert_eq!(ids, vec!["u2", "u3"]);
        assert_eq!(outcome.results[0].source, MatchSource::Both);
        assert_eq!(outcome.results[0].score, 1.0);
        assert_eq!(outcome.results[1].source, MatchSource::Ai);
    }

    #[tokio::test]
    async fn test_provider_failure_degrades() {
        let outcome = engine(Behavior::Fail).find_matches(&query()).await.unwrap();

        assert_eq!(outcome.ai_status, AiStatus::Failed);
        assert_eq!(outcome.results.len(), 1);
    }

    #[tokio::test]
    async fn test_provider_timeout_degrades() {
        let outcome = engine(Behavior::Hang).find_matches(&query()).await.unwrap();

        assert_eq!(outcome.ai_status, AiStatus::TimedOut);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].candidate_id, "u2");
    }

    #[tokio::test]
    async fn test_empty_query_skips_backend() {
        let engine = engine(Behavior::Fixed(vec![suggestion("u3", 0.9)]));

        let outcome = engine
            .find_matches(&MatchQuery::new(vec!["  "], Vec::<&str>::new()))
            .await
            .unwrap();

        assert!(outcome.results.is_empty());
        assert_eq!(outcome.ai_status, AiStatus::Skipped);
    }

    #[tokio::test]
    async fn test_invalid_query_is_error() {
        let engine = engine(Behavior::Fixed(vec![]));
        let query = MatchQuery::new(vec!["x".repeat(500)], vec!["SEO".to_string()]);

        let err = engine.match_query(&query).await.unwrap_err();

        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[tokio::test]
    async fn test_query_ids_are_fresh() {
        let engine = MatchEngine::new(directory(), Arc::new(NullSuggester));

        let a = engine.find_matches(&query()).await.unwrap();
        let b = engine.find_matches(&query()).await.unwrap();

        assert_ne!(a.query_id, b.query_id);
    }
}
