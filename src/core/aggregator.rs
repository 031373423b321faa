use std::collections::{HashMap, HashSet};

use crate::core::matcher::DeterministicMatch;
use crate::models::{AggregationSettings, CandidateProfile, MatchResult, MatchSource, Suggestion};

const AI_ONLY_FALLBACK_REASON: &str = "Suggested by the AI match assistant.";

/// Merge confirmed matches and backend suggestions into one ranked list
///
/// # Merge policy
/// - confirmed matches score `settings.baseline_score`
/// - suggestions keep their own score, clamped to [0, 1]; non-finite scores
///   are dropped as malformed
/// - suggestion ids missing from `pool` are dropped silently
/// - a suggestion for an already confirmed candidate only appends its reason
/// - repeated suggestions for one id: the first wins
///
/// The result is sorted by descending score. Sorting is stable, so confirmed
/// matches keep pool order and stay ahead of AI-only entries on ties.
pub fn aggregate(
    deterministic: &[DeterministicMatch],
    suggestions: &[Suggestion],
    pool: &[CandidateProfile],
    requester_id: Option<&str>,
    settings: &AggregationSettings,
) -> Vec<MatchResult> {
    let baseline = clamp_score(settings.baseline_score);

    let mut results: Vec<MatchResult> = deterministic
        .iter()
        .map(|m| MatchResult {
            candidate_id: m.candidate_id.clone(),
            score: baseline,
            reason: m.reason(),
            source: MatchSource::Deterministic,
        })
        .collect();

    let mut positions: HashMap<String, usize> = results
        .iter()
        .enumerate()
        .map(|(i, r)| (r.candidate_id.clone(), i))
        .collect();

    let known: HashSet<&str> = pool.iter().map(|p| p.id.as_str()).collect();
    let mut seen_suggestions: HashSet<&str> = HashSet::new();

    for suggestion in suggestions {
        let id = suggestion.user_id.as_str();

        if !seen_suggestions.insert(id) {
            continue;
        }

        if !suggestion.match_score.is_finite() {
            tracing::debug!("Dropping suggestion for {} with non-finite score", id);
            continue;
        }

        if !known.contains(id) {
            tracing::debug!("Dropping suggestion for unknown candidate {}", id);
            continue;
        }

        if Some(id) == requester_id {
            continue;
        }

        let reason = suggestion.reason.trim();

        if let Some(&pos) = positions.get(id) {
            let entry = &mut results[pos];
            entry.source = MatchSource::Both;
            if !reason.is_empty() {
                entry.reason = format!("{} AI note: {}", entry.reason, reason);
            }
            continue;
        }

        let score = clamp_score(suggestion.match_score);
        if !settings.include_ai_only || score < settings.min_ai_score {
            continue;
        }

        positions.insert(id.to_string(), results.len());
        results.push(MatchResult {
            candidate_id: id.to_string(),
            score,
            reason: if reason.is_empty() {
                AI_ONLY_FALLBACK_REASON.to_string()
            } else {
                reason.to_string()
            },
            source: MatchSource::Ai,
        });
    }

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(max) = settings.max_results {
        results.truncate(max);
    }

    results
}

#[inline]
fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}
