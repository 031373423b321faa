// Unit tests for SkillSwap Match

use skillswap_match::core::{
    aggregate, matching_ids, normalize_skills, parse_skill_list, search_candidates, skill_contains,
    DeterministicMatcher,
};
use skillswap_match::models::{AggregationSettings, CandidateProfile, MatchQuery, MatchSource, Suggestion};

fn create_profile(id: &str, offers: &[&str], wants: &[&str]) -> CandidateProfile {
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

#[test]
fn test_whitespace_tokens_discarded() {
    assert_eq!(normalize_skills(vec![" ", "Python ", ""]), vec!["Python"]);
    assert_eq!(parse_skill_list("SEO,  , Copywriting"), vec!["SEO", "Copywriting"]);
}

#[test]
fn test_broad_token_matches_specific_skill() {
    assert!(skill_contains("UI/UX Design", "Design"));
    assert!(skill_contains("Graphic Design", "design"));
    assert!(!skill_contains("Designing", "Designs"));
}

#[test]
fn test_normalized_query_ignores_padding() {
    let matcher = DeterministicMatcher::new();
    let pool = vec![create_profile("u", &["SEO"], &["Python"])];

    let padded = MatchQuery::new(vec!["  Python  ", ""], vec![" SEO"]).normalized();

    assert_eq!(matching_ids(&matcher.find_matches(&padded, &pool)), vec!["u"]);
}

#[test]
fn test_offered_only_query_matches_nobody() {
    let matcher = DeterministicMatcher::new();
    let pool = vec![create_profile("u", &["SEO"], &["Python"])];

    let query = MatchQuery::new(vec!["Python"], Vec::<&str>::new());

    assert!(matcher.find_matches(&query, &pool).is_empty());
}

#[test]
fn test_aggregate_prefers_deterministic_entry() {
    let matcher = DeterministicMatcher::new();
    let pool = vec![
        create_profile("a", &["SEO"], &["Python"]),
        create_profile("b", &["Cooking"], &["Baking"]),
    ];
    let query = MatchQuery::new(vec!["Python"], vec!["SEO"]);
    let confirmed = matcher.find_matches(&query, &pool);

    let suggestions = vec![
        Suggestion { user_id: "b".to_string(), match_score: 0.95, reason: "Adjacent interests".to_string() },
        Suggestion { user_id: "a".to_string(), match_score: 0.2, reason: "Overlap".to_string() },
    ];

    let results = aggregate(&confirmed, &suggestions, &pool, None, &AggregationSettings::default());

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].candidate_id, "a");
    assert_eq!(results[0].score, 1.0);
    assert_eq!(results[0].source, MatchSource::Both);
    assert_eq!(results[1].candidate_id, "b");
    assert_eq!(results[1].score, 0.95);
}

#[test]
fn test_aggregate_empty_inputs() {
    let results = aggregate(&[], &[], &[], None, &AggregationSettings::default());
    assert!(results.is_empty());
}

#[test]
fn test_search_is_independent_of_matching() {
    let pool = vec![
        create_profile("a", &["SEO"], &["Python"]),
        create_profile("b", &["Python"], &["SEO"]),
    ];

    let found: Vec<&str> = search_candidates("python", &pool, 10)
        .iter()
        .map(|p| p.id.as_str())
        .collect();

    assert_eq!(found, vec!["a", "b"]);
}
