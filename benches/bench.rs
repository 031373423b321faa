// Criterion benchmarks for SkillSwap Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skillswap_match::core::{aggregate, DeterministicMatcher};
use skillswap_match::models::{AggregationSettings, CandidateProfile, MatchQuery, Suggestion};

const SKILLS: &[&str] = &[
    "UI/UX Design", "Graphic Design", "React Development", "Node.js", "Python",
    "Digital Marketing", "SEO", "Content Writing", "Photography", "Video Editing",
    "Data Analysis", "Machine Learning", "Project Management", "Copywriting", "Cooking",
];

fn create_candidate(id: usize) -> CandidateProfile {
    let pick = |offset: usize| SKILLS[(id * 7 + offset) % SKILLS.len()].to_string();

    CandidateProfile {
        id: format!("user{}", id),
        name: format!("User {}", id),
        skills_offered: vec![pick(0), pick(3), pick(5)],
        skills_wanted: vec![pick(1), pick(8)],
        bio: None,
        location: None,
        avatar_url: None,
    }
}

fn create_query() -> MatchQuery {
    MatchQuery::new(vec!["React", "Design"], vec!["Marketing", "SEO"])
}

fn bench_matching(c: &mut Criterion) {
    let matcher = DeterministicMatcher::new();
    let query = create_query();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 100, 1000, 10000].iter() {
        let candidates: Vec<CandidateProfile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| matcher.find_matches(black_box(&query), black_box(&candidates)));
            },
        );
    }

    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let matcher = DeterministicMatcher::new();
    let query = create_query();
    let candidates: Vec<CandidateProfile> = (0..1000).map(create_candidate).collect();
    let confirmed = matcher.find_matches(&query, &candidates);
    let suggestions: Vec<Suggestion> = (0..50)
        .map(|i| Suggestion {
            user_id: format!("user{}", i * 13),
            match_score: (i % 10) as f64 / 10.0,
            reason: "complementary skills".to_string(),
        })
        .collect();
    let settings = AggregationSettings::default();

    c.bench_function("aggregate_1000_candidates", |b| {
        b.iter(|| {
            aggregate(
                black_box(&confirmed),
                black_box(&suggestions),
                black_box(&candidates),
                None,
                &settings,
            )
        });
    });
}

criterion_group!(benches, bench_matching, bench_aggregation);

criterion_main!(benches);
