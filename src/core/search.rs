use crate::models::CandidateProfile;

/// Keyword search over names, skills and bios
///
/// Case-insensitive substring match against the trimmed term. A blank term
/// returns nothing rather than the whole directory.
pub fn search_candidates<'a>(
    term: &str,
    pool: &'a [CandidateProfile],
    limit: usize,
) -> Vec<&'a CandidateProfile> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    pool.iter()
        .filter(|profile| profile_mentions(profile, &term))
        .take(limit)
        .collect()
}

#[inline]
fn profile_mentions(profile: &CandidateProfile, term: &str) -> bool {
    profile.name.to_lowercase().contains(term)
        || profile.skills_offered.iter().any(|s| s.to_lowercase().contains(term))
        || profile.skills_wanted.iter().any(|s| s.to_lowercase().contains(term))
        || profile
            .bio
            .as_deref()
            .is_some_and(|bio| bio.to_lowercase().contains(term))
}
