/// Trim every skill token and drop the empty ones
///
/// Order is preserved and duplicates are kept; matching is containment
/// based so a repeated token never changes the outcome.
pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split comma separated form input into skill tokens
pub fn parse_skill_list(input: &str) -> Vec<String> {
    normalize_skills(input.split(','))
}

/// Case-insensitive substring test: does `haystack` contain `needle`?
///
/// `"UI/UX Design"` contains `"design"`. No stemming, synonyms or typo
/// tolerance.
#[inline]
pub fn skill_contains(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Lowercased copies of the tokens, for repeated comparisons
#[inline]
pub(crate) fn lowercase_all(skills: &[String]) -> Vec<String> {
    skills.iter().map(|s| s.to_lowercase()).collect()
}

/// Entries of `candidate_skills` containing any of the lowercased `needles`
///
/// Blank needles never match.
pub(crate) fn contained_skills<'a>(candidate_skills: &'a [String], needles: &[String]) -> Vec<&'a str> {
    candidate_skills
        .iter()
        .filter(|skill| {
            let lowered = skill.to_lowercase();
            needles.iter().map(|n| n.trim()).any(|n| !n.is_empty() && lowered.contains(n))
        })
        .map(String::as_str)
        .collect()
}
