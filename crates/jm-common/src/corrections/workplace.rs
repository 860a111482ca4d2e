use std::collections::HashMap;
use std::sync::LazyLock;

/// Workplace filter token → extra phrases that also count as a match.
/// The token itself always matches, so only the additional phrases live here.
pub static WORKPLACE_SYNONYMS: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| {
        let table: &[(&str, &[&str])] = &[
            ("on-site", &["full time", "office"]),
            ("remote", &["remote"]),
            ("hybrid", &["hybrid", "flexible"]),
        ];
        table.iter().copied().collect()
    });

/// Normalizes a selected filter token ("On-Site", " remote ") to its table key.
pub fn normalize_workplace_token(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Every phrase that satisfies `token`, the token itself first.
pub fn workplace_synonyms(token: &str) -> Vec<String> {
    let key = normalize_workplace_token(token);
    if key.is_empty() {
        return Vec::new();
    }

    let mut phrases = vec![key.clone()];
    if let Some(extra) = WORKPLACE_SYNONYMS.get(key.as_str()) {
        phrases.extend(
            extra
                .iter()
                .filter(|phrase| **phrase != key)
                .map(|phrase| phrase.to_string()),
        );
    }
    phrases
}

/// Whether a job's free-text workplace type satisfies one selected token.
/// A blank workplace type never matches.
pub fn matches_workplace_token(job_workplace_type: &str, token: &str) -> bool {
    let haystack = job_workplace_type.trim().to_lowercase();
    if haystack.is_empty() {
        return false;
    }

    workplace_synonyms(token)
        .iter()
        .any(|phrase| haystack.contains(phrase.as_str()))
}
