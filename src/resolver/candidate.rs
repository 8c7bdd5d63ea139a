//! Candidate title normalization, filtering and ordering.

use serde::{Deserialize, Serialize};

/// How search titles are filtered before any property lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateFilter {
    /// Keep titles sharing at least one word with the entity name (case-insensitive).
    #[default]
    Strict,
    /// Keep titles of two or more words, regardless of overlap.
    Loose,
}

impl CandidateFilter {
    /// Parses `"strict"` or `"loose"` (case-insensitive, surrounding whitespace ignored).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(CandidateFilter::Strict),
            "loose" => Some(CandidateFilter::Loose),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateFilter::Strict => "strict",
            CandidateFilter::Loose => "loose",
        }
    }

    pub fn accepts(&self, entity_name: &str, title: &str) -> bool {
        match self {
            CandidateFilter::Strict => shares_token(entity_name, title),
            CandidateFilter::Loose => title.split_whitespace().count() >= 2,
        }
    }
}

impl std::fmt::Display for CandidateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strips one trailing parenthetical and collapses whitespace.
///
/// `"John Smith (politician)"` becomes `"John Smith"`. Parentheses elsewhere are kept.
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();

    let base = match trimmed.strip_suffix(')').and_then(|s| s.rfind('(')) {
        Some(open) => &trimmed[..open],
        None => trimmed,
    };

    base.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn shares_token(entity_name: &str, title: &str) -> bool {
    let name_tokens: Vec<String> = entity_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    title
        .split_whitespace()
        .map(str::to_lowercase)
        .any(|t| name_tokens.contains(&t))
}

/// Produces the ordered, capped list of titles to query for `entity_name`.
///
/// Titles are normalized, filtered and deduplicated (first occurrence wins). Any surviving
/// title that also appears in `preferred` moves to the front, keeping relative order within
/// each group. At most `limit` titles are returned.
pub fn select_candidates(
    entity_name: &str,
    titles: &[String],
    preferred: &[String],
    filter: CandidateFilter,
    limit: usize,
) -> Vec<String> {
    let mut filtered: Vec<String> = Vec::new();
    for title in titles {
        let normalized = normalize_title(title);
        if normalized.is_empty() || !filter.accepts(entity_name, &normalized) {
            continue;
        }
        if !filtered.iter().any(|t| t.eq_ignore_ascii_case(&normalized)) {
            filtered.push(normalized);
        }
    }

    let is_preferred = |title: &String| preferred.iter().any(|p| p.eq_ignore_ascii_case(title));
    let (mut ordered, rest): (Vec<String>, Vec<String>) =
        filtered.into_iter().partition(is_preferred);
    ordered.extend(rest);
    ordered.truncate(limit);
    ordered
}
