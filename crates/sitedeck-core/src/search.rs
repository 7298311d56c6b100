//! Fuzzy search over catalog entries
//!
//! Matching is approximate substring matching: a field matches when the query
//! can be aligned against some part of it with few enough edits. Where in the
//! field the match lands does not matter.
//!
//! Each call evaluates every entry from scratch; nothing is indexed or cached.
//! Catalogs are expected to hold hundreds of entries, not millions.

use crate::models::SiteEntry;

/// Tunables for [`search_with`]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Highest accepted normalized edit distance (0 = exact, 1 = anything)
    pub threshold: f64,
    pub title_weight: f64,
    pub description_weight: f64,
    pub tags_weight: f64,
    /// Minimum number of query characters that must line up with the field
    pub min_match_char_length: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            title_weight: 0.4,
            description_weight: 0.3,
            tags_weight: 0.3,
            min_match_char_length: 1,
        }
    }
}

/// A matching entry with its relevance score (lower is better)
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub entry: &'a SiteEntry,
    pub score: f64,
}

/// Search entries with the default options
///
/// A blank query returns every entry in its original order.
pub fn search<'a>(query: &str, entries: &'a [SiteEntry]) -> Vec<&'a SiteEntry> {
    search_with(query, entries, &SearchOptions::default())
}

/// Search entries with explicit options
pub fn search_with<'a>(
    query: &str,
    entries: &'a [SiteEntry],
    options: &SearchOptions,
) -> Vec<&'a SiteEntry> {
    if query.trim().is_empty() {
        return entries.iter().collect();
    }
    search_scored(query, entries, options)
        .into_iter()
        .map(|hit| hit.entry)
        .collect()
}

/// Search and keep the scores, most relevant first
///
/// A blank query yields no hits; callers wanting passthrough use [`search`].
pub fn search_scored<'a>(
    query: &str,
    entries: &'a [SiteEntry],
    options: &SearchOptions,
) -> Vec<SearchHit<'a>> {
    let pattern: Vec<char> = query.trim().to_lowercase().chars().collect();
    if pattern.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a>> = entries
        .iter()
        .filter_map(|entry| {
            score_entry(&pattern, entry, options).map(|score| SearchHit { entry, score })
        })
        .collect();

    // Stable: equal scores keep catalog order
    hits.sort_by(|a, b| a.score.total_cmp(&b.score));
    hits
}

/// Combined score for an entry, or `None` when no field matches
fn score_entry(pattern: &[char], entry: &SiteEntry, options: &SearchOptions) -> Option<f64> {
    let mut total = 1.0;
    let mut matched = false;

    let mut apply = |field_score: Option<(f64, f64)>, weight: f64| {
        if let Some((score, norm)) = field_score {
            let base = if score == 0.0 { f64::EPSILON } else { score };
            total *= base.powf(weight * norm);
            matched = true;
        }
    };

    apply(
        score_field(pattern, &entry.title, options),
        options.title_weight,
    );
    apply(
        score_field(pattern, &entry.description, options),
        options.description_weight,
    );
    let best_tag = entry
        .tags
        .iter()
        .filter_map(|tag| score_field(pattern, tag, options))
        .min_by(|a, b| a.0.total_cmp(&b.0));
    apply(best_tag, options.tags_weight);

    matched.then_some(total)
}

/// Normalized distance and field-length norm when the field matches
fn score_field(pattern: &[char], value: &str, options: &SearchOptions) -> Option<(f64, f64)> {
    if value.is_empty() {
        return None;
    }
    let text: Vec<char> = value.to_lowercase().chars().collect();
    let errors = substring_distance(pattern, &text);

    let aligned = pattern.len().saturating_sub(errors);
    if aligned < options.min_match_char_length {
        return None;
    }

    let score = errors as f64 / pattern.len() as f64;
    if score > options.threshold {
        return None;
    }
    Some((score, field_norm(value)))
}

/// Fewest edits needed to turn `pattern` into any substring of `text`
fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    // row[j]: cost of matching the current pattern prefix ending at text[j - 1];
    // the first row is all zeros so a match may start anywhere.
    let mut row = vec![0usize; text.len() + 1];
    for (i, &p) in pattern.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &t) in text.iter().enumerate() {
            let substitute = diag + usize::from(p != t);
            let delete = row[j + 1] + 1;
            let insert = row[j] + 1;
            diag = row[j + 1];
            row[j + 1] = substitute.min(delete).min(insert);
        }
    }
    row.into_iter().min().unwrap_or(pattern.len())
}

/// Longer fields weigh less: 1 / sqrt(word count), to three decimals
fn field_norm(value: &str) -> f64 {
    let words = value.split(' ').filter(|w| !w.is_empty()).count().max(1);
    (1000.0 / (words as f64).sqrt()).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<SiteEntry> {
        vec![
            SiteEntry::new(1, "Rust", "https://www.rust-lang.org")
                .with_description("A language empowering everyone")
                .with_tags(["language", "systems"]),
            SiteEntry::new(2, "Crates.io", "https://crates.io")
                .with_description("The Rust community's package registry")
                .with_tags(["packages"]),
            SiteEntry::new(3, "MDN", "https://developer.mozilla.org")
                .with_description("Resources for developers, by developers")
                .with_tags(["web", "docs"]),
            SiteEntry::new(4, "Docs.rs", "https://docs.rs")
                .with_description("Documentation host for crates")
                .with_tags(["docs"]),
        ]
    }

    fn ids(results: &[&SiteEntry]) -> Vec<i64> {
        results.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_empty_query_is_passthrough() {
        let entries = entries();
        assert_eq!(ids(&search("", &entries)), vec![1, 2, 3, 4]);
        assert_eq!(ids(&search("   \t", &entries)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_entries() {
        assert!(search("rust", &[]).is_empty());
        assert!(search("", &[]).is_empty());
    }

    #[test]
    fn test_exact_title_is_found() {
        let entries = entries();
        for entry in &entries {
            let results = search(&entry.title, &entries);
            assert!(
                results.iter().any(|e| e.id == entry.id),
                "{} not found",
                entry.title
            );
        }
    }

    #[test]
    fn test_title_match_ranks_first() {
        let entries = entries();
        let results = search("rust", &entries);
        assert_eq!(results.first().map(|e| e.id), Some(1));
        // Crates.io mentions Rust in its description
        assert!(ids(&results).contains(&2));
    }

    #[test]
    fn test_case_insensitive() {
        let entries = entries();
        assert_eq!(search("MDN", &entries)[0].id, 3);
        assert_eq!(search("mdn", &entries)[0].id, 3);
    }

    #[test]
    fn test_tolerates_typos() {
        let entries = entries();
        let results = search("pakcages", &entries);
        assert_eq!(ids(&results), vec![2]);
    }

    #[test]
    fn test_unrelated_query_matches_nothing() {
        let entries = entries();
        assert!(search("zzzzqqqq", &entries).is_empty());
    }

    #[test]
    fn test_tags_matched_as_tokens() {
        let entries = entries();
        let results = search("web", &entries);
        assert!(ids(&results).contains(&3));
        // "docs" is a whole tag on two entries; both match
        let results = search("docs", &entries);
        assert!(ids(&results).contains(&3));
        assert!(ids(&results).contains(&4));
    }

    #[test]
    fn test_threshold_zero_requires_exact_substring() {
        let entries = entries();
        let strict = SearchOptions {
            threshold: 0.0,
            ..SearchOptions::default()
        };
        assert!(search_with("pakcages", &entries, &strict).is_empty());
        assert_eq!(ids(&search_with("registry", &entries, &strict)), vec![2]);
    }

    #[test]
    fn test_scores_are_ascending() {
        let entries = entries();
        let hits = search_scored("docs", &entries, &SearchOptions::default());
        assert!(!hits.is_empty());
        for pair in hits.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
    }

    #[test]
    fn test_substring_distance() {
        let p: Vec<char> = "rust".chars().collect();
        let t: Vec<char> = "trusty".chars().collect();
        assert_eq!(substring_distance(&p, &t), 0);

        let t: Vec<char> = "rsut".chars().collect();
        assert_eq!(substring_distance(&p, &t), 2);

        let t: Vec<char> = Vec::new();
        assert_eq!(substring_distance(&p, &t), 4);
    }

    #[test]
    fn test_field_norm() {
        assert_eq!(field_norm("one"), 1.0);
        assert_eq!(field_norm("one two three four"), 0.5);
        assert_eq!(field_norm(""), 1.0);
    }
}
