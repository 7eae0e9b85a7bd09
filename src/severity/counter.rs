// src/severity/counter.rs
use crate::severity::CountMap;
use serde::Serialize;

/// How a label is matched inside a section of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Non-overlapping substring occurrences. "High" also matches inside "Highlights".
    #[default]
    Substring,
    /// Occurrences not flanked by a word character on either side.
    WordBoundary,
}

/// Number of non-overlapping occurrences of `label` in `section`.
pub fn count_occurrences(section: &str, label: &str, mode: MatchMode) -> u64 {
    if label.is_empty() {
        return 0;
    }
    let hits = section.match_indices(label);
    let count = match mode {
        MatchMode::Substring => hits.count(),
        MatchMode::WordBoundary => hits
            .filter(|(start, m)| {
                let before = section[..*start].chars().next_back();
                let after = section[start + m.len()..].chars().next();
                !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
            })
            .count(),
    };
    count as u64
}

/// Counts every label of a taxonomy inside a section. Every label is present in
/// the result, zero if it never occurs.
pub fn count_labels(section: &str, labels: &[&str], mode: MatchMode) -> CountMap {
    let mut counts = CountMap::with_labels(labels.iter().copied());
    for label in labels {
        counts.set(label, count_occurrences(section, label, mode));
    }
    counts
}

/// Counts structured values (one per row) that equal one of `labels`.
/// Values outside the label set contribute nothing.
pub fn tally<'a, I>(values: I, labels: &[&str]) -> CountMap
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = CountMap::with_labels(labels.iter().copied());
    for value in values {
        if labels.contains(&value) {
            counts.add(value, 1);
        }
    }
    counts
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_count_overcounts_inside_words() {
        let text = "High risk. Highlights: High";
        assert_eq!(count_occurrences(text, "High", MatchMode::Substring), 3);
        assert_eq!(count_occurrences(text, "High", MatchMode::WordBoundary), 2);
    }

    #[test]
    fn test_count_is_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa", MatchMode::Substring), 2);
    }

    #[test]
    fn test_count_labels_is_exhaustive() {
        let counts = count_labels("Critical Critical High", &["Critical", "High", "Medium", "Low"], MatchMode::Substring);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("Critical", 2), ("High", 1), ("Medium", 0), ("Low", 0)]);
    }

    #[test]
    fn test_word_boundary_at_text_edges() {
        assert_eq!(count_occurrences("Low", "Low", MatchMode::WordBoundary), 1);
        assert_eq!(count_occurrences("(Low)", "Low", MatchMode::WordBoundary), 1);
        assert_eq!(count_occurrences("Lower", "Low", MatchMode::WordBoundary), 0);
    }

    #[test]
    fn test_tally_drops_unknown_values() {
        let counts = tally(["High", "Banana", "High", "Low"], &["Critical", "High", "Low"]);
        assert_eq!(counts.get("High"), Some(2));
        assert_eq!(counts.get("Low"), Some(1));
        assert_eq!(counts.get("Critical"), Some(0));
        assert_eq!(counts.get("Banana"), None);
    }
}
