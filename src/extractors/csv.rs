// src/extractors/csv.rs
use crate::extractors::{Document, Extraction};
use crate::severity::{labels_for, normalize, tally, CountKind, CountMap};
use crate::utils::error::ExtractError;
use std::path::Path;

pub const SEVERITY_FIELD: &str = "Severity";
pub const ISSUE_COUNTERS_MARKER: &str = "Issue Counters:";

// --- Row-keyed reports ---

/// Raw `Severity` values, one per row that has a `Severity` cell. Ragged rows still
/// count when the cell is there; rows without it, or that the reader rejects, are
/// reported and skipped.
fn severity_values(text: &str, path: &Path, warnings: &mut Vec<ExtractError>) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let column = match reader.headers() {
        Ok(headers) => headers.iter().position(|h| h.trim() == SEVERITY_FIELD),
        Err(e) => {
            warnings.push(ExtractError::malformed(path, "header row", e));
            return Vec::new();
        }
    };
    let Some(column) = column else {
        tracing::info!("No '{}' column in {}", SEVERITY_FIELD, path.display());
        return Vec::new();
    };

    let mut values = Vec::new();
    for (i, record) in reader.records().enumerate() {
        match record {
            Ok(record) => match record.get(column) {
                Some(value) => values.push(value.to_string()),
                None => {
                    let location = row_location(record.position(), i);
                    let reason = format!("row has {} field(s), no '{}' cell", record.len(), SEVERITY_FIELD);
                    let warning = ExtractError::malformed(path, location, reason);
                    tracing::warn!("Skipping row: {}", warning);
                    warnings.push(warning);
                }
            },
            Err(e) => {
                let warning = ExtractError::malformed(path, row_location(e.position(), i), e);
                tracing::warn!("Skipping row: {}", warning);
                warnings.push(warning);
            }
        }
    }
    values
}

fn row_location(position: Option<&csv::Position>, index: usize) -> String {
    match position {
        Some(pos) => format!("line {}", pos.line()),
        None => format!("record {}", index + 1),
    }
}

/// Rows per vulnerability severity. Values are case-normalized ("high" -> "High");
/// anything outside the taxonomy is dropped.
pub fn count_by_severity(doc: &Document) -> Extraction {
    let labels = labels_for(CountKind::Vulnerability);
    let mut warnings = Vec::new();
    let values = severity_values(&doc.text(), doc.path(), &mut warnings);

    let recognized = values
        .iter()
        .filter_map(|value| normalize(CountKind::Vulnerability, value));
    let counts = tally(recognized, labels);
    tracing::debug!("Counted {} of {} severity value(s) in {}", counts.total(), values.len(), doc.path().display());

    Extraction {
        counts,
        section: None,
        warnings,
    }
}

/// Rows per literal (trimmed) `Severity` value, in first-seen order. Nothing is
/// filtered, so scanner-specific labels survive.
pub fn severity_breakdown(doc: &Document) -> Extraction {
    let mut warnings = Vec::new();
    let mut counts = CountMap::new();
    for value in severity_values(&doc.text(), doc.path(), &mut warnings) {
        let value = value.trim();
        if !value.is_empty() {
            counts.add(value, 1);
        }
    }

    Extraction {
        counts,
        section: None,
        warnings,
    }
}

// --- Counters block ---

fn split_row(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record
            .iter()
            .map(|field| field.trim().trim_matches('"').to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// Reads the "Issue Counters:" block: the next line is a header row, the one after
/// it the values. Only labels named in the header are reported, in header order.
/// Only the first block is read.
pub fn count_issue_counters_in(text: &str, path: &Path) -> (CountMap, Vec<ExtractError>) {
    let mut counts = CountMap::new();
    let mut warnings = Vec::new();

    let lines: Vec<&str> = text.lines().collect();
    let Some(marker_at) = lines
        .iter()
        .position(|line| line.trim().starts_with(ISSUE_COUNTERS_MARKER))
    else {
        tracing::info!("No '{}' block in {}", ISSUE_COUNTERS_MARKER, path.display());
        return (counts, warnings);
    };
    tracing::debug!("Found '{}' on line {}", ISSUE_COUNTERS_MARKER, marker_at + 1);

    let (Some(header_line), Some(value_line)) = (lines.get(marker_at + 1), lines.get(marker_at + 2)) else {
        let warning = ExtractError::malformed(path, format!("line {}", marker_at + 1), "counters block has no header and value rows");
        tracing::warn!("{}", warning);
        warnings.push(warning);
        return (counts, warnings);
    };
    let header = split_row(header_line);
    let values = split_row(value_line);
    let value_line_no = marker_at + 3;

    for (idx, name) in header.iter().enumerate() {
        let Some(label) = normalize(CountKind::IssueCounters, name) else {
            continue;
        };
        if counts.contains(label) {
            continue;
        }
        let parsed = match values.get(idx) {
            Some(value) => value
                .parse::<u64>()
                .map_err(|e| format!("'{}' for {} is not a count: {}", value, label, e)),
            None => Err(format!(
                "no value for {} (header has {} columns, values have {})",
                label,
                header.len(),
                values.len()
            )),
        };
        match parsed {
            Ok(n) => counts.set(label, n),
            Err(reason) => {
                let warning = ExtractError::malformed(path, format!("line {}", value_line_no), reason);
                tracing::warn!("Omitting label: {}", warning);
                warnings.push(warning);
            }
        }
    }
    (counts, warnings)
}

pub fn count_issue_counters(doc: &Document) -> Extraction {
    let (counts, warnings) = count_issue_counters_in(&doc.text(), doc.path());
    Extraction {
        counts,
        section: None,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::SourceFormat;

    fn csv_doc(text: &str) -> Document {
        Document::from_text(SourceFormat::Csv, text)
    }

    fn entries(counts: &CountMap) -> Vec<(String, u64)> {
        counts.iter().map(|(l, c)| (l.to_string(), c)).collect()
    }

    #[test]
    fn test_severity_is_case_normalized() {
        let doc = csv_doc("Id,Severity,Title\n1,high,a\n2,High,b\n3,CRITICAL,c\n4,Banana,d\n5,,e\n");
        let result = count_by_severity(&doc);
        assert_eq!(
            result.counts.iter().collect::<Vec<_>>(),
            vec![("Critical", 1), ("High", 2), ("Medium", 0), ("Low", 0), ("Informational", 0)]
        );
        assert!(result.counts.get("Banana").is_none());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_quoted_fields() {
        let doc = csv_doc("Title,Severity\n\"Injection, SQL\",Medium\n\"XSS\",\"low\"\n");
        let counts = count_by_severity(&doc).counts;
        assert_eq!(counts.get("Medium"), Some(1));
        assert_eq!(counts.get("Low"), Some(1));
    }

    #[test]
    fn test_row_without_severity_cell_is_skipped() {
        let doc = csv_doc("Id,Title,Severity\n1,a,High\n2,b\n3,c,Critical\n");
        let result = count_by_severity(&doc);
        assert_eq!(result.counts.get("High"), Some(1));
        assert_eq!(result.counts.get("Critical"), Some(1));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].to_string().contains("line 3"));
    }

    #[test]
    fn test_ragged_rows_with_severity_still_count() {
        let doc = csv_doc("Id,Severity,Title\n1,High,a,\n2,Critical\n3,Low,c\n");
        let result = count_by_severity(&doc);
        assert_eq!(
            result.counts.iter().collect::<Vec<_>>(),
            vec![("Critical", 1), ("High", 1), ("Medium", 0), ("Low", 1), ("Informational", 0)]
        );
        assert!(result.warnings.is_empty());

        let breakdown = severity_breakdown(&doc);
        assert_eq!(entries(&breakdown.counts), vec![
            ("High".to_string(), 1),
            ("Critical".to_string(), 1),
            ("Low".to_string(), 1),
        ]);
        assert!(breakdown.warnings.is_empty());
    }

    #[test]
    fn test_padded_severity_values_are_trimmed() {
        let doc = csv_doc("Severity,Id\n High ,1\n\tlow,2\n");
        let counts = count_by_severity(&doc).counts;
        assert_eq!(counts.get("High"), Some(1));
        assert_eq!(counts.get("Low"), Some(1));
    }

    #[test]
    fn test_missing_severity_column() {
        let doc = csv_doc("Id,Title\n1,a\n");
        let result = count_by_severity(&doc);
        assert_eq!(result.counts.len(), 5);
        assert_eq!(result.counts.total(), 0);
        assert!(severity_breakdown(&doc).counts.is_empty());
    }

    #[test]
    fn test_breakdown_keeps_literal_values() {
        let doc = csv_doc("Severity\nHigh\n Warning \nhigh\nHigh\n\n");
        let result = severity_breakdown(&doc);
        assert_eq!(entries(&result.counts), vec![
            ("High".to_string(), 2),
            ("Warning".to_string(), 1),
            ("high".to_string(), 1),
        ]);
    }

    #[test]
    fn test_counters_block() {
        let text = "Scan Summary:\nProject,demo\n\nIssue Counters:\nCritical Issues,High Issues\n3,7\n";
        let (counts, warnings) = count_issue_counters_in(text, Path::new("r.csv"));
        assert_eq!(entries(&counts), vec![("Critical Issues".to_string(), 3), ("High Issues".to_string(), 7)]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_counters_follow_header_order_and_strip_quotes() {
        let text = "  Issue Counters:  \n\"Total\",\"Low Issues\",\"Critical Issues\",Other\n\"12\",\"9\",\"3\",x\n";
        let (counts, _) = count_issue_counters_in(text, Path::new("r.csv"));
        assert_eq!(entries(&counts), vec![("Low Issues".to_string(), 9), ("Critical Issues".to_string(), 3)]);
    }

    #[test]
    fn test_counters_bad_values_are_omitted() {
        let text = "Issue Counters:\nCritical Issues,High Issues,Low Issues\nn/a,4\n";
        let (counts, warnings) = count_issue_counters_in(text, Path::new("r.csv"));
        assert_eq!(entries(&counts), vec![("High Issues".to_string(), 4)]);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| matches!(w, ExtractError::MalformedStructure { .. })));
    }

    #[test]
    fn test_only_first_counters_block_is_read() {
        let text = "Issue Counters:\nHigh Issues\n1\nIssue Counters:\nHigh Issues,Medium Issues\n5,6\n";
        let (counts, _) = count_issue_counters_in(text, Path::new("r.csv"));
        assert_eq!(entries(&counts), vec![("High Issues".to_string(), 1)]);
    }

    #[test]
    fn test_truncated_counters_block() {
        let (counts, warnings) = count_issue_counters_in("Issue Counters:\nHigh Issues\n", Path::new("r.csv"));
        assert!(counts.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_counters_marker_missing() {
        let result = count_issue_counters(&csv_doc("Severity\nHigh\n"));
        assert!(result.counts.is_empty());
        assert!(result.warnings.is_empty());
    }
}
