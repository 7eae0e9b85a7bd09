// src/extractors/mod.rs
pub mod csv;
pub mod document;
pub mod html;
pub mod pdf;
pub mod section;

// Re-export key extraction types for convenience
pub use document::{Content, Document, SourceFormat};
pub use section::{locate, Boundary, LocatorState, Section, SectionEnd, SectionLocator};

use crate::report::ReportFormat;
use crate::severity::{CountMap, MatchMode};
use crate::utils::error::ExtractError;
use std::path::Path;

/// Heading that opens the fix-group section in PDF and HTML reports.
pub const FIX_GROUPS_MARKER: &str = "Issues - By Fix Groups:";
/// Heading that opens the license risk table in SCA license reports.
pub const LICENSE_TYPES_MARKER: &str = "Total Open Source License Types:";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub match_mode: MatchMode,
}

/// Result of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub counts: CountMap,
    /// The located section, for extractors that bound one.
    pub section: Option<Section>,
    /// Problems that were recovered from by skipping a page, row or label.
    pub warnings: Vec<ExtractError>,
}

/// Runs the extractor for `format` over an already-loaded document.
pub fn extract(doc: &Document, format: ReportFormat, options: &ExtractOptions) -> Extraction {
    let extraction = match format {
        ReportFormat::Pdf => pdf::count_fix_groups(doc, options),
        ReportFormat::HtmlFixGroups => html::count_fix_groups(doc, options),
        ReportFormat::HtmlLicense => html::count_license_risks(doc),
        ReportFormat::CsvSeverity => csv::count_by_severity(doc),
        ReportFormat::CsvBreakdown => csv::severity_breakdown(doc),
        ReportFormat::CsvCounters => csv::count_issue_counters(doc),
    };
    tracing::info!(
        "Extracted {} label(s), {} total, {} warning(s) from {} as {:?}",
        extraction.counts.len(),
        extraction.counts.total(),
        extraction.warnings.len(),
        doc.path().display(),
        format
    );
    extraction
}

/// Loads `path` for `format` and extracts its counts. Only an unreadable source fails.
pub fn extract_path(path: impl AsRef<Path>, format: ReportFormat, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    let doc = Document::load(path, format.source_format())?;
    Ok(extract(&doc, format, options))
}
