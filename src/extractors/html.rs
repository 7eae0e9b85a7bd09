// src/extractors/html.rs

// --- Imports ---
use crate::extractors::section::{locate, Boundary, Section};
use crate::extractors::{Document, ExtractOptions, Extraction, FIX_GROUPS_MARKER, LICENSE_TYPES_MARKER};
use crate::severity::{count_labels, labels_for, CountKind, CountMap, LicenseRisk};
use crate::utils::error::ExtractError;
use ego_tree::iter::Edge;
use scraper::{node::Node, Html};

// --- Fix groups ---

/// Section following "Issues - By Fix Groups:" up to the next closing heading ending in ':'.
pub fn fix_group_section(html: &str) -> Option<Section> {
    locate(html, FIX_GROUPS_MARKER, Boundary::HtmlClosingHeading)
}

/// Counts Critical..Informational inside the HTML fix-group section.
pub fn count_fix_groups(doc: &Document, options: &ExtractOptions) -> Extraction {
    let labels = labels_for(CountKind::Vulnerability);
    let html = doc.text();
    let section = fix_group_section(&html);

    let counts = match &section {
        Some(section) => count_labels(&section.text, labels, options.match_mode),
        None => {
            tracing::info!("No '{}' section in {}", FIX_GROUPS_MARKER, doc.path().display());
            CountMap::with_labels(labels.iter().copied())
        }
    };

    Extraction {
        counts,
        section,
        warnings: Vec::new(),
    }
}

// --- License risk table ---

/// Row-oriented state machine over the license risk table.
///
/// Inside a `<table>`, each `<tr>` is captured. The first risk label seen in a row
/// becomes pending; the next purely numeric text is added to that label and the
/// pending label is cleared, so a second number needs a fresh label before it counts.
/// Closing a row drops any pending label.
#[derive(Debug, Default)]
struct LicenseRiskWalker {
    in_table: bool,
    capturing: bool,
    pending: Option<LicenseRisk>,
    counts: CountMap,
    rejected: Vec<String>,
}

impl LicenseRiskWalker {
    fn start_tag(&mut self, name: &str) {
        if name == "table" {
            self.in_table = true;
        }
        if self.in_table && name == "tr" {
            self.capturing = true;
        }
    }

    fn end_tag(&mut self, name: &str) {
        if name == "table" {
            self.in_table = false;
        }
        if name == "tr" {
            self.capturing = false;
            self.pending = None;
        }
    }

    fn data(&mut self, text: &str) {
        if !(self.in_table && self.capturing) {
            return;
        }
        let text = text.trim();
        if let Some(risk) = LicenseRisk::from_label(text) {
            self.pending = Some(risk);
            return;
        }
        let Some(risk) = self.pending else {
            return;
        };
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return;
        }
        match text.parse::<u64>() {
            Ok(n) => {
                self.counts.add(risk.as_str(), n);
                self.pending = None;
            }
            Err(e) => self.rejected.push(format!("count '{}' for {}: {}", text, risk.as_str(), e)),
        }
    }

    /// Replays the parsed fragment as open/close/text events in document order.
    fn walk(&mut self, fragment: &str) {
        let html = Html::parse_fragment(fragment);
        for edge in html.tree.root().traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    Node::Element(element) => self.start_tag(element.name()),
                    Node::Text(text) => self.data(&text.text),
                    _ => {}
                },
                Edge::Close(node) => {
                    if let Node::Element(element) = node.value() {
                        self.end_tag(element.name());
                    }
                }
            }
        }
    }
}

/// Walks every table after "Total Open Source License Types:" to the end of the document.
/// Labels appear in the order they were first counted.
pub fn count_license_risks_in(html: &str) -> (Option<Section>, CountMap, Vec<String>) {
    let Some(section) = locate(html, LICENSE_TYPES_MARKER, Boundary::EndOfDocument) else {
        return (None, CountMap::new(), Vec::new());
    };
    let mut walker = LicenseRiskWalker::default();
    walker.walk(&section.text);
    (Some(section), walker.counts, walker.rejected)
}

pub fn count_license_risks(doc: &Document) -> Extraction {
    let html = doc.text();
    let (section, counts, rejected) = count_license_risks_in(&html);
    if section.is_none() {
        tracing::info!("No '{}' section in {}", LICENSE_TYPES_MARKER, doc.path().display());
    }

    let warnings = rejected
        .into_iter()
        .map(|reason| {
            let warning = ExtractError::malformed(doc.path(), "license risk table", reason);
            tracing::warn!("{}", warning);
            warning
        })
        .collect();

    Extraction {
        counts,
        section,
        warnings,
    }
}
