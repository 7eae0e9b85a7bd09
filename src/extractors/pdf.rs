// src/extractors/pdf.rs
use crate::extractors::section::{locate_in_pages, Boundary, Section};
use crate::extractors::{Document, ExtractOptions, Extraction, FIX_GROUPS_MARKER};
use crate::severity::{count_labels, labels_for, CountKind, CountMap};

/// Section following "Issues - By Fix Groups:" across the document's pages.
///
/// The remainder of the marker page is taken whole; only later pages are checked
/// for an uppercase heading line that ends the section.
pub fn fix_group_section(pages: &[String]) -> Option<Section> {
    locate_in_pages(pages.iter().map(String::as_str), FIX_GROUPS_MARKER, Boundary::PdfHeadingLine, false)
}

/// Counts Critical/High/Medium/Low inside the PDF fix-group section.
pub fn count_fix_groups(doc: &Document, options: &ExtractOptions) -> Extraction {
    let labels = labels_for(CountKind::FixGroupPdf);
    let section = fix_group_section(doc.pages());

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
        warnings: doc.load_warnings().to_vec(),
    }
}
