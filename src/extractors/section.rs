// src/extractors/section.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns for Section Boundaries (Lazy Static) ---
// A line starting with an uppercase run followed by a colon, e.g. "APPENDIX:" or "FIX GROUP DETAILS:"
pub const PDF_HEADING_PATTERN: &str = r"(?m)^[A-Z][A-Z\s\-]+:";

// A closing heading tag whose content ends in a colon, e.g. "<h2>Issues - By Component:</h2>"
pub const HTML_HEADING_PATTERN: &str = r"<h[1-6][^>]*>.*:</h[1-6]>";

static PDF_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(PDF_HEADING_PATTERN).expect("Failed to compile PDF_HEADING_RE")
});

static HTML_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(HTML_HEADING_PATTERN).expect("Failed to compile HTML_HEADING_RE")
});

// --- Data Structures ---

/// What ends a section once its start marker has been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Uppercase heading line in flattened PDF page text.
    PdfHeadingLine,
    /// Closing `<h1>`..`<h6>` heading ending in a colon.
    HtmlClosingHeading,
    /// The section always runs to end of document.
    EndOfDocument,
}

impl Boundary {
    /// Byte offset of the first boundary match in `text`.
    pub fn find(self, text: &str) -> Option<usize> {
        match self {
            Boundary::PdfHeadingLine => PDF_HEADING_RE.find(text).map(|m| m.start()),
            Boundary::HtmlClosingHeading => HTML_HEADING_RE.find(text).map(|m| m.start()),
            Boundary::EndOfDocument => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEnd {
    /// Cut at a boundary match on page `page`.
    Boundary { page: usize },
    EndOfDocument,
}

/// A contiguous span of the concatenated document text that follows a start marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub marker: String,
    /// Section text, marker excluded.
    pub text: String,
    /// Page (0-based) on which the marker was found.
    pub start_page: usize,
    /// Offset in the concatenated page text right after the marker.
    pub start_offset: usize,
    /// Offset in the concatenated page text where the section stops. Always >= `start_offset`.
    pub end_offset: usize,
    pub end: SectionEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorState {
    SearchingForStart,
    Accumulating,
    Done,
}

/// Incremental section locator, fed one page (or one whole blob) at a time.
///
/// Boundaries are only looked for once the marker has been seen, so heading-shaped
/// text ahead of the marker never ends a section.
#[derive(Debug, Clone)]
pub struct SectionLocator<'m> {
    marker: &'m str,
    boundary: Boundary,
    check_marker_page: bool,
    state: LocatorState,
    buffer: String,
    pages_fed: usize,
    consumed: usize,
    start_page: usize,
    start_offset: usize,
    end: SectionEnd,
}

impl<'m> SectionLocator<'m> {
    pub fn new(marker: &'m str, boundary: Boundary) -> Self {
        Self {
            marker,
            boundary,
            check_marker_page: true,
            state: LocatorState::SearchingForStart,
            buffer: String::new(),
            pages_fed: 0,
            consumed: 0,
            start_page: 0,
            start_offset: 0,
            end: SectionEnd::EndOfDocument,
        }
    }

    /// Whether the remainder of the page holding the marker is checked for a boundary.
    /// When off, the whole remainder is taken and only later pages can end the section.
    pub fn check_marker_page(mut self, check: bool) -> Self {
        self.check_marker_page = check;
        self
    }

    pub fn state(&self) -> LocatorState {
        self.state
    }

    /// Advances the locator by one page of text.
    pub fn feed(&mut self, page: &str) -> LocatorState {
        let page_index = self.pages_fed;
        let page_offset = self.consumed;
        self.pages_fed += 1;
        self.consumed += page.len();

        match self.state {
            LocatorState::SearchingForStart => {
                let Some(idx) = page.find(self.marker) else {
                    return self.state;
                };
                let rest_at = idx + self.marker.len();
                let rest = &page[rest_at..];
                tracing::debug!("Found marker '{}' on page {} at offset {}", self.marker, page_index, idx);

                self.state = LocatorState::Accumulating;
                self.start_page = page_index;
                self.start_offset = page_offset + rest_at;

                let cut = if self.check_marker_page { self.boundary.find(rest) } else { None };
                self.append(rest, cut, page_index);
            }
            LocatorState::Accumulating => {
                if page.is_empty() {
                    return self.state;
                }
                let cut = self.boundary.find(page);
                self.append(page, cut, page_index);
            }
            LocatorState::Done => {}
        }
        self.state
    }

    fn append(&mut self, text: &str, cut: Option<usize>, page_index: usize) {
        match cut {
            Some(pos) => {
                tracing::debug!("Section boundary found on page {} at offset {}", page_index, pos);
                self.buffer.push_str(&text[..pos]);
                self.end = SectionEnd::Boundary { page: page_index };
                self.state = LocatorState::Done;
            }
            None => self.buffer.push_str(text),
        }
    }

    /// The located section, or `None` when the marker never appeared.
    pub fn finish(self) -> Option<Section> {
        if self.state == LocatorState::SearchingForStart {
            tracing::debug!("Marker '{}' not found in {} page(s)", self.marker, self.pages_fed);
            return None;
        }
        // Skipped pages contribute nothing, so the end is measured by what was kept.
        let end_offset = self.start_offset + self.buffer.len();
        Some(Section {
            marker: self.marker.to_string(),
            text: self.buffer,
            start_page: self.start_page,
            start_offset: self.start_offset,
            end_offset,
            end: self.end,
        })
    }
}

/// Locates the section that starts after `marker` in a single blob of text.
pub fn locate(text: &str, marker: &str, boundary: Boundary) -> Option<Section> {
    let mut locator = SectionLocator::new(marker, boundary);
    locator.feed(text);
    locator.finish()
}

/// Locates a section across pages, feeding them in order.
pub fn locate_in_pages<'a, I>(pages: I, marker: &str, boundary: Boundary, check_marker_page: bool) -> Option<Section>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut locator = SectionLocator::new(marker, boundary).check_marker_page(check_marker_page);
    for page in pages {
        if locator.feed(page) == LocatorState::Done {
            break;
        }
    }
    locator.finish()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "Issues - By Fix Groups:";

    #[test]
    fn test_marker_absent() {
        assert!(locate("nothing to see", MARKER, Boundary::PdfHeadingLine).is_none());
        assert!(locate_in_pages(["a", "b"], MARKER, Boundary::PdfHeadingLine, false).is_none());
    }

    #[test]
    fn test_blob_cut_at_boundary() {
        let text = "Intro\nIssues - By Fix Groups:\nHigh High\nAPPENDIX:\nCritical";
        let section = locate(text, MARKER, Boundary::PdfHeadingLine).unwrap();
        assert_eq!(section.text, "\nHigh High\n");
        assert_eq!(section.end, SectionEnd::Boundary { page: 0 });
        assert_eq!(&text[section.start_offset..section.end_offset], section.text);
    }

    #[test]
    fn test_blob_without_boundary_runs_to_end() {
        let section = locate("x Issues - By Fix Groups: Low low", MARKER, Boundary::PdfHeadingLine).unwrap();
        assert_eq!(section.text, " Low low");
        assert_eq!(section.end, SectionEnd::EndOfDocument);
    }

    #[test]
    fn test_headings_before_marker_are_ignored() {
        let pages = ["SUMMARY:\nCritical", "Issues - By Fix Groups:\nHigh", "Medium\nNEXT PART:\nLow"];
        let section = locate_in_pages(pages, MARKER, Boundary::PdfHeadingLine, false).unwrap();
        assert_eq!(section.start_page, 1);
        assert_eq!(section.text, "\nHighMedium\n");
        assert_eq!(section.end, SectionEnd::Boundary { page: 2 });
    }

    #[test]
    fn test_marker_page_remainder_is_not_cut_when_unchecked() {
        let pages = ["Issues - By Fix Groups:\nHigh\nOTHER:\nLow"];
        let unchecked = locate_in_pages(pages, MARKER, Boundary::PdfHeadingLine, false).unwrap();
        assert_eq!(unchecked.text, "\nHigh\nOTHER:\nLow");
        let checked = locate_in_pages(pages, MARKER, Boundary::PdfHeadingLine, true).unwrap();
        assert_eq!(checked.text, "\nHigh\n");
    }

    #[test]
    fn test_marker_on_last_page() {
        let pages = ["Cover", "Body", "Issues - By Fix Groups: Critical tail"];
        let section = locate_in_pages(pages, MARKER, Boundary::PdfHeadingLine, false).unwrap();
        assert_eq!(section.text, " Critical tail");
        assert_eq!(section.start_page, 2);
        assert_eq!(section.end, SectionEnd::EndOfDocument);
    }

    #[test]
    fn test_empty_pages_are_skipped_while_accumulating() {
        let mut locator = SectionLocator::new(MARKER, Boundary::PdfHeadingLine).check_marker_page(false);
        assert_eq!(locator.feed(""), LocatorState::SearchingForStart);
        assert_eq!(locator.feed("Issues - By Fix Groups: High"), LocatorState::Accumulating);
        assert_eq!(locator.feed(""), LocatorState::Accumulating);
        assert_eq!(locator.feed("END:"), LocatorState::Done);
        assert_eq!(locator.feed("Critical"), LocatorState::Done);
        assert_eq!(locator.finish().unwrap().text, " High");
    }

    #[test]
    fn test_html_heading_boundary() {
        let html = "<h2>Issues - By Fix Groups:</h2><td>High</td><h2>Issues - By Component:</h2><td>Low</td>";
        let section = locate(html, MARKER, Boundary::HtmlClosingHeading).unwrap();
        assert_eq!(section.text, "</h2><td>High</td>");
    }

    #[test]
    fn test_end_of_document_boundary_never_cuts() {
        let section = locate("Issues - By Fix Groups:\nA:\n<h1>B:</h1>", MARKER, Boundary::EndOfDocument).unwrap();
        assert_eq!(section.text, "\nA:\n<h1>B:</h1>");
    }
}
