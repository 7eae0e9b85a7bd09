// src/extractors/document.rs
use crate::utils::error::ExtractError;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// How a source file is read before extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Flattened per-page text.
    Pdf,
    Html,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Pages(Vec<String>),
    Text(String),
}

/// A loaded report. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    format: SourceFormat,
    content: Content,
    // Per-page problems hit while loading (e.g. a page whose text could not be decoded).
    load_warnings: Vec<ExtractError>,
}

impl Document {
    /// Reads `path` as `format`. The file is opened and released within this call.
    pub fn load(path: impl AsRef<Path>, format: SourceFormat) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        tracing::info!("Loading {:?} document from {}", format, path.display());
        match format {
            SourceFormat::Pdf => {
                let (pages, load_warnings) = load_pdf_pages(path)?;
                tracing::debug!("Read {} page(s) from {}", pages.len(), path.display());
                Ok(Self {
                    path: path.to_path_buf(),
                    format,
                    content: Content::Pages(pages),
                    load_warnings,
                })
            }
            SourceFormat::Html | SourceFormat::Csv => {
                let text = load_text(path)?;
                tracing::debug!("Read {} bytes from {}", text.len(), path.display());
                Ok(Self {
                    path: path.to_path_buf(),
                    format,
                    content: Content::Text(text),
                    load_warnings: Vec::new(),
                })
            }
        }
    }

    /// Builds a PDF document from already-flattened page texts.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: PathBuf::from("<memory>"),
            format: SourceFormat::Pdf,
            content: Content::Pages(pages.into_iter().map(Into::into).collect()),
            load_warnings: Vec::new(),
        }
    }

    /// Builds an HTML or CSV document from text already in memory.
    pub fn from_text(format: SourceFormat, text: impl Into<String>) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            format,
            content: Content::Text(text.into()),
            load_warnings: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn load_warnings(&self) -> &[ExtractError] {
        &self.load_warnings
    }

    /// Page texts in order. A text document is a single page.
    pub fn pages(&self) -> &[String] {
        match &self.content {
            Content::Pages(pages) => pages,
            Content::Text(text) => std::slice::from_ref(text),
        }
    }

    /// The whole document as one string. Pages are concatenated without separators.
    pub fn text(&self) -> Cow<'_, str> {
        match &self.content {
            Content::Pages(pages) => Cow::Owned(pages.concat()),
            Content::Text(text) => Cow::Borrowed(text),
        }
    }
}

fn load_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).map_err(|e| ExtractError::unreadable(path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| ExtractError::unreadable(path, format!("not valid UTF-8: {}", e)))?;
    // Spreadsheet exports often lead with a byte-order mark.
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

fn load_pdf_pages(path: &Path) -> Result<(Vec<String>, Vec<ExtractError>), ExtractError> {
    let doc = lopdf::Document::load(path).map_err(|e| ExtractError::unreadable(path, e))?;

    let mut pages = Vec::new();
    let mut warnings = Vec::new();
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(text) => pages.push(text),
            Err(e) => {
                let warning = ExtractError::malformed(path, format!("page {}", page_number), format!("text extraction failed: {}", e));
                tracing::warn!("{}", warning);
                warnings.push(warning);
                // Keep page numbering aligned; an empty page is skipped by the locator.
                pages.push(String::new());
            }
        }
    }
    Ok((pages, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = Document::load("/definitely/not/here.html", SourceFormat::Html).unwrap_err();
        assert!(matches!(err, ExtractError::UnreadableSource { .. }));
    }

    #[test]
    fn test_non_pdf_is_unreadable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf").unwrap();
        let err = Document::load(file.path(), SourceFormat::Pdf).unwrap_err();
        assert!(matches!(err, ExtractError::UnreadableSource { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x41]).unwrap();
        let err = Document::load(file.path(), SourceFormat::Csv).unwrap_err();
        assert!(matches!(err, ExtractError::UnreadableSource { .. }));
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("\u{feff}Severity\nHigh\n".as_bytes()).unwrap();
        let doc = Document::load(file.path(), SourceFormat::Csv).unwrap();
        assert_eq!(doc.text(), "Severity\nHigh\n");
        assert_eq!(doc.path(), file.path());
    }

    #[test]
    fn test_pages_and_text_views() {
        let doc = Document::from_pages(["one ", "two"]);
        assert_eq!(doc.pages().len(), 2);
        assert_eq!(doc.text(), "one two");

        let doc = Document::from_text(SourceFormat::Html, "<p>x</p>");
        assert_eq!(doc.pages(), &["<p>x</p>".to_string()]);
    }
}
