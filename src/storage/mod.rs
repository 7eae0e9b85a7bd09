// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::{Extraction, Section};
use crate::report::ReportFormat;
use crate::utils::error::StorageError;
use std::io::Write;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Output path for `source` with the given suffix, e.g. `scan_counts.json` for `scan.pdf`
    pub fn output_path(&self, source: &Path, suffix: &str) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        self.base_dir.join(format!("{}_{}", stem, suffix))
    }

    /// Saves the located section text to a file
    pub fn save_section(&self, source: &Path, section: &Section) -> Result<PathBuf, StorageError> {
        let file_path = self.output_path(source, "section.txt");

        let mut file = fs::File::create(&file_path)
            .map_err(StorageError::IoError)?;

        file.write_all(section.text.as_bytes())
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved section to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves the counts and recovered problems of one extraction in JSON format
    pub fn save_summary(&self, source: &Path, format: ReportFormat, extraction: &Extraction) -> Result<PathBuf, StorageError> {
        let file_path = self.output_path(source, "counts.json");

        let warnings: Vec<String> = extraction.warnings.iter().map(ToString::to_string).collect();
        let summary = serde_json::json!({
            "source": source.display().to_string(),
            "format": format,
            "title": format.title(),
            "counts": extraction.counts,
            "total": extraction.counts.total(),
            "section_found": extraction.section.is_some(),
            "warnings": warnings,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let summary_str = serde_json::to_string_pretty(&summary)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, summary_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved summary to {}", file_path.display());

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{extract, Document, ExtractOptions};

    #[test]
    fn test_summary_round_trips_counts() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();
        let doc = Document::from_pages(["Issues - By Fix Groups: High Low Low"]);
        let extraction = extract(&doc, ReportFormat::Pdf, &ExtractOptions::default());

        let path = storage.save_summary(Path::new("/reports/scan.pdf"), ReportFormat::Pdf, &extraction).unwrap();
        assert_eq!(path, dir.path().join("out").join("scan_counts.json"));

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["format"], "pdf");
        assert_eq!(json["counts"]["Low"], 2);
        assert_eq!(json["counts"]["Critical"], 0);
        assert_eq!(json["total"], 3);
        assert_eq!(json["section_found"], true);
    }

    #[test]
    fn test_section_is_saved_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let doc = Document::from_pages(["Issues - By Fix Groups: Medium"]);
        let section = extract(&doc, ReportFormat::Pdf, &ExtractOptions::default()).section.unwrap();

        let path = storage.save_section(Path::new("scan.pdf"), &section).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), " Medium");
    }
}
