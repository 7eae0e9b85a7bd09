// src/lib.rs
//! Severity-count extraction from security-scan report exports.
//!
//! A report is loaded into a [`Document`](extractors::Document) once, then one of the
//! format extractors locates the section of interest and turns it into a
//! [`CountMap`](severity::CountMap) of label -> count.
pub mod extractors;
pub mod report;
pub mod severity;
pub mod storage;
pub mod utils;

pub use extractors::{extract, extract_path, Document, ExtractOptions, Extraction};
pub use report::{ReportFormat, ReportKind};
pub use severity::{CountMap, MatchMode};
pub use utils::error::ExtractError;
