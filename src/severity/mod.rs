// src/severity/mod.rs
pub mod count_map;
pub mod counter;
pub mod taxonomy;

// Re-export key severity types for convenience
pub use count_map::CountMap;
pub use counter::{count_labels, count_occurrences, tally, MatchMode};
pub use taxonomy::{labels_for, normalize, CountKind, LicenseRisk, Severity};
