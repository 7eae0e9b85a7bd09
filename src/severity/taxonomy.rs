// src/severity/taxonomy.rs
use serde::Serialize;

/// Vulnerability severities, in canonical ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Informational,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Informational,
    ];

    /// Scope counted in PDF fix-group sections. Informational never appears there.
    pub const FIX_GROUP_PDF: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Informational => "Informational",
        }
    }

    /// Column heading used for this severity in a CSV "Issue Counters:" block.
    pub const fn counter_heading(self) -> &'static str {
        match self {
            Severity::Critical => "Critical Issues",
            Severity::High => "High Issues",
            Severity::Medium => "Medium Issues",
            Severity::Low => "Low Issues",
            Severity::Informational => "Informational Issues",
        }
    }

    /// Maps a raw field value ("high", "HIGH", " High ") to its severity.
    pub fn normalize(token: &str) -> Option<Self> {
        let capitalized = capitalize(token.trim());
        Self::ALL.into_iter().find(|s| s.as_str() == capitalized)
    }

    pub fn from_counter_heading(heading: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.counter_heading() == heading)
    }
}

/// License risk categories reported by SCA license tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LicenseRisk {
    High,
    Medium,
    Low,
    None,
    Unknown,
}

impl LicenseRisk {
    pub const ALL: [LicenseRisk; 5] = [
        LicenseRisk::High,
        LicenseRisk::Medium,
        LicenseRisk::Low,
        LicenseRisk::None,
        LicenseRisk::Unknown,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LicenseRisk::High => "High",
            LicenseRisk::Medium => "Medium",
            LicenseRisk::Low => "Low",
            LicenseRisk::None => "None",
            LicenseRisk::Unknown => "Unknown",
        }
    }

    /// Exact (case-sensitive) match, as the license tables print their labels.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == label)
    }

    pub fn normalize(token: &str) -> Option<Self> {
        Self::from_label(&capitalize(token.trim()))
    }
}

/// Which label set a counting call works over. Label sets never mix within a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountKind {
    /// Critical..Low, as counted in PDF fix-group sections.
    FixGroupPdf,
    /// Critical..Informational.
    Vulnerability,
    LicenseRisk,
    /// "Critical Issues".."Informational Issues" counter-block headings.
    IssueCounters,
}

const FIX_GROUP_PDF_LABELS: [&str; 4] = [
    Severity::Critical.as_str(),
    Severity::High.as_str(),
    Severity::Medium.as_str(),
    Severity::Low.as_str(),
];

const VULNERABILITY_LABELS: [&str; 5] = [
    Severity::Critical.as_str(),
    Severity::High.as_str(),
    Severity::Medium.as_str(),
    Severity::Low.as_str(),
    Severity::Informational.as_str(),
];

const LICENSE_RISK_LABELS: [&str; 5] = [
    LicenseRisk::High.as_str(),
    LicenseRisk::Medium.as_str(),
    LicenseRisk::Low.as_str(),
    LicenseRisk::None.as_str(),
    LicenseRisk::Unknown.as_str(),
];

const ISSUE_COUNTER_LABELS: [&str; 5] = [
    Severity::Critical.counter_heading(),
    Severity::High.counter_heading(),
    Severity::Medium.counter_heading(),
    Severity::Low.counter_heading(),
    Severity::Informational.counter_heading(),
];

/// Fixed, ordered label sequence for a counting kind.
pub fn labels_for(kind: CountKind) -> &'static [&'static str] {
    match kind {
        CountKind::FixGroupPdf => &FIX_GROUP_PDF_LABELS,
        CountKind::Vulnerability => &VULNERABILITY_LABELS,
        CountKind::LicenseRisk => &LICENSE_RISK_LABELS,
        CountKind::IssueCounters => &ISSUE_COUNTER_LABELS,
    }
}

/// Canonical label for a raw token, or `None` when the token is not part of `kind`.
pub fn normalize(kind: CountKind, token: &str) -> Option<&'static str> {
    match kind {
        CountKind::FixGroupPdf => Severity::normalize(token)
            .filter(|s| Severity::FIX_GROUP_PDF.contains(s))
            .map(Severity::as_str),
        CountKind::Vulnerability => Severity::normalize(token).map(Severity::as_str),
        CountKind::LicenseRisk => LicenseRisk::normalize(token).map(LicenseRisk::as_str),
        CountKind::IssueCounters => {
            Severity::from_counter_heading(token.trim()).map(Severity::counter_heading)
        }
    }
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_case_insensitive() {
        assert_eq!(Severity::normalize("high"), Some(Severity::High));
        assert_eq!(Severity::normalize("CRITICAL"), Some(Severity::Critical));
        assert_eq!(Severity::normalize(" informational "), Some(Severity::Informational));
        assert_eq!(Severity::normalize("Banana"), None);
        assert_eq!(Severity::normalize(""), None);
    }

    #[test]
    fn test_normalize_trims_surrounding_whitespace() {
        assert_eq!(Severity::normalize(" High"), Some(Severity::High));
        assert_eq!(Severity::normalize("medium\t"), Some(Severity::Medium));
        assert_eq!(normalize(CountKind::Vulnerability, " low "), Some("Low"));
    }

    #[test]
    fn test_fix_group_scope_excludes_informational() {
        assert_eq!(normalize(CountKind::FixGroupPdf, "Informational"), None);
        assert_eq!(normalize(CountKind::Vulnerability, "informational"), Some("Informational"));
        assert_eq!(labels_for(CountKind::FixGroupPdf), &["Critical", "High", "Medium", "Low"]);
    }

    #[test]
    fn test_license_labels_are_exact() {
        assert_eq!(LicenseRisk::from_label("None"), Some(LicenseRisk::None));
        assert_eq!(LicenseRisk::from_label("none"), None);
        assert_eq!(LicenseRisk::normalize("none"), Some(LicenseRisk::None));
    }

    #[test]
    fn test_counter_headings() {
        assert_eq!(normalize(CountKind::IssueCounters, "High Issues"), Some("High Issues"));
        assert_eq!(normalize(CountKind::IssueCounters, "High"), None);
        assert_eq!(labels_for(CountKind::IssueCounters).len(), Severity::ALL.len());
    }
}
