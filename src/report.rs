// src/report.rs
use crate::extractors::SourceFormat;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which extractor to run over a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// PDF: severities inside "Issues - By Fix Groups:".
    Pdf,
    /// HTML: severities inside "Issues - By Fix Groups:".
    HtmlFixGroups,
    /// HTML: license risk table after "Total Open Source License Types:".
    HtmlLicense,
    /// CSV with a `Severity` column, counted against the vulnerability taxonomy.
    CsvSeverity,
    /// CSV with a `Severity` column, counted by literal value.
    CsvBreakdown,
    /// CSV holding an "Issue Counters:" block.
    CsvCounters,
}

impl ReportFormat {
    pub fn source_format(self) -> SourceFormat {
        match self {
            ReportFormat::Pdf => SourceFormat::Pdf,
            ReportFormat::HtmlFixGroups | ReportFormat::HtmlLicense => SourceFormat::Html,
            ReportFormat::CsvSeverity | ReportFormat::CsvBreakdown | ReportFormat::CsvCounters => SourceFormat::Csv,
        }
    }

    /// Heading shown above the counts.
    pub fn title(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "Vulnerability Counts (Issues - By Fix Groups)",
            ReportFormat::HtmlFixGroups => "SCA API Issues (By Fix Groups)",
            ReportFormat::HtmlLicense => "License Risk Counts (Total Open Source License Types)",
            ReportFormat::CsvSeverity => "Issue Counts (CSV Severity)",
            ReportFormat::CsvBreakdown => "Severity Breakdown (CSV)",
            ReportFormat::CsvCounters => "Issue Counts (CSV Summary)",
        }
    }

    /// Message shown instead of the counts when an extractor found nothing to count.
    pub fn empty_message(self) -> &'static str {
        match self {
            ReportFormat::HtmlLicense => "No risk data found in the selected HTML file.",
            ReportFormat::CsvCounters => "No issue counters found in the selected CSV file.",
            ReportFormat::CsvBreakdown => "No severity values found in the selected CSV file.",
            // Text-derived and taxonomy-filtered counts always list every label.
            ReportFormat::Pdf | ReportFormat::HtmlFixGroups | ReportFormat::CsvSeverity => "No issues found.",
        }
    }
}

/// Scanner report types, in the order operators pick them from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    ScaApiLicense,
    ScaApi,
    ScaUiLicense,
    ScaUi,
    SastApi,
    SastUi,
    Dast,
}

impl ReportKind {
    pub const ALL: [ReportKind; 7] = [
        ReportKind::ScaApiLicense,
        ReportKind::ScaApi,
        ReportKind::ScaUiLicense,
        ReportKind::ScaUi,
        ReportKind::SastApi,
        ReportKind::SastUi,
        ReportKind::Dast,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ReportKind::ScaApiLicense => "SCA API License",
            ReportKind::ScaApi => "SCA API",
            ReportKind::ScaUiLicense => "SCA UI License",
            ReportKind::ScaUi => "SCA UI",
            ReportKind::SastApi => "SAST API",
            ReportKind::SastUi => "SAST UI",
            ReportKind::Dast => "DAST",
        }
    }

    /// License exports are HTML tables; every other scanner exports a CSV counters block.
    pub fn format(self) -> ReportFormat {
        match self {
            ReportKind::ScaApiLicense | ReportKind::ScaUiLicense => ReportFormat::HtmlLicense,
            ReportKind::ScaApi | ReportKind::ScaUi | ReportKind::SastApi | ReportKind::SastUi | ReportKind::Dast => {
                ReportFormat::CsvCounters
            }
        }
    }

    /// Numbered list of report types ("1. SCA API License" ...).
    pub fn menu() -> String {
        Self::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| format!("{}. {}", i + 1, kind.display_name()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReportKind(pub String);

impl fmt::Display for UnknownReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No functionality implemented for '{}' yet.", self.0)
    }
}

impl std::error::Error for UnknownReportKind {}

/// Accepts a menu number ("1".."7") or a case-insensitive display name
/// ("sast ui", "sast-ui").
impl FromStr for ReportKind {
    type Err = UnknownReportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let choice = raw.to_lowercase().replace(['-', '_'], " ");
        let found = match choice.parse::<usize>() {
            Ok(n) => n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied()),
            Err(_) => Self::ALL
                .into_iter()
                .find(|kind| kind.display_name().to_lowercase() == choice),
        };
        found.ok_or_else(|| UnknownReportKind(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choices_parse() {
        assert_eq!("1".parse::<ReportKind>(), Ok(ReportKind::ScaApiLicense));
        assert_eq!(" sast ui ".parse::<ReportKind>(), Ok(ReportKind::SastUi));
        assert_eq!("DAST".parse::<ReportKind>(), Ok(ReportKind::Dast));
        assert_eq!("sca-api-license".parse::<ReportKind>(), Ok(ReportKind::ScaApiLicense));
        assert!("0".parse::<ReportKind>().is_err());
        assert!("8".parse::<ReportKind>().is_err());
        assert_eq!(
            "iast".parse::<ReportKind>().unwrap_err().to_string(),
            "No functionality implemented for 'iast' yet."
        );
    }

    #[test]
    fn test_kinds_route_to_formats() {
        assert_eq!(ReportKind::ScaUiLicense.format(), ReportFormat::HtmlLicense);
        assert_eq!(ReportKind::SastApi.format(), ReportFormat::CsvCounters);
        assert_eq!(ReportKind::Dast.format().source_format(), SourceFormat::Csv);
    }

    #[test]
    fn test_menu_lists_every_kind() {
        let menu = ReportKind::menu();
        assert!(menu.starts_with("1. SCA API License\n2. SCA API"));
        assert!(menu.ends_with("7. DAST"));
    }
}
