// src/main.rs
use clap::Parser;
use severity_extractor::extractors::{self, ExtractOptions, SourceFormat};
use severity_extractor::storage::StorageManager;
use severity_extractor::utils::{self, AppError};
use severity_extractor::{MatchMode, ReportFormat, ReportKind};
use std::path::PathBuf;

/// Command Line Interface for counting severities in security-scan reports
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report file to read
    path: PathBuf,

    /// Extractor to run (overrides --report)
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Scanner report type, by number or name: 1. SCA API License, 2. SCA API,
    /// 3. SCA UI License, 4. SCA UI, 5. SAST API, 6. SAST UI, 7. DAST
    #[arg(short, long)]
    report: Option<ReportKind>,

    /// Only count labels that stand alone as words ("High" does not match "Highlights")
    #[arg(long)]
    strict: bool,

    /// Print counts as a JSON object
    #[arg(long)]
    json: bool,

    /// Directory to save a JSON summary into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Debug mode - also save the located section (and an annotated copy of HTML reports)
    #[arg(short, long)]
    debug: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::debug!("Starting processing for args: {:?}", args);

    // 3. Resolve which extractor to run
    let format = match (args.format, args.report) {
        (Some(format), _) => format,
        (None, Some(kind)) => {
            tracing::info!("Report type '{}' uses the {:?} extractor", kind, kind.format());
            kind.format()
        }
        (None, None) => {
            return Err(AppError::Config(format!(
                "Select a --format or a --report type:\n{}",
                ReportKind::menu()
            )));
        }
    };

    let options = ExtractOptions {
        match_mode: if args.strict { MatchMode::WordBoundary } else { MatchMode::Substring },
    };

    // 4. Load and extract
    let doc = extractors::Document::load(&args.path, format.source_format())?;
    let extraction = extractors::extract(&doc, format, &options);

    for warning in &extraction.warnings {
        eprintln!("warning: {}", warning);
    }

    // 5. Present
    if args.json {
        let json = serde_json::to_string_pretty(&extraction.counts)
            .map_err(|e| AppError::Config(format!("Failed to serialize counts: {}", e)))?;
        println!("{}", json);
    } else if extraction.counts.is_empty() {
        println!("{}", format.empty_message());
    } else {
        println!("{}:\n{}", format.title(), extraction.counts);
    }

    // 6. Persist if asked
    let output_dir = match (&args.output_dir, args.debug) {
        (Some(dir), _) => Some(dir.clone()),
        (None, true) => Some(PathBuf::from("./output")),
        (None, false) => None,
    };
    if let Some(dir) = output_dir {
        let storage = StorageManager::new(&dir)?;

        match storage.save_summary(&args.path, format, &extraction) {
            Ok(path) => tracing::info!("Saved summary to: {}", path.display()),
            Err(e) => tracing::error!("Failed to save summary: {}", e),
        }

        if args.debug {
            match &extraction.section {
                Some(section) => {
                    match storage.save_section(&args.path, section) {
                        Ok(path) => tracing::info!("Saved section to: {}", path.display()),
                        Err(e) => tracing::error!("Failed to save section: {}", e),
                    }
                    if doc.format() == SourceFormat::Html {
                        let annotated = storage.output_path(&args.path, "annotated.html");
                        if let Err(e) = utils::html_debug::create_debug_html(&doc.text(), &annotated, section) {
                            tracing::warn!("Failed to create debug HTML: {}", e);
                        }
                    }
                }
                None => tracing::info!("No section located in {}; nothing to dump", args.path.display()),
            }
        }
    }

    Ok(())
}
