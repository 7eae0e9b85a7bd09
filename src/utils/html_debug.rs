// src/utils/html_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::extractors::Section;
use crate::utils::error::AppError;

/// Saves an HTML report to a file with the given byte ranges highlighted
pub fn save_debug_html(html: &str, filename: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    let mut file = File::create(filename)?;

    // Add debug styling in head
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");

    // CSS for highlight colors
    debug_html.push_str(".highlight-marker { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-section { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    // Create the modified HTML with markers
    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, highlight_type) in sorted_highlights {
        // Overlapping or out-of-range ranges would duplicate or cut text
        if start < last_pos || end > html.len() || start > end {
            tracing::debug!("Skipping highlight {}-{} ({})", start, end, highlight_type);
            continue;
        }
        debug_html.push_str(&html[last_pos..start]);

        let css_class = match highlight_type {
            "marker" => "highlight-marker",
            "section" => "highlight-section",
            _ => "highlight-custom",
        };

        debug_html.push_str(&format!("<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type));
        debug_html.push_str(&html[start..end]);
        debug_html.push_str("</span>");

        last_pos = end;
    }

    // Add any remaining content
    if last_pos < html.len() {
        debug_html.push_str(&html[last_pos..]);
    }

    debug_html.push_str("\n</body>\n</html>");

    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

/// Creates a debug copy of an HTML report with the located section's marker and body highlighted
pub fn create_debug_html(html: &str, filename: &Path, section: &Section) -> Result<(), AppError> {
    let marker_start = section.start_offset.checked_sub(section.marker.len()).ok_or_else(|| {
        AppError::Config(format!("Section offset {} precedes its marker", section.start_offset))
    })?;
    let highlights = [
        (marker_start, section.start_offset, "marker"),
        (section.start_offset, section.end_offset, "section"),
    ];
    save_debug_html(html, filename, &highlights)
}
