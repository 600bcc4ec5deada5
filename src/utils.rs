use std::path::PathBuf;

/// Build a listing page URL by appending the page number to the base URL
pub fn page_url(base_url: &str, page_index: u32) -> String {
    format!("{}{}", base_url, page_index)
}

/// Output file for an extension-less prefix.
///
/// The extension is appended, never substituted, so a prefix like
/// `run.2024` becomes `run.2024.csv`.
pub fn csv_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{}.csv", prefix))
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
