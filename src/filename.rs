use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]").unwrap());
static UNDERSCORE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Fragments left behind when a `.pdf`/`.zip` extension is flattened into the name.
/// Removed wherever they occur, not only at the end.
const REDUNDANT_SUBSTRINGS: [&str; 2] = ["_pdf", "_zip"];

/// Convert a URL into a lowercase, filesystem-safe filename.
///
/// Only the last path segment is used, percent-decoded; scheme, host, query and fragment are
/// ignored. Every character outside `[a-z0-9]` becomes `_`, runs of `_` are
/// collapsed and trimmed, `_pdf`/`_zip` are stripped, and the original
/// extension is re-appended.
///
/// Distinct URLs sharing a final segment map to the same name. Returns an
/// empty string when the URL has no usable path segment.
pub fn url_to_filename(raw_url: &str) -> String {
    let segment = last_path_segment(raw_url).to_lowercase();
    let extension = file_extension(&segment);

    let safe = NON_ALPHANUMERIC.replace_all(&segment, "_");
    let safe = UNDERSCORE_RUNS.replace_all(&safe, "_");
    let mut safe = safe.trim_matches('_').to_string();

    for redundant in REDUNDANT_SUBSTRINGS {
        safe = safe.replace(redundant, "");
    }

    if !safe.is_empty() && file_extension(&safe).is_empty() {
        safe.push_str(extension);
    }

    safe
}

/// Final path segment, percent-decoded, ignoring trailing slashes, query and fragment
fn last_path_segment(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative references: cut query and fragment by hand
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            url[..end].to_string()
        }
    };

    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    // Resolved links arrive with spaces and non-ASCII escaped
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Extension including the leading dot, or "" when there is none
fn file_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(index) if index + 1 < name.len() => &name[index..],
        _ => "",
    }
}
