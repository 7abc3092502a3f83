//! URL slugs for event pages.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_OR_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/]+").expect("valid slug regex"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").expect("valid slug regex"));
static DASH_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("valid slug regex"));

/// Turn a human-readable name into a URL-safe slug.
///
/// Lower-cases, turns whitespace and `/` into `-`, drops everything outside
/// `[A-Za-z0-9_-]`, collapses dash runs and trims dashes at both ends. The
/// mapping is lossy: distinct names may share a slug.
pub fn slugify(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lower = text.to_lowercase();
    let dashed = WHITESPACE_OR_SLASH.replace_all(&lower, "-");
    let kept = DISALLOWED.replace_all(&dashed, "");
    let collapsed = DASH_RUNS.replace_all(&kept, "-");
    collapsed.trim_matches('-').to_string()
}
