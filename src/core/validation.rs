// Input classification and filename helpers shared by the download and
// conversion flows

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Maximum length of a file name derived from a media title
const MAX_TITLE_FILENAME_LENGTH: usize = 200;

/// Path separators, characters reserved on Windows and control characters
static RESERVED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("reserved character pattern is valid"));

/// True when the input is already an absolute http(s) URL and must not be
/// turned into a search term.
///
/// Uses the `url` crate rather than a prefix check so that inputs such as
/// `https:/broken` or `ftp://host/file` are treated as search text.
pub fn is_web_url(input: &str) -> bool {
    let trimmed = input.trim();

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return false;
    }

    match Url::parse(trimmed) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Turn a media title into a file name the way the engine's output
/// template would, replacing path separators and characters reserved on
/// Windows.
pub fn sanitize_title(title: &str) -> String {
    let cleaned = RESERVED_CHARS.replace_all(title.trim(), "_");
    let cleaned = cleaned.trim_end_matches(['.', ' ']);

    if cleaned.is_empty() {
        return "_".to_string();
    }

    cleaned.chars().take(MAX_TITLE_FILENAME_LENGTH).collect()
}
