use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Accepted post link shape. Scheme and host are case-insensitive; the
/// shortcode must end at a slash, query string, fragment or the end of input.
static POST_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:https?://(?:www\.)?instagram\.com)/(?:p|reel|tv)/([A-Za-z0-9_-]+)(?:[/?#]|$)",
    )
    .expect("Post URL pattern should be valid")
});

/// Determine if a string is a link to a single post, reel or tv video
pub fn is_valid(url: &str) -> bool {
    POST_URL_RE.is_match(url.trim())
}

/// Extract the shortcode from a valid post URL
pub fn shortcode(url: &str) -> Option<String> {
    if !is_valid(url) {
        return None;
    }

    let parsed = Url::parse(url.trim()).ok()?;
    parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .nth(1)
        .map(|s| s.to_string())
}
