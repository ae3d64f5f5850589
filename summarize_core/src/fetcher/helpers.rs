use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Blind tag stripping: script and style bodies are kept as text.
pub fn strip_markup(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    WHITESPACE_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}
