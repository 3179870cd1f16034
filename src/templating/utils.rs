//! Text post-processing applied to rendered template output.

use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex is valid"));

/// Reduce rendered markup to its visible text.
///
/// Tags are removed, common entities are decoded, and runs of whitespace are
/// collapsed to a single space.
///
/// ```rust,no_run
/// use doctracks::templating::text_only;
///
/// assert_eq!(text_only("<p>Build &amp;\n  <em>deploy</em></p>"), "Build & deploy");
/// ```
pub fn text_only(markup: &str) -> String {
    let stripped = TAG.replace_all(markup, " ");
    let decoded = decode_entities(&stripped);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

/// Decode the handful of entities that show up in titles and intros.
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        // last, so `&amp;lt;` decodes to `&lt;` and not `<`
        .replace("&amp;", "&")
}

/// HTML-escape text for safe embedding in markup.
pub fn encode_entities(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            '"' => encoded.push_str("&quot;"),
            '\'' => encoded.push_str("&#39;"),
            _ => encoded.push(c),
        }
    }
    encoded
}
