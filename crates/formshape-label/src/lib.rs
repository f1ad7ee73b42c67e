//! Infer a human-readable label from a field identifier.
//!
//! ```
//! use formshape_label::infer_label;
//!
//! assert_eq!(infer_label("fooBar"), "Foo Bar");
//! assert_eq!(infer_label("XMLHttpRequest"), "XML Http Request");
//! assert_eq!(infer_label("home_page_url"), "Home Page URL");
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Word tokens, in priority order:
/// acronym runs, lowercase words (optionally capitalized, with an embedded
/// apostrophe and trailing digits), a lone capital, digit runs.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<acronym>\p{Lu}{2,})|(?P<word>'?\p{Lu}?\p{Ll}+(?:'\p{Ll}+)?[0-9]*)|\p{Lu}|[0-9]+",
    )
    .expect("invalid label token regex")
});

/// Split an identifier into word tokens. Separators are dropped.
pub fn tokenize(identifier: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while let Some(captures) = TOKEN_PATTERN.captures_at(identifier, pos) {
        let Some(matched) = captures.get(0) else {
            break;
        };
        let mut end = matched.end();
        // An acronym run gives its last capital to a following lowercase word:
        // "XMLHttp" is "XML" + "Http".
        if captures.name("acronym").is_some() && starts_lowercase(&identifier[end..]) {
            if let Some((last, _)) = identifier[..end].char_indices().next_back() {
                end = last;
            }
        }
        tokens.push(&identifier[matched.start()..end]);
        pos = end;
    }
    tokens
}

fn starts_lowercase(rest: &str) -> bool {
    rest.chars().next().is_some_and(char::is_lowercase)
}

fn capitalize(token: &str) -> String {
    let (prefix, rest) = match token.strip_prefix('\'') {
        Some(rest) => ("'", rest),
        None => ("", token),
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}

/// Build a label such as `"Foo Bar URL"` from an identifier such as `fooBarUrl`.
pub fn infer_label(identifier: &str) -> String {
    let mut label = String::with_capacity(identifier.len() + 4);
    for token in tokenize(identifier) {
        if !label.is_empty() && !token.starts_with('\'') {
            label.push(' ');
        }
        label.push_str(&capitalize(token));
    }
    label.replace("Url", "URL")
}
