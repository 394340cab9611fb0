//! Canonical title rewriting for iPhone listings.
//!
//! Store feeds spell the same SKU a dozen ways ("APPLE iPhone 13 128gb
//! Midnight A2633 Tela 6.1", "iphone13 128 GB preto lacrado", ...). The
//! normalizer rewrites anything that mentions an iPhone into
//! `Apple iPhone <model> <storage>[/<ram>] <color> (<obs>)`, keeping every
//! other title byte-identical.

use crate::enrich::color::PALETTE;
use regex_lite::Regex;
use std::sync::LazyLock;

// Model: "iphone" followed by digits or bare "se", with the usual suffixes;
// digits also match without the prefix. Suffix alternation is ordered so
// "pro max" wins over "pro".
static MODEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\biphone\s+(se|\d+(?:\s*(?:pro\s*max|pro|plus|mini|se))?)\b|\b(\d+(?:\s*(?:pro\s*max|pro|plus|mini|se))?)\b",
    )
    .unwrap()
});

// Storage with optional RAM: "128GB", "1TB", "256GB/8GB".
static STORAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+(?:GB|TB))(?:/(\d+GB))?\b").unwrap());

// First parenthesized group.
static OBSERVATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]*)\)").unwrap());

// Word-boundary matchers for the palette keywords, in palette order.
static COLOR_KEYWORDS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    PALETTE
        .iter()
        .flat_map(|(keywords, _)| keywords.iter())
        .map(|kw| (*kw, Regex::new(&format!(r"(?i)\b{}\b", kw)).unwrap()))
        .collect()
});

/// Rewrites a listing title into canonical form. Titles without an
/// (case-insensitive) "iphone" occurrence are returned unchanged. Total:
/// any segment that fails to match is simply omitted.
pub fn normalize(title: &str) -> String {
    if !title.to_lowercase().contains("iphone") {
        return title.to_string();
    }

    let mut segments = vec!["Apple iPhone".to_string()];

    if let Some(model) = model_token(title) {
        segments.push(model);
    }
    if let Some(storage) = storage_token(title) {
        segments.push(storage);
    }
    if let Some(color) = color_token(title) {
        segments.push(color);
    }
    if let Some(obs) = observation_token(title) {
        segments.push(obs);
    }

    collapse_whitespace(&segments.join(" "))
}

fn model_token(title: &str) -> Option<String> {
    let captures = MODEL.captures(title)?;
    let token = captures.get(1).or_else(|| captures.get(2))?.as_str();
    let token = collapse_whitespace(token);
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn storage_token(title: &str) -> Option<String> {
    let captures = STORAGE.captures(title)?;
    let storage = captures.get(1)?.as_str().to_uppercase();

    match captures.get(2) {
        Some(ram) => Some(format!("{}/{}", storage, ram.as_str().to_uppercase())),
        None => Some(storage),
    }
}

fn color_token(title: &str) -> Option<String> {
    // " - " rule: the final segment after the last separator names the color;
    // only its first token is taken ("Deep Blue" becomes "Deep").
    if let Some(idx) = title.rfind(" - ") {
        let tail = &title[idx + 3..];
        return tail.split_whitespace().next().map(capitalize);
    }

    COLOR_KEYWORDS
        .iter()
        .find(|(_, re)| re.is_match(title))
        .map(|(kw, _)| capitalize(kw))
}

fn observation_token(title: &str) -> Option<String> {
    OBSERVATION
        .captures(title)
        .and_then(|c| c.get(1))
        .map(|m| format!("({})", m.as_str()))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
