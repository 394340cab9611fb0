//! Extraction of a numeric rate from free-form LLM text.

use regex_lite::Regex;
use std::sync::LazyLock;

// First "digits, decimal separator, digits" substring; either separator.
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+[.,]\d+").unwrap());

/// Pulls the first decimal number out of `text`, accepting both `5.87` and
/// `5,87`. Returns `None` when no decimal value is present.
pub fn extract_rate(text: &str) -> Option<f64> {
    let matched = DECIMAL.find(text)?;
    matched.as_str().replace(',', ".").parse().ok()
}
