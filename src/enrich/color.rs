//! Fixed-palette color classification for listing titles.

/// Palette rows scanned in declaration order; the first row with a matching
/// keyword wins. Matching is plain substring, not word-boundary, so "laranja"
/// inside "laranjado" still counts. The normalizer's keyword scan is the
/// word-boundary one; the two deliberately disagree on such inputs.
pub(crate) const PALETTE: &[(&[&str], &str)] = &[
    (&["midnight", "black", "preto"], "#2B2B2B"),
    (&["starlight", "white", "branco", "silver", "prata"], "#F5F5F5"),
    (
        &["azul", "blue", "ultramarine", "ultramarino", "deep blue", "azul nevoa", "azul intenso"],
        "#4D97FF",
    ),
    (&["rosa", "pink", "lavander", "lavanda"], "#FF8EF3"),
    (&["green", "verde", "teal", "salvia", "sage"], "#0BD867"),
    (&["yellow"], "#FFDC5B"),
    (&["cosmic orange", "laranja cosmico", "laranja"], "#FFA84F"),
];

/// Swatch used when no palette keyword matches.
pub const DEFAULT_HEX: &str = "#E0E0E0";

/// Maps a title to one of the eight palette values. Total: every input gets
/// a swatch.
pub fn classify(title: &str) -> &'static str {
    let lower = title.to_lowercase();

    for (keywords, hex) in PALETTE {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return hex;
        }
    }

    DEFAULT_HEX
}
