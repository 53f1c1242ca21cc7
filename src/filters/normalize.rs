//! Free-text canonicalization shared by the search filter.

use regex_lite::Regex;
use std::sync::LazyLock;

static T_SHIRT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bt[\s-]*shirt\b").expect("valid regex"));
static TOPS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\btops\b").expect("valid regex"));
static TSHIRTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btshirts\b").expect("valid regex"));

/// Lowercases, collapses whitespace and folds garment synonyms so that
/// "T-Shirt", "t shirt" and "tshirts" all compare as "tshirt".
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    // Unicode-aware, so non-breaking spaces split words too
    let collapsed = text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ");
    let folded = T_SHIRT.replace_all(&collapsed, "tshirt");
    let folded = TOPS.replace_all(&folded, "top");
    let folded = TSHIRTS.replace_all(&folded, "tshirt");
    folded.into_owned()
}

/// [`normalize`] for optional input; `None` yields an empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Splits normalized text into non-empty search tokens.
pub fn tokens(text: &str) -> Vec<String> {
    normalize(text).split(' ').filter(|word| !word.is_empty()).map(str::to_string).collect()
}
