//! # Ingredient Normalizer
//!
//! Text normalization applied to every ingredient name before allergen
//! matching. Menu and OCR text arrives with ragged casing and spacing, so
//! normalization lowercases, trims, and collapses internal whitespace runs.
//! Standardized names returned by external providers pass through the same
//! normalization before matching.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUNS: Regex =
        Regex::new(r"\s+").expect("whitespace pattern should be valid");
}

/// Normalize raw ingredient text for matching.
///
/// Pure function with no failure modes: lowercases, trims, and collapses any
/// run of whitespace to a single space.
///
/// # Examples
///
/// ```rust
/// use allergy_guard::normalize::normalize_ingredient;
///
/// assert_eq!(normalize_ingredient("  Whole  Wheat Flour "), "whole wheat flour");
/// ```
pub fn normalize_ingredient(raw: &str) -> String {
    WHITESPACE_RUNS.replace_all(raw.trim(), " ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize_ingredient("  MILK  "), "milk");
        assert_eq!(normalize_ingredient("Soy Sauce"), "soy sauce");
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(normalize_ingredient("whole\t wheat\n flour"), "whole wheat flour");
        assert_eq!(normalize_ingredient("egg   white"), "egg white");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(normalize_ingredient(""), "");
        assert_eq!(normalize_ingredient("   "), "");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_ingredient("  Sulfur  Dioxide ");
        assert_eq!(normalize_ingredient(&once), once);
    }
}
