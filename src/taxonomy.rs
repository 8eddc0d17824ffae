//! # Allergen Taxonomy
//!
//! This module defines the closed set of major allergen categories (based on
//! the FDA's major food allergens plus the EU-regulated additions) and the
//! static keyword sets used for substring matching against ingredient text.
//!
//! The taxonomy is data, not code: extending a category means editing its
//! keyword list here, never touching detection logic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// A major allergen category.
///
/// The set is closed and fixed at build time; detection can never produce a
/// category outside this enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AllergenCategory {
    /// Milk and dairy derivatives
    Milk,
    /// Eggs and egg derivatives
    Eggs,
    /// Finned fish
    Fish,
    /// Crustacean shellfish
    Shellfish,
    /// Tree nuts (almond, walnut, cashew, ...)
    TreeNuts,
    /// Peanuts and groundnut products
    Peanuts,
    /// Wheat and gluten-bearing grains
    Wheat,
    /// Soybeans and soy derivatives
    Soy,
    /// Sesame seeds and sesame products
    Sesame,
    /// Mustard seed and derivatives
    Mustard,
    /// Celery and celeriac
    Celery,
    /// Lupin flour and seeds
    Lupin,
    /// Molluscs (clams, mussels, squid, ...)
    Molluscs,
    /// Sulfur dioxide and sulfites
    Sulfites,
}

/// Keyword sets for each allergen category, in fixed matching order.
///
/// Keywords are lowercase; matching is substring-based with no word-boundary
/// requirement, so "eggplant" hitting the "egg" keyword is an accepted false
/// positive of this taxonomy.
static ALLERGEN_KEYWORDS: LazyLock<HashMap<AllergenCategory, &'static [&'static str]>> =
    LazyLock::new(|| {
        let mut map: HashMap<AllergenCategory, &'static [&'static str]> = HashMap::new();

        map.insert(
            AllergenCategory::Milk,
            &[
                "milk", "dairy", "cheese", "butter", "cream", "yogurt", "whey", "casein",
                "lactose",
            ],
        );
        map.insert(
            AllergenCategory::Eggs,
            &["egg", "eggs", "egg white", "egg yolk", "albumin", "mayonnaise"],
        );
        map.insert(
            AllergenCategory::Fish,
            &["fish", "salmon", "tuna", "cod", "anchovy", "bass", "trout"],
        );
        map.insert(
            AllergenCategory::Shellfish,
            &["shrimp", "crab", "lobster", "prawns", "crayfish", "shellfish"],
        );
        map.insert(
            AllergenCategory::TreeNuts,
            &[
                "almond", "walnut", "cashew", "pistachio", "pecan", "hazelnut", "macadamia",
            ],
        );
        map.insert(
            AllergenCategory::Peanuts,
            &["peanut", "peanuts", "groundnut", "peanut butter"],
        );
        map.insert(
            AllergenCategory::Wheat,
            &["wheat", "flour", "bread", "pasta", "semolina", "bulgur", "gluten"],
        );
        map.insert(
            AllergenCategory::Soy,
            &["soy", "soya", "tofu", "soy sauce", "edamame", "miso", "tempeh"],
        );
        map.insert(
            AllergenCategory::Sesame,
            &["sesame", "tahini", "sesame oil", "sesame seeds"],
        );
        map.insert(
            AllergenCategory::Mustard,
            &["mustard", "mustard seed", "mustard oil"],
        );
        map.insert(
            AllergenCategory::Celery,
            &["celery", "celeriac", "celery salt"],
        );
        map.insert(AllergenCategory::Lupin, &["lupin", "lupine flour"]);
        map.insert(
            AllergenCategory::Molluscs,
            &["clam", "mussel", "oyster", "squid", "octopus", "snail"],
        );
        map.insert(
            AllergenCategory::Sulfites,
            &["sulfur dioxide", "sulfite", "sulphite"],
        );

        map
    });

impl AllergenCategory {
    /// All categories, in declaration order.
    pub const ALL: [AllergenCategory; 14] = [
        AllergenCategory::Milk,
        AllergenCategory::Eggs,
        AllergenCategory::Fish,
        AllergenCategory::Shellfish,
        AllergenCategory::TreeNuts,
        AllergenCategory::Peanuts,
        AllergenCategory::Wheat,
        AllergenCategory::Soy,
        AllergenCategory::Sesame,
        AllergenCategory::Mustard,
        AllergenCategory::Celery,
        AllergenCategory::Lupin,
        AllergenCategory::Molluscs,
        AllergenCategory::Sulfites,
    ];

    /// The canonical snake_case name of the category, matching its wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            AllergenCategory::Milk => "milk",
            AllergenCategory::Eggs => "eggs",
            AllergenCategory::Fish => "fish",
            AllergenCategory::Shellfish => "shellfish",
            AllergenCategory::TreeNuts => "tree_nuts",
            AllergenCategory::Peanuts => "peanuts",
            AllergenCategory::Wheat => "wheat",
            AllergenCategory::Soy => "soy",
            AllergenCategory::Sesame => "sesame",
            AllergenCategory::Mustard => "mustard",
            AllergenCategory::Celery => "celery",
            AllergenCategory::Lupin => "lupin",
            AllergenCategory::Molluscs => "molluscs",
            AllergenCategory::Sulfites => "sulfites",
        }
    }

    /// The keyword list used for substring matching, in fixed order
    pub fn keywords(&self) -> &'static [&'static str] {
        ALLERGEN_KEYWORDS.get(self).copied().unwrap_or(&[])
    }
}

impl fmt::Display for AllergenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_keywords() {
        for category in AllergenCategory::ALL {
            assert!(
                !category.keywords().is_empty(),
                "category {category} has no keywords"
            );
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for category in AllergenCategory::ALL {
            for keyword in category.keywords() {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn test_keyword_order_is_fixed() {
        // First keyword per category is the canonical one from the data map
        assert_eq!(AllergenCategory::Milk.keywords()[0], "milk");
        assert_eq!(AllergenCategory::Shellfish.keywords()[0], "shrimp");
        assert_eq!(AllergenCategory::Sulfites.keywords()[0], "sulfur dioxide");
    }

    #[test]
    fn test_display_and_as_str_agree() {
        assert_eq!(AllergenCategory::TreeNuts.to_string(), "tree_nuts");
        assert_eq!(format!("{}", AllergenCategory::Milk), "milk");
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        let json = serde_json::to_string(&AllergenCategory::TreeNuts).unwrap();
        assert_eq!(json, "\"tree_nuts\"");

        let back: AllergenCategory = serde_json::from_str("\"molluscs\"").unwrap();
        assert_eq!(back, AllergenCategory::Molluscs);
    }

    #[test]
    fn test_category_ordering_follows_declaration() {
        let mut sorted = AllergenCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, AllergenCategory::ALL);
    }
}
