//! # Allergen Detector
//!
//! Matches normalized ingredient text against the static allergen taxonomy.
//! Matching is case-insensitive substring containment with no word-boundary
//! requirement, so "eggplant" matching the "egg" keyword is an accepted false
//! positive; the taxonomy errs on the side of flagging.

use crate::normalize::normalize_ingredient;
use crate::taxonomy::AllergenCategory;
use std::collections::BTreeSet;

/// Detect allergen categories present in a single ingredient name.
///
/// The input is normalized internally, so callers may pass raw text. For each
/// category the keyword list is scanned in its fixed order and scanning stops
/// at the first hit; keyword redundancy never changes the category-level
/// result. An empty set is a valid result meaning no known allergen was
/// detected. Identical input always yields an identical set.
pub fn detect_allergens(ingredient: &str) -> BTreeSet<AllergenCategory> {
    let normalized = normalize_ingredient(ingredient);
    let mut detected = BTreeSet::new();

    for category in AllergenCategory::ALL {
        for keyword in category.keywords() {
            if normalized.contains(keyword) {
                detected.insert(category);
                break;
            }
        }
    }

    detected
}
