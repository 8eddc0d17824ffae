//! # Safety Report Data Model
//!
//! This module defines the data structures that make up a dish safety report:
//! risk level, per-ingredient allergen findings, dietary-compatibility flags,
//! and the numeric safety score. All policy encoded here is fixed: the risk
//! thresholds and the score penalty are not configurable.
//!
//! ## Usage
//!
//! ```rust
//! use allergy_guard::report::{DietaryFlags, RiskLevel, safety_score};
//! use allergy_guard::taxonomy::AllergenCategory;
//! use std::collections::BTreeSet;
//!
//! let allergens = BTreeSet::from([AllergenCategory::Wheat, AllergenCategory::Milk]);
//! let flags = DietaryFlags::from_allergens(&allergens);
//!
//! assert!(!flags.gluten_free);
//! assert_eq!(RiskLevel::from_allergen_count(allergens.len()), RiskLevel::Medium);
//! assert_eq!(safety_score(allergens.len()), 70);
//! ```

use crate::provider::{CrossReactivity, NutritionInfo, SubstituteSuggestion};
use crate::taxonomy::AllergenCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Overall risk classification of a dish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// No known allergens detected
    Low,
    /// One or two allergen categories detected
    Medium,
    /// Three or more allergen categories detected
    High,
}

impl RiskLevel {
    /// Fixed-policy mapping from allergen count: 0 is LOW, 1-2 MEDIUM, 3+ HIGH
    pub fn from_allergen_count(count: usize) -> Self {
        match count {
            0 => RiskLevel::Low,
            1..=2 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        };
        write!(f, "{label}")
    }
}

/// Numeric safety score: 100 minus a fixed 15-point penalty per allergen
/// category, floored at zero.
pub fn safety_score(allergen_count: usize) -> u32 {
    100u32.saturating_sub((allergen_count as u32).saturating_mul(15))
}

/// Dietary-compatibility flags derived purely from the detected-allergen set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryFlags {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub nut_free: bool,
    pub shellfish_free: bool,
    pub soy_free: bool,
    pub egg_free: bool,
}

impl DietaryFlags {
    /// Derive every flag from a detected-allergen set.
    ///
    /// This is the single source of truth for the boolean rules; the flags
    /// are a pure function of the set, so unrelated allergens never affect a
    /// given flag.
    pub fn from_allergens(allergens: &BTreeSet<AllergenCategory>) -> Self {
        use AllergenCategory::*;

        let has = |category: AllergenCategory| allergens.contains(&category);
        let animal_flesh = has(Fish) || has(Shellfish) || has(Molluscs);

        Self {
            vegetarian: !animal_flesh,
            vegan: !animal_flesh && !has(Milk) && !has(Eggs),
            gluten_free: !has(Wheat),
            dairy_free: !has(Milk),
            nut_free: !has(TreeNuts) && !has(Peanuts),
            shellfish_free: !has(Shellfish) && !has(Molluscs),
            soy_free: !has(Soy),
            egg_free: !has(Eggs),
        }
    }

    /// Flags for a dish with no detected allergens: everything compatible
    pub fn all_clear() -> Self {
        Self::from_allergens(&BTreeSet::new())
    }
}

impl fmt::Display for DietaryFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut compatible = Vec::new();
        for (flag, label) in [
            (self.vegetarian, "vegetarian"),
            (self.vegan, "vegan"),
            (self.gluten_free, "gluten-free"),
            (self.dairy_free, "dairy-free"),
            (self.nut_free, "nut-free"),
            (self.shellfish_free, "shellfish-free"),
            (self.soy_free, "soy-free"),
            (self.egg_free, "egg-free"),
        ] {
            if flag {
                compatible.push(label);
            }
        }

        if compatible.is_empty() {
            write!(f, "no dietary compatibility")
        } else {
            write!(f, "{}", compatible.join(", "))
        }
    }
}

/// Per-ingredient detection result with substitute suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllergenFinding {
    /// The ingredient text as supplied by the caller
    pub ingredient: String,
    /// Canonical name from the provider; falls back to the original text
    pub standardized_name: String,
    /// Detected allergen categories for this ingredient
    pub allergens: Vec<AllergenCategory>,
    /// Up to three ranked substitutes, provider order preserved
    pub safe_substitutes: Vec<SubstituteSuggestion>,
}

/// Dish-level allergen analysis across a full ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllergenAnalysis {
    /// Union of every ingredient's detected categories
    pub allergens_detected: BTreeSet<AllergenCategory>,
    /// Number of distinct allergen categories detected
    pub allergen_count: usize,
    /// Findings for ingredients that carried at least one allergen
    pub detailed_analysis: Vec<AllergenFinding>,
    /// Cross-reactivity predictions keyed by standardized ingredient name;
    /// ingredients with an empty result are omitted
    pub cross_reactivity_warnings: HashMap<String, CrossReactivity>,
    /// True when no allergen category was detected
    pub is_safe: bool,
}

impl AllergenAnalysis {
    /// Analysis of a dish with nothing detected (also the empty-list result)
    pub fn empty() -> Self {
        Self {
            allergens_detected: BTreeSet::new(),
            allergen_count: 0,
            detailed_analysis: Vec::new(),
            cross_reactivity_warnings: HashMap::new(),
            is_safe: true,
        }
    }
}

/// Complete safety report for one dish, recomputed fresh on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub risk_level: RiskLevel,
    pub allergens: AllergenAnalysis,
    pub dietary_compatibility: DietaryFlags,
    pub nutrition: NutritionInfo,
    pub safety_score: u32,
    pub recommendations: Vec<String>,
}
