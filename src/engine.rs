//! # Safety Report Generator
//!
//! The core engine: orchestrates ingredient standardization, allergen
//! detection, substitute and cross-reactivity lookups, and folds the results
//! into a [`SafetyReport`] with risk level, dietary flags, safety score, and
//! recommendations.
//!
//! External-lookup failures never abort a report: every gateway call degrades
//! locally, so once input validation passes a report is always produced. The
//! only hard failure is [`EngineError::InvalidInput`] from the analysis-only
//! entry points, which require at least one ingredient.
//!
//! ## Usage
//!
//! ```rust
//! use allergy_guard::engine::SafetyEngine;
//! use allergy_guard::provider::StaticProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = SafetyEngine::new(StaticProvider::new());
//! let ingredients = vec!["whole wheat flour".to_string(), "milk".to_string()];
//! let report = engine.generate_safety_report(&ingredients).await;
//!
//! assert_eq!(report.allergens.allergen_count, 2);
//! assert_eq!(report.safety_score, 70);
//! # }
//! ```

use crate::detector::detect_allergens;
use crate::gateway::FoodDataGateway;
use crate::provider::{FoodDataProvider, NutritionInfo};
use crate::report::{
    safety_score, AllergenAnalysis, AllergenFinding, DietaryFlags, RiskLevel, SafetyReport,
};
use log::info;
use std::collections::{BTreeSet, HashMap};

/// Maximum substitute suggestions kept per allergen-bearing ingredient
const MAX_SUBSTITUTES: usize = 3;

/// Errors surfaced to callers of the engine's validating entry points
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The ingredient list was absent or empty where one is required
    InvalidInput(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Allergen-safety engine over any food-data provider
pub struct SafetyEngine<P: FoodDataProvider> {
    gateway: FoodDataGateway<P>,
}

impl<P: FoodDataProvider> SafetyEngine<P> {
    /// Build an engine over a provider with default gateway settings
    pub fn new(provider: P) -> Self {
        Self {
            gateway: FoodDataGateway::new(provider),
        }
    }

    /// Build an engine over a pre-configured gateway
    pub fn with_gateway(gateway: FoodDataGateway<P>) -> Self {
        Self { gateway }
    }

    /// Comprehensive allergen analysis of an ingredient list.
    ///
    /// Standardizes each ingredient (falling back to the original text on
    /// provider failure), detects allergens per standardized name, collects
    /// up to three substitutes per allergen-bearing ingredient, and gathers
    /// cross-reactivity warnings keyed by standardized name.
    ///
    /// Requires at least one ingredient.
    pub async fn analyze_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<AllergenAnalysis, EngineError> {
        if ingredients.is_empty() {
            return Err(EngineError::InvalidInput(
                "at least one ingredient is required".to_string(),
            ));
        }
        Ok(self.analyze(ingredients).await)
    }

    /// Dietary-compatibility flags for an ingredient list.
    ///
    /// Recomputes the full detection step internally; no result is cached
    /// across calls. Requires at least one ingredient.
    pub async fn check_diet_compatibility(
        &self,
        ingredients: &[String],
    ) -> Result<DietaryFlags, EngineError> {
        let analysis = self.analyze_ingredients(ingredients).await?;
        Ok(DietaryFlags::from_allergens(&analysis.allergens_detected))
    }

    /// Generate the complete safety report for a dish.
    ///
    /// Never fails: an empty ingredient list yields a deterministic low-risk,
    /// empty-allergen report (no ingredients means nothing to flag), and
    /// provider failures degrade field by field.
    pub async fn generate_safety_report(&self, ingredients: &[String]) -> SafetyReport {
        let analysis = if ingredients.is_empty() {
            AllergenAnalysis::empty()
        } else {
            self.analyze(ingredients).await
        };

        let dietary_compatibility = DietaryFlags::from_allergens(&analysis.allergens_detected);
        let nutrition = if ingredients.is_empty() {
            NutritionInfo::unavailable("no ingredients to analyze")
        } else {
            self.gateway.nutrition(ingredients).await
        };

        let allergen_count = analysis.allergen_count;
        let recommendations = recommendations_for(&analysis);

        info!(
            "Safety report generated: {} allergen categories, risk {}",
            allergen_count,
            RiskLevel::from_allergen_count(allergen_count)
        );

        SafetyReport {
            risk_level: RiskLevel::from_allergen_count(allergen_count),
            allergens: analysis,
            dietary_compatibility,
            nutrition,
            safety_score: safety_score(allergen_count),
            recommendations,
        }
    }

    /// Detection pipeline over a non-empty ingredient list.
    ///
    /// Each ingredient's standardize -> detect -> substitutes steps run in
    /// order for that ingredient; there is no ordering between ingredients.
    async fn analyze(&self, ingredients: &[String]) -> AllergenAnalysis {
        let standardized = self.gateway.batch_standardize(ingredients).await;

        let mut all_allergens = BTreeSet::new();
        let mut detailed_analysis = Vec::new();

        for (original, standard) in &standardized {
            let detected = detect_allergens(standard);
            if detected.is_empty() {
                continue;
            }
            all_allergens.extend(detected.iter().copied());

            let mut safe_substitutes = Vec::new();
            for allergen in &detected {
                safe_substitutes.extend(self.gateway.substitutes(standard, *allergen).await);
            }
            safe_substitutes.truncate(MAX_SUBSTITUTES);

            detailed_analysis.push(AllergenFinding {
                ingredient: original.clone(),
                standardized_name: standard.clone(),
                allergens: detected.into_iter().collect(),
                safe_substitutes,
            });
        }

        // Cross-reactivity only matters for ingredients that carried allergens
        let mut cross_reactivity_warnings = HashMap::new();
        for finding in &detailed_analysis {
            let cross = self.gateway.cross_reactivity(&finding.standardized_name).await;
            if !cross.is_empty() {
                cross_reactivity_warnings.insert(finding.standardized_name.clone(), cross);
            }
        }

        let allergen_count = all_allergens.len();
        AllergenAnalysis {
            allergens_detected: all_allergens,
            allergen_count,
            detailed_analysis,
            cross_reactivity_warnings,
            is_safe: allergen_count == 0,
        }
    }
}

/// Human-readable recommendations derived from an allergen analysis
fn recommendations_for(analysis: &AllergenAnalysis) -> Vec<String> {
    let mut recommendations = Vec::new();

    if analysis.allergen_count == 0 {
        recommendations
            .push("This dish appears safe for most people with common food allergies.".to_string());
    } else {
        recommendations.push(format!(
            "This dish contains {} major allergen(s). Please review carefully.",
            analysis.allergen_count
        ));
    }

    if !analysis.cross_reactivity_warnings.is_empty() {
        recommendations.push(
            "Cross-reactivity warnings detected. People with related allergies should exercise caution."
                .to_string(),
        );
    }

    if !analysis.detailed_analysis.is_empty() {
        recommendations
            .push("Safe substitutes are available for allergenic ingredients.".to_string());
    }

    recommendations
}
