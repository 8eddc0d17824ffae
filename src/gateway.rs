//! # External Data Gateway
//!
//! Degrading façade over a [`FoodDataProvider`]. Every operation absorbs
//! provider failures and returns a safe fallback value, so engine code has no
//! error-handling branches for expected provider flakiness:
//!
//! - standardization falls back to the original ingredient text
//! - substitutes fall back to an empty list
//! - cross-reactivity falls back to an empty map
//! - nutrition falls back to a structured "unavailable" payload
//!
//! A circuit breaker fails fast to the same fallbacks while a provider is
//! known to be down.

use crate::circuit_breaker::CircuitBreaker;
use crate::provider::{
    CrossReactivity, FoodDataProvider, NutritionInfo, SubstituteSuggestion,
};
use crate::provider_config::BreakerConfig;
use crate::taxonomy::AllergenCategory;
use log::{debug, warn};

/// Infallible gateway to external food-data services
pub struct FoodDataGateway<P: FoodDataProvider> {
    provider: P,
    breaker: CircuitBreaker,
}

impl<P: FoodDataProvider> FoodDataGateway<P> {
    /// Wrap a provider with the default circuit breaker settings
    pub fn new(provider: P) -> Self {
        Self::with_breaker(provider, BreakerConfig::default())
    }

    /// Wrap a provider with explicit circuit breaker settings
    pub fn with_breaker(provider: P, config: BreakerConfig) -> Self {
        Self {
            provider,
            breaker: CircuitBreaker::new(config),
        }
    }

    /// Canonical name for an ingredient; the original text on any failure
    pub async fn standardize(&self, ingredient: &str) -> String {
        if self.breaker.is_open() {
            debug!("Provider circuit open, keeping original name for '{ingredient}'");
            return ingredient.to_string();
        }

        match self.provider.standardize(ingredient).await {
            Ok(standard) => {
                self.breaker.record_success();
                standard
            }
            Err(e) => {
                self.breaker.record_failure();
                warn!("Could not standardize ingredient '{ingredient}': {e}");
                ingredient.to_string()
            }
        }
    }

    /// Standardize a list of ingredients, one sequential call each.
    ///
    /// Returns (original, standardized) pairs preserving input order, so
    /// duplicate ingredient names survive the batch.
    pub async fn batch_standardize(&self, ingredients: &[String]) -> Vec<(String, String)> {
        let mut standardized = Vec::with_capacity(ingredients.len());
        for ingredient in ingredients {
            let standard = self.standardize(ingredient).await;
            standardized.push((ingredient.clone(), standard));
        }
        standardized
    }

    /// Ranked substitutes avoiding one allergen; empty on any failure
    pub async fn substitutes(
        &self,
        ingredient: &str,
        allergen: AllergenCategory,
    ) -> Vec<SubstituteSuggestion> {
        if self.breaker.is_open() {
            debug!("Provider circuit open, skipping substitute lookup for '{ingredient}'");
            return Vec::new();
        }

        match self.provider.substitutes(ingredient, allergen).await {
            Ok(substitutes) => {
                self.breaker.record_success();
                substitutes
            }
            Err(e) => {
                self.breaker.record_failure();
                warn!("Could not fetch substitutes for '{ingredient}' ({allergen}): {e}");
                Vec::new()
            }
        }
    }

    /// Cross-reactivity predictions; empty on any failure
    pub async fn cross_reactivity(&self, ingredient: &str) -> CrossReactivity {
        if self.breaker.is_open() {
            debug!("Provider circuit open, skipping cross-reactivity for '{ingredient}'");
            return CrossReactivity::new();
        }

        match self.provider.cross_reactivity(ingredient).await {
            Ok(cross) => {
                self.breaker.record_success();
                cross
            }
            Err(e) => {
                self.breaker.record_failure();
                warn!("Could not fetch cross-reactivity for '{ingredient}': {e}");
                CrossReactivity::new()
            }
        }
    }

    /// Nutrition payload for the full list; structured marker on any failure
    pub async fn nutrition(&self, ingredients: &[String]) -> NutritionInfo {
        if self.breaker.is_open() {
            debug!("Provider circuit open, skipping nutrition lookup");
            return NutritionInfo::unavailable("provider circuit open");
        }

        match self.provider.nutrition(ingredients).await {
            Ok(payload) => {
                self.breaker.record_success();
                NutritionInfo::Available(payload)
            }
            Err(e) => {
                self.breaker.record_failure();
                warn!("Could not fetch nutrition info: {e}");
                NutritionInfo::unavailable(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticProvider;

    #[tokio::test]
    async fn test_standardize_degrades_to_original() {
        let gateway = FoodDataGateway::new(StaticProvider::failing());
        assert_eq!(gateway.standardize("whole milk").await, "whole milk");
    }

    #[tokio::test]
    async fn test_substitutes_degrade_to_empty() {
        let gateway = FoodDataGateway::new(StaticProvider::failing());
        let subs = gateway.substitutes("milk", AllergenCategory::Milk).await;
        assert!(subs.is_empty());
    }

    #[tokio::test]
    async fn test_cross_reactivity_degrades_to_empty() {
        let gateway = FoodDataGateway::new(StaticProvider::failing());
        assert!(gateway.cross_reactivity("milk").await.is_empty());
    }

    #[tokio::test]
    async fn test_nutrition_degrades_to_structured_marker() {
        let gateway = FoodDataGateway::new(StaticProvider::failing());
        let nutrition = gateway.nutrition(&["milk".to_string()]).await;
        assert!(!nutrition.is_available());
    }

    #[tokio::test]
    async fn test_batch_standardize_preserves_order_and_duplicates() {
        let provider = StaticProvider::new().with_standard_name("maida", "wheat flour");
        let gateway = FoodDataGateway::new(provider);

        let ingredients = vec![
            "maida".to_string(),
            "salt".to_string(),
            "maida".to_string(),
        ];
        let pairs = gateway.batch_standardize(&ingredients).await;

        assert_eq!(
            pairs,
            vec![
                ("maida".to_string(), "wheat flour".to_string()),
                ("salt".to_string(), "salt".to_string()),
                ("maida".to_string(), "wheat flour".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_open_circuit_fails_fast_to_fallbacks() {
        let gateway = FoodDataGateway::with_breaker(
            StaticProvider::failing(),
            BreakerConfig {
                failure_threshold: 2,
                reset_secs: 60,
            },
        );

        // Trip the breaker
        gateway.standardize("milk").await;
        gateway.standardize("milk").await;

        // Subsequent calls still degrade without propagating anything
        assert_eq!(gateway.standardize("cream").await, "cream");
        assert!(gateway.cross_reactivity("cream").await.is_empty());
        assert!(!gateway.nutrition(&[]).await.is_available());
    }
}
