//! # Food-Data Provider Contract
//!
//! This module defines the boundary between the safety engine and external
//! food-data services: the transport-level trait a provider implements, the
//! error type that never escapes the gateway, and the payload types shared
//! with the report model. An in-memory [`StaticProvider`] is included for
//! tests and offline use; the HTTP implementation lives in the `foodoscope`
//! module.

use crate::taxonomy::AllergenCategory;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Transport-level failures from an external food-data provider.
///
/// These are internal to the gateway boundary: the [`crate::gateway`] façade
/// converts every variant into a degraded fallback value before the engine
/// sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Connection or request construction errors
    Http(String),
    /// Non-success HTTP status from the provider
    Status(u16),
    /// Response body could not be decoded
    Decode(String),
    /// Request exceeded the configured timeout
    Timeout(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Http(msg) => write!(f, "HTTP error: {msg}"),
            ProviderError::Status(code) => write!(f, "Provider returned status {code}"),
            ProviderError::Decode(msg) => write!(f, "Decode error: {msg}"),
            ProviderError::Timeout(msg) => write!(f, "Timeout error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// A candidate substitute for an allergenic ingredient.
///
/// Providers return these ranked; ranking order is preserved end to end and
/// never re-sorted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstituteSuggestion {
    /// Name of the substitute ingredient
    pub name: String,
    /// Flavor-similarity score reported by the provider, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl SubstituteSuggestion {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            similarity: None,
        }
    }

    pub fn with_similarity(mut self, similarity: f64) -> Self {
        self.similarity = Some(similarity);
        self
    }
}

/// Cross-reactivity prediction: related allergen name to confidence score.
pub type CrossReactivity = HashMap<String, f64>;

/// Opaque nutrition payload from a provider, or a structured error marker.
///
/// Nutrition failures are data, not errors: a report stays usable when its
/// nutrition field carries the `Unavailable` marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutritionInfo {
    /// Nutrition lookup failed; `error` is a stable marker, `message` the cause
    Unavailable { error: String, message: String },
    /// Pass-through payload from the provider
    Available(Value),
}

impl NutritionInfo {
    /// Build the structured "nutrition unavailable" payload
    pub fn unavailable(message: impl Into<String>) -> Self {
        NutritionInfo::Unavailable {
            error: "Nutrition analysis unavailable".to_string(),
            message: message.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, NutritionInfo::Available(_))
    }
}

/// Contract for external ingredient/nutrition/flavor-chemistry services.
///
/// Implementations are transport-level and fallible; degrade-on-failure
/// behavior belongs to the [`crate::gateway::FoodDataGateway`] wrapper, not
/// to implementors. Any data source can be swapped in behind this trait.
#[async_trait]
pub trait FoodDataProvider: Send + Sync {
    /// Look up the canonical name for a raw ingredient
    async fn standardize(&self, ingredient: &str) -> Result<String, ProviderError>;

    /// Ranked substitute candidates for an ingredient, avoiding one allergen
    async fn substitutes(
        &self,
        ingredient: &str,
        allergen: AllergenCategory,
    ) -> Result<Vec<SubstituteSuggestion>, ProviderError>;

    /// Predicted cross-reactive allergens with confidence scores
    async fn cross_reactivity(&self, ingredient: &str) -> Result<CrossReactivity, ProviderError>;

    /// Aggregated nutrition payload for a full ingredient list
    async fn nutrition(&self, ingredients: &[String]) -> Result<Value, ProviderError>;
}

/// In-memory provider backed by fixed lookup tables.
///
/// Used by tests and by embedders that want deterministic, offline behavior.
/// The [`StaticProvider::failing`] constructor simulates a provider outage on
/// every call, which is how the degrade-on-failure contract is exercised.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    standard_names: HashMap<String, String>,
    substitutes: HashMap<(String, AllergenCategory), Vec<SubstituteSuggestion>>,
    cross_reactivity: HashMap<String, CrossReactivity>,
    nutrition: Option<Value>,
    fail_all: bool,
}

impl StaticProvider {
    /// Create an empty provider: standardization echoes input, lookups are empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider whose every call fails
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Register a canonical name for a raw ingredient
    pub fn with_standard_name(mut self, raw: &str, standard: &str) -> Self {
        self.standard_names
            .insert(raw.to_string(), standard.to_string());
        self
    }

    /// Register substitute suggestions for an (ingredient, allergen) pair
    pub fn with_substitutes(
        mut self,
        ingredient: &str,
        allergen: AllergenCategory,
        substitutes: Vec<SubstituteSuggestion>,
    ) -> Self {
        self.substitutes
            .insert((ingredient.to_string(), allergen), substitutes);
        self
    }

    /// Register cross-reactivity predictions for an ingredient
    pub fn with_cross_reactivity(mut self, ingredient: &str, related: CrossReactivity) -> Self {
        self.cross_reactivity.insert(ingredient.to_string(), related);
        self
    }

    /// Set the nutrition payload returned for any ingredient list
    pub fn with_nutrition(mut self, payload: Value) -> Self {
        self.nutrition = Some(payload);
        self
    }

    fn outage(&self) -> Result<(), ProviderError> {
        if self.fail_all {
            Err(ProviderError::Http("simulated provider outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FoodDataProvider for StaticProvider {
    async fn standardize(&self, ingredient: &str) -> Result<String, ProviderError> {
        self.outage()?;
        Ok(self
            .standard_names
            .get(ingredient)
            .cloned()
            .unwrap_or_else(|| ingredient.to_string()))
    }

    async fn substitutes(
        &self,
        ingredient: &str,
        allergen: AllergenCategory,
    ) -> Result<Vec<SubstituteSuggestion>, ProviderError> {
        self.outage()?;
        Ok(self
            .substitutes
            .get(&(ingredient.to_string(), allergen))
            .cloned()
            .unwrap_or_default())
    }

    async fn cross_reactivity(&self, ingredient: &str) -> Result<CrossReactivity, ProviderError> {
        self.outage()?;
        Ok(self
            .cross_reactivity
            .get(ingredient)
            .cloned()
            .unwrap_or_default())
    }

    async fn nutrition(&self, _ingredients: &[String]) -> Result<Value, ProviderError> {
        self.outage()?;
        Ok(self.nutrition.clone().unwrap_or_else(|| Value::Object(Default::default())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_echoes_unknown_ingredients() {
        let provider = StaticProvider::new();
        let name = provider.standardize("dragonfruit").await.unwrap();
        assert_eq!(name, "dragonfruit");
    }

    #[tokio::test]
    async fn test_static_provider_lookups() {
        let provider = StaticProvider::new()
            .with_standard_name("maida", "wheat flour")
            .with_substitutes(
                "wheat flour",
                AllergenCategory::Wheat,
                vec![SubstituteSuggestion::new("rice flour").with_similarity(0.8)],
            )
            .with_cross_reactivity(
                "wheat flour",
                CrossReactivity::from([("barley".to_string(), 0.7)]),
            );

        assert_eq!(provider.standardize("maida").await.unwrap(), "wheat flour");

        let subs = provider
            .substitutes("wheat flour", AllergenCategory::Wheat)
            .await
            .unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "rice flour");

        let cross = provider.cross_reactivity("wheat flour").await.unwrap();
        assert_eq!(cross.get("barley"), Some(&0.7));
    }

    #[tokio::test]
    async fn test_failing_provider_errors_on_every_call() {
        let provider = StaticProvider::failing();
        assert!(provider.standardize("milk").await.is_err());
        assert!(provider
            .substitutes("milk", AllergenCategory::Milk)
            .await
            .is_err());
        assert!(provider.cross_reactivity("milk").await.is_err());
        assert!(provider.nutrition(&["milk".to_string()]).await.is_err());
    }

    #[test]
    fn test_nutrition_info_untagged_serde() {
        let unavailable = NutritionInfo::unavailable("connection refused");
        let json = serde_json::to_value(&unavailable).unwrap();
        assert_eq!(json["error"], "Nutrition analysis unavailable");
        assert_eq!(json["message"], "connection refused");

        let back: NutritionInfo = serde_json::from_value(json).unwrap();
        assert!(!back.is_available());

        let available = NutritionInfo::Available(serde_json::json!({"calories": 120}));
        assert!(available.is_available());
    }
}
