//! # Foodoscope Provider
//!
//! HTTP implementation of [`FoodDataProvider`] against the Foodoscope
//! RecipeDB and FlavorDB APIs. RecipeDB supplies canonical ingredient names
//! and nutrition data; FlavorDB supplies safe substitutes and cross-reactivity
//! predictions. Every request is a single attempt with a bounded timeout;
//! degrade-on-failure lives in the gateway, not here.

use crate::provider::{CrossReactivity, FoodDataProvider, ProviderError, SubstituteSuggestion};
use crate::provider_config::ProviderConfig;
use crate::taxonomy::AllergenCategory;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Food-data provider backed by the Foodoscope RecipeDB/FlavorDB APIs
pub struct FoodoscopeProvider {
    client: Client,
    config: ProviderConfig,
}

impl FoodoscopeProvider {
    /// Build a provider with a pooled HTTP client honoring the configured timeout
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn get_json(&self, base_url: &str, endpoint: &str) -> Result<Value, ProviderError> {
        let url = format!("{base_url}{endpoint}");
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(request_error)?;

        decode_response(response).await
    }

    async fn post_json(
        &self,
        base_url: &str,
        endpoint: &str,
        body: &Value,
    ) -> Result<Value, ProviderError> {
        let url = format!("{base_url}{endpoint}");
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(request_error)?;

        decode_response(response).await
    }
}

fn request_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(err.to_string())
    } else {
        ProviderError::Http(err.to_string())
    }
}

async fn decode_response(response: reqwest::Response) -> Result<Value, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status.as_u16()));
    }
    response
        .json()
        .await
        .map_err(|e| ProviderError::Decode(e.to_string()))
}

#[async_trait]
impl FoodDataProvider for FoodoscopeProvider {
    async fn standardize(&self, ingredient: &str) -> Result<String, ProviderError> {
        let endpoint = format!("/ingredient/search?name={ingredient}");
        let result = self
            .get_json(&self.config.recipe_api_base_url, &endpoint)
            .await?;

        // RecipeDB echoes unknown ingredients without a standard_name field
        Ok(result
            .get("standard_name")
            .and_then(Value::as_str)
            .unwrap_or(ingredient)
            .to_string())
    }

    async fn substitutes(
        &self,
        ingredient: &str,
        allergen: AllergenCategory,
    ) -> Result<Vec<SubstituteSuggestion>, ProviderError> {
        let body = json!({
            "ingredient": ingredient,
            "avoid_allergen": allergen.as_str(),
        });
        let result = self
            .post_json(&self.config.flavor_api_base_url, "/substitutes", &body)
            .await?;

        match result.get("substitutes") {
            Some(subs) => serde_json::from_value(subs.clone())
                .map_err(|e| ProviderError::Decode(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn cross_reactivity(&self, ingredient: &str) -> Result<CrossReactivity, ProviderError> {
        let endpoint = format!("/ingredient/{ingredient}/cross-reactivity");
        let result = self
            .get_json(&self.config.flavor_api_base_url, &endpoint)
            .await?;

        match result.get("cross_reactivity") {
            Some(cross) => serde_json::from_value(cross.clone())
                .map_err(|e| ProviderError::Decode(e.to_string())),
            None => Ok(CrossReactivity::new()),
        }
    }

    async fn nutrition(&self, ingredients: &[String]) -> Result<Value, ProviderError> {
        let body = json!({ "ingredients": ingredients });
        self.post_json(&self.config.recipe_api_base_url, "/nutrition/calculate", &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider_config::derive_flavor_url;

    fn test_config() -> ProviderConfig {
        let recipe_api_base_url = "http://localhost:1/recipe2-api".to_string();
        ProviderConfig {
            flavor_api_base_url: derive_flavor_url(&recipe_api_base_url),
            recipe_api_base_url,
            api_key: "test-key".to_string(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn test_provider_construction() {
        assert!(FoodoscopeProvider::new(test_config()).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_provider_error() {
        // Port 1 refuses connections; the error must stay inside ProviderError
        let provider = FoodoscopeProvider::new(test_config()).unwrap();
        let result = provider.standardize("milk").await;
        assert!(matches!(
            result,
            Err(ProviderError::Http(_)) | Err(ProviderError::Timeout(_))
        ));
    }
}
