//! # Provider Configuration
//!
//! Configuration for the external food-data providers and the circuit
//! breaker that guards calls to them. Values come from the environment in
//! deployed setups (a `.env` file works via the `dotenv` crate); defaults
//! match the provider contract: one attempt per call, 30-second timeout.

use anyhow::{Context, Result};
use std::env;

/// Default per-request timeout for provider calls in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Consecutive failures before the provider circuit opens
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;
/// Seconds before an open circuit resets and calls are attempted again
pub const DEFAULT_RESET_SECS: u64 = 60;

/// Connection settings for the RecipeDB/FlavorDB provider pair.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the RecipeDB API (standardization, nutrition)
    pub recipe_api_base_url: String,
    /// Base URL of the FlavorDB API (substitutes, cross-reactivity)
    pub flavor_api_base_url: String,
    /// Bearer token sent with every request
    pub api_key: String,
    /// Per-request timeout in seconds; single attempt, no retries
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Load configuration from `RECIPE_API_BASE_URL` and `RECIPE_API_KEY`.
    ///
    /// The FlavorDB base URL is derived from the RecipeDB one; both APIs are
    /// served by the same host under sibling path prefixes.
    pub fn from_env() -> Result<Self> {
        let recipe_api_base_url =
            env::var("RECIPE_API_BASE_URL").context("RECIPE_API_BASE_URL must be set")?;
        let api_key = env::var("RECIPE_API_KEY").context("RECIPE_API_KEY must be set")?;
        let flavor_api_base_url = derive_flavor_url(&recipe_api_base_url);

        Ok(Self {
            recipe_api_base_url,
            flavor_api_base_url,
            api_key,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }
}

/// Derive the FlavorDB base URL from the RecipeDB one
pub fn derive_flavor_url(recipe_api_base_url: &str) -> String {
    recipe_api_base_url.replace("recipe2-api", "flavor-api")
}

/// Circuit breaker settings for provider calls.
#[derive(Debug, Clone)]
pub struct BreakerConfig {
    /// Failures before the circuit opens
    pub failure_threshold: u32,
    /// Seconds an open circuit stays open before resetting
    pub reset_secs: u64,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            reset_secs: DEFAULT_RESET_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_flavor_url() {
        assert_eq!(
            derive_flavor_url("https://api.example.com/recipe2-api"),
            "https://api.example.com/flavor-api"
        );
        // URLs without the marker pass through unchanged
        assert_eq!(
            derive_flavor_url("http://localhost:9000"),
            "http://localhost:9000"
        );
    }

    #[test]
    fn test_breaker_defaults() {
        let config = BreakerConfig::default();
        assert_eq!(config.failure_threshold, 5);
        assert_eq!(config.reset_secs, 60);
    }
}
