//! # AllergyGuard Core
//!
//! Allergen detection and dish safety scoring for restaurant menus: classify
//! ingredient lists against a fixed allergen taxonomy, enrich the result with
//! external food-data lookups, and produce per-dish safety reports with risk
//! levels, dietary-compatibility flags, and substitute suggestions.

pub mod circuit_breaker;
pub mod detector;
pub mod dish;
pub mod engine;
pub mod foodoscope;
pub mod gateway;
pub mod normalize;
pub mod provider;
pub mod provider_config;
pub mod report;
pub mod taxonomy;
