//! # Menu Safety Report Example
//!
//! This example demonstrates the allergen engine end to end: it analyzes a
//! few dishes with the offline `StaticProvider` and prints their safety
//! reports. Set `RECIPE_API_BASE_URL` and `RECIPE_API_KEY` (a `.env` file
//! works) to run the same analysis against the live Foodoscope APIs instead.

use allergy_guard::engine::SafetyEngine;
use allergy_guard::foodoscope::FoodoscopeProvider;
use allergy_guard::provider::{StaticProvider, SubstituteSuggestion};
use allergy_guard::provider_config::ProviderConfig;
use allergy_guard::report::SafetyReport;
use allergy_guard::taxonomy::AllergenCategory;
use anyhow::Result;

fn print_report(name: &str, report: &SafetyReport) -> Result<()> {
    println!("🍽️  {name}");
    println!("   Risk level:   {}", report.risk_level);
    println!("   Safety score: {}", report.safety_score);
    println!("   Allergens:    {:?}", report.allergens.allergens_detected);
    println!("   Diets:        {}", report.dietary_compatibility);
    for recommendation in &report.recommendations {
        println!("   • {recommendation}");
    }
    for finding in &report.allergens.detailed_analysis {
        if !finding.safe_substitutes.is_empty() {
            let names: Vec<&str> = finding
                .safe_substitutes
                .iter()
                .map(|s| s.name.as_str())
                .collect();
            println!("   Substitutes for {}: {}", finding.ingredient, names.join(", "));
        }
    }
    println!("{}", serde_json::to_string_pretty(report)?);
    println!();
    Ok(())
}

async fn run_offline() -> Result<()> {
    let provider = StaticProvider::new()
        .with_standard_name("maida", "wheat flour")
        .with_substitutes(
            "milk",
            AllergenCategory::Milk,
            vec![
                SubstituteSuggestion::new("oat milk").with_similarity(0.9),
                SubstituteSuggestion::new("coconut milk").with_similarity(0.7),
            ],
        );
    let engine = SafetyEngine::new(provider);

    let menu: [(&str, &[&str]); 3] = [
        ("Paneer toast", &["milk", "bread", "butter"]),
        ("Steamed rice", &["rice", "water", "salt"]),
        ("Shrimp pad thai", &["rice noodles", "shrimp", "peanut", "egg"]),
    ];

    for (name, ingredients) in menu {
        let ingredients: Vec<String> = ingredients.iter().map(|s| s.to_string()).collect();
        let report = engine.generate_safety_report(&ingredients).await;
        print_report(name, &report)?;
    }

    Ok(())
}

async fn run_live(config: ProviderConfig) -> Result<()> {
    let provider = FoodoscopeProvider::new(config)?;
    let engine = SafetyEngine::new(provider);

    let ingredients: Vec<String> = std::env::args().skip(1).collect();
    let ingredients = if ingredients.is_empty() {
        vec!["whole wheat flour".to_string(), "milk".to_string(), "sugar".to_string()]
    } else {
        ingredients
    };

    let report = engine.generate_safety_report(&ingredients).await;
    print_report(&ingredients.join(", "), &report)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    match ProviderConfig::from_env() {
        Ok(config) => run_live(config).await,
        Err(_) => {
            println!("Provider environment not configured, using the offline provider\n");
            run_offline().await
        }
    }
}
