use crate::api::models::{IngredientsRequest, ProcessResponse};
use crate::dataset::{DatasetStats, RecipeTable};
use crate::matcher::{self, IngredientQuery};
use crate::utils::truncate;
use crate::error::DATASET_UNAVAILABLE_MESSAGE;
use crate::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Match ingredients against a local CSV dataset and print the tiers
pub fn match_local(dataset: &Path, ingredients: &[String], limit: usize, json: bool) -> Result<()> {
    let table = RecipeTable::from_path(dataset)?;

    let query = IngredientQuery::new(ingredients);
    let results = matcher::process(&query, table.iter());
    let response = ProcessResponse::from_results(&results);

    if json {
        let body = serde_json::to_string_pretty(&response)
            .map_err(|e| Error::Internal(format!("Failed to serialize results: {e}")))?;
        println!("{body}");
    } else {
        print_results(&response, limit);
    }

    Ok(())
}

/// Body of a `/process-data` reply: either the tiers or an error payload
#[derive(Deserialize)]
#[serde(untagged)]
enum ProcessReply {
    Failed { error: String },
    Matches(ProcessResponse),
}

/// POST the ingredients to a running server and return its tiers
pub async fn fetch_matches(server_url: &str, ingredients: &[String]) -> Result<ProcessResponse> {
    let client = Client::new();
    let url = format!("{}/process-data", server_url.trim_end_matches('/'));
    debug!("Requesting matches from {}", url);

    let response = client
        .post(&url)
        .json(&IngredientsRequest {
            ingredients: ingredients.to_vec(),
        })
        .send()
        .await?;

    let response = response.error_for_status()?;

    // A server without a dataset still answers 200, with an error body
    match response.json::<ProcessReply>().await? {
        ProcessReply::Matches(matches) => Ok(matches),
        ProcessReply::Failed { error } if error == DATASET_UNAVAILABLE_MESSAGE => {
            Err(Error::DatasetUnavailable)
        }
        ProcessReply::Failed { error } => Err(Error::Internal(format!("Server error: {error}"))),
    }
}

/// Ask a running server for matches and print the tiers
pub async fn find(server_url: &str, ingredients: &[String], limit: usize) -> Result<()> {
    let response = fetch_matches(server_url, ingredients).await?;
    print_results(&response, limit);
    Ok(())
}

/// Load a dataset and report how many rows have unparseable cells
pub fn check_dataset(dataset: &Path) -> Result<DatasetStats> {
    match RecipeTable::from_path(dataset) {
        Ok(table) => {
            let stats = table.stats();
            println!(
                "\x1b[32m\u{2713}\x1b[0m Loaded dataset: {}",
                dataset.display()
            );
            println!("  Recipes: {}", stats.total);
            println!(
                "  Unparseable ingredient lists: {}",
                stats.unparseable_ingredients
            );
            println!(
                "  Unparseable directions: {}",
                stats.unparseable_directions
            );
            Ok(stats)
        }
        Err(e) => {
            println!("\x1b[31m\u{2717}\x1b[0m Invalid dataset: {}", e);
            Err(e)
        }
    }
}

fn print_results(response: &ProcessResponse, limit: usize) {
    for (tier, recipes) in response.groups() {
        println!("\n{} ({})", tier, recipes.len());
        println!("{}", "-".repeat(75));

        if recipes.is_empty() {
            println!("  (none)");
            continue;
        }

        println!("{:<50} {:>6}  {:<17}", "Title", "Steps", "Source");
        for recipe in recipes.iter().take(limit) {
            let steps = recipe
                .num_steps
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string());

            println!(
                "{:<50} {:>6}  {:<17}",
                truncate(&recipe.title, 48),
                steps,
                truncate(&recipe.source, 17)
            );
            if let Some(link) = &recipe.formatted_link {
                println!("  {link}");
            }
        }

        if recipes.len() > limit {
            println!("  ... and {} more", recipes.len() - limit);
        }
    }
}
