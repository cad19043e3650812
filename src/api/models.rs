use serde::{Deserialize, Serialize};

use crate::dataset::Recipe;
use crate::matcher::{MatchResults, MatchTier, RankedRecipe};
use crate::utils::format_link;

/// Body of `POST /process-data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientsRequest {
    pub ingredients: Vec<String>,
}

/// Recipe as returned inside a tier group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub title: String,
    /// Lower-cased ingredient list as compact JSON text, or the raw cell
    /// when it could not be parsed
    #[serde(rename = "NER")]
    pub ner: String,
    pub directions: Vec<String>,
    pub num_steps: Option<usize>,
    pub source: String,
    pub link: String,
    pub formatted_link: Option<String>,
}

impl RecipeSummary {
    pub fn from_ranked(ranked: &RankedRecipe<'_>) -> Self {
        let recipe = ranked.recipe;

        Self {
            title: recipe.title.clone(),
            ner: normalized_ingredients(recipe),
            directions: recipe.parse_directions().unwrap_or_default(),
            num_steps: ranked.num_steps,
            source: recipe.source.clone(),
            link: recipe.link.clone(),
            formatted_link: format_link(&recipe.link),
        }
    }
}

fn normalized_ingredients(recipe: &Recipe) -> String {
    recipe
        .parse_ingredients()
        .ok()
        .map(|items| items.iter().map(|i| i.to_lowercase()).collect::<Vec<_>>())
        .and_then(|items| serde_json::to_string(&items).ok())
        .unwrap_or_else(|| recipe.ingredients.clone())
}

/// Response of `POST /process-data`: every tier key is always present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(rename = "Exact Match")]
    pub exact_match: Vec<RecipeSummary>,
    #[serde(rename = "Contains All Ingredients")]
    pub contains_all: Vec<RecipeSummary>,
    #[serde(rename = "Contains Some Ingredients")]
    pub contains_some: Vec<RecipeSummary>,
    #[serde(rename = "No Matching Ingredients")]
    pub no_match: Vec<RecipeSummary>,
}

impl ProcessResponse {
    pub fn from_results(results: &MatchResults<'_>) -> Self {
        let summarize = |tier: MatchTier| -> Vec<RecipeSummary> {
            results
                .tier(tier)
                .iter()
                .map(RecipeSummary::from_ranked)
                .collect()
        };

        Self {
            exact_match: summarize(MatchTier::ExactMatch),
            contains_all: summarize(MatchTier::ContainsAll),
            contains_some: summarize(MatchTier::ContainsSome),
            no_match: summarize(MatchTier::NoMatch),
        }
    }

    pub fn tier(&self, tier: MatchTier) -> &[RecipeSummary] {
        match tier {
            MatchTier::ExactMatch => &self.exact_match,
            MatchTier::ContainsAll => &self.contains_all,
            MatchTier::ContainsSome => &self.contains_some,
            MatchTier::NoMatch => &self.no_match,
        }
    }

    /// Groups in priority order
    pub fn groups(&self) -> impl Iterator<Item = (MatchTier, &[RecipeSummary])> {
        MatchTier::ALL
            .into_iter()
            .map(move |tier| (tier, self.tier(tier)))
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub dataset: String,
    pub recipes: usize,
}
