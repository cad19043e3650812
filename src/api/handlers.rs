use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    dataset::RecipeTable,
    matcher::{self, IngredientQuery},
    Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// `None` when the dataset failed to load at startup
    pub dataset: Option<Arc<RecipeTable>>,
    pub settings: crate::config::Settings,
}

impl AppState {
    fn table(&self) -> Result<&RecipeTable> {
        self.dataset.as_deref().ok_or(Error::DatasetUnavailable)
    }
}

/// POST /process-data - Categorize recipes against the caller's ingredients
pub async fn process_data(
    State(state): State<AppState>,
    Json(request): Json<IngredientsRequest>,
) -> Result<Json<ProcessResponse>> {
    debug!("Process request: {:?}", request.ingredients);

    let table = state.table()?;
    let query = IngredientQuery::new(&request.ingredients);
    let results = matcher::process(&query, table.iter());

    Ok(Json(ProcessResponse::from_results(&results)))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let recipes = state.dataset.as_ref().map(|t| t.len());

    Ok(Json(ReadinessResponse {
        ready: recipes.is_some(),
        dataset: if recipes.is_some() { "ok" } else { "unavailable" }.to_string(),
        recipes: recipes.unwrap_or(0),
    }))
}
