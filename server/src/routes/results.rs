//! Tally routes.

use axum::{extract::State, response::Html, routing::get, Json, Router};
use ballot_core::Tally;

use crate::error::Result;
use crate::handlers::handle_results;
use crate::html;
use crate::AppState;

/// Create result routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/results", get(results_handler))
        .route("/results/table", get(table_handler))
}

/// Root handler.
async fn root() -> &'static str {
    "Result App Service - GET results from /results (JSON) or /results/table (HTML)"
}

/// GET /results - Vote counts per candidate as JSON.
async fn results_handler(State(state): State<AppState>) -> Result<Json<Tally>> {
    let tally = handle_results(state.store.as_ref()).await?;
    Ok(Json(tally))
}

/// GET /results/table - Vote counts as an HTML table.
async fn table_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let tally = handle_results(state.store.as_ref()).await?;
    Ok(Html(html::tally_table(&tally)))
}
