//! HTTP route definitions.

mod health;
mod results;
mod voting;

use crate::AppState;
use axum::Router;

/// Routes served by the voting service.
pub fn voting_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(voting::routes())
}

/// Routes served by the result service.
pub fn results_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(results::routes())
}
