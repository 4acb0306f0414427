//! Vote submission routes.

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use ballot_core::VoteReceipt;

use crate::error::Result;
use crate::handlers::{handle_vote, VoteInput};
use crate::html;
use crate::AppState;

/// Create voting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/vote", post(vote_handler))
}

/// Root handler.
async fn root() -> Html<String> {
    Html(html::vote_form())
}

/// POST /vote - Record one vote.
async fn vote_handler(
    State(state): State<AppState>,
    VoteInput(candidate): VoteInput,
) -> Result<Json<VoteReceipt>> {
    let receipt = handle_vote(state.store.as_ref(), candidate).await?;
    Ok(Json(receipt))
}
