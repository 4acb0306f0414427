//! Vote handler - validates and records a single ballot.

use crate::db::VoteStore;
use crate::error::{AppError, Result};
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use ballot_core::{Candidate, VoteReceipt};
use std::collections::HashMap;

/// Candidate taken from a JSON or form-encoded request body.
///
/// A request without a content type is treated as carrying no candidate.
#[derive(Debug)]
pub struct VoteInput(pub Candidate);

impl<S: Send + Sync> FromRequest<S> for VoteInput {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();

        let candidate = match mime.as_str() {
            "" => return Err(ballot_core::Error::MissingCandidate.into()),
            m if is_json(m) => {
                let Json(body) = Json::<serde_json::Value>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Candidate::from_json(body.get("candidate"))?
            }
            "application/x-www-form-urlencoded" => {
                let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                match fields.get("candidate") {
                    Some(raw) => Candidate::parse(raw)?,
                    None => return Err(ballot_core::Error::MissingCandidate.into()),
                }
            }
            other => return Err(AppError::UnsupportedMediaType(other.to_string())),
        };

        Ok(VoteInput(candidate))
    }
}

/// `application/json` or a structured `application/*+json` type.
fn is_json(mime: &str) -> bool {
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Record a vote and build the receipt returned to the client.
pub async fn handle_vote(store: &dyn VoteStore, candidate: Candidate) -> Result<VoteReceipt> {
    let vote = store.record_vote(&candidate).await?;
    tracing::info!(id = vote.id, candidate = %vote.candidate, "Vote recorded");
    Ok(VoteReceipt::success(&vote))
}
