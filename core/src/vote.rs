//! Candidates and vote records.

use crate::error::{Error, Result};
use crate::VoteId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum candidate length in characters, matching the `VARCHAR(255)` column.
pub const MAX_CANDIDATE_LEN: usize = 255;

/// A validated candidate name.
///
/// Surrounding whitespace is trimmed. The remaining name is non-empty, at
/// most [`MAX_CANDIDATE_LEN`] characters and free of NUL, which Postgres text
/// columns cannot store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    /// Validate raw input into a candidate.
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(Error::BlankCandidate);
        }
        if name.contains('\0') {
            return Err(Error::CandidateHasNul);
        }

        let len = name.chars().count();
        if len > MAX_CANDIDATE_LEN {
            return Err(Error::CandidateTooLong {
                len,
                max: MAX_CANDIDATE_LEN,
            });
        }

        Ok(Self(name.to_string()))
    }

    /// Validate an optional JSON field.
    ///
    /// `None` and `null` both mean the field is missing.
    pub fn from_json(value: Option<&serde_json::Value>) -> Result<Self> {
        match value {
            None | Some(serde_json::Value::Null) => Err(Error::MissingCandidate),
            Some(serde_json::Value::String(s)) => Self::parse(s),
            Some(_) => Err(Error::CandidateNotText),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A stored vote. Votes are append-only and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub candidate: String,
    pub voted_at: NaiveDateTime,
}

/// Response body for an accepted vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub status: String,
    pub candidate: String,
}

impl VoteReceipt {
    /// Receipt for a vote that was recorded.
    pub fn success(vote: &Vote) -> Self {
        Self {
            status: "success".to_string(),
            candidate: vote.candidate.clone(),
        }
    }
}
