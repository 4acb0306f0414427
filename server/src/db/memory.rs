//! In-process vote storage, compiled with the `test-util` feature.
//!
//! Behaves like the votes table for a single process: ids come from an atomic
//! sequence starting at 1 and rows are never removed. Backs the router and
//! end-to-end tests.

use super::VoteStore;
use async_trait::async_trait;
use ballot_core::{Candidate, Tally, Vote, VoteId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};

#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: AtomicI32,
    votes: DashMap<VoteId, Vote>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored votes.
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn get(&self, id: VoteId) -> Option<Vote> {
        self.votes.get(&id).map(|v| v.value().clone())
    }
}

#[async_trait]
impl VoteStore for MemoryStore {
    async fn record_vote(&self, candidate: &Candidate) -> Result<Vote, sqlx::Error> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let vote = Vote {
            id,
            candidate: candidate.to_string(),
            voted_at: chrono::Utc::now().naive_utc(),
        };
        self.votes.insert(id, vote.clone());
        Ok(vote)
    }

    async fn tally(&self) -> Result<Tally, sqlx::Error> {
        let mut tally = Tally::new();
        for entry in self.votes.iter() {
            tally.add(entry.candidate.clone(), 1);
        }
        Ok(tally)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
