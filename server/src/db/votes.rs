//! Database operations for the votes table.

use super::Database;
use async_trait::async_trait;
use ballot_core::{Candidate, Tally, Vote, VoteId};
use chrono::NaiveDateTime;
use sqlx::Row;

/// Storage used by the request handlers.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Insert one vote and return the stored row.
    async fn record_vote(&self, candidate: &Candidate) -> Result<Vote, sqlx::Error>;

    /// Count votes per candidate.
    async fn tally(&self) -> Result<Tally, sqlx::Error>;

    /// Check that storage is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// A stored vote row from the database.
#[derive(Debug)]
pub struct StoredVote {
    pub id: VoteId,
    pub candidate: String,
    pub voted_at: NaiveDateTime,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for StoredVote {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(StoredVote {
            id: row.try_get("id")?,
            candidate: row.try_get("candidate")?,
            voted_at: row.try_get("voted_at")?,
        })
    }
}

impl StoredVote {
    pub fn into_vote(self) -> Vote {
        Vote {
            id: self.id,
            candidate: self.candidate,
            voted_at: self.voted_at,
        }
    }
}

#[async_trait]
impl VoteStore for Database {
    async fn record_vote(&self, candidate: &Candidate) -> Result<Vote, sqlx::Error> {
        let mut conn = self.acquire().await?;

        let stored = sqlx::query_as::<_, StoredVote>(
            r#"
            INSERT INTO votes (candidate)
            VALUES ($1)
            RETURNING id, candidate, voted_at
            "#,
        )
        .bind(candidate.as_str())
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored.into_vote())
    }

    async fn tally(&self) -> Result<Tally, sqlx::Error> {
        let mut conn = self.acquire().await?;

        let rows: Vec<(String, i64)> =
            sqlx::query_as(r#"SELECT candidate, COUNT(*) FROM votes GROUP BY candidate"#)
                .fetch_all(&mut *conn)
                .await?;

        Ok(rows.into_iter().collect())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
