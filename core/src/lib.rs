//! # Ballot Core
//!
//! Domain types shared by the voting and result services.
//!
//! This crate holds everything about ballots that does not touch a socket or a
//! database: candidate validation, the stored vote record, tallies, and the
//! bounded retry loop used to wait for the database at startup.
//!
//! ## Design Principles
//!
//! - **No IO**: the crate never opens connections or sleeps on its own
//! - **Injectable time**: retry delays go through the [`retry::Sleep`] trait
//! - **Typed input**: a [`Candidate`] can only be built from valid input
//!
//! ## Quick Start
//!
//! ```rust
//! use ballot_core::{Candidate, Tally};
//!
//! let alice = Candidate::parse("  Alice ").unwrap();
//! assert_eq!(alice.as_str(), "Alice");
//!
//! let tally: Tally = vec![("Alice".to_string(), 2), ("Bob".to_string(), 1)]
//!     .into_iter()
//!     .collect();
//! assert_eq!(tally.get("Alice"), 2);
//! assert_eq!(tally.total(), 3);
//! ```

pub mod error;
pub mod retry;
pub mod tally;
pub mod vote;

pub use error::Error;
pub use retry::{RetryError, RetryPolicy, Sleep};
pub use tally::Tally;
pub use vote::{Candidate, Vote, VoteReceipt, MAX_CANDIDATE_LEN};

/// Auto-incrementing vote identifier.
pub type VoteId = i32;
