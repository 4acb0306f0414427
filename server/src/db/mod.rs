//! Database module for PostgreSQL persistence.
//!
//! With the `test-util` feature this also exports `MemoryStore`, an
//! in-process [`VoteStore`] used as the test backend. Production binaries
//! only ever use [`Database`].

#[cfg(feature = "test-util")]
mod memory;
mod pool;
mod votes;

#[cfg(feature = "test-util")]
pub use memory::*;
pub use pool::*;
pub use votes::*;
