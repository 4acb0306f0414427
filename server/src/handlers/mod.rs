//! Request handlers for ballot operations.

mod results;
mod vote;

pub use results::*;
pub use vote::*;
