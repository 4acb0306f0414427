//! Bounded retry with a fixed delay.
//!
//! The loop makes at most `max_attempts` attempts and sleeps `delay` between
//! consecutive attempts, never after the last one. Errors the caller does not
//! classify as transient end the loop immediately.
//!
//! Sleeping goes through [`Sleep`] so callers pick the timer. Servers use a
//! Tokio sleeper; tests record the requested delays instead of waiting.

use std::future::Future;
use std::time::Duration;

/// Something that can wait for a duration.
pub trait Sleep {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Retry bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

/// The error from the last attempt, with the number of attempts made.
#[derive(Debug, thiserror::Error)]
#[error("giving up after {attempts} attempt(s): {source}")]
pub struct RetryError<E: std::error::Error + 'static> {
    pub attempts: u32,
    #[source]
    pub source: E,
}

impl<E: std::error::Error + 'static> RetryError<E> {
    pub fn into_source(self) -> E {
        self.source
    }
}

impl RetryPolicy {
    /// Create a policy. A bound of zero is treated as a single attempt.
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            delay,
        }
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `op` until it succeeds, fails with a non-transient error, or the
    /// attempt bound is reached.
    ///
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, E, F, Fut, S, P>(
        &self,
        sleeper: &S,
        is_transient: P,
        mut op: F,
    ) -> Result<T, RetryError<E>>
    where
        E: std::error::Error + 'static,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        S: Sleep,
        P: Fn(&E) -> bool,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && is_transient(&e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "attempt failed, retrying in {:?}",
                        self.delay
                    );
                    sleeper.sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(RetryError {
                        attempts: attempt,
                        source: e,
                    });
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(2))
    }
}
