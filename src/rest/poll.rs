//! Waiting for asynchronous server-side work to settle.
//!
//! Some actions (buying a batch, generating a scan form) return before the
//! platform has finished. [`wait_until`] refreshes a resource until a
//! predicate holds, sleeping between attempts without blocking the runtime.
//!
//! There is no deadline unless one is set with [`PollOptions::deadline`].
//! Dropping the returned future stops the wait; nothing on the server is
//! rolled back.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use easypost::rest::{wait_until, PollOptions, PollError};
//!
//! let batch = batch.buy(&client).await?;
//! let options = PollOptions::default().deadline(Duration::from_secs(120));
//!
//! match wait_until(&client, &batch, &options, |b: &Batch| b.state == BatchState::Purchased).await {
//!     Ok(batch) => println!("purchased {}", batch.shipments.len()),
//!     Err(PollError::Timeout { last, .. }) => println!("still {}", last.state),
//!     Err(PollError::Resource(e)) => return Err(e.into()),
//! }
//! ```

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::clients::RestClient;
use crate::rest::{Resource, ResourceError};

/// Default wait between refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// How often and for how long to poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollOptions {
    interval: Duration,
    deadline: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
        }
    }
}

impl PollOptions {
    /// Sets the wait between refreshes.
    #[must_use]
    pub const fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the maximum total time to wait.
    #[must_use]
    pub const fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the wait between refreshes.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.interval
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn poll_deadline(&self) -> Option<Duration> {
        self.deadline
    }
}

/// Error returned by [`wait_until`].
#[derive(Debug, Error)]
pub enum PollError<R> {
    /// The deadline passed before the predicate held.
    #[error("gave up waiting after {elapsed:?} ({attempts} refreshes)")]
    Timeout {
        /// The last snapshot observed.
        last: Box<R>,
        /// Time spent waiting.
        elapsed: Duration,
        /// Number of refreshes performed.
        attempts: u32,
    },

    /// A refresh failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl<R> PollError<R> {
    /// Returns the last snapshot for a timeout.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&R> {
        match self {
            Self::Timeout { last, .. } => Some(last),
            Self::Resource(_) => None,
        }
    }

    /// Consumes the error, returning the last snapshot for a timeout.
    #[must_use]
    pub fn into_last_snapshot(self) -> Option<R> {
        match self {
            Self::Timeout { last, .. } => Some(*last),
            Self::Resource(_) => None,
        }
    }
}

/// Refreshes `resource` until `predicate` holds, then returns that snapshot.
///
/// Each attempt refreshes first, so the predicate never sees the stale input.
/// Between attempts the task sleeps for the interval, shortened so it never
/// overshoots the deadline.
///
/// # Errors
///
/// Returns [`PollError::Timeout`] with the last refreshed snapshot when the
/// deadline passes, or [`PollError::Resource`] if a refresh fails.
pub async fn wait_until<R, F>(
    client: &RestClient,
    resource: &R,
    options: &PollOptions,
    mut predicate: F,
) -> Result<R, PollError<R>>
where
    R: Resource,
    F: FnMut(&R) -> bool,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        let current = resource.refresh(client).await?;
        attempts += 1;

        if predicate(&current) {
            tracing::info!(
                resource = R::NAME,
                id = current.id(),
                attempts,
                "poll settled"
            );
            return Ok(current);
        }

        let elapsed = started.elapsed();
        let sleep_for = match options.deadline {
            Some(deadline) if elapsed >= deadline => {
                tracing::debug!(resource = R::NAME, attempts, "poll deadline reached");
                return Err(PollError::Timeout {
                    last: Box::new(current),
                    elapsed,
                    attempts,
                });
            }
            Some(deadline) => options.interval.min(deadline - elapsed),
            None => options.interval,
        };

        tracing::debug!(
            resource = R::NAME,
            id = current.id(),
            attempts,
            wait_ms = u64::try_from(sleep_for.as_millis()).unwrap_or(u64::MAX),
            "poll predicate not met"
        );
        tokio::time::sleep(sleep_for).await;
    }
}

// Verify option types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PollOptions>();
    assert_send_sync::<PollError<String>>();
};
