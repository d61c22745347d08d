//! Per-operation cancellation and deadline propagation.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Reasons an operation stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Interrupted {
    /// The caller's deadline elapsed.
    #[error("operation deadline exceeded")]
    DeadlineExceeded,
    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
}

/// Caller-supplied cancellation token and optional deadline, threaded from
/// the transport through the service down to the storage call.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl OperationContext {
    /// Creates a context that is never cancelled and has no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deadline `timeout` from now. A timeout too large to represent
    /// leaves the context without a deadline.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Returns the cancellation token.
    #[must_use]
    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the time left before the deadline, if one is set.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Fails when the context is already cancelled or past its deadline.
    ///
    /// # Errors
    ///
    /// Returns the matching [`Interrupted`] reason.
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.cancellation.is_cancelled() {
            return Err(Interrupted::Cancelled);
        }
        if self.remaining().is_some_and(|left| left.is_zero()) {
            return Err(Interrupted::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drives `operation` to completion unless the context is cancelled or
    /// its deadline elapses first, in which case the operation is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Interrupted`] when the operation did not complete.
    pub async fn run<F>(&self, operation: F) -> Result<F::Output, Interrupted>
    where
        F: Future,
    {
        self.check()?;
        let guarded = async {
            tokio::select! {
                biased;
                () = self.cancellation.cancelled() => Err(Interrupted::Cancelled),
                output = operation => Ok(output),
            }
        };
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, guarded)
                .await
                .map_err(|_| Interrupted::DeadlineExceeded)?,
            None => guarded.await,
        }
    }
}
