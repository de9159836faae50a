//! Cooperative stop signal for an import run.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error_handling::ImportError;

/// Cancellation token plus an optional deadline.
///
/// The importer polls this once per row; it is never consulted while a
/// flush is in progress.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl StopSignal {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Stops the run once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stops the run `timeout` from now.
    ///
    /// A timeout too large for the clock leaves the run unbounded.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => {
                log::warn!(
                    "Timeout of {:?} is out of range; running without a deadline",
                    timeout
                );
                self
            }
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// `Err` once the token is cancelled or the deadline has passed.
    /// Cancellation takes precedence when both hold.
    pub fn check(&self) -> Result<(), ImportError> {
        if self.token.is_cancelled() {
            return Err(ImportError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ImportError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
