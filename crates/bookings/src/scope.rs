use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::RepositoryError;

/// Request-scoped cancellation and deadline handle.
///
/// Threaded explicitly through service calls. The service imposes no timeout
/// of its own; it only honors what the caller put here.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope that is cancelled together with `token`.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancel: token,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive a storage call, dropping it if the scope is cancelled or the
    /// deadline passes first.
    pub async fn run<T, F>(&self, call: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RepositoryError::Cancelled),
            _ = deadline => Err(RepositoryError::DeadlineExceeded),
            res = call => res,
        }
    }
}
