//! Task scope tied to a page's lifetime.
//!
//! Every simulated backend call a page makes runs through [`ViewScope::run`].
//! Once the scope is torn down (explicitly, or by dropping the page) pending
//! calls resolve to [`FlowError::Cancelled`] and their results are discarded,
//! so a page that is gone never applies a stale completion.

use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::flows::errors::FlowError;

#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Race `fut` against teardown.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, FlowError>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(FlowError::Cancelled),
            output = fut => Ok(output),
        }
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            token: self.token.clone(),
        }
    }

    pub fn teardown(&self) {
        self.token.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Teardown handle usable from other tasks, e.g. a navigation or Ctrl-C watcher
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    token: CancellationToken,
}

impl ScopeHandle {
    pub fn teardown(&self) {
        tracing::debug!("View scope torn down");
        self.token.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn torn_down(&self) {
        self.token.cancelled().await;
    }
}
