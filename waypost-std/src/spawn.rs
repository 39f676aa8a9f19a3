//! Executor integrations for lazy route loads.

use futures::future::BoxFuture;
use tokio::runtime::{Handle, TryCurrentError};
use waypost_core::Spawn;

/// Spawns lazy loads onto a tokio runtime.
///
/// # Example
///
/// ```rust,ignore
/// let outlet = ViewOutlet::new(mount, TokioSpawner::current()?);
/// ```
#[derive(Debug, Clone)]
pub struct TokioSpawner {
    handle: Handle,
}

impl TokioSpawner {
    /// Uses the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// Fails when called outside a tokio runtime.
    pub fn current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::from_handle)
    }

    /// Uses the runtime behind `handle`.
    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

impl Spawn for TokioSpawner {
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        // Detached.
        drop(self.handle.spawn(future));
    }
}
