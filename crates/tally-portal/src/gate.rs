//! One-time activation of the dashboard blocks.
//!
//! Salary and birthday data is only rendered once the user's dashboard has
//! the matching blocks switched on. The switch is a single state transition
//! per client, guarded by an async mutex so concurrent callers wait for the
//! first activation instead of repeating it.

use std::future::Future;

use tokio::sync::Mutex;

use crate::error::PortalError;

#[derive(Debug, Default)]
pub struct BlockGate {
    activated: Mutex<bool>,
}

impl BlockGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_activated(&self) -> bool {
        *self.activated.lock().await
    }

    /// Run `activate` unless a previous call already succeeded.
    ///
    /// The lock is held across `activate`, so at most one activation runs at
    /// a time. A failed activation leaves the gate closed for the next caller.
    ///
    /// # Errors
    ///
    /// Whatever `activate` returns.
    pub async fn ensure_on<F, Fut>(&self, activate: F) -> Result<(), PortalError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), PortalError>>,
    {
        let mut activated = self.activated.lock().await;
        if *activated {
            return Ok(());
        }

        activate().await?;
        *activated = true;
        tracing::debug!("dashboard blocks activated");
        Ok(())
    }
}
