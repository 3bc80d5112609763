//! Runs store operations as background tasks on a tokio runtime.

use std::future::Future;

use tokio::runtime::Handle;
use tracing::Instrument;
use wcsdk_core::{WooError, WooResult};

/// Dispatches each store operation onto a runtime and awaits its result.
///
/// The operation keeps running to completion if the caller's future is
/// dropped; the caller simply stops waiting for it.
#[derive(Debug, Clone)]
pub struct TaskEngine {
    handle: Handle,
}

impl TaskEngine {
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Uses the runtime the caller is running on.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Spawns `operation` inside an `info` span tagged with `caller` and
    /// `name`, then awaits it.
    ///
    /// # Errors
    ///
    /// Returns the operation's own error unchanged. A task that panics or is
    /// cancelled by runtime shutdown yields a generic error instead of
    /// propagating the panic.
    pub async fn with_default_context<T, F>(
        &self,
        caller: &'static str,
        name: &'static str,
        operation: F,
    ) -> WooResult<T>
    where
        F: Future<Output = WooResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let span = tracing::info_span!("store_operation", caller, operation = name);
        let task = self.handle.spawn(operation.instrument(span));

        match task.await {
            Ok(result) => {
                if let Err(err) = &result {
                    tracing::debug!(caller, operation = name, error = %err, "store operation failed");
                }
                result
            }
            Err(join_err) => {
                tracing::error!(caller, operation = name, error = %join_err, "store task aborted");
                Err(WooError::generic_with_message(format!(
                    "{caller}::{name} did not complete: {join_err}"
                )))
            }
        }
    }
}
