//! Cancellable delayed callbacks.
//!
//! Widgets that fake a round trip schedule their transition through a
//! [`ScheduledTask`]. Dropping the handle cancels the callback, so a widget
//! that is torn down mid-delay is never updated afterwards.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{CoreError, Result};

/// Handle to a callback that runs once after a delay.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Run `callback` once `delay` has elapsed.
    ///
    /// Fails with [`CoreError::NoRuntime`] when called outside a tokio
    /// runtime. `task` names the timer in that error.
    pub fn after<F>(task: &str, delay: Duration, callback: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| CoreError::NoRuntime {
            task: task.to_string(),
        })?;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Abort the timer. The callback will not run if it has not already.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// True once the callback ran or the task was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Let the callback run even after this handle is gone.
    pub fn detach(mut self) {
        self.handle.take();
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
