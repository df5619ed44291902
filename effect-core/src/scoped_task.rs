// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background tasks with cooperative cancellation.

use crate::CancellationToken;
use core::future::Future;

/// Handle to a spawned background task, cancelled when dropped.
///
/// The spawned future receives a [`CancellationToken`] and is expected to exit once
/// it fires. The token fires when the handle is dropped, when [`cancel`](Self::cancel)
/// is called, or, for tasks started through
/// [`LifecycleScope::launch`](crate::LifecycleScope::launch), when the scope ends.
///
/// # Example
///
/// ```rust
/// use effect_core::ScopedTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = ScopedTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// drop(task); // signals the task to stop
/// # }
/// ```
#[derive(Debug)]
pub struct ScopedTask {
    cancel: CancellationToken,
}

impl ScopedTask {
    /// Spawns `f(token)` on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        tokio::spawn(f(cancel.clone()));
        Self { cancel }
    }

    /// Signals the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
