// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Owner lifetime for flows and their background work.
//!
//! A [`LifecycleScope`] stands in for whatever owns a flow: a view-model, a UI
//! composition, or a plain task. Ending the scope runs every registered `on_end`
//! callback once and cancels every task launched in it.
//!
//! ```
//! use effect_core::LifecycleScope;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let scope = LifecycleScope::new();
//! let torn_down = Arc::new(AtomicBool::new(false));
//!
//! let flag = torn_down.clone();
//! scope.on_end(move || flag.store(true, Ordering::SeqCst));
//!
//! scope.end();
//! assert!(torn_down.load(Ordering::SeqCst));
//! assert!(scope.is_ended());
//! ```

use crate::{CancellationToken, Cancelled, ScopedTask};
use core::future::Future;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

type EndCallback = Box<dyn FnOnce() + Send + 'static>;

struct ScopeInner {
    token: CancellationToken,
    callbacks: Mutex<Vec<EndCallback>>,
}

/// Cloneable handle to an owner lifetime. All clones end together.
#[derive(Clone)]
pub struct LifecycleScope {
    inner: Arc<ScopeInner>,
}

impl LifecycleScope {
    /// Creates a scope that has not ended.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                token: CancellationToken::new(),
                callbacks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Ends the scope.
    ///
    /// Registered callbacks run once, in registration order, on the calling thread.
    /// Ending an already ended scope does nothing.
    pub fn end(&self) {
        let callbacks = {
            let mut callbacks = self.inner.callbacks.lock();
            if !self.inner.token.cancel() {
                return;
            }
            std::mem::take(&mut *callbacks)
        };

        debug!("lifecycle scope: ending, {} callback(s)", callbacks.len());
        for callback in callbacks {
            callback();
        }
    }

    /// Returns `true` once [`end`](Self::end) has been called on any clone.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    /// Future resolving when the scope ends.
    pub fn ended(&self) -> Cancelled<'_> {
        self.inner.token.cancelled()
    }

    /// Registers `callback` to run when the scope ends.
    ///
    /// If the scope has already ended the callback runs immediately.
    pub fn on_end<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut callbacks = self.inner.callbacks.lock();
        if self.inner.token.is_cancelled() {
            drop(callbacks);
            callback();
            return;
        }
        callbacks.push(Box::new(callback));
    }

    /// Spawns a background task bound to this scope.
    ///
    /// The task's token fires when the scope ends or when the returned handle is
    /// dropped, whichever comes first. Launching into an ended scope spawns a task
    /// whose token is already cancelled.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn launch<F, Fut>(&self, f: F) -> ScopedTask
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task = ScopedTask::spawn(f);
        let token = task.token();
        self.on_end(move || {
            token.cancel();
        });
        task
    }
}

impl Default for LifecycleScope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LifecycleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleScope")
            .field("ended", &self.is_ended())
            .field("pending_callbacks", &self.inner.callbacks.lock().len())
            .finish()
    }
}
