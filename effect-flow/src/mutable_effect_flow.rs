// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Writable effect flow bound to a [`LifecycleScope`].
//!
//! ## Characteristics
//!
//! - **Hot**: `emit` never waits for subscribers.
//! - **Replay**: up to `replay` values emitted while nobody listens are kept for the
//!   next subscriber.
//! - **Edge reset**: the replay buffer is cleared every time the subscriber count goes
//!   from zero to non-zero or back (see [`EdgeReset`]).
//! - **Scoped**: when the owning scope ends, every subscriber is detached, further
//!   `emit`/`subscribe` calls fail with `SubjectError::Closed`, and the background
//!   subscriber observation stops.
//! - **Owned by its handles**: the scope does not keep a flow alive. Once every
//!   `MutableEffectFlow` and `EffectFlow` handle is dropped, remaining subscriptions end.
//!
//! ## Example
//!
//! ```
//! use effect_flow::{LifecycleScope, MutableEffectFlow};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let scope = LifecycleScope::new();
//! let flow = MutableEffectFlow::new(1, &scope).unwrap();
//!
//! flow.emit("A").unwrap();
//! let mut first = flow.subscribe().unwrap();
//! assert_eq!(first.next().await, Some("A"));
//! first.unsubscribe();
//!
//! flow.emit("B").unwrap();
//! let mut second = flow.subscribe().unwrap();
//! assert_eq!(second.next().await, Some("B"));
//! # }
//! ```

use crate::{EdgeReset, EffectFlow, EffectSink, EffectSource};
use effect_core::{
    CancellationToken, EffectError, LifecycleScope, ReplaySubject, Result, ScopedTask,
    SubjectError, Subscription,
};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Replay capacity used by [`MutableEffectFlow::with_default_replay`] and the
/// view-model/composition shortcuts.
pub const DEFAULT_REPLAY: NonZeroUsize = NonZeroUsize::MIN;

pub(crate) struct FlowInner<T: Clone + Send + 'static> {
    pub(crate) subject: ReplaySubject<T>,
    observing: Arc<AtomicBool>,
    _observation: ScopedTask,
}

/// Hot, replaying effect flow whose buffer is cleared when the subscriber count crosses zero.
///
/// Cheap to clone; clones share state. Hand out [`as_effect_flow`](Self::as_effect_flow)
/// to consumers that must not emit.
///
/// See the [module documentation](self) for details.
pub struct MutableEffectFlow<T: Clone + Send + 'static> {
    inner: Arc<FlowInner<T>>,
}

impl<T: Clone + Send + 'static> MutableEffectFlow<T> {
    /// Creates a flow replaying up to `replay` values, bound to `scope`.
    ///
    /// Launches the subscriber observation task on `scope`. A flow created in a scope
    /// that has already ended starts closed.
    ///
    /// # Errors
    ///
    /// Returns `EffectError::InvalidConfiguration` if `replay` is zero.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn new(replay: usize, scope: &LifecycleScope) -> Result<Self> {
        let replay = NonZeroUsize::new(replay)
            .ok_or_else(|| EffectError::invalid_configuration("replay should be more than 0"))?;
        Ok(Self::with_capacity(replay, scope))
    }

    /// Creates a flow with [`DEFAULT_REPLAY`] (one value).
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[must_use]
    pub fn with_default_replay(scope: &LifecycleScope) -> Self {
        Self::with_capacity(DEFAULT_REPLAY, scope)
    }

    /// Infallible constructor for an already validated capacity.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[must_use]
    pub fn with_capacity(replay: NonZeroUsize, scope: &LifecycleScope) -> Self {
        let subject = ReplaySubject::with_observer(replay.get(), EdgeReset::new());

        let signal = subject.subscription_count_signal();
        let observing = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&observing);
        let observation = scope.launch(move |cancel| async move {
            observe_subscribers(signal, cancel).await;
            flag.store(false, Ordering::Release);
        });

        if scope.is_ended() {
            warn!("effect flow: created in an ended scope, starting closed");
        }
        let closer = subject.downgrade();
        scope.on_end(move || {
            if let Some(subject) = closer.upgrade() {
                subject.close();
            }
        });

        Self {
            inner: Arc::new(FlowInner {
                subject,
                observing,
                _observation: observation,
            }),
        }
    }

    /// Publishes `value` to every subscriber and stores it for replay.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the owning scope has ended.
    pub fn emit(&self, value: T) -> std::result::Result<(), SubjectError> {
        self.inner.subject.emit(value)
    }

    /// Attaches a subscriber.
    ///
    /// The stream first yields whatever sits in the replay buffer, then every later
    /// emission, until it is unsubscribed, dropped, or the scope ends. If this is the
    /// first subscriber, the buffer is cleared right after being handed over.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the owning scope has ended.
    pub fn subscribe(&self) -> std::result::Result<Subscription<T>, SubjectError> {
        self.inner.subject.subscribe()
    }

    /// Values currently waiting in the replay buffer, oldest first.
    #[must_use]
    pub fn replay_cache(&self) -> Vec<T> {
        self.inner.subject.replay_cache()
    }

    /// Drops every buffered value without touching subscribers.
    pub fn reset_replay_cache(&self) {
        self.inner.subject.reset_replay_cache();
    }

    /// Number of times the replay buffer has been cleared, by edges or manually.
    #[must_use]
    pub fn replay_resets(&self) -> u64 {
        self.inner.subject.replay_resets()
    }

    #[must_use]
    pub fn replay_capacity(&self) -> usize {
        self.inner.subject.replay_capacity()
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.inner.subject.subscription_count()
    }

    /// Live subscription count signal.
    #[must_use]
    pub fn subscription_count_signal(&self) -> watch::Receiver<usize> {
        self.inner.subject.subscription_count_signal()
    }

    /// `true` once the owning scope has ended.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.subject.is_closed()
    }

    /// `false` once the background subscriber observation has stopped.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.inner.observing.load(Ordering::Acquire)
    }

    /// Read-only view sharing this flow's state.
    #[must_use]
    pub fn as_effect_flow(&self) -> EffectFlow<T> {
        EffectFlow::new(Arc::clone(&self.inner))
    }
}

/// Logs `has_subscribers` transitions for the scope's lifetime.
/// The replay buffer itself is cleared synchronously by [`EdgeReset`].
async fn observe_subscribers(mut signal: watch::Receiver<usize>, cancel: CancellationToken) {
    let mut has_subscribers = *signal.borrow_and_update() > 0;
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            changed = signal.changed() => {
                if changed.is_err() {
                    break;
                }
                let now = *signal.borrow_and_update() > 0;
                if now != has_subscribers {
                    has_subscribers = now;
                    debug!("effect flow: has_subscribers -> {}", now);
                }
            }
        }
    }
    debug!("effect flow: subscriber observation stopped");
}

impl<T: Clone + Send + 'static> EffectSource<T> for MutableEffectFlow<T> {
    fn subscribe(&self) -> std::result::Result<Subscription<T>, SubjectError> {
        Self::subscribe(self)
    }

    fn replay_cache(&self) -> Vec<T> {
        Self::replay_cache(self)
    }

    fn subscription_count(&self) -> usize {
        Self::subscription_count(self)
    }
}

impl<T: Clone + Send + 'static> EffectSink<T> for MutableEffectFlow<T> {
    fn emit(&self, value: T) -> std::result::Result<(), SubjectError> {
        Self::emit(self, value)
    }

    fn reset_replay_cache(&self) {
        Self::reset_replay_cache(self);
    }
}

impl<T: Clone + Send + 'static> Clone for MutableEffectFlow<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> fmt::Debug for MutableEffectFlow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableEffectFlow")
            .field("subject", &self.inner.subject)
            .field("observing", &self.is_observing())
            .finish()
    }
}
