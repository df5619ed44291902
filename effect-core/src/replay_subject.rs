// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subject with a bounded replay buffer.
//!
//! A [`ReplaySubject`] broadcasts each value to all active subscribers and keeps the
//! last `replay` values for subscribers that attach later.
//!
//! ## Characteristics
//!
//! - **Hot**: values are pushed whether or not anyone listens.
//! - **Replay**: a new subscriber first receives the buffered values, oldest first.
//! - **Unbounded fan-out**: every subscriber has its own unbounded queue, so `emit` never blocks.
//! - **Eager bookkeeping**: dropping or unsubscribing a [`Subscription`] updates the
//!   subscription count immediately.
//! - **Observable count**: a [`SubscriptionObserver`] sees every count change while the
//!   state lock is held; [`subscription_count_signal`](ReplaySubject::subscription_count_signal)
//!   exposes the same count as a `tokio::sync::watch` signal.
//!
//! ## Example
//!
//! ```
//! use effect_core::ReplaySubject;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = ReplaySubject::<i32>::new(2);
//!
//! subject.emit(1).unwrap();
//! subject.emit(2).unwrap();
//! subject.emit(3).unwrap();
//!
//! // Late subscriber replays the last two values
//! let mut stream = subject.subscribe().unwrap();
//! assert_eq!(stream.next().await, Some(2));
//! assert_eq!(stream.next().await, Some(3));
//!
//! subject.close();
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use crate::{ReplayBuffer, SubjectError, Subscription};
use futures::channel::mpsc::{self, UnboundedSender};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tokio::sync::watch;

/// Hook invoked whenever the number of subscribers of a [`ReplaySubject`] changes.
///
/// The call happens while the subject's state lock is held, so whatever the observer
/// does to the replay buffer is atomic with respect to attach, detach and emit.
/// Implementations must not call back into the subject.
pub trait SubscriptionObserver<T>: Send + 'static {
    /// Called with the new subscriber count right after an attach or detach.
    fn on_subscription_count(&mut self, count: usize, replay: &mut ReplayBuffer<T>);
}

impl<T, F> SubscriptionObserver<T> for F
where
    F: FnMut(usize, &mut ReplayBuffer<T>) + Send + 'static,
{
    fn on_subscription_count(&mut self, count: usize, replay: &mut ReplayBuffer<T>) {
        self(count, replay);
    }
}

pub(crate) struct SubjectState<T> {
    closed: bool,
    replay: ReplayBuffer<T>,
    subscribers: Vec<(u64, UnboundedSender<T>)>,
    next_id: u64,
    observer: Option<Box<dyn SubscriptionObserver<T>>>,
}

pub(crate) struct Shared<T> {
    state: Mutex<SubjectState<T>>,
    count: watch::Sender<usize>,
}

impl<T: Clone + Send + 'static> Shared<T> {
    fn count_changed(&self, state: &mut SubjectState<T>) {
        let count = state.subscribers.len();
        if let Some(observer) = state.observer.as_mut() {
            observer.on_subscription_count(count, &mut state.replay);
        }
        self.count.send_replace(count);
    }

    /// Removes subscriber `id`. Returns `false` if it was already gone.
    pub(crate) fn detach(&self, id: u64) -> bool {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let Some(position) = state.subscribers.iter().position(|(sid, _)| *sid == id) else {
            return false;
        };

        state.subscribers.remove(position);
        self.count_changed(state);
        true
    }
}

/// A hot subject with a bounded replay buffer, broadcasting values to all current subscribers.
///
/// Cheap to clone; all clones share the same state.
///
/// See the [module documentation](self) for examples and more details.
pub struct ReplaySubject<T: Clone + Send + 'static> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + 'static> ReplaySubject<T> {
    /// Creates an open subject retaining the last `replay` values. `0` disables replay.
    #[must_use]
    pub fn new(replay: usize) -> Self {
        Self::build(replay, None)
    }

    /// Creates an open subject whose subscription count changes are reported to `observer`.
    #[must_use]
    pub fn with_observer<O>(replay: usize, observer: O) -> Self
    where
        O: SubscriptionObserver<T>,
    {
        Self::build(replay, Some(Box::new(observer)))
    }

    fn build(replay: usize, observer: Option<Box<dyn SubscriptionObserver<T>>>) -> Self {
        let (count, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(SubjectState {
                    closed: false,
                    replay: ReplayBuffer::new(replay),
                    subscribers: Vec::new(),
                    next_id: 0,
                    observer,
                }),
                count,
            }),
        }
    }

    /// Attaches a new subscriber.
    ///
    /// The returned stream yields the current replay buffer, oldest first, followed by
    /// every value emitted afterwards. The observer sees the new count only after the
    /// buffer has been handed to the subscriber.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn subscribe(&self) -> Result<Subscription<T>, SubjectError> {
        let mut guard = self.shared.state.lock();
        let state = &mut *guard;
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let (tx, rx) = mpsc::unbounded();
        for value in state.replay.iter() {
            // The receiver is alive in this scope, so the send cannot fail.
            let _ = tx.unbounded_send(value.clone());
        }

        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.push((id, tx));
        self.shared.count_changed(state);

        debug!(
            "replay subject: subscriber {} attached ({} active)",
            id,
            state.subscribers.len()
        );
        Ok(Subscription::new(id, rx, Arc::downgrade(&self.shared)))
    }

    /// Stores `value` in the replay buffer and delivers it to every active subscriber.
    ///
    /// Subscribers whose receiving side has gone away are dropped from the subscriber
    /// set, which counts as a detach.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn emit(&self, value: T) -> Result<(), SubjectError> {
        let mut guard = self.shared.state.lock();
        let state = &mut *guard;
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let before = state.subscribers.len();
        state
            .subscribers
            .retain(|(_, tx)| tx.unbounded_send(value.clone()).is_ok());
        state.replay.push(value);

        let pruned = before - state.subscribers.len();
        if pruned > 0 {
            warn!("replay subject: dropped {} unreachable subscriber(s)", pruned);
            self.shared.count_changed(state);
        }
        Ok(())
    }

    /// Returns a copy of the replay buffer, oldest first.
    #[must_use]
    pub fn replay_cache(&self) -> Vec<T> {
        self.shared.state.lock().replay.snapshot()
    }

    /// Empties the replay buffer. Subscribers that already received values keep them.
    pub fn reset_replay_cache(&self) {
        self.shared.state.lock().replay.clear();
    }

    /// Number of times the replay buffer has been cleared, manually or by the observer.
    #[must_use]
    pub fn replay_resets(&self) -> u64 {
        self.shared.state.lock().replay.resets()
    }

    /// Maximum number of values kept for replay.
    #[must_use]
    pub fn replay_capacity(&self) -> usize {
        self.shared.state.lock().replay.capacity()
    }

    /// Returns the number of currently attached subscribers.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.shared.state.lock().subscribers.len()
    }

    /// Live view of the subscription count.
    ///
    /// The receiver starts at the current count and is updated after every attach
    /// and detach.
    #[must_use]
    pub fn subscription_count_signal(&self) -> watch::Receiver<usize> {
        self.shared.count.subscribe()
    }

    /// Closes the subject, detaching every subscriber and clearing the replay buffer.
    ///
    /// After closing:
    /// - Existing subscription streams end once they have drained what was already delivered.
    /// - `replay_cache()` is empty.
    /// - `emit()` and `subscribe()` return `SubjectError::Closed`.
    ///
    /// Closing is idempotent.
    pub fn close(&self) {
        let mut guard = self.shared.state.lock();
        let state = &mut *guard;
        if state.closed {
            return;
        }

        state.closed = true;
        let had_subscribers = !state.subscribers.is_empty();
        state.subscribers.clear();
        if had_subscribers {
            self.shared.count_changed(state);
        }
        state.replay.clear();
        debug!("replay subject: closed");
    }

    /// Returns `true` if the subject has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    /// Non-owning handle that does not keep the subject's state alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakReplaySubject<T> {
        WeakReplaySubject {
            shared: Arc::downgrade(&self.shared),
        }
    }
}

/// Weak counterpart of [`ReplaySubject`], obtained with [`ReplaySubject::downgrade`].
pub struct WeakReplaySubject<T: Clone + Send + 'static> {
    shared: Weak<Shared<T>>,
}

impl<T: Clone + Send + 'static> WeakReplaySubject<T> {
    /// Returns the subject if at least one strong handle is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<ReplaySubject<T>> {
        self.shared.upgrade().map(|shared| ReplaySubject { shared })
    }
}

impl<T: Clone + Send + 'static> Clone for WeakReplaySubject<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> Clone for ReplaySubject<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> fmt::Debug for ReplaySubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("ReplaySubject")
            .field("closed", &state.closed)
            .field("subscribers", &state.subscribers.len())
            .field("replay_len", &state.replay.len())
            .field("replay_capacity", &state.replay.capacity())
            .finish()
    }
}
