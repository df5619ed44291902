// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use effect_core::{SubjectError, Subscription};

/// Read side of an effect flow.
///
/// Implemented by both [`EffectFlow`](crate::EffectFlow) and
/// [`MutableEffectFlow`](crate::MutableEffectFlow), so consumers can be written
/// against the narrow capability.
pub trait EffectSource<T: Clone + Send + 'static> {
    /// Attaches a subscriber; see [`MutableEffectFlow::subscribe`](crate::MutableEffectFlow::subscribe).
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the owning scope has ended.
    fn subscribe(&self) -> Result<Subscription<T>, SubjectError>;

    /// Values currently waiting in the replay buffer, oldest first.
    fn replay_cache(&self) -> Vec<T>;

    /// Number of attached subscribers.
    fn subscription_count(&self) -> usize;
}

/// Write side of an effect flow. Only [`MutableEffectFlow`](crate::MutableEffectFlow) has it.
pub trait EffectSink<T: Clone + Send + 'static>: EffectSource<T> {
    /// Publishes a value to all subscribers, buffering it for replay.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the owning scope has ended.
    fn emit(&self, value: T) -> Result<(), SubjectError>;

    /// Drops every buffered value.
    fn reset_replay_cache(&self);
}
