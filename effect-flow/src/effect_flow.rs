// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::mutable_effect_flow::FlowInner;
use crate::EffectSource;
use effect_core::{SubjectError, Subscription};
use std::fmt;
use std::sync::Arc;

/// Read-only view of a [`MutableEffectFlow`](crate::MutableEffectFlow).
///
/// Shares state with the flow it was created from but exposes no way to emit or to
/// reset the replay buffer. Obtain one with
/// [`MutableEffectFlow::as_effect_flow`](crate::MutableEffectFlow::as_effect_flow).
pub struct EffectFlow<T: Clone + Send + 'static> {
    inner: Arc<FlowInner<T>>,
}

impl<T: Clone + Send + 'static> EffectFlow<T> {
    pub(crate) fn new(inner: Arc<FlowInner<T>>) -> Self {
        Self { inner }
    }

    /// Attaches a subscriber. Same semantics as
    /// [`MutableEffectFlow::subscribe`](crate::MutableEffectFlow::subscribe).
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the owning scope has ended.
    pub fn subscribe(&self) -> Result<Subscription<T>, SubjectError> {
        self.inner.subject.subscribe()
    }

    #[must_use]
    pub fn replay_cache(&self) -> Vec<T> {
        self.inner.subject.replay_cache()
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.inner.subject.subscription_count()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.subject.is_closed()
    }
}

impl<T: Clone + Send + 'static> EffectSource<T> for EffectFlow<T> {
    fn subscribe(&self) -> Result<Subscription<T>, SubjectError> {
        Self::subscribe(self)
    }

    fn replay_cache(&self) -> Vec<T> {
        Self::replay_cache(self)
    }

    fn subscription_count(&self) -> usize {
        Self::subscription_count(self)
    }
}

impl<T: Clone + Send + 'static> Clone for EffectFlow<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> fmt::Debug for EffectFlow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectFlow")
            .field("subject", &self.inner.subject)
            .finish()
    }
}
