// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use effect_core::{ReplayBuffer, SubscriptionObserver};

/// Subscription observer that clears the replay buffer on every zero crossing.
///
/// It tracks `has_subscribers = count > 0` and acts only when that boolean flips:
/// attaching a second subscriber or detaching one of several does nothing. A
/// subscriber attaching on the 0 → 1 edge has already been handed the buffer when
/// the clear happens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EdgeReset {
    has_subscribers: bool,
}

impl EdgeReset {
    /// Starts in the "no subscribers" state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            has_subscribers: false,
        }
    }

    /// Last observed subscriber state.
    #[must_use]
    pub const fn has_subscribers(&self) -> bool {
        self.has_subscribers
    }
}

impl<T: Clone + Send + 'static> SubscriptionObserver<T> for EdgeReset {
    fn on_subscription_count(&mut self, count: usize, replay: &mut ReplayBuffer<T>) {
        let has_subscribers = count > 0;
        if has_subscribers == self.has_subscribers {
            return;
        }

        self.has_subscribers = has_subscribers;
        replay.clear();
        debug!(
            "effect flow: subscribers {}, replay cleared",
            if has_subscribers { "attached" } else { "detached" }
        );
    }
}
