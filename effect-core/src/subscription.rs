// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::replay_subject::Shared;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::channel::mpsc::UnboundedReceiver;
use futures::stream::{FusedStream, Stream, StreamExt};
use std::fmt;
use std::sync::Weak;

/// One subscriber attached to a [`ReplaySubject`](crate::ReplaySubject).
///
/// Yields the replayed values followed by live emissions, in emission order. The
/// stream ends when the subject closes or after [`unsubscribe`](Self::unsubscribe).
/// Dropping the subscription detaches it.
pub struct Subscription<T: Clone + Send + 'static> {
    id: u64,
    receiver: UnboundedReceiver<T>,
    subject: Weak<Shared<T>>,
    attached: bool,
}

impl<T: Clone + Send + 'static> Subscription<T> {
    pub(crate) fn new(id: u64, receiver: UnboundedReceiver<T>, subject: Weak<Shared<T>>) -> Self {
        Self {
            id,
            receiver,
            subject,
            attached: true,
        }
    }

    /// Identifier of this subscriber, unique per subject.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// `false` once [`unsubscribe`](Self::unsubscribe) has been called.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.attached
    }

    /// Detaches from the subject and stops delivery immediately.
    ///
    /// Values delivered but not yet polled are discarded. Calling this more than once
    /// is a no-op: the subject only sees a single detach.
    pub fn unsubscribe(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.receiver.close();

        if let Some(shared) = self.subject.upgrade() {
            shared.detach(self.id);
        }
    }
}

impl<T: Clone + Send + 'static> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.get_mut();
        if !this.attached {
            return Poll::Ready(None);
        }
        this.receiver.poll_next_unpin(cx)
    }
}

impl<T: Clone + Send + 'static> FusedStream for Subscription<T> {
    fn is_terminated(&self) -> bool {
        !self.attached || self.receiver.is_terminated()
    }
}

impl<T: Clone + Send + 'static> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl<T: Clone + Send + 'static> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.attached)
            .finish()
    }
}
