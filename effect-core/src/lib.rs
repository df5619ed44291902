// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core building blocks for edge-reset effect flows.
//!
//! - [`ReplaySubject`]: hot, multicast subject with a bounded replay buffer and a
//!   live subscription count.
//! - [`SubscriptionObserver`]: hook invoked under the subject lock whenever the
//!   subscription count changes.
//! - [`LifecycleScope`]: owner lifetime that tears down flows and background tasks.
//! - [`EffectError`] / [`SubjectError`]: error types.

#[macro_use]
mod logging;

pub mod cancellation_token;
pub mod error;
pub mod lifecycle_scope;
pub mod replay_buffer;
pub mod replay_subject;
pub mod scoped_task;
pub mod subject_error;
pub mod subscription;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::error::{EffectError, Result};
pub use self::lifecycle_scope::LifecycleScope;
pub use self::replay_buffer::ReplayBuffer;
pub use self::replay_subject::{ReplaySubject, SubscriptionObserver, WeakReplaySubject};
pub use self::scoped_task::ScopedTask;
pub use self::subject_error::SubjectError;
pub use self::subscription::Subscription;
