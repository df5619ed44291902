// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! # Effect Flow
//!
//! A hot, replaying stream of one-shot UI effects (navigation, toasts, dialogs)
//! meant to be owned by a view-model and observed by at most one UI at a time.
//!
//! Effects emitted while no UI is attached are buffered (up to the replay capacity)
//! and delivered to the next subscriber. Whenever the subscriber count crosses zero,
//! in either direction, the replay buffer is cleared, so a re-attached UI never sees
//! effects that were already handed to a previous one.
//!
//! ## Quick Start
//!
//! ```rust
//! use effect_flow::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let scope = LifecycleScope::new();
//! let effects = MutableEffectFlow::<&str>::new(1, &scope).unwrap();
//!
//! // Emitted before the UI is attached: buffered
//! effects.emit("show-toast").unwrap();
//!
//! let mut ui = effects.as_effect_flow().subscribe().unwrap();
//! assert_eq!(ui.next().await, Some("show-toast"));
//!
//! // The buffer was cleared on attach; nothing is left for the next UI
//! assert!(effects.replay_cache().is_empty());
//!
//! scope.end();
//! assert_eq!(ui.next().await, None);
//! # }
//! ```
//!
//! ## Construction
//!
//! | Owner | Entry point |
//! |-------|-------------|
//! | Any scope | [`MutableEffectFlow::new`] |
//! | View-model | [`ViewModel::mutable_effect_flow`] |
//! | UI composition | [`Composition::mutable_effect_flow`] |

#[macro_use]
mod logging;

pub mod composition;
pub mod edge_reset;
pub mod effect_flow;
pub mod effect_source;
pub mod mutable_effect_flow;
pub mod view_model;

pub use self::composition::Composition;
pub use self::edge_reset::EdgeReset;
pub use self::effect_flow::EffectFlow;
pub use self::effect_source::{EffectSink, EffectSource};
pub use self::mutable_effect_flow::{MutableEffectFlow, DEFAULT_REPLAY};
pub use self::view_model::ViewModel;

pub use effect_core::{EffectError, LifecycleScope, Result, SubjectError, Subscription};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Composition, EffectFlow, EffectSink, EffectSource, LifecycleScope, MutableEffectFlow,
        ViewModel,
    };
    pub use futures::StreamExt;
}
