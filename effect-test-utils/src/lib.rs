// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the effect-flow workspace.
//!
//! - [`ui_effect`]: the [`UiEffect`] fixture type with ready-made values.
//! - [`helpers`]: timeout-guarded assertions over any `Stream`.
//!
//! Intended for tests and benches only.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod ui_effect;

pub use helpers::{assert_no_element_emitted, assert_stream_ended, collect_n, unwrap_stream};
pub use ui_effect::UiEffect;
