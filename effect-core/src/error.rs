// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for effect flows.
//!
//! [`EffectError`] is the root error. Construction problems are reported as
//! [`EffectError::InvalidConfiguration`]; transport failures from the underlying
//! subject are carried unchanged in [`EffectError::Subject`].
//!
//! # Examples
//!
//! ```
//! use effect_core::{EffectError, Result};
//!
//! fn validate(replay: usize) -> Result<usize> {
//!     if replay == 0 {
//!         return Err(EffectError::invalid_configuration("replay should be more than 0"));
//!     }
//!     Ok(replay)
//! }
//!
//! assert!(validate(0).is_err());
//! assert_eq!(validate(1).unwrap(), 1);
//! ```

use crate::SubjectError;

/// Root error type for effect flow operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    /// The flow was configured with invalid parameters (e.g. a zero replay capacity).
    ///
    /// Raised synchronously at construction; no flow is produced.
    #[error("Invalid configuration: {context}")]
    InvalidConfiguration {
        /// What was wrong with the configuration
        context: String,
    },

    /// The underlying subject rejected the operation.
    #[error(transparent)]
    Subject(#[from] SubjectError),
}

impl EffectError {
    /// Create an invalid configuration error with the given context
    pub fn invalid_configuration(context: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            context: context.into(),
        }
    }

    /// Check if this error indicates the flow (or its scope) has been closed
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Subject(SubjectError::Closed))
    }
}

/// Specialized Result type for effect flow operations.
pub type Result<T> = std::result::Result<T, EffectError>;
