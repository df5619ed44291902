// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{MutableEffectFlow, Result};
use effect_core::LifecycleScope;

/// A UI composition: a piece of UI whose remembered scope lives until it leaves the screen.
///
/// Flows created here belong to the composition and close when it is disposed, either
/// explicitly with [`dispose`](Self::dispose) or by dropping it.
#[derive(Debug, Default)]
pub struct Composition {
    scope: LifecycleScope,
}

impl Composition {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope: LifecycleScope::new(),
        }
    }

    /// The scope remembered for this composition. Every call returns the same scope.
    #[must_use]
    pub fn remember_scope(&self) -> LifecycleScope {
        self.scope.clone()
    }

    /// Creates an effect flow bound to this composition.
    ///
    /// # Errors
    ///
    /// Returns `EffectError::InvalidConfiguration` if `replay` is zero.
    pub fn mutable_effect_flow<T: Clone + Send + 'static>(
        &self,
        replay: usize,
    ) -> Result<MutableEffectFlow<T>> {
        MutableEffectFlow::new(replay, &self.scope)
    }

    /// Creates an effect flow with the default replay capacity.
    #[must_use]
    pub fn default_effect_flow<T: Clone + Send + 'static>(&self) -> MutableEffectFlow<T> {
        MutableEffectFlow::with_default_replay(&self.scope)
    }

    /// Ends the remembered scope. Idempotent.
    pub fn dispose(&self) {
        self.scope.end();
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.scope.is_ended()
    }
}

impl Drop for Composition {
    fn drop(&mut self) {
        self.dispose();
    }
}
