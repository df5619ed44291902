// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{MutableEffectFlow, Result};
use effect_core::LifecycleScope;

/// A presentation object that owns a [`LifecycleScope`] living until it is cleared.
///
/// Implementors only provide the scope; flows created through the provided methods
/// are torn down by [`clear`](Self::clear).
///
/// ```
/// use effect_flow::{LifecycleScope, ViewModel};
///
/// struct LoginViewModel {
///     scope: LifecycleScope,
/// }
///
/// impl ViewModel for LoginViewModel {
///     fn view_model_scope(&self) -> &LifecycleScope {
///         &self.scope
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() {
/// let vm = LoginViewModel { scope: LifecycleScope::new() };
/// let effects = vm.mutable_effect_flow::<String>(1).unwrap();
///
/// vm.clear();
/// assert!(effects.is_closed());
/// # }
/// ```
pub trait ViewModel {
    /// Scope that ends when the view-model is cleared.
    fn view_model_scope(&self) -> &LifecycleScope;

    /// Creates an effect flow bound to the view-model scope.
    ///
    /// # Errors
    ///
    /// Returns `EffectError::InvalidConfiguration` if `replay` is zero.
    fn mutable_effect_flow<T: Clone + Send + 'static>(
        &self,
        replay: usize,
    ) -> Result<MutableEffectFlow<T>> {
        MutableEffectFlow::new(replay, self.view_model_scope())
    }

    /// Creates an effect flow with the default replay capacity.
    fn default_effect_flow<T: Clone + Send + 'static>(&self) -> MutableEffectFlow<T> {
        MutableEffectFlow::with_default_replay(self.view_model_scope())
    }

    /// Ends the view-model scope, closing every flow created from it.
    fn clear(&self) {
        self.view_model_scope().end();
    }
}
