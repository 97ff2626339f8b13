//! Context records handed to navigation handlers and their effects.

use super::path::{FocusPath, ParsedFocusPath};
use super::state::FocusState;
use crate::store::Stores;

/// Read-only snapshot a handler decides from.
///
pub struct NavigationContext<'a> {
    pub current_path: &'a FocusPath,
    pub parsed: &'a ParsedFocusPath,
    pub stores: &'a Stores,
}

/// Mutable access granted to an effect once the dispatcher has applied the
/// handler's proposed path.
///
pub struct EffectContext<'a> {
    pub stores: &'a mut Stores,
    pub focus: &'a mut FocusState,
}

impl<'a> EffectContext<'a> {
    pub fn set_path(&mut self, path: FocusPath) {
        self.focus.set_path(path);
    }

    pub fn push_layer(&mut self, path: FocusPath) {
        self.focus.push_layer(path);
    }

    pub fn pop_layer(&mut self) -> Option<FocusPath> {
        self.focus.pop_layer()
    }
}
