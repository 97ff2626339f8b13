//! Abstract actions and handler results.

use super::context::EffectContext;
use super::path::FocusPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key-independent input event produced by the key binding resolver.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
    Delete,
    MoveLeft,
    MoveRight,
    Search,
    Save,
    Archive,
    Restore,
}

impl Action {
    pub const ALL: [Action; 13] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Select,
        Action::Back,
        Action::Delete,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Search,
        Action::Save,
        Action::Archive,
        Action::Restore,
    ];

    /// Actions that still reach the router while a text field has input.
    ///
    pub fn is_global(self) -> bool {
        matches!(self, Action::Back | Action::Save | Action::Search)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Select => "select",
            Action::Back => "back",
            Action::Delete => "delete",
            Action::MoveLeft => "move-left",
            Action::MoveRight => "move-right",
            Action::Search => "search",
            Action::Save => "save",
            Action::Archive => "archive",
            Action::Restore => "restore",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deferred work a handler asks the dispatcher to run after applying any
/// new path. Effects receive mutable access to the stores and focus state;
/// work that must touch the disk is queued through `Stores::dispatch`.
///
pub type Effect = Box<dyn FnOnce(&mut EffectContext<'_>) + Send>;

/// Outcome of a handler that applies to the current path.
///
/// `handled` with neither `new_path` nor `effect` means the action was
/// consumed without changing anything, e.g. at a list boundary.
///
pub struct ActionResult {
    pub handled: bool,
    pub new_path: Option<FocusPath>,
    pub effect: Option<Effect>,
}

impl ActionResult {
    /// Consumed, no navigation change.
    ///
    pub fn consumed() -> Self {
        ActionResult {
            handled: true,
            new_path: None,
            effect: None,
        }
    }

    /// Explicitly declined. Stops the handler scan.
    ///
    pub fn declined() -> Self {
        ActionResult {
            handled: false,
            new_path: None,
            effect: None,
        }
    }

    pub fn navigate(path: FocusPath) -> Self {
        ActionResult {
            new_path: Some(path),
            ..ActionResult::consumed()
        }
    }

    pub fn effect<F>(effect: F) -> Self
    where
        F: FnOnce(&mut EffectContext<'_>) + Send + 'static,
    {
        ActionResult {
            effect: Some(Box::new(effect)),
            ..ActionResult::consumed()
        }
    }

    pub fn with_effect<F>(mut self, effect: F) -> Self
    where
        F: FnOnce(&mut EffectContext<'_>) + Send + 'static,
    {
        self.effect = Some(Box::new(effect));
        self
    }
}

impl fmt::Debug for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionResult")
            .field("handled", &self.handled)
            .field("new_path", &self.new_path)
            .field("effect", &self.effect.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_actions() {
        assert!(Action::Back.is_global());
        assert!(Action::Save.is_global());
        assert!(Action::Search.is_global());
        for action in [Action::Up, Action::Down, Action::Select, Action::Delete, Action::MoveLeft] {
            assert!(!action.is_global(), "{} should not be global", action);
        }
    }

    #[test]
    fn action_names_match_serde() {
        for action in Action::ALL {
            let yaml = serde_yaml::to_string(&action).unwrap();
            assert!(yaml.contains(action.as_str()), "{} serialized as {}", action, yaml);
        }
    }

    #[test]
    fn result_constructors() {
        let result = ActionResult::consumed();
        assert!(result.handled && result.new_path.is_none() && result.effect.is_none());

        let result = ActionResult::declined();
        assert!(!result.handled);

        let result = ActionResult::navigate(FocusPath::from("dialog.cancel")).with_effect(|_| {});
        assert!(result.handled);
        assert_eq!(result.new_path, Some(FocusPath::from("dialog.cancel")));
        assert!(result.effect.is_some());
    }
}
