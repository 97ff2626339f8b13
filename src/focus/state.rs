//! Focus state: the current path plus a stack of saved paths for modal
//! layers.

use super::path::{FocusPath, ParsedFocusPath, NEW_TASK};
use log::*;

/// Column the default board location points at until a board is loaded.
///
pub const DEFAULT_COLUMN: &str = "todo";

/// Single source of truth for what owns keyboard input.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusState {
    current: FocusPath,
    stack: Vec<FocusPath>,
    home: FocusPath,
}

impl Default for FocusState {
    fn default() -> Self {
        FocusState::new(DEFAULT_COLUMN)
    }
}

impl FocusState {
    /// Start on the create sentinel of the given column.
    ///
    pub fn new(column_id: &str) -> Self {
        let home = home_path(column_id);
        FocusState {
            current: home.clone(),
            stack: vec![],
            home,
        }
    }

    pub fn current(&self) -> &FocusPath {
        &self.current
    }

    pub fn parsed(&self) -> ParsedFocusPath {
        self.current.parsed()
    }

    /// Location restored when a pop finds the stack empty.
    ///
    pub fn home(&self) -> &FocusPath {
        &self.home
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn stack(&self) -> &[FocusPath] {
        &self.stack
    }

    pub fn set_path(&mut self, path: FocusPath) {
        trace!("Focus {} -> {}", self.current, path);
        self.current = path;
    }

    /// Save the current path and move into a new layer.
    ///
    pub fn push_layer(&mut self, path: FocusPath) {
        debug!("Pushing focus layer {} over {}", path, self.current);
        let previous = std::mem::replace(&mut self.current, path);
        self.stack.push(previous);
    }

    /// Restore the path saved by the matching push. An empty stack resets
    /// to the home location and returns `None`.
    ///
    pub fn pop_layer(&mut self) -> Option<FocusPath> {
        match self.stack.pop() {
            Some(previous) => {
                debug!("Popping focus layer {} back to {}", self.current, previous);
                self.current = previous.clone();
                Some(previous)
            }
            None => {
                debug!("Focus stack empty, resetting to {}", self.home);
                self.current = self.home.clone();
                None
            }
        }
    }

    pub fn matches(&self, pattern: &str) -> bool {
        self.current.matches(pattern)
    }

    /// Whether `item` is the focused item of an area matching `pattern`.
    ///
    pub fn is_item_focused(&self, pattern: &str, item: &str) -> bool {
        self.matches(pattern) && self.parsed().item.as_deref() == Some(item)
    }

    /// Drop every layer and return to the home location.
    ///
    pub fn reset(&mut self) {
        self.current = self.home.clone();
        self.stack.clear();
    }

    /// Re-anchor home on a freshly loaded board and reset to it.
    ///
    pub fn initialize_with_column(&mut self, column_id: &str) {
        self.home = home_path(column_id);
        self.reset();
    }
}

fn home_path(column_id: &str) -> FocusPath {
    ParsedFocusPath::board(column_id, NEW_TASK).build()
}
