//! Navigation handlers and their dispatch order.
//!
//! Each handler owns one pattern and one area of behavior. The registry is
//! an ordered list; the dispatcher tries handlers whose pattern matches the
//! current path from first to last.

pub mod board;
pub mod dialog;
pub mod full_task;
pub mod global;
pub mod grid;
pub mod search;
pub mod sidebar;

use super::action::{Action, ActionResult};
use super::context::NavigationContext;
use super::error::FocusError;
use super::path::FocusPath;
use regex::Regex;

/// Handler entry point. `None` means "does not apply, try the next one".
///
pub type HandleFn = fn(&NavigationContext<'_>, Action) -> Option<ActionResult>;

/// How a handler claims paths.
///
#[derive(Debug, Clone)]
pub enum HandlerPattern {
    /// Plain string prefix. The empty prefix claims every path.
    Prefix(&'static str),
    /// Segment pattern with `*` and `**` wildcards.
    Glob(&'static str),
    Regex(Regex),
}

impl HandlerPattern {
    pub fn matches(&self, path: &FocusPath) -> bool {
        match self {
            HandlerPattern::Prefix(prefix) => path.as_str().starts_with(prefix),
            HandlerPattern::Glob(pattern) => path.matches(pattern),
            HandlerPattern::Regex(regex) => regex.is_match(path.as_str()),
        }
    }
}

pub struct NavigationHandler {
    pub name: &'static str,
    pub pattern: HandlerPattern,
    handle: HandleFn,
}

impl NavigationHandler {
    pub fn new(name: &'static str, pattern: HandlerPattern, handle: HandleFn) -> Self {
        NavigationHandler {
            name,
            pattern,
            handle,
        }
    }

    pub fn handle(&self, ctx: &NavigationContext<'_>, action: Action) -> Option<ActionResult> {
        (self.handle)(ctx, action)
    }
}

impl std::fmt::Debug for NavigationHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationHandler")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish()
    }
}

/// Build the handler list in dispatch order: dialog, search overlay, task
/// detail, board, sidebar, then the global catch-all.
///
pub fn registry() -> Result<Vec<NavigationHandler>, FocusError> {
    let full_task_pattern = Regex::new(r"^fullTask\.\d+\.").map_err(|source| FocusError::InvalidPattern {
        handler: "full_task",
        source,
    })?;
    Ok(vec![
        NavigationHandler::new("dialog", HandlerPattern::Glob("dialog.*"), dialog::handle),
        NavigationHandler::new("search", HandlerPattern::Glob("search.*"), search::handle),
        NavigationHandler::new("full_task", HandlerPattern::Regex(full_task_pattern), full_task::handle),
        NavigationHandler::new("board", HandlerPattern::Glob("kanban.board.*"), board::handle),
        NavigationHandler::new("sidebar", HandlerPattern::Glob("kanban.sidebar"), sidebar::handle),
        NavigationHandler::new("global", HandlerPattern::Prefix(""), global::handle),
    ])
}
