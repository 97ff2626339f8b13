//! Focus path grammar.
//!
//! A focus path is a dot-separated address naming whatever currently owns
//! keyboard input, e.g. `kanban.board.todo.task-001` or
//! `fullTask.0.editor.title`. The leading segment is the layer and decides
//! how the remaining segments are read:
//!
//! - `kanban.sidebar.<item>`
//! - `kanban.board.<column>.<item>`
//! - `fullTask.<stack index>.<area>.<item>`
//! - `dialog.<item>`
//! - `search.<item>`

use std::fmt;

/// Sentinel item for "create a new task in this column".
pub const NEW_TASK: &str = "new-task";

/// Sentinel item for "create a new subtask in this sub-board column".
pub const NEW_SUBTASK: &str = "new-subtask";

/// Item of the search overlay's query field.
pub const SEARCH_INPUT: &str = "input";

const TASK_ID_PREFIX: &str = "TASK-";
const TASK_ITEM_PREFIX: &str = "task-";
const SUBTASK_ITEM_PREFIX: &str = "subtask-";
const PROJECT_ITEM_PREFIX: &str = "project-";
const RESULT_ITEM_PREFIX: &str = "result-";

/// Top-level segment of a focus path.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    Kanban,
    FullTask,
    Dialog,
    Search,
    /// Any other leading token. No handler claims these.
    Unknown(String),
}

impl Layer {
    pub fn as_str(&self) -> &str {
        match self {
            Layer::Kanban => "kanban",
            Layer::FullTask => "fullTask",
            Layer::Dialog => "dialog",
            Layer::Search => "search",
            Layer::Unknown(raw) => raw,
        }
    }

    fn from_segment(segment: &str) -> Layer {
        match segment {
            "kanban" => Layer::Kanban,
            "fullTask" => Layer::FullTask,
            "dialog" => Layer::Dialog,
            "search" => Layer::Search,
            other => Layer::Unknown(other.to_string()),
        }
    }
}

/// Area within a layer.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Sidebar,
    Board,
    Meta,
    Editor,
    Subtasks,
}

impl Area {
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Sidebar => "sidebar",
            Area::Board => "board",
            Area::Meta => "meta",
            Area::Editor => "editor",
            Area::Subtasks => "subtasks",
        }
    }

    fn kanban(segment: &str) -> Option<Area> {
        match segment {
            "sidebar" => Some(Area::Sidebar),
            "board" => Some(Area::Board),
            _ => None,
        }
    }

    fn full_task(segment: &str) -> Option<Area> {
        match segment {
            "meta" => Some(Area::Meta),
            "editor" => Some(Area::Editor),
            "subtasks" => Some(Area::Subtasks),
            _ => None,
        }
    }
}

/// Structured form of a focus path. Always derived from a [`FocusPath`],
/// never stored on its own.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFocusPath {
    pub layer: Layer,
    pub stack_index: Option<usize>,
    pub area: Option<Area>,
    pub container: Option<String>,
    pub item: Option<String>,
}

impl ParsedFocusPath {
    /// Return a record holding only the given layer.
    ///
    pub fn layer(layer: Layer) -> Self {
        ParsedFocusPath {
            layer,
            stack_index: None,
            area: None,
            container: None,
            item: None,
        }
    }

    /// `kanban.board.<column>.<item>`
    ///
    pub fn board(column: &str, item: &str) -> Self {
        ParsedFocusPath {
            area: Some(Area::Board),
            container: Some(column.to_string()),
            item: Some(item.to_string()),
            ..ParsedFocusPath::layer(Layer::Kanban)
        }
    }

    /// `kanban.sidebar[.<item>]`
    ///
    pub fn sidebar(item: Option<&str>) -> Self {
        ParsedFocusPath {
            area: Some(Area::Sidebar),
            item: item.map(str::to_string),
            ..ParsedFocusPath::layer(Layer::Kanban)
        }
    }

    /// `fullTask.<stack index>.<area>.<item>`
    ///
    pub fn full_task(stack_index: usize, area: Area, item: &str) -> Self {
        ParsedFocusPath {
            stack_index: Some(stack_index),
            area: Some(area),
            item: Some(item.to_string()),
            ..ParsedFocusPath::layer(Layer::FullTask)
        }
    }

    /// `dialog.<item>`
    ///
    pub fn dialog(item: &str) -> Self {
        ParsedFocusPath {
            item: Some(item.to_string()),
            ..ParsedFocusPath::layer(Layer::Dialog)
        }
    }

    /// `search.<item>`
    ///
    pub fn search(item: &str) -> Self {
        ParsedFocusPath {
            item: Some(item.to_string()),
            ..ParsedFocusPath::layer(Layer::Search)
        }
    }

    /// Build the flat path for this record.
    ///
    pub fn build(&self) -> FocusPath {
        build(self)
    }
}

/// Hierarchical string address of the focused element.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusPath(String);

impl FocusPath {
    pub fn new(path: impl Into<String>) -> Self {
        FocusPath(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse on every call. The parsed form is never cached.
    ///
    pub fn parsed(&self) -> ParsedFocusPath {
        parse(&self.0)
    }

    pub fn matches(&self, pattern: &str) -> bool {
        super::pattern::matches(&self.0, pattern)
    }

    /// Path with the last segment removed, or `None` for a single segment.
    ///
    pub fn parent(&self) -> Option<FocusPath> {
        self.0
            .rsplit_once('.')
            .map(|(parent, _)| FocusPath::new(parent))
    }

    /// Same path with the last segment replaced.
    ///
    pub fn sibling(&self, item: &str) -> FocusPath {
        match self.0.rsplit_once('.') {
            Some((parent, _)) => FocusPath(format!("{}.{}", parent, item)),
            None => self.clone(),
        }
    }
}

impl fmt::Display for FocusPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FocusPath {
    fn from(path: &str) -> Self {
        FocusPath::new(path)
    }
}

impl From<String> for FocusPath {
    fn from(path: String) -> Self {
        FocusPath(path)
    }
}

impl PartialEq<&str> for FocusPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Split a flat path into its structured record.
///
/// An unknown leading segment yields a record with only the layer set.
///
pub fn parse(path: &str) -> ParsedFocusPath {
    let parts: Vec<&str> = path.split('.').collect();
    let segment = |i: usize| parts.get(i).map(|s| s.to_string());
    let mut parsed = ParsedFocusPath::layer(Layer::from_segment(parts[0]));

    match parsed.layer {
        Layer::Kanban => {
            parsed.area = parts.get(1).and_then(|s| Area::kanban(s));
            match parsed.area {
                Some(Area::Sidebar) => parsed.item = segment(2),
                Some(Area::Board) => {
                    parsed.container = segment(2);
                    parsed.item = segment(3);
                }
                _ => {}
            }
        }
        Layer::FullTask => {
            parsed.stack_index = parts.get(1).and_then(|s| s.parse().ok());
            parsed.area = parts.get(2).and_then(|s| Area::full_task(s));
            parsed.item = segment(3);
        }
        Layer::Dialog | Layer::Search => parsed.item = segment(1),
        Layer::Unknown(_) => {}
    }

    parsed
}

/// Join a structured record back into a flat path.
///
pub fn build(parsed: &ParsedFocusPath) -> FocusPath {
    let mut parts: Vec<String> = vec![parsed.layer.as_str().to_string()];

    match parsed.layer {
        Layer::Kanban => {
            if let Some(area) = parsed.area {
                parts.push(area.as_str().to_string());
            }
            if parsed.area == Some(Area::Board) {
                if let Some(container) = &parsed.container {
                    parts.push(container.clone());
                }
            }
            if let Some(item) = &parsed.item {
                parts.push(item.clone());
            }
        }
        Layer::FullTask => {
            parts.push(parsed.stack_index.unwrap_or(0).to_string());
            if let Some(area) = parsed.area {
                parts.push(area.as_str().to_string());
            }
            if let Some(item) = &parsed.item {
                parts.push(item.clone());
            }
        }
        Layer::Dialog | Layer::Search => {
            if let Some(item) = &parsed.item {
                parts.push(item.clone());
            }
        }
        Layer::Unknown(_) => {}
    }

    FocusPath(parts.join("."))
}

/// Convert a task id to its path segment: `TASK-001` becomes `task-001`.
///
/// Task ids are case-normalized through the round trip on purpose; the
/// segment is always lower case and decoding always upper-cases.
///
pub fn task_item(task_id: &str) -> String {
    format!("{}{}", TASK_ITEM_PREFIX, id_suffix(task_id))
}

/// Convert a task id to its sub-board segment: `TASK-002` becomes `subtask-002`.
///
pub fn subtask_item(task_id: &str) -> String {
    format!("{}{}", SUBTASK_ITEM_PREFIX, id_suffix(task_id))
}

fn id_suffix(task_id: &str) -> String {
    task_id
        .strip_prefix(TASK_ID_PREFIX)
        .unwrap_or(task_id)
        .to_lowercase()
}

/// Decode a task or subtask segment back into a task id. Sentinels and
/// any other segment yield `None`.
///
pub fn extract_task_id(item: Option<&str>) -> Option<String> {
    let item = item?;
    if item == NEW_TASK || item == NEW_SUBTASK {
        return None;
    }
    let suffix = item
        .strip_prefix(TASK_ITEM_PREFIX)
        .or_else(|| item.strip_prefix(SUBTASK_ITEM_PREFIX))?;
    Some(format!("{}{}", TASK_ID_PREFIX, suffix.to_uppercase()))
}

pub fn project_item(project_id: &str) -> String {
    format!("{}{}", PROJECT_ITEM_PREFIX, project_id)
}

pub fn extract_project_id(item: Option<&str>) -> Option<String> {
    item?.strip_prefix(PROJECT_ITEM_PREFIX).map(str::to_string)
}

pub fn result_item(index: usize) -> String {
    format!("{}{}", RESULT_ITEM_PREFIX, index)
}

pub fn extract_result_index(item: Option<&str>) -> Option<usize> {
    item?.strip_prefix(RESULT_ITEM_PREFIX)?.parse().ok()
}
