//! Task store.

use super::error::StoreError;
use chrono::Local;
use fake::Dummy;
use std::collections::HashMap;
use log::*;
use serde::{Deserialize, Serialize};

const ID_PREFIX: &str = "TASK-";

/// Column id that marks a task as finished.
///
pub const DONE_COLUMN: &str = "done";

/// Defines task data structure.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: String, // column id
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created: String, // ISO date
    #[serde(default)]
    pub started: String,
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub completed: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Task {
    /// Return a new empty task in the given column, created today.
    ///
    pub fn new(id: &str, status: &str) -> Task {
        Task {
            id: id.to_string(),
            status: status.to_string(),
            created: today(),
            ..Task::default()
        }
    }
}

/// Partial set of task fields for creation and updates.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub assignees: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub started: Option<String>,
    pub due: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub parent_id: Option<String>,
}

impl TaskPatch {
    fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(assignees) = self.assignees {
            task.assignees = assignees;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(started) = self.started {
            task.started = started;
        }
        if let Some(due) = self.due {
            task.due = due;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(notes) = self.notes {
            task.notes = notes;
        }
        if let Some(parent_id) = self.parent_id {
            task.parent_id = Some(parent_id);
        }
    }
}

/// Today's date in ISO format.
///
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Numeric part of a `TASK-NNN` id.
///
fn id_number(id: &str) -> Option<u32> {
    id.strip_prefix(ID_PREFIX)?.parse().ok()
}

/// Ids that survive the trip through a focus path segment unchanged.
///
fn is_addressable(id: &str) -> bool {
    id.strip_prefix(ID_PREFIX).map_or(false, |suffix| {
        !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    })
}

/// Ids of a task and all of its descendants within `tasks`.
///
fn family(tasks: &[Task], id: &str) -> Vec<String> {
    let mut ids = vec![id.to_string()];
    let mut cursor = 0;
    while cursor < ids.len() {
        let parent = ids[cursor].clone();
        ids.extend(
            tasks
                .iter()
                .filter(|t| t.parent_id.as_deref() == Some(parent.as_str()))
                .map(|t| t.id.clone()),
        );
        cursor += 1;
    }
    ids
}

/// Holds every task of the open project in board order, plus the
/// archived ones.
///
#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    archived: Vec<Task>,
    last_task_id: u32,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Top-level tasks of a column, in board order. Subtasks live on their
    /// parent's sub-board instead.
    ///
    pub fn tasks_by_column(&self, column_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.status == column_id && t.parent_id.is_none())
            .collect()
    }

    pub fn get_subtasks(&self, parent_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.parent_id.as_deref() == Some(parent_id))
            .collect()
    }

    /// Create a task with the next sequential id and return a copy of it.
    ///
    pub fn create_task(&mut self, column_id: &str, patch: TaskPatch) -> Task {
        self.last_task_id += 1;
        let id = format!("{}{:03}", ID_PREFIX, self.last_task_id);
        let mut task = Task::new(&id, column_id);
        patch.apply(&mut task);
        debug!("Created task {} in column {}", id, column_id);
        self.tasks.push(task.clone());
        task
    }

    /// Apply a patch. Unknown ids are ignored and reported as `false`.
    ///
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                patch.apply(task);
                true
            }
            None => {
                warn!("Cannot update unknown task {}", id);
                false
            }
        }
    }

    /// Move a task to another column. Entering the done column stamps the
    /// completion date once.
    ///
    pub fn move_task(&mut self, id: &str, column_id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                debug!("Moving task {} from {} to {}", id, task.status, column_id);
                task.status = column_id.to_string();
                if column_id == DONE_COLUMN && task.completed.is_empty() {
                    task.completed = today();
                }
                true
            }
            None => {
                warn!("Cannot move unknown task {}", id);
                false
            }
        }
    }

    /// Delete a task together with its subtasks.
    ///
    pub fn delete_task(&mut self, id: &str) -> bool {
        let doomed = family(&self.tasks, id);
        let before = self.tasks.len();
        self.tasks.retain(|t| !doomed.contains(&t.id));
        debug!("Deleted {} task(s) rooted at {}", before - self.tasks.len(), id);
        before != self.tasks.len()
    }

    pub fn archived(&self) -> &[Task] {
        &self.archived
    }

    /// Move a task and its subtasks off the board into the archive.
    ///
    pub fn archive_task(&mut self, id: &str) -> Result<(), StoreError> {
        if self.get_task(id).is_none() {
            return Err(StoreError::TaskNotFound { id: id.to_string() });
        }
        let ids = family(&self.tasks, id);
        let (moved, kept): (Vec<Task>, Vec<Task>) =
            std::mem::take(&mut self.tasks).into_iter().partition(|t| ids.contains(&t.id));
        info!("Archived {} task(s) rooted at {}", moved.len(), id);
        self.tasks = kept;
        self.archived.extend(moved);
        Ok(())
    }

    /// Bring an archived task and its archived subtasks back onto the
    /// board. Returns the restored task.
    ///
    pub fn restore_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let task = self
            .archived
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::TaskNotFound { id: id.to_string() })?;
        let ids = family(&self.archived, id);
        let (moved, kept): (Vec<Task>, Vec<Task>) =
            std::mem::take(&mut self.archived).into_iter().partition(|t| ids.contains(&t.id));
        info!("Restored {} task(s) rooted at {}", moved.len(), id);
        self.archived = kept;
        self.tasks.extend(moved);
        Ok(task)
    }

    /// The most recently archived task that is not itself a subtask of
    /// another archived task.
    ///
    pub fn last_archived(&self) -> Option<&Task> {
        self.archived.iter().rev().find(|t| {
            t.parent_id
                .as_deref()
                .map_or(true, |parent| self.archived.iter().all(|a| a.id != parent))
        })
    }

    /// Replace the board and archive content, e.g. after loading a project,
    /// and resume id allocation after the highest existing id. Ids that a
    /// focus path cannot carry are renumbered.
    ///
    pub fn load(&mut self, mut tasks: Vec<Task>, mut archived: Vec<Task>) {
        self.last_task_id = tasks
            .iter()
            .chain(archived.iter())
            .filter_map(|t| id_number(&t.id))
            .max()
            .unwrap_or(0);

        let mut renamed = HashMap::new();
        for task in tasks.iter_mut().chain(archived.iter_mut()) {
            if !is_addressable(&task.id) {
                self.last_task_id += 1;
                let id = format!("{}{:03}", ID_PREFIX, self.last_task_id);
                warn!("Renumbering task {} to {}", task.id, id);
                renamed.insert(std::mem::replace(&mut task.id, id.clone()), id);
            }
        }
        if !renamed.is_empty() {
            for task in tasks.iter_mut().chain(archived.iter_mut()) {
                if let Some(id) = task.parent_id.as_ref().and_then(|p| renamed.get(p)) {
                    task.parent_id = Some(id.clone());
                }
            }
        }
        self.tasks = tasks;
        self.archived = archived;
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.archived.clear();
        self.last_task_id = 0;
    }
}
