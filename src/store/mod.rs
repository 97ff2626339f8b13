//! Plain data stores consumed by the focus router and the renderer.
//!
//! The router never reaches these as globals; every handler receives them
//! through its navigation context.

pub mod board;
mod error;
pub mod persist;
pub mod project;
pub mod search;
pub mod task;
pub mod ui;

pub use error::StoreError;

use crate::app::IoEventSender;
use crate::events::io::Event as IoEvent;
use board::BoardConfig;
use log::*;
use persist::BoardFile;
use project::ProjectStore;
use task::{TaskPatch, TaskStore};
use ui::{EditField, UiStore};

/// Record of every store, passed explicitly into the router.
///
#[derive(Debug, Default)]
pub struct Stores {
    pub task: TaskStore,
    pub config: BoardConfig,
    pub ui: UiStore,
    pub project: ProjectStore,
    io_sender: Option<IoEventSender>,
}

impl Stores {
    pub fn new(project: ProjectStore) -> Self {
        Stores {
            project,
            ..Stores::default()
        }
    }

    /// Attach the channel of the I/O worker.
    ///
    pub fn with_sender(mut self, io_sender: IoEventSender) -> Self {
        self.io_sender = Some(io_sender);
        self
    }

    /// Queue asynchronous work for the I/O worker. Without a worker the
    /// request is dropped.
    ///
    pub fn dispatch(&self, event: IoEvent) {
        match &self.io_sender {
            Some(io_sender) => {
                if let Err(err) = io_sender.send(event) {
                    error!("Received error from I/O dispatch: {}", err);
                }
            }
            None => debug!("No I/O worker attached, dropping {:?}", event),
        }
    }

    /// Snapshot of the open board for persistence.
    ///
    pub fn board_file(&self) -> BoardFile {
        BoardFile {
            board: self.config.clone(),
            tasks: self.task.tasks().to_vec(),
            archived: self.task.archived().to_vec(),
        }
    }

    /// Replace the board content after a project was loaded.
    ///
    pub fn replace_board(&mut self, data: BoardFile) {
        self.config = data.board;
        self.task.load(data.tasks, data.archived);
        self.ui.close_all_full_tasks();
        self.ui.hide_confirm();
        self.ui.take_edit();
    }

    /// Write the active field edit back to its task. Returns the committed
    /// field, if any edit was active.
    ///
    pub fn commit_edit(&mut self) -> Option<EditField> {
        let edit = self.ui.take_edit()?;
        let value = edit.value();
        let patch = match edit.field {
            EditField::Title => TaskPatch {
                title: Some(value.trim().to_string()),
                ..TaskPatch::default()
            },
            EditField::Description => TaskPatch {
                description: Some(value),
                ..TaskPatch::default()
            },
            EditField::Notes => TaskPatch {
                notes: Some(value),
                ..TaskPatch::default()
            },
            EditField::Due => TaskPatch {
                due: Some(value.trim().to_string()),
                ..TaskPatch::default()
            },
        };
        self.task.update_task(&edit.task_id, patch);
        Some(edit.field)
    }

    /// Start editing a field of a task with its current value.
    ///
    pub fn begin_edit(&mut self, task_id: &str, field: EditField) {
        let initial = match self.task.get_task(task_id) {
            Some(task) => match field {
                EditField::Title => task.title.clone(),
                EditField::Description => task.description.clone(),
                EditField::Notes => task.notes.clone(),
                EditField::Due => task.due.clone(),
            },
            None => {
                warn!("Cannot edit unknown task {}", task_id);
                return;
            }
        };
        self.ui.begin_edit(task_id, field, &initial);
    }

    /// Close the topmost detail view. A freshly created task left without
    /// a title is discarded.
    ///
    pub fn close_full_task(&mut self) -> Option<String> {
        self.commit_edit();
        let task_id = self.ui.close_full_task()?;
        if self.ui.is_new_task(&task_id) {
            self.ui.mark_task_saved(&task_id);
            let untitled = self
                .task
                .get_task(&task_id)
                .map_or(false, |t| t.title.trim().is_empty());
            if untitled {
                info!("Discarding untitled new task {}", task_id);
                self.task.delete_task(&task_id);
            }
        }
        Some(task_id)
    }
}
