//! Column traversal shared by the board and the subtask sub-board.
//!
//! Entries of a column are listed in board order. Only the first column
//! starts with the create sentinel; every other column starts at its first
//! real task. A row index carried across columns is the position in the
//! source column's entries and is clamped to the destination's last entry.
//! Columns without entries are skipped.

use crate::focus::list::{self, Step};
use crate::focus::path::{subtask_item, task_item, NEW_SUBTASK, NEW_TASK};
use crate::store::Stores;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridColumn {
    pub id: String,
    pub items: Vec<String>,
}

/// Focusable entries of a board laid out by column.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub columns: Vec<GridColumn>,
}

impl Grid {
    /// Entries of the main board: top-level tasks per column.
    ///
    pub fn board(stores: &Stores) -> Grid {
        Grid::build(stores, NEW_TASK, |column_id| {
            stores
                .task
                .tasks_by_column(column_id)
                .iter()
                .map(|t| task_item(&t.id))
                .collect()
        })
    }

    /// Entries of a task's sub-board: its subtasks per column.
    ///
    pub fn subtasks(stores: &Stores, parent_id: &str) -> Grid {
        let subtasks = stores.task.get_subtasks(parent_id);
        Grid::build(stores, NEW_SUBTASK, |column_id| {
            subtasks
                .iter()
                .filter(|t| t.status == column_id)
                .map(|t| subtask_item(&t.id))
                .collect()
        })
    }

    fn build<F>(stores: &Stores, sentinel: &str, items_for: F) -> Grid
    where
        F: Fn(&str) -> Vec<String>,
    {
        let columns = stores
            .config
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let mut items = if i == 0 { vec![sentinel.to_string()] } else { vec![] };
                items.extend(items_for(&column.id));
                GridColumn {
                    id: column.id.clone(),
                    items,
                }
            })
            .collect();
        Grid { columns }
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    pub fn item(&self, column: usize, row: usize) -> Option<&str> {
        self.columns.get(column)?.items.get(row).map(String::as_str)
    }

    /// Position of an item inside a known column. An item missing from the
    /// column (e.g. just deleted) falls back to the top of that column.
    ///
    pub fn locate_in(&self, column_id: &str, item: Option<&str>) -> Option<(usize, usize)> {
        let column = self.column_index(column_id)?;
        let row = item
            .and_then(|item| self.columns[column].items.iter().position(|i| i == item))
            .unwrap_or(0);
        Some((column, row))
    }

    /// Position of an item anywhere on the grid.
    ///
    pub fn locate(&self, item: &str) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(c, column)| {
            column
                .items
                .iter()
                .position(|i| i == item)
                .map(|row| (c, row))
        })
    }

    /// Entry one row up or down, or `None` at the column boundary.
    ///
    pub fn vertical(&self, column: usize, row: usize, direction: Step) -> Option<&str> {
        let items = &self.columns.get(column)?.items;
        let next = list::step_plain(items.len(), row, direction)?;
        items.get(next).map(String::as_str)
    }

    /// Nearest non-empty column in `direction` and the entry at the carried
    /// row there. `None` when no such column exists.
    ///
    pub fn horizontal(&self, column: usize, row: usize, direction: Step) -> Option<(usize, &str)> {
        let candidates: Box<dyn Iterator<Item = usize>> = match direction {
            Step::Prev => Box::new((0..column).rev()),
            Step::Next => Box::new(column + 1..self.columns.len()),
        };
        for target in candidates {
            if let Some(item) = self.nearest(target, row) {
                return Some((target, item));
            }
        }
        None
    }

    /// Entry at `row` clamped to the column's last entry.
    ///
    pub fn nearest(&self, column: usize, row: usize) -> Option<&str> {
        let items = &self.columns.get(column)?.items;
        let last = items.len().checked_sub(1)?;
        items.get(row.min(last)).map(String::as_str)
    }

    /// Id of the directly adjacent column, empty or not.
    ///
    pub fn adjacent_column(&self, column: usize, direction: Step) -> Option<&str> {
        let target = match direction {
            Step::Prev => column.checked_sub(1)?,
            Step::Next => column + 1,
        };
        self.columns.get(target).map(|c| c.id.as_str())
    }
}
