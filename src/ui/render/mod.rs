mod board;
mod dialog;
mod footer;
mod full_task;
mod search;
mod sidebar;

use super::Frame;
use crate::state::State;
use ratatui::layout::{Constraint, Direction, Layout};

/// Width of the project sidebar in cells.
///
const SIDEBAR_WIDTH: u16 = 26;

/// Render the whole screen: sidebar and board underneath, then the open
/// layers from the bottom of the stack to the top.
///
pub fn render(frame: &mut Frame, state: &State) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(frame.size());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(chunks[0]);

    sidebar::sidebar(frame, body[0], state);
    board::board(frame, body[1], state);

    let stack = state.stores().ui.full_task_stack();
    if let Some(task_id) = stack.last() {
        full_task::full_task(frame, chunks[0], state, stack.len() - 1, task_id);
    }
    if state.focus().matches("search") {
        search::search(frame, chunks[0], state);
    }
    if state.stores().ui.confirm().visible {
        dialog::dialog(frame, chunks[0], state);
    }

    footer::footer(frame, chunks[1], state);
}
