use super::Frame;
use crate::focus::handlers::grid::Grid;
use crate::focus::path::{extract_task_id, NEW_TASK};
use crate::state::State;
use crate::store::task::Task;
use crate::store::Stores;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Render the board: one column per configured status.
///
pub fn board(frame: &mut Frame, size: Rect, state: &State) {
    let stores = state.stores();
    let theme = state.theme();
    let grid = Grid::board(stores);

    if grid.columns.is_empty() {
        let text = Paragraph::new("No columns configured.")
            .block(Block::default().borders(Borders::ALL).title("Board"))
            .alignment(Alignment::Center);
        frame.render_widget(text, size);
        return;
    }

    let constraints: Vec<Constraint> = grid
        .columns
        .iter()
        .map(|_| Constraint::Ratio(1, grid.columns.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(size);

    for (idx, column) in grid.columns.iter().enumerate() {
        let pattern = format!("kanban.board.{}", column.id);
        let active = state.focus().matches(&pattern);
        let name = stores
            .config
            .columns
            .iter()
            .find(|c| c.id == column.id)
            .map_or(column.id.as_str(), |c| c.name.as_str());
        let task_count = column.items.iter().filter(|item| item.as_str() != NEW_TASK).count();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!("{} ({})", name, task_count),
                styling::active_block_title_style(),
            ))
            .border_style(styling::block_border_style(theme, active));

        let mut selected = None;
        let items: Vec<ListItem> = column
            .items
            .iter()
            .enumerate()
            .map(|(row, item)| {
                let focused = state.focus().is_item_focused(&pattern, item);
                if focused {
                    selected = Some(row);
                }
                board_item(stores, theme, item, focused)
            })
            .collect();

        let mut list_state = ListState::default().with_selected(selected);
        frame.render_stateful_widget(List::new(items).block(block), chunks[idx], &mut list_state);
    }
}

fn board_item<'a>(stores: &'a Stores, theme: &Theme, item: &str, focused: bool) -> ListItem<'a> {
    if item == NEW_TASK {
        let style = styling::item_style(theme, focused, styling::sentinel_style(theme));
        return ListItem::new(Line::from(Span::styled("+ New task", style)));
    }
    match extract_task_id(Some(item)).and_then(|id| stores.task.get_task(&id)) {
        Some(task) => task_line(stores, theme, task, focused),
        None => ListItem::new(Span::styled(item.to_string(), styling::muted_text_style(theme))),
    }
}

/// One board card: priority icon, title, subtask count and tags.
///
fn task_line<'a>(stores: &'a Stores, theme: &Theme, task: &'a Task, focused: bool) -> ListItem<'a> {
    let mut spans = vec![];
    if let Some(priority) = stores.config.priorities.iter().find(|p| p.value == task.priority) {
        spans.push(Span::styled(format!("{} ", priority.icon), styling::accent_style(theme)));
    }
    let title = if task.title.is_empty() {
        "(untitled)"
    } else {
        task.title.as_str()
    };
    spans.push(Span::styled(
        title,
        styling::item_style(theme, focused, styling::normal_text_style(theme)),
    ));

    let subtasks = stores.task.get_subtasks(&task.id);
    if !subtasks.is_empty() {
        let done = subtasks.iter().filter(|s| !s.completed.is_empty()).count();
        spans.push(Span::styled(
            format!(" [{}/{}]", done, subtasks.len()),
            styling::muted_text_style(theme),
        ));
    }
    for tag in &task.tags {
        spans.push(Span::styled(format!(" #{}", tag), styling::muted_text_style(theme)));
    }
    ListItem::new(Line::from(spans))
}
