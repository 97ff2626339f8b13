use super::Frame;
use crate::focus::handlers::grid::Grid;
use crate::focus::path::{extract_task_id, NEW_SUBTASK};
use crate::state::State;
use crate::store::board::MetaItem;
use crate::store::task::Task;
use crate::store::ui::EditField;
use crate::store::Stores;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

/// Render the detail view of the task on top of the full-task stack.
///
pub fn full_task(frame: &mut Frame, size: Rect, state: &State, stack_index: usize, task_id: &str) {
    let theme = state.theme();
    let task = match state.stores().task.get_task(task_id) {
        Some(task) => task,
        None => return,
    };
    let area = crate::ui::widgets::centered_rect(94, 92, size);
    frame.render_widget(Clear, area);

    let depth = if stack_index > 0 {
        format!(" (subtask, level {})", stack_index)
    } else {
        String::new()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!("{}{}", task.id, depth), styling::active_block_title_style()))
        .border_style(styling::block_border_style(theme, true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(44),
            Constraint::Percentage(28),
        ])
        .split(inner);

    let prefix = format!("fullTask.{}", stack_index);
    meta(frame, panels[0], state, task, &format!("{}.meta", prefix));
    editor(frame, panels[1], state, task, &format!("{}.editor", prefix));
    subtasks(frame, panels[2], state, task, &format!("{}.subtasks", prefix));
}

fn meta(frame: &mut Frame, size: Rect, state: &State, task: &Task, pattern: &str) {
    let theme = state.theme();
    let stores = state.stores();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Details")
        .border_style(styling::block_border_style(theme, state.focus().matches(pattern)));

    let mut selected = None;
    let items: Vec<ListItem> = stores
        .config
        .meta_items()
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let focused = state.focus().is_item_focused(pattern, &idx.to_string());
            if focused {
                selected = Some(idx);
            }
            let base = if item.is_disabled() {
                styling::muted_text_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            let label = meta_label(stores, task, item);
            ListItem::new(Span::styled(label, styling::item_style(theme, focused, base)))
        })
        .collect();

    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(List::new(items).block(block), size, &mut list_state);
}

/// Text of one meta entry: radio marks for single choices, check marks for
/// sets, values for dates.
///
fn meta_label(stores: &Stores, task: &Task, item: &MetaItem) -> String {
    let radio = |on: bool| if on { "(•)" } else { "( )" };
    let check = |on: bool| if on { "[x]" } else { "[ ]" };
    let date = |name: &str, value: &str| {
        format!("{:<10}{}", name, if value.is_empty() { "-" } else { value })
    };
    match item {
        MetaItem::Priority(value) => {
            let name = stores
                .config
                .priorities
                .iter()
                .find(|p| &p.value == value)
                .map_or(value.as_str(), |p| p.name.as_str());
            format!("{} {}", radio(&task.priority == value), name)
        }
        MetaItem::Category(value) => format!("{} {}", radio(&task.category == value), value),
        MetaItem::User(id) => {
            let name = stores
                .config
                .users
                .iter()
                .find(|u| &u.id == id)
                .map_or(id.as_str(), |u| u.display_name.as_str());
            format!("{} @{}", check(task.assignees.contains(id)), name)
        }
        MetaItem::Tag(tag) => format!("{} #{}", check(task.tags.contains(tag)), tag),
        MetaItem::Created => date("Created", &task.created),
        MetaItem::Started => date("Started", &task.started),
        MetaItem::Due => match stores.ui.edit().filter(|e| e.field == EditField::Due) {
            Some(edit) => date("Due", &format!("{}_", edit.value())),
            None => date("Due", &task.due),
        },
        MetaItem::Completed => date("Completed", &task.completed),
    }
}

fn editor(frame: &mut Frame, size: Rect, state: &State, task: &Task, pattern: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Min(3),
        ])
        .split(size);
    for (idx, field) in EditField::EDITOR.iter().enumerate() {
        let value = match field {
            EditField::Title => &task.title,
            EditField::Description => &task.description,
            EditField::Notes => &task.notes,
            EditField::Due => &task.due,
        };
        editor_field(frame, chunks[idx], state, pattern, *field, value);
    }
}

fn editor_field(frame: &mut Frame, size: Rect, state: &State, pattern: &str, field: EditField, value: &str) {
    let theme = state.theme();
    let focused = state.focus().is_item_focused(pattern, field.as_str());
    let edit = state.stores().ui.edit().filter(|e| e.field == field);
    let title = match field {
        EditField::Title => "Title",
        EditField::Description => "Description",
        EditField::Notes => "Notes",
        EditField::Due => "Due",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(if edit.is_some() {
            format!("{} (editing)", title)
        } else {
            title.to_string()
        })
        .border_style(styling::block_border_style(theme, focused));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    match edit {
        Some(edit) => frame.render_widget(edit.textarea.widget(), inner),
        None => {
            let paragraph = Paragraph::new(value.to_string())
                .style(styling::normal_text_style(theme))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, inner);
        }
    }
}

fn subtasks(frame: &mut Frame, size: Rect, state: &State, task: &Task, pattern: &str) {
    let theme = state.theme();
    let stores = state.stores();
    let grid = Grid::subtasks(stores, &task.id);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Subtasks")
        .border_style(styling::block_border_style(theme, state.focus().matches(pattern)));

    let mut lines: Vec<ListItem> = vec![];
    let mut selected = None;
    for column in grid.columns.iter().filter(|c| !c.items.is_empty()) {
        let name = stores
            .config
            .columns
            .iter()
            .find(|c| c.id == column.id)
            .map_or(column.id.as_str(), |c| c.name.as_str());
        lines.push(ListItem::new(Span::styled(name.to_string(), styling::muted_text_style(theme))));
        for item in &column.items {
            let focused = state.focus().is_item_focused(pattern, item);
            if focused {
                selected = Some(lines.len());
            }
            lines.push(subtask_line(stores, theme, item, focused));
        }
    }

    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(List::new(lines).block(block), size, &mut list_state);
}

fn subtask_line(stores: &Stores, theme: &Theme, item: &str, focused: bool) -> ListItem<'static> {
    if item == NEW_SUBTASK {
        let style = styling::item_style(theme, focused, styling::sentinel_style(theme));
        return ListItem::new(Line::from(Span::styled("  + New subtask", style)));
    }
    let title = extract_task_id(Some(item))
        .and_then(|id| stores.task.get_task(&id))
        .map(|t| if t.title.is_empty() { "(untitled)".to_string() } else { t.title.clone() })
        .unwrap_or_else(|| item.to_string());
    let style = styling::item_style(theme, focused, styling::normal_text_style(theme));
    ListItem::new(Line::from(Span::styled(format!("  {}", title), style)))
}
