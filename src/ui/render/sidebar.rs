use super::Frame;
use crate::focus::path::project_item;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

const SIDEBAR_PATH: &str = "kanban.sidebar";

/// Render the project list.
///
pub fn sidebar(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let focus = state.focus();
    let projects = &state.stores().project;
    let active = focus.matches(SIDEBAR_PATH);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Projects", styling::active_block_title_style()))
        .border_style(styling::block_border_style(theme, active));

    let mut selected = None;
    let items: Vec<ListItem> = projects
        .projects()
        .iter()
        .enumerate()
        .map(|(idx, project)| {
            let focused = focus.is_item_focused(SIDEBAR_PATH, &project_item(&project.id));
            if focused {
                selected = Some(idx);
            }
            let marker = if projects.current_id() == Some(project.id.as_str()) {
                "● "
            } else {
                "  "
            };
            let style = styling::item_style(theme, focused, styling::normal_text_style(theme));
            ListItem::new(Line::from(vec![
                Span::styled(marker, styling::accent_style(theme)),
                Span::styled(project.name.clone(), style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(List::new(items).block(block), size, &mut list_state);
}
