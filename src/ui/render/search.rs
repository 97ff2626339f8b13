use super::Frame;
use crate::focus::path::{result_item, SEARCH_INPUT};
use crate::state::State;
use crate::store::search;
use crate::ui::widgets::{centered_rect, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

/// Render the search overlay: query field on top, matching tasks below.
///
pub fn search(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let stores = state.stores();
    let focus = state.focus();
    let area = centered_rect(70, 70, size);
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let on_input = focus.is_item_focused("search", SEARCH_INPUT);
    let input = Paragraph::new(Line::from(vec![
        Span::styled("/ ", styling::accent_style(theme)),
        Span::styled(stores.ui.search_query().to_string(), styling::normal_text_style(theme)),
        Span::styled(if on_input { "_" } else { "" }, styling::accent_style(theme)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search  #tag @user !priority")
            .border_style(styling::block_border_style(theme, on_input)),
    );
    frame.render_widget(input, chunks[0]);

    let results = search::search(&stores.task, stores.ui.search_query());
    let mut selected = None;
    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let focused = focus.is_item_focused("search", &result_item(idx));
            if focused {
                selected = Some(idx);
            }
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<10}", task.id), styling::muted_text_style(theme)),
                Span::styled(
                    task.title.clone(),
                    styling::item_style(theme, focused, styling::normal_text_style(theme)),
                ),
                Span::styled(format!("  {}", task.status), styling::muted_text_style(theme)),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Results ({})", results.len()))
        .border_style(styling::block_border_style(theme, !on_input));
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(List::new(items).block(block), chunks[1], &mut list_state);
}
