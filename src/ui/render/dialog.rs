use super::Frame;
use crate::focus::handlers::dialog::{CANCEL, CONFIRM};
use crate::state::State;
use crate::ui::widgets::{centered_fixed, styling};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 7;

/// Render the confirmation dialog with its two buttons.
///
pub fn dialog(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let confirm = state.stores().ui.confirm();
    let area = centered_fixed(DIALOG_WIDTH, DIALOG_HEIGHT, size);
    frame.render_widget(Clear, area);

    let button = |item: &str, label: &str| {
        let focused = state.focus().is_item_focused("dialog", item);
        Span::styled(
            format!("[ {} ]", label),
            styling::item_style(theme, focused, styling::normal_text_style(theme)),
        )
    };
    let text = vec![
        Line::from(Span::styled(confirm.message.clone(), styling::normal_text_style(theme))),
        Line::from(""),
        Line::from(vec![button(CANCEL, "Cancel"), Span::raw("   "), button(CONFIRM, "Confirm")]),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(confirm.title.clone(), styling::active_block_title_style()))
                .border_style(styling::accent_style(theme)),
        );
    frame.render_widget(paragraph, area);
}
