use super::Frame;
use crate::config::keybindings::KeyBindings;
use crate::focus::path::{Area, Layer, ParsedFocusPath};
use crate::focus::Action;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Actions worth a hint at the given location, with their labels.
///
fn hints_for(parsed: &ParsedFocusPath) -> Vec<(Action, &'static str)> {
    match (&parsed.layer, parsed.area) {
        (Layer::Dialog, _) => vec![(Action::Select, "choose"), (Action::Back, "cancel")],
        (Layer::Search, _) => vec![(Action::Select, "open"), (Action::Back, "close")],
        (Layer::FullTask, Some(Area::Subtasks)) => vec![
            (Action::Select, "open"),
            (Action::Delete, "delete"),
            (Action::MoveRight, "move"),
            (Action::Back, "close"),
        ],
        (Layer::FullTask, _) => vec![
            (Action::Select, "edit"),
            (Action::Down, "next field"),
            (Action::Save, "save & close"),
            (Action::Back, "close"),
        ],
        (_, Some(Area::Sidebar)) => vec![
            (Action::Select, "open"),
            (Action::Delete, "remove"),
            (Action::Right, "board"),
        ],
        _ => vec![
            (Action::Select, "open"),
            (Action::Delete, "delete"),
            (Action::MoveLeft, "move"),
            (Action::Archive, "archive"),
            (Action::Restore, "restore"),
            (Action::Search, "search"),
            (Action::Save, "save"),
        ],
    }
}

/// Build the hint line text from the primary key of each action.
///
pub fn hint_text(bindings: &KeyBindings, parsed: &ParsedFocusPath) -> String {
    let mut parts: Vec<String> = hints_for(parsed)
        .into_iter()
        .filter_map(|(action, label)| {
            bindings
                .primary_key_for(action)
                .map(|key| format!("{}: {}", key, label))
        })
        .collect();
    parts.push("Ctrl+Q: quit".to_string());
    parts.join("  ")
}

/// Render the focus path with key hints, and the latest log entry.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let focus = state.focus();
    let hints = hint_text(state.dispatcher().bindings(), &focus.parsed());
    let log_line = state.logs().latest().unwrap_or_default();

    let text = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", focus.current()), styling::accent_style(theme)),
            Span::styled(hints, styling::normal_text_style(theme)),
        ]),
        Line::from(Span::styled(format!(" {}", log_line), styling::muted_text_style(theme))),
    ];
    frame.render_widget(Paragraph::new(text), size);
}
