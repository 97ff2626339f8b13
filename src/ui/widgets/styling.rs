use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};

/// Return the border style for a block, depending on whether it owns focus.
///
pub fn block_border_style(theme: &Theme, active: bool) -> Style {
    if active {
        Style::default().fg(theme.border_active.to_color())
    } else {
        Style::default().fg(theme.border_normal.to_color())
    }
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for the focused list item.
///
pub fn focused_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.highlight_bg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

/// Return the style for create slots such as "+ New task".
///
pub fn sentinel_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.primary.to_color())
        .add_modifier(Modifier::ITALIC)
}

pub fn accent_style(theme: &Theme) -> Style {
    Style::default().fg(theme.accent.to_color())
}

/// Pick the focused or the given style.
///
pub fn item_style(theme: &Theme, focused: bool, otherwise: Style) -> Style {
    if focused {
        focused_item_style(theme)
    } else {
        otherwise
    }
}
