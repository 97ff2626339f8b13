//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library:
//! - Board, sidebar and footer layout
//! - Task detail, search and confirmation overlays
//! - Theme and styling
//!
//! Renderers never track focus themselves. Each one asks the focus state
//! whether its own path pattern matches.

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod theme;
mod widgets;

pub use render::render;
pub use theme::Theme;
