//! Keyboard-driven personal kanban board for the terminal.
//!
//! Everything that owns keyboard input is addressed by a single focus path
//! (see [`focus`]). The stores in [`store`] hold the board data, and the
//! [`ui`] renders them by asking which paths are focused.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod focus;
pub mod logger;
pub mod state;
pub mod store;
pub mod ui;
