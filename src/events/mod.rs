//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - I/O events: board persistence and project switching
//! - Terminal events: User input and terminal interactions

pub mod io;
pub mod terminal;
