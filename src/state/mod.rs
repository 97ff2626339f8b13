//! Application state.
//!
//! Holds the stores, the focus router and the log buffer. Key presses go to
//! the router first; whatever it does not consume is typed into the active
//! text target, either the field being edited or the search query.

use crate::config::keybindings::KeyPress;
use crate::focus::{Dispatcher, FocusState, InputOrigin};
use crate::logger::LogBuffer;
use crate::store::persist::BoardFile;
use crate::store::Stores;
use crate::ui::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::*;
use ratatui::layout::Rect;

/// Path of the search overlay's query field.
///
const SEARCH_INPUT_PATH: &str = "search.input";

pub struct State {
    stores: Stores,
    dispatcher: Dispatcher,
    logs: LogBuffer,
    theme: Theme,
    terminal_size: Rect,
}

impl State {
    pub fn new(stores: Stores, dispatcher: Dispatcher, logs: LogBuffer) -> Self {
        State {
            stores,
            dispatcher,
            logs,
            theme: Theme::default(),
            terminal_size: Rect::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn stores_mut(&mut self) -> &mut Stores {
        &mut self.stores
    }

    pub fn focus(&self) -> &FocusState {
        self.dispatcher.focus()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
    }

    /// Whether a text field currently owns typed characters.
    ///
    pub fn input_origin(&self) -> InputOrigin {
        if self.stores.ui.is_editing() || self.focus().matches(SEARCH_INPUT_PATH) {
            InputOrigin::TextField
        } else {
            InputOrigin::Navigation
        }
    }

    /// Route one key press. Returns whether anything used it.
    ///
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        let press = KeyPress::from(event);
        let origin = self.input_origin();
        if self.dispatcher.handle_key(&press, origin, &mut self.stores) {
            return true;
        }
        match origin {
            InputOrigin::TextField => self.input_text(event),
            InputOrigin::Navigation => false,
        }
    }

    fn input_text(&mut self, event: KeyEvent) -> bool {
        if let Some(multiline) = self.stores.ui.edit().map(|edit| edit.field.is_multiline()) {
            if event.code == KeyCode::Enter && !multiline {
                self.stores.commit_edit();
                return true;
            }
            if let Some(edit) = self.stores.ui.edit_mut() {
                edit.textarea.input(event);
            }
            return true;
        }

        let plain = !event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match event.code {
            KeyCode::Char(c) if plain => self.stores.ui.push_search_char(c),
            KeyCode::Backspace => self.stores.ui.pop_search_char(),
            _ => return false,
        }
        true
    }

    /// Swap in a freshly loaded board and put focus on its first column.
    ///
    pub fn load_board(&mut self, data: BoardFile) {
        self.stores.replace_board(data);
        self.stores.ui.clear_search();
        let column = self
            .stores
            .config
            .first_column()
            .map(|column| column.id.clone())
            .unwrap_or_else(|| crate::focus::state::DEFAULT_COLUMN.to_string());
        info!("Loaded board with {} tasks", self.stores.task.tasks().len());
        self.dispatcher.focus_mut().initialize_with_column(&column);
    }
}
