//! The single keyboard entry point of the focus router.
//!
//! A key press is resolved to an [`Action`], filtered against the text
//! field that may own it, then offered to the handlers in registry order.
//! The first handler that answers decides the outcome: its proposed path is
//! applied first, then its effect runs against the stores.

use super::action::{Action, ActionResult};
use super::context::{EffectContext, NavigationContext};
use super::error::FocusError;
use super::handlers::{self, NavigationHandler};
use super::path::{FocusPath, Layer, ParsedFocusPath};
use super::state::FocusState;
use crate::config::keybindings::{KeyBindings, KeyPress};
use crate::store::Stores;
use crossterm::event::KeyCode;
use log::*;

/// Where a key press came from.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrigin {
    Navigation,
    /// A text field had input focus. Only global actions and keys the
    /// field's area allows reach the handlers.
    TextField,
}

#[derive(Debug)]
pub struct Dispatcher {
    focus: FocusState,
    handlers: Vec<NavigationHandler>,
    bindings: KeyBindings,
}

impl Dispatcher {
    pub fn new(bindings: KeyBindings) -> Result<Self, FocusError> {
        Ok(Dispatcher {
            focus: FocusState::default(),
            handlers: handlers::registry()?,
            bindings,
        })
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusState {
        &mut self.focus
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Handle one raw key press. Returns whether the router consumed it; a
    /// press that is not consumed belongs to the active text target, if any.
    ///
    pub fn handle_key(&mut self, press: &KeyPress, origin: InputOrigin, stores: &mut Stores) -> bool {
        let action = match self.bindings.event_to_action(press) {
            Some(action) => action,
            None => {
                trace!("No binding for {:?}", press.code);
                return false;
            }
        };

        if origin == InputOrigin::TextField
            && !action.is_global()
            && !allowed_in_text_field(&self.focus.parsed(), press)
        {
            debug!("Suppressed {} at {}: text field has input", action, self.focus.current());
            return false;
        }

        self.handle_action(action, stores)
    }

    /// Offer an action to the handlers whose pattern matches the current
    /// path, in registry order.
    ///
    pub fn handle_action(&mut self, action: Action, stores: &mut Stores) -> bool {
        let current = self.focus.current().clone();
        let (name, result) = match self.resolve(&current, action, stores) {
            Some(answer) => answer,
            None => {
                debug!("No handler answered {} at {}", action, current);
                return false;
            }
        };

        if !result.handled {
            debug!("Handler {} declined {} at {}", name, action, current);
            return false;
        }

        debug!("Handler {} took {} at {} ({:?})", name, action, current, result);
        let ActionResult { new_path, effect, .. } = result;
        if let Some(path) = new_path {
            self.focus.set_path(path);
        }
        if let Some(effect) = effect {
            effect(&mut EffectContext {
                stores,
                focus: &mut self.focus,
            });
        }
        true
    }

    fn resolve(&self, current: &FocusPath, action: Action, stores: &Stores) -> Option<(&'static str, ActionResult)> {
        let parsed = current.parsed();
        let ctx = NavigationContext {
            current_path: current,
            parsed: &parsed,
            stores,
        };
        self.handlers
            .iter()
            .filter(|handler| handler.pattern.matches(current))
            .find_map(|handler| {
                let result = handler.handle(&ctx, action);
                if result.is_none() {
                    trace!("Handler {} passed on {}", handler.name, action);
                }
                result.map(|result| (handler.name, result))
            })
    }
}

/// Keys that keep their navigation meaning inside a text field.
///
fn allowed_in_text_field(parsed: &ParsedFocusPath, press: &KeyPress) -> bool {
    match parsed.layer {
        Layer::Search => matches!(
            press.code,
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab | KeyCode::Enter
        ),
        Layer::FullTask => matches!(press.code, KeyCode::Tab | KeyCode::BackTab),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::io::Event as IoEvent;
    use crate::focus::path::FocusPath;
    use crate::store::board::Column;
    use crate::store::task::TaskPatch;
    use crate::store::ui::EditField;
    use std::sync::mpsc;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(KeyBindings::default()).unwrap()
    }

    fn task(stores: &mut Stores, column: &str, title: &str) -> String {
        stores
            .task
            .create_task(
                column,
                TaskPatch {
                    title: Some(title.to_string()),
                    ..TaskPatch::default()
                },
            )
            .id
    }

    fn key(code: KeyCode) -> KeyPress {
        KeyPress::new(code)
    }

    #[test]
    fn select_on_sentinel_opens_new_task() {
        let mut stores = Stores::default();
        let mut dispatcher = dispatcher();
        assert_eq!(dispatcher.focus().current(), &"kanban.board.todo.new-task");

        assert!(dispatcher.handle_action(Action::Select, &mut stores));

        assert_eq!(dispatcher.focus().current(), &"fullTask.0.editor.title");
        assert_eq!(dispatcher.focus().depth(), 1);
        let created = stores.task.tasks_by_column("todo");
        assert_eq!(created.len(), 1);
        assert_eq!(stores.ui.full_task_stack(), &[created[0].id.clone()]);
        assert_eq!(stores.ui.edit().map(|e| e.field), Some(EditField::Title));
    }

    #[test]
    fn move_right_keeps_focus_on_moved_task() {
        let mut stores = Stores::default();
        stores.config.columns = vec![
            Column::new("todo", "To Do"),
            Column::new("doing", "Doing"),
            Column::new("done", "Done"),
        ];
        let id = task(&mut stores, "todo", "first");
        let mut dispatcher = dispatcher();
        dispatcher.focus_mut().set_path(FocusPath::from("kanban.board.todo.task-001"));

        assert!(dispatcher.handle_key(&key(KeyCode::Right).with_ctrl(), InputOrigin::Navigation, &mut stores));

        assert_eq!(stores.task.get_task(&id).map(|t| t.status.as_str()), Some("doing"));
        assert_eq!(dispatcher.focus().current(), &"kanban.board.doing.task-001");
    }

    #[test]
    fn delete_subtask_through_confirm_dialog() {
        let mut stores = Stores::default();
        let parent = task(&mut stores, "todo", "parent");
        let subtask = stores
            .task
            .create_task(
                "todo",
                TaskPatch {
                    title: Some("child".to_string()),
                    parent_id: Some(parent.clone()),
                    ..TaskPatch::default()
                },
            )
            .id;
        assert_eq!(subtask, "TASK-002");
        stores.ui.open_full_task(&parent, false);
        let mut dispatcher = dispatcher();
        dispatcher.focus_mut().push_layer(FocusPath::from("fullTask.0.subtasks.subtask-002"));

        assert!(dispatcher.handle_action(Action::Delete, &mut stores));
        assert_eq!(dispatcher.focus().current(), &"dialog.confirm");
        assert!(stores.ui.confirm().visible);
        assert!(stores.task.get_task(&subtask).is_some());

        assert!(dispatcher.handle_action(Action::Select, &mut stores));
        assert!(stores.task.get_task(&subtask).is_none());
        assert!(!stores.ui.confirm().visible);
        assert_eq!(dispatcher.focus().current(), &"fullTask.0.subtasks.new-subtask");
    }

    #[test]
    fn stored_confirm_callback_deletes_and_hides() {
        let mut stores = Stores::default();
        let parent = task(&mut stores, "todo", "parent");
        stores.task.create_task(
            "todo",
            TaskPatch {
                parent_id: Some(parent.clone()),
                ..TaskPatch::default()
            },
        );
        stores.ui.open_full_task(&parent, false);
        let mut dispatcher = dispatcher();
        dispatcher.focus_mut().push_layer(FocusPath::from("fullTask.0.subtasks.subtask-002"));
        dispatcher.handle_action(Action::Delete, &mut stores);

        let callback = stores.ui.take_confirm().unwrap();
        callback(&mut EffectContext {
            stores: &mut stores,
            focus: dispatcher.focus_mut(),
        });
        assert!(stores.task.get_task("TASK-002").is_none());
        assert!(!stores.ui.confirm().visible);
    }

    #[test]
    fn cancelled_delete_keeps_task() {
        let mut stores = Stores::default();
        let id = task(&mut stores, "todo", "keep me");
        let mut dispatcher = dispatcher();
        dispatcher.focus_mut().set_path(FocusPath::from("kanban.board.todo.task-001"));

        dispatcher.handle_key(&key(KeyCode::Delete), InputOrigin::Navigation, &mut stores);
        assert_eq!(dispatcher.focus().current(), &"dialog.confirm");
        dispatcher.handle_key(&key(KeyCode::Esc), InputOrigin::Navigation, &mut stores);

        assert!(stores.task.get_task(&id).is_some());
        assert!(!stores.ui.confirm().visible);
        assert_eq!(dispatcher.focus().current(), &"kanban.board.todo.task-001");
    }

    #[test]
    fn bindings_resolve_by_priority() {
        let mut stores = Stores::default();
        task(&mut stores, "process", "second column");
        task(&mut stores, "todo", "first column");
        let mut dispatcher = dispatcher();
        dispatcher.focus_mut().set_path(FocusPath::from("kanban.board.process.task-001"));

        // Bare `h` navigates. Row 0 of the first column is its sentinel.
        assert!(dispatcher.handle_key(&key(KeyCode::Char('h')), InputOrigin::Navigation, &mut stores));
        assert_eq!(dispatcher.focus().current(), &"kanban.board.todo.new-task");
        assert_eq!(stores.task.get_task("TASK-001").map(|t| t.status.as_str()), Some("process"));

        // Accelerator `h` moves the task.
        dispatcher.focus_mut().set_path(FocusPath::from("kanban.board.process.task-001"));
        assert!(dispatcher.handle_key(&key(KeyCode::Char('h')).with_meta(), InputOrigin::Navigation, &mut stores));
        assert_eq!(stores.task.get_task("TASK-001").map(|t| t.status.as_str()), Some("todo"));

        // Bare `s` is unbound.
        assert!(!dispatcher.handle_key(&key(KeyCode::Char('s')), InputOrigin::Navigation, &mut stores));
    }

    #[test]
    fn text_field_suppresses_navigation_but_not_save() {
        let (tx, rx) = mpsc::channel();
        let mut stores = Stores::default().with_sender(tx);
        let mut dispatcher = dispatcher();
        dispatcher.handle_action(Action::Select, &mut stores);
        assert!(stores.ui.is_editing());

        assert!(!dispatcher.handle_key(&key(KeyCode::Down), InputOrigin::TextField, &mut stores));
        assert!(!dispatcher.handle_key(&key(KeyCode::Char('j')), InputOrigin::TextField, &mut stores));
        assert_eq!(dispatcher.focus().current(), &"fullTask.0.editor.title");
        assert!(rx.try_recv().is_err());

        if let Some(edit) = stores.ui.edit_mut() {
            edit.textarea.insert_str("Write docs");
        }
        assert!(dispatcher.handle_key(&key(KeyCode::Char('s')).with_ctrl(), InputOrigin::TextField, &mut stores));
        assert!(matches!(rx.try_recv(), Ok(IoEvent::SaveBoard)));
        assert_eq!(stores.task.get_task("TASK-001").map(|t| t.title.as_str()), Some("Write docs"));
        assert_eq!(dispatcher.focus().current(), &"kanban.board.todo.new-task");
    }

    #[test]
    fn tab_advances_field_while_editing() {
        let mut stores = Stores::default();
        let mut dispatcher = dispatcher();
        dispatcher.handle_action(Action::Select, &mut stores);

        assert!(dispatcher.handle_key(&key(KeyCode::Tab), InputOrigin::TextField, &mut stores));
        assert_eq!(dispatcher.focus().current(), &"fullTask.0.editor.description");
        assert_eq!(stores.ui.edit().map(|e| e.field), Some(EditField::Description));

        assert!(dispatcher.handle_key(&key(KeyCode::BackTab), InputOrigin::TextField, &mut stores));
        assert_eq!(dispatcher.focus().current(), &"fullTask.0.editor.title");
    }

    #[test]
    fn search_input_reaches_results_with_arrows() {
        let mut stores = Stores::default();
        task(&mut stores, "todo", "fix login");
        let mut dispatcher = dispatcher();

        assert!(dispatcher.handle_key(&key(KeyCode::Char('f')).with_ctrl(), InputOrigin::Navigation, &mut stores));
        assert_eq!(dispatcher.focus().current(), &"search.input");
        for c in "login".chars() {
            stores.ui.push_search_char(c);
        }

        // Letters stay with the query field.
        assert!(!dispatcher.handle_key(&key(KeyCode::Char('k')), InputOrigin::TextField, &mut stores));
        assert!(dispatcher.handle_key(&key(KeyCode::Down), InputOrigin::TextField, &mut stores));
        assert_eq!(dispatcher.focus().current(), &"search.result-0");

        assert!(dispatcher.handle_key(&key(KeyCode::Enter), InputOrigin::Navigation, &mut stores));
        assert_eq!(dispatcher.focus().current(), &"fullTask.0.editor.title");
        assert_eq!(stores.ui.search_query(), "");
    }

    #[test]
    fn unknown_layer_is_not_handled() {
        let mut stores = Stores::default();
        let mut dispatcher = dispatcher();
        dispatcher.focus_mut().set_path(FocusPath::from("settings.theme"));
        for action in [Action::Up, Action::Select, Action::Back, Action::Delete] {
            assert!(!dispatcher.handle_action(action, &mut stores));
        }
        assert_eq!(dispatcher.focus().current(), &"settings.theme");
    }

    #[test]
    fn passing_handler_continues_scan() {
        // The search handler matches `search.*` but passes on save; the
        // global handler answers it.
        let (tx, rx) = mpsc::channel();
        let mut stores = Stores::default().with_sender(tx);
        let mut dispatcher = dispatcher();
        dispatcher.focus_mut().push_layer(FocusPath::from("search.input"));

        assert!(dispatcher.handle_action(Action::Save, &mut stores));
        assert!(matches!(rx.try_recv(), Ok(IoEvent::SaveBoard)));
        assert_eq!(dispatcher.focus().current(), &"search.input");
    }

    #[test]
    fn nested_layers_unwind_with_back() {
        let mut stores = Stores::default();
        let id = task(&mut stores, "todo", "parent");
        let mut dispatcher = dispatcher();
        dispatcher.focus_mut().set_path(FocusPath::from("kanban.board.todo.task-001"));

        dispatcher.handle_action(Action::Select, &mut stores);
        assert_eq!(dispatcher.focus().current(), &"fullTask.0.editor.title");
        dispatcher.handle_action(Action::Right, &mut stores);
        assert_eq!(dispatcher.focus().current(), &"fullTask.0.subtasks.new-subtask");
        dispatcher.handle_action(Action::Select, &mut stores);
        assert_eq!(dispatcher.focus().current(), &"fullTask.1.editor.title");
        assert_eq!(dispatcher.focus().depth(), 2);

        // First back ends the title edit of the new subtask, the next two
        // close one detail view each. The untitled subtask is discarded.
        dispatcher.handle_action(Action::Back, &mut stores);
        assert_eq!(dispatcher.focus().current(), &"fullTask.1.editor.title");
        dispatcher.handle_action(Action::Back, &mut stores);
        assert_eq!(dispatcher.focus().current(), &"fullTask.0.subtasks.new-subtask");
        assert!(stores.task.get_subtasks(&id).is_empty());
        dispatcher.handle_action(Action::Back, &mut stores);
        assert_eq!(dispatcher.focus().current(), &"kanban.board.todo.task-001");
        assert_eq!(dispatcher.focus().depth(), 0);
        assert!(stores.ui.full_task_stack().is_empty());
    }

    #[test]
    fn unbound_key_is_ignored() {
        let mut stores = Stores::default();
        let mut dispatcher = dispatcher();
        assert!(!dispatcher.handle_key(&key(KeyCode::F(5)), InputOrigin::Navigation, &mut stores));
        assert_eq!(dispatcher.focus().current(), &"kanban.board.todo.new-task");
        assert!(stores.task.tasks().is_empty());
    }
}
