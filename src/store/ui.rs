//! UI store: transient view state shared between the router and rendering.

use crate::focus::Effect;
use std::collections::HashSet;
use std::fmt;
use tui_textarea::TextArea;

/// Text fields that can be edited in place.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Description,
    Notes,
    Due,
}

impl EditField {
    /// Editor panel fields, top to bottom.
    pub const EDITOR: [EditField; 3] = [EditField::Title, EditField::Description, EditField::Notes];

    pub fn as_str(self) -> &'static str {
        match self {
            EditField::Title => "title",
            EditField::Description => "description",
            EditField::Notes => "notes",
            EditField::Due => "due",
        }
    }

    pub fn from_editor_item(item: &str) -> Option<EditField> {
        EditField::EDITOR.iter().copied().find(|f| f.as_str() == item)
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, EditField::Description | EditField::Notes)
    }
}

/// An in-progress edit of one task field.
///
#[derive(Debug, Clone)]
pub struct FieldEdit {
    pub task_id: String,
    pub field: EditField,
    pub textarea: TextArea<'static>,
}

impl FieldEdit {
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }
}

/// Binary confirmation dialog.
///
#[derive(Default)]
pub struct ConfirmDialog {
    pub visible: bool,
    pub title: String,
    pub message: String,
    on_confirm: Option<Effect>,
}

impl fmt::Debug for ConfirmDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmDialog")
            .field("visible", &self.visible)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("on_confirm", &self.on_confirm.is_some())
            .finish()
    }
}

/// Houses transient UI state.
///
#[derive(Debug, Default)]
pub struct UiStore {
    full_task_stack: Vec<String>,
    new_task_ids: HashSet<String>,
    search_query: String,
    confirm: ConfirmDialog,
    edit: Option<FieldEdit>,
}

impl UiStore {
    pub fn new() -> Self {
        UiStore::default()
    }

    /// Task ids of the open detail layers, bottom first.
    ///
    pub fn full_task_stack(&self) -> &[String] {
        &self.full_task_stack
    }

    pub fn open_full_task(&mut self, task_id: &str, is_new: bool) {
        self.full_task_stack.push(task_id.to_string());
        if is_new {
            self.new_task_ids.insert(task_id.to_string());
        }
    }

    pub fn close_full_task(&mut self) -> Option<String> {
        self.full_task_stack.pop()
    }

    pub fn close_all_full_tasks(&mut self) {
        self.full_task_stack.clear();
    }

    /// Whether the task was created through a sentinel and not yet saved.
    ///
    pub fn is_new_task(&self, task_id: &str) -> bool {
        self.new_task_ids.contains(task_id)
    }

    pub fn mark_task_saved(&mut self, task_id: &str) {
        self.new_task_ids.remove(task_id);
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    pub fn confirm(&self) -> &ConfirmDialog {
        &self.confirm
    }

    /// Show the confirmation dialog. `on_confirm` runs when the confirm
    /// button is selected and is responsible for hiding the dialog and
    /// popping its focus layer.
    ///
    pub fn show_confirm<F>(&mut self, title: &str, message: &str, on_confirm: F)
    where
        F: FnOnce(&mut crate::focus::EffectContext<'_>) + Send + 'static,
    {
        self.confirm = ConfirmDialog {
            visible: true,
            title: title.to_string(),
            message: message.to_string(),
            on_confirm: Some(Box::new(on_confirm)),
        };
    }

    pub fn hide_confirm(&mut self) {
        self.confirm.visible = false;
        self.confirm.on_confirm = None;
    }

    /// Remove the stored confirm callback so it can be invoked.
    ///
    pub fn take_confirm(&mut self) -> Option<Effect> {
        self.confirm.on_confirm.take()
    }

    pub fn edit(&self) -> Option<&FieldEdit> {
        self.edit.as_ref()
    }

    pub fn edit_mut(&mut self) -> Option<&mut FieldEdit> {
        self.edit.as_mut()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn begin_edit(&mut self, task_id: &str, field: EditField, initial: &str) {
        let lines: Vec<String> = if initial.is_empty() {
            vec![String::new()]
        } else {
            initial.lines().map(str::to_string).collect()
        };
        let mut textarea = TextArea::new(lines);
        textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        textarea.move_cursor(tui_textarea::CursorMove::End);
        self.edit = Some(FieldEdit {
            task_id: task_id.to_string(),
            field,
            textarea,
        });
    }

    pub fn take_edit(&mut self) -> Option<FieldEdit> {
        self.edit.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_task_stack_tracks_new_tasks() {
        let mut ui = UiStore::new();
        ui.open_full_task("TASK-001", false);
        ui.open_full_task("TASK-002", true);
        assert_eq!(ui.full_task_stack(), ["TASK-001".to_string(), "TASK-002".to_string()]);
        assert!(ui.is_new_task("TASK-002"));
        assert!(!ui.is_new_task("TASK-001"));
        ui.mark_task_saved("TASK-002");
        assert!(!ui.is_new_task("TASK-002"));
        assert_eq!(ui.close_full_task().as_deref(), Some("TASK-002"));
        ui.close_all_full_tasks();
        assert!(ui.full_task_stack().is_empty());
    }

    #[test]
    fn confirm_callback_is_taken_once() {
        let mut ui = UiStore::new();
        ui.show_confirm("Delete task", "Really?", |_| {});
        assert!(ui.confirm().visible);
        assert_eq!(ui.confirm().title, "Delete task");
        assert!(ui.take_confirm().is_some());
        assert!(ui.take_confirm().is_none());
        ui.hide_confirm();
        assert!(!ui.confirm().visible);
    }

    #[test]
    fn edit_keeps_multiline_value() {
        let mut ui = UiStore::new();
        ui.begin_edit("TASK-001", EditField::Notes, "first\nsecond");
        assert!(ui.is_editing());
        assert_eq!(ui.edit().map(FieldEdit::value).as_deref(), Some("first\nsecond"));
        let edit = ui.take_edit().unwrap();
        assert_eq!(edit.field, EditField::Notes);
        assert!(!ui.is_editing());
    }

    #[test]
    fn empty_edit_has_one_line() {
        let mut ui = UiStore::new();
        ui.begin_edit("TASK-001", EditField::Title, "");
        assert_eq!(ui.edit().map(FieldEdit::value).as_deref(), Some(""));
    }

    #[test]
    fn search_query_editing() {
        let mut ui = UiStore::new();
        ui.push_search_char('#');
        ui.push_search_char('b');
        assert_eq!(ui.search_query(), "#b");
        ui.pop_search_char();
        assert_eq!(ui.search_query(), "#");
        ui.clear_search();
        assert_eq!(ui.search_query(), "");
    }

    #[test]
    fn editor_fields_resolve_from_items() {
        assert_eq!(EditField::from_editor_item("notes"), Some(EditField::Notes));
        assert_eq!(EditField::from_editor_item("due"), None);
        assert!(EditField::Description.is_multiline());
        assert!(!EditField::Title.is_multiline());
    }
}
