//! Task detail layer: `fullTask.<stack index>.<meta|editor|subtasks>.<item>`.
//!
//! Three panels side by side. The meta panel lists the board vocabularies
//! and dates by index, the editor panel holds the text fields and the
//! subtask panel is a small board of its own.

use super::grid::Grid;
use crate::events::io::Event as IoEvent;
use crate::focus::action::{Action, ActionResult};
use crate::focus::context::{EffectContext, NavigationContext};
use crate::focus::list::{self, Step};
use crate::focus::path::{extract_task_id, FocusPath, ParsedFocusPath, Area, NEW_SUBTASK};
use crate::store::board::MetaItem;
use crate::store::task::{today, TaskPatch};
use crate::store::ui::EditField;
use log::*;

pub fn handle(ctx: &NavigationContext<'_>, action: Action) -> Option<ActionResult> {
    let stack_index = ctx.parsed.stack_index.unwrap_or(0);
    let task_id = ctx
        .stores
        .ui
        .full_task_stack()
        .get(stack_index)
        .filter(|id| ctx.stores.task.get_task(id).is_some())
        .cloned();
    let task_id = match task_id {
        Some(task_id) => task_id,
        None => return orphaned(action),
    };
    let editing = ctx.stores.ui.is_editing();

    match action {
        Action::Back if editing => {
            return Some(ActionResult::effect(|ctx| {
                ctx.stores.commit_edit();
            }))
        }
        Action::Back => return Some(ActionResult::effect(close)),
        Action::Save => {
            return Some(ActionResult::effect(|ctx| {
                close(ctx);
                ctx.stores.dispatch(IoEvent::SaveBoard);
            }))
        }
        _ => {}
    }

    let panel = Panel {
        ctx,
        stack_index,
        task_id,
        editing,
    };
    match ctx.parsed.area? {
        Area::Meta => panel.meta(action),
        Area::Editor => panel.editor(action),
        Area::Subtasks => panel.subtasks(action),
        _ => None,
    }
}

/// A detail layer whose task no longer exists can only be left.
///
fn orphaned(action: Action) -> Option<ActionResult> {
    match action {
        Action::Back | Action::Save => {
            warn!("Detail view has no task, closing it");
            Some(ActionResult::effect(close))
        }
        Action::Search => None,
        _ => Some(ActionResult::declined()),
    }
}

/// Close the topmost detail view and return to the previous layer.
///
fn close(ctx: &mut EffectContext<'_>) {
    ctx.stores.close_full_task();
    ctx.pop_layer();
}

/// Open a task's detail view on top of the current layer.
///
pub fn open(ctx: &mut EffectContext<'_>, task_id: &str, is_new: bool) {
    ctx.stores.commit_edit();
    ctx.stores.ui.open_full_task(task_id, is_new);
    let stack_index = ctx.stores.ui.full_task_stack().len() - 1;
    ctx.push_layer(ParsedFocusPath::full_task(stack_index, Area::Editor, EditField::Title.as_str()).build());
    if is_new {
        ctx.stores.begin_edit(task_id, EditField::Title);
    }
}

struct Panel<'c, 'a> {
    ctx: &'c NavigationContext<'a>,
    stack_index: usize,
    task_id: String,
    editing: bool,
}

impl<'c, 'a> Panel<'c, 'a> {
    fn path(&self, area: Area, item: &str) -> FocusPath {
        ParsedFocusPath::full_task(self.stack_index, area, item).build()
    }

    fn meta(&self, action: Action) -> Option<ActionResult> {
        let items = self.ctx.stores.config.meta_items();
        let disabled: Vec<bool> = items.iter().map(MetaItem::is_disabled).collect();
        let index = self
            .ctx
            .parsed
            .item
            .as_deref()
            .and_then(|i| i.parse::<usize>().ok())
            .unwrap_or(0);

        let result = match action {
            Action::Up | Action::Down => {
                let direction = if action == Action::Up { Step::Prev } else { Step::Next };
                match list::step(&disabled, index, direction) {
                    Some(next) => self.leave(self.path(Area::Meta, &next.to_string())),
                    None => ActionResult::consumed(),
                }
            }
            Action::Left => ActionResult::consumed(),
            Action::Right => self.leave(self.path(Area::Editor, EditField::Title.as_str())),
            Action::Select => {
                let item = items.get(index)?.clone();
                if item.is_disabled() {
                    return Some(ActionResult::consumed());
                }
                let task_id = self.task_id.clone();
                ActionResult::effect(move |ctx| select_meta(ctx, &task_id, item))
            }
            _ => return None,
        };
        Some(result)
    }

    fn editor(&self, action: Action) -> Option<ActionResult> {
        let field = self
            .ctx
            .parsed
            .item
            .as_deref()
            .and_then(EditField::from_editor_item)
            .unwrap_or(EditField::Title);
        let index = EditField::EDITOR.iter().position(|f| *f == field).unwrap_or(0);

        let result = match action {
            Action::Up | Action::Down => {
                let direction = if action == Action::Up { Step::Prev } else { Step::Next };
                let next = match list::step_plain(EditField::EDITOR.len(), index, direction) {
                    Some(next) => EditField::EDITOR[next],
                    None => return Some(ActionResult::consumed()),
                };
                let result = ActionResult::navigate(self.path(Area::Editor, next.as_str()));
                if self.editing {
                    let task_id = self.task_id.clone();
                    result.with_effect(move |ctx| {
                        ctx.stores.commit_edit();
                        ctx.stores.begin_edit(&task_id, next);
                    })
                } else {
                    result
                }
            }
            Action::Left => {
                let disabled: Vec<bool> = self
                    .ctx
                    .stores
                    .config
                    .meta_items()
                    .iter()
                    .map(MetaItem::is_disabled)
                    .collect();
                let first = list::first_enabled(&disabled).unwrap_or(0);
                self.leave(self.path(Area::Meta, &first.to_string()))
            }
            Action::Right => self.leave(self.path(Area::Subtasks, NEW_SUBTASK)),
            Action::Select if self.editing => ActionResult::effect(|ctx| {
                ctx.stores.commit_edit();
            }),
            Action::Select => {
                let task_id = self.task_id.clone();
                ActionResult::effect(move |ctx| ctx.stores.begin_edit(&task_id, field))
            }
            _ => return None,
        };
        Some(result)
    }

    /// Move focus, committing any edit in progress.
    ///
    fn leave(&self, path: FocusPath) -> ActionResult {
        let result = ActionResult::navigate(path);
        if self.editing {
            result.with_effect(|ctx| {
                ctx.stores.commit_edit();
            })
        } else {
            result
        }
    }

    fn subtasks(&self, action: Action) -> Option<ActionResult> {
        let grid = Grid::subtasks(self.ctx.stores, &self.task_id);
        let item = self.ctx.parsed.item.as_deref().unwrap_or(NEW_SUBTASK);
        let (column, row) = grid.locate(item).unwrap_or((0, 0));
        let subtask_id = extract_task_id(Some(item));

        let result = match action {
            Action::Up | Action::Down => {
                let direction = if action == Action::Up { Step::Prev } else { Step::Next };
                match grid.vertical(column, row, direction) {
                    Some(next) => ActionResult::navigate(self.path(Area::Subtasks, next)),
                    None => ActionResult::consumed(),
                }
            }
            Action::Left if column == 0 => {
                ActionResult::navigate(self.path(Area::Editor, EditField::Title.as_str()))
            }
            Action::Left | Action::Right => {
                let direction = if action == Action::Left { Step::Prev } else { Step::Next };
                match grid.horizontal(column, row, direction) {
                    Some((_, next)) => ActionResult::navigate(self.path(Area::Subtasks, next)),
                    None => ActionResult::consumed(),
                }
            }
            Action::Select => match subtask_id {
                None => {
                    let parent_id = self.task_id.clone();
                    let column_id = grid.columns.first()?.id.clone();
                    ActionResult::effect(move |ctx| {
                        let subtask = ctx.stores.task.create_task(
                            &column_id,
                            TaskPatch {
                                parent_id: Some(parent_id),
                                ..TaskPatch::default()
                            },
                        );
                        open(ctx, &subtask.id, true);
                    })
                }
                Some(subtask_id) => {
                    self.ctx.stores.task.get_task(&subtask_id)?;
                    ActionResult::effect(move |ctx| open(ctx, &subtask_id, false))
                }
            },
            Action::Delete => match subtask_id {
                None => ActionResult::consumed(),
                Some(subtask_id) => {
                    let title = self.ctx.stores.task.get_task(&subtask_id)?.title.clone();
                    let parent_id = self.task_id.clone();
                    let stack_index = self.stack_index;
                    ActionResult::effect(move |ctx| {
                        ctx.stores.ui.show_confirm(
                            "Delete subtask",
                            &format!("Delete subtask \"{}\"?", title),
                            move |ctx| {
                                ctx.stores.task.delete_task(&subtask_id);
                                ctx.stores.ui.hide_confirm();
                                ctx.pop_layer();
                                let grid = Grid::subtasks(ctx.stores, &parent_id);
                                if let Some(item) = grid.nearest(column, row) {
                                    let path = ParsedFocusPath::full_task(stack_index, Area::Subtasks, item).build();
                                    ctx.set_path(path);
                                }
                                ctx.stores.dispatch(IoEvent::SaveBoard);
                            },
                        );
                        ctx.push_layer(ParsedFocusPath::dialog(super::dialog::CONFIRM).build());
                    })
                }
            },
            Action::MoveLeft | Action::MoveRight => {
                let direction = if action == Action::MoveLeft { Step::Prev } else { Step::Next };
                match (subtask_id, grid.adjacent_column(column, direction)) {
                    (Some(subtask_id), Some(target)) => {
                        let target = target.to_string();
                        ActionResult::navigate(self.ctx.current_path.clone()).with_effect(move |ctx| {
                            ctx.stores.task.move_task(&subtask_id, &target);
                        })
                    }
                    _ => ActionResult::consumed(),
                }
            }
            _ => return None,
        };
        Some(result)
    }
}

/// Apply a meta panel selection to the task as it is now.
///
fn select_meta(ctx: &mut EffectContext<'_>, task_id: &str, item: MetaItem) {
    let task = match ctx.stores.task.get_task(task_id) {
        Some(task) => task.clone(),
        None => return,
    };
    let toggle = |values: &[String], value: String| -> Vec<String> {
        if values.contains(&value) {
            values.iter().filter(|v| **v != value).cloned().collect()
        } else {
            let mut values = values.to_vec();
            values.push(value);
            values
        }
    };
    let radio = |current: &str, value: String| if current == value { String::new() } else { value };

    let patch = match item {
        MetaItem::Priority(value) => TaskPatch {
            priority: Some(radio(&task.priority, value)),
            ..TaskPatch::default()
        },
        MetaItem::Category(value) => TaskPatch {
            category: Some(radio(&task.category, value)),
            ..TaskPatch::default()
        },
        MetaItem::User(value) => TaskPatch {
            assignees: Some(toggle(&task.assignees, value)),
            ..TaskPatch::default()
        },
        MetaItem::Tag(value) => TaskPatch {
            tags: Some(toggle(&task.tags, value)),
            ..TaskPatch::default()
        },
        MetaItem::Started => TaskPatch {
            started: Some(if task.started.is_empty() { today() } else { String::new() }),
            ..TaskPatch::default()
        },
        MetaItem::Due => {
            ctx.stores.begin_edit(task_id, EditField::Due);
            return;
        }
        MetaItem::Created | MetaItem::Completed => return,
    };
    debug!("Updating task {} from meta panel", task_id);
    ctx.stores.task.update_task(task_id, patch);
}
