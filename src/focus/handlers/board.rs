//! Main board: `kanban.board.<column>.<item>`.

use super::full_task;
use super::grid::Grid;
use crate::events::io::Event as IoEvent;
use crate::focus::action::{Action, ActionResult};
use crate::focus::context::{EffectContext, NavigationContext};
use crate::focus::list::Step;
use crate::focus::path::{extract_task_id, task_item, ParsedFocusPath, NEW_TASK};
use crate::store::task::TaskPatch;
use log::*;

pub fn handle(ctx: &NavigationContext<'_>, action: Action) -> Option<ActionResult> {
    let grid = Grid::board(ctx.stores);
    let column_id = ctx.parsed.container.as_deref()?;
    let item = ctx.parsed.item.as_deref();
    let (column, row) = grid.locate_in(column_id, item)?;
    let task_id = extract_task_id(item);
    let path = |column: &str, item: &str| ParsedFocusPath::board(column, item).build();

    let result = match action {
        Action::Up | Action::Down => {
            let direction = if action == Action::Up { Step::Prev } else { Step::Next };
            match grid.vertical(column, row, direction) {
                Some(next) => ActionResult::navigate(path(column_id, next)),
                None => ActionResult::consumed(),
            }
        }
        Action::Left if column == 0 => ActionResult::navigate(ParsedFocusPath::sidebar(None).build()),
        Action::Left | Action::Right => {
            let direction = if action == Action::Left { Step::Prev } else { Step::Next };
            match grid.horizontal(column, row, direction) {
                Some((target, next)) => ActionResult::navigate(path(&grid.columns[target].id, next)),
                None => ActionResult::consumed(),
            }
        }
        Action::Select => match task_id {
            None if item == Some(NEW_TASK) => {
                let column_id = column_id.to_string();
                ActionResult::effect(move |ctx| {
                    let task = ctx.stores.task.create_task(&column_id, TaskPatch::default());
                    full_task::open(ctx, &task.id, true);
                })
            }
            None => return None,
            Some(task_id) if ctx.stores.task.get_task(&task_id).is_none() => {
                warn!("No task {} behind {}", task_id, ctx.current_path);
                ActionResult::consumed()
            }
            Some(task_id) => ActionResult::effect(move |ctx| full_task::open(ctx, &task_id, false)),
        },
        Action::Delete => {
            let task_id = task_id?;
            let title = ctx.stores.task.get_task(&task_id)?.title.clone();
            let column_id = column_id.to_string();
            ActionResult::effect(move |ctx| {
                ctx.stores.ui.show_confirm(
                    "Delete task",
                    &format!("Delete task \"{}\"?", title),
                    move |ctx| {
                        ctx.stores.task.delete_task(&task_id);
                        ctx.stores.ui.hide_confirm();
                        ctx.pop_layer();
                        let grid = Grid::board(ctx.stores);
                        let nearest = grid
                            .column_index(&column_id)
                            .and_then(|column| grid.nearest(column, row));
                        if let Some(item) = nearest {
                            ctx.set_path(ParsedFocusPath::board(&column_id, item).build());
                        }
                        ctx.stores.dispatch(IoEvent::SaveBoard);
                    },
                );
                ctx.push_layer(ParsedFocusPath::dialog(super::dialog::CONFIRM).build());
            })
        }
        Action::MoveLeft | Action::MoveRight => {
            let direction = if action == Action::MoveLeft { Step::Prev } else { Step::Next };
            match (task_id, grid.adjacent_column(column, direction), item) {
                (Some(task_id), Some(target), Some(item)) => {
                    let target = target.to_string();
                    ActionResult::navigate(path(&target, item)).with_effect(move |ctx| {
                        ctx.stores.task.move_task(&task_id, &target);
                        ctx.stores.dispatch(IoEvent::SaveBoard);
                    })
                }
                _ => ActionResult::consumed(),
            }
        }
        Action::Archive => {
            let task_id = task_id?;
            let column_id = column_id.to_string();
            ActionResult::effect(move |ctx| {
                if let Err(e) = ctx.stores.task.archive_task(&task_id) {
                    warn!("Cannot archive: {}", e);
                    return;
                }
                let grid = Grid::board(ctx.stores);
                let nearest = grid
                    .column_index(&column_id)
                    .and_then(|column| grid.nearest(column, row));
                if let Some(item) = nearest {
                    ctx.set_path(ParsedFocusPath::board(&column_id, item).build());
                }
                ctx.stores.dispatch(IoEvent::SaveBoard);
            })
        }
        Action::Restore => match ctx.stores.task.last_archived() {
            Some(task) => {
                let task_id = task.id.clone();
                ActionResult::effect(move |ctx| restore(ctx, &task_id))
            }
            None => ActionResult::consumed(),
        },
        _ => return None,
    };
    Some(result)
}

/// Put an archived task back on the board and focus it. A task whose column
/// was removed meanwhile lands in the first column.
///
fn restore(ctx: &mut EffectContext<'_>, task_id: &str) {
    let task = match ctx.stores.task.restore_task(task_id) {
        Ok(task) => task,
        Err(e) => {
            warn!("Cannot restore: {}", e);
            return;
        }
    };
    let grid = Grid::board(ctx.stores);
    let column_id = match grid.column_index(&task.status) {
        Some(_) => task.status.clone(),
        None => match grid.columns.first() {
            Some(column) => column.id.clone(),
            None => return,
        },
    };
    if column_id != task.status {
        ctx.stores.task.move_task(task_id, &column_id);
    }
    ctx.set_path(ParsedFocusPath::board(&column_id, &task_item(task_id)).build());
    ctx.stores.dispatch(IoEvent::SaveBoard);
}
