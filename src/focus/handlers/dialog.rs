//! Confirmation dialog: `dialog.<cancel|confirm>`.

use crate::focus::action::{Action, ActionResult};
use crate::focus::context::{EffectContext, NavigationContext};
use crate::focus::path::ParsedFocusPath;
use log::*;

pub const CANCEL: &str = "cancel";
pub const CONFIRM: &str = "confirm";

/// Handle an action while the dialog is open. Every action is claimed so
/// nothing underneath the dialog reacts to keys.
///
pub fn handle(ctx: &NavigationContext<'_>, action: Action) -> Option<ActionResult> {
    let item = ctx.parsed.item.as_deref().unwrap_or(CONFIRM);
    let result = match (action, item) {
        (Action::Left, CONFIRM) => ActionResult::navigate(ParsedFocusPath::dialog(CANCEL).build()),
        (Action::Right, CANCEL) => ActionResult::navigate(ParsedFocusPath::dialog(CONFIRM).build()),
        (Action::Select, CONFIRM) => ActionResult::effect(confirm),
        (Action::Select, _) | (Action::Back, _) => ActionResult::effect(dismiss),
        _ => ActionResult::consumed(),
    };
    Some(result)
}

/// Run the stored callback. The callback hides the dialog and pops the
/// layer itself.
///
fn confirm(ctx: &mut EffectContext<'_>) {
    match ctx.stores.ui.take_confirm() {
        Some(on_confirm) => on_confirm(ctx),
        None => {
            warn!("Confirm dialog had no callback, closing it");
            dismiss(ctx);
        }
    }
}

fn dismiss(ctx: &mut EffectContext<'_>) {
    ctx.stores.ui.hide_confirm();
    ctx.pop_layer();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::path::FocusPath;
    use crate::focus::state::FocusState;
    use crate::store::Stores;

    fn run(stores: &mut Stores, focus: &mut FocusState, action: Action) -> ActionResult {
        let current = focus.current().clone();
        let parsed = current.parsed();
        let mut result = {
            let ctx = NavigationContext {
                current_path: &current,
                parsed: &parsed,
                stores,
            };
            handle(&ctx, action).unwrap()
        };
        if let Some(path) = result.new_path.clone() {
            focus.set_path(path);
        }
        if let Some(effect) = result.effect.take() {
            effect(&mut EffectContext { stores, focus });
        }
        result
    }

    fn open_dialog(stores: &mut Stores, focus: &mut FocusState) {
        stores.ui.show_confirm("Delete", "Sure?", |ctx| {
            ctx.stores.project.add_project("confirmed", "/tmp/confirmed".into());
            ctx.stores.ui.hide_confirm();
            ctx.pop_layer();
        });
        focus.set_path(FocusPath::from("kanban.board.todo.task-001"));
        focus.push_layer(FocusPath::from("dialog.confirm"));
    }

    #[test]
    fn buttons_move_horizontally_only() {
        let mut stores = Stores::default();
        let mut focus = FocusState::default();
        open_dialog(&mut stores, &mut focus);
        let result = run(&mut stores, &mut focus, Action::Left);
        assert_eq!(result.new_path, Some(FocusPath::from("dialog.cancel")));
        let result = run(&mut stores, &mut focus, Action::Left);
        assert!(result.handled && result.new_path.is_none());
        let result = run(&mut stores, &mut focus, Action::Down);
        assert!(result.handled && result.new_path.is_none());
        run(&mut stores, &mut focus, Action::Right);
        assert_eq!(focus.current(), &"dialog.confirm");
    }

    #[test]
    fn confirm_runs_callback() {
        let mut stores = Stores::default();
        let mut focus = FocusState::default();
        open_dialog(&mut stores, &mut focus);
        run(&mut stores, &mut focus, Action::Select);
        assert_eq!(stores.project.projects().len(), 1);
        assert!(!stores.ui.confirm().visible);
        assert_eq!(focus.current(), &"kanban.board.todo.task-001");
    }

    #[test]
    fn cancel_and_back_close_without_callback() {
        for (item, action) in [("cancel", Action::Select), ("confirm", Action::Back)] {
            let mut stores = Stores::default();
            let mut focus = FocusState::default();
            open_dialog(&mut stores, &mut focus);
            focus.set_path(FocusPath::from(format!("dialog.{}", item)));
            run(&mut stores, &mut focus, action);
            assert!(stores.project.projects().is_empty());
            assert!(!stores.ui.confirm().visible);
            assert_eq!(focus.current(), &"kanban.board.todo.task-001");
        }
    }

    #[test]
    fn other_actions_are_blocked() {
        let mut stores = Stores::default();
        let mut focus = FocusState::default();
        open_dialog(&mut stores, &mut focus);
        for action in [Action::Delete, Action::Save, Action::Search, Action::MoveRight] {
            let result = run(&mut stores, &mut focus, action);
            assert!(result.handled && result.new_path.is_none() && result.effect.is_none());
        }
        assert_eq!(focus.current(), &"dialog.confirm");
    }
}
