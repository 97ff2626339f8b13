//! Search overlay: `search.input` and `search.result-<n>`.

use crate::focus::action::{Action, ActionResult};
use crate::focus::context::NavigationContext;
use crate::focus::path::{extract_result_index, result_item, ParsedFocusPath, SEARCH_INPUT};
use crate::store::search;

pub fn handle(ctx: &NavigationContext<'_>, action: Action) -> Option<ActionResult> {
    let results = search::search(&ctx.stores.task, ctx.stores.ui.search_query());
    let item = ctx.parsed.item.as_deref();
    let on_input = item.map_or(true, |i| i == SEARCH_INPUT);
    let index = extract_result_index(item);

    let result = match action {
        Action::Back | Action::Search => ActionResult::effect(|ctx| {
            ctx.stores.ui.clear_search();
            ctx.pop_layer();
        }),
        Action::Down | Action::Select if on_input => {
            if results.is_empty() {
                ActionResult::consumed()
            } else {
                ActionResult::navigate(ParsedFocusPath::search(&result_item(0)).build())
            }
        }
        Action::Down => match index {
            Some(i) if i + 1 < results.len() => {
                ActionResult::navigate(ParsedFocusPath::search(&result_item(i + 1)).build())
            }
            _ => ActionResult::consumed(),
        },
        Action::Up => match index {
            Some(0) => ActionResult::navigate(ParsedFocusPath::search(SEARCH_INPUT).build()),
            Some(i) => ActionResult::navigate(ParsedFocusPath::search(&result_item(i - 1)).build()),
            None => ActionResult::consumed(),
        },
        Action::Select => {
            let task_id = index.and_then(|i| results.get(i)).map(|t| t.id.clone())?;
            ActionResult::effect(move |ctx| {
                ctx.stores.ui.clear_search();
                ctx.pop_layer();
                super::full_task::open(ctx, &task_id, false);
            })
        }
        Action::Left | Action::Right => ActionResult::consumed(),
        _ => return None,
    };
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::context::EffectContext;
    use crate::focus::path::FocusPath;
    use crate::focus::state::FocusState;
    use crate::store::task::TaskPatch;
    use crate::store::Stores;

    fn setup(query: &str) -> (Stores, FocusState) {
        let mut stores = Stores::default();
        for title in ["alpha one", "alpha two", "beta"] {
            stores.task.create_task(
                "todo",
                TaskPatch {
                    title: Some(title.to_string()),
                    ..TaskPatch::default()
                },
            );
        }
        for c in query.chars() {
            stores.ui.push_search_char(c);
        }
        let mut focus = FocusState::default();
        focus.push_layer(FocusPath::from("search.input"));
        (stores, focus)
    }

    fn run(stores: &mut Stores, focus: &mut FocusState, action: Action) -> Option<Option<FocusPath>> {
        let current = focus.current().clone();
        let parsed = current.parsed();
        let mut result = handle(
            &NavigationContext {
                current_path: &current,
                parsed: &parsed,
                stores,
            },
            action,
        )?;
        if let Some(path) = result.new_path.clone() {
            focus.set_path(path);
        }
        if let Some(effect) = result.effect.take() {
            effect(&mut EffectContext { stores, focus });
        }
        Some(result.new_path)
    }

    #[test]
    fn down_enters_results_only_when_present() {
        let (mut stores, mut focus) = setup("gamma");
        assert_eq!(run(&mut stores, &mut focus, Action::Down), Some(None));
        assert_eq!(focus.current(), &"search.input");

        let (mut stores, mut focus) = setup("alpha");
        run(&mut stores, &mut focus, Action::Down);
        assert_eq!(focus.current(), &"search.result-0");
        run(&mut stores, &mut focus, Action::Down);
        assert_eq!(focus.current(), &"search.result-1");
        assert_eq!(run(&mut stores, &mut focus, Action::Down), Some(None));
    }

    #[test]
    fn up_from_first_result_returns_to_input() {
        let (mut stores, mut focus) = setup("alpha");
        focus.set_path(FocusPath::from("search.result-1"));
        run(&mut stores, &mut focus, Action::Up);
        assert_eq!(focus.current(), &"search.result-0");
        run(&mut stores, &mut focus, Action::Up);
        assert_eq!(focus.current(), &"search.input");
    }

    #[test]
    fn select_result_opens_detail_layer() {
        let (mut stores, mut focus) = setup("beta");
        focus.set_path(FocusPath::from("search.result-0"));
        run(&mut stores, &mut focus, Action::Select);
        assert_eq!(stores.ui.full_task_stack(), ["TASK-003".to_string()]);
        assert_eq!(focus.current(), &"fullTask.0.editor.title");
        assert_eq!(focus.depth(), 1);
        assert_eq!(focus.stack()[0], FocusPath::from("kanban.board.todo.new-task"));
        assert_eq!(stores.ui.search_query(), "");
    }

    #[test]
    fn back_closes_overlay() {
        let (mut stores, mut focus) = setup("alpha");
        run(&mut stores, &mut focus, Action::Back);
        assert_eq!(focus.current(), &"kanban.board.todo.new-task");
        assert_eq!(focus.depth(), 0);
    }

    #[test]
    fn unrelated_actions_fall_through() {
        let (mut stores, mut focus) = setup("alpha");
        assert!(run(&mut stores, &mut focus, Action::Save).is_none());
        assert!(run(&mut stores, &mut focus, Action::Delete).is_none());
    }
}
