//! Catch-all handler. Answers only `search` and `save`.

use crate::events::io::Event as IoEvent;
use crate::focus::action::{Action, ActionResult};
use crate::focus::context::NavigationContext;
use crate::focus::path::{Layer, ParsedFocusPath, SEARCH_INPUT};

pub fn handle(ctx: &NavigationContext<'_>, action: Action) -> Option<ActionResult> {
    match action {
        Action::Search if ctx.parsed.layer == Layer::Search => None,
        Action::Search => Some(ActionResult::effect(|ctx| {
            ctx.stores.commit_edit();
            ctx.stores.ui.clear_search();
            ctx.push_layer(ParsedFocusPath::search(SEARCH_INPUT).build());
        })),
        Action::Save => Some(ActionResult::effect(|ctx| {
            ctx.stores.commit_edit();
            ctx.stores.dispatch(IoEvent::SaveBoard);
        })),
        _ => None,
    }
}
