//! Project sidebar: `kanban.sidebar[.project-<id>]`.

use crate::events::io::Event as IoEvent;
use crate::focus::action::{Action, ActionResult};
use crate::focus::context::NavigationContext;
use crate::focus::path::{extract_project_id, project_item, ParsedFocusPath, NEW_TASK};

pub fn handle(ctx: &NavigationContext<'_>, action: Action) -> Option<ActionResult> {
    let projects = ctx.stores.project.projects();
    let project_id = extract_project_id(ctx.parsed.item.as_deref());
    let index = project_id
        .as_deref()
        .and_then(|id| ctx.stores.project.index_of(id));
    let entry = |i: usize| ParsedFocusPath::sidebar(Some(&project_item(&projects[i].id))).build();

    let result = match action {
        Action::Up => match index {
            Some(i) if i > 0 => ActionResult::navigate(entry(i - 1)),
            _ => ActionResult::consumed(),
        },
        Action::Down => {
            let next = index.map_or(0, |i| i + 1);
            if next < projects.len() {
                ActionResult::navigate(entry(next))
            } else {
                ActionResult::consumed()
            }
        }
        Action::Left => ActionResult::consumed(),
        Action::Right | Action::Back => match ctx.stores.config.first_column() {
            Some(column) => ActionResult::navigate(ParsedFocusPath::board(&column.id, NEW_TASK).build()),
            None => ActionResult::consumed(),
        },
        Action::Select => {
            let id = projects.get(index?)?.id.clone();
            ActionResult::effect(move |ctx| ctx.stores.dispatch(IoEvent::LoadProject { id }))
        }
        Action::Delete => {
            let project = projects.get(index?)?;
            let (id, name) = (project.id.clone(), project.name.clone());
            ActionResult::effect(move |ctx| {
                ctx.stores.ui.show_confirm(
                    "Delete project",
                    &format!("Remove project \"{}\" from the list?", name),
                    move |ctx| {
                        ctx.stores.project.delete_project(&id);
                        ctx.stores.ui.hide_confirm();
                        ctx.pop_layer();
                        ctx.set_path(ParsedFocusPath::sidebar(None).build());
                        ctx.stores.dispatch(IoEvent::SaveRegistry);
                    },
                );
                ctx.push_layer(ParsedFocusPath::dialog(super::dialog::CONFIRM).build());
            })
        }
        _ => return None,
    };
    Some(result)
}
