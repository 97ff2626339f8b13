//! Semantic focus router.
//!
//! One dot-separated [`FocusPath`] names whatever owns keyboard input.
//! Key presses become [`Action`]s, the [`Dispatcher`] offers them to the
//! navigation handlers in a fixed order, and the first answer moves focus
//! and runs its effect. Renderers only ever ask whether a pattern matches
//! the current path.

pub mod action;
pub mod context;
pub mod dispatcher;
mod error;
pub mod handlers;
pub mod list;
pub mod path;
pub mod pattern;
pub mod state;

pub use action::{Action, ActionResult, Effect};
pub use context::{EffectContext, NavigationContext};
pub use dispatcher::{Dispatcher, InputOrigin};
pub use error::FocusError;
pub use path::{FocusPath, ParsedFocusPath};
pub use state::FocusState;
