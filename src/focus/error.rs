//! Focus router error types.

/// Errors raised while assembling the router. Dispatching a key never
/// fails; unknown paths are simply not handled.
#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    /// A handler pattern failed to compile
    #[error("Invalid pattern for handler '{handler}': {source}")]
    InvalidPattern {
        handler: &'static str,
        source: regex::Error,
    },
}
