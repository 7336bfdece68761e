use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for trail editing and walking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrailError {
    /// An edit was requested on a node whose shape does not support it,
    /// e.g. removing a mountain from a split.
    #[error("Cannot {operation} on a {found} node")]
    Structural {
        operation: &'static str,
        found: &'static str,
    },

    /// A decision outside top/bottom/stop was handed to a walker.
    #[error("Invalid walker decision: {0:?}")]
    InvalidDecision(String),
}
