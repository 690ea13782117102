//! Error types for rebusgraph.
//!
//! Only genuine failures live here. "No puzzle for this input" outcomes
//! (ill-formed phrase, unknown compound, graph too wide for every template)
//! are ordinary `None` results and never reach this enum.

use thiserror::Error;

/// Result type alias using `RebusError`.
pub type RebusResult<T> = std::result::Result<T, RebusError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RebusError {
    /// A node was constructed without display text.
    #[error("MissingTextAttribute: puzzle nodes require non-empty text")]
    MissingTextAttribute,

    /// An edge or contraction referenced a node id that is not in the graph.
    #[error("UnknownNode: {0}")]
    UnknownNode(usize),

    /// `merge_nodes` was given something that is not a connected path.
    #[error("InvalidPath: {0}")]
    InvalidPath(String),

    /// Configuration or table contents are malformed.
    #[error("ConfigError: {0}")]
    Config(String),

    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),

    #[error("SerdeJsonError: {0}")]
    Json(#[from] serde_json::Error),
}
