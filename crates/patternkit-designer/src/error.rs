//! Error handling for the PatternKit designer
//!
//! Reducer actions never fail: inapplicable actions are logged and leave the
//! state untouched. The errors here come from the history structure, whose
//! queries can be asked for positions that do not exist.

use thiserror::Error;

/// History error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// Depth 0 names the present, which holds no action
    #[error("History depth must be at least 1")]
    InvalidDepth,

    /// A branch id that is not in the branch table
    #[error("Unknown history branch {branch}")]
    UnknownBranch {
        /// The missing branch id.
        branch: usize,
    },

    /// A parent link that does not point to an older branch
    #[error("Corrupt history: {reason}")]
    Corrupt {
        /// What was wrong with the branch table.
        reason: String,
    },
}

/// Result type alias for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;
