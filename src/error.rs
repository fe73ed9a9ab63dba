//! Error types for the 2-3 tree crate.
//!
//! Tree operations themselves never fail: a duplicate insert, a missing key or
//! an empty tree are reported through `bool` and `Option` results. These
//! errors cover invariant checking, driver input and configuration.

use thiserror::Error;

/// Result type alias for fallible crate operations
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur outside the core tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A 3-node whose keys are not strictly increasing
    #[error("keys out of order in node at depth {depth}")]
    UnorderedKeys { depth: usize },

    /// A key outside the range its ancestors' separators allow
    #[error("node at depth {depth} holds a key outside its parent's separator range")]
    SubtreeOutOfRange { depth: usize },

    /// Leaves at different depths
    #[error("leaf at depth {found}, expected every leaf at depth {expected}")]
    UnevenLeafDepth { expected: usize, found: usize },

    /// A node with some children present and some absent
    #[error("node at depth {depth} mixes present and absent children")]
    ChildArity { depth: usize },

    /// The incremental key count disagrees with the node graph
    #[error("size counter records {recorded} keys but the tree holds {actual}")]
    SizeMismatch { recorded: usize, actual: usize },

    /// Driver input that is not a valid key
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Driver command that does not exist
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Driver command given without its argument
    #[error("missing argument for '{0}'")]
    MissingArgument(String),

    /// Traversal order name that does not exist
    #[error("unknown traversal order: {0}")]
    UnknownOrder(String),

    /// Invalid configuration value
    #[error("invalid value for {name}: {message}")]
    Config { name: String, message: String },
}

impl TreeError {
    /// Create an invalid key error
    pub fn invalid_key(input: impl Into<String>) -> Self {
        Self::InvalidKey(input.into())
    }

    /// Create an unknown command error
    pub fn unknown_command(input: impl Into<String>) -> Self {
        Self::UnknownCommand(input.into())
    }

    /// Create a configuration error
    pub fn config(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether this error reports a broken tree rather than bad input
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::UnorderedKeys { .. }
                | Self::SubtreeOutOfRange { .. }
                | Self::UnevenLeafDepth { .. }
                | Self::ChildArity { .. }
                | Self::SizeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TreeError::UnevenLeafDepth {
            expected: 2,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "leaf at depth 3, expected every leaf at depth 2"
        );
        assert_eq!(
            TreeError::config("TREE23_LISTEN_ADDR", "bad address").to_string(),
            "invalid value for TREE23_LISTEN_ADDR: bad address"
        );
    }

    #[test]
    fn test_invariant_classification() {
        assert!(TreeError::ChildArity { depth: 1 }.is_invariant_violation());
        assert!(!TreeError::invalid_key("abc").is_invariant_violation());
    }
}
