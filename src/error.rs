//! Error types for the nodal circuit solver.
//!
//! This module provides a unified error type [`NodalError`] that covers
//! all error conditions that can occur while editing a circuit, solving it,
//! and driving it from the command session.

use thiserror::Error;

/// Result type alias using [`NodalError`].
pub type Result<T> = std::result::Result<T, NodalError>;

/// Unified error type for all nodal operations.
#[derive(Error, Debug)]
pub enum NodalError {
    // ============ Circuit Errors ============
    /// Element index outside `[0, len)`
    #[error("Invalid element index {index} (circuit has {len} elements)")]
    InvalidIndex { index: usize, len: usize },

    /// Node is not a terminal of any element
    #[error("Node '{node}' is not present in the circuit")]
    UnknownNode { node: String },

    /// Solve attempted without a ground node in the circuit
    #[error("Ground node is not set (use 'ground <node>')")]
    NoGround,

    /// Resistance must be strictly positive and finite
    #[error("Invalid resistance {value}: must be a positive number")]
    InvalidResistance { value: f64 },

    /// Source voltage must be finite
    #[error("Invalid voltage {value}: must be a finite number")]
    InvalidVoltage { value: f64 },

    // ============ Solver Errors ============
    /// The assembled MNA matrix has no inverse
    #[error(
        "Circuit cannot be solved (singular matrix): \
         check for floating nodes or conflicting sources"
    )]
    SingularCircuit,

    // ============ Command Errors ============
    /// Unrecognized command keyword
    #[error("Unknown command '{command}' (type 'help' for a list of commands)")]
    UnknownCommand { command: String },

    /// Wrong number of arguments
    #[error("Invalid command format. Example: {usage}")]
    Usage { usage: &'static str },

    /// Argument could not be parsed as a number
    #[error("{what} (got '{text}')")]
    InvalidNumber { what: &'static str, text: String },

    // ============ I/O Errors ============
    /// Error reading commands or writing output
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Error reading a command script
    #[error("Failed to read script '{path}': {source}")]
    ScriptReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl NodalError {
    /// Create an unknown node error
    pub fn unknown_node(node: impl Into<String>) -> Self {
        Self::UnknownNode { node: node.into() }
    }

    /// Create an invalid number error
    pub fn invalid_number(what: &'static str, text: impl Into<String>) -> Self {
        Self::InvalidNumber {
            what,
            text: text.into(),
        }
    }

    /// Whether the error comes from the command layer rather than the circuit.
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. } | Self::Usage { .. } | Self::InvalidNumber { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = NodalError::InvalidIndex { index: 5, len: 2 };
        assert_eq!(err.to_string(), "Invalid element index 5 (circuit has 2 elements)");

        let err = NodalError::unknown_node("Z");
        assert!(err.to_string().contains("'Z'"));
    }

    #[test]
    fn test_command_error_classification() {
        assert!(NodalError::Usage { usage: "ground A" }.is_command_error());
        assert!(NodalError::invalid_number("index must be an integer", "x").is_command_error());
        assert!(!NodalError::NoGround.is_command_error());
        assert!(!NodalError::SingularCircuit.is_command_error());
    }
}
