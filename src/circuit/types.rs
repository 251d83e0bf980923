//! Core types for circuit representation.

use std::borrow::Borrow;
use std::fmt;

/// The name of an electrical node.
///
/// Nodes carry no state of their own; a node exists while at least one
/// element has it as a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node(String);

impl Node {
    /// Create a node from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The node's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Node {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Node {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Node {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets node sets be queried with a plain `&str`.
impl Borrow<str> for Node {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Variable index in the MNA solution vector.
/// Can be either a node potential or a voltage source current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarIndex {
    /// Potential of the n-th non-ground node
    Potential(usize),
    /// Current through the k-th voltage source
    SourceCurrent(usize),
}

impl VarIndex {
    /// Get the raw index into the solution vector.
    /// Node potentials come first, then source currents.
    pub fn to_index(&self, num_nodes: usize) -> usize {
        match self {
            VarIndex::Potential(n) => *n,
            VarIndex::SourceCurrent(k) => num_nodes + k,
        }
    }
}
