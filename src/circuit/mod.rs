//! Circuit graph representation and validation.
//!
//! This module provides the mutable model the user edits: an ordered list of
//! [`Element`](crate::components::Element)s, the node set derived from their
//! terminals, and the designated ground node.

mod graph;
mod types;
mod validate;

pub use graph::Circuit;
pub use types::*;
pub use validate::validate_circuit;
