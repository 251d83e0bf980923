//! Circuit validation.

use crate::error::{NodalError, Result};

use super::{Circuit, Node};

/// Validate a circuit for solving and return its ground node.
///
/// Checks:
/// - A ground node has been designated
/// - The ground node is still a terminal of some element
///
/// Floating subgraphs and conflicting sources are only detectable from the
/// assembled matrix and are reported by the solver.
pub fn validate_circuit(circuit: &Circuit) -> Result<&Node> {
    match circuit.ground() {
        Some(ground) if circuit.contains_node(ground.as_str()) => Ok(ground),
        _ => Err(NodalError::NoGround),
    }
}
