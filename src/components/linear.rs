//! Linear passive components: Resistor.

use crate::circuit::Node;
use crate::error::{NodalError, Result};

/// A resistor between two nodes.
///
/// Current is reported as flowing from `nodes[0]` to `nodes[1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    pub nodes: [Node; 2],
    pub resistance: f64,
}

impl Resistor {
    /// Create a new resistor.
    ///
    /// Zero, negative and non-finite resistances have no conductance and
    /// are rejected here instead of surfacing as a failed solve.
    pub fn new(nodes: [Node; 2], resistance: f64) -> Result<Self> {
        if !(resistance.is_finite() && resistance > 0.0) {
            return Err(NodalError::InvalidResistance { value: resistance });
        }
        Ok(Self { nodes, resistance })
    }

    /// Get the conductance (1/R).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    /// Current from `nodes[0]` to `nodes[1]` given both terminal potentials.
    pub fn current(&self, v_a: f64, v_b: f64) -> f64 {
        (v_a - v_b) / self.resistance
    }
}
