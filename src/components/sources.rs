//! Ideal voltage sources.

use crate::circuit::Node;
use crate::error::{NodalError, Result};

/// An ideal voltage source component.
///
/// Voltage sources require an extra row/column in the MNA matrix for the
/// branch current. The source enforces: V(nodes[0]) - V(nodes[1]) = voltage
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageSource {
    pub nodes: [Node; 2], // [positive, negative]
    pub voltage: f64,
}

impl VoltageSource {
    /// Create a new voltage source.
    pub fn new(nodes: [Node; 2], voltage: f64) -> Result<Self> {
        if !voltage.is_finite() {
            return Err(NodalError::InvalidVoltage { value: voltage });
        }
        Ok(Self { nodes, voltage })
    }
}
