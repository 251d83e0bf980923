//! Component models for circuit solving.
//!
//! This module provides the two supported two-terminal elements:
//! - Linear: Resistor
//! - Sources: ideal Voltage Source
//!
//! [`Element`] is the closed union over them; the solver matches on it
//! exhaustively when stamping and when mapping currents back.

mod linear;
mod sources;

pub use linear::Resistor;
pub use sources::VoltageSource;

use std::fmt;

use crate::circuit::Node;

/// The kind of an element, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Resistor,
    VoltageSource,
}

impl ElementKind {
    /// Unit symbol of the element's value.
    pub fn unit(&self) -> &'static str {
        match self {
            ElementKind::Resistor => "Ω",
            ElementKind::VoltageSource => "V",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Resistor => write!(f, "Resistor"),
            ElementKind::VoltageSource => write!(f, "Voltage source"),
        }
    }
}

/// A two-terminal circuit element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Resistor(Resistor),
    VoltageSource(VoltageSource),
}

impl Element {
    /// Get the element kind.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Resistor(_) => ElementKind::Resistor,
            Element::VoltageSource(_) => ElementKind::VoltageSource,
        }
    }

    /// Get both terminals, `[a, b]`.
    pub fn nodes(&self) -> &[Node; 2] {
        match self {
            Element::Resistor(r) => &r.nodes,
            Element::VoltageSource(v) => &v.nodes,
        }
    }

    /// Resistance in ohms or voltage in volts.
    pub fn value(&self) -> f64 {
        match self {
            Element::Resistor(r) => r.resistance,
            Element::VoltageSource(v) => v.voltage,
        }
    }

    /// Check whether the element has `node` as one of its terminals.
    pub fn touches(&self, node: &str) -> bool {
        self.nodes().iter().any(|n| n.as_str() == node)
    }
}

impl From<Resistor> for Element {
    fn from(r: Resistor) -> Self {
        Element::Resistor(r)
    }
}

impl From<VoltageSource> for Element {
    fn from(v: VoltageSource) -> Self {
        Element::VoltageSource(v)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        let [a, b] = self.nodes();
        write!(f, "{}: {} {} between {} and {}", kind, self.value(), kind.unit(), a, b)
    }
}
