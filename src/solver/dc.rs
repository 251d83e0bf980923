//! DC operating point of a circuit.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::circuit::{validate_circuit, Circuit, Node};
use crate::components::Element;
use crate::error::Result;

use super::mna::{stamp_circuit, MnaLayout, MnaMatrix};
use super::DEFAULT_PIVOT_TOLERANCE;

/// Configuration for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Pivot threshold, after row equilibration, below which the system
    /// counts as singular.
    pub pivot_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pivot tolerance.
    ///
    /// Each row of A is divided by its largest magnitude before factoring;
    /// a pivot is rejected when its magnitude is at most `tolerance`.
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }
}

/// Current through one element of a solved circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementCurrent {
    /// Index of the element at solve time
    pub index: usize,
    /// The element itself
    pub element: Element,
    /// Current in amperes, positive from `nodes[0]` to `nodes[1]` for
    /// resistors; the MNA branch unknown for voltage sources
    pub current: f64,
}

/// Result of a solve: node potentials and element currents.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    ground: Node,
    potentials: IndexMap<Node, f64>,
    currents: Vec<ElementCurrent>,
}

impl Solution {
    /// Potential of `node` in volts, if the node was part of the circuit.
    pub fn potential(&self, node: &str) -> Option<f64> {
        self.potentials.get(node).copied()
    }

    /// All node potentials in node order, ground included.
    pub fn potentials(&self) -> impl Iterator<Item = (&Node, f64)> {
        self.potentials.iter().map(|(n, v)| (n, *v))
    }

    /// Current through the element at `index`.
    pub fn current(&self, index: usize) -> Option<f64> {
        self.currents.get(index).map(|c| c.current)
    }

    /// Element currents in insertion order.
    pub fn currents(&self) -> &[ElementCurrent] {
        &self.currents
    }

    /// The reference node the solve was made against.
    pub fn ground(&self) -> &Node {
        &self.ground
    }
}

/// Dense MNA solver for linear DC circuits.
#[derive(Debug, Clone, Default)]
pub struct DcSolver {
    config: SolverConfig,
}

impl DcSolver {
    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve the circuit. The circuit is only read.
    pub fn solve(&self, circuit: &Circuit) -> Result<Solution> {
        let ground = validate_circuit(circuit)?;
        let layout = MnaLayout::new(circuit, ground);
        debug!(
            "solving {} node(s) + {} source(s) against ground {}",
            layout.num_nodes(),
            layout.num_sources(),
            ground
        );

        let mut matrix = MnaMatrix::new(layout.size());
        stamp_circuit(circuit, &layout, &mut matrix);

        if let Err(e) = matrix
            .factor(self.config.pivot_tolerance)
            .and_then(|()| matrix.solve())
        {
            warn!("MNA system of size {} is singular", layout.size());
            return Err(e);
        }

        Ok(extract_solution(circuit, &layout, &matrix))
    }
}

/// Map the raw solution vector back onto nodes and elements.
fn extract_solution(circuit: &Circuit, layout: &MnaLayout, matrix: &MnaMatrix) -> Solution {
    let potentials: IndexMap<Node, f64> = circuit
        .nodes()
        .map(|node| (node.clone(), matrix.voltage(layout.node_index(node))))
        .collect();

    let mut k = 0;
    let currents = circuit
        .elements()
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let current = match element {
                Element::Resistor(r) => {
                    let [a, b] = &r.nodes;
                    r.current(
                        matrix.voltage(layout.node_index(a)),
                        matrix.voltage(layout.node_index(b)),
                    )
                }
                Element::VoltageSource(_) => {
                    let i = matrix.x[layout.branch_index(k)];
                    k += 1;
                    i
                }
            };
            ElementCurrent {
                index,
                element: element.clone(),
                current,
            }
        })
        .collect();

    Solution {
        ground: layout.ground().clone(),
        potentials,
        currents,
    }
}
