//! Circuit graph structure.

use indexmap::IndexSet;
use log::debug;

use super::types::Node;
use crate::components::{Element, Resistor, VoltageSource};
use crate::error::{NodalError, Result};
use crate::solver::{DcSolver, Solution};

/// A mutable circuit of two-terminal elements over named nodes.
///
/// The node set is derived: it always equals the union of the terminals of
/// the current elements, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// Elements in insertion order; position is the removal index
    elements: Vec<Element>,

    /// Union of all element terminals
    nodes: IndexSet<Node>,

    /// Designated reference node, if any
    ground: Option<Node>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resistor between `a` and `b`. Returns the element's index.
    pub fn add_resistor(
        &mut self,
        a: impl Into<Node>,
        b: impl Into<Node>,
        resistance: f64,
    ) -> Result<usize> {
        let resistor = Resistor::new([a.into(), b.into()], resistance)?;
        Ok(self.push(resistor.into()))
    }

    /// Add an ideal voltage source, `a` positive. Returns the element's index.
    pub fn add_voltage_source(
        &mut self,
        a: impl Into<Node>,
        b: impl Into<Node>,
        voltage: f64,
    ) -> Result<usize> {
        let source = VoltageSource::new([a.into(), b.into()], voltage)?;
        Ok(self.push(source.into()))
    }

    fn push(&mut self, element: Element) -> usize {
        for node in element.nodes() {
            self.nodes.insert(node.clone());
        }
        debug!("added [{}] {}", self.elements.len(), element);
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Remove the element at `index`, returning it.
    ///
    /// Later elements shift down by one. Nodes left without any incident
    /// element disappear from the node set.
    pub fn remove_element(&mut self, index: usize) -> Result<Element> {
        if index >= self.elements.len() {
            return Err(NodalError::InvalidIndex {
                index,
                len: self.elements.len(),
            });
        }
        let removed = self.elements.remove(index);
        self.recalculate_nodes();
        debug!("removed [{}] {}", index, removed);
        Ok(removed)
    }

    fn recalculate_nodes(&mut self) {
        self.nodes = self
            .elements
            .iter()
            .flat_map(|element| element.nodes().iter().cloned())
            .collect();
    }

    /// Designate `node` as ground, replacing any previous choice.
    pub fn set_ground(&mut self, node: &str) -> Result<()> {
        let node = self
            .nodes
            .get(node)
            .ok_or_else(|| NodalError::unknown_node(node))?;
        debug!("ground set to {}", node);
        self.ground = Some(node.clone());
        Ok(())
    }

    /// The designated ground, even if it has since left the node set.
    pub fn ground(&self) -> Option<&Node> {
        self.ground.as_ref()
    }

    /// Check whether a solve can be attempted: ground is set and present.
    pub fn is_solvable(&self) -> bool {
        self.ground.as_ref().is_some_and(|g| self.nodes.contains(g))
    }

    /// Solve with the default solver configuration.
    pub fn solve(&self) -> Result<Solution> {
        DcSolver::default().solve(self)
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get the element at `index`.
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check whether the circuit has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All nodes in order of first appearance.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of nodes, ground included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether `node` is a terminal of some element.
    pub fn contains_node(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }
}
