//! MNA matrix assembly and solving.

use indexmap::IndexSet;

use crate::circuit::{Circuit, Node, VarIndex};
use crate::components::Element;
use crate::error::{NodalError, Result};

/// Assignment of circuit quantities to rows/columns of the MNA system.
///
/// Non-ground nodes take indices `0..n` in node-set order; voltage sources
/// take `n..n+m` in insertion order. Ground has no row.
#[derive(Debug, Clone)]
pub struct MnaLayout {
    ground: Node,
    unknowns: IndexSet<Node>,
    num_sources: usize,
}

impl MnaLayout {
    /// Build the layout of `circuit` with `ground` as reference node.
    pub fn new(circuit: &Circuit, ground: &Node) -> Self {
        let unknowns = circuit.nodes().filter(|n| *n != ground).cloned().collect();
        let num_sources = circuit
            .elements()
            .iter()
            .filter(|e| matches!(e, Element::VoltageSource(_)))
            .count();
        Self {
            ground: ground.clone(),
            unknowns,
            num_sources,
        }
    }

    /// Number of non-ground nodes.
    pub fn num_nodes(&self) -> usize {
        self.unknowns.len()
    }

    /// Number of voltage source currents.
    pub fn num_sources(&self) -> usize {
        self.num_sources
    }

    /// Total system dimension.
    pub fn size(&self) -> usize {
        self.num_nodes() + self.num_sources
    }

    /// Get the matrix index for a node potential.
    /// Returns None for ground.
    pub fn node_index(&self, node: &Node) -> Option<usize> {
        if *node == self.ground {
            return None;
        }
        self.unknowns
            .get_index_of(node)
            .map(|n| VarIndex::Potential(n).to_index(self.num_nodes()))
    }

    /// Get the matrix index for the current of the k-th voltage source.
    pub fn branch_index(&self, k: usize) -> usize {
        VarIndex::SourceCurrent(k).to_index(self.num_nodes())
    }

    /// The reference node.
    pub fn ground(&self) -> &Node {
        &self.ground
    }
}

/// MNA matrix system Ax = z.
#[derive(Debug)]
pub struct MnaMatrix {
    /// System matrix A (row-major)
    pub a: Vec<f64>,
    /// Source vector z
    pub z: Vec<f64>,
    /// Solution vector x
    pub x: Vec<f64>,
    /// Matrix dimension
    pub size: usize,
    /// LU decomposition of A
    pub lu: Vec<f64>,
    /// Pivot indices for LU decomposition
    pub pivots: Vec<usize>,
    /// Largest magnitude of each row of A, divided out before factoring
    pub row_scale: Vec<f64>,
}

impl MnaMatrix {
    /// Create a zeroed MNA system of the given dimension.
    pub fn new(size: usize) -> Self {
        Self {
            a: vec![0.0; size * size],
            z: vec![0.0; size],
            x: vec![0.0; size],
            size,
            lu: vec![0.0; size * size],
            pivots: vec![0; size],
            row_scale: vec![1.0; size],
        }
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.a[row * self.size + col]
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.a[row * self.size + col] += value;
    }

    /// Stamp a conductance between two nodes.
    /// For a conductance G between nodes n1 and n2:
    ///   A[n1,n1] += G
    ///   A[n2,n2] += G
    ///   A[n1,n2] -= G
    ///   A[n2,n1] -= G
    pub fn stamp_conductance(&mut self, n1: Option<usize>, n2: Option<usize>, g: f64) {
        if let Some(i) = n1 {
            self.add(i, i, g);
        }
        if let Some(j) = n2 {
            self.add(j, j, g);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -g);
            self.add(j, i, -g);
        }
    }

    /// Stamp a voltage source between two nodes with branch current at index br.
    /// V[n+] - V[n-] = E
    pub fn stamp_voltage_source(
        &mut self,
        n_pos: Option<usize>,
        n_neg: Option<usize>,
        br: usize,
        voltage: f64,
    ) {
        if let Some(i) = n_pos {
            self.add(br, i, 1.0);
            self.add(i, br, 1.0);
        }
        if let Some(j) = n_neg {
            self.add(br, j, -1.0);
            self.add(j, br, -1.0);
        }
        self.z[br] = voltage;
    }

    /// Perform LU decomposition with partial pivoting.
    ///
    /// Rows are equilibrated first so each has a largest entry of 1; a
    /// pivot no larger than `tolerance` then marks the system as singular.
    pub fn factor(&mut self, tolerance: f64) -> Result<()> {
        let n = self.size;
        self.lu.copy_from_slice(&self.a);

        for i in 0..n {
            self.pivots[i] = i;

            let row = &mut self.lu[i * n..(i + 1) * n];
            let scale = row.iter().fold(0.0f64, |m, v| m.max(v.abs()));
            if scale == 0.0 {
                return Err(NodalError::SingularCircuit);
            }
            row.iter_mut().for_each(|v| *v /= scale);
            self.row_scale[i] = scale;
        }

        for k in 0..n {
            // Find pivot
            let mut max_val = self.lu[k * n + k].abs();
            let mut max_row = k;

            for i in (k + 1)..n {
                let val = self.lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val <= tolerance {
                return Err(NodalError::SingularCircuit);
            }

            if max_row != k {
                self.pivots.swap(k, max_row);
                for j in 0..n {
                    self.lu.swap(k * n + j, max_row * n + j);
                }
            }

            // Eliminate
            let pivot = self.lu[k * n + k];
            for i in (k + 1)..n {
                let factor = self.lu[i * n + k] / pivot;
                self.lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    self.lu[i * n + j] -= factor * self.lu[k * n + j];
                }
            }
        }

        Ok(())
    }

    /// Solve the system using the pre-computed LU decomposition.
    pub fn solve(&mut self) -> Result<()> {
        let n = self.size;

        // Apply row scaling and pivot permutation to z
        for i in 0..n {
            let row = self.pivots[i];
            self.x[i] = self.z[row] / self.row_scale[row];
        }

        // Forward substitution (L * y = Pb)
        for i in 0..n {
            for j in 0..i {
                self.x[i] -= self.lu[i * n + j] * self.x[j];
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                self.x[i] -= self.lu[i * n + j] * self.x[j];
            }
            let diag = self.lu[i * n + i];
            if diag == 0.0 {
                return Err(NodalError::SingularCircuit);
            }
            self.x[i] /= diag;
        }

        if self.x.iter().any(|v| !v.is_finite()) {
            return Err(NodalError::SingularCircuit);
        }

        Ok(())
    }

    /// Get the potential at a node index (ground is 0).
    pub fn voltage(&self, node: Option<usize>) -> f64 {
        match node {
            Some(i) => self.x[i],
            None => 0.0,
        }
    }
}

/// Stamp every element of the circuit into the MNA matrix.
pub fn stamp_circuit(circuit: &Circuit, layout: &MnaLayout, matrix: &mut MnaMatrix) {
    let mut k = 0;
    for element in circuit.elements() {
        let [a, b] = element.nodes();
        let n1 = layout.node_index(a);
        let n2 = layout.node_index(b);
        match element {
            Element::Resistor(r) => {
                matrix.stamp_conductance(n1, n2, r.conductance());
            }
            Element::VoltageSource(v) => {
                matrix.stamp_voltage_source(n1, n2, layout.branch_index(k), v.voltage);
                k += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resistor_stamp_to_ground_only_touches_diagonal() {
        let mut m = MnaMatrix::new(2);
        m.stamp_conductance(Some(0), None, 0.5);
        assert_relative_eq!(m.get(0, 0), 0.5);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(1, 0), 0.0);
        assert_eq!(m.get(1, 1), 0.0);
    }

    #[test]
    fn test_layout_orders_nodes_then_sources() {
        let mut c = Circuit::new();
        c.add_voltage_source("A", "0", 1.0).unwrap();
        c.add_resistor("A", "B", 1.0).unwrap();
        c.add_voltage_source("B", "0", 2.0).unwrap();
        let ground = Node::from("0");
        let layout = MnaLayout::new(&c, &ground);

        assert_eq!(layout.num_nodes(), 2);
        assert_eq!(layout.size(), 4);
        assert_eq!(layout.node_index(&Node::from("A")), Some(0));
        assert_eq!(layout.node_index(&Node::from("B")), Some(1));
        assert_eq!(layout.node_index(&ground), None);
        assert_eq!(layout.branch_index(1), 3);
    }

    #[test]
    fn test_stamp_series_chain() {
        let mut c = Circuit::new();
        c.add_resistor("A", "B", 10.0).unwrap();
        c.add_resistor("B", "C", 10.0).unwrap();
        c.add_voltage_source("A", "C", 10.0).unwrap();
        let ground = Node::from("C");
        let layout = MnaLayout::new(&c, &ground);
        let mut m = MnaMatrix::new(layout.size());
        stamp_circuit(&c, &layout, &mut m);

        // Unknowns: A=0, B=1, I_V=2
        assert_relative_eq!(m.get(0, 0), 0.1);
        assert_relative_eq!(m.get(1, 1), 0.2);
        assert_relative_eq!(m.get(0, 1), -0.1);
        assert_relative_eq!(m.get(1, 0), -0.1);
        assert_eq!(m.get(0, 2), 1.0);
        assert_eq!(m.get(2, 0), 1.0);
        assert_eq!(m.get(1, 2), 0.0);
        assert_eq!(m.z, vec![0.0, 0.0, 10.0]);
    }

    #[test]
    fn test_pivoting_handles_zero_leading_entry() {
        // [0 1; 1 0] x = [2; 3] has a zero first pivot without row swaps
        let mut m = MnaMatrix::new(2);
        m.add(0, 1, 1.0);
        m.add(1, 0, 1.0);
        m.z = vec![2.0, 3.0];
        m.factor(1e-12).unwrap();
        m.solve().unwrap();
        assert_relative_eq!(m.x[0], 3.0);
        assert_relative_eq!(m.x[1], 2.0);
    }

    #[test]
    fn test_singular_matrix_detected() {
        let mut m = MnaMatrix::new(2);
        m.stamp_conductance(Some(0), Some(1), 1.0);
        assert!(matches!(m.factor(1e-12), Err(NodalError::SingularCircuit)));
    }

    #[test]
    fn test_empty_system_is_trivially_solvable() {
        let mut m = MnaMatrix::new(0);
        m.factor(1e-12).unwrap();
        m.solve().unwrap();
        assert!(m.x.is_empty());
    }

    #[test]
    fn test_row_scaling_keeps_tiny_conductances() {
        // Source stamps of 1 next to a 1e-13 S conductance
        let g = 1e-13;
        let mut m = MnaMatrix::new(3);
        m.stamp_conductance(Some(0), Some(1), g);
        m.stamp_conductance(Some(1), None, g);
        m.stamp_voltage_source(Some(0), None, 2, 1.0);
        m.factor(1e-12).unwrap();
        m.solve().unwrap();
        assert_relative_eq!(m.x[0], 1.0, max_relative = 1e-9);
        assert_relative_eq!(m.x[1], 0.5, max_relative = 1e-9);
        assert_relative_eq!(m.x[2], -0.5 * g, max_relative = 1e-9);
    }

    #[test]
    fn test_nearly_singular_rejected_by_tolerance() {
        // Rows differ by 1e-9 after scaling
        let build = || {
            let mut m = MnaMatrix::new(2);
            m.stamp_conductance(Some(0), Some(1), 1.0);
            m.stamp_conductance(Some(1), None, 1e-9);
            m
        };
        assert!(build().factor(1e-12).is_ok());
        assert!(matches!(build().factor(1e-6), Err(NodalError::SingularCircuit)));
    }

    #[test]
    fn test_zero_row_is_singular() {
        let mut m = MnaMatrix::new(2);
        m.add(0, 0, 1.0);
        assert!(matches!(m.factor(1e-12), Err(NodalError::SingularCircuit)));
    }
}
