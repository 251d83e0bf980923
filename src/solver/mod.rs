//! MNA (Modified Nodal Analysis) solver.
//!
//! This module provides the numerical engine for solving a circuit.
//!
//! ## Modified Nodal Analysis
//!
//! MNA assembles a system of equations Ax = z where:
//! - x contains node potentials and voltage source currents
//! - A is the conductance/coefficient matrix
//! - z is the source vector
//!
//! The matrix structure is:
//! ```text
//! [ G   B ] [ v ]   [ 0 ]
//! [ C   0 ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - G is the conductance matrix (node equations)
//! - B, C = Bᵀ connect voltage sources to nodes
//! - v is the vector of non-ground node potentials
//! - j is the vector of voltage source currents
//! - e is the vector of voltage source values
//!
//! Ground has no row or column; its potential is fixed at 0 by omission.

mod dc;
mod mna;

pub use dc::{DcSolver, ElementCurrent, Solution, SolverConfig};
pub use mna::{stamp_circuit, MnaLayout, MnaMatrix};

/// Default pivot tolerance for singularity detection.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;
