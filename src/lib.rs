//! # Nodal Core
//!
//! An interactive solver for linear DC circuits.
//!
//! This library provides:
//! - A mutable circuit model of resistors and ideal voltage sources over named nodes
//! - Modified Nodal Analysis (MNA) assembly and a dense LU solve with partial pivoting
//! - A line-oriented command session for building and solving circuits interactively
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Circuit graph representation and validation
//! - [`components`] - Element models (resistor, voltage source)
//! - [`solver`] - MNA matrix assembly and numerical solving
//! - [`command`] - Parser for the command language
//! - [`session`] - Interactive session owning one circuit
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use nodal_core::Circuit;
//!
//! let mut circuit = Circuit::new();
//! circuit.add_resistor("A", "B", 100.0)?;
//! circuit.add_voltage_source("A", "B", 5.0)?;
//! circuit.set_ground("B")?;
//!
//! let solution = circuit.solve()?;
//! assert!((solution.potential("A").unwrap() - 5.0).abs() < 1e-9);
//! assert!((solution.current(0).unwrap() - 0.05).abs() < 1e-9);
//! # Ok::<(), nodal_core::NodalError>(())
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! nodal                   # interactive
//! nodal --script divider.txt --quiet
//! ```
//!
//! ## Solution Method
//!
//! For a circuit with `n` non-ground nodes and `m` voltage sources:
//!
//! 1. Stamp every element into an `(n + m) × (n + m)` matrix A and source vector z
//! 2. Factor A with partial pivoting; a vanishing pivot means the circuit is singular
//! 3. Read node potentials from x[0..n] and source currents from x[n..n + m]
//! 4. Derive resistor currents from the potentials of their terminals

pub mod circuit;
pub mod command;
pub mod components;
pub mod error;
pub mod session;
pub mod solver;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use command::Command;
pub use components::Element;
pub use error::{NodalError, Result};
pub use session::{Session, SessionConfig};
pub use solver::{DcSolver, Solution, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuit;
