//! WASM bindings for Nodal Core.
//!
//! This module exposes a command session to JavaScript, so a web page can
//! offer the same command language as the native CLI.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuit } from 'nodal_core';
//!
//! await init();
//!
//! const circuit = new WasmCircuit();
//! circuit.execute("resistor A B 100");
//! circuit.execute("voltage A B 5");
//! circuit.execute("ground B");
//! console.log(circuit.execute("solve"));
//! ```

use wasm_bindgen::prelude::*;

use crate::session::{Reply, Session, SessionConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible circuit session.
#[wasm_bindgen]
pub struct WasmCircuit {
    session: Session,
}

#[wasm_bindgen]
impl WasmCircuit {
    /// Create an empty circuit with two-decimal output.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCircuit {
        Self::with_precision(crate::session::DEFAULT_PRECISION)
    }

    /// Create an empty circuit printing `precision` decimals.
    #[wasm_bindgen]
    pub fn with_precision(precision: usize) -> WasmCircuit {
        let config = SessionConfig::new().quiet().with_precision(precision);
        WasmCircuit {
            session: Session::new(config),
        }
    }

    /// Execute one command line and return its output.
    ///
    /// Errors are returned as rejected values carrying the message; the
    /// circuit is left unchanged.
    #[wasm_bindgen]
    pub fn execute(&mut self, line: &str) -> Result<String, JsValue> {
        match self.session.execute_line(line) {
            Ok(Reply::Output(text)) => Ok(text),
            Ok(Reply::Nothing) | Ok(Reply::Exit) => Ok(String::new()),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Number of elements in the circuit.
    #[wasm_bindgen(getter)]
    pub fn element_count(&self) -> usize {
        self.session.circuit().len()
    }

    /// Solve and return the potential of `node_name`.
    ///
    /// Returns `undefined` if the circuit cannot be solved or the node
    /// does not exist.
    #[wasm_bindgen]
    pub fn node_potential(&self, node_name: &str) -> Option<f64> {
        self.session.solve().ok()?.potential(node_name)
    }
}

impl Default for WasmCircuit {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
