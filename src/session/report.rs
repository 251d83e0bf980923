//! Text rendering of circuits and solutions.

use std::fmt::Write;

use crate::circuit::Circuit;
use crate::solver::Solution;

/// Format `value` with `precision` decimals, without printing `-0.00`.
pub fn fixed(value: f64, precision: usize) -> String {
    let scale = 10f64.powi(precision as i32);
    let value = if (value * scale).round() == 0.0 { 0.0 } else { value };
    format!("{:.*}", precision, value)
}

/// Render node potentials followed by element currents.
pub fn format_solution(solution: &Solution, precision: usize) -> String {
    let mut out = String::from("Node potentials:");
    for (node, potential) in solution.potentials() {
        let _ = write!(out, "\n  {}: {} V", node, fixed(potential, precision));
    }

    out.push_str("\nElement currents:");
    for c in solution.currents() {
        let [a, b] = c.element.nodes();
        let _ = write!(
            out,
            "\n  [{}] {} {} -> {}: {} A",
            c.index,
            c.element.kind(),
            a,
            b,
            fixed(c.current, precision)
        );
    }
    out
}

/// Render the element list and ground designation.
pub fn format_circuit(circuit: &Circuit) -> String {
    if circuit.is_empty() {
        return "Circuit is empty.".to_string();
    }

    let mut out = String::new();
    for (index, element) in circuit.elements().iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", index, element);
    }
    match circuit.ground() {
        Some(ground) if circuit.contains_node(ground.as_str()) => {
            let _ = write!(out, "Ground: {}", ground);
        }
        Some(ground) => {
            let _ = write!(out, "Ground: {} (no longer in the circuit)", ground);
        }
        None => out.push_str("Ground: not set"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_suppresses_negative_zero() {
        assert_eq!(fixed(-0.0001, 2), "0.00");
        assert_eq!(fixed(-0.05, 2), "-0.05");
        assert_eq!(fixed(5.0, 2), "5.00");
        assert_eq!(fixed(1.23456, 4), "1.2346");
    }

    #[test]
    fn test_format_solution() {
        let mut c = Circuit::new();
        c.add_resistor("A", "B", 100.0).unwrap();
        c.add_voltage_source("A", "B", 5.0).unwrap();
        c.set_ground("B").unwrap();
        let text = format_solution(&c.solve().unwrap(), 2);
        assert_eq!(
            text,
            "Node potentials:\n  A: 5.00 V\n  B: 0.00 V\n\
             Element currents:\n  [0] Resistor A -> B: 0.05 A\n  [1] Voltage source A -> B: -0.05 A"
        );
    }

    #[test]
    fn test_format_circuit() {
        let mut c = Circuit::new();
        assert_eq!(format_circuit(&c), "Circuit is empty.");

        c.add_resistor("A", "B", 100.0).unwrap();
        c.add_voltage_source("A", "B", 5.0).unwrap();
        assert_eq!(
            format_circuit(&c),
            "[0] Resistor: 100 Ω between A and B\n\
             [1] Voltage source: 5 V between A and B\n\
             Ground: not set"
        );

        c.set_ground("B").unwrap();
        assert!(format_circuit(&c).ends_with("Ground: B"));
    }
}
