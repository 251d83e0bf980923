//! Line-oriented command language for editing and solving a circuit.
//!
//! Each line holds one command. Keywords are case-insensitive; node names
//! are kept as typed. Lines starting with `#` are comments.
//!
//! | Command | Effect |
//! |---------|--------|
//! | `resistor <n1> <n2> <ohms>` | Add a resistor |
//! | `voltage <n1> <n2> <volts>` | Add a voltage source, `n1` positive |
//! | `remove <index>` | Remove an element by index |
//! | `ground <node>` | Set the reference node |
//! | `solve` | Solve and print potentials and currents |
//! | `show` | List the elements |
//! | `help` | Print this summary |
//! | `exit` | Leave the session |
//!
//! Values accept SI suffixes: `resistor in out 4.7k`.

mod value;

pub use value::parse_value;

use crate::error::{NodalError, Result};

/// One-line summaries shown by `help` and the session banner.
pub const HELP: &str = "\
Commands:
  resistor <node1> <node2> <resistance>: add a resistor
  voltage <node1> <node2> <voltage>: add a voltage source (node1 positive)
  remove <index>: remove an element by index
  ground <node>: set the ground (reference) node
  solve: solve the circuit
  show: show the current circuit
  help: show this message
  exit: leave the program";

/// A parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Resistor { a: String, b: String, resistance: f64 },
    Voltage { a: String, b: String, voltage: f64 },
    Remove { index: usize },
    Ground { node: String },
    Solve,
    Show,
    Help,
    Exit,
    /// Blank or comment line
    Empty,
}

impl Command {
    /// Parse a single command line.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Command::Empty);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let keyword = parts[0].to_lowercase();
        let args = &parts[1..];

        match keyword.as_str() {
            "resistor" => {
                let [a, b, value] = expect_args::<3>(args, "resistor A B 100")?;
                let resistance = parse_value(value).ok_or_else(|| {
                    NodalError::invalid_number("resistance must be a number", value)
                })?;
                Ok(Command::Resistor {
                    a: a.to_string(),
                    b: b.to_string(),
                    resistance,
                })
            }
            "voltage" => {
                let [a, b, value] = expect_args::<3>(args, "voltage A B 5")?;
                let voltage = parse_value(value)
                    .ok_or_else(|| NodalError::invalid_number("voltage must be a number", value))?;
                Ok(Command::Voltage {
                    a: a.to_string(),
                    b: b.to_string(),
                    voltage,
                })
            }
            "remove" => {
                let [index] = expect_args::<1>(args, "remove 0")?;
                let index = index.parse::<usize>().map_err(|_| {
                    NodalError::invalid_number("index must be a non-negative integer", index)
                })?;
                Ok(Command::Remove { index })
            }
            "ground" => {
                let [node] = expect_args::<1>(args, "ground A")?;
                Ok(Command::Ground {
                    node: node.to_string(),
                })
            }
            "solve" => expect_args::<0>(args, "solve").map(|_| Command::Solve),
            "show" => expect_args::<0>(args, "show").map(|_| Command::Show),
            "help" => expect_args::<0>(args, "help").map(|_| Command::Help),
            "exit" | "quit" => expect_args::<0>(args, "exit").map(|_| Command::Exit),
            _ => Err(NodalError::UnknownCommand { command: keyword }),
        }
    }
}

fn expect_args<'a, const N: usize>(args: &[&'a str], usage: &'static str) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| NodalError::Usage { usage })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resistor() {
        let cmd = Command::parse("resistor A B 100").unwrap();
        assert_eq!(
            cmd,
            Command::Resistor {
                a: "A".to_string(),
                b: "B".to_string(),
                resistance: 100.0
            }
        );
    }

    #[test]
    fn test_keyword_case_insensitive_nodes_preserved() {
        let cmd = Command::parse("  VOLTAGE In gnd 4.5k ").unwrap();
        assert_eq!(
            cmd,
            Command::Voltage {
                a: "In".to_string(),
                b: "gnd".to_string(),
                voltage: 4500.0
            }
        );
    }

    #[test]
    fn test_wrong_arity_reports_usage() {
        let err = Command::parse("resistor A B").unwrap_err();
        assert!(matches!(err, NodalError::Usage { usage: "resistor A B 100" }));
        assert!(matches!(Command::parse("solve now"), Err(NodalError::Usage { .. })));
        assert!(matches!(Command::parse("ground"), Err(NodalError::Usage { .. })));
    }

    #[test]
    fn test_invalid_numbers() {
        let err = Command::parse("resistor A B ten").unwrap_err();
        assert_eq!(err.to_string(), "resistance must be a number (got 'ten')");
        assert!(matches!(
            Command::parse("voltage A B x"),
            Err(NodalError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Command::parse("remove -1"),
            Err(NodalError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("solve").unwrap(), Command::Solve);
        assert_eq!(Command::parse("Show").unwrap(), Command::Show);
        assert_eq!(Command::parse("remove 3").unwrap(), Command::Remove { index: 3 });
        assert_eq!(Command::parse("quit").unwrap(), Command::Exit);
        assert_eq!(Command::parse("").unwrap(), Command::Empty);
        assert_eq!(Command::parse("# divider").unwrap(), Command::Empty);
    }

    #[test]
    fn test_unknown_command() {
        let err = Command::parse("capacitor A B 1u").unwrap_err();
        assert!(matches!(
            err,
            NodalError::UnknownCommand { ref command } if command == "capacitor"
        ));
    }
}
