//! Interactive command session.
//!
//! A [`Session`] owns one [`Circuit`] and applies [`Command`]s to it. It is
//! the single owner of all interactive state: front ends (the `nodal`
//! binary, the WASM wrapper) create a session, feed it lines, and drop it.

mod report;

pub use report::{fixed, format_circuit, format_solution};

use std::io::{BufRead, Write};

use log::{debug, trace};

use crate::circuit::Circuit;
use crate::command::{Command, HELP};
use crate::error::Result;
use crate::solver::{DcSolver, Solution, SolverConfig};

/// Default number of decimals printed for potentials and currents.
pub const DEFAULT_PRECISION: usize = 2;

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Decimals printed for potentials and currents.
    pub precision: usize,
    /// Prompt written before each command; empty for none.
    pub prompt: String,
    /// Whether `run` starts by printing the command summary.
    pub banner: bool,
    /// Solver settings.
    pub solver: SolverConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            prompt: "> ".to_string(),
            banner: true,
            solver: SolverConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of printed decimals.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Enable or disable the start-up banner.
    pub fn with_banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }

    /// Set the solver configuration.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// No banner and no prompt, for scripts and tests.
    pub fn quiet(self) -> Self {
        self.with_banner(false).with_prompt("")
    }
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Text to show the user
    Output(String),
    /// Nothing to show
    Nothing,
    /// The session is over
    Exit,
}

/// An interactive session around one circuit.
#[derive(Debug)]
pub struct Session {
    circuit: Circuit,
    solver: DcSolver,
    config: SessionConfig,
    finished: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Start a session with an empty circuit.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            circuit: Circuit::new(),
            solver: DcSolver::with_config(config.solver.clone()),
            config,
            finished: false,
        }
    }

    /// Get a reference to the circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Get the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether `exit` has been executed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Solve the circuit with the session's solver settings.
    pub fn solve(&self) -> Result<Solution> {
        self.solver.solve(&self.circuit)
    }

    /// Parse and execute one line.
    pub fn execute_line(&mut self, line: &str) -> Result<Reply> {
        let command = Command::parse(line)?;
        self.execute(&command)
    }

    /// Execute a parsed command.
    ///
    /// Failures never modify the circuit.
    pub fn execute(&mut self, command: &Command) -> Result<Reply> {
        trace!("executing {:?}", command);
        let reply = match command {
            Command::Resistor { a, b, resistance } => {
                let index = self.circuit.add_resistor(a.as_str(), b.as_str(), *resistance)?;
                self.describe("Added", index)
            }
            Command::Voltage { a, b, voltage } => {
                let index = self.circuit.add_voltage_source(a.as_str(), b.as_str(), *voltage)?;
                self.describe("Added", index)
            }
            Command::Remove { index } => {
                let removed = self.circuit.remove_element(*index)?;
                Reply::Output(format!("Removed [{}] {}", index, removed))
            }
            Command::Ground { node } => {
                self.circuit.set_ground(node)?;
                Reply::Output(format!("Ground node set: {}", node))
            }
            Command::Solve => {
                let solution = self.solve()?;
                Reply::Output(format_solution(&solution, self.config.precision))
            }
            Command::Show => Reply::Output(format_circuit(&self.circuit)),
            Command::Help => Reply::Output(HELP.to_string()),
            Command::Exit => {
                self.finished = true;
                Reply::Exit
            }
            Command::Empty => Reply::Nothing,
        };
        Ok(reply)
    }

    fn describe(&self, verb: &str, index: usize) -> Reply {
        match self.circuit.element(index) {
            Some(element) => Reply::Output(format!("{} [{}] {}", verb, index, element)),
            None => Reply::Nothing,
        }
    }

    /// Read commands from `input` until `exit` or end of input.
    ///
    /// Command and circuit errors are printed and the loop continues; only
    /// I/O failures end the session with an error.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        if self.config.banner {
            writeln!(output, "Circuit builder. Type 'help' to see this again.")?;
            writeln!(output, "{}", HELP)?;
        }

        let mut line = String::new();
        while !self.finished {
            if !self.config.prompt.is_empty() {
                write!(output, "{}", self.config.prompt)?;
                output.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match self.execute_line(&line) {
                Ok(Reply::Output(text)) => writeln!(output, "{}", text)?,
                Ok(Reply::Nothing) => {}
                Ok(Reply::Exit) => writeln!(output, "Exiting.")?,
                Err(e) => {
                    if !e.is_command_error() {
                        debug!("command rejected by circuit: {}", e);
                    }
                    writeln!(output, "Error: {}", e)?
                }
            }
        }

        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NodalError;

    fn run_script(script: &str) -> (Session, String) {
        let mut session = Session::new(SessionConfig::new().quiet());
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_solve_script() {
        let (session, out) = run_script(
            "resistor A B 10\nresistor B C 10\nvoltage A C 10\nground C\nsolve\nexit\n",
        );
        assert!(session.is_finished());
        assert!(out.contains("Ground node set: C"));
        assert!(out.contains("  B: 5.00 V"));
        assert!(out.contains("  [0] Resistor A -> B: 0.50 A"));
        assert!(out.contains("  [1] Resistor B -> C: 0.50 A"));
        assert!(out.ends_with("Exiting.\n"));
    }

    #[test]
    fn test_errors_do_not_stop_the_session() {
        let (session, out) =
            run_script("solve\nground X\nresistor A B abc\nfoo\nresistor A B 1k\nshow\n");
        assert!(out.contains("Error: Ground node is not set"));
        assert!(out.contains("Error: Node 'X' is not present in the circuit"));
        assert!(out.contains("Error: resistance must be a number (got 'abc')"));
        assert!(out.contains("Error: Unknown command 'foo'"));
        assert!(out.contains("[0] Resistor: 1000 Ω between A and B"));
        assert_eq!(session.circuit().len(), 1);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_remove_reports_element() {
        let mut session = Session::default();
        session.execute_line("resistor A B 100").unwrap();
        session.execute_line("voltage A B 5").unwrap();

        let reply = session.execute_line("remove 0").unwrap();
        assert_eq!(
            reply,
            Reply::Output("Removed [0] Resistor: 100 Ω between A and B".to_string())
        );

        let err = session.execute_line("remove 5").unwrap_err();
        assert!(matches!(err, NodalError::InvalidIndex { index: 5, len: 1 }));
        assert_eq!(session.circuit().len(), 1);
    }

    #[test]
    fn test_failed_solve_keeps_state() {
        let mut session = Session::default();
        session.execute_line("voltage A 0 5").unwrap();
        session.execute_line("resistor A 0 100").unwrap();
        session.execute_line("resistor X Y 100").unwrap();
        session.execute_line("ground 0").unwrap();

        assert!(matches!(
            session.execute_line("solve"),
            Err(NodalError::SingularCircuit)
        ));
        assert_eq!(session.circuit().len(), 3);

        session.execute_line("remove 2").unwrap();
        let solution = session.solve().unwrap();
        assert_eq!(solution.potential("A"), Some(5.0));
    }

    #[test]
    fn test_precision_config() {
        let mut session = Session::new(SessionConfig::new().quiet().with_precision(4));
        for line in ["resistor A B 3", "voltage A B 1", "ground B"] {
            session.execute_line(line).unwrap();
        }
        match session.execute_line("solve").unwrap() {
            Reply::Output(text) => assert!(text.contains("[0] Resistor A -> B: 0.3333 A")),
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn test_banner_and_prompt() {
        let mut session = Session::default();
        let mut out = Vec::new();
        session.run("show\n".as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Circuit builder."));
        assert!(out.contains("> Circuit is empty."));
        assert!(!session.is_finished());
    }
}
