//! Session: drives a machine through a message script.
//!
//! A script interleaves `*`-sentinel setting lines with plain message
//! lines. A setting line re-populates the machine for the next message
//! block: reflector name, the remaining rotor names left to right, the
//! initial positions, an optional ring string, and plugboard cycles.
//! Every other line is converted and emitted in five-symbol groups.

use crate::error::EnigmaError;
use crate::machine::Machine;

/// Number of symbols per output group.
const GROUP_SIZE: usize = 5;

/// A machine plus the bookkeeping to process a message script.
pub struct Session {
    machine: Machine,
}

impl Session {
    /// Wraps `machine` for script processing.
    pub fn new(machine: Machine) -> Self {
        Session { machine }
    }

    /// Returns the wrapped machine.
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Consumes the session, returning the machine in its final state.
    pub fn into_machine(self) -> Machine {
        self.machine
    }

    /// Processes `input` line by line, returning one output line per
    /// message line. Setting lines reconfigure the machine and produce
    /// no output.
    ///
    /// # Errors
    /// - [`EnigmaError::TruncatedInput`] if `input` contains no lines.
    /// - [`EnigmaError::MissingSettingLine`] if the first line is not a
    ///   setting line.
    /// - Any installation, setting, or conversion error, at the line
    ///   that caused it; processing stops there.
    pub fn run(&mut self, input: &str) -> Result<Vec<String>, EnigmaError> {
        let mut lines = input.lines().peekable();
        match lines.peek() {
            None => return Err(EnigmaError::TruncatedInput("setting line")),
            Some(first) if !is_setting(first) => {
                return Err(EnigmaError::MissingSettingLine);
            }
            Some(_) => {}
        }
        let mut output = Vec::new();
        for line in lines {
            if is_setting(line) {
                self.apply_setting(line)?;
            } else {
                output.push(format_message_line(&self.machine.convert(line)?));
            }
        }
        Ok(output)
    }

    /// Applies one `*` setting line: reset, install, position, and
    /// optionally ring and plugboard.
    fn apply_setting(&mut self, line: &str) -> Result<(), EnigmaError> {
        let stripped = line.trim_start();
        debug_assert!(stripped.starts_with('*'));
        let mut tokens = stripped[1..].split_whitespace();

        let num_rotors = self.machine.num_rotors();
        let mut names = Vec::with_capacity(num_rotors);
        for _ in 0..num_rotors {
            names.push(
                tokens
                    .next()
                    .ok_or(EnigmaError::TruncatedInput("setting line"))?,
            );
        }
        let positions = tokens
            .next()
            .ok_or(EnigmaError::TruncatedInput("rotor positions"))?;

        self.machine.reset();
        self.machine.insert_rotors(&names)?;
        self.machine.set_rotors(positions)?;

        let mut plug_cycles = String::new();
        if let Some(token) = tokens.next() {
            if token.starts_with('(') {
                plug_cycles.push_str(token);
            } else {
                self.machine.set_ring(token)?;
            }
        }
        for token in tokens {
            plug_cycles.push_str(token);
        }
        self.machine.set_plugboard_cycles(&plug_cycles)
    }
}

/// Returns true if `line` is a `*` setting line.
fn is_setting(line: &str) -> bool {
    line.trim_start().starts_with('*')
}

/// Formats a converted message into five-symbol groups separated by
/// single spaces.
pub fn format_message_line(msg: &str) -> String {
    let chars: Vec<char> = msg.chars().collect();
    chars
        .chunks(GROUP_SIZE)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(" ")
}
