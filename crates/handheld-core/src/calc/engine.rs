//! Entry buffer driven by key presses
//!
//! The display is the single source of the current operand. Operators read
//! it, evaluate against the pending operand and write the formatted result
//! back. Any value that cannot be read, or any evaluation outside a
//! function's domain, replaces the display with [`ERROR_TOKEN`] and drops
//! the pending operation; typing a digit or clearing recovers.

use super::evaluator::{apply, compute, BinaryOp, UnaryFn};
use super::format::{format_number, parse_display, ERROR_TOKEN};
use super::key::{Key, MemoryCommand};
use crate::error::CalcError;

const ZERO: &str = "0";

/// Calculator state
#[derive(Clone, Debug, PartialEq)]
pub struct Calculator {
    display: String,
    pending_operand: Option<f64>,
    pending_operator: Option<BinaryOp>,
    entering_new_number: bool,
    memory: f64,
    last_error: Option<CalcError>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: ZERO.to_string(),
            pending_operand: None,
            pending_operator: None,
            entering_new_number: true,
            memory: 0.0,
            last_error: None,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Pending operand and operator, for an "a +" indicator
    pub fn pending(&self) -> Option<(f64, BinaryOp)> {
        self.pending_operand.zip(self.pending_operator)
    }

    pub fn is_entering_new_number(&self) -> bool {
        self.entering_new_number
    }

    /// Failure behind the current error display, if any
    pub fn last_error(&self) -> Option<CalcError> {
        self.last_error
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_TOKEN
    }

    /// Dispatch one key
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.digit(d),
            Key::DoubleZero => self.double_zero(),
            Key::Dot => self.dot(),
            Key::Operator(op) => self.operator(op),
            Key::Equals => self.equals(),
            Key::Function(f) => self.function(f),
            Key::Memory(cmd) => self.memory_command(cmd),
            Key::Clear => self.clear(),
            Key::Backspace => self.backspace(),
            Key::Percent => self.percent(),
        }
    }

    /// Type a digit 0-9. Larger values are ignored.
    pub fn digit(&mut self, d: u8) {
        if d > 9 {
            return;
        }
        let ch = char::from(b'0' + d);
        if self.starts_fresh_operand() {
            self.set_display(ch.to_string());
        } else {
            self.display.push(ch);
        }
        self.entering_new_number = false;
    }

    /// The "00" key; a fresh operand becomes plain `0`
    pub fn double_zero(&mut self) {
        if self.starts_fresh_operand() {
            self.set_display(ZERO.to_string());
        } else {
            self.display.push_str("00");
        }
        self.entering_new_number = false;
    }

    pub fn dot(&mut self) {
        if self.entering_new_number || self.is_error() {
            self.set_display("0.".to_string());
            self.entering_new_number = false;
            return;
        }
        if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Select an operator, first folding any typed operand into the pending one
    pub fn operator(&mut self, op: BinaryOp) {
        let displayed = match parse_display(&self.display) {
            Ok(v) => v,
            Err(e) => return self.fail(e),
        };

        let operand = match (self.pending_operand, self.pending_operator) {
            (Some(a), Some(prev)) if !self.entering_new_number => match compute(a, displayed, prev) {
                Ok(result) => {
                    self.set_display(format_number(result));
                    result
                }
                Err(e) => return self.fail(e),
            },
            // Operator pressed again before a new operand: just swap it
            (Some(a), Some(_)) => a,
            _ => displayed,
        };

        self.pending_operand = Some(operand);
        self.pending_operator = Some(op);
        self.entering_new_number = true;
    }

    /// Finish the pending operation. Does nothing without one.
    pub fn equals(&mut self) {
        let Some((a, op)) = self.pending() else {
            return;
        };

        let result = parse_display(&self.display).and_then(|b| compute(a, b, op));
        match result {
            Ok(v) => {
                self.set_display(format_number(v));
                self.pending_operand = None;
                self.pending_operator = None;
                self.entering_new_number = true;
            }
            Err(e) => self.fail(e),
        }
    }

    /// Apply a scientific function to the display
    pub fn function(&mut self, f: UnaryFn) {
        match parse_display(&self.display).and_then(|x| apply(f, x)) {
            Ok(v) => {
                self.set_display(format_number(v));
                self.entering_new_number = true;
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn memory_command(&mut self, cmd: MemoryCommand) {
        match cmd {
            MemoryCommand::Clear => self.memory = 0.0,
            MemoryCommand::Recall => {
                self.set_display(format_number(self.memory));
                self.entering_new_number = true;
            }
            MemoryCommand::Add | MemoryCommand::Subtract => {
                let value = match parse_display(&self.display) {
                    Ok(v) => v,
                    Err(e) => return self.fail(e),
                };
                let next = if cmd == MemoryCommand::Add {
                    self.memory + value
                } else {
                    self.memory - value
                };
                if next.is_finite() {
                    self.memory = next;
                    self.entering_new_number = true;
                } else {
                    self.fail(CalcError::Domain);
                }
            }
        }
    }

    /// Reset display and pending operation; memory is kept
    pub fn clear(&mut self) {
        self.set_display(ZERO.to_string());
        self.pending_operand = None;
        self.pending_operator = None;
        self.entering_new_number = true;
    }

    pub fn backspace(&mut self) {
        if self.display.chars().count() <= 1 || self.is_error() {
            self.set_display(ZERO.to_string());
            self.entering_new_number = true;
            return;
        }

        self.display.pop();
        // A lone sign or a clipped exponent ("1e") is not a number
        if parse_display(&self.display).is_err() {
            self.set_display(ZERO.to_string());
            self.entering_new_number = true;
        }
    }

    pub fn percent(&mut self) {
        match parse_display(&self.display) {
            Ok(v) => {
                self.set_display(format_number(v / 100.0));
                self.entering_new_number = true;
            }
            Err(e) => self.fail(e),
        }
    }

    fn starts_fresh_operand(&self) -> bool {
        self.entering_new_number || self.display == ZERO || self.is_error()
    }

    fn set_display(&mut self, text: String) {
        self.display = text;
        self.last_error = None;
    }

    fn fail(&mut self, error: CalcError) {
        tracing::debug!("calculator error: {}", error);
        self.display = ERROR_TOKEN.to_string();
        self.last_error = Some(error);
        self.pending_operand = None;
        self.pending_operator = None;
        self.entering_new_number = true;
    }
}
