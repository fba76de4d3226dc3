//! Calculator key tokens

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::evaluator::{BinaryOp, UnaryFn};

/// Memory register commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryCommand {
    /// MC
    Clear,
    /// MR
    Recall,
    /// M+
    Add,
    /// M−
    Subtract,
}

/// One calculator button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    DoubleZero,
    Dot,
    Operator(BinaryOp),
    Equals,
    Function(UnaryFn),
    Memory(MemoryCommand),
    Clear,
    Backspace,
    Percent,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown calculator key: {0}")]
pub struct ParseKeyError(pub String);

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let key = match token.as_str() {
            "00" => Key::DoubleZero,
            d if d.len() == 1 && d.as_bytes()[0].is_ascii_digit() => {
                Key::Digit(d.as_bytes()[0] - b'0')
            }
            "." | "," => Key::Dot,
            "+" | "add" => Key::Operator(BinaryOp::Add),
            "-" | "sub" => Key::Operator(BinaryOp::Subtract),
            "*" | "x" | "mul" => Key::Operator(BinaryOp::Multiply),
            "/" | "div" => Key::Operator(BinaryOp::Divide),
            "^" | "pow" | "x^y" => Key::Operator(BinaryOp::Power),
            "=" | "eq" => Key::Equals,
            "sin" => Key::Function(UnaryFn::Sin),
            "cos" => Key::Function(UnaryFn::Cos),
            "tan" => Key::Function(UnaryFn::Tan),
            "sqrt" => Key::Function(UnaryFn::Sqrt),
            "log" => Key::Function(UnaryFn::Log),
            "ln" => Key::Function(UnaryFn::Ln),
            "x2" | "sq" => Key::Function(UnaryFn::Square),
            "mc" => Key::Memory(MemoryCommand::Clear),
            "mr" => Key::Memory(MemoryCommand::Recall),
            "m+" => Key::Memory(MemoryCommand::Add),
            "m-" => Key::Memory(MemoryCommand::Subtract),
            "c" | "ac" | "clear" => Key::Clear,
            "back" | "bs" | "del" => Key::Backspace,
            "%" => Key::Percent,
            _ => return Err(ParseKeyError(s.to_string())),
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Digit(d) => write!(f, "{}", d),
            Key::DoubleZero => f.write_str("00"),
            Key::Dot => f.write_str("."),
            Key::Operator(op) => f.write_str(op.symbol()),
            Key::Equals => f.write_str("="),
            Key::Function(func) => f.write_str(func.label()),
            Key::Memory(MemoryCommand::Clear) => f.write_str("MC"),
            Key::Memory(MemoryCommand::Recall) => f.write_str("MR"),
            Key::Memory(MemoryCommand::Add) => f.write_str("M+"),
            Key::Memory(MemoryCommand::Subtract) => f.write_str("M−"),
            Key::Clear => f.write_str("C"),
            Key::Backspace => f.write_str("⌫"),
            Key::Percent => f.write_str("%"),
        }
    }
}
