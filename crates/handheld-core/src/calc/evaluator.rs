//! Operator and function evaluation
//!
//! Results are always finite. Anything that would produce NaN or an
//! infinity is reported as [`CalcError::Domain`] instead.

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Binary operators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "−",
            BinaryOp::Multiply => "×",
            BinaryOp::Divide => "÷",
            BinaryOp::Power => "^",
        }
    }
}

/// Unary functions. Trigonometric functions take degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryFn {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log,
    Ln,
    Square,
}

impl UnaryFn {
    pub fn label(&self) -> &'static str {
        match self {
            UnaryFn::Sin => "sin",
            UnaryFn::Cos => "cos",
            UnaryFn::Tan => "tan",
            UnaryFn::Sqrt => "√",
            UnaryFn::Log => "log",
            UnaryFn::Ln => "ln",
            UnaryFn::Square => "x²",
        }
    }
}

/// Apply a binary operator
pub fn compute(a: f64, b: f64, op: BinaryOp) -> Result<f64, CalcError> {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Subtract => a - b,
        BinaryOp::Multiply => a * b,
        BinaryOp::Divide => {
            if b == 0.0 {
                return Err(CalcError::Domain);
            }
            a / b
        }
        BinaryOp::Power => a.powf(b),
    };
    finite(result)
}

/// Apply a unary function
pub fn apply(f: UnaryFn, x: f64) -> Result<f64, CalcError> {
    let result = match f {
        UnaryFn::Sin => x.to_radians().sin(),
        UnaryFn::Cos => x.to_radians().cos(),
        UnaryFn::Tan => x.to_radians().tan(),
        UnaryFn::Sqrt => {
            if x < 0.0 {
                return Err(CalcError::Domain);
            }
            x.sqrt()
        }
        UnaryFn::Log => {
            if x <= 0.0 {
                return Err(CalcError::Domain);
            }
            x.log10()
        }
        UnaryFn::Ln => {
            if x <= 0.0 {
                return Err(CalcError::Domain);
            }
            x.ln()
        }
        UnaryFn::Square => x * x,
    };
    finite(result)
}

fn finite(v: f64) -> Result<f64, CalcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CalcError::Domain)
    }
}
