//! The fixed catalog of binary numeric operators.

use crate::value::{promote, Promoted, Value};
use smol_str::SmolStr;
use std::{
    convert::TryFrom,
    error::Error,
    fmt::{self, Display, Formatter},
};

/// An operation that can be applied to two arguments.
///
/// Integer arithmetic stays integral while the result fits in an `i64` and
/// widens to a real on overflow, so no operand combination can panic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperation {
    Add,
    Sub,
    Mul,
    /// True division. Integer operands produce a real.
    Div,
    /// Division rounding toward negative infinity. The remainder returned by
    /// [`BinaryOperation::Mod`] takes the divisor's sign, so
    /// `a == floor_div(a, b)*b + mod(a, b)` holds for every non-zero `b`.
    FloorDiv,
    Mod,
    Pow,
}

impl BinaryOperation {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperation::Add => "+",
            BinaryOperation::Sub => "-",
            BinaryOperation::Mul => "*",
            BinaryOperation::Div => "/",
            BinaryOperation::FloorDiv => "//",
            BinaryOperation::Mod => "%",
            BinaryOperation::Pow => "^",
        }
    }

    pub fn arity(self) -> usize { 2 }

    /// Apply the operation to a slice of operands, checking the arity at
    /// runtime.
    pub fn apply(self, operands: &[Value]) -> Result<Value, OperationError> {
        match *operands {
            [lhs, rhs] => self.apply_pair(lhs, rhs),
            _ => Err(OperationError::ArityMismatch {
                symbol: self.symbol().into(),
                expected: self.arity(),
                found: operands.len(),
            }),
        }
    }

    fn apply_pair(self, lhs: Value, rhs: Value) -> Result<Value, OperationError> {
        match self {
            BinaryOperation::Add => Ok(match promote(lhs, rhs) {
                Promoted::Integers(a, b) => widening(a.checked_add(b), a as f64 + b as f64),
                Promoted::Reals(a, b) => Value::Real(a + b),
                Promoted::Complexes(a, b) => Value::Complex(a + b),
            }),
            BinaryOperation::Sub => Ok(match promote(lhs, rhs) {
                Promoted::Integers(a, b) => widening(a.checked_sub(b), a as f64 - b as f64),
                Promoted::Reals(a, b) => Value::Real(a - b),
                Promoted::Complexes(a, b) => Value::Complex(a - b),
            }),
            BinaryOperation::Mul => Ok(match promote(lhs, rhs) {
                Promoted::Integers(a, b) => widening(a.checked_mul(b), a as f64 * b as f64),
                Promoted::Reals(a, b) => Value::Real(a * b),
                Promoted::Complexes(a, b) => Value::Complex(a * b),
            }),
            BinaryOperation::Div => {
                if rhs.is_zero() {
                    return Err(OperationError::DivisionByZero);
                }
                Ok(match promote(lhs, rhs) {
                    Promoted::Integers(a, b) => Value::Real(a as f64 / b as f64),
                    Promoted::Reals(a, b) => Value::Real(a / b),
                    Promoted::Complexes(a, b) => Value::Complex(a / b),
                })
            },
            BinaryOperation::FloorDiv => {
                if rhs.is_zero() {
                    return Err(OperationError::DivisionByZero);
                }
                match promote(lhs, rhs) {
                    Promoted::Integers(a, b) => {
                        Ok(widening(floor_div(a, b), (a as f64 / b as f64).floor()))
                    },
                    Promoted::Reals(a, b) => Ok(Value::Real((a / b).floor())),
                    Promoted::Complexes(..) => Err(OperationError::Undefined {
                        symbol: self.symbol().into(),
                    }),
                }
            },
            BinaryOperation::Mod => {
                if rhs.is_zero() {
                    return Err(OperationError::DivisionByZero);
                }
                match promote(lhs, rhs) {
                    Promoted::Integers(a, b) => Ok(Value::Integer(floor_mod(a, b))),
                    Promoted::Reals(a, b) => Ok(Value::Real(a - b * (a / b).floor())),
                    Promoted::Complexes(..) => Err(OperationError::Undefined {
                        symbol: self.symbol().into(),
                    }),
                }
            },
            BinaryOperation::Pow => match promote(lhs, rhs) {
                Promoted::Integers(a, b) => integer_pow(a, b),
                Promoted::Reals(a, b) => {
                    if a == 0.0 && b < 0.0 {
                        Err(OperationError::DivisionByZero)
                    } else {
                        Ok(Value::Real(a.powf(b)))
                    }
                },
                Promoted::Complexes(a, b) => Ok(Value::Complex(a.powc(b))),
            },
        }
    }
}

/// The overflow-widening integer result: integral when it fits, the real
/// fallback otherwise.
fn widening(exact: Option<i64>, fallback: f64) -> Value {
    match exact {
        Some(n) => Value::Integer(n),
        None => Value::Real(fallback),
    }
}

/// Integer division rounded toward negative infinity. `None` when the
/// quotient doesn't fit (`i64::MIN / -1`).
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

/// The remainder matching [`floor_div`]; its sign follows the divisor.
fn floor_mod(a: i64, b: i64) -> i64 {
    // i64::MIN % -1 is mathematically 0 but overflows the raw operator
    let r = a.checked_rem(b).unwrap_or(0);
    if r != 0 && (r < 0) != (b < 0) {
        r + b
    } else {
        r
    }
}

fn integer_pow(base: i64, exponent: i64) -> Result<Value, OperationError> {
    if exponent < 0 {
        if base == 0 {
            return Err(OperationError::DivisionByZero);
        }
        return Ok(Value::Real((base as f64).powf(exponent as f64)));
    }

    // stay integral when the result fits, widen to a real otherwise
    match u32::try_from(exponent).ok().and_then(|e| base.checked_pow(e)) {
        Some(result) => Ok(Value::Integer(result)),
        None => Ok(Value::Real((base as f64).powf(exponent as f64))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationError {
    ArityMismatch {
        symbol: SmolStr,
        expected: usize,
        found: usize,
    },
    DivisionByZero,
    /// The operator or external function is not defined for its operands,
    /// e.g. `//` over complex numbers or `ln` of a non-positive real.
    Undefined { symbol: SmolStr },
}

impl Display for OperationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::ArityMismatch {
                symbol,
                expected,
                found,
            } => write!(
                f,
                "\"{}\" takes {} operands, found {}",
                symbol, expected, found
            ),
            OperationError::DivisionByZero => write!(f, "Division by zero"),
            OperationError::Undefined { symbol } => {
                write!(f, "\"{}\" is not defined for these operands", symbol)
            },
        }
    }
}

impl Error for OperationError {}

impl Display for BinaryOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
