//! The numeric tower shared by constants, variables, and evaluation.

use num_complex::Complex64;
use std::fmt::{self, Display, Formatter};

/// A single numeric value: an integer, a real, or a complex number.
///
/// Arithmetic promotes in the usual direction: two integers stay an integer
/// unless the operator forces a non-integer result (true division), any real
/// operand promotes the result to a real, and any complex operand promotes
/// the result to a complex. Equality is structural; `Integer(2)` and
/// `Real(2.0)` are different values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Complex(Complex64),
}

impl Value {
    /// The value as a real number, when it is one. Integers widen, complex
    /// numbers don't narrow.
    pub fn as_real(self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(n as f64),
            Value::Real(x) => Some(x),
            Value::Complex(_) => None,
        }
    }

    /// The value widened to a complex number.
    pub fn as_complex(self) -> Complex64 {
        match self {
            Value::Integer(n) => Complex64::new(n as f64, 0.0),
            Value::Real(x) => Complex64::new(x, 0.0),
            Value::Complex(z) => z,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Value::Integer(n) => n == 0,
            Value::Real(x) => x == 0.0,
            Value::Complex(z) => z.re == 0.0 && z.im == 0.0,
        }
    }
}

/// A pair of operands lifted to their common numeric level.
#[derive(Debug, Copy, Clone)]
pub(crate) enum Promoted {
    Integers(i64, i64),
    Reals(f64, f64),
    Complexes(Complex64, Complex64),
}

pub(crate) fn promote(lhs: Value, rhs: Value) -> Promoted {
    match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => Promoted::Integers(a, b),
        (Value::Complex(_), _) | (_, Value::Complex(_)) => {
            Promoted::Complexes(lhs.as_complex(), rhs.as_complex())
        },
        (Value::Real(a), Value::Real(b)) => Promoted::Reals(a, b),
        (Value::Real(a), Value::Integer(b)) => Promoted::Reals(a, b as f64),
        (Value::Integer(a), Value::Real(b)) => Promoted::Reals(a as f64, b),
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value { Value::Integer(n) }
}

impl From<i32> for Value {
    fn from(n: i32) -> Value { Value::Integer(n.into()) }
}

impl From<f64> for Value {
    fn from(x: f64) -> Value { Value::Real(x) }
}

impl From<Complex64> for Value {
    fn from(z: Complex64) -> Value { Value::Complex(z) }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(x) => write!(f, "{}", x),
            Value::Complex(z) => write!(f, "{}", z),
        }
    }
}
