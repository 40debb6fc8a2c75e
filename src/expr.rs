//! The expression tree.

use crate::{
    operation::{BinaryOperation, OperationError},
    value::Value,
    variable::Variable,
};
use num_complex::Complex64;
use smol_str::SmolStr;
use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
    ops::{Add, Div, Mul, Rem, Sub},
};

/// An externally supplied pure unary numeric function, usable as an
/// expression leaf via [`Expression::call`].
pub type ExternalFn = fn(Value) -> Result<Value, OperationError>;

/// An immutable expression tree.
///
/// Trees are built from variables, literals, and sub-expressions with the
/// usual arithmetic operators (or the explicit builders, which the operators
/// are sugar for) and never mutated afterwards; evaluation, substitution, and
/// differentiation all produce fresh trees. Equality is structural, so
/// `x + y` and `y + x` are different expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal numeric value.
    Constant(Value),
    /// A reference to a registry variable.
    Variable(Variable),
    /// An external function applied to a sub-expression.
    Call(Call),
    /// An expression involving two operands.
    Binary {
        left: Box<Expression>,
        right: Box<Expression>,
        op: BinaryOperation,
    },
}

/// An [`ExternalFn`] applied to an argument expression.
///
/// Two calls are equal when they wrap the same function (by pointer), carry
/// the same name, and have equal arguments.
#[derive(Debug, Clone)]
pub struct Call {
    pub(crate) name: SmolStr,
    pub(crate) function: ExternalFn,
    pub(crate) argument: Box<Expression>,
}

impl Call {
    pub fn name(&self) -> &str { &self.name }

    pub fn argument(&self) -> &Expression { &self.argument }
}

impl PartialEq for Call {
    fn eq(&self, other: &Call) -> bool {
        self.name == other.name
            && self.function == other.function
            && self.argument == other.argument
    }
}

impl Expression {
    /// A constant leaf.
    pub fn constant(value: impl Into<Value>) -> Expression {
        Expression::Constant(value.into())
    }

    /// A binary node. The canonical form of the arithmetic operators.
    pub fn binary(
        op: BinaryOperation,
        left: impl IntoExpression,
        right: impl IntoExpression,
    ) -> Expression {
        Expression::Binary {
            left: Box::new(left.into_expression()),
            right: Box::new(right.into_expression()),
            op,
        }
    }

    /// An external function applied to `argument`.
    pub fn call(name: &str, function: ExternalFn, argument: impl IntoExpression) -> Expression {
        Expression::Call(Call {
            name: name.into(),
            function,
            argument: Box::new(argument.into_expression()),
        })
    }

    /// `self ^ rhs`. Rust has no exponentiation operator, so this is a
    /// method.
    pub fn pow(&self, rhs: impl IntoExpression) -> Expression {
        Expression::binary(BinaryOperation::Pow, self.clone(), rhs)
    }

    /// `self // rhs`, flooring division.
    pub fn floor_div(&self, rhs: impl IntoExpression) -> Expression {
        Expression::binary(BinaryOperation::FloorDiv, self.clone(), rhs)
    }

    /// Every variable reachable from this tree's leaves; the union of the
    /// operands' free-variable sets.
    pub fn free_variables(&self) -> HashSet<Variable> {
        let mut variables = HashSet::new();
        self.collect_variables(&mut variables);
        variables
    }

    fn collect_variables(&self, out: &mut HashSet<Variable>) {
        match self {
            Expression::Constant(_) => {},
            Expression::Variable(variable) => {
                out.insert(variable.clone());
            },
            Expression::Call(call) => call.argument.collect_variables(out),
            Expression::Binary { left, right, .. } => {
                left.collect_variables(out);
                right.collect_variables(out);
            },
        }
    }

    /// Does `variable` occur anywhere in this tree?
    pub fn depends_on(&self, variable: &Variable) -> bool {
        match self {
            Expression::Constant(_) => false,
            Expression::Variable(v) => v == variable,
            Expression::Call(call) => call.argument.depends_on(variable),
            Expression::Binary { left, right, .. } => {
                left.depends_on(variable) || right.depends_on(variable)
            },
        }
    }
}

/// Coercion of operands into expressions.
///
/// Literals become [`Expression::Constant`], variables become
/// [`Expression::Variable`], and expressions pass through unchanged. This is
/// the single coercion point behind the operator overloads.
pub trait IntoExpression {
    fn into_expression(self) -> Expression;
}

impl IntoExpression for Expression {
    fn into_expression(self) -> Expression { self }
}

impl IntoExpression for &Expression {
    fn into_expression(self) -> Expression { self.clone() }
}

impl IntoExpression for Variable {
    fn into_expression(self) -> Expression { Expression::Variable(self) }
}

impl IntoExpression for &Variable {
    fn into_expression(self) -> Expression { Expression::Variable(self.clone()) }
}

impl IntoExpression for Value {
    fn into_expression(self) -> Expression { Expression::Constant(self) }
}

impl IntoExpression for i64 {
    fn into_expression(self) -> Expression { Expression::Constant(self.into()) }
}

impl IntoExpression for i32 {
    fn into_expression(self) -> Expression { Expression::Constant(self.into()) }
}

impl IntoExpression for f64 {
    fn into_expression(self) -> Expression { Expression::Constant(self.into()) }
}

impl IntoExpression for Complex64 {
    fn into_expression(self) -> Expression { Expression::Constant(self.into()) }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Expression { Expression::Variable(variable) }
}

impl From<&Variable> for Expression {
    fn from(variable: &Variable) -> Expression { Expression::Variable(variable.clone()) }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Expression { Expression::Constant(value) }
}

// Operator overloads over everything coercible, with literals allowed on
// either side.

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: IntoExpression> $trait<T> for Expression {
            type Output = Expression;

            fn $method(self, rhs: T) -> Expression { Expression::binary($op, self, rhs) }
        }

        impl<T: IntoExpression> $trait<T> for &Expression {
            type Output = Expression;

            fn $method(self, rhs: T) -> Expression { Expression::binary($op, self, rhs) }
        }

        impl<T: IntoExpression> $trait<T> for Variable {
            type Output = Expression;

            fn $method(self, rhs: T) -> Expression { Expression::binary($op, self, rhs) }
        }

        impl<T: IntoExpression> $trait<T> for &Variable {
            type Output = Expression;

            fn $method(self, rhs: T) -> Expression { Expression::binary($op, self, rhs) }
        }

        impl $trait<Expression> for i64 {
            type Output = Expression;

            fn $method(self, rhs: Expression) -> Expression {
                Expression::binary($op, self, rhs)
            }
        }

        impl $trait<Expression> for f64 {
            type Output = Expression;

            fn $method(self, rhs: Expression) -> Expression {
                Expression::binary($op, self, rhs)
            }
        }

        impl $trait<&Variable> for i64 {
            type Output = Expression;

            fn $method(self, rhs: &Variable) -> Expression {
                Expression::binary($op, self, rhs)
            }
        }

        impl $trait<&Variable> for f64 {
            type Output = Expression;

            fn $method(self, rhs: &Variable) -> Expression {
                Expression::binary($op, self, rhs)
            }
        }
    };
}

binary_operator!(Add, add, BinaryOperation::Add);
binary_operator!(Sub, sub, BinaryOperation::Sub);
binary_operator!(Mul, mul, BinaryOperation::Mul);
binary_operator!(Div, div, BinaryOperation::Div);
binary_operator!(Rem, rem, BinaryOperation::Mod);

impl Variable {
    /// `self ^ rhs` as an expression.
    pub fn pow(&self, rhs: impl IntoExpression) -> Expression {
        Expression::binary(BinaryOperation::Pow, self, rhs)
    }

    /// `self // rhs`, flooring division, as an expression.
    pub fn floor_div(&self, rhs: impl IntoExpression) -> Expression {
        Expression::binary(BinaryOperation::FloorDiv, self, rhs)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(value) => write!(f, "{}", value),
            Expression::Variable(variable) => write!(f, "{}", variable),
            Expression::Call(call) => write!(f, "{}({})", call.name, call.argument),
            Expression::Binary { left, right, op } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            },
        }
    }
}
