//! [`Expression`] operations: evaluation, substitution, and differentiation.

use crate::{
    expr::{Call, Expression, ExternalFn, IntoExpression},
    operation::{BinaryOperation, OperationError},
    value::Value,
    variable::Variable,
};
use num_traits::Zero;
use smol_str::SmolStr;
use std::{
    collections::HashMap,
    error::Error,
    fmt::{self, Display, Formatter},
};

/// A local, read-only name → value environment for [`evaluate`].
///
/// Evaluation never writes bindings back into the shared variables; nested
/// or concurrent evaluations with different bindings for the same name can't
/// observe each other.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Bindings {
    values: HashMap<SmolStr, Value>,
}

impl Bindings {
    pub fn new() -> Bindings { Bindings::default() }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Bindings {
        self.bind(name, value);
        self
    }

    pub fn bind(&mut self, name: &str, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<Value> { self.values.get(name).copied() }
}

/// A name → replacement-term map for [`substitute`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Substitutions {
    terms: HashMap<SmolStr, Expression>,
}

impl Substitutions {
    pub fn new() -> Substitutions { Substitutions::default() }

    pub fn with(mut self, name: &str, term: impl IntoExpression) -> Substitutions {
        self.insert(name, term);
        self
    }

    pub fn insert(&mut self, name: &str, term: impl IntoExpression) {
        self.terms.insert(name.into(), term.into_expression());
    }

    pub fn get(&self, name: &str) -> Option<&Expression> { self.terms.get(name) }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// A free variable has neither a binding nor a stored value.
    MissingBinding { name: SmolStr },
    Operation(OperationError),
}

impl From<OperationError> for EvaluationError {
    fn from(e: OperationError) -> Self { EvaluationError::Operation(e) }
}

impl Display for EvaluationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationError::MissingBinding { name } => {
                write!(f, "No value available for \"{}\"", name)
            },
            EvaluationError::Operation(inner) => write!(f, "{}", inner),
        }
    }
}

impl Error for EvaluationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EvaluationError::Operation(inner) => Some(inner),
            _ => None,
        }
    }
}

/// Evaluate an [`Expression`] under a variable binding.
///
/// A variable resolves from `bindings` first and falls back to its stored
/// value; when neither is available the call fails with
/// [`EvaluationError::MissingBinding`]. Operands are evaluated left to right.
/// Evaluation reads shared state but never writes it.
pub fn evaluate(expr: &Expression, bindings: &Bindings) -> Result<Value, EvaluationError> {
    match expr {
        Expression::Constant(value) => Ok(*value),
        Expression::Variable(variable) => bindings
            .get(variable.name())
            .or_else(|| variable.value())
            .ok_or_else(|| EvaluationError::MissingBinding {
                name: variable.name().into(),
            }),
        Expression::Call(call) => {
            let argument = evaluate(&call.argument, bindings)?;
            (call.function)(argument).map_err(EvaluationError::from)
        },
        Expression::Binary { left, right, op } => {
            let lhs = evaluate(left, bindings)?;
            let rhs = evaluate(right, bindings)?;
            op.apply(&[lhs, rhs]).map_err(EvaluationError::from)
        },
    }
}

/// Replace variable leaves with the terms bound to their names, producing a
/// structurally new tree. The source tree is never touched.
pub fn substitute(expr: &Expression, substitutions: &Substitutions) -> Expression {
    match expr {
        Expression::Constant(value) => Expression::Constant(*value),
        Expression::Variable(variable) => match substitutions.get(variable.name()) {
            Some(replacement) => replacement.clone(),
            None => Expression::Variable(variable.clone()),
        },
        Expression::Call(call) => Expression::Call(Call {
            name: call.name.clone(),
            function: call.function,
            argument: Box::new(substitute(&call.argument, substitutions)),
        }),
        Expression::Binary { left, right, op } => Expression::Binary {
            left: Box::new(substitute(left, substitutions)),
            right: Box::new(substitute(right, substitutions)),
            op: *op,
        },
    }
}

/// Externally registered collaborators consumed by [`derivative`].
pub trait Context {
    /// The natural logarithm used by the generalized power rule.
    fn natural_log(&self) -> ExternalFn;
}

/// The default [`Context`].
#[derive(Debug, Default, Copy, Clone)]
pub struct Builtins;

impl Context for Builtins {
    fn natural_log(&self) -> ExternalFn { builtin_ln }
}

fn builtin_ln(argument: Value) -> Result<Value, OperationError> {
    match argument {
        Value::Integer(n) if n > 0 => Ok(Value::Real((n as f64).ln())),
        Value::Real(x) if x > 0.0 => Ok(Value::Real(x.ln())),
        Value::Complex(z) if !z.is_zero() => Ok(Value::Complex(z.ln())),
        _ => Err(OperationError::Undefined { symbol: "ln".into() }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DerivativeError {
    /// Differentiation reached an operation outside the supported set
    /// (Add, Sub, Mul, Div, Pow and the leaf kinds).
    Unsupported { symbol: SmolStr },
}

impl Display for DerivativeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DerivativeError::Unsupported { symbol } => {
                write!(f, "Unable to differentiate \"{}\"", symbol)
            },
        }
    }
}

impl Error for DerivativeError {}

/// Calculate an [`Expression`]'s partial derivative with respect to a
/// particular [`Variable`].
///
/// The output is produced exactly as the differentiation rules yield it; no
/// simplification is attempted. The power rule is the generalized logarithmic
/// form `f^g * (g'*ln(f) + g*f'/f)`, valid only for strictly positive bases;
/// `ln` comes from the supplied [`Context`].
pub fn derivative<C>(
    expr: &Expression,
    target: &Variable,
    ctx: &C,
) -> Result<Expression, DerivativeError>
where
    C: Context,
{
    // a subtree that doesn't mention the target is a constant
    if !expr.depends_on(target) {
        return Ok(Expression::constant(0));
    }

    match expr {
        Expression::Constant(_) => Ok(Expression::constant(0)),
        Expression::Variable(variable) => Ok(Expression::constant(if variable == target {
            1
        } else {
            0
        })),
        Expression::Call(call) => Err(DerivativeError::Unsupported {
            symbol: call.name.clone(),
        }),
        Expression::Binary { left, right, op } => {
            let f = Expression::clone(left);
            let g = Expression::clone(right);

            match op {
                BinaryOperation::Add => {
                    Ok(derivative(left, target, ctx)? + derivative(right, target, ctx)?)
                },
                BinaryOperation::Sub => {
                    Ok(derivative(left, target, ctx)? - derivative(right, target, ctx)?)
                },
                BinaryOperation::Mul => {
                    // the product rule
                    let f_dash = derivative(left, target, ctx)?;
                    let g_dash = derivative(right, target, ctx)?;

                    Ok(f * g_dash + g * f_dash)
                },
                BinaryOperation::Div => {
                    // the quotient rule
                    let f_dash = derivative(left, target, ctx)?;
                    let g_dash = derivative(right, target, ctx)?;

                    Ok((f * g_dash - g.clone() * f_dash) / (g.clone() * g))
                },
                BinaryOperation::Pow => {
                    // logarithmic differentiation:
                    //   d(f^g) = f^g * (g'*ln(f) + g*f'/f)
                    let f_dash = derivative(left, target, ctx)?;
                    let g_dash = derivative(right, target, ctx)?;
                    let ln_f = Expression::call("ln", ctx.natural_log(), f.clone());

                    Ok(f.pow(g.clone()) * (g_dash * ln_f + g * f_dash / f))
                },
                BinaryOperation::FloorDiv | BinaryOperation::Mod => {
                    Err(DerivativeError::Unsupported {
                        symbol: op.symbol().into(),
                    })
                },
            }
        },
    }
}
