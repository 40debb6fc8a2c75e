//! Named expressions with a bound parameter list.

use crate::{
    expr::Expression,
    operation::OperationError,
    ops::{self, Bindings, EvaluationError},
    value::Value,
    variable::Variable,
};
use smol_str::SmolStr;
use std::fmt::{self, Display, Formatter};

/// An [`Expression`] packaged up as a callable with a fixed parameter list,
/// e.g. `f(x, y) = x + y`.
///
/// This is the shape other tools can consume as a plain function; see
/// [`crate::quadrature`] for integrating a one-parameter function.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: SmolStr,
    parameters: Vec<Variable>,
    body: Expression,
}

impl Function {
    pub fn new(name: &str, parameters: Vec<Variable>, body: Expression) -> Function {
        Function {
            name: name.into(),
            parameters,
            body,
        }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn parameters(&self) -> &[Variable] { &self.parameters }

    pub fn body(&self) -> &Expression { &self.body }

    /// Call the function with positional arguments, one per parameter.
    pub fn evaluate(&self, arguments: &[Value]) -> Result<Value, EvaluationError> {
        if arguments.len() != self.parameters.len() {
            return Err(OperationError::ArityMismatch {
                symbol: self.name.clone(),
                expected: self.parameters.len(),
                found: arguments.len(),
            }
            .into());
        }

        let mut bindings = Bindings::new();
        for (parameter, argument) in self.parameters.iter().zip(arguments) {
            bindings.bind(parameter.name(), *argument);
        }

        ops::evaluate(&self.body, &bindings)
    }

    /// Call a one-parameter function at a real point.
    pub fn evaluate_at(&self, x: f64) -> Result<Value, EvaluationError> {
        self.evaluate(&[Value::Real(x)])
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let parameters: Vec<_> = self.parameters.iter().map(ToString::to_string).collect();
        write!(f, "{}({})", self.name, parameters.join(", "))
    }
}
