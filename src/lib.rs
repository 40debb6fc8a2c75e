//! A small symbolic algebra toolkit.
//!
//! Variables live in a [`Registry`] and carry a [`Domain`] constraining the
//! values they may take. Combining variables and literals with the usual
//! operators builds an immutable [`Expression`] tree which can be evaluated,
//! rewritten, or differentiated.
//!
//! ```rust
//! use symba::{ops::{self, Bindings}, Registry};
//!
//! let registry = Registry::new();
//! let x = registry.variable("x");
//! let y = registry.variable("y");
//!
//! let e = &x * &y + 1;
//! assert_eq!(e.to_string(), "((x * y) + 1)");
//!
//! let bindings = Bindings::new().with("x", 2).with("y", 3);
//! let value = ops::evaluate(&e, &bindings).unwrap();
//! assert_eq!(value.to_string(), "7");
//! ```

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod domain;
mod expr;
mod function;
mod operation;
pub mod ops;
pub mod quadrature;
pub mod relation;
mod registry;
mod value;
mod variable;
pub mod vector;

pub use crate::domain::{Domain, DomainError};
pub use crate::expr::{Call, Expression, ExternalFn, IntoExpression};
pub use crate::function::Function;
pub use crate::operation::{BinaryOperation, OperationError};
pub use crate::registry::{Registry, UnknownVariable};
pub use crate::value::Value;
pub use crate::variable::{DomainViolation, Variable};
