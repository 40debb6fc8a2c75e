//! Named symbols with optional, domain-checked values.

use crate::{domain::Domain, value::Value};
use smol_str::SmolStr;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    sync::{Arc, RwLock},
};

/// A named symbol, optionally holding a value from its [`Domain`].
///
/// Variables are handed out by the [`Registry`](crate::Registry), which
/// guarantees at most one live instance per name. Handles are cheap to clone
/// and share one value cell, so two handles compare equal exactly when their
/// names do.
#[derive(Debug, Clone)]
pub struct Variable {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    name: SmolStr,
    domain: Domain,
    value: RwLock<Option<Value>>,
}

impl Variable {
    pub(crate) fn new(name: &str, domain: Domain) -> Variable {
        Variable {
            inner: Arc::new(Inner {
                name: name.into(),
                domain,
                value: RwLock::new(None),
            }),
        }
    }

    pub fn name(&self) -> &str { &self.inner.name }

    pub fn domain(&self) -> Domain { self.inner.domain }

    /// The currently stored value, if one has been set.
    pub fn value(&self) -> Option<Value> {
        *self.inner.value.read().expect("value lock poisoned")
    }

    /// Store a new value, discarding the old one.
    ///
    /// Fails with [`DomainViolation`] when the value is outside this
    /// variable's domain; the previously stored value (or unset state) is
    /// left untouched.
    pub fn set_value(&self, value: impl Into<Value>) -> Result<(), DomainViolation> {
        let value = value.into();

        if !self.inner.domain.contains(value) {
            return Err(DomainViolation {
                value,
                domain: self.inner.domain,
            });
        }

        *self.inner.value.write().expect("value lock poisoned") = Some(value);
        Ok(())
    }

    /// Return the variable to its unset state.
    pub fn clear_value(&self) {
        *self.inner.value.write().expect("value lock poisoned") = None;
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Variable) -> bool { self.inner.name == other.inner.name }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) { self.inner.name.hash(state); }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.name)
    }
}

/// A value was rejected by a variable's domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainViolation {
    pub value: Value,
    pub domain: Domain,
}

impl Display for DomainViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}) not in {}", self.value, self.domain)
    }
}

impl Error for DomainViolation {}
