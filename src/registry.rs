//! The variable registry: one live [`Variable`] per name.

use crate::{domain::Domain, variable::Variable};
use smol_str::SmolStr;
use std::{
    collections::HashMap,
    error::Error,
    fmt::{self, Display, Formatter},
    sync::Mutex,
};

/// A name → [`Variable`] store with get-or-create semantics.
///
/// The registry is the single source of truth for variables: requesting the
/// same name twice returns handles to the same instance, so name equality and
/// identity equality coincide. Creation and removal are atomic; a registry
/// can be shared between threads.
#[derive(Debug, Default)]
pub struct Registry {
    variables: Mutex<HashMap<SmolStr, Variable>>,
}

impl Registry {
    pub fn new() -> Registry { Registry::default() }

    /// Get or create the variable `name` in the default domain.
    pub fn variable(&self, name: &str) -> Variable {
        self.variable_in(name, Domain::default())
    }

    /// Get or create the variable `name`.
    ///
    /// On a cache hit the `domain` argument is ignored and the existing
    /// variable is returned unchanged. A freshly created variable starts
    /// with no value set.
    pub fn variable_in(&self, name: &str, domain: Domain) -> Variable {
        let mut variables = self.variables.lock().expect("registry lock poisoned");

        variables
            .entry(name.into())
            .or_insert_with(|| Variable::new(name, domain))
            .clone()
    }

    /// Get or create one variable per whitespace-separated name.
    pub fn variables(&self, names: &str) -> Vec<Variable> {
        names
            .split_whitespace()
            .map(|name| self.variable(name))
            .collect()
    }

    /// Look up an existing variable without creating it.
    pub fn lookup(&self, name: &str) -> Result<Variable, UnknownVariable> {
        let variables = self.variables.lock().expect("registry lock poisoned");

        variables
            .get(name)
            .cloned()
            .ok_or_else(|| UnknownVariable { name: name.into() })
    }

    /// Remove a variable from the registry, returning the removed handle.
    pub fn remove(&self, name: &str) -> Result<Variable, UnknownVariable> {
        let mut variables = self.variables.lock().expect("registry lock poisoned");

        variables
            .remove(name)
            .ok_or_else(|| UnknownVariable { name: name.into() })
    }

    /// Forget every registered variable.
    pub fn clear(&self) {
        self.variables
            .lock()
            .expect("registry lock poisoned")
            .clear();
    }

    pub fn len(&self) -> usize {
        self.variables.lock().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// The requested name has never been registered (or was removed).
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownVariable {
    pub name: SmolStr,
}

impl Display for UnknownVariable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "No variable named \"{}\"", self.name)
    }
}

impl Error for UnknownVariable {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn get_or_create_is_idempotent() {
        let registry = Registry::new();

        let first = registry.variable("x");
        let second = registry.variable("x");

        first.set_value(5).unwrap();
        // both handles point at the same instance
        assert_eq!(second.value(), first.value());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn the_domain_argument_is_ignored_on_a_cache_hit() {
        let registry = Registry::new();

        let x = registry.variable_in("x", Domain::Even);
        let same = registry.variable_in("x", Domain::Odd);

        assert_eq!(same.domain(), Domain::Even);
        assert_eq!(x.domain(), same.domain());
    }

    #[test]
    fn lookup_never_creates() {
        let registry = Registry::new();

        assert_eq!(
            registry.lookup("missing"),
            Err(UnknownVariable {
                name: "missing".into()
            })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn removal() {
        let registry = Registry::new();
        registry.variable("x");

        registry.remove("x").unwrap();
        assert!(registry.lookup("x").is_err());
        assert_eq!(
            registry.remove("x"),
            Err(UnknownVariable { name: "x".into() })
        );
    }

    #[test]
    fn bulk_registration() {
        let registry = Registry::new();

        let got = registry.variables("x y z");

        let names: Vec<_> = got.iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn concurrent_get_or_create_never_duplicates() {
        let registry = Arc::new(Registry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.variable("shared"))
            })
            .collect();

        let variables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(registry.len(), 1);
        variables[0].set_value(42).unwrap();
        for variable in &variables {
            assert_eq!(variable.value(), variables[0].value());
        }
    }
}
