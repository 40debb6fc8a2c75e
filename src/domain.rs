//! Numeric domains: pure predicates over [`Value`]s.

use crate::{value::Value, variable::Variable};
use smol_str::SmolStr;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// A set of admissible numeric values.
///
/// Composite domains are defined in terms of the more primitive ones, e.g.
/// [`Domain::Natural`] is "integer and non-negative" and [`Domain::Prime`]
/// is "natural and prime". Membership tests are pure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Domain {
    /// The default domain; admits everything.
    Any,
    Integer,
    Even,
    Odd,
    /// 0, 1, 2, 3, ...
    Natural,
    /// 2, 3, 5, 7, 11, ...
    Prime,
    /// Integers whose absolute value is prime: ..., -5, -3, -2, 2, 3, 5, ...
    SignedPrime,
    Real,
    Complex,
    /// The ring of integers modulo `n`. Use [`Domain::zn`] to construct one
    /// with a validated modulus.
    Zn(u64),
    /// The field of integers modulo a prime `p`. Use [`Domain::zp`] to
    /// construct one with a validated modulus.
    Zp(u64),
}

impl Domain {
    /// The ring domain `Z/nZ`. Fails for a zero modulus or one too large for
    /// ring elements to be representable as signed integers.
    pub fn zn(modulus: u64) -> Result<Domain, DomainError> {
        if modulus == 0 {
            Err(DomainError::ZeroModulus)
        } else if modulus > i64::MAX as u64 {
            Err(DomainError::ModulusTooLarge { modulus })
        } else {
            Ok(Domain::Zn(modulus))
        }
    }

    /// The field domain `Z/pZ`. Fails unless `modulus` is a representable
    /// prime.
    pub fn zp(modulus: u64) -> Result<Domain, DomainError> {
        if modulus > i64::MAX as u64 {
            Err(DomainError::ModulusTooLarge { modulus })
        } else if is_prime(modulus) {
            Ok(Domain::Zp(modulus))
        } else {
            Err(DomainError::CompositeModulus { modulus })
        }
    }

    /// Check whether `value` belongs to this domain.
    pub fn contains(self, value: Value) -> bool {
        match self {
            Domain::Any => true,
            Domain::Integer => matches!(value, Value::Integer(_)),
            Domain::Even => {
                Domain::Integer.contains(value)
                    && matches!(value, Value::Integer(n) if n % 2 == 0)
            },
            Domain::Odd => Domain::Integer.contains(value) && !Domain::Even.contains(value),
            Domain::Natural => {
                Domain::Integer.contains(value)
                    && matches!(value, Value::Integer(n) if n >= 0)
            },
            Domain::Prime => {
                Domain::Natural.contains(value)
                    && matches!(value, Value::Integer(n) if is_prime(n as u64))
            },
            Domain::SignedPrime => {
                Domain::Integer.contains(value)
                    && matches!(value, Value::Integer(n) if is_prime(n.unsigned_abs()))
            },
            Domain::Real => {
                Domain::Integer.contains(value) || matches!(value, Value::Real(_))
            },
            Domain::Complex => {
                Domain::Real.contains(value) || matches!(value, Value::Complex(_))
            },
            Domain::Zn(n) | Domain::Zp(n) => {
                matches!(value, Value::Integer(v) if v >= 0 && (v as u64) < n)
            },
        }
    }

    /// Add two variables in this ring domain: `(a + b) mod n`.
    ///
    /// Both variables must hold integer values; the domain must be
    /// [`Domain::Zn`] or [`Domain::Zp`].
    pub fn modular_add(self, a: &Variable, b: &Variable) -> Result<Value, DomainError> {
        // the variants are public, so an unchecked modulus can show up here
        let modulus = match self {
            Domain::Zn(n) | Domain::Zp(n) if n > i64::MAX as u64 => {
                return Err(DomainError::ModulusTooLarge { modulus: n });
            },
            Domain::Zn(n) | Domain::Zp(n) => i128::from(n),
            other => return Err(DomainError::NotModular { domain: other }),
        };

        let lhs = i128::from(ring_operand(a)?);
        let rhs = i128::from(ring_operand(b)?);

        // the sum is taken in i128 so operands near i64::MAX can't overflow;
        // the result is below the (validated) modulus, so it fits an i64
        Ok(Value::Integer((lhs + rhs).rem_euclid(modulus) as i64))
    }
}

fn ring_operand(variable: &Variable) -> Result<i64, DomainError> {
    match variable.value() {
        Some(Value::Integer(n)) => Ok(n),
        Some(_) => Err(DomainError::NonIntegerOperand {
            name: variable.name().into(),
        }),
        None => Err(DomainError::Unbound {
            name: variable.name().into(),
        }),
    }
}

/// Trial division up to the square root.
fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    // i <= n/i rather than i*i <= n, which wraps for n near u64::MAX
    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// `Zn(0)` is not a ring.
    ZeroModulus,
    /// `Zp` requires a prime modulus.
    CompositeModulus { modulus: u64 },
    /// Ring elements must be representable as signed 64-bit integers.
    ModulusTooLarge { modulus: u64 },
    /// A ring operation was requested on a non-ring domain.
    NotModular { domain: Domain },
    /// A ring operand has no value set.
    Unbound { name: SmolStr },
    /// A ring operand holds a non-integer value.
    NonIntegerOperand { name: SmolStr },
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::ZeroModulus => write!(f, "The modulus must be non-zero"),
            DomainError::CompositeModulus { modulus } => {
                write!(f, "Zp requires a prime modulus, got {}", modulus)
            },
            DomainError::ModulusTooLarge { modulus } => {
                write!(f, "The modulus {} exceeds the largest signed integer", modulus)
            },
            DomainError::NotModular { domain } => {
                write!(f, "{} is not a modular domain", domain)
            },
            DomainError::Unbound { name } => {
                write!(f, "Variable \"{}\" has no value set", name)
            },
            DomainError::NonIntegerOperand { name } => {
                write!(f, "Variable \"{}\" does not hold an integer", name)
            },
        }
    }
}

impl Error for DomainError {}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Any => write!(f, "any"),
            Domain::Integer => write!(f, "integer"),
            Domain::Even => write!(f, "even"),
            Domain::Odd => write!(f, "odd"),
            Domain::Natural => write!(f, "natural"),
            Domain::Prime => write!(f, "prime"),
            Domain::SignedPrime => write!(f, "signed-prime"),
            Domain::Real => write!(f, "real"),
            Domain::Complex => write!(f, "complex"),
            Domain::Zn(n) => write!(f, "Z{}", n),
            Domain::Zp(p) => write!(f, "Z{}", p),
        }
    }
}

impl Default for Domain {
    fn default() -> Domain { Domain::Any }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use num_complex::Complex64;

    fn complex(re: f64, im: f64) -> Value { Value::Complex(Complex64::new(re, im)) }

    #[test]
    fn the_default_domain_admits_everything() {
        assert!(Domain::Any.contains(Value::from(5)));
        assert!(Domain::Any.contains(Value::from(1.0)));
        assert!(Domain::Any.contains(complex(1.0, 1.0)));
    }

    #[test]
    fn even_and_odd() {
        assert!(Domain::Odd.contains(Value::from(3)));
        assert!(Domain::Odd.contains(Value::from(5)));
        assert!(!Domain::Odd.contains(Value::from(2)));
        assert!(!Domain::Odd.contains(Value::from(1.0)));

        assert!(Domain::Even.contains(Value::from(2)));
        assert!(Domain::Even.contains(Value::from(6)));
        assert!(Domain::Even.contains(Value::from(-4)));
        assert!(!Domain::Even.contains(Value::from(3)));
        assert!(!Domain::Even.contains(Value::from(2.0)));
    }

    #[test]
    fn prime_membership() {
        for p in [2, 3, 5, 7, 3301].iter() {
            assert!(Domain::Prime.contains(Value::from(*p)), "{} is prime", p);
        }
        for n in [0, 1, 4, -2].iter() {
            assert!(!Domain::Prime.contains(Value::from(*n)), "{} is not prime", n);
        }
    }

    #[test]
    fn signed_prime_membership() {
        assert!(Domain::SignedPrime.contains(Value::from(-2)));
        assert!(Domain::SignedPrime.contains(Value::from(-3301)));
        assert!(!Domain::SignedPrime.contains(Value::from(-1)));
        assert!(!Domain::SignedPrime.contains(Value::from(0)));
    }

    #[test]
    fn the_numeric_tower_nests() {
        assert!(Domain::Real.contains(Value::from(1)));
        assert!(Domain::Real.contains(Value::from(0.5)));
        assert!(!Domain::Real.contains(complex(1.0, 1.0)));

        assert!(Domain::Complex.contains(Value::from(1)));
        assert!(Domain::Complex.contains(Value::from(0.5)));
        assert!(Domain::Complex.contains(complex(1.0, 1.0)));

        assert!(!Domain::Integer.contains(Value::from(1.0)));
    }

    #[test]
    fn ring_constructors_validate_their_modulus() {
        assert_eq!(Domain::zn(0), Err(DomainError::ZeroModulus));
        assert_eq!(Domain::zn(6), Ok(Domain::Zn(6)));
        assert_eq!(Domain::zp(4), Err(DomainError::CompositeModulus { modulus: 4 }));
        assert_eq!(Domain::zp(5), Ok(Domain::Zp(5)));

        // ring elements must fit in an i64
        let too_large = i64::MAX as u64 + 1;
        assert_eq!(
            Domain::zn(u64::MAX),
            Err(DomainError::ModulusTooLarge { modulus: u64::MAX })
        );
        assert_eq!(
            Domain::zp(too_large),
            Err(DomainError::ModulusTooLarge { modulus: too_large })
        );
    }

    #[test]
    fn primality_of_moduli_past_the_32_bit_boundary() {
        // 2^32 + 15 is the smallest prime above 2^32; its neighbours are not
        assert_eq!(Domain::zp(4_294_967_311), Ok(Domain::Zp(4_294_967_311)));
        assert_eq!(
            Domain::zp(4_294_967_309),
            Err(DomainError::CompositeModulus {
                modulus: 4_294_967_309
            })
        );
    }

    #[test]
    fn ring_membership() {
        let z5 = Domain::zn(5).unwrap();
        assert!(z5.contains(Value::from(0)));
        assert!(z5.contains(Value::from(4)));
        assert!(!z5.contains(Value::from(5)));
        assert!(!z5.contains(Value::from(-1)));
        assert!(!z5.contains(Value::from(2.0)));
    }

    #[test]
    fn modular_addition_wraps_around() {
        let registry = Registry::new();
        let z5 = Domain::zn(5).unwrap();
        let a = registry.variable_in("a", z5);
        let b = registry.variable_in("b", z5);
        a.set_value(Value::from(3)).unwrap();
        b.set_value(Value::from(4)).unwrap();

        assert_eq!(z5.modular_add(&a, &b), Ok(Value::Integer(2)));
    }

    #[test]
    fn modular_addition_of_operands_near_the_integer_ceiling() {
        let registry = Registry::new();
        let ring = Domain::zn(i64::MAX as u64).unwrap();
        let a = registry.variable_in("a", ring);
        let b = registry.variable_in("b", ring);
        a.set_value(i64::MAX - 1).unwrap();
        b.set_value(i64::MAX - 2).unwrap();

        assert_eq!(ring.modular_add(&a, &b), Ok(Value::Integer(i64::MAX - 3)));
    }

    #[test]
    fn modular_addition_rejects_an_unrepresentable_modulus() {
        let registry = Registry::new();
        let ring = Domain::Zn(u64::MAX);
        let a = registry.variable("a");
        let b = registry.variable("b");
        a.set_value(1).unwrap();
        b.set_value(2).unwrap();

        assert_eq!(
            ring.modular_add(&a, &b),
            Err(DomainError::ModulusTooLarge { modulus: u64::MAX })
        );
    }

    #[test]
    fn modular_addition_needs_bound_integer_operands() {
        let registry = Registry::new();
        let z5 = Domain::zn(5).unwrap();
        let a = registry.variable_in("a", z5);
        let b = registry.variable_in("b", z5);
        a.set_value(Value::from(3)).unwrap();

        assert_eq!(
            z5.modular_add(&a, &b),
            Err(DomainError::Unbound { name: "b".into() })
        );
        assert_eq!(
            Domain::Integer.modular_add(&a, &b),
            Err(DomainError::NotModular {
                domain: Domain::Integer
            })
        );
    }
}
