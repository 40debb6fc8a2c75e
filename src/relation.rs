//! Finite binary relations: closures and order-property checks.

use nalgebra::DMatrix;
use std::{
    collections::HashSet,
    error::Error,
    fmt::{self, Display, Formatter},
    hash::Hash,
    ops::{BitAnd, BitOr},
};

/// A binary relation over a finite set of elements.
///
/// The element set defaults to everything mentioned by a pair, but can be
/// declared explicitly to include isolated elements (they matter for
/// reflexivity and connectedness).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryRelation<T: Copy + Eq + Hash> {
    pairs: HashSet<(T, T)>,
    elements: HashSet<T>,
}

impl<T: Copy + Eq + Hash> BinaryRelation<T> {
    /// Build a relation from its pairs; the element set is everything a pair
    /// mentions.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (T, T)>) -> Self {
        let pairs: HashSet<_> = pairs.into_iter().collect();
        let elements = pairs.iter().flat_map(|&(a, b)| vec![a, b]).collect();

        BinaryRelation { pairs, elements }
    }

    /// Build a relation over an explicit element set. Elements mentioned by a
    /// pair are always included.
    pub fn with_elements(
        pairs: impl IntoIterator<Item = (T, T)>,
        elements: impl IntoIterator<Item = T>,
    ) -> Self {
        let mut relation = BinaryRelation::from_pairs(pairs);
        relation.elements.extend(elements);
        relation
    }

    pub fn contains(&self, a: T, b: T) -> bool { self.pairs.contains(&(a, b)) }

    pub fn pairs(&self) -> impl Iterator<Item = (T, T)> + '_ { self.pairs.iter().copied() }

    pub fn elements(&self) -> impl Iterator<Item = T> + '_ { self.elements.iter().copied() }

    pub fn len(&self) -> usize { self.pairs.len() }

    pub fn is_empty(&self) -> bool { self.pairs.is_empty() }

    /// The first projection: every element some pair starts with.
    pub fn domain(&self) -> HashSet<T> { self.pairs().map(|(a, _)| a).collect() }

    /// The second projection: every element some pair ends with.
    pub fn range(&self) -> HashSet<T> { self.pairs().map(|(_, b)| b).collect() }

    /// All pairs starting with `a`.
    pub fn pairs_from(&self, a: T) -> impl Iterator<Item = (T, T)> + '_ {
        self.pairs().filter(move |&(first, _)| first == a)
    }

    /// All pairs ending with `b`.
    pub fn pairs_to(&self, b: T) -> impl Iterator<Item = (T, T)> + '_ {
        self.pairs().filter(move |&(_, second)| second == b)
    }

    /// The inverse relation: `(b, a)` for every `(a, b)`.
    pub fn inverse(&self) -> Self {
        BinaryRelation {
            pairs: self.pairs().map(|(a, b)| (b, a)).collect(),
            elements: self.elements.clone(),
        }
    }

    /// Relation composition: `(a, c)` is in the result iff there is a `b`
    /// with `(a, b)` in `self` and `(b, c)` in `other`.
    pub fn compose(&self, other: &Self) -> Self {
        let mut pairs = HashSet::new();

        for (a, b) in self.pairs() {
            for (_, c) in other.pairs_from(b) {
                pairs.insert((a, c));
            }
        }

        let elements = self.elements.union(&other.elements).copied().collect();
        BinaryRelation { pairs, elements }
    }

    /// The relation composed with itself `exponent` times; negative
    /// exponents apply to the inverse. An exponent of zero is undefined.
    pub fn power(&self, exponent: i32) -> Result<Self, ZeroExponent> {
        if exponent == 0 {
            return Err(ZeroExponent);
        }

        let base = if exponent < 0 { self.inverse() } else { self.clone() };

        let mut result = base.clone();
        for _ in 1..exponent.unsigned_abs() {
            result = result.compose(&base);
        }
        Ok(result)
    }

    pub fn union(&self, other: &Self) -> Self {
        BinaryRelation {
            pairs: self.pairs.union(&other.pairs).copied().collect(),
            elements: self.elements.union(&other.elements).copied().collect(),
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        BinaryRelation {
            pairs: self.pairs.intersection(&other.pairs).copied().collect(),
            elements: self.elements.union(&other.elements).copied().collect(),
        }
    }

    /// The smallest reflexive relation containing this one.
    pub fn reflexive_closure(&self) -> Self {
        let mut closure = self.clone();
        for a in self.elements() {
            closure.pairs.insert((a, a));
        }
        closure
    }

    /// The smallest symmetric relation containing this one.
    pub fn symmetric_closure(&self) -> Self { self.union(&self.inverse()) }

    /// The smallest transitive relation containing this one, computed by
    /// iterating to a fixed point.
    pub fn transitive_closure(&self) -> Self {
        let mut closure = self.clone();

        loop {
            let mut additions = Vec::new();

            for (a, b) in closure.pairs() {
                for (_, c) in closure.pairs_from(b) {
                    if !closure.contains(a, c) {
                        additions.push((a, c));
                    }
                }
            }

            if additions.is_empty() {
                return closure;
            }
            closure.pairs.extend(additions);
        }
    }

    /// The 0/1 adjacency matrix in the given element order.
    pub fn adjacency_matrix(&self, order: &[T]) -> DMatrix<u8> {
        DMatrix::from_fn(order.len(), order.len(), |row, column| {
            self.contains(order[row], order[column]) as u8
        })
    }

    // -- basic properties --

    /// Every element is related to itself.
    pub fn is_reflexive(&self) -> bool { self.elements().all(|a| self.contains(a, a)) }

    /// No element is related to itself.
    pub fn is_irreflexive(&self) -> bool { self.elements().all(|a| !self.contains(a, a)) }

    /// `(a, b)` implies `(b, a)`.
    pub fn is_symmetric(&self) -> bool {
        self.pairs().all(|(a, b)| self.contains(b, a))
    }

    /// `(a, b)` implies not `(b, a)`.
    pub fn is_asymmetric(&self) -> bool {
        self.pairs().all(|(a, b)| !self.contains(b, a))
    }

    /// `(a, b)` and `(b, a)` imply `a == b`.
    pub fn is_antisymmetric(&self) -> bool {
        self.pairs().all(|(a, b)| a == b || !self.contains(b, a))
    }

    /// `(a, b)` and `(b, c)` imply `(a, c)`.
    pub fn is_transitive(&self) -> bool {
        self.pairs()
            .all(|(a, b)| self.pairs_from(b).all(|(_, c)| self.contains(a, c)))
    }

    /// `(a, b)` and `(b, c)` imply not `(a, c)`.
    pub fn is_antitransitive(&self) -> bool {
        self.pairs()
            .all(|(a, b)| self.pairs_from(b).all(|(_, c)| !self.contains(a, c)))
    }

    /// Any two distinct elements are related one way or the other.
    pub fn is_connected(&self) -> bool {
        self.elements().all(|a| {
            self.elements()
                .all(|b| a == b || self.contains(a, b) || self.contains(b, a))
        })
    }

    /// Any two elements, distinct or not, are related one way or the other.
    pub fn is_strongly_connected(&self) -> bool {
        self.elements()
            .all(|a| self.elements().all(|b| self.contains(a, b) || self.contains(b, a)))
    }

    // -- combinations of properties --

    pub fn is_equivalence(&self) -> bool {
        self.is_reflexive() && self.is_symmetric() && self.is_transitive()
    }

    pub fn is_partial_order(&self) -> bool {
        self.is_reflexive() && self.is_antisymmetric() && self.is_transitive()
    }

    pub fn is_strict_partial_order(&self) -> bool {
        self.is_irreflexive() && self.is_asymmetric() && self.is_transitive()
    }

    pub fn is_total_order(&self) -> bool { self.is_partial_order() && self.is_connected() }

    pub fn is_strict_total_order(&self) -> bool {
        self.is_strict_partial_order() && self.is_connected()
    }
}

impl<T: Copy + Eq + Hash> BitOr for &BinaryRelation<T> {
    type Output = BinaryRelation<T>;

    fn bitor(self, rhs: &BinaryRelation<T>) -> BinaryRelation<T> { self.union(rhs) }
}

impl<T: Copy + Eq + Hash> BitAnd for &BinaryRelation<T> {
    type Output = BinaryRelation<T>;

    fn bitand(self, rhs: &BinaryRelation<T>) -> BinaryRelation<T> { self.intersection(rhs) }
}

/// Relation powers are only defined for non-zero exponents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroExponent;

impl Display for ZeroExponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "The exponent of a relation power must be non-zero")
    }
}

impl Error for ZeroExponent {}

#[cfg(test)]
mod tests {
    use super::*;

    fn less_or_equal_up_to(n: i64) -> BinaryRelation<i64> {
        let mut pairs = Vec::new();
        for a in 0..=n {
            for b in a..=n {
                pairs.push((a, b));
            }
        }
        BinaryRelation::from_pairs(pairs)
    }

    #[test]
    fn elements_default_to_everything_mentioned() {
        let relation = BinaryRelation::from_pairs(vec![(1, 2), (2, 3)]);

        let elements: HashSet<_> = relation.elements().collect();
        assert_eq!(elements, vec![1, 2, 3].into_iter().collect());
    }

    #[test]
    fn projections() {
        let relation = BinaryRelation::from_pairs(vec![(1, 2), (1, 3), (4, 3)]);

        assert_eq!(relation.domain(), vec![1, 4].into_iter().collect());
        assert_eq!(relation.range(), vec![2, 3].into_iter().collect());
    }

    #[test]
    fn inverse_swaps_every_pair() {
        let relation = BinaryRelation::from_pairs(vec![(1, 2), (3, 4)]);

        assert_eq!(
            relation.inverse(),
            BinaryRelation::from_pairs(vec![(2, 1), (4, 3)])
        );
        assert_eq!(relation.inverse().inverse(), relation);
    }

    #[test]
    fn composition_chains_pairs() {
        let first = BinaryRelation::from_pairs(vec![(1, 2), (2, 3)]);
        let second = BinaryRelation::from_pairs(vec![(2, 10), (3, 20)]);

        let composed = first.compose(&second);

        assert!(composed.contains(1, 10));
        assert!(composed.contains(2, 20));
        assert_eq!(composed.len(), 2);
    }

    #[test]
    fn powers_iterate_composition() {
        // a cycle of length 3
        let step = BinaryRelation::from_pairs(vec![(0, 1), (1, 2), (2, 0)]);

        let two_steps = step.power(2).unwrap();
        assert!(two_steps.contains(0, 2));
        assert!(two_steps.contains(1, 0));

        assert_eq!(step.power(-1).unwrap(), step.inverse());
        assert_eq!(step.power(0), Err(ZeroExponent));
    }

    #[test]
    fn union_and_intersection_operators() {
        let left = BinaryRelation::from_pairs(vec![(1, 2), (2, 3)]);
        let right = BinaryRelation::from_pairs(vec![(2, 3), (3, 4)]);

        assert_eq!(
            &left | &right,
            BinaryRelation::from_pairs(vec![(1, 2), (2, 3), (3, 4)])
        );
        assert_eq!(
            (&left & &right).pairs().collect::<Vec<_>>(),
            vec![(2, 3)]
        );
    }

    #[test]
    fn transitive_closure_reaches_a_fixed_point() {
        // a chain needs pairs across *every* gap, not just one hop
        let chain = BinaryRelation::from_pairs(vec![(1, 2), (2, 3), (3, 4)]);

        let closure = chain.transitive_closure();

        assert!(closure.is_transitive());
        assert!(closure.contains(1, 4));
        assert_eq!(closure.len(), 6);
    }

    #[test]
    fn reflexive_and_symmetric_closures() {
        let relation = BinaryRelation::with_elements(vec![(1, 2)], vec![1, 2, 3]);

        let reflexive = relation.reflexive_closure();
        assert!(reflexive.is_reflexive());
        assert!(reflexive.contains(3, 3));

        let symmetric = relation.symmetric_closure();
        assert!(symmetric.is_symmetric());
        assert!(symmetric.contains(2, 1));
    }

    #[test]
    fn equality_modulo_n_is_an_equivalence() {
        let mut pairs = Vec::new();
        for a in 0..12_i64 {
            for b in 0..12 {
                if a % 3 == b % 3 {
                    pairs.push((a, b));
                }
            }
        }
        let relation = BinaryRelation::from_pairs(pairs);

        assert!(relation.is_equivalence());
        assert!(!relation.is_partial_order(), "it is not antisymmetric");
    }

    #[test]
    fn less_or_equal_is_a_total_order() {
        let relation = less_or_equal_up_to(5);

        assert!(relation.is_partial_order());
        assert!(relation.is_total_order());
        assert!(!relation.is_strict_total_order());
    }

    #[test]
    fn strictly_less_is_a_strict_total_order() {
        let mut pairs = Vec::new();
        for a in 0..6_i64 {
            for b in (a + 1)..6 {
                pairs.push((a, b));
            }
        }
        let relation = BinaryRelation::with_elements(pairs, 0..6);

        assert!(relation.is_strict_partial_order());
        assert!(relation.is_strict_total_order());
        assert!(!relation.is_reflexive());
    }

    #[test]
    fn isolated_elements_break_reflexivity() {
        let relation = BinaryRelation::with_elements(vec![(1, 1)], vec![1, 2]);
        assert!(!relation.is_reflexive());
    }

    #[test]
    fn adjacency_matrix_follows_the_given_order() {
        let relation = BinaryRelation::from_pairs(vec![(1, 2), (2, 2)]);

        let matrix = relation.adjacency_matrix(&[1, 2]);

        assert_eq!(matrix[(0, 0)], 0);
        assert_eq!(matrix[(0, 1)], 1);
        assert_eq!(matrix[(1, 0)], 0);
        assert_eq!(matrix[(1, 1)], 1);
    }
}
