//! One-or-more candidate values.
//!
//! Attribute data for a single patch may be spread over several attribute
//! applications. When two of them supply the same field, the value is not
//! silently picked: both are kept as candidates and the field becomes
//! ambiguous. "No value at all" is not an `Ambiguous` - it is the `None` of an
//! `Option<Ambiguous<T>>`.

use serde::{Serialize, Serializer};

/// A value known to be one of the listed candidates.
///
/// Equality is structural and order-sensitive: candidates are kept in
/// attribute declaration order, and `{A, B}` does not equal `{B, A}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ambiguous<T> {
    Single(T),
    Multiple(Candidates<T>),
}

/// Two or more candidates. The field is private so the length invariant
/// holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidates<T>(Vec<T>);

impl<T> Candidates<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> Ambiguous<T> {
    pub fn single(value: T) -> Self {
        Ambiguous::Single(value)
    }

    /// Union of two optional candidate sets: `a`'s candidates first, then `b`'s.
    /// Absence on either side is the identity.
    pub fn merge_symmetric(a: Option<Self>, b: Option<Self>) -> Option<Self> {
        match (a, b) {
            (None, b) => b,
            (a, None) => a,
            (Some(a), Some(b)) => Some(a.merge(b)),
        }
    }

    pub fn merge(self, other: Self) -> Self {
        let mut values = self.into_vec();
        values.extend(other.into_vec());
        Ambiguous::Multiple(Candidates(values))
    }

    /// Folds single candidates in sequence order; `None` for an empty sequence.
    pub fn from_sequence<I: IntoIterator<Item = T>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .fold(None, |acc, value| {
                Self::merge_symmetric(acc, Some(Ambiguous::Single(value)))
            })
    }

    pub fn candidates(&self) -> &[T] {
        match self {
            Ambiguous::Single(value) => std::slice::from_ref(value),
            Ambiguous::Multiple(candidates) => candidates.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates().len()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.len() != 1
    }

    pub fn unique(&self) -> Option<&T> {
        match self {
            Ambiguous::Single(value) => Some(value),
            Ambiguous::Multiple(_) => None,
        }
    }

    /// The unique candidate.
    ///
    /// # Panics
    ///
    /// Panics when more than one candidate is held. Callers check
    /// [`Ambiguous::is_ambiguous`] (or use [`Ambiguous::unique`]) first.
    pub fn value(&self) -> &T {
        match self {
            Ambiguous::Single(value) => value,
            Ambiguous::Multiple(_) => panic!("value is ambiguous"),
        }
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> Ambiguous<U> {
        match self {
            Ambiguous::Single(value) => Ambiguous::Single(f(value)),
            Ambiguous::Multiple(candidates) => {
                Ambiguous::Multiple(Candidates(candidates.0.iter().map(f).collect()))
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.candidates().iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Ambiguous::Single(value) => vec![value],
            Ambiguous::Multiple(candidates) => candidates.0,
        }
    }
}

impl<T> From<T> for Ambiguous<T> {
    fn from(value: T) -> Self {
        Ambiguous::Single(value)
    }
}

impl<'a, T> IntoIterator for &'a Ambiguous<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for Ambiguous<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.candidates().serialize(serializer)
    }
}
