use std::collections::BTreeSet;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;
use itertools::Itertools;

/// Whether `c` is turned into a literal symbol by the scanner.
#[inline(always)]
pub const fn is_literal(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Handle to an NFA state. Handles are dense and start at zero.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Debug for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A set of NFA states in canonical (ascending) order.
///
/// Two sets holding the same states compare and hash equal no matter the
/// order they were filled in, which is what lets a subset stand in as the
/// identity of a DFA state.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet(BTreeSet<StateId>);

impl StateSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn singleton(id: StateId) -> Self {
        let mut set = Self::new();
        set.insert(id);
        set
    }

    /// Returns `true` if `id` was not already present.
    pub fn insert(&mut self, id: StateId) -> bool {
        self.0.insert(id)
    }

    pub fn intersects(&self, other: &StateSet) -> bool {
        // Walk the smaller side
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        small.iter().any(|id| large.contains(id))
    }
}

impl Deref for StateSet {
    type Target = BTreeSet<StateId>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a StateId;
    type IntoIter = std::collections::btree_set::Iter<'a, StateId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Debug for StateSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl Display for StateSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}
