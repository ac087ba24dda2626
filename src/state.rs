//! State identifiers and bit-set backed sets of states.

use fixedbitset::FixedBitSet;
use std::fmt;

/// Dense index of an interned NFA state.
pub type StateId = u32;

/// A set of NFA states stored as a bit-set over interned state indices.
///
/// Two sets holding the same members compare and hash equal no matter how
/// they were built, which makes `StateSet` usable directly as the identity of
/// a DFA subset-state.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state, returning `true` if it was not present before.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.bits.contains(state as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Members in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.bits.is_disjoint(&other.bits)
    }

    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

// `FixedBitSet` equality also compares lengths, so sets that grew to
// different capacities are compared by their members instead.
impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.ones().eq(other.bits.ones())
    }
}

impl Eq for StateSet {}

impl std::hash::Hash for StateSet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for member in self.bits.ones() {
            member.hash(state);
        }
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet as HashSet;

    #[test]
    fn insert_and_contains() {
        let mut set = StateSet::with_capacity(4);
        assert!(set.is_empty());
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.insert(9));
        assert_eq!(set.len(), 2);
        assert!(set.contains(9));
        assert!(!set.contains(4));
        assert!(!set.contains(100));
        assert_eq!(set.to_vec(), vec![3, 9]);
    }

    #[test]
    fn equality_ignores_capacity_and_order() {
        let a: StateSet = [5, 1, 1, 3].into_iter().collect();
        let mut b = StateSet::with_capacity(64);
        b.extend([3, 5, 1]);
        assert_eq!(a, b);

        let mut seen = HashSet::default();
        seen.insert(a);
        assert!(seen.contains(&b));
    }

    #[test]
    fn union_and_intersects() {
        let mut a = StateSet::singleton(1, 2);
        let b: StateSet = [2, 7].into_iter().collect();
        assert!(!a.intersects(&b));
        a.union_with(&b);
        assert_eq!(a.to_vec(), vec![1, 2, 7]);
        assert!(a.intersects(&b));
        assert!(b.is_subset(&a));
        assert!(!a.is_subset(&b));
    }
}
