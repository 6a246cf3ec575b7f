// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open-addressed set with tombstones and set algebra.

use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::{BuildHasher, Hash};

use fxhash::FxBuildHasher;

use crate::sequence::Sequence;
use crate::table::{self, MIN_CAPACITY, RawTable};

/// Unordered collection of unique elements.
///
/// Grows by doubling once three quarters full and halves again when a removal
/// finds it a quarter full, never below the capacity it was created with.
/// Iteration follows slot order, which changes on every resize.
pub struct OpenSet<T, S = FxBuildHasher> {
    table: RawTable<T, (), S>,
}

impl<T> OpenSet<T> {
    /// Create an empty set with the default hasher.
    pub fn new() -> Self {
        Self::with_hasher(FxBuildHasher::default())
    }

    /// Create an empty set whose table never shrinks below `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher::default())
    }
}

impl<T, S> OpenSet<T, S> {
    /// Create an empty set using `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(MIN_CAPACITY, hasher)
    }

    /// Create an empty set using `hasher` whose table never shrinks below `capacity` slots.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            table: RawTable::with_hasher(capacity, hasher),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Number of slots in the backing table; zero until the first insert.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// The set's hasher.
    pub fn hasher(&self) -> &S {
        self.table.hasher()
    }

    /// Remove every element, keeping the table.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Iterate live elements in slot order. Can be called again to restart.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }
}

impl<T, S> OpenSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Add `value`. Returns `false` (and changes nothing) if it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.table.insert(value, ())
    }

    /// Remove `value`. Returns whether it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove(value).is_some()
    }

    /// Whether `value` is in the set.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.find(value).is_some()
    }

    /// Whether every element of `self` is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|value| other.contains(value))
    }
}

impl<T, S> OpenSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    fn empty_like(&self) -> Self {
        Self::with_capacity_and_hasher(self.table.min_capacity(), self.table.hasher().clone())
    }

    /// Elements in `self`, `other`, or both, as a new set.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.empty_like();
        for value in self.iter().chain(other.iter()) {
            out.insert(value.clone());
        }
        out
    }

    /// Elements in both `self` and `other`, as a new set.
    pub fn intersect(&self, other: &Self) -> Self {
        let mut out = self.empty_like();
        for value in self.iter().filter(|value| other.contains(*value)) {
            out.insert(value.clone());
        }
        out
    }

    /// Elements in `self` but not in `other`, as a new set.
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = self.empty_like();
        for value in self.iter().filter(|value| !other.contains(*value)) {
            out.insert(value.clone());
        }
        out
    }

    /// Copy the elements into a sequence, in slot order.
    pub fn to_sequence(&self) -> Sequence<T> {
        self.iter().cloned().collect()
    }
}

impl<T, S> OpenSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    /// Build a set from the distinct elements of `values`.
    pub fn from_sequence(values: &Sequence<T>) -> Self {
        values.iter().cloned().collect()
    }
}

impl<T> Default for OpenSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, S: Clone> Clone for OpenSet<T, S> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<T: Debug, S> Debug for OpenSet<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> FromIterator<T> for OpenSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_hasher(S::default());
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for OpenSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, S> IntoIterator for &'a OpenSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the live elements of an [`OpenSet`].
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    inner: table::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
