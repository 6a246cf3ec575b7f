// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open-addressed map with a configurable miss value.

use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::{BuildHasher, Hash};

use fxhash::FxBuildHasher;

use crate::table::{self, MIN_CAPACITY, RawTable};

/// Key to value association sharing [`OpenSet`](crate::OpenSet)'s slot and
/// resize discipline.
///
/// Every map carries a "zero" value that [`get`](Self::get) hands back on a
/// miss, so lookups of plain data never need to branch on presence.
pub struct OpenMap<K, V, S = FxBuildHasher> {
    table: RawTable<K, V, S>,
    zero: V,
}

impl<K, V> OpenMap<K, V> {
    /// Create an empty map returning `zero` for missing keys.
    pub fn new(zero: V) -> Self {
        Self::with_hasher(zero, FxBuildHasher::default())
    }
}

impl<K, V, S> OpenMap<K, V, S> {
    /// Create an empty map with an explicit hasher.
    pub fn with_hasher(zero: V, hasher: S) -> Self {
        Self::with_capacity_and_hasher(zero, MIN_CAPACITY, hasher)
    }

    /// Create an empty map whose table never shrinks below `capacity` slots.
    pub fn with_capacity_and_hasher(zero: V, capacity: usize, hasher: S) -> Self {
        Self {
            table: RawTable::with_hasher(capacity, hasher),
            zero,
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the map has no keys.
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Number of slots in the backing table; zero until the first insert.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Value returned by [`get`](Self::get) on a miss.
    pub fn zero(&self) -> &V {
        &self.zero
    }

    /// Remove every entry, keeping the table.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Iterate live entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Iterate keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }
}

impl<K, V, S> OpenMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Add `key` with `value` unless the key is already present, in which case
    /// nothing changes. Returns whether the entry was added.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.table.insert(key, value)
    }

    /// Store `value` under `key`, replacing and returning any previous value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.table.set(key, value)
    }

    /// Mutable access to the value under `key`, inserting `default()` first if
    /// the key is missing.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        self.table.get_or_insert_with(key, default)
    }

    /// Remove `key`. Returns whether it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove(key).is_some()
    }

    /// Whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.find(key).is_some()
    }

    /// Copy of the value under `key`, or of the zero value on a miss.
    pub fn get<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.table.get(key).unwrap_or(&self.zero).clone()
    }

    /// Reference to the stored value under `key`.
    pub fn get_ref<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key)
    }

    /// In-place access to the stored value under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get_mut(key)
    }
}

impl<K, V: Default> Default for OpenMap<K, V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for OpenMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            zero: self.zero.clone(),
        }
    }
}

impl<K: Debug, V: Debug, S> Debug for OpenMap<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a OpenMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the live entries of an [`OpenMap`].
#[derive(Clone, Debug)]
pub struct Iter<'a, K, V> {
    inner: table::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
