// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open-addressed slot table shared by the set and the map.
//!
//! Linear probing from `hash(key) % capacity`. Removal leaves a tombstone so
//! probe chains formed before the removal stay intact; tombstones are skipped
//! by lookups and reused by inserts, and dropped on every rebuild.
//!
//! Fill policy, checked before an insert of a new key:
//! - `live >= 3/4 capacity`: double and rehash.
//! - `live + tombstones >= 3/4 capacity`: rehash in place to purge tombstones.
//!
//! Checked before every removal: `live <= 1/4 capacity` halves the table, never
//! below the floor it was created with. Either way at least one empty slot
//! always remains, which is what terminates a probe.

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;

use tracing::trace;

/// Smallest table ever allocated.
pub(crate) const MIN_CAPACITY: usize = 8;

#[derive(Clone, Debug)]
pub(crate) enum Slot<K, V> {
    Empty,
    Alive(K, V),
    Dead,
}

impl<K, V> Slot<K, V> {
    fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Self::Alive(key, value) => Some((key, value)),
            Self::Empty | Self::Dead => None,
        }
    }

    fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Self::Alive(_, value) => Some(value),
            Self::Empty | Self::Dead => None,
        }
    }
}

#[derive(Clone)]
pub(crate) struct RawTable<K, V, S> {
    slots: Vec<Slot<K, V>>,
    live: usize,
    dead: usize,
    min_capacity: usize,
    hasher: S,
}

impl<K, V, S> RawTable<K, V, S> {
    /// Empty table. Nothing is allocated until the first insert.
    pub(crate) fn with_hasher(min_capacity: usize, hasher: S) -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            dead: 0,
            min_capacity: min_capacity.max(MIN_CAPACITY),
            hasher,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn tombstones(&self) -> usize {
        self.dead
    }

    #[inline]
    pub(crate) fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    #[inline]
    pub(crate) fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Mark every slot empty. Capacity is kept.
    pub(crate) fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.live = 0;
        self.dead = 0;
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.live,
        }
    }

    fn value_at_mut(&mut self, index: usize) -> &mut V {
        match &mut self.slots[index] {
            Slot::Alive(_, value) => value,
            Slot::Empty | Slot::Dead => unreachable!("slot {index} is not live"),
        }
    }
}

impl<K, V, S> RawTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The remainder is below the slot count, which is a usize."
    )]
    fn home<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hasher.hash_one(key) % self.slots.len() as u64) as usize
    }

    /// Index of the live slot holding `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let capacity = self.slots.len();
        if capacity == 0 {
            return None;
        }
        let mut index = self.home(key);
        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Alive(k, _) if k.borrow() == key => return Some(index),
                Slot::Alive(..) | Slot::Dead => {}
            }
            index = (index + 1) % capacity;
        }
        None
    }

    /// `Ok` with the live slot holding `key`, or `Err` with the slot a new
    /// entry for `key` should take (the first tombstone on the chain if any).
    fn probe(&self, key: &K) -> Result<usize, usize> {
        let capacity = self.slots.len();
        let mut index = self.home(key);
        let mut first_dead = None;
        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return Err(first_dead.unwrap_or(index)),
                Slot::Alive(k, _) if k == key => return Ok(index),
                Slot::Alive(..) => {}
                Slot::Dead => {
                    first_dead.get_or_insert(index);
                }
            }
            index = (index + 1) % capacity;
        }
        debug_assert!(first_dead.is_some(), "open-addressed table has no free slot");
        Err(first_dead.unwrap_or(index))
    }

    /// Probe for `key`, rebuilding first if a new entry would break the fill policy.
    fn locate(&mut self, key: &K) -> Result<usize, usize> {
        if self.slots.is_empty() {
            self.rebuild(self.min_capacity);
        }
        let found = self.probe(key);
        if found.is_err() && self.make_room() {
            return self.probe(key);
        }
        found
    }

    fn make_room(&mut self) -> bool {
        let capacity = self.slots.len();
        if self.live * 4 >= capacity * 3 {
            self.rebuild(capacity * 2);
            true
        } else if (self.live + self.dead) * 4 >= capacity * 3 {
            self.rebuild(capacity);
            true
        } else {
            false
        }
    }

    fn shrink_if_sparse(&mut self) {
        let capacity = self.slots.len();
        if capacity > self.min_capacity && self.live * 4 <= capacity {
            self.rebuild((capacity / 2).max(self.min_capacity));
        }
    }

    fn rebuild(&mut self, capacity: usize) {
        trace!(
            from = self.slots.len(),
            to = capacity,
            live = self.live,
            tombstones = self.dead,
            "rehashing open-addressed table"
        );
        let old = mem::replace(&mut self.slots, (0..capacity).map(|_| Slot::Empty).collect());
        self.dead = 0;
        for slot in old {
            if let Slot::Alive(key, value) = slot {
                let mut index = self.home(&key);
                while !matches!(self.slots[index], Slot::Empty) {
                    index = (index + 1) % capacity;
                }
                self.slots[index] = Slot::Alive(key, value);
            }
        }
    }

    fn place(&mut self, index: usize, key: K, value: V) {
        if matches!(self.slots[index], Slot::Dead) {
            self.dead -= 1;
        }
        self.slots[index] = Slot::Alive(key, value);
        self.live += 1;
    }

    /// Add `key` unless it is already present. Returns whether it was added.
    pub(crate) fn insert(&mut self, key: K, value: V) -> bool {
        match self.locate(&key) {
            Ok(_) => false,
            Err(index) => {
                self.place(index, key, value);
                true
            }
        }
    }

    /// Add or overwrite `key`. Returns the previous value, if any.
    pub(crate) fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.locate(&key) {
            Ok(index) => Some(mem::replace(self.value_at_mut(index), value)),
            Err(index) => {
                self.place(index, key, value);
                None
            }
        }
    }

    pub(crate) fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let index = match self.locate(&key) {
            Ok(index) => index,
            Err(index) => {
                self.place(index, key, default());
                index
            }
        };
        self.value_at_mut(index)
    }

    /// Remove `key`, leaving a tombstone. The shrink policy runs first so the
    /// slot index found below is the one that actually gets marked.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.shrink_if_sparse();
        let index = self.find(key)?;
        let slot = mem::replace(&mut self.slots[index], Slot::Dead);
        self.live -= 1;
        self.dead += 1;
        match slot {
            Slot::Alive(key, value) => Some((key, value)),
            Slot::Empty | Slot::Dead => None,
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        self.slots[index].entry().map(|(_, value)| value)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        self.slots[index].value_mut()
    }
}

/// Live entries in slot order.
#[derive(Clone, Debug)]
pub(crate) struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().find_map(Slot::entry)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
