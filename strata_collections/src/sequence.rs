// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Growable ordered buffer with a fixed doubling policy.

use core::fmt::Debug;
use core::ops::{Deref, DerefMut};

/// Capacity allocated by the first write into an empty sequence.
pub const INITIAL_CAPACITY: usize = 8;

/// Contiguous, growable buffer of `T`.
///
/// Capacity starts at zero and is allocated on the first write, then doubles
/// whenever a write would exceed it. It never shrinks on its own; [`clear`]
/// keeps the allocation so a buffer can be refilled every frame without
/// touching the allocator.
///
/// Removal by index asserts that the index is in range, the same way
/// [`Vec::remove`] does. Check [`len`] first if the index is not known to be valid.
///
/// [`clear`]: Sequence::clear
/// [`len`]: Sequence::len
pub struct Sequence<T> {
    buf: Vec<T>,
    // Tracked separately from `buf.capacity()` so growth follows the doubling
    // policy exactly; `buf` always holds at least this much.
    capacity: usize,
}

impl<T> Sequence<T> {
    /// Create an empty sequence. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            capacity: 0,
        }
    }

    /// Create an empty sequence with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut seq = Self::new();
        seq.reserve(capacity);
        seq
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the sequence holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of elements the sequence can hold before it grows.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Make room for `additional` more elements, doubling until they fit.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self
            .buf
            .len()
            .checked_add(additional)
            .expect("sequence length overflows usize");
        if needed <= self.capacity {
            return;
        }
        let mut capacity = self.capacity.max(INITIAL_CAPACITY);
        while capacity < needed {
            capacity = capacity.checked_mul(2).expect("sequence capacity overflows usize");
        }
        self.buf.reserve_exact(capacity - self.buf.len());
        self.capacity = capacity;
    }

    /// Append an element at the end.
    pub fn push(&mut self, value: T) {
        self.reserve(1);
        self.buf.push(value);
    }

    /// Remove the last element, or `None` if the sequence is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.buf.pop()
    }

    /// Insert `value` at `index`, shifting everything after it one slot right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(
            index <= self.len(),
            "insert index {index} out of range for sequence of length {}",
            self.len()
        );
        self.reserve(1);
        self.buf.insert(index, value);
    }

    /// Remove and return the element at `index`, preserving order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len(),
            "remove index {index} out of range for sequence of length {}",
            self.len()
        );
        self.buf.remove(index)
    }

    /// Insert `value` at `index` in O(1) by moving the element previously at
    /// `index` to the end. Order is not preserved.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_fast(&mut self, index: usize, value: T) {
        assert!(
            index <= self.len(),
            "insert index {index} out of range for sequence of length {}",
            self.len()
        );
        self.push(value);
        let last = self.len() - 1;
        self.buf.swap(index, last);
    }

    /// Remove and return the element at `index` in O(1) by moving the last
    /// element into its place. Order is not preserved.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove_fast(&mut self, index: usize) -> T {
        assert!(
            index < self.len(),
            "remove index {index} out of range for sequence of length {}",
            self.len()
        );
        self.buf.swap_remove(index)
    }

    /// Remove `count` elements starting at `index` and return them in order.
    ///
    /// # Panics
    ///
    /// Panics if `index + count > len`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Self {
        let end = index.checked_add(count);
        assert!(
            end.is_some_and(|end| end <= self.len()),
            "remove range {index}+{count} out of range for sequence of length {}",
            self.len()
        );
        self.buf.drain(index..index + count).collect()
    }

    /// Remove every element. The allocation is kept.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// The elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    /// The elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    /// Consume the sequence and return the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.buf
    }
}

impl<T: Clone> Sequence<T> {
    /// Insert clones of `values` at `index`, shifting the tail right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_range(&mut self, index: usize, values: &[T]) {
        assert!(
            index <= self.len(),
            "insert index {index} out of range for sequence of length {}",
            self.len()
        );
        self.reserve(values.len());
        self.buf.extend_from_slice(values);
        self.buf[index..].rotate_right(values.len());
    }

    /// Append clones of `values` at the end.
    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.reserve(values.len());
        self.buf.extend_from_slice(values);
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        let mut buf = Vec::with_capacity(self.capacity);
        buf.extend_from_slice(&self.buf);
        Self {
            buf,
            capacity: self.capacity,
        }
    }
}

impl<T: Debug> Debug for Sequence<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl<T> Deref for Sequence<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buf
    }
}

impl<T> DerefMut for Sequence<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(buf: Vec<T>) -> Self {
        let capacity = buf.capacity();
        Self { buf, capacity }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_push_allocates_initial_capacity() {
        let mut seq = Sequence::new();
        assert_eq!(seq.capacity(), 0);
        seq.push(1_u32);
        assert_eq!(seq.capacity(), INITIAL_CAPACITY);
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn capacity_doubles_and_never_shrinks() {
        let mut seq = Sequence::new();
        for i in 0..INITIAL_CAPACITY {
            seq.push(i);
        }
        assert_eq!(seq.capacity(), INITIAL_CAPACITY);
        seq.push(INITIAL_CAPACITY);
        assert_eq!(seq.capacity(), INITIAL_CAPACITY * 2);
        for i in 0..100 {
            seq.push(i);
        }
        let grown = seq.capacity();
        assert!(grown.is_power_of_two());
        assert!(seq.len() <= grown);
        while seq.pop().is_some() {}
        seq.clear();
        assert_eq!(seq.capacity(), grown);
    }

    #[test]
    fn length_tracks_pushes_minus_pops_in_order() {
        let mut seq = Sequence::new();
        for i in 0..20 {
            seq.push(i);
        }
        for _ in 0..5 {
            seq.pop();
        }
        assert_eq!(seq.len(), 15);
        assert_eq!(seq.as_slice(), (0..15).collect::<Vec<_>>().as_slice());
        assert_eq!(seq.last(), Some(&14));
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut seq: Sequence<u8> = Sequence::new();
        assert_eq!(seq.pop(), None);
    }

    #[test]
    fn ordered_insert_and_remove() {
        let mut seq: Sequence<char> = "abd".chars().collect();
        seq.insert(2, 'c');
        assert_eq!(seq.as_slice(), &['a', 'b', 'c', 'd']);
        assert_eq!(seq.remove(0), 'a');
        assert_eq!(seq.as_slice(), &['b', 'c', 'd']);
        seq.insert(3, 'e');
        assert_eq!(seq.as_slice(), &['b', 'c', 'd', 'e']);
    }

    #[test]
    fn fast_variants_swap_with_last() {
        let mut seq: Sequence<u32> = [1, 2, 3, 4].into_iter().collect();
        seq.insert_fast(1, 9);
        assert_eq!(seq.as_slice(), &[1, 9, 3, 4, 2]);
        assert_eq!(seq.remove_fast(0), 1);
        assert_eq!(seq.as_slice(), &[2, 9, 3, 4]);
        seq.insert_fast(seq.len(), 7);
        assert_eq!(seq.last(), Some(&7));
    }

    #[test]
    fn range_insert_and_remove() {
        let mut seq: Sequence<u32> = [1, 5].into_iter().collect();
        seq.insert_range(1, &[2, 3, 4]);
        assert_eq!(seq.as_slice(), &[1, 2, 3, 4, 5]);
        let removed = seq.remove_range(1, 3);
        assert_eq!(removed.as_slice(), &[2, 3, 4]);
        assert_eq!(seq.as_slice(), &[1, 5]);
        let none = seq.remove_range(2, 0);
        assert!(none.is_empty());
    }

    #[test]
    fn insert_range_grows_by_doubling() {
        let mut seq: Sequence<u8> = Sequence::new();
        seq.insert_range(0, &[0; 17]);
        assert_eq!(seq.capacity(), 32);
    }

    #[test]
    fn clone_keeps_capacity() {
        let mut seq = Sequence::with_capacity(20);
        seq.push(1_u8);
        let copy = seq.clone();
        assert_eq!(copy.capacity(), seq.capacity());
        assert_eq!(copy, seq);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn remove_out_of_range_panics() {
        let mut seq: Sequence<u8> = Sequence::new();
        seq.remove(0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn remove_fast_out_of_range_panics() {
        let mut seq: Sequence<u8> = [1].into_iter().collect();
        seq.remove_fast(1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn remove_range_past_end_panics() {
        let mut seq: Sequence<u8> = [1, 2].into_iter().collect();
        let _ = seq.remove_range(1, 2);
    }
}
