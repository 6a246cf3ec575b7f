// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Collections: the container toolkit underneath the Strata spatial indexes.
//!
//! - [`Sequence`]: growable ordered buffer. Capacity doubles on demand and never
//!   shrinks on its own, so a buffer cleared every frame keeps its allocation.
//! - [`OpenSet`]: open-addressed set with linear probing, tombstones, and set algebra.
//! - [`OpenMap`]: open-addressed map with the same slot discipline and a
//!   caller-supplied zero value for misses.
//!
//! Both hashed containers default to [`fxhash`] and accept any [`BuildHasher`].
//!
//! ```rust
//! use strata_collections::{OpenMap, OpenSet, Sequence};
//!
//! let mut seq = Sequence::new();
//! seq.push(3_u32);
//! seq.push(1);
//! seq.push(3);
//!
//! let unique = OpenSet::<u32>::from_sequence(&seq);
//! assert_eq!(unique.len(), 2);
//!
//! let mut counts = OpenMap::new(0_usize);
//! for v in &seq {
//!     *counts.get_or_insert_with(*v, || 0) += 1;
//! }
//! assert_eq!(counts.get(&3), 2);
//! assert_eq!(counts.get(&9), 0);
//! ```
//!
//! [`BuildHasher`]: core::hash::BuildHasher

pub mod map;
pub mod sequence;
pub mod set;
mod table;

pub use map::OpenMap;
pub use sequence::Sequence;
pub use set::OpenSet;
