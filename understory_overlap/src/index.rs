// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot index of node bounds.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::overlap::overlaps;
use crate::types::BoundingBox;

/// A node paired with the bounding box it had when it was indexed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundsTuple<K, T> {
    /// Node key.
    pub node: K,
    /// Box captured at insertion time.
    pub bounds: BoundingBox<T>,
}

/// Ordered sequence of [`BoundsTuple`]s with linear scans.
///
/// This is a snapshot, not a live view: entries keep the box they were inserted
/// with until the owner rebuilds the index or removes them. Callers that need
/// certainty about a hit should re-read the candidate's current box.
///
/// Each key appears at most once. Iteration and query order is insertion order.
#[derive(Clone)]
pub struct BoundsIndex<K, T> {
    entries: Vec<BoundsTuple<K, T>>,
}

impl<K, T> Default for BoundsIndex<K, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Debug, T: Debug> Debug for BoundsIndex<K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BoundsIndex")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, T: Copy + PartialOrd> BoundsIndex<K, T> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the whole index with `entries`, keeping their order.
    ///
    /// Later duplicates of a key are ignored.
    pub fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, BoundingBox<T>)>,
    {
        self.entries.clear();
        for (node, bounds) in entries {
            self.push(node, bounds);
        }
    }

    /// Append an entry. Returns `false` (and changes nothing) if `node` is already indexed.
    pub fn push(&mut self, node: K, bounds: BoundingBox<T>) -> bool {
        if self.contains(node) {
            return false;
        }
        self.entries.push(BoundsTuple { node, bounds });
        true
    }

    /// Remove the entry for `node`, returning it if present.
    pub fn remove(&mut self, node: K) -> Option<BoundsTuple<K, T>> {
        let pos = self.entries.iter().position(|t| t.node == node)?;
        Some(self.entries.remove(pos))
    }

    /// Keep only entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&BoundsTuple<K, T>) -> bool) {
        self.entries.retain(|t| keep(t));
    }

    /// Whether `node` has an entry.
    pub fn contains(&self, node: K) -> bool {
        self.entries.iter().any(|t| t.node == node)
    }

    /// The snapshot box recorded for `node`.
    pub fn get(&self, node: K) -> Option<BoundingBox<T>> {
        self.entries
            .iter()
            .find(|t| t.node == node)
            .map(|t| t.bounds)
    }

    /// Iterate all entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundsTuple<K, T>> + '_ {
        self.entries.iter()
    }

    /// Iterate entries whose snapshot box overlaps `probe`, in order.
    pub fn overlapping<'a>(
        &'a self,
        probe: &'a BoundingBox<T>,
    ) -> impl Iterator<Item = &'a BoundsTuple<K, T>> + 'a {
        self.entries.iter().filter(move |t| overlaps(&t.bounds, probe))
    }
}
