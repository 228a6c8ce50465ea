/// Planar bounds index - dense, index-aligned (probe key, bounding sphere) arrays.
///
/// Contract:
/// - `probes()[i]` and `bounds()[i]` describe the same probe for every
///   `i < len()`. Slots at `i >= len()` are stale and never exposed.
/// - Capacity only grows, and only by doubling when `len() == capacity()`.
/// - Removal is swap-remove: O(1), iteration stays dense, but the slot of
///   the last entry changes. Slot indices are therefore NOT stable across
///   removals; hold a `ProbeKey`, never an index.

use rustc_hash::FxHashMap;
use slotmap::Key;
use crate::probe::{BoundingSphere, ProbeKey};

/// Initial capacity used when none is configured
pub const DEFAULT_PLANAR_CAPACITY: usize = 32;

pub struct PlanarBoundsIndex {
    probes: Vec<ProbeKey>,
    bounds: Vec<BoundingSphere>,
    count: usize,
    /// Reverse lookup key → slot, kept in sync on every swap
    slots: FxHashMap<ProbeKey, usize>,
}

impl PlanarBoundsIndex {
    /// Create an empty index with `capacity` preallocated slots (min 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            probes: vec![ProbeKey::null(); capacity],
            bounds: vec![BoundingSphere::default(); capacity],
            count: 0,
            slots: FxHashMap::default(),
        }
    }

    /// Create an empty index with `DEFAULT_PLANAR_CAPACITY` slots
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PLANAR_CAPACITY)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of allocated slots (live + stale)
    pub fn capacity(&self) -> usize {
        self.probes.len()
    }

    /// Live probe keys, index-aligned with `bounds()`
    pub fn probes(&self) -> &[ProbeKey] {
        &self.probes[..self.count]
    }

    /// Live bounding spheres, index-aligned with `probes()`
    pub fn bounds(&self) -> &[BoundingSphere] {
        &self.bounds[..self.count]
    }

    pub fn contains(&self, key: ProbeKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// Current slot of `key` (changes when another entry is swap-removed)
    pub fn slot_of(&self, key: ProbeKey) -> Option<usize> {
        self.slots.get(&key).copied()
    }

    /// Entry at `slot`, if live
    pub fn get(&self, slot: usize) -> Option<(ProbeKey, BoundingSphere)> {
        if slot < self.count {
            Some((self.probes[slot], self.bounds[slot]))
        } else {
            None
        }
    }

    /// Append an entry at the end, doubling capacity when full.
    ///
    /// Appending a key that is already indexed only refreshes its sphere.
    /// Returns the slot of the entry.
    pub fn append(&mut self, key: ProbeKey, sphere: BoundingSphere) -> usize {
        if let Some(slot) = self.slot_of(key) {
            self.bounds[slot] = sphere;
            return slot;
        }

        if self.count == self.capacity() {
            let new_capacity = self.capacity() * 2;
            self.probes.resize(new_capacity, ProbeKey::null());
            self.bounds.resize(new_capacity, BoundingSphere::default());
        }

        let slot = self.count;
        self.probes[slot] = key;
        self.bounds[slot] = sphere;
        self.slots.insert(key, slot);
        self.count += 1;
        slot
    }

    /// Remove `key`, moving the last live entry into its slot.
    ///
    /// Capacity is unchanged. Returns `false` (no-op) if `key` is not indexed.
    pub fn remove_swap(&mut self, key: ProbeKey) -> bool {
        let Some(slot) = self.slots.remove(&key) else {
            return false;
        };

        let last = self.count - 1;
        if slot != last {
            let moved = self.probes[last];
            self.probes[slot] = moved;
            self.bounds[slot] = self.bounds[last];
            self.slots.insert(moved, slot);
        }
        self.probes[last] = ProbeKey::null();
        self.bounds[last] = BoundingSphere::default();
        self.count -= 1;
        true
    }

    /// Refresh the sphere of an indexed probe. Returns `false` if not indexed.
    pub fn update_bounds(&mut self, key: ProbeKey, sphere: BoundingSphere) -> bool {
        match self.slot_of(key) {
            Some(slot) => {
                self.bounds[slot] = sphere;
                true
            }
            None => false,
        }
    }

    /// Iterate live (key, sphere) pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ProbeKey, &BoundingSphere)> + '_ {
        self.probes().iter().copied().zip(self.bounds().iter())
    }

    /// Drop every entry, keeping the allocated capacity
    pub fn clear(&mut self) {
        for slot in 0..self.count {
            self.probes[slot] = ProbeKey::null();
            self.bounds[slot] = BoundingSphere::default();
        }
        self.slots.clear();
        self.count = 0;
    }
}

impl Default for PlanarBoundsIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "planar_bounds_tests.rs"]
mod tests;
