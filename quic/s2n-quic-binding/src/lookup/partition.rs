// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! A lazily-partitioned concurrent map, keyed by the low bits of a
//! [`ConnectionId`] (the "PID" encoding, §3 glossary).
//!
//! Grounded on the fixed-allocation concurrent map in `s2n-quic-dc`'s
//! `fixed_map` module: an array of lock-guarded slots, sized to a power of
//! two so the slot index is a cheap bitmask instead of a modulus. Unlike that
//! map, ours never evicts -- a local connection ID must never silently
//! disappear -- so each slot holds a growable [`HashMap`] rather than a
//! fixed-capacity array.

use crate::cid::ConnectionId;
use hashbrown::HashMap;
use parking_lot::RwLock;

pub struct Partitioned<V> {
    slots: RwLock<Vec<RwLock<HashMap<ConnectionId, V>>>>,
}

impl<V: Clone> Partitioned<V> {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(vec![RwLock::new(HashMap::new())]),
        }
    }

    fn slot_index(&self, slot_count: usize, cid: &ConnectionId) -> usize {
        debug_assert!(slot_count.is_power_of_two());
        let byte = cid.as_slice().first().copied().unwrap_or(0);
        byte as usize & (slot_count - 1)
    }

    /// Promotes the table from its current partition count to `target`
    /// (rounded up to a power of two), redistributing existing entries.
    /// A no-op if already at or above `target`.
    ///
    /// Returns `false` if `target` is not representable (zero) -- the only
    /// failure mode modeled here, since Rust's fallible-allocation APIs are
    /// unstable; real allocation exhaustion during promotion is not
    /// simulated (§9 "Partitioning of the lookup table").
    pub fn maximize_partitioning(&self, target: usize) -> bool {
        if target == 0 {
            return false;
        }
        let target = target.next_power_of_two();

        let mut slots = self.slots.write();
        if slots.len() >= target {
            return true;
        }

        let mut drained = Vec::with_capacity(slots.len());
        for slot in slots.drain(..) {
            drained.extend(slot.into_inner());
        }

        let mut new_slots = Vec::with_capacity(target);
        new_slots.resize_with(target, || RwLock::new(HashMap::new()));

        for (cid, value) in drained {
            let byte = cid.as_slice().first().copied().unwrap_or(0);
            let idx = byte as usize & (target - 1);
            new_slots[idx].get_mut().insert(cid, value);
        }

        *slots = new_slots;
        true
    }

    pub fn partition_count(&self) -> usize {
        self.slots.read().len()
    }

    /// Inserts `value` under `cid`. Returns `false` without modifying the
    /// table if `cid` is already present (local CIDs are unique by
    /// construction, §3 invariant i; a collision means the caller issued a
    /// duplicate and is a bug worth surfacing rather than silently
    /// overwriting).
    pub fn insert(&self, cid: ConnectionId, value: V) -> bool {
        let slots = self.slots.read();
        let idx = self.slot_index(slots.len(), &cid);
        let mut slot = slots[idx].write();
        if slot.contains_key(&cid) {
            return false;
        }
        slot.insert(cid, value);
        true
    }

    pub fn remove(&self, cid: &ConnectionId) -> Option<V> {
        let slots = self.slots.read();
        let idx = self.slot_index(slots.len(), cid);
        slots[idx].write().remove(cid)
    }

    pub fn get(&self, cid: &ConnectionId) -> Option<V> {
        let slots = self.slots.read();
        let idx = self.slot_index(slots.len(), cid);
        slots[idx].read().get(cid).cloned()
    }

    pub fn len(&self) -> usize {
        self.slots.read().iter().map(|s| s.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for Partitioned<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(byte: u8) -> ConnectionId {
        ConnectionId::from_bytes(&[byte, 1, 2, 3]).unwrap()
    }

    #[test]
    fn starts_with_a_single_partition() {
        let table: Partitioned<u32> = Partitioned::new();
        assert_eq!(table.partition_count(), 1);
    }

    #[test]
    fn insert_get_remove_round_trip() {
        let table = Partitioned::new();
        assert!(table.insert(cid(1), "a"));
        assert_eq!(table.get(&cid(1)), Some("a"));
        assert_eq!(table.remove(&cid(1)), Some("a"));
        assert_eq!(table.get(&cid(1)), None);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let table = Partitioned::new();
        assert!(table.insert(cid(1), "a"));
        assert!(!table.insert(cid(1), "b"));
        assert_eq!(table.get(&cid(1)), Some("a"));
    }

    #[test]
    fn promotion_preserves_entries() {
        let table = Partitioned::new();
        for i in 0..64u8 {
            assert!(table.insert(cid(i), i));
        }
        assert!(table.maximize_partitioning(8));
        assert_eq!(table.partition_count(), 8);
        for i in 0..64u8 {
            assert_eq!(table.get(&cid(i)), Some(i));
        }
    }

    #[test]
    fn promotion_is_idempotent_once_reached() {
        let table: Partitioned<u32> = Partitioned::new();
        assert!(table.maximize_partitioning(4));
        assert_eq!(table.partition_count(), 4);
        assert!(table.maximize_partitioning(2));
        assert_eq!(table.partition_count(), 4);
    }
}
