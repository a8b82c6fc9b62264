// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The multi-index lookup table (§3, §4.A): routes an arriving datagram to a
//! connection by local connection ID, by (remote address, source connection
//! ID), or by bare remote address, and must serve all three from the receive
//! path without blocking.

mod partition;

pub use partition::Partitioned;

use crate::cid::ConnectionId;
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::net::SocketAddr;

/// Outcome of [`Lookup::add_remote_hash`]: first-writer-wins (§4.A).
pub enum RemoteHashInsert<C> {
    Inserted,
    Collision(C),
}

pub struct Lookup<C> {
    local_cids: Partitioned<C>,
    // Guarded by its own lock, distinct from the local-CID partitions (§4.A:
    // "all operations acquire only the per-partition lock except the
    // remote-hash table which is a single table guarded by its own lock").
    remote_hash: RwLock<HashMap<(SocketAddr, ConnectionId), C>>,
    remote_addr: RwLock<HashMap<SocketAddr, C>>,
}

impl<C: Clone> Lookup<C> {
    pub fn new() -> Self {
        Self {
            local_cids: Partitioned::new(),
            remote_hash: RwLock::new(HashMap::new()),
            remote_addr: RwLock::new(HashMap::new()),
        }
    }

    /// Promotes the local-CID table from one partition to the ideal CPU
    /// partition count. Called by the listener registry when the first
    /// listener is registered (§4.B); failure rolls back that registration.
    pub fn maximize_partitioning(&self) -> bool {
        let ideal = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.local_cids.maximize_partitioning(ideal)
    }

    pub fn add_local_cid(&self, cid: ConnectionId, connection: C) -> bool {
        let inserted = self.local_cids.insert(cid, connection);
        if !inserted {
            tracing::warn!(?cid, "duplicate local connection ID insert rejected");
        }
        inserted
    }

    pub fn remove_local_cid(&self, cid: &ConnectionId) -> Option<C> {
        self.local_cids.remove(cid)
    }

    pub fn remove_local_cids(&self, cids: impl IntoIterator<Item = ConnectionId>) {
        for cid in cids {
            self.local_cids.remove(&cid);
        }
    }

    pub fn find_by_local_cid(&self, cid: &ConnectionId) -> Option<C> {
        self.local_cids.get(cid)
    }

    /// First-writer-wins insert keyed by (remote address, peer-chosen source
    /// CID) -- used to route the first few packets of a new connection
    /// before any locally-issued CID has reached the peer (§4.A, §4.F).
    pub fn add_remote_hash(
        &self,
        connection: C,
        remote_addr: SocketAddr,
        source_cid: ConnectionId,
    ) -> RemoteHashInsert<C> {
        let mut table = self.remote_hash.write();
        match table.entry((remote_addr, source_cid)) {
            hashbrown::hash_map::Entry::Occupied(entry) => {
                RemoteHashInsert::Collision(entry.get().clone())
            }
            hashbrown::hash_map::Entry::Vacant(entry) => {
                entry.insert(connection);
                RemoteHashInsert::Inserted
            }
        }
    }

    pub fn remove_remote_hash(&self, remote_addr: SocketAddr, source_cid: &ConnectionId) {
        self.remote_hash.write().remove(&(remote_addr, *source_cid));
    }

    pub fn find_by_remote_hash(
        &self,
        remote_addr: SocketAddr,
        source_cid: &ConnectionId,
    ) -> Option<C> {
        self.remote_hash
            .read()
            .get(&(remote_addr, *source_cid))
            .cloned()
    }

    /// Used by point-to-point bindings (a fixed remote address, §3 "Binding")
    /// where a single connection owns the whole remote address and no CID
    /// disambiguation is needed.
    pub fn add_remote_addr(&self, remote_addr: SocketAddr, connection: C) {
        self.remote_addr.write().insert(remote_addr, connection);
    }

    pub fn remove_remote_addr(&self, remote_addr: &SocketAddr) {
        self.remote_addr.write().remove(remote_addr);
    }

    pub fn find_by_remote_addr(&self, remote_addr: &SocketAddr) -> Option<C> {
        self.remote_addr.read().get(remote_addr).cloned()
    }

    pub fn local_cid_count(&self) -> usize {
        self.local_cids.len()
    }

    /// Moves a batch of local CIDs from `src` into `self`, re-pointing them
    /// at `connection`. Used when a connection migrates between bindings
    /// (e.g. a listening binding handing off to a dedicated per-connection
    /// binding after the handshake).
    ///
    /// This acquires each CID's partition lock one at a time rather than
    /// holding both tables locked for the whole batch: a reader racing the
    /// move can briefly see neither table hold the CID, which is harmless
    /// (it just looks like a miss, exactly as if the datagram had arrived a
    /// moment earlier) but never sees the CID in *two* tables at once,
    /// preserving invariant (i).
    pub fn move_local_cids(
        &self,
        src: &Lookup<C>,
        cids: impl IntoIterator<Item = ConnectionId>,
        connection: &C,
    ) {
        for cid in cids {
            if src.local_cids.remove(&cid).is_some() {
                self.local_cids.insert(cid, connection.clone());
            }
        }
    }
}

impl<C: Clone> Default for Lookup<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(byte: u8) -> ConnectionId {
        ConnectionId::from_bytes(&[byte, 0, 0, 0]).unwrap()
    }

    fn addr(port: u16) -> SocketAddr {
        format!("10.0.0.1:{port}").parse().unwrap()
    }

    #[test]
    fn local_cid_round_trip() {
        let table: Lookup<u32> = Lookup::new();
        assert!(table.add_local_cid(cid(1), 42));
        assert_eq!(table.find_by_local_cid(&cid(1)), Some(42));
        assert_eq!(table.remove_local_cid(&cid(1)), Some(42));
        assert_eq!(table.find_by_local_cid(&cid(1)), None);
    }

    #[test]
    fn remote_hash_first_writer_wins() {
        let table: Lookup<u32> = Lookup::new();
        let remote = addr(443);
        let src = cid(9);

        assert!(matches!(
            table.add_remote_hash(1, remote, src),
            RemoteHashInsert::Inserted
        ));
        match table.add_remote_hash(2, remote, src) {
            RemoteHashInsert::Collision(existing) => assert_eq!(existing, 1),
            RemoteHashInsert::Inserted => panic!("expected collision"),
        }
        assert_eq!(table.find_by_remote_hash(remote, &src), Some(1));
    }

    #[test]
    fn move_local_cids_transfers_ownership() {
        let src: Lookup<u32> = Lookup::new();
        let dst: Lookup<u32> = Lookup::new();
        src.add_local_cid(cid(1), 7);
        src.add_local_cid(cid(2), 7);

        dst.move_local_cids(&src, [cid(1), cid(2)], &7);

        assert_eq!(src.find_by_local_cid(&cid(1)), None);
        assert_eq!(src.find_by_local_cid(&cid(2)), None);
        assert_eq!(dst.find_by_local_cid(&cid(1)), Some(7));
        assert_eq!(dst.find_by_local_cid(&cid(2)), Some(7));
    }

    #[test]
    fn remove_local_cids_batch() {
        let table: Lookup<u32> = Lookup::new();
        table.add_local_cid(cid(1), 1);
        table.add_local_cid(cid(2), 1);
        table.remove_local_cids([cid(1), cid(2)]);
        assert_eq!(table.local_cid_count(), 0);
    }
}
