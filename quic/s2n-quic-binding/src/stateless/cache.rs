// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The per-binding cache of in-flight stateless operations (§4.C).
//!
//! Bounds memory and rate-limits stateless responses per remote address: at
//! most one pending operation per remote address, at most `max_stateless_ops`
//! pending at once, each swept out after `stateless_op_expiry`.
//!
//! This is a straight ownership-based simplification of the original
//! `IsProcessed`/`IsExpired` flag pair: here the cache's `HashMap` entry *is*
//! the reservation, and `release` simply removes it. There's nothing left to
//! free after that -- the datagram and worker handle the caller already owns
//! outlive the cache entry by construction.

use crate::datapath::RecvDatagram;
use hashbrown::HashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

struct Reservation {
    datagram: RecvDatagram,
    created_at: Instant,
}

struct State {
    by_remote: HashMap<SocketAddr, Reservation>,
    age_order: VecDeque<(Instant, SocketAddr)>,
}

pub struct Cache {
    state: Mutex<State>,
    max_ops: usize,
    expiry: Duration,
}

impl Cache {
    pub fn new(max_ops: usize, expiry: Duration) -> Self {
        Self {
            state: Mutex::new(State {
                by_remote: HashMap::new(),
                age_order: VecDeque::new(),
            }),
            max_ops,
            expiry,
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().by_remote.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reserves a slot for a stateless operation targeting `remote_address`,
    /// taking ownership of `datagram`. Returns `Err(datagram)`, handing
    /// ownership back to the caller to release, if the cache is at capacity
    /// or already has an operation in flight for that address (§4.C steps 2-3).
    pub fn try_create(
        &self,
        remote_address: SocketAddr,
        datagram: RecvDatagram,
    ) -> Result<(), RecvDatagram> {
        let mut state = self.state.lock();
        self.sweep(&mut state);

        if state.by_remote.len() >= self.max_ops {
            tracing::debug!(?remote_address, "stateless op cache full, dropping");
            return Err(datagram);
        }

        if state.by_remote.contains_key(&remote_address) {
            tracing::debug!(
                ?remote_address,
                "stateless op already in flight for remote address, dropping"
            );
            return Err(datagram);
        }

        let now = Instant::now();
        state.by_remote.insert(
            remote_address,
            Reservation {
                datagram,
                created_at: now,
            },
        );
        state.age_order.push_back((now, remote_address));
        Ok(())
    }

    /// Releases the reservation for `remote_address`, handing back the
    /// datagram the caller reserved it with (§4.C `release`).
    pub fn release(&self, remote_address: &SocketAddr) -> Option<RecvDatagram> {
        self.state
            .lock()
            .by_remote
            .remove(remote_address)
            .map(|r| r.datagram)
    }

    /// Age sweep: removes every entry at least `expiry` old, oldest first
    /// (§4.C step 1). Must be called with `state` already locked.
    fn sweep(&self, state: &mut State) {
        let now = Instant::now();
        while let Some(&(created_at, remote_address)) = state.age_order.front() {
            if now.duration_since(created_at) < self.expiry {
                break;
            }
            state.age_order.pop_front();
            if state.by_remote.remove(&remote_address).is_some() {
                tracing::trace!(?remote_address, "stateless op expired");
            }
        }
    }
}
