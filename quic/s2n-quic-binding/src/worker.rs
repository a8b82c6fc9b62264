// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The worker pool and operation-queue machinery are external collaborators
//! (§1, §6). This module only defines the interface the binding needs.

use crate::connection::ConnectionHandle;
use std::net::SocketAddr;

/// An opaque handle to a worker thread, assigned to connections and used to
/// execute stateless responder work (§4.E runs on a worker, never on the
/// receive path).
pub trait Worker: Clone + Send + Sync + 'static {
    fn is_overloaded(&self) -> bool;
}

pub trait WorkerPool: Send + Sync + 'static {
    type Worker: Worker;
    type Connection: ConnectionHandle;

    /// Returns a worker to assign newly created connections or stateless
    /// operations to. Implementations load-balance however they like; this
    /// layer only ever asks for "a" worker.
    fn get_worker(&self) -> Self::Worker;

    fn assign_connection(&self, worker: &Self::Worker, connection: &Self::Connection);

    /// Queues a [`StatelessOperation`] for a worker to execute (§4.E is
    /// always run off the receive path). The receive path's job ends at
    /// reserving the op in [`crate::stateless::Cache`] and calling this;
    /// [`crate::dispatch::Dispatcher::execute_stateless_operation`] is what a
    /// worker calls once it pulls `op` off its queue.
    fn queue_stateless_operation(&self, worker: &Self::Worker, op: StatelessOperation);
}

/// The work item a worker executes to produce a stateless response.
///
/// Carries only what's needed to find the reserved [`crate::stateless::Cache`]
/// entry again -- the op kind and the remote address it was reserved under.
/// Everything else the responder needs (CIDs, key phase, version, ...) is
/// re-derived from the captured datagram at execution time, the same
/// datagram the cache handed ownership of at reservation time (§3 "Stateless
/// context"), rather than duplicated into this work item.
#[derive(Debug, Clone, Copy)]
pub struct StatelessOperation {
    pub kind: StatelessOperationKind,
    pub remote_address: SocketAddr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatelessOperationKind {
    VersionNegotiation,
    StatelessReset,
    Retry,
}
