// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The per-connection state machine is an external collaborator (§1, §6).
//! This module only defines the interface the binding needs from it.

use crate::{address::Family, cid::ConnectionId};
use std::net::SocketAddr;

/// A reference-counted handle to a connection's state machine.
///
/// Implementations are expected to be cheap to [`Clone`] (an `Arc`-backed
/// handle, typically) -- the lookup table and dispatcher clone handles
/// freely while holding only read locks. The explicit [`add_ref`]/[`release`]
/// pair exists alongside `Clone` for the one place reference counting is load
/// bearing across a priority boundary: the receive path may never perform the
/// *last* release of a connection, since that can run destructors that block
/// (§5, §9). The analogous hazard on the binding side is handled by
/// [`Binding::try_release_now_or_queue_release`](crate::binding::Binding::try_release_now_or_queue_release);
/// implementations of this trait are expected to apply the same policy to
/// connection teardown.
pub trait ConnectionHandle: Clone + Send + Sync + 'static {
    /// Opaque reason tag for ref-count accounting/diagnostics, mirroring the
    /// original implementation's `QUIC_CONNECTION_REF_*` enum.
    type RefReason: Copy;

    fn add_ref(&self, reason: Self::RefReason);

    /// Releases a reference. Implementations must not run a blocking
    /// teardown inline when this is the last reference and the call
    /// originated on the receive path; defer that work to a worker instead.
    fn release(&self, reason: Self::RefReason);

    /// Appends `chain` to the connection's receive queue, in order.
    fn queue_recv_datagrams(&self, chain: Vec<Vec<u8>>);

    /// Notifies the connection that a datagram addressed to it was
    /// unreachable at the datapath layer (e.g. ICMP port-unreachable).
    fn queue_unreachable(&self, remote: SocketAddr);

    /// Queues an operation for the connection's worker, including the
    /// pre-allocated "silent shutdown" operation used to guarantee progress
    /// under memory pressure (§4.F.create, §9 "Backup operation slot").
    fn queue_operation(&self, op: Operation);
}

/// The handful of operations this layer ever needs to queue on a connection.
/// The real operation-queue machinery lives in the worker pool (out of
/// scope); this is just the vocabulary the binding speaks to it.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Tear the connection down without completing the handshake, used when
    /// `add_remote_hash` loses a race to a concurrently-created connection
    /// and must guarantee progress even if allocation fails.
    SilentShutdown,
}

/// Per-listener information needed to decide whether a new connection may be
/// admitted (§4.B `find_for_new_connection`). ALPN matching itself is
/// delegated to the session object the listener wraps -- out of scope here.
pub trait Session: Send + Sync + 'static {
    /// Returns true if this session advertises at least one ALPN protocol in
    /// common with `offered`.
    fn alpn_overlaps(&self, offered: &[&[u8]]) -> bool;
}

/// The information a new Initial packet carries that's relevant to listener
/// matching and connection admission.
#[derive(Debug, Clone)]
pub struct ConnectionInfo<'a> {
    pub remote_address: SocketAddr,
    pub local_address: SocketAddr,
    pub family: Family,
    pub alpn_offered: &'a [&'a [u8]],
    /// Set when the Initial packet carried a Retry token that decrypted
    /// successfully and matched the datagram's remote address (§4.F
    /// `should_retry`: "mark packet as carrying a valid token").
    pub token_validated: bool,
}

/// Extracts the ALPN protocol list a new Initial packet's TLS ClientHello
/// offered.
///
/// Parsing TLS itself is out of scope for this crate (§1 "Out of scope");
/// this trait is the thin seam the dispatcher calls through to get from "raw
/// Initial bytes" to the `&[&[u8]]` that [`Session::alpn_overlaps`] and
/// [`crate::listener::Registry::find_for_new_connection`] need, without this
/// crate ever looking inside a Crypto frame itself.
pub trait AlpnSniffer: Send + Sync + 'static {
    fn sniff(&self, first_datagram: &[u8]) -> Vec<Vec<u8>>;
}

/// Builds new [`ConnectionHandle`]s, seeded from the first datagram of a new
/// connection attempt (§4.F.create "Initialize a new connection owned by the
/// library's unregistered session, seeded from the datagram").
///
/// Kept separate from [`ConnectionHandle`] itself since constructing a
/// connection needs the matched session and the dispatcher's view of the
/// packet, neither of which an existing handle has any business exposing.
pub trait ConnectionFactory<S>: Send + Sync + 'static {
    type Connection: ConnectionHandle;

    fn create_connection(
        &self,
        session: &std::sync::Arc<S>,
        info: &ConnectionInfo<'_>,
        first_datagram: &[u8],
    ) -> Self::Connection;
}
