// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The UDP datapath (socket I/O, batching, compartment/interface selection)
//! is an external collaborator (§1, §6). This module only defines the
//! interface the binding needs from it.

use std::net::SocketAddr;

/// A single received datagram plus its provenance. The datapath owns the
/// underlying buffer's allocation; this layer borrows it for the length of
/// the receive call and hands back ownership through [`Datapath::return_recv_datagrams`]
/// unless a stateless operation takes it (§4.D: the `release: false` case).
#[derive(Debug, Clone)]
pub struct RecvDatagram {
    pub remote_address: SocketAddr,
    pub payload: Vec<u8>,
}

/// A send buffer allocated from the datapath, sized for one datagram.
pub trait SendContext {
    fn buffer_mut(&mut self) -> &mut [u8];
    fn truncate(&mut self, len: usize);
}

/// The UDP socket abstraction this binding sends and receives through.
///
/// A binding owns exactly one `Datapath::Handle` (§4.G); `delete` blocking
/// until in-flight receive callbacks drain is the ordering hinge that makes
/// it safe to tear down the lookup table and listener list afterwards.
pub trait Datapath: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;
    type SendContext: SendContext;

    fn create(
        &self,
        local_address: Option<SocketAddr>,
        remote_address: Option<SocketAddr>,
    ) -> Option<Self::Handle>;

    /// Blocks until all in-flight receive callbacks on `handle` have
    /// returned, then releases it.
    fn delete(&self, handle: Self::Handle);

    fn local_address(&self, handle: &Self::Handle) -> Option<SocketAddr>;
    fn remote_address(&self, handle: &Self::Handle) -> Option<SocketAddr>;

    fn alloc_send_context(&self, handle: &Self::Handle, mtu_hint: usize) -> Self::SendContext;

    fn send_to(&self, handle: &Self::Handle, remote: SocketAddr, ctx: Self::SendContext);

    fn send_from_to(
        &self,
        handle: &Self::Handle,
        local: SocketAddr,
        remote: SocketAddr,
        ctx: Self::SendContext,
    );

    /// Returns a batch of datagrams to the datapath's buffer pool.
    fn return_recv_datagrams(&self, chain: Vec<RecvDatagram>);
}

/// An opt-in interception point, compiled in behind the `testing` feature at
/// zero cost otherwise (§9 "Test hooks").
#[cfg(any(test, feature = "testing"))]
pub trait TestHook: Send + Sync {
    /// Returns true if the datagram should be dropped instead of delivered.
    fn on_receive(&self, datagram: &RecvDatagram) -> bool {
        let _ = datagram;
        false
    }

    /// Returns true if the outgoing send should be dropped instead of sent.
    fn on_send(&self, local: Option<SocketAddr>, remote: SocketAddr) -> bool {
        let _ = (local, remote);
        false
    }
}
