// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Binding lifecycle (§4.G): the object tying together one datapath handle,
//! its lookup table, listener registry, and stateless-operation cache.

use crate::{
    connection::{ConnectionHandle, Session},
    datapath::{Datapath, SendContext},
    error::BindingError,
    listener::Registry,
    lookup::Lookup,
    packet::Version,
    random::Generator,
    stateless,
};
use parking_lot::Mutex;
use std::{marker::PhantomData, net::SocketAddr, sync::Arc};

#[cfg(any(test, feature = "testing"))]
use crate::datapath::TestHook;

/// Draws a "reserved" QUIC version value (§3 "Binding"): the greased-version
/// pattern from RFC 9000 §15, `version & 0x0f0f0f0f == 0x0a0a0a0a`, used so a
/// Version Negotiation response always advertises at least one version a
/// spec-compliant peer is required to ignore.
fn draw_reserved_version(random: &mut dyn Generator) -> Version {
    let mut bytes = [0u8; 4];
    random.public_random_fill(&mut bytes);
    let mut version = u32::from_be_bytes(bytes);
    version &= !0x0f0f_0f0f;
    version |= 0x0a0a_0a0a;
    version
}

/// One UDP endpoint binding: a (compartment, local address, optional remote
/// address, exclusive-or-shared) tuple (§3 "Binding").
pub struct Binding<D: Datapath, S, C> {
    pub lookup: Arc<Lookup<C>>,
    pub listeners: Registry<S, C>,
    pub stateless_cache: stateless::Cache,
    pub reset_key: stateless::ResetTokenKey,
    pub reserved_version: Version,
    pub local_address: Option<SocketAddr>,
    pub remote_address: Option<SocketAddr>,
    pub exclusive: bool,
    pub is_server: bool,
    datapath: Arc<D>,
    handle: D::Handle,
    ref_count: Mutex<usize>,
    #[cfg(any(test, feature = "testing"))]
    test_hook: Option<Arc<dyn TestHook>>,
    _connection: PhantomData<fn() -> C>,
}

impl<D: Datapath, S: Session, C: ConnectionHandle> Binding<D, S, C> {
    /// Creates a binding's internal state and its datapath handle, rolling
    /// back whatever was already initialized if a later step fails (§4.G
    /// `initialize`).
    ///
    /// `switch_compartment` models a network compartment switch performed
    /// around socket creation: if present, it's called before
    /// `datapath.create` and must return `true` on success.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        datapath: Arc<D>,
        random: &mut dyn Generator,
        exclusive: bool,
        is_server: bool,
        local_address: Option<SocketAddr>,
        remote_address: Option<SocketAddr>,
        switch_compartment: Option<&dyn Fn() -> bool>,
        limits: &crate::limits::Limits,
    ) -> Result<Self, BindingError> {
        if let Some(switch) = switch_compartment {
            if !switch() {
                return Err(BindingError::CompartmentSwitch);
            }
        }

        let handle = datapath
            .create(local_address, remote_address)
            .ok_or(BindingError::DatapathCreation)?;

        let lookup = Arc::new(Lookup::new());
        let reset_key = stateless::ResetTokenKey::random(random);
        let reserved_version = draw_reserved_version(random);

        Ok(Self {
            listeners: Registry::new(lookup.clone()),
            lookup,
            stateless_cache: stateless::Cache::new(limits.max_stateless_ops, limits.stateless_op_expiry),
            reset_key,
            reserved_version,
            local_address,
            remote_address,
            exclusive,
            is_server,
            datapath,
            handle,
            ref_count: Mutex::new(0),
            #[cfg(any(test, feature = "testing"))]
            test_hook: None,
            _connection: PhantomData,
        })
    }

    #[cfg(any(test, feature = "testing"))]
    pub fn with_test_hook(mut self, hook: Arc<dyn TestHook>) -> Self {
        self.test_hook = Some(hook);
        self
    }

    pub fn handle(&self) -> &D::Handle {
        &self.handle
    }

    /// Returns a batch of datagrams to the datapath's buffer pool (the
    /// release list described throughout §4.F).
    pub fn return_datagrams(&self, chain: Vec<crate::datapath::RecvDatagram>) {
        if !chain.is_empty() {
            self.datapath.return_recv_datagrams(chain);
        }
    }

    pub fn add_ref(&self) {
        *self.ref_count.lock() += 1;
    }

    /// Releases a reference. Returns `true` if the count reached zero,
    /// meaning the caller may attempt [`uninitialize`](Self::uninitialize)
    /// once the listener list is also empty.
    pub fn release(&self) -> bool {
        let mut count = self.ref_count.lock();
        *count = count.saturating_sub(1);
        *count == 0
    }

    pub fn ref_count(&self) -> usize {
        *self.ref_count.lock()
    }

    /// Releases a reference, reporting whether the binding may now be
    /// eligible for [`uninitialize`](Self::uninitialize).
    ///
    /// Safe to call from any priority, including the receive path: the
    /// decrement itself never blocks (unlike `uninitialize`, which blocks
    /// draining the datapath). Callers MUST NOT call `uninitialize` directly
    /// in response to a `true` return from the receive path -- tearing the
    /// binding down belongs to the library's passive-priority release path
    /// (§5, §9 "Reference counts on connections and bindings").
    pub fn try_release_now_or_queue_release(&self) -> bool {
        self.release()
    }

    pub fn can_uninitialize(&self) -> bool {
        self.ref_count() == 0 && self.listeners.is_empty()
    }

    /// Tears the binding down (§4.G `uninitialize`). Panics (debug) if the
    /// lifecycle preconditions aren't met -- callers are expected to check
    /// [`can_uninitialize`](Self::can_uninitialize) first, since that check
    /// has to span the library's own bookkeeping as well as this binding.
    pub fn uninitialize(self) {
        debug_assert!(self.can_uninitialize());
        // Blocks until in-flight receive callbacks drain; this is the
        // ordering hinge that makes dropping the lookup table and listener
        // list afterwards safe (§4.G, §5).
        self.datapath.delete(self.handle);
    }

    pub fn send_to(&self, remote: SocketAddr, mtu_hint: usize, fill: impl FnOnce(&mut [u8]) -> usize) {
        #[cfg(any(test, feature = "testing"))]
        if let Some(hook) = &self.test_hook {
            if hook.on_send(self.local_address, remote) {
                return;
            }
        }

        let mut ctx = self.datapath.alloc_send_context(&self.handle, mtu_hint);
        let len = fill(ctx.buffer_mut());
        ctx.truncate(len);
        self.datapath.send_to(&self.handle, remote, ctx);
    }

    pub fn send_from_to(
        &self,
        local: SocketAddr,
        remote: SocketAddr,
        mtu_hint: usize,
        fill: impl FnOnce(&mut [u8]) -> usize,
    ) {
        #[cfg(any(test, feature = "testing"))]
        if let Some(hook) = &self.test_hook {
            if hook.on_send(Some(local), remote) {
                return;
            }
        }

        let mut ctx = self.datapath.alloc_send_context(&self.handle, mtu_hint);
        let len = fill(ctx.buffer_mut());
        ctx.truncate(len);
        self.datapath.send_from_to(&self.handle, local, remote, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        connection::{ConnectionInfo, Operation},
        datapath::RecvDatagram,
        limits::Limits,
        random::testing::Deterministic,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct FakeConn(Arc<AtomicUsize>);
    impl ConnectionHandle for FakeConn {
        type RefReason = ();
        fn add_ref(&self, _reason: ()) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
        fn release(&self, _reason: ()) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
        fn queue_recv_datagrams(&self, _chain: Vec<Vec<u8>>) {}
        fn queue_unreachable(&self, _remote: SocketAddr) {}
        fn queue_operation(&self, _op: Operation) {}
    }

    struct AlwaysMatch;
    impl Session for AlwaysMatch {
        fn alpn_overlaps(&self, _offered: &[&[u8]]) -> bool {
            true
        }
    }

    struct FakeSendContext(Vec<u8>);
    impl SendContext for FakeSendContext {
        fn buffer_mut(&mut self) -> &mut [u8] {
            &mut self.0
        }
        fn truncate(&mut self, len: usize) {
            self.0.truncate(len);
        }
    }

    #[derive(Default)]
    struct FakeDatapath {
        sent: Mutex<Vec<(SocketAddr, Vec<u8>)>>,
    }

    impl Datapath for FakeDatapath {
        type Handle = u32;
        type SendContext = FakeSendContext;

        fn create(&self, _local: Option<SocketAddr>, _remote: Option<SocketAddr>) -> Option<u32> {
            Some(1)
        }
        fn delete(&self, _handle: u32) {}
        fn local_address(&self, _handle: &u32) -> Option<SocketAddr> {
            None
        }
        fn remote_address(&self, _handle: &u32) -> Option<SocketAddr> {
            None
        }
        fn alloc_send_context(&self, _handle: &u32, mtu_hint: usize) -> FakeSendContext {
            FakeSendContext(vec![0u8; mtu_hint])
        }
        fn send_to(&self, _handle: &u32, remote: SocketAddr, ctx: FakeSendContext) {
            self.sent.lock().push((remote, ctx.0));
        }
        fn send_from_to(&self, _handle: &u32, _local: SocketAddr, remote: SocketAddr, ctx: FakeSendContext) {
            self.sent.lock().push((remote, ctx.0));
        }
        fn return_recv_datagrams(&self, _chain: Vec<RecvDatagram>) {}
    }

    fn new_binding() -> Binding<FakeDatapath, AlwaysMatch, FakeConn> {
        let datapath = Arc::new(FakeDatapath::default());
        let mut random = Deterministic::new(1);
        Binding::initialize(
            datapath,
            &mut random,
            false,
            true,
            Some("127.0.0.1:443".parse().unwrap()),
            None,
            None,
            &Limits::default(),
        )
        .unwrap()
    }

    #[test]
    fn starts_with_zero_refs_and_no_listeners() {
        let binding = new_binding();
        assert!(binding.can_uninitialize());
    }

    #[test]
    fn ref_counting_gates_uninitialization() {
        let binding = new_binding();
        binding.add_ref();
        assert!(!binding.can_uninitialize());
        assert!(binding.release());
        assert!(binding.can_uninitialize());
    }

    #[test]
    fn reserved_version_matches_the_greased_pattern() {
        let binding = new_binding();
        assert_eq!(binding.reserved_version & 0x0f0f_0f0f, 0x0a0a_0a0a);
    }

    #[test]
    fn send_to_reaches_the_datapath() {
        let binding = new_binding();
        let remote: SocketAddr = "10.0.0.9:9000".parse().unwrap();
        binding.send_to(remote, 64, |buf| {
            buf[..3].copy_from_slice(b"abc");
            3
        });
        assert_eq!(binding.datapath.sent.lock().len(), 1);
        assert_eq!(binding.datapath.sent.lock()[0].1, b"abc");
    }

    #[test]
    fn registering_first_listener_triggers_partition_promotion() {
        let binding = new_binding();
        let listener = crate::listener::Listener::new(None, crate::address::Family::IpV4, Arc::new(AlwaysMatch));
        assert!(binding.listeners.register(listener, &[b"h3"]).unwrap());

        let info = ConnectionInfo {
            remote_address: "10.0.0.1:1".parse().unwrap(),
            local_address: "127.0.0.1:443".parse().unwrap(),
            family: crate::address::Family::IpV4,
            alpn_offered: &[b"h3"],
            token_validated: false,
        };
        assert!(binding.listeners.find_for_new_connection(&info).is_some());
    }
}
