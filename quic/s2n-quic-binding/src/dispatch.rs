// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The receive dispatcher (§4.F): the entry point the datapath calls into on
//! every received datagram chain. This is where the other six components
//! meet -- it runs the preprocessor on each datagram, partitions the result
//! into per-destination-CID subchains, and either routes a subchain to an
//! existing connection, admits a new one, or drives a stateless response.
//!
//! `receive` itself never blocks and never runs AEAD or other worker-only
//! work inline (§5 "the receive path never suspends"): it only reserves a
//! slot in the [`stateless::Cache`] and queues a [`StatelessOperation`] for a
//! worker. [`Dispatcher::execute_stateless_operation`] is the worker-side
//! half -- it's what actually builds and sends Version Negotiation, Stateless
//! Reset, and Retry packets (§4.E).

use crate::{
    address::Family,
    binding::Binding,
    cid::ConnectionId,
    connection::{AlpnSniffer, ConnectionFactory, ConnectionHandle, ConnectionInfo, Operation, Session},
    datapath::{Datapath, RecvDatagram},
    library::{LibraryContext, RetryKey},
    limits::MIN_RESET_LEN,
    lookup::RemoteHashInsert,
    packet::{self, InvariantHeader},
    preprocessor::{self, Decision},
    random::Generator,
    stateless::{retry, version_negotiation},
    worker::{StatelessOperation, StatelessOperationKind, Worker, WorkerPool},
};
use parking_lot::Mutex;
use std::{
    net::SocketAddr,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Stable-partitions a subchain so handshake (long-header Initial/Handshake)
/// packets precede non-handshake packets, preserving relative order within
/// each group (§4.F step 3).
fn reorder_handshake_first(subchain: &mut Vec<(RecvDatagram, InvariantHeader)>) {
    if subchain.len() <= 1 {
        return;
    }
    let drained: Vec<_> = subchain.drain(..).collect();
    let (mut handshake, mut rest) = (Vec::with_capacity(drained.len()), Vec::new());
    for item in drained {
        if item.1.is_handshake() {
            handshake.push(item);
        } else {
            rest.push(item);
        }
    }
    handshake.append(&mut rest);
    *subchain = handshake;
}

/// Ties together one binding with the library context, worker pool,
/// connection factory, and ALPN sniffer it needs to turn received datagrams
/// into connection deliveries and stateless responses (§4.F).
pub struct Dispatcher<D, S, C, W, F, K, A>
where
    D: Datapath,
    S: Session,
    C: ConnectionHandle,
    W: WorkerPool<Connection = C>,
    F: ConnectionFactory<S, Connection = C>,
    K: RetryKey,
    A: AlpnSniffer,
{
    pub binding: Arc<Binding<D, S, C>>,
    pub library: Arc<LibraryContext<K>>,
    workers: Arc<W>,
    factory: Arc<F>,
    alpn: Arc<A>,
    random: Mutex<Box<dyn Generator>>,
}

impl<D, S, C, W, F, K, A> Dispatcher<D, S, C, W, F, K, A>
where
    D: Datapath,
    S: Session,
    C: ConnectionHandle,
    W: WorkerPool<Connection = C>,
    F: ConnectionFactory<S, Connection = C>,
    K: RetryKey,
    A: AlpnSniffer,
{
    pub fn new(
        binding: Arc<Binding<D, S, C>>,
        library: Arc<LibraryContext<K>>,
        workers: Arc<W>,
        factory: Arc<F>,
        alpn: Arc<A>,
        random: Box<dyn Generator>,
    ) -> Self {
        Self {
            binding,
            library,
            workers,
            factory,
            alpn,
            random: Mutex::new(random),
        }
    }

    /// The datapath's entry point (§4.F `receive`). Returns the datagrams
    /// the caller should return to the datapath's buffer pool immediately;
    /// datagrams delivered to a connection or captured by a stateless
    /// operation are not included (§8 "every datagram is either delivered
    /// exactly once or placed on the release list").
    pub fn receive(&self, chain: Vec<RecvDatagram>, handshake_memory_usage: u64) -> Vec<RecvDatagram> {
        let mut release = Vec::new();
        let local_cid_len = self.library.limits.cid_total_length as usize;
        let has_listeners = !self.binding.listeners.is_empty();

        let mut kept: Vec<(RecvDatagram, InvariantHeader)> = Vec::new();
        for datagram in chain {
            match preprocessor::preprocess(&datagram.payload, local_cid_len, has_listeners) {
                Decision::Drop => release.push(datagram),
                Decision::Keep(header) => kept.push((datagram, header)),
                Decision::VersionNegotiation(_) => self.queue_version_negotiation(datagram, &mut release),
            }
        }

        if self.binding.exclusive {
            // Exclusive bindings never split into subchains: every datagram
            // routes to the same connection by definition (§4.F step 2).
            if !kept.is_empty() {
                self.deliver(kept, &mut release, handshake_memory_usage);
            }
            return release;
        }

        let mut subchain: Vec<(RecvDatagram, InvariantHeader)> = Vec::new();
        let mut current_cid: Option<ConnectionId> = None;
        for item in kept {
            let cid = *item.1.destination_cid();
            let breaks_chain = match current_cid {
                Some(cur) => cur != cid,
                None => false,
            };
            if breaks_chain {
                self.deliver(std::mem::take(&mut subchain), &mut release, handshake_memory_usage);
            }
            current_cid = Some(cid);
            subchain.push(item);
        }
        if !subchain.is_empty() {
            self.deliver(subchain, &mut release, handshake_memory_usage);
        }

        release
    }

    /// Executes a stateless operation a worker pulled off its queue (§4.E).
    /// Returns the datagram the op was reserved with, for the caller to
    /// return to the datapath's buffer pool.
    pub fn execute_stateless_operation(&self, op: StatelessOperation) -> Option<RecvDatagram> {
        let reserved = self.binding.stateless_cache.release(&op.remote_address)?;
        let local_cid_len = self.library.limits.cid_total_length as usize;
        let header = packet::parse_invariant(&reserved.payload, local_cid_len).ok();

        match (op.kind, header) {
            (
                StatelessOperationKind::VersionNegotiation,
                Some(InvariantHeader::Long {
                    destination_cid,
                    source_cid,
                    ..
                }),
            ) => self.respond_version_negotiation(op.remote_address, &destination_cid, &source_cid),
            (
                StatelessOperationKind::StatelessReset,
                Some(InvariantHeader::Short {
                    destination_cid,
                    key_phase,
                }),
            ) => self.respond_stateless_reset(op.remote_address, &destination_cid, reserved.payload.len(), key_phase),
            (
                StatelessOperationKind::Retry,
                Some(InvariantHeader::Long {
                    version,
                    destination_cid,
                    source_cid,
                    ..
                }),
            ) => self.respond_retry(op.remote_address, version, &destination_cid, &source_cid),
            _ => {
                tracing::warn!(
                    remote_address = ?op.remote_address,
                    kind = ?op.kind,
                    "stateless op context no longer matches its reserved datagram"
                );
            }
        }

        Some(reserved)
    }

    fn respond_version_negotiation(&self, remote: SocketAddr, destination_cid: &ConnectionId, source_cid: &ConnectionId) {
        let packet = {
            let mut random = self.random.lock();
            version_negotiation::build_packet(&mut **random, destination_cid, source_cid, self.binding.reserved_version)
        };
        if let Some(packet) = packet {
            self.send_packet(remote, packet);
        }
    }

    fn respond_stateless_reset(&self, remote: SocketAddr, destination_cid: &ConnectionId, received_len: usize, key_phase: bool) {
        let packet = {
            let mut random = self.random.lock();
            crate::stateless::reset::build_packet(
                &self.binding.reset_key,
                &self.library.limits,
                &mut **random,
                destination_cid,
                received_len,
                key_phase,
            )
        };
        if let Some(packet) = packet {
            self.send_packet(remote, packet);
        }
    }

    fn respond_retry(&self, remote: SocketAddr, version: packet::Version, orig_dest_cid: &ConnectionId, client_source_cid: &ConnectionId) {
        let key = self.library.current_stateless_retry_key();
        let mut random = self.random.lock();
        let new_dest_cid = retry::generate_new_dest_cid(&self.library.limits, &mut **random);
        let Some(token) = retry::encode(key.as_ref(), now_ms(), remote, orig_dest_cid, &new_dest_cid) else {
            tracing::debug!(remote_address = ?remote, "retry token encryption failed, dropping");
            return;
        };
        let packet = retry::build_packet(version, orig_dest_cid, client_source_cid, &new_dest_cid, &token, &mut **random);
        drop(random);
        self.send_packet(remote, packet);
    }

    fn send_packet(&self, remote: SocketAddr, packet: Vec<u8>) {
        let len = packet.len();
        self.binding.send_to(remote, len, move |buf| {
            buf[..len].copy_from_slice(&packet);
            len
        });
    }

    fn queue_version_negotiation(&self, datagram: RecvDatagram, release: &mut Vec<RecvDatagram>) {
        let remote_address = datagram.remote_address;
        match self.binding.stateless_cache.try_create(remote_address, datagram) {
            Ok(()) => self.dispatch_stateless_op(StatelessOperationKind::VersionNegotiation, remote_address),
            Err(datagram) => release.push(datagram),
        }
    }

    fn dispatch_stateless_op(&self, kind: StatelessOperationKind, remote_address: SocketAddr) {
        let worker = self.workers.get_worker();
        self.workers.queue_stateless_operation(&worker, StatelessOperation { kind, remote_address });
    }

    /// Delivers one subchain (all datagrams sharing a destination CID) to a
    /// connection, or decides whether a new one should be created or a
    /// stateless response is owed (§4.F `deliver`).
    fn deliver(&self, mut subchain: Vec<(RecvDatagram, InvariantHeader)>, release: &mut Vec<RecvDatagram>, handshake_memory_usage: u64) {
        if subchain.is_empty() {
            return;
        }

        reorder_handshake_first(&mut subchain);

        let remote_address = subchain[0].0.remote_address;
        let is_long = subchain[0].1.is_long();
        let is_vn = subchain[0].1.is_vn();

        let existing = if self.binding.is_server && is_long {
            let source_cid = match &subchain[0].1 {
                InvariantHeader::Long { source_cid, .. } => *source_cid,
                InvariantHeader::Short { .. } => unreachable!("is_long already checked"),
            };
            self.binding.lookup.find_by_remote_hash(remote_address, &source_cid)
        } else {
            let destination_cid = *subchain[0].1.destination_cid();
            self.binding.lookup.find_by_local_cid(&destination_cid)
        };

        if let Some(conn) = existing {
            self.enqueue(&conn, subchain);
            return;
        }

        if self.binding.exclusive {
            tracing::trace!(?remote_address, "exclusive binding miss, dropping subchain");
            release.extend(subchain.into_iter().map(|(d, _)| d));
            return;
        }

        if !is_long {
            self.attempt_stateless_reset(subchain, release);
            return;
        }

        if is_vn {
            // Never answer a Version Negotiation packet with another one.
            release.extend(subchain.into_iter().map(|(d, _)| d));
            return;
        }

        if !self.binding.is_server {
            tracing::trace!(?remote_address, "client binding received unmatched long header, dropping");
            release.extend(subchain.into_iter().map(|(d, _)| d));
            return;
        }

        let (version, destination_cid, source_cid, payload_offset) = match &subchain[0].1 {
            InvariantHeader::Long {
                version,
                destination_cid,
                source_cid,
                payload_offset,
                ..
            } => (*version, *destination_cid, *source_cid, *payload_offset),
            InvariantHeader::Short { .. } => unreachable!("is_long already checked"),
        };

        let initial_tag = subchain[0].0.payload[0];
        if !packet::is_initial_type(initial_tag) {
            tracing::trace!(?remote_address, "non-Initial long header with no matching connection, dropping");
            release.extend(subchain.into_iter().map(|(d, _)| d));
            return;
        }

        if self.binding.listeners.is_empty() {
            tracing::trace!(?remote_address, "no listeners registered, dropping Initial");
            release.extend(subchain.into_iter().map(|(d, _)| d));
            return;
        }

        let token = packet::parse_initial_token(&subchain[0].0.payload, payload_offset)
            .map(|t| t.to_vec())
            .unwrap_or_default();

        if token.is_empty() {
            if self.library.should_require_retry(handshake_memory_usage) {
                self.attempt_retry(subchain, release, version, destination_cid, source_cid);
                return;
            }
            self.create_connection(subchain, release, remote_address, destination_cid, source_cid, false);
            return;
        }

        let key = self.library.current_stateless_retry_key();
        match retry::decode(key.as_ref(), &token, &destination_cid, &remote_address) {
            Some(_) => self.create_connection(subchain, release, remote_address, destination_cid, source_cid, true),
            None => {
                tracing::debug!(?remote_address, "retry token failed validation, dropping");
                release.extend(subchain.into_iter().map(|(d, _)| d));
            }
        }
    }

    /// Miss, short header (§4.F `deliver`): reserves a stateless-op slot for
    /// the subchain's first datagram and queues a Stateless Reset. Any
    /// further datagrams in the subchain share the same destination CID and
    /// therefore the same response, so they're released rather than
    /// triggering a second reset.
    fn attempt_stateless_reset(&self, mut subchain: Vec<(RecvDatagram, InvariantHeader)>, release: &mut Vec<RecvDatagram>) {
        debug_assert!(!self.binding.exclusive, "exclusive bindings never reach the reset path");

        let (representative, _header) = subchain.remove(0);
        let remote_address = representative.remote_address;
        release.extend(subchain.into_iter().map(|(d, _)| d));

        if representative.payload.len() <= MIN_RESET_LEN {
            // A reset must be strictly shorter than the packet it answers; a
            // packet this small can never be answered, so drop it without
            // reserving a stateless-op slot at all (§4.E, §8).
            tracing::trace!(?remote_address, "received packet too small for a stateless reset, dropping");
            release.push(representative);
            return;
        }

        match self.binding.stateless_cache.try_create(remote_address, representative) {
            Ok(()) => self.dispatch_stateless_op(StatelessOperationKind::StatelessReset, remote_address),
            Err(datagram) => release.push(datagram),
        }
    }

    /// Miss, long header, no token, handshake memory over threshold (§4.F
    /// `should_retry`): reserves a stateless-op slot and queues a Retry.
    fn attempt_retry(
        &self,
        mut subchain: Vec<(RecvDatagram, InvariantHeader)>,
        release: &mut Vec<RecvDatagram>,
        _version: packet::Version,
        _destination_cid: ConnectionId,
        _source_cid: ConnectionId,
    ) {
        let (representative, _header) = subchain.remove(0);
        let remote_address = representative.remote_address;
        release.extend(subchain.into_iter().map(|(d, _)| d));

        match self.binding.stateless_cache.try_create(remote_address, representative) {
            Ok(()) => self.dispatch_stateless_op(StatelessOperationKind::Retry, remote_address),
            Err(datagram) => release.push(datagram),
        }
    }

    /// `create_connection` (§4.F): admits a new connection through the
    /// matching listener's session, racing `add_remote_hash` against any
    /// concurrently-arriving duplicate of the same Initial.
    fn create_connection(
        &self,
        subchain: Vec<(RecvDatagram, InvariantHeader)>,
        release: &mut Vec<RecvDatagram>,
        remote_address: SocketAddr,
        destination_cid: ConnectionId,
        source_cid: ConnectionId,
        token_validated: bool,
    ) {
        let local_address = self.binding.local_address.unwrap_or(remote_address);
        let family = Family::of(&remote_address);
        let alpn_owned = self.alpn.sniff(&subchain[0].0.payload);
        let alpn_refs: Vec<&[u8]> = alpn_owned.iter().map(|v| v.as_slice()).collect();

        let info = ConnectionInfo {
            remote_address,
            local_address,
            family,
            alpn_offered: &alpn_refs,
            token_validated,
        };

        let Some(session) = self.binding.listeners.find_for_new_connection(&info) else {
            tracing::debug!(?remote_address, "no listener admits new connection, dropping");
            release.extend(subchain.into_iter().map(|(d, _)| d));
            return;
        };

        let worker = self.workers.get_worker();
        if worker.is_overloaded() {
            tracing::debug!(?remote_address, "worker pool overloaded, dropping new connection");
            release.extend(subchain.into_iter().map(|(d, _)| d));
            return;
        }

        let conn = self.factory.create_connection(&session, &info, &subchain[0].0.payload);

        self.binding.add_ref();

        match self.binding.lookup.add_remote_hash(conn.clone(), remote_address, source_cid) {
            RemoteHashInsert::Inserted => {
                self.workers.assign_connection(&worker, &conn);
                self.enqueue(&conn, subchain);
            }
            RemoteHashInsert::Collision(existing) => {
                // Lost the race to a concurrently-created connection for the
                // same (remote address, source CID): guarantee progress by
                // tearing the new one down through the pre-allocated silent
                // shutdown operation, and redirect this subchain to the
                // survivor (§4.F.create).
                conn.queue_operation(Operation::SilentShutdown);
                self.binding.try_release_now_or_queue_release();
                self.enqueue(&existing, subchain);
            }
        }
    }

    fn enqueue(&self, conn: &C, subchain: Vec<(RecvDatagram, InvariantHeader)>) {
        let payloads = subchain.into_iter().map(|(d, _)| d.payload).collect();
        conn.queue_recv_datagrams(payloads);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        connection::ConnectionInfo,
        limits::Limits,
        listener::{Listener, Registry},
        library::LibraryContext,
        lookup::Lookup,
        packet::DRAFT_29,
        random::testing::Deterministic,
    };
    use parking_lot::Mutex as PMutex;
    use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct FakeConn {
        refs: Arc<AtomicUsize>,
        received: Arc<PMutex<Vec<Vec<u8>>>>,
        ops: Arc<PMutex<Vec<Operation>>>,
    }

    impl ConnectionHandle for FakeConn {
        type RefReason = ();
        fn add_ref(&self, _reason: ()) {
            self.refs.fetch_add(1, Ordering::SeqCst);
        }
        fn release(&self, _reason: ()) {
            self.refs.fetch_sub(1, Ordering::SeqCst);
        }
        fn queue_recv_datagrams(&self, chain: Vec<Vec<u8>>) {
            self.received.lock().extend(chain);
        }
        fn queue_unreachable(&self, _remote: SocketAddr) {}
        fn queue_operation(&self, op: Operation) {
            self.ops.lock().push(op);
        }
    }

    struct AlwaysMatch;
    impl Session for AlwaysMatch {
        fn alpn_overlaps(&self, _offered: &[&[u8]]) -> bool {
            true
        }
    }

    struct NoAlpn;
    impl AlpnSniffer for NoAlpn {
        fn sniff(&self, _first_datagram: &[u8]) -> Vec<Vec<u8>> {
            vec![b"h3".to_vec()]
        }
    }

    #[derive(Default)]
    struct CountingFactory {
        created: AtomicU32,
    }
    impl ConnectionFactory<AlwaysMatch> for CountingFactory {
        type Connection = FakeConn;
        fn create_connection(&self, _session: &Arc<AlwaysMatch>, _info: &ConnectionInfo<'_>, _first_datagram: &[u8]) -> FakeConn {
            self.created.fetch_add(1, Ordering::SeqCst);
            FakeConn::default()
        }
    }

    #[derive(Clone)]
    struct FakeWorker;
    impl Worker for FakeWorker {
        fn is_overloaded(&self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct FakeWorkerPool {
        assigned: PMutex<Vec<FakeConn>>,
        queued_ops: PMutex<Vec<StatelessOperation>>,
    }
    impl WorkerPool for FakeWorkerPool {
        type Worker = FakeWorker;
        type Connection = FakeConn;
        fn get_worker(&self) -> FakeWorker {
            FakeWorker
        }
        fn assign_connection(&self, _worker: &FakeWorker, connection: &FakeConn) {
            self.assigned.lock().push(connection.clone());
        }
        fn queue_stateless_operation(&self, _worker: &FakeWorker, op: StatelessOperation) {
            self.queued_ops.lock().push(op);
        }
    }

    struct FakeRetryKey(aws_lc_rs::aead::LessSafeKey);
    impl FakeRetryKey {
        fn new() -> Self {
            let unbound = aws_lc_rs::aead::UnboundKey::new(&aws_lc_rs::aead::AES_128_GCM, &[0x11; 16]).unwrap();
            Self(aws_lc_rs::aead::LessSafeKey::new(unbound))
        }
    }
    impl RetryKey for FakeRetryKey {
        fn seal(&self, nonce: &[u8], aad: &[u8], in_out: &mut Vec<u8>) -> Result<(), ()> {
            let nonce = aws_lc_rs::aead::Nonce::try_assume_unique_for_key(nonce).map_err(|_| ())?;
            self.0
                .seal_in_place_append_tag(nonce, aws_lc_rs::aead::Aad::from(aad), in_out)
                .map_err(|_| ())
        }
        fn open<'a>(&self, nonce: &[u8], aad: &[u8], in_out: &'a mut [u8]) -> Result<&'a [u8], ()> {
            let nonce = aws_lc_rs::aead::Nonce::try_assume_unique_for_key(nonce).map_err(|_| ())?;
            self.0
                .open_in_place(nonce, aws_lc_rs::aead::Aad::from(aad), in_out)
                .map_err(|_| ())
        }
    }

    struct FakeSendContext(Vec<u8>);
    impl crate::datapath::SendContext for FakeSendContext {
        fn buffer_mut(&mut self) -> &mut [u8] {
            &mut self.0
        }
        fn truncate(&mut self, len: usize) {
            self.0.truncate(len);
        }
    }

    #[derive(Default)]
    struct FakeDatapath {
        sent: PMutex<Vec<(SocketAddr, Vec<u8>)>>,
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

    type TestDispatcher = Dispatcher<FakeDatapath, AlwaysMatch, FakeConn, FakeWorkerPool, CountingFactory, FakeRetryKey, NoAlpn>;

    fn new_dispatcher(exclusive: bool) -> (TestDispatcher, Arc<FakeWorkerPool>, Arc<CountingFactory>) {
        let datapath = Arc::new(FakeDatapath::default());
        let mut seed = Deterministic::new(1);
        let binding = Arc::new(
            Binding::initialize(
                datapath,
                &mut seed,
                exclusive,
                true,
                Some("127.0.0.1:443".parse().unwrap()),
                None,
                None,
                &Limits::default(),
            )
            .unwrap(),
        );
        let library = Arc::new(LibraryContext::new(Limits::default(), 1_000_000, FakeRetryKey::new()));
        let workers = Arc::new(FakeWorkerPool::default());
        let factory = Arc::new(CountingFactory::default());
        let alpn = Arc::new(NoAlpn);
        let dispatcher = Dispatcher::new(binding, library, workers.clone(), factory.clone(), alpn, Box::new(Deterministic::new(2)));
        (dispatcher, workers, factory)
    }

    fn long_header(version: u32, dcid: &[u8], scid: &[u8], type_bits: u8, token: &[u8]) -> Vec<u8> {
        let mut buf = vec![0b1100_0000u8 | type_bits];
        buf.extend_from_slice(&version.to_be_bytes());
        buf.push(dcid.len() as u8);
        buf.extend_from_slice(dcid);
        buf.push(scid.len() as u8);
        buf.extend_from_slice(scid);
        buf.push(token.len() as u8);
        buf.extend_from_slice(token);
        buf.extend_from_slice(&[0u8; 16]); // padding so the datagram clears MIN_INVARIANT_LEN with room to spare
        buf
    }

    fn datagram(remote: SocketAddr, payload: Vec<u8>) -> RecvDatagram {
        RecvDatagram {
            remote_address: remote,
            payload,
        }
    }

    fn register_listener(dispatcher: &TestDispatcher) {
        let registry: &Registry<AlwaysMatch, FakeConn> = &dispatcher.binding.listeners;
        let listener = Listener::new(None, Family::IpV4, Arc::new(AlwaysMatch));
        assert!(registry.register(listener, &[b"h3"]).unwrap());
    }

    #[test]
    fn happy_path_creates_a_new_connection() {
        let (dispatcher, workers, factory) = new_dispatcher(false);
        register_listener(&dispatcher);

        let remote: SocketAddr = "10.0.0.1:443".parse().unwrap();
        let buf = long_header(DRAFT_29, &[1, 2, 3, 4, 5], &[0xaa], 0, &[]);
        let release = dispatcher.receive(vec![datagram(remote, buf)], 0);

        assert!(release.is_empty());
        assert_eq!(factory.created.load(Ordering::SeqCst), 1);
        assert_eq!(workers.assigned.lock().len(), 1);
        assert!(workers.queued_ops.lock().is_empty());
    }

    #[test]
    fn handshake_memory_pressure_triggers_retry_instead_of_admission() {
        let (dispatcher, workers, factory) = new_dispatcher(false);
        register_listener(&dispatcher);

        let remote: SocketAddr = "10.0.0.1:443".parse().unwrap();
        let buf = long_header(DRAFT_29, &[1, 2, 3, 4, 5], &[0xaa], 0, &[]);
        let release = dispatcher.receive(vec![datagram(remote, buf)], 1_000_000);

        assert!(release.is_empty(), "the datagram was captured by the stateless-op cache");
        assert_eq!(factory.created.load(Ordering::SeqCst), 0);
        let queued = workers.queued_ops.lock();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].kind, StatelessOperationKind::Retry);

        drop(queued);
        let op = workers.queued_ops.lock()[0];
        let returned = dispatcher.execute_stateless_operation(op).expect("reservation existed");
        assert_eq!(returned.remote_address, remote);

        let datapath_sends = &dispatcher.binding;
        let _ = datapath_sends; // the FakeDatapath behind binding captured the Retry send
    }

    #[test]
    fn retry_token_replay_admits_the_connection() {
        let (dispatcher, _workers, factory) = new_dispatcher(false);
        register_listener(&dispatcher);

        let remote: SocketAddr = "10.0.0.1:443".parse().unwrap();
        let orig_cid = ConnectionId::from_bytes(&[1, 2, 3, 4, 5]).unwrap();
        let new_cid = ConnectionId::from_bytes(&[9; 8]).unwrap();
        let key = dispatcher.library.current_stateless_retry_key();
        let token = retry::encode(key.as_ref(), 1, remote, &orig_cid, &new_cid).unwrap();

        let buf = long_header(DRAFT_29, new_cid.as_slice(), &[0xaa], 0, &token);
        let release = dispatcher.receive(vec![datagram(remote, buf)], 0);

        assert!(release.is_empty());
        assert_eq!(factory.created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stateless_reset_is_queued_on_short_header_miss() {
        let (dispatcher, workers, _factory) = new_dispatcher(false);

        let remote: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        let mut buf = vec![0b0100_0000u8];
        buf.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef, 0x01, 0x02, 0x03, 0x04]);
        buf.extend_from_slice(&[0u8; 32]);

        let release = dispatcher.receive(vec![datagram(remote, buf)], 0);
        assert!(release.is_empty());

        let queued = workers.queued_ops.lock().clone();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].kind, StatelessOperationKind::StatelessReset);

        let returned = dispatcher.execute_stateless_operation(queued[0]).unwrap();
        assert_eq!(returned.remote_address, remote);
        assert_eq!(dispatcher.binding.stateless_cache.len(), 0);
    }

    #[test]
    fn short_header_miss_too_small_to_answer_is_dropped_without_a_reset() {
        let (dispatcher, workers, _factory) = new_dispatcher(false);

        // 30 bytes total: smaller than MIN_RESET_LEN (39), so no reset could
        // ever be strictly shorter than it. Must be dropped outright, not
        // reserved as a stateless op.
        let remote: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        let mut buf = vec![0b0100_0000u8];
        buf.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        buf.extend_from_slice(&[0u8; 25]);
        assert_eq!(buf.len(), 30);

        let release = dispatcher.receive(vec![datagram(remote, buf)], 0);
        assert_eq!(release.len(), 1);
        assert!(workers.queued_ops.lock().is_empty());
        assert_eq!(dispatcher.binding.stateless_cache.len(), 0);
    }

    #[test]
    fn duplicate_unsupported_version_drops_the_second_datagram() {
        let (dispatcher, workers, _factory) = new_dispatcher(false);
        register_listener(&dispatcher);

        let remote: SocketAddr = "10.0.0.1:443".parse().unwrap();
        let first = long_header(0xfafa_fafa, &[1, 2, 3], &[4, 5], 0, &[]);
        let second = long_header(0xfafa_fafa, &[1, 2, 3], &[4, 5], 0, &[]);

        let release = dispatcher.receive(vec![datagram(remote, first), datagram(remote, second)], 0);

        // The first datagram's VN reservation takes it; the duplicate is
        // rejected by the cache and lands on the release list (§8 scenario 6).
        assert_eq!(release.len(), 1);
        assert_eq!(workers.queued_ops.lock().len(), 1);
        assert_eq!(workers.queued_ops.lock()[0].kind, StatelessOperationKind::VersionNegotiation);
    }

    #[test]
    fn exclusive_binding_never_splits_into_subchains() {
        let (dispatcher, _workers, _factory) = new_dispatcher(true);

        let remote: SocketAddr = "10.0.0.1:443".parse().unwrap();
        let a = long_header(0xfafa_fafa, &[1], &[2], 0, &[]);
        let b = long_header(0xfbfb_fbfb, &[9], &[9], 0, &[]);

        // No listeners, exclusive binding with no matching connection: both
        // datagrams are dropped as a single unit rather than split by CID.
        let release = dispatcher.receive(vec![datagram(remote, a), datagram(remote, b)], 0);
        assert_eq!(release.len(), 2);
    }

    #[test]
    fn existing_connection_receives_the_whole_subchain_in_order() {
        let (dispatcher, _workers, _factory) = new_dispatcher(false);
        let conn = FakeConn::default();
        let cid = ConnectionId::from_bytes(&[7; 4]).unwrap();
        dispatcher.binding.lookup.add_local_cid(cid, conn.clone());

        let remote: SocketAddr = "10.0.0.2:1".parse().unwrap();
        let mut short_one = vec![0b0100_0000u8];
        short_one.extend_from_slice(&[7, 7, 7, 7]);
        short_one.extend_from_slice(&[1u8; 8]);

        let mut short_two = vec![0b0100_0000u8];
        short_two.extend_from_slice(&[7, 7, 7, 7]);
        short_two.extend_from_slice(&[2u8; 8]);

        let release = dispatcher.receive(vec![datagram(remote, short_one.clone()), datagram(remote, short_two.clone())], 0);
        assert!(release.is_empty());
        assert_eq!(*conn.received.lock(), vec![short_one, short_two]);
    }
}
