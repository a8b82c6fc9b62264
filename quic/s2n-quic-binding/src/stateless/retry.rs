// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Retry token encryption/decryption and packet construction (§4.E).
//!
//! The AEAD plumbing mirrors `s2n-quic-dc`'s `crypto::awslc` module:
//! `aws-lc-rs`'s `LessSafeKey` driven directly with an explicit nonce, rather
//! than introducing this crate's own key-schedule abstraction for a single
//! call site.

use crate::{
    cid::ConnectionId,
    library::RetryKey,
    limits::{Limits, RETRY_IV_LEN, RETRY_TAG_LEN},
};
use aws_lc_rs::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_128_GCM};
use std::net::{IpAddr, SocketAddr};

/// The production [`RetryKey`], backed by AES-128-GCM.
pub struct AwsLcRetryKey(LessSafeKey);

impl AwsLcRetryKey {
    pub fn new(key_bytes: &[u8]) -> Self {
        let unbound = UnboundKey::new(&AES_128_GCM, key_bytes)
            .expect("retry key must be exactly 16 bytes for AES-128-GCM");
        Self(LessSafeKey::new(unbound))
    }
}

impl RetryKey for AwsLcRetryKey {
    fn seal(&self, nonce: &[u8], aad: &[u8], in_out: &mut Vec<u8>) -> Result<(), ()> {
        let nonce = Nonce::try_assume_unique_for_key(nonce).map_err(|_| ())?;
        self.0
            .seal_in_place_append_tag(nonce, Aad::from(aad), in_out)
            .map_err(|_| ())
    }

    fn open<'a>(&self, nonce: &[u8], aad: &[u8], in_out: &'a mut [u8]) -> Result<&'a [u8], ()> {
        let nonce = Nonce::try_assume_unique_for_key(nonce).map_err(|_| ())?;
        self.0
            .open_in_place(nonce, Aad::from(aad), in_out)
            .map_err(|_| ())
    }
}

/// Folds `new_dest_cid` into a `RETRY_IV_LEN`-byte nonce (§4.E "Nonce"): XOR
/// folding when the CID is at least as long as the IV, otherwise the CID is
/// left-padded with zeros. The zero-padding branch weakens nonce diversity
/// when many Retries reuse a short CID prefix; see [`Limits::with_cid_total_length`]
/// for the corresponding configuration-time warning.
fn derive_nonce(new_dest_cid: &ConnectionId) -> [u8; RETRY_IV_LEN] {
    let bytes = new_dest_cid.as_slice();
    let mut nonce = [0u8; RETRY_IV_LEN];
    if bytes.len() >= RETRY_IV_LEN {
        for (i, b) in bytes.iter().enumerate() {
            nonce[i % RETRY_IV_LEN] ^= *b;
        }
    } else {
        nonce[RETRY_IV_LEN - bytes.len()..].copy_from_slice(bytes);
    }
    nonce
}

fn encode_address(addr: &SocketAddr, out: &mut Vec<u8>) {
    match addr.ip() {
        IpAddr::V4(ip) => {
            out.push(4);
            out.extend_from_slice(&ip.octets());
        }
        IpAddr::V6(ip) => {
            out.push(6);
            out.extend_from_slice(&ip.octets());
        }
    }
    out.extend_from_slice(&addr.port().to_be_bytes());
}

fn decode_address(bytes: &[u8]) -> Option<(SocketAddr, usize)> {
    let tag = *bytes.first()?;
    let (ip_len, consumed) = match tag {
        4 => (4, 1 + 4 + 2),
        6 => (16, 1 + 16 + 2),
        _ => return None,
    };
    if bytes.len() < consumed {
        return None;
    }
    let ip_bytes = &bytes[1..1 + ip_len];
    let port = u16::from_be_bytes(bytes[1 + ip_len..consumed].try_into().ok()?);
    let ip: IpAddr = if ip_len == 4 {
        let octets: [u8; 4] = ip_bytes.try_into().ok()?;
        IpAddr::from(octets)
    } else {
        let octets: [u8; 16] = ip_bytes.try_into().ok()?;
        IpAddr::from(octets)
    };
    Some((SocketAddr::new(ip, port), consumed))
}

/// Encrypts a Retry token for `orig_dest_cid`/`remote_address`, to be
/// returned to the peer alongside `new_dest_cid` (§3 "Retry token", §4.E).
///
/// Layout: `{8-byte issue_timestamp_ms (authenticated, not encrypted)} ||
/// AEAD({address} || {orig_dest_cid_len} || {orig_dest_cid}) || {16-byte tag}`.
pub fn encode(
    key: &dyn RetryKey,
    issue_timestamp_ms: u64,
    remote_address: SocketAddr,
    orig_dest_cid: &ConnectionId,
    new_dest_cid: &ConnectionId,
) -> Option<Vec<u8>> {
    let aad = issue_timestamp_ms.to_be_bytes();

    let mut plaintext = Vec::with_capacity(32);
    encode_address(&remote_address, &mut plaintext);
    plaintext.push(orig_dest_cid.len() as u8);
    plaintext.extend_from_slice(orig_dest_cid.as_slice());

    let nonce = derive_nonce(new_dest_cid);
    key.seal(&nonce, &aad, &mut plaintext).ok()?;

    let mut token = Vec::with_capacity(8 + plaintext.len());
    token.extend_from_slice(&aad);
    token.extend_from_slice(&plaintext);
    Some(token)
}

/// Decrypts and validates a Retry token, rejecting it unless the embedded
/// remote address matches `expected_remote_address` (§4.F `should_retry`
/// step 4, §8 boundary behaviors).
pub fn decode(
    key: &dyn RetryKey,
    token: &[u8],
    new_dest_cid: &ConnectionId,
    expected_remote_address: &SocketAddr,
) -> Option<(u64, ConnectionId)> {
    if token.len() < 8 + RETRY_TAG_LEN {
        return None;
    }
    let (aad, ciphertext) = token.split_at(8);
    let issue_timestamp_ms = u64::from_be_bytes(aad.try_into().ok()?);

    let nonce = derive_nonce(new_dest_cid);
    let mut buf = ciphertext.to_vec();
    let plaintext = key.open(&nonce, aad, &mut buf).ok()?;

    let (address, consumed) = decode_address(plaintext)?;
    if &address != expected_remote_address {
        return None;
    }

    let cid_len = *plaintext.get(consumed)? as usize;
    let cid_bytes = plaintext.get(consumed + 1..consumed + 1 + cid_len)?;
    if consumed + 1 + cid_len != plaintext.len() {
        return None;
    }
    let orig_dest_cid = ConnectionId::from_bytes(cid_bytes)?;

    Some((issue_timestamp_ms, orig_dest_cid))
}

/// RFC 9001 §5.8's fixed Retry Integrity key/nonce (the v1 constants; reused
/// here across every handled draft version rather than tracking each
/// draft's distinct pair, since this binding's Retry packets are only ever
/// exchanged between two instances of this same codebase).
const INTEGRITY_KEY: [u8; 16] = [
    0xbe, 0x0c, 0x69, 0x0b, 0x9f, 0x66, 0x57, 0x5a, 0x1d, 0x76, 0x6b, 0x54, 0xe3, 0x68, 0xc8, 0x4e,
];
const INTEGRITY_NONCE: [u8; 12] = [
    0x46, 0x15, 0x99, 0xd3, 0x5d, 0x63, 0x2b, 0xf2, 0x23, 0x98, 0x25, 0xbb,
];

/// Encodes a Retry packet (§4.E "Encode the Retry packet"): header, the
/// client's echoed source CID, our newly chosen destination CID, the
/// encrypted token, and the 16-byte Retry Integrity Tag.
pub fn build_packet(
    version: crate::packet::Version,
    orig_dest_cid: &ConnectionId,
    client_source_cid: &ConnectionId,
    new_dest_cid: &ConnectionId,
    token: &[u8],
    random: &mut dyn crate::random::Generator,
) -> Vec<u8> {
    let mut unused = [0u8; 1];
    random.public_random_fill(&mut unused);
    let tag_byte = 0b1111_0000 | (unused[0] & 0b0000_1111);

    let mut packet = vec![tag_byte];
    packet.extend_from_slice(&version.to_be_bytes());
    packet.push(client_source_cid.len() as u8);
    packet.extend_from_slice(client_source_cid.as_slice());
    packet.push(new_dest_cid.len() as u8);
    packet.extend_from_slice(new_dest_cid.as_slice());
    packet.extend_from_slice(token);

    let key = LessSafeKey::new(UnboundKey::new(&AES_128_GCM, &INTEGRITY_KEY).unwrap());
    let nonce = Nonce::try_assume_unique_for_key(&INTEGRITY_NONCE).unwrap();

    let mut aad = Vec::with_capacity(1 + orig_dest_cid.len() + packet.len());
    aad.push(orig_dest_cid.len() as u8);
    aad.extend_from_slice(orig_dest_cid.as_slice());
    aad.extend_from_slice(&packet);

    let mut tag = Vec::new();
    key.seal_in_place_append_tag(nonce, Aad::from(aad), &mut tag)
        .expect("sealing an empty plaintext cannot fail");

    packet.extend_from_slice(&tag);
    packet
}

/// Draws a fresh destination CID of `limits.cid_total_length` random bytes
/// for the peer to echo back in its retried Initial (§4.E "Allocate a
/// NEW_DEST_CID").
pub fn generate_new_dest_cid(
    limits: &Limits,
    random: &mut dyn crate::random::Generator,
) -> ConnectionId {
    let mut bytes = [0u8; crate::cid::MAX_CID_LEN];
    let len = (limits.cid_total_length as usize).min(crate::cid::MAX_CID_LEN);
    random.public_random_fill(&mut bytes[..len]);
    ConnectionId::from_bytes(&bytes[..len]).expect("len is bounded by MAX_CID_LEN")
}
