// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Stateless Reset token derivation and packet construction (§4.E).
//!
//! Grounded on the HMAC-over-a-per-binding-secret pattern used for
//! `UnknownPathSecret` stateless resets elsewhere in this codebase: a signer
//! is built once from a random secret and reused, under its own lock, for
//! every token the binding ever derives.

use crate::{
    cid::ConnectionId,
    limits::{Limits, MIN_RESET_LEN, RESET_TOKEN_LEN},
    random::Generator,
};
use aws_lc_rs::hmac;
use parking_lot::Mutex;

/// Derives Stateless Reset tokens from a fixed, per-binding secret (`HashSalt`
/// in §3, captured at binding creation and never rotated).
///
/// `hmac::Key` is `Send + Sync` and signing only takes `&self`, so the mutex
/// isn't protecting a non-reentrant hash context -- it's kept here anyway as
/// a single, explicit lock-ordering position (§5's reset-token lock) so the
/// rest of the crate can reason about lock order without checking this
/// module's internals.
pub struct TokenKey {
    key: Mutex<hmac::Key>,
}

impl TokenKey {
    /// Builds a token key from a freshly drawn 160-bit salt.
    pub fn random(random: &mut dyn Generator) -> Self {
        let mut salt = [0u8; 20];
        random.private_random_fill(&mut salt);
        Self::from_salt(&salt)
    }

    pub fn from_salt(salt: &[u8]) -> Self {
        Self {
            key: Mutex::new(hmac::Key::new(hmac::HMAC_SHA256, salt)),
        }
    }

    /// `token = first 16 bytes of HMAC-SHA-256(HashSalt, cid_bytes)` (§4.E).
    pub fn derive(&self, destination_cid: &ConnectionId) -> [u8; RESET_TOKEN_LEN] {
        let tag = hmac::sign(&self.key.lock(), destination_cid.as_slice());
        let mut token = [0u8; RESET_TOKEN_LEN];
        token.copy_from_slice(&tag.as_ref()[..RESET_TOKEN_LEN]);
        token
    }
}

/// Builds a Stateless Reset datagram responding to a received packet of
/// `received_len` bytes whose destination CID was `destination_cid`.
///
/// Length = `max(MIN_RESET_LEN, min(received_len - 1, RECOMMENDED + 3 random
/// bits))` (§4.E, boundary behavior in §8). The leading `len - 16` bytes are
/// random; the trailing 16 are the derived token. The short-header fixed bit
/// is set and `key_phase` is copied from the received packet to blend with
/// real traffic.
pub fn build_packet(
    key: &TokenKey,
    limits: &Limits,
    random: &mut dyn Generator,
    destination_cid: &ConnectionId,
    received_len: usize,
    key_phase: bool,
) -> Option<Vec<u8>> {
    if received_len <= MIN_RESET_LEN {
        // The reset must be strictly shorter than the packet it answers
        // (§4.E, §8); a packet this small can't be answered without either
        // growing past it or falling under the token length. Matches the
        // original's `BufferLength <= QUIC_MIN_STATELESS_RESET_PACKET_LENGTH`
        // drop in `QuicBindingQueueStatelessReset`.
        return None;
    }

    let jittered = limits.recommended_reset_len(random);
    let len = jittered
        .min(received_len.saturating_sub(1))
        .max(MIN_RESET_LEN);

    if len < RESET_TOKEN_LEN {
        // Can't fit a token; the caller's `received_len` was too small to
        // safely respond to without exceeding it (§8: reset must be strictly
        // shorter than the packet it answers).
        return None;
    }

    let mut packet = vec![0u8; len];
    let (prefix, suffix) = packet.split_at_mut(len - RESET_TOKEN_LEN);
    random.public_random_fill(prefix);

    prefix[0] &= 0b0011_1111; // clear header-form and fixed bits before setting ours
    prefix[0] |= 0b0100_0000; // fixed bit set, header form 0 (short header)
    if key_phase {
        prefix[0] |= 0b0000_0100;
    } else {
        prefix[0] &= !0b0000_0100;
    }

    suffix.copy_from_slice(&key.derive(destination_cid));

    Some(packet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::Deterministic;

    #[test]
    fn derivation_is_deterministic_per_cid() {
        let key = TokenKey::from_salt(&[7u8; 20]);
        let cid = ConnectionId::from_bytes(&[1, 2, 3, 4]).unwrap();
        assert_eq!(key.derive(&cid), key.derive(&cid));
    }

    #[test]
    fn derivation_differs_across_cids() {
        let key = TokenKey::from_salt(&[7u8; 20]);
        let a = ConnectionId::from_bytes(&[1]).unwrap();
        let b = ConnectionId::from_bytes(&[2]).unwrap();
        assert_ne!(key.derive(&a), key.derive(&b));
    }

    #[test]
    fn reset_length_respects_minimum_bound() {
        let key = TokenKey::from_salt(&[1u8; 20]);
        let limits = Limits::default();
        let mut random = Deterministic::new(3);
        let cid = ConnectionId::from_bytes(&[9]).unwrap();

        let packet = build_packet(&key, &limits, &mut random, &cid, MIN_RESET_LEN + 1, false)
            .expect("packet fits");
        assert_eq!(packet.len(), MIN_RESET_LEN);
    }

    #[test]
    fn packets_too_small_to_answer_are_refused() {
        let key = TokenKey::from_salt(&[1u8; 20]);
        let limits = Limits::default();
        let mut random = Deterministic::new(3);
        let cid = ConnectionId::from_bytes(&[9]).unwrap();

        assert!(build_packet(&key, &limits, &mut random, &cid, MIN_RESET_LEN, false).is_none());
        assert!(build_packet(&key, &limits, &mut random, &cid, 30, false).is_none());
    }

    #[test]
    fn reset_is_strictly_shorter_than_input() {
        let key = TokenKey::from_salt(&[1u8; 20]);
        let limits = Limits::default();
        let mut random = Deterministic::new(3);
        let cid = ConnectionId::from_bytes(&[9]).unwrap();

        let received_len = 200;
        let packet = build_packet(&key, &limits, &mut random, &cid, received_len, false).unwrap();
        assert!(packet.len() < received_len);
    }

    #[test]
    fn reset_carries_the_derived_token_as_its_suffix() {
        let key = TokenKey::from_salt(&[1u8; 20]);
        let limits = Limits::default();
        let mut random = Deterministic::new(3);
        let cid = ConnectionId::from_bytes(&[9]).unwrap();

        let packet = build_packet(&key, &limits, &mut random, &cid, 200, true).unwrap();
        let token = key.derive(&cid);
        assert_eq!(&packet[packet.len() - RESET_TOKEN_LEN..], &token);
        assert_eq!(packet[0] & 0b1000_0000, 0);
        assert_ne!(packet[0] & 0b0100_0000, 0);
        assert_ne!(packet[0] & 0b0000_0100, 0);
    }
}
