// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Version-invariant QUIC header parsing (RFC 8999).
//!
//! This module only understands the bits that are stable across QUIC
//! versions: header form, the long-header version/CID fields, and (for the
//! versions this binding actually serves) the long-header packet type. It
//! never touches anything a version-specific codec would own.

use crate::cid::{ConnectionId, MAX_CID_LEN};

/// Header-form bit (RFC 8999 §5.2): 1 = long header, 0 = short header.
const LONG_HEADER_BIT: u8 = 0b1000_0000;
/// Fixed bit (RFC 9000 §17): MUST be 1 on every QUIC v1-family packet.
const FIXED_BIT: u8 = 0b0100_0000;
/// Long-header packet type bits.
const LONG_TYPE_MASK: u8 = 0b0011_0000;
const LONG_TYPE_INITIAL: u8 = 0b0000_0000;
const LONG_TYPE_HANDSHAKE: u8 = 0b0010_0000;

/// Minimum length of any packet this binding will consider (RFC 9000 requires
/// at least a 1-byte tag, 4-byte version-or-CID region, and some payload).
pub const MIN_INVARIANT_LEN: usize = 7;

/// The QUIC version sentinel used by Version Negotiation packets.
pub const VERSION_NEGOTIATION: u32 = 0;

pub type Version = u32;

/// Versions this binding terminates connections for.
///
/// The handled set {DRAFT_27, DRAFT_28, DRAFT_29, MS_1}: four wire-compatible
/// long-header encodings sharing a type-bit layout.
pub const DRAFT_27: Version = 0xff00_001b;
pub const DRAFT_28: Version = 0xff00_001c;
pub const DRAFT_29: Version = 0xff00_001d;
pub const MS_1: Version = 0xabcd_0001;

pub const SUPPORTED_VERSIONS: &[Version] = &[DRAFT_27, DRAFT_28, DRAFT_29, MS_1];

pub fn is_supported(version: Version) -> bool {
    SUPPORTED_VERSIONS.contains(&version)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
    TooShort,
    CidTooLong,
    TokenLenUnderflow,
}

/// The header-invariant view of a single datagram's leading packet.
///
/// Parsing is a pure function of the bytes and the locally-configured short
/// header CID length, so parsing the same buffer twice yields byte-identical
/// metadata (the idempotency law in §8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantHeader {
    Long {
        version: Version,
        destination_cid: ConnectionId,
        source_cid: ConnectionId,
        /// Offset into the datagram where the header ends and the
        /// version-specific payload (token, length, packet number, ...) begins.
        payload_offset: usize,
        is_handshake: bool,
        key_phase: bool,
    },
    Short {
        destination_cid: ConnectionId,
        key_phase: bool,
    },
}

impl InvariantHeader {
    pub fn is_long(&self) -> bool {
        matches!(self, InvariantHeader::Long { .. })
    }

    pub fn is_vn(&self) -> bool {
        matches!(self, InvariantHeader::Long { version, .. } if *version == VERSION_NEGOTIATION)
    }

    pub fn is_handshake(&self) -> bool {
        matches!(self, InvariantHeader::Long { is_handshake, .. } if *is_handshake)
    }

    pub fn destination_cid(&self) -> &ConnectionId {
        match self {
            InvariantHeader::Long {
                destination_cid, ..
            } => destination_cid,
            InvariantHeader::Short {
                destination_cid, ..
            } => destination_cid,
        }
    }

    pub fn version(&self) -> Option<Version> {
        match self {
            InvariantHeader::Long { version, .. } => Some(*version),
            InvariantHeader::Short { .. } => None,
        }
    }
}

/// Parses the version-invariant prefix of `datagram`.
///
/// `local_cid_len` is the connection ID length this binding issues; it's
/// needed to find the end of a short header's destination CID, since short
/// headers carry no length field on the wire.
pub fn parse_invariant(
    datagram: &[u8],
    local_cid_len: usize,
) -> Result<InvariantHeader, InvariantError> {
    if datagram.len() < MIN_INVARIANT_LEN {
        return Err(InvariantError::TooShort);
    }

    let tag = datagram[0];
    let key_phase = tag & 0b0000_0100 != 0;

    if tag & LONG_HEADER_BIT == 0 {
        // Short header: [tag][destination_cid; local_cid_len][...]
        if local_cid_len > MAX_CID_LEN || datagram.len() < 1 + local_cid_len {
            return Err(InvariantError::CidTooLong);
        }
        let destination_cid =
            ConnectionId::from_bytes(&datagram[1..1 + local_cid_len]).ok_or(InvariantError::CidTooLong)?;
        return Ok(InvariantHeader::Short {
            destination_cid,
            key_phase,
        });
    }

    // Long header: [tag][version; 4][dcid_len][dcid][scid_len][scid][...]
    let version = u32::from_be_bytes(datagram[1..5].try_into().unwrap());

    let mut offset = 5;
    let dcid_len = *datagram.get(offset).ok_or(InvariantError::TooShort)? as usize;
    offset += 1;
    if dcid_len > MAX_CID_LEN || datagram.len() < offset + dcid_len {
        return Err(InvariantError::CidTooLong);
    }
    let destination_cid =
        ConnectionId::from_bytes(&datagram[offset..offset + dcid_len]).ok_or(InvariantError::CidTooLong)?;
    offset += dcid_len;

    let scid_len = *datagram.get(offset).ok_or(InvariantError::TooShort)? as usize;
    offset += 1;
    if scid_len > MAX_CID_LEN || datagram.len() < offset + scid_len {
        return Err(InvariantError::CidTooLong);
    }
    let source_cid =
        ConnectionId::from_bytes(&datagram[offset..offset + scid_len]).ok_or(InvariantError::CidTooLong)?;
    offset += scid_len;

    let is_handshake = version != VERSION_NEGOTIATION
        && is_supported(version)
        && matches!(tag & LONG_TYPE_MASK, LONG_TYPE_INITIAL | LONG_TYPE_HANDSHAKE);

    Ok(InvariantHeader::Long {
        version,
        destination_cid,
        source_cid,
        payload_offset: offset,
        is_handshake,
        key_phase,
    })
}

/// Returns true if the long-header tag's type bits select an Initial packet,
/// for the handled version family (§4.F.deliver step 1: "only Initial
/// packets proceed").
pub fn is_initial_type(tag: u8) -> bool {
    tag & FIXED_BIT != 0 && tag & LONG_TYPE_MASK == LONG_TYPE_INITIAL
}

/// Decodes a QUIC variable-length integer (RFC 9000 §16) from the start of
/// `bytes`, returning the value and the number of bytes it occupied.
fn decode_varint(bytes: &[u8]) -> Result<(u64, usize), InvariantError> {
    let first = *bytes.first().ok_or(InvariantError::TooShort)?;
    let len = 1usize << (first >> 6);
    if bytes.len() < len {
        return Err(InvariantError::TooShort);
    }
    let mut value = (first & 0x3f) as u64;
    for b in &bytes[1..len] {
        value = (value << 8) | (*b as u64);
    }
    Ok((value, len))
}

/// Extracts the Token field of an Initial packet in the handled version
/// family: a varint length followed by that many bytes, starting at
/// `payload_offset` (the end of the invariant header, §4.F `should_retry`).
///
/// Only the handled versions {DRAFT_27, DRAFT_28, DRAFT_29, MS_1} share this
/// layout; this function must never be called for any other version.
pub fn parse_initial_token(
    datagram: &[u8],
    payload_offset: usize,
) -> Result<&[u8], InvariantError> {
    let rest = datagram
        .get(payload_offset..)
        .ok_or(InvariantError::TooShort)?;
    let (token_len, consumed) = decode_varint(rest)?;
    let token_len = token_len as usize;
    let start = payload_offset + consumed;
    let end = start
        .checked_add(token_len)
        .ok_or(InvariantError::TokenLenUnderflow)?;
    datagram.get(start..end).ok_or(InvariantError::TokenLenUnderflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_header(version: u32, dcid: &[u8], scid: &[u8], type_bits: u8) -> Vec<u8> {
        let mut buf = vec![LONG_HEADER_BIT | FIXED_BIT | type_bits];
        buf.extend_from_slice(&version.to_be_bytes());
        buf.push(dcid.len() as u8);
        buf.extend_from_slice(dcid);
        buf.push(scid.len() as u8);
        buf.extend_from_slice(scid);
        buf.extend_from_slice(&[0u8; 4]); // padding payload
        buf
    }

    #[test]
    fn parses_long_header_initial() {
        let buf = long_header(DRAFT_29, &[1, 2, 3, 4, 5], &[0xaa], LONG_TYPE_INITIAL);
        let header = parse_invariant(&buf, 8).unwrap();
        match header {
            InvariantHeader::Long {
                version,
                destination_cid,
                source_cid,
                is_handshake,
                ..
            } => {
                assert_eq!(version, DRAFT_29);
                assert_eq!(destination_cid.as_slice(), &[1, 2, 3, 4, 5]);
                assert_eq!(source_cid.as_slice(), &[0xaa]);
                assert!(is_handshake);
            }
            _ => panic!("expected long header"),
        }
    }

    #[test]
    fn unsupported_version_is_not_handshake() {
        let buf = long_header(0xfafa_fafa, &[1, 2, 3], &[], LONG_TYPE_INITIAL);
        let header = parse_invariant(&buf, 8).unwrap();
        assert!(!header.is_handshake());
        assert!(!header.is_vn());
    }

    #[test]
    fn vn_sentinel_is_flagged() {
        let buf = long_header(VERSION_NEGOTIATION, &[1, 2, 3], &[4, 5], 0);
        let header = parse_invariant(&buf, 8).unwrap();
        assert!(header.is_vn());
    }

    #[test]
    fn parses_short_header_with_local_cid_len() {
        let mut buf = vec![0b0100_0100u8]; // fixed bit + key phase, short header
        buf.extend_from_slice(&[9, 9, 9, 9, 9, 9, 9, 9]);
        buf.extend_from_slice(&[0u8; 4]);
        let header = parse_invariant(&buf, 8).unwrap();
        match header {
            InvariantHeader::Short {
                destination_cid,
                key_phase,
            } => {
                assert_eq!(destination_cid.as_slice(), &[9; 8]);
                assert!(key_phase);
            }
            _ => panic!("expected short header"),
        }
    }

    #[test]
    fn rejects_too_short_datagrams() {
        let buf = [0u8; 3];
        assert_eq!(parse_invariant(&buf, 8), Err(InvariantError::TooShort));
    }

    #[test]
    fn parsing_is_idempotent() {
        let buf = long_header(DRAFT_29, &[1, 2, 3, 4, 5], &[0xaa], LONG_TYPE_INITIAL);
        let once = parse_invariant(&buf, 8).unwrap();
        let twice = parse_invariant(&buf, 8).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn parses_empty_initial_token() {
        let mut buf = long_header(DRAFT_29, &[1, 2, 3], &[4, 5], LONG_TYPE_INITIAL);
        let header = parse_invariant(&buf, 8).unwrap();
        let payload_offset = match header {
            InvariantHeader::Long { payload_offset, .. } => payload_offset,
            _ => unreachable!(),
        };
        buf.truncate(payload_offset);
        buf.push(0x00); // varint token length = 0
        let token = parse_initial_token(&buf, payload_offset).unwrap();
        assert!(token.is_empty());
    }

    #[test]
    fn parses_nonempty_initial_token() {
        let mut buf = long_header(DRAFT_29, &[1, 2, 3], &[4, 5], LONG_TYPE_INITIAL);
        let header = parse_invariant(&buf, 8).unwrap();
        let payload_offset = match header {
            InvariantHeader::Long { payload_offset, .. } => payload_offset,
            _ => unreachable!(),
        };
        buf.truncate(payload_offset);
        buf.push(0x04); // varint token length = 4
        buf.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd]);
        let token = parse_initial_token(&buf, payload_offset).unwrap();
        assert_eq!(token, &[0xaa, 0xbb, 0xcc, 0xdd]);
    }
}
