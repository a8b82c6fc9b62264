// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Version Negotiation packet construction (§4.E).

use crate::{
    cid::ConnectionId,
    limits::MAX_VERSION_NEGOTIATION_LEN,
    packet::{Version, SUPPORTED_VERSIONS, VERSION_NEGOTIATION},
    random::Generator,
};

const LONG_HEADER_BIT: u8 = 0b1000_0000;

/// Builds a Version Negotiation datagram responding to a packet whose
/// invariant header carried `received_destination_cid`/`received_source_cid`
/// (swapped into the response, §4.E) and `reserved_version` (the binding's
/// grease value, written first in the list per the wire format in §6).
///
/// Returns `None` only if the supported-version list doesn't fit within
/// `MAX_VERSION_NEGOTIATION_LEN`, which a misconfigured [`Limits`] could in
/// principle trigger; with the compiled-in version list this never happens.
///
/// [`Limits`]: crate::limits::Limits
pub fn build_packet(
    random: &mut dyn Generator,
    received_destination_cid: &ConnectionId,
    received_source_cid: &ConnectionId,
    reserved_version: Version,
) -> Option<Vec<u8>> {
    // response dest-CID = received source-CID, response src-CID = received dest-CID (swap).
    let response_dcid = received_source_cid;
    let response_scid = received_destination_cid;

    let version_count = 1 + SUPPORTED_VERSIONS.len();
    let len = 1 + 4 + 1 + response_dcid.len() + 1 + response_scid.len() + version_count * 4;
    if len > MAX_VERSION_NEGOTIATION_LEN {
        return None;
    }

    let mut packet = Vec::with_capacity(len);

    let mut unused = [0u8; 1];
    random.public_random_fill(&mut unused);
    packet.push(LONG_HEADER_BIT | (unused[0] & 0b0111_1111));

    packet.extend_from_slice(&VERSION_NEGOTIATION.to_be_bytes());

    packet.push(response_dcid.len() as u8);
    packet.extend_from_slice(response_dcid.as_slice());
    packet.push(response_scid.len() as u8);
    packet.extend_from_slice(response_scid.as_slice());

    packet.extend_from_slice(&reserved_version.to_be_bytes());
    for version in SUPPORTED_VERSIONS {
        packet.extend_from_slice(&version.to_be_bytes());
    }

    Some(packet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::Deterministic;

    #[test]
    fn swaps_cids_and_writes_reserved_version_first() {
        let mut random = Deterministic::new(1);
        let dcid = ConnectionId::from_bytes(&[1, 2, 3]).unwrap();
        let scid = ConnectionId::from_bytes(&[9, 9]).unwrap();

        let packet = build_packet(&mut random, &dcid, &scid, 0xabab_abab).unwrap();

        assert_eq!(packet[0] & LONG_HEADER_BIT, LONG_HEADER_BIT);
        assert_eq!(&packet[1..5], &[0, 0, 0, 0]); // version = 0

        let mut offset = 5;
        let response_dcid_len = packet[offset] as usize;
        offset += 1;
        assert_eq!(&packet[offset..offset + response_dcid_len], scid.as_slice());
        offset += response_dcid_len;

        let response_scid_len = packet[offset] as usize;
        offset += 1;
        assert_eq!(&packet[offset..offset + response_scid_len], dcid.as_slice());
        offset += response_scid_len;

        let reserved = u32::from_be_bytes(packet[offset..offset + 4].try_into().unwrap());
        assert_eq!(reserved, 0xabab_abab);
    }

    #[test]
    fn stays_within_the_length_ceiling() {
        let mut random = Deterministic::new(1);
        let dcid = ConnectionId::from_bytes(&[0; 20]).unwrap();
        let scid = ConnectionId::from_bytes(&[0; 20]).unwrap();
        let packet = build_packet(&mut random, &dcid, &scid, 1).unwrap();
        assert!(packet.len() <= MAX_VERSION_NEGOTIATION_LEN);
    }
}
