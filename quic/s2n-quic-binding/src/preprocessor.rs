// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The packet preprocessor (§4.D): version-invariant header validation and
//! the drop / Version-Negotiation / continue decision.

use crate::packet::{self, InvariantHeader};

/// The preprocessor's verdict for one datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Header validated; continue dispatching this datagram normally.
    Keep(InvariantHeader),
    /// Drop without any response (malformed header, or no listener to
    /// justify a Version Negotiation reply).
    Drop,
    /// The header carries an unsupported version; queue a Version
    /// Negotiation stateless response instead of dispatching further.
    VersionNegotiation(InvariantHeader),
}

/// Runs the version-invariant validation steps of §4.D against one datagram.
///
/// `local_cid_len` is the connection ID length this binding issues (needed to
/// parse short headers, which carry no CID length field on the wire).
/// `has_listeners` gates whether an unsupported version produces a Version
/// Negotiation reply or a silent drop (§4.D step iii).
pub fn preprocess(datagram: &[u8], local_cid_len: usize, has_listeners: bool) -> Decision {
    let header = match packet::parse_invariant(datagram, local_cid_len) {
        Ok(header) => header,
        Err(_) => {
            tracing::trace!("dropping datagram with invalid invariant header");
            return Decision::Drop;
        }
    };

    let Some(version) = header.version() else {
        // Short header: no version field, nothing further to validate here.
        return Decision::Keep(header);
    };

    if header.is_vn() {
        // Never answer a Version Negotiation packet with another one.
        return Decision::Drop;
    }

    if packet::is_supported(version) {
        return Decision::Keep(header);
    }

    if has_listeners {
        Decision::VersionNegotiation(header)
    } else {
        tracing::trace!(version, "dropping unsupported version, no listeners registered");
        Decision::Drop
    }
}
