// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the binding's DoS-mitigation policy surface.
//!
//! These are the knobs named directly by §4.C, §4.E, and §4.F; anything
//! connection-level (flow control, idle timeout, ...) lives below this layer
//! and is out of scope here.

use core::time::Duration;

/// Minimum Stateless Reset length defined by RFC 9000 §10.3 for this stack's
/// connection ID length configuration.
pub const MIN_RESET_LEN: usize = 39;

/// The length a Stateless Reset aims for before the `+ 3 random bits` jitter
/// and the `recv_len - 1` clamp are applied.
pub const RECOMMENDED_RESET_LEN: usize = 43;

/// Length of a Stateless Reset token.
pub const RESET_TOKEN_LEN: usize = 16;

/// `DEFAULT_PATH_MTU - 48`, the ceiling a Version Negotiation packet's
/// size is tied to so it never exceeds the minimum path MTU.
pub const MAX_VERSION_NEGOTIATION_LEN: usize = 1200 - 48;

/// AEAD nonce length used for Retry token encryption (96-bit, as used by
/// AES-GCM and ChaCha20-Poly1305).
pub const RETRY_IV_LEN: usize = 12;

/// AEAD authentication tag length for Retry token encryption.
pub const RETRY_TAG_LEN: usize = 16;

#[derive(Clone, Debug)]
pub struct Limits {
    /// Upper bound on concurrently in-flight stateless operations per binding (§4.C invariant ii).
    pub max_stateless_ops: usize,
    /// Age at which a pending stateless operation is swept (§4.C).
    pub stateless_op_expiry: Duration,
    /// Connection ID length this endpoint issues.
    pub cid_total_length: u8,
    /// Fraction (numerator over `u16::MAX`) of `total_memory` at which handshake admission
    /// switches from accepting Initial packets outright to requiring a Retry (§4.F.3).
    pub retry_memory_limit: u16,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_stateless_ops: 4096,
            stateless_op_expiry: Duration::from_millis(3_000),
            cid_total_length: 8,
            retry_memory_limit: u16::MAX / 2,
        }
    }
}

impl Limits {
    pub fn with_max_stateless_ops(mut self, max: usize) -> Self {
        self.max_stateless_ops = max;
        self
    }

    pub fn with_stateless_op_expiry(mut self, expiry: Duration) -> Self {
        self.stateless_op_expiry = expiry;
        self
    }

    pub fn with_cid_total_length(mut self, len: u8) -> Self {
        if (len as usize) < RETRY_IV_LEN {
            tracing::warn!(
                cid_total_length = len,
                recommended_minimum = RETRY_IV_LEN,
                "cid_total_length below the AEAD IV length weakens Retry nonce diversity"
            );
        }
        self.cid_total_length = len;
        self
    }

    pub fn with_retry_memory_limit(mut self, limit: u16) -> Self {
        self.retry_memory_limit = limit;
        self
    }

    /// The fraction of `total_memory` (in bytes) above which Retry is required for new
    /// handshakes, per §4.F.3: `retry_memory_limit * total_memory / u16::MAX`.
    pub fn handshake_memory_threshold(&self, total_memory: u64) -> u64 {
        (self.retry_memory_limit as u64 * total_memory) / u16::MAX as u64
    }

    /// `RECOMMENDED_RESET_LEN + (3 random bits)` (§4.E), before the
    /// `received_len - 1` clamp and `MIN_RESET_LEN` floor are applied.
    pub fn recommended_reset_len(&self, random: &mut dyn crate::random::Generator) -> usize {
        RECOMMENDED_RESET_LEN + random.gen_range_biased(0, 7)
    }
}
