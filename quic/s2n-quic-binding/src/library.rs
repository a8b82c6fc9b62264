// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Process-wide state, analogous to a `MsQuicLib`-style singleton but
//! modeled here as an explicit context threaded through by reference rather
//! than a process global (§9 "Global state").

use crate::limits::Limits;
use parking_lot::Mutex;
use std::sync::Arc;

/// The current AEAD key used to encrypt/decrypt Retry tokens, plus whatever
/// key rotation bookkeeping the library wants. This crate only ever reads
/// the *current* key (§1 Non-goals: "does not manage key rotation beyond
/// consuming a current stateless-retry key from the library").
pub trait RetryKey: Send + Sync + 'static {
    /// Encrypts `plaintext` in place using `nonce`, appending the AEAD tag.
    /// `plaintext` must have `crate::limits::RETRY_TAG_LEN` bytes of
    /// trailing capacity reserved by the caller.
    fn seal(&self, nonce: &[u8], aad: &[u8], in_out: &mut Vec<u8>) -> Result<(), ()>;

    /// Decrypts and authenticates `in_out` in place using `nonce`, returning
    /// the plaintext subslice on success.
    fn open<'a>(&self, nonce: &[u8], aad: &[u8], in_out: &'a mut [u8]) -> Result<&'a [u8], ()>;
}

/// Process-wide context passed by reference into every binding operation
/// that needs it. Never a global: a test can construct as many independent
/// `LibraryContext`s as it wants.
pub struct LibraryContext<K> {
    pub limits: Limits,
    pub total_memory: u64,
    retry_key: Mutex<Arc<K>>,
}

impl<K: RetryKey> LibraryContext<K> {
    pub fn new(limits: Limits, total_memory: u64, retry_key: K) -> Self {
        Self {
            limits,
            total_memory,
            retry_key: Mutex::new(Arc::new(retry_key)),
        }
    }

    /// Fetches the current stateless-retry key under the library's key lock
    /// (PASSIVE priority only, per the lock-order table in §5).
    pub fn current_stateless_retry_key(&self) -> Arc<K> {
        self.retry_key.lock().clone()
    }

    pub fn rotate_stateless_retry_key(&self, new_key: K) {
        *self.retry_key.lock() = Arc::new(new_key);
    }

    /// True when handshake-memory usage has crossed the point where new
    /// connections must prove address ownership via Retry (§4.F.3).
    pub fn should_require_retry(&self, handshake_memory_usage: u64) -> bool {
        handshake_memory_usage >= self.limits.handshake_memory_threshold(self.total_memory)
    }
}
