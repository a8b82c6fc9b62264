// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The listener registry (§4.B): an ordered list of listeners within a
//! binding, answering "which listener (if any) accepts this new connection?"

use crate::{
    address::{is_wildcard_ip, Family},
    connection::{ConnectionInfo, Session},
    error::BindingError,
    lookup::Lookup,
};
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::sync::Arc;

/// One registered listener. `local_address` is `None` for a listener bound
/// to a wildcard address in one or both of IP and port (§3 "Listener entry").
pub struct Listener<S> {
    pub local_address: Option<SocketAddr>,
    pub family: Family,
    pub session: Arc<S>,
}

impl<S> Clone for Listener<S> {
    fn clone(&self) -> Self {
        Self {
            local_address: self.local_address,
            family: self.family,
            session: self.session.clone(),
        }
    }
}

impl<S> Listener<S> {
    pub fn new(local_address: Option<SocketAddr>, family: Family, session: Arc<S>) -> Self {
        Self {
            local_address,
            family,
            session,
        }
    }

    fn is_wildcard(&self) -> bool {
        match self.local_address {
            Some(addr) => is_wildcard_ip(&addr),
            None => true,
        }
    }

    /// Sort key: family (IPv6 < IPv4 < Unspecified), then specific-before-
    /// wildcard within the family (§3 "Listener entry").
    fn sort_key(&self) -> (Family, bool) {
        (self.family, self.is_wildcard())
    }

    fn matches_address(&self, addr: &SocketAddr) -> bool {
        match self.local_address {
            Some(bound) => bound == *addr,
            None => true,
        }
    }
}

/// Ordered set of listeners for one binding, plus the lookup table they
/// trigger partition promotion on (§4.B: "if the listener list was empty
/// before insert, attempt `Lookup.maximize_partitioning()`").
pub struct Registry<S, C> {
    listeners: RwLock<Vec<Listener<S>>>,
    lookup: Arc<Lookup<C>>,
}

impl<S: Session, C: Clone> Registry<S, C> {
    pub fn new(lookup: Arc<Lookup<C>>) -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            lookup,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Registers `new`, maintaining sort order and rejecting overlap with an
    /// existing listener that shares its (family, specificity, address)
    /// bucket and advertises an overlapping ALPN set (§3 invariant iii).
    ///
    /// Triggers the lookup table's first-listener partition promotion; if
    /// that fails, the insert is rolled back and `Err` is returned.
    pub fn register(&self, new: Listener<S>, offered_alpn: &[&[u8]]) -> Result<bool, BindingError> {
        let mut listeners = self.listeners.write();
        let was_empty = listeners.is_empty();

        let new_key = new.sort_key();
        let mut insert_at = listeners.len();
        for (idx, existing) in listeners.iter().enumerate() {
            let existing_key = existing.sort_key();
            if existing_key > new_key {
                insert_at = idx;
                break;
            }
            if existing_key == new_key
                && existing.local_address == new.local_address
                && existing.session.alpn_overlaps(offered_alpn)
            {
                return Ok(false);
            }
        }

        listeners.insert(insert_at, new);

        if was_empty {
            if !self.lookup.maximize_partitioning() {
                listeners.remove(insert_at);
                return Err(BindingError::PartitionAllocation);
            }
        }

        Ok(true)
    }

    /// Finds the first listener (in sort order) whose family, address, and
    /// ALPN set admit `info` (§4.B `find_for_new_connection`).
    pub fn find_for_new_connection(&self, info: &ConnectionInfo<'_>) -> Option<Arc<S>> {
        let listeners = self.listeners.read();
        for listener in listeners.iter() {
            let family_matches =
                listener.family == Family::Unspecified || listener.family == info.family;
            if !family_matches {
                continue;
            }
            if !listener.matches_address(&info.local_address) {
                continue;
            }
            if listener.session.alpn_overlaps(info.alpn_offered) {
                return Some(listener.session.clone());
            }
        }
        None
    }

    pub fn unregister(&self, local_address: Option<SocketAddr>, family: Family) {
        let mut listeners = self.listeners.write();
        if let Some(idx) = listeners
            .iter()
            .position(|l| l.local_address == local_address && l.family == family)
        {
            listeners.remove(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysMatch;
    impl Session for AlwaysMatch {
        fn alpn_overlaps(&self, _offered: &[&[u8]]) -> bool {
            true
        }
    }

    struct Disjoint(&'static [u8]);
    impl Session for Disjoint {
        fn alpn_overlaps(&self, offered: &[&[u8]]) -> bool {
            offered.iter().any(|p| *p == self.0)
        }
    }

    fn lookup() -> Arc<Lookup<u32>> {
        Arc::new(Lookup::new())
    }

    fn addr(port: u16) -> SocketAddr {
        format!("127.0.0.1:{port}").parse().unwrap()
    }

    #[test]
    fn registers_and_finds_wildcard_listener() {
        let registry: Registry<AlwaysMatch, u32> = Registry::new(lookup());
        let listener = Listener::new(None, Family::IpV4, Arc::new(AlwaysMatch));
        assert!(registry.register(listener, &[b"h3"]).unwrap());

        let info = ConnectionInfo {
            remote_address: addr(1),
            local_address: addr(443),
            family: Family::IpV4,
            alpn_offered: &[b"h3"],
            token_validated: false,
        };
        assert!(registry.find_for_new_connection(&info).is_some());
    }

    #[test]
    fn rejects_overlapping_alpn_on_same_bucket() {
        let registry: Registry<Disjoint, u32> = Registry::new(lookup());
        let a = Listener::new(Some(addr(443)), Family::IpV4, Arc::new(Disjoint(b"h3")));
        let b = Listener::new(Some(addr(443)), Family::IpV4, Arc::new(Disjoint(b"h3")));
        assert!(registry.register(a, &[b"h3"]).unwrap());
        assert!(!registry.register(b, &[b"h3"]).unwrap());
    }

    #[test]
    fn distinct_alpn_same_bucket_is_allowed() {
        let registry: Registry<Disjoint, u32> = Registry::new(lookup());
        let a = Listener::new(Some(addr(443)), Family::IpV4, Arc::new(Disjoint(b"h3")));
        let b = Listener::new(Some(addr(443)), Family::IpV4, Arc::new(Disjoint(b"echo")));
        assert!(registry.register(a, &[b"h3"]).unwrap());
        assert!(registry.register(b, &[b"echo"]).unwrap());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn first_registration_promotes_partitioning() {
        let l = lookup();
        let registry: Registry<AlwaysMatch, u32> = Registry::new(l.clone());
        assert_eq!(l.local_cid_count(), 0);
        let listener = Listener::new(None, Family::IpV4, Arc::new(AlwaysMatch));
        assert!(registry.register(listener, &[b"h3"]).unwrap());
        assert!(l.maximize_partitioning());
    }
}
