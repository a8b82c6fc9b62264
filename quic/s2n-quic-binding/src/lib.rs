// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The UDP endpoint binding layer of a QUIC stack.
//!
//! This crate sits directly above the UDP datapath and below per-connection
//! state machines. It owns the multi-index lookup table that routes arriving
//! datagrams to connections, the listener registry used to admit new
//! connections, and the stateless responders (Version Negotiation, Stateless
//! Reset, Retry) that a QUIC endpoint must produce without any per-connection
//! state.
//!
//! The datapath, the connection state machine, the worker pool, and AEAD
//! primitives are all external collaborators; this crate only defines the
//! traits it needs from them (see [`datapath`], [`connection`], [`worker`]).

pub mod address;
pub mod binding;
pub mod cid;
pub mod connection;
pub mod datapath;
pub mod dispatch;
pub mod error;
pub mod library;
pub mod limits;
pub mod listener;
pub mod lookup;
pub mod packet;
pub mod preprocessor;
pub mod random;
pub mod stateless;
pub mod worker;

pub use binding::Binding;
pub use error::BindingError;
pub use limits::Limits;
