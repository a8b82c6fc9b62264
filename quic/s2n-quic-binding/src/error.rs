// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Per §7, receive-path and worker-path failures are never surfaced as
//! `Result`s -- they resolve to a [`crate::preprocessor::Decision`] consumed
//! internally by the dispatcher and only ever produce a `tracing` event. Only
//! the lifecycle operations in [`crate::binding`] and [`crate::listener`]
//! return a real error type, since those run at passive priority and have a
//! caller that can act on failure.

use thiserror::Error;

/// Fatal failures from binding/listener lifecycle operations (§4.G, §7).
///
/// Each variant corresponds to a step in `Binding::initialize` or
/// `Listener::register`; the caller rolls back whatever was already
/// initialized, which this crate guarantees by constructing the [`Binding`]
/// only after every fallible step has succeeded.
///
/// [`Binding`]: crate::binding::Binding
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("failed to create datapath binding")]
    DatapathCreation,
    #[error("failed to switch network compartment")]
    CompartmentSwitch,
    #[error("failed to allocate lookup table partitions")]
    PartitionAllocation,
}
