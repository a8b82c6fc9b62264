// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

mod error;
pub mod id;
pub mod limits;

pub use error::*;
pub use id::{InitialId, LocalId, PeerId, UnboundedId};
pub use limits::Limits;
