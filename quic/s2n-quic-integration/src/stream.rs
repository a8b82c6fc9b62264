// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

mod endpoint;
mod scenario;

pub use endpoint::*;
pub use s2n_quic_core::stream::testing::*;
pub use scenario::*;
