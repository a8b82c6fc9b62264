// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

mod byte;
mod duration;
mod rate;

pub use byte::*;
pub use duration::*;
pub use rate::*;
