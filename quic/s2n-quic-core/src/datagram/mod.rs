// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#[cfg(all(feature = "alloc", feature = "std"))]
pub mod default;
pub mod disabled;
pub mod traits;
pub use disabled::*;
pub use traits::*;
