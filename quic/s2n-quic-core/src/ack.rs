// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#[cfg(feature = "alloc")]
pub mod ranges;
pub mod set;
pub mod settings;

#[cfg(feature = "alloc")]
pub use ranges::Ranges;
pub use set::Set;
pub use settings::Settings;
