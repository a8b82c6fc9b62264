// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#[allow(non_camel_case_types)]
type c_int = std::os::raw::c_int;

pub mod gro;
pub mod gso;
pub mod tos_v4;
pub mod tos_v6;
pub use gso::Gso;
