// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#[macro_use]
pub mod instruction;
#[macro_use]
mod common;
#[macro_use]
pub mod ancillary;

pub mod cbpf;
pub mod ebpf;
mod program;

pub use cbpf::Cbpf;
pub use ebpf::Ebpf;
pub use instruction::Instruction;
pub use program::Program;
