// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod accept;
pub mod stats;
pub mod tcp;
pub mod udp;
