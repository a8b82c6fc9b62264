// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod descriptor;
pub mod pool;
pub mod router;
pub mod udp;
