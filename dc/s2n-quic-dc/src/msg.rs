// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod addr;
pub mod cmsg;
pub mod recv;
pub mod send;
