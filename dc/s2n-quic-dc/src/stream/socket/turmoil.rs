// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Turmoil network simulation support for s2n-quic-dc streams.

mod udp;

#[cfg(test)]
mod tests;
