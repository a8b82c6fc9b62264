// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

struct ConnectionMeta {
    id: u64,
    timestamp: Timestamp,
}

struct EndpointMeta {
    timestamp: Timestamp,
}

struct ConnectionInfo {}
