// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{fd, Protocol, Socket, TransportFeatures};

mod tcp;
mod udp;
