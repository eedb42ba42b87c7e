// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

/// Every message starts with this magic number so corrupt or foreign input
/// is rejected before any codec runs.
pub const MAGIC_NUMBER: u16 = 0x5350;

pub mod header_flags {
    /// Set when the producer wrote little-endian payloads. This
    /// implementation always sets it and rejects input without it.
    pub const IS_LITTLE_ENDIAN_FLAG: u8 = 0b1;
}

/// Wire id reserved for the permissive named fallback: id 0 is followed by
/// a length-prefixed type name instead of referring to a registration.
pub const NAMED_TYPE_ID: u32 = 0;

/// First wire id handed out by the engine builder. Ids grow sequentially
/// from here in registration order.
pub const FIRST_WIRE_ID: u32 = 1;

/// Fixed per-message header size: magic number plus flags byte.
pub const HEADER_SIZE: usize = 3;
