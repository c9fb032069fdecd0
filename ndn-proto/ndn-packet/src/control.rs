// Copyright 2026 Anapaya Systems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Forwarder management records.
//!
//! These are plain data exchanged with the forwarder's management protocol. All fields are
//! public and unset fields are `None`.

use std::time::Duration;

use bytes::Bytes;

use crate::{
    name::Name,
    wire::{DecodingError, EncodingError, WireFormat, default_wire_format},
};

bitflags::bitflags! {
    /// Route registration flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ForwardingFlags: u64 {
        /// The route also applies to longer prefixes.
        const CHILD_INHERIT = 0b0000_0001;
        /// The route shadows routes registered on longer prefixes.
        const CAPTURE = 0b0000_0010;

        // Other bits are reserved.
        const _ = !0;
    }
}
impl Default for ForwardingFlags {
    fn default() -> Self {
        ForwardingFlags::CHILD_INHERIT
    }
}
impl ForwardingFlags {
    /// Returns true if the child inherit flag is set.
    pub fn child_inherit(&self) -> bool {
        self.contains(ForwardingFlags::CHILD_INHERIT)
    }

    /// Returns true if the capture flag is set.
    pub fn capture(&self) -> bool {
        self.contains(ForwardingFlags::CAPTURE)
    }
}

/// Parameters of a management command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlParameters {
    /// Name prefix the command applies to.
    pub name: Option<Name>,
    /// Face the command applies to.
    pub face_id: Option<u64>,
    /// Face URI.
    pub uri: Option<String>,
    /// Local control feature to enable or disable.
    pub local_control_feature: Option<u64>,
    /// Route origin.
    pub origin: Option<u64>,
    /// Route cost.
    pub cost: Option<u64>,
    /// Route flags.
    pub forwarding_flags: ForwardingFlags,
    /// Forwarding strategy name.
    pub strategy: Option<Name>,
    /// Route lifetime.
    pub expiration_period: Option<Duration>,
}
impl ControlParameters {
    /// Creates parameters with nothing set and default flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes the parameters with the default wire format.
    pub fn wire_encode(&self) -> Result<Bytes, EncodingError> {
        default_wire_format().encode_control_parameters(self)
    }

    /// Decodes parameters with the default wire format.
    pub fn wire_decode(input: &Bytes) -> Result<Self, DecodingError> {
        default_wire_format().decode_control_parameters(input)
    }
}

/// Response to a management command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlResponse {
    /// Status code, 200 on success.
    pub status_code: u64,
    /// Human-readable status.
    pub status_text: String,
    /// Parameters echoed by the forwarder.
    pub body: Option<ControlParameters>,
}
impl ControlResponse {
    /// Creates a response.
    pub fn new(status_code: u64, status_text: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            body: None,
        }
    }

    /// Encodes the response with the default wire format.
    pub fn wire_encode(&self) -> Result<Bytes, EncodingError> {
        default_wire_format().encode_control_response(self)
    }

    /// Decodes a response with the default wire format.
    pub fn wire_decode(input: &Bytes) -> Result<Self, DecodingError> {
        default_wire_format().decode_control_response(input)
    }
}
