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

//! Network-layer negative acknowledgements.

use bytes::Bytes;

use crate::wire::{DecodingError, EncodingError, WireFormat, default_wire_format};

/// Reasons a forwarder rejected an interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NackReason {
    /// No reason given.
    #[default]
    None,
    /// The upstream path is congested.
    Congestion,
    /// The interest was a duplicate.
    Duplicate,
    /// There is no route for the name.
    NoRoute,
    /// Other, unrecognized reasons.
    Other(u64),
}
impl From<u64> for NackReason {
    fn from(value: u64) -> Self {
        match value {
            0 => NackReason::None,
            50 => NackReason::Congestion,
            100 => NackReason::Duplicate,
            150 => NackReason::NoRoute,
            other => NackReason::Other(other),
        }
    }
}
impl From<NackReason> for u64 {
    fn from(val: NackReason) -> Self {
        match val {
            NackReason::None => 0,
            NackReason::Congestion => 50,
            NackReason::Duplicate => 100,
            NackReason::NoRoute => 150,
            NackReason::Other(other) => other,
        }
    }
}

/// A network nack header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkNack {
    reason: NackReason,
}
impl NetworkNack {
    /// Creates a nack without reason.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a nack with the given reason.
    pub fn with_reason(reason: NackReason) -> Self {
        Self { reason }
    }

    /// Returns the reason.
    pub fn reason(&self) -> NackReason {
        self.reason
    }

    /// Sets the reason.
    pub fn set_reason(&mut self, reason: NackReason) {
        self.reason = reason;
    }

    /// Returns the wire code of an [`NackReason::Other`] reason.
    pub fn other_reason_code(&self) -> Option<u64> {
        match self.reason {
            NackReason::Other(code) => Some(code),
            _ => None,
        }
    }

    /// Sets the reason from a raw wire code.
    ///
    /// Known codes resolve to their named reason.
    ///
    /// ## Panics
    /// If `code` is negative.
    pub fn set_other_reason_code(&mut self, code: i64) {
        assert!(code >= 0, "nack reason code must not be negative, got {code}");
        self.reason = NackReason::from(code as u64);
    }

    /// Encodes the nack header with the default wire format.
    pub fn wire_encode(&self) -> Result<Bytes, EncodingError> {
        default_wire_format().encode_network_nack(self)
    }

    /// Decodes a nack header with the default wire format.
    pub fn wire_decode(input: &Bytes) -> Result<Self, DecodingError> {
        default_wire_format().decode_network_nack(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_unknown_reason_codes() {
        assert_eq!(NackReason::from(7), NackReason::Other(7));
        assert_eq!(u64::from(NackReason::Other(7)), 7);
        assert_eq!(NackReason::from(150), NackReason::NoRoute);
    }

    #[test]
    fn should_resolve_known_other_codes() {
        let mut nack = NetworkNack::new();
        nack.set_other_reason_code(100);
        assert_eq!(nack.reason(), NackReason::Duplicate);
        assert_eq!(nack.other_reason_code(), None);

        nack.set_other_reason_code(7);
        assert_eq!(nack.other_reason_code(), Some(7));
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn should_panic_on_negative_code() {
        NetworkNack::new().set_other_reason_code(-1);
    }

    #[test]
    fn should_roundtrip_through_default_wire_format() {
        let nack = NetworkNack::with_reason(NackReason::Other(7));
        let decoded = NetworkNack::wire_decode(&nack.wire_encode().unwrap()).unwrap();
        assert_eq!(decoded.reason(), NackReason::Other(7));
    }
}
