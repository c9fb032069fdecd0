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

//! The wire format contract between packet objects and their binary encoding.
//!
//! Packet objects never encode themselves. They hand themselves to a [`WireFormat`], which
//! produces an immutable byte buffer, and they are produced by a [`WireFormat`] from one.
//!
//! A wire format only needs to implement the operations it supports. Every operation has a
//! default implementation returning [`EncodingError::Unsupported`] or
//! [`DecodingError::Unsupported`].

use std::{cell::RefCell, sync::LazyLock};

use bytes::Bytes;

use crate::{
    control::{ControlParameters, ControlResponse},
    data::Data,
    delegation_set::DelegationSet,
    interest::Interest,
    meta_info::ContentType,
    nack::NetworkNack,
    name::Name,
    signature::Signature,
    tlv::TlvWireFormat,
};

/// Converts packet objects to and from their binary encoding.
pub trait WireFormat: Send + Sync {
    /// Encodes a name.
    fn encode_name(&self, _name: &Name) -> Result<Bytes, EncodingError> {
        Err(EncodingError::Unsupported("Name"))
    }

    /// Decodes a name.
    fn decode_name(&self, _input: &Bytes) -> Result<Name, DecodingError> {
        Err(DecodingError::Unsupported("Name"))
    }

    /// Encodes an interest.
    ///
    /// The signed portion of the returned blob covers the name components except the last one.
    fn encode_interest(&self, _interest: &Interest) -> Result<SignedBlob, EncodingError> {
        Err(EncodingError::Unsupported("Interest"))
    }

    /// Decodes an interest.
    ///
    /// Returns the interest together with the consumed part of the input.
    fn decode_interest(&self, _input: &Bytes) -> Result<(Interest, SignedBlob), DecodingError> {
        Err(DecodingError::Unsupported("Interest"))
    }

    /// Encodes a data packet.
    ///
    /// The signed portion of the returned blob runs from the name to the end of the signature
    /// info.
    fn encode_data(&self, _data: &Data) -> Result<SignedBlob, EncodingError> {
        Err(EncodingError::Unsupported("Data"))
    }

    /// Decodes a data packet.
    ///
    /// Returns the data packet together with the consumed part of the input.
    fn decode_data(&self, _input: &Bytes) -> Result<(Data, SignedBlob), DecodingError> {
        Err(DecodingError::Unsupported("Data"))
    }

    /// Encodes the signature info of a signature, without the signature value.
    fn encode_signature_info(&self, _signature: &Signature) -> Result<Bytes, EncodingError> {
        Err(EncodingError::Unsupported("SignatureInfo"))
    }

    /// Decodes a signature from its signature info and signature value encodings.
    fn decode_signature_info_and_value(
        &self,
        _signature_info: &Bytes,
        _signature_value: &Bytes,
    ) -> Result<Signature, DecodingError> {
        Err(DecodingError::Unsupported("SignatureInfo"))
    }

    /// Encodes a delegation set as used in Link content.
    fn encode_delegation_set(&self, _set: &DelegationSet) -> Result<Bytes, EncodingError> {
        Err(EncodingError::Unsupported("DelegationSet"))
    }

    /// Decodes a delegation set, keeping the encoded order.
    fn decode_delegation_set(&self, _input: &Bytes) -> Result<DelegationSet, DecodingError> {
        Err(DecodingError::Unsupported("DelegationSet"))
    }

    /// Encodes a network nack header.
    fn encode_network_nack(&self, _nack: &NetworkNack) -> Result<Bytes, EncodingError> {
        Err(EncodingError::Unsupported("NetworkNack"))
    }

    /// Decodes a network nack header.
    fn decode_network_nack(&self, _input: &Bytes) -> Result<NetworkNack, DecodingError> {
        Err(DecodingError::Unsupported("NetworkNack"))
    }

    /// Encodes control parameters.
    fn encode_control_parameters(
        &self,
        _parameters: &ControlParameters,
    ) -> Result<Bytes, EncodingError> {
        Err(EncodingError::Unsupported("ControlParameters"))
    }

    /// Decodes control parameters.
    fn decode_control_parameters(&self, _input: &Bytes) -> Result<ControlParameters, DecodingError> {
        Err(DecodingError::Unsupported("ControlParameters"))
    }

    /// Encodes a control response.
    fn encode_control_response(&self, _response: &ControlResponse) -> Result<Bytes, EncodingError> {
        Err(EncodingError::Unsupported("ControlResponse"))
    }

    /// Decodes a control response.
    fn decode_control_response(&self, _input: &Bytes) -> Result<ControlResponse, DecodingError> {
        Err(DecodingError::Unsupported("ControlResponse"))
    }
}

/// Returns the process-wide default wire format.
///
/// Packet objects cache encodings produced by this format only.
pub fn default_wire_format() -> &'static TlvWireFormat {
    static DEFAULT: LazyLock<TlvWireFormat> = LazyLock::new(TlvWireFormat::default);
    &DEFAULT
}

/// An immutable encoding together with the byte range covered by its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedBlob {
    bytes: Bytes,
    signed_begin: usize,
    signed_end: usize,
}
impl SignedBlob {
    /// Creates a signed blob.
    ///
    /// ## Panics
    /// If the signed range is not within `bytes`.
    pub fn new(bytes: Bytes, signed_begin: usize, signed_end: usize) -> Self {
        assert!(
            signed_begin <= signed_end && signed_end <= bytes.len(),
            "signed range {signed_begin}..{signed_end} out of bounds for {} bytes",
            bytes.len()
        );
        Self {
            bytes,
            signed_begin,
            signed_end,
        }
    }

    /// Returns the full encoding.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns the part of the encoding covered by the signature.
    pub fn signed_portion(&self) -> Bytes {
        self.bytes.slice(self.signed_begin..self.signed_end)
    }

    /// Offset of the first signed byte.
    pub fn signed_begin(&self) -> usize {
        self.signed_begin
    }

    /// Offset one past the last signed byte.
    pub fn signed_end(&self) -> usize {
        self.signed_end
    }

    /// Length of the full encoding.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the full encoding.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}
impl AsRef<[u8]> for SignedBlob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Cache of the default wire encoding of a packet, tagged with the change count it was produced
/// at.
#[derive(Debug, Clone, Default)]
pub(crate) struct EncodingCache(RefCell<Option<(SignedBlob, u64)>>);
impl EncodingCache {
    /// Returns the cached encoding if it was produced at `change_count`.
    pub(crate) fn get(&self, change_count: u64) -> Option<SignedBlob> {
        match &*self.0.borrow() {
            Some((blob, count)) if *count == change_count => Some(blob.clone()),
            _ => None,
        }
    }

    pub(crate) fn store(&self, blob: SignedBlob, change_count: u64) {
        *self.0.borrow_mut() = Some((blob, change_count));
    }

    pub(crate) fn clear(&self) {
        *self.0.borrow_mut() = None;
    }
}

/// Errors that can occur while decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodingError {
    /// The input ended in the middle of an element.
    #[error("input truncated at offset {offset}")]
    Truncated {
        /// Offset at which more input was required.
        offset: usize,
    },
    /// An element of a different type was found where a specific one is required.
    #[error("expected TLV type {expected}, found {actual} at offset {offset}")]
    UnexpectedType {
        /// Required type.
        expected: u64,
        /// Type found in the input.
        actual: u64,
        /// Offset of the element.
        offset: usize,
    },
    /// A nested element extends past the end of its parent.
    #[error("element at offset {offset} overruns its parent ending at {parent_end}")]
    Overrun {
        /// Offset of the element.
        offset: usize,
        /// End of the parent element.
        parent_end: usize,
    },
    /// An unknown element of a critical type was found.
    #[error("unrecognized critical TLV type {0}")]
    UnrecognizedCriticalType(u64),
    /// A nonNegativeInteger had a length other than 1, 2, 4 or 8.
    #[error("invalid nonNegativeInteger length {0}")]
    InvalidNonNegativeIntegerLength(usize),
    /// The input is larger than the configured maximum packet size.
    #[error("packet of {size} bytes exceeds the maximum of {max} bytes")]
    PacketTooLarge {
        /// Size of the input.
        size: usize,
        /// Configured maximum.
        max: usize,
    },
    /// A Link was expected, but the data packet carries a different content type.
    #[error("content type is {0:?}, expected Link")]
    NotALink(ContentType),
    /// A field is well-formed TLV but holds an invalid value.
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Field that failed to decode.
        field: &'static str,
        /// Reason for the failure.
        reason: String,
    },
    /// The wire format does not support decoding this kind of object.
    #[error("{0} decoding is not supported by this wire format")]
    Unsupported(&'static str),
}

/// Errors that can occur while encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// The object holds a field the wire format cannot represent.
    #[error("cannot encode structure: {0}")]
    InvalidStructure(&'static str),
    /// The wire format does not support encoding this kind of object.
    #[error("{0} encoding is not supported by this wire format")]
    Unsupported(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NothingSupported;
    impl WireFormat for NothingSupported {}

    #[test]
    fn should_default_to_unsupported() {
        let format = NothingSupported;
        assert_eq!(
            format.encode_name(&Name::new()),
            Err(EncodingError::Unsupported("Name"))
        );
        assert_eq!(
            format.decode_network_nack(&Bytes::new()).unwrap_err(),
            DecodingError::Unsupported("NetworkNack")
        );
    }

    #[test]
    fn should_slice_signed_portion() {
        let blob = SignedBlob::new(Bytes::from_static(b"0123456789"), 2, 5);
        assert_eq!(blob.signed_portion(), Bytes::from_static(b"234"));
        assert_eq!(blob.len(), 10);
    }

    #[test]
    #[should_panic]
    fn should_reject_signed_range_out_of_bounds() {
        SignedBlob::new(Bytes::from_static(b"01"), 1, 3);
    }

    #[test]
    fn should_only_return_cache_at_matching_count() {
        let cache = EncodingCache::default();
        assert_eq!(cache.get(0), None);

        let blob = SignedBlob::new(Bytes::from_static(b"abc"), 0, 3);
        cache.store(blob.clone(), 4);
        assert_eq!(cache.get(4), Some(blob));
        assert_eq!(cache.get(5), None);

        cache.clear();
        assert_eq!(cache.get(4), None);
    }
}
