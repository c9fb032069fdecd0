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

//! Name components.

use std::{cmp::Ordering, fmt, str::FromStr};

use bytes::{Bytes, BytesMut};

use super::{
    NameParseError,
    escape::{escape_value, unescape_value},
};
use crate::{
    tlv::{reader::decode_non_negative_integer, writer::put_non_negative_integer},
    wire::DecodingError,
};

/// URI prefix of implicit SHA-256 digest components.
pub const IMPLICIT_SHA256_DIGEST_PREFIX: &str = "sha256digest=";
/// URI prefix of parameters SHA-256 digest components.
pub const PARAMETERS_SHA256_DIGEST_PREFIX: &str = "params-sha256=";

/// Length of a SHA-256 digest in bytes.
pub const SHA256_DIGEST_LENGTH: usize = 32;

/// Naming convention markers, the first byte of a marked number component.
pub mod marker {
    /// Segment number.
    pub const SEGMENT: u8 = 0x00;
    /// Segment byte offset.
    pub const SEGMENT_OFFSET: u8 = 0xFB;
    /// Timestamp in microseconds since the UNIX epoch.
    pub const TIMESTAMP: u8 = 0xFC;
    /// Version number.
    pub const VERSION: u8 = 0xFD;
    /// Sequence number.
    pub const SEQUENCE_NUMBER: u8 = 0xFE;
}

/// Type of a name component.
///
/// Component types not known to this crate are kept as [`ComponentType::Other`] with their wire
/// code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Implicit SHA-256 digest of the enclosing data packet.
    ImplicitSha256Digest,
    /// SHA-256 digest of the interest parameters.
    ParametersSha256Digest,
    /// Generic component.
    Generic,
    /// Other, unrecognized component types.
    Other(u64),
}
impl ComponentType {
    /// Returns the wire code of the type.
    pub fn code(self) -> u64 {
        self.into()
    }
}
impl From<u64> for ComponentType {
    fn from(value: u64) -> Self {
        match value {
            1 => ComponentType::ImplicitSha256Digest,
            2 => ComponentType::ParametersSha256Digest,
            8 => ComponentType::Generic,
            other => ComponentType::Other(other),
        }
    }
}
impl From<ComponentType> for u64 {
    fn from(val: ComponentType) -> Self {
        match val {
            ComponentType::ImplicitSha256Digest => 1,
            ComponentType::ParametersSha256Digest => 2,
            ComponentType::Generic => 8,
            ComponentType::Other(other) => other,
        }
    }
}
impl Ord for ComponentType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(&other.code())
    }
}
impl PartialOrd for ComponentType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An immutable, typed name component.
///
/// Components are ordered by type code first, then by value bytes lexicographically, with a
/// shorter value ordered first when it is a prefix of the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    component_type: ComponentType,
    value: Bytes,
}
impl Component {
    /// Creates a generic component.
    pub fn new(value: impl Into<Bytes>) -> Self {
        Self::with_type(value, ComponentType::Generic)
    }

    /// Creates a component of the given type.
    pub fn with_type(value: impl Into<Bytes>, component_type: ComponentType) -> Self {
        Self {
            component_type,
            value: value.into(),
        }
    }

    /// Creates a generic component holding `number` as nonNegativeInteger.
    pub fn from_number(number: u64) -> Self {
        let mut value = BytesMut::with_capacity(8);
        put_non_negative_integer(&mut value, number);
        Self::new(value.freeze())
    }

    /// Creates a generic component holding `marker` followed by `number` as nonNegativeInteger.
    pub fn from_number_with_marker(number: u64, marker: u8) -> Self {
        let mut value = BytesMut::with_capacity(9);
        value.extend_from_slice(&[marker]);
        put_non_negative_integer(&mut value, number);
        Self::new(value.freeze())
    }

    /// Creates a segment number component.
    pub fn from_segment(segment: u64) -> Self {
        Self::from_number_with_marker(segment, marker::SEGMENT)
    }

    /// Creates a segment byte offset component.
    pub fn from_segment_offset(offset: u64) -> Self {
        Self::from_number_with_marker(offset, marker::SEGMENT_OFFSET)
    }

    /// Creates a version component.
    pub fn from_version(version: u64) -> Self {
        Self::from_number_with_marker(version, marker::VERSION)
    }

    /// Creates a timestamp component from microseconds since the UNIX epoch.
    pub fn from_timestamp(micros: u64) -> Self {
        Self::from_number_with_marker(micros, marker::TIMESTAMP)
    }

    /// Creates a sequence number component.
    pub fn from_sequence_number(sequence: u64) -> Self {
        Self::from_number_with_marker(sequence, marker::SEQUENCE_NUMBER)
    }

    /// Creates an implicit SHA-256 digest component.
    pub fn from_implicit_sha256_digest(digest: impl Into<Bytes>) -> Result<Self, NameParseError> {
        Self::digest(digest.into(), ComponentType::ImplicitSha256Digest)
    }

    /// Creates a parameters SHA-256 digest component.
    pub fn from_parameters_sha256_digest(digest: impl Into<Bytes>) -> Result<Self, NameParseError> {
        Self::digest(digest.into(), ComponentType::ParametersSha256Digest)
    }

    fn digest(digest: Bytes, component_type: ComponentType) -> Result<Self, NameParseError> {
        if digest.len() != SHA256_DIGEST_LENGTH {
            return Err(NameParseError::InvalidDigestLength(digest.len()));
        }
        Ok(Self::with_type(digest, component_type))
    }

    /// Returns the component value.
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Returns the component type.
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// Returns true for generic components.
    pub fn is_generic(&self) -> bool {
        self.component_type == ComponentType::Generic
    }

    /// Returns true for implicit SHA-256 digest components.
    pub fn is_implicit_sha256_digest(&self) -> bool {
        self.component_type == ComponentType::ImplicitSha256Digest
    }

    /// Returns true for parameters SHA-256 digest components.
    pub fn is_parameters_sha256_digest(&self) -> bool {
        self.component_type == ComponentType::ParametersSha256Digest
    }

    fn has_marker(&self, marker: u8) -> bool {
        self.is_generic()
            && self.value.first() == Some(&marker)
            && matches!(self.value.len() - 1, 1 | 2 | 4 | 8)
    }

    /// Returns true for segment number components.
    pub fn is_segment(&self) -> bool {
        self.has_marker(marker::SEGMENT)
    }

    /// Returns true for segment byte offset components.
    pub fn is_segment_offset(&self) -> bool {
        self.has_marker(marker::SEGMENT_OFFSET)
    }

    /// Returns true for version components.
    pub fn is_version(&self) -> bool {
        self.has_marker(marker::VERSION)
    }

    /// Returns true for timestamp components.
    pub fn is_timestamp(&self) -> bool {
        self.has_marker(marker::TIMESTAMP)
    }

    /// Returns true for sequence number components.
    pub fn is_sequence_number(&self) -> bool {
        self.has_marker(marker::SEQUENCE_NUMBER)
    }

    /// Interprets the whole value as nonNegativeInteger.
    pub fn to_number(&self) -> Result<u64, DecodingError> {
        decode_non_negative_integer(&self.value)
    }

    /// Interprets the value as `marker` followed by a nonNegativeInteger.
    pub fn to_number_with_marker(&self, marker: u8) -> Result<u64, DecodingError> {
        match self.value.split_first() {
            Some((first, rest)) if *first == marker => decode_non_negative_integer(rest),
            _ => {
                Err(DecodingError::InvalidValue {
                    field: "NameComponent",
                    reason: format!("component does not start with marker {marker:#04x}"),
                })
            }
        }
    }

    /// Returns the segment number.
    pub fn to_segment(&self) -> Result<u64, DecodingError> {
        self.to_number_with_marker(marker::SEGMENT)
    }

    /// Returns the segment byte offset.
    pub fn to_segment_offset(&self) -> Result<u64, DecodingError> {
        self.to_number_with_marker(marker::SEGMENT_OFFSET)
    }

    /// Returns the version.
    pub fn to_version(&self) -> Result<u64, DecodingError> {
        self.to_number_with_marker(marker::VERSION)
    }

    /// Returns the timestamp in microseconds since the UNIX epoch.
    pub fn to_timestamp(&self) -> Result<u64, DecodingError> {
        self.to_number_with_marker(marker::TIMESTAMP)
    }

    /// Returns the sequence number.
    pub fn to_sequence_number(&self) -> Result<u64, DecodingError> {
        self.to_number_with_marker(marker::SEQUENCE_NUMBER)
    }

    /// Appends the URI form of the component to `out`.
    pub fn write_uri(&self, out: &mut String) {
        match self.component_type {
            ComponentType::ImplicitSha256Digest => {
                out.push_str(IMPLICIT_SHA256_DIGEST_PREFIX);
                out.push_str(&hex::encode(&self.value));
            }
            ComponentType::ParametersSha256Digest => {
                out.push_str(PARAMETERS_SHA256_DIGEST_PREFIX);
                out.push_str(&hex::encode(&self.value));
            }
            ComponentType::Generic => escape_value(&self.value, out),
            ComponentType::Other(code) => {
                out.push_str(&code.to_string());
                out.push('=');
                escape_value(&self.value, out);
            }
        }
    }

    /// Returns the URI form of the component.
    pub fn to_uri(&self) -> String {
        let mut out = String::new();
        self.write_uri(&mut out);
        out
    }

    /// Parses a single URI segment.
    ///
    /// Returns `None` for the segments `.` and `..`, which do not denote a component.
    pub(crate) fn parse_uri_segment(text: &str) -> Result<Option<Self>, NameParseError> {
        if let Some(hex) = text.strip_prefix(IMPLICIT_SHA256_DIGEST_PREFIX) {
            return Self::from_implicit_sha256_digest(decode_hex(hex)?).map(Some);
        }
        if let Some(hex) = text.strip_prefix(PARAMETERS_SHA256_DIGEST_PREFIX) {
            return Self::from_parameters_sha256_digest(decode_hex(hex)?).map(Some);
        }

        let (component_type, escaped) = match text.split_once('=') {
            Some((code, rest)) if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) => {
                let code: u64 = code
                    .parse()
                    .map_err(|_| NameParseError::InvalidType(text.to_string()))?;
                (ComponentType::from(code), rest)
            }
            _ => (ComponentType::Generic, text),
        };

        Ok(unescape_value(escaped)?.map(|value| Self::with_type(value, component_type)))
    }
}
impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        self.component_type
            .cmp(&other.component_type)
            .then_with(|| self.value.as_ref().cmp(other.value.as_ref()))
    }
}
impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
impl FromStr for Component {
    type Err = NameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_uri_segment(s)?.ok_or_else(|| NameParseError::IllegalComponent(s.to_string()))
    }
}

fn decode_hex(text: &str) -> Result<Vec<u8>, NameParseError> {
    hex::decode(text).map_err(|_| NameParseError::InvalidDigest(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_order_by_type_then_bytes() {
        let digest = Component::from_implicit_sha256_digest([0xff; 32].to_vec()).unwrap();
        let a = Component::new("a");
        let ab = Component::new("ab");
        let b = Component::new("b");
        let other = Component::with_type("a", ComponentType::Other(9));

        assert!(digest < a);
        assert!(a < ab);
        assert!(ab < b);
        assert!(b < other);
        assert_eq!(a.cmp(&Component::new("a")), Ordering::Equal);
    }

    #[test]
    fn should_order_shorter_first_on_prefix_tie() {
        assert!(Component::new("") < Component::new("\0"));
        assert!(Component::new("abc") < Component::new("abcd"));
        // Lexicographic, not length first.
        assert!(Component::new("b") > Component::new("abcd"));
    }

    #[test]
    fn should_roundtrip_extensible_type_codes() {
        for code in [1u64, 2, 8, 0, 3, 32, 0xfd00] {
            assert_eq!(u64::from(ComponentType::from(code)), code);
        }
        assert_eq!(ComponentType::from(8), ComponentType::Generic);
        assert_eq!(ComponentType::from(33), ComponentType::Other(33));
    }

    #[test]
    fn should_render_digest_components_as_hex() {
        let digest = Component::from_implicit_sha256_digest(vec![0xab; 32]).unwrap();
        assert_eq!(digest.to_uri(), format!("sha256digest={}", "ab".repeat(32)));

        let params = Component::from_parameters_sha256_digest(vec![0x01; 32]).unwrap();
        assert_eq!(params.to_uri(), format!("params-sha256={}", "01".repeat(32)));
    }

    #[test]
    fn should_reject_short_digest() {
        assert_eq!(
            Component::from_implicit_sha256_digest(vec![0; 4]),
            Err(NameParseError::InvalidDigestLength(4))
        );
    }

    #[test]
    fn should_parse_uri_segments() {
        assert_eq!("abc".parse::<Component>().unwrap(), Component::new("abc"));
        assert_eq!(
            "42=%00x".parse::<Component>().unwrap(),
            Component::with_type(&b"\0x"[..], ComponentType::Other(42))
        );
        assert_eq!(
            "8=abc".parse::<Component>().unwrap(),
            Component::new("abc"),
            "typed generic component"
        );
        assert!(".".parse::<Component>().is_err());
        assert!("sha256digest=zz".parse::<Component>().is_err());
    }

    #[test]
    fn should_roundtrip_uri_form() {
        let components = [
            Component::new(""),
            Component::new("a b"),
            Component::from_segment(7),
            Component::with_type("x", ComponentType::Other(100)),
            Component::from_implicit_sha256_digest(vec![0x5a; 32]).unwrap(),
        ];
        for component in components {
            assert_eq!(component.to_uri().parse::<Component>().unwrap(), component);
        }
    }

    #[test]
    fn should_encode_marked_numbers() {
        let segment = Component::from_segment(0x0102);
        assert_eq!(segment.value().as_ref(), &[0x00, 0x01, 0x02]);
        assert!(segment.is_segment());
        assert!(!segment.is_version());
        assert_eq!(segment.to_segment().unwrap(), 0x0102);
        assert!(segment.to_version().is_err());

        let version = Component::from_version(1 << 40);
        assert_eq!(version.value().len(), 9);
        assert_eq!(version.to_version().unwrap(), 1 << 40);

        assert_eq!(Component::from_number(300).to_number().unwrap(), 300);
    }
}
