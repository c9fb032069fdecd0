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

//! TLV element writer.

use bytes::{BufMut, Bytes, BytesMut};

use crate::wire::EncodingError;

/// Appends a TLV type or length number using the 1, 3, 5 or 9 byte form.
pub(crate) fn put_var_number(buf: &mut BytesMut, value: u64) {
    if value < 253 {
        buf.put_u8(value as u8);
    } else if value <= u16::MAX as u64 {
        buf.put_u8(253);
        buf.put_u16(value as u16);
    } else if value <= u32::MAX as u64 {
        buf.put_u8(254);
        buf.put_u32(value as u32);
    } else {
        buf.put_u8(255);
        buf.put_u64(value);
    }
}

/// Appends a nonNegativeInteger in the shortest of its 1, 2, 4 or 8 byte forms.
pub(crate) fn put_non_negative_integer(buf: &mut BytesMut, value: u64) {
    if value <= u8::MAX as u64 {
        buf.put_u8(value as u8);
    } else if value <= u16::MAX as u64 {
        buf.put_u16(value as u16);
    } else if value <= u32::MAX as u64 {
        buf.put_u32(value as u32);
    } else {
        buf.put_u64(value);
    }
}

/// Builds a sequence of TLV elements.
///
/// Nested elements are built in a child writer whose output becomes the value of the parent
/// element, see [`TlvWriter::put_nested`].
#[derive(Debug, Default)]
pub(crate) struct TlvWriter {
    buf: BytesMut,
}
impl TlvWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written so far.
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn put_tlv(&mut self, tlv_type: u64, value: &[u8]) {
        put_var_number(&mut self.buf, tlv_type);
        put_var_number(&mut self.buf, value.len() as u64);
        self.buf.put_slice(value);
    }

    /// Writes an element with an empty value, used for flags such as MustBeFresh.
    pub(crate) fn put_empty_tlv(&mut self, tlv_type: u64) {
        self.put_tlv(tlv_type, &[]);
    }

    pub(crate) fn put_non_negative_integer_tlv(&mut self, tlv_type: u64, value: u64) {
        let mut encoded = BytesMut::with_capacity(8);
        put_non_negative_integer(&mut encoded, value);
        self.put_tlv(tlv_type, &encoded);
    }

    pub(crate) fn put_optional_non_negative_integer_tlv(
        &mut self,
        tlv_type: u64,
        value: Option<u64>,
    ) {
        if let Some(value) = value {
            self.put_non_negative_integer_tlv(tlv_type, value);
        }
    }

    /// Writes an element whose value is produced by `write_value`.
    ///
    /// Returns the offset of the nested value within this writer.
    pub(crate) fn put_nested(
        &mut self,
        tlv_type: u64,
        write_value: impl FnOnce(&mut TlvWriter) -> Result<(), EncodingError>,
    ) -> Result<usize, EncodingError> {
        let mut child = TlvWriter::new();
        write_value(&mut child)?;

        put_var_number(&mut self.buf, tlv_type);
        put_var_number(&mut self.buf, child.buf.len() as u64);
        let value_offset = self.buf.len();
        self.buf.put_slice(&child.buf);
        Ok(value_offset)
    }

    /// Appends already encoded elements verbatim.
    pub(crate) fn put_raw(&mut self, encoded: &[u8]) {
        self.buf.put_slice(encoded);
    }

    pub(crate) fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var_number(value: u64) -> Vec<u8> {
        let mut buf = BytesMut::new();
        put_var_number(&mut buf, value);
        buf.to_vec()
    }

    fn non_negative_integer(value: u64) -> Vec<u8> {
        let mut buf = BytesMut::new();
        put_non_negative_integer(&mut buf, value);
        buf.to_vec()
    }

    #[test]
    fn should_pick_shortest_var_number_form() {
        assert_eq!(var_number(252), vec![252]);
        assert_eq!(var_number(253), vec![253, 0x00, 0xfd]);
        assert_eq!(var_number(0x1_0000), vec![254, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(var_number(1 << 32).len(), 9);
    }

    #[test]
    fn should_pick_shortest_integer_form() {
        assert_eq!(non_negative_integer(0), vec![0]);
        assert_eq!(non_negative_integer(256), vec![1, 0]);
        assert_eq!(non_negative_integer(0x1_0000).len(), 4);
        assert_eq!(non_negative_integer(u64::MAX).len(), 8);
    }

    #[test]
    fn should_prefix_nested_value_with_its_length() {
        let mut writer = TlvWriter::new();
        let offset = writer
            .put_nested(0x07, |w| {
                w.put_tlv(0x08, b"ab");
                Ok(())
            })
            .unwrap();
        assert_eq!(offset, 2);
        assert_eq!(writer.freeze().as_ref(), &[0x07, 4, 0x08, 2, b'a', b'b']);
    }
}
