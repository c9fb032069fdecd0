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

//! TLV element reader.
//!
//! The reader walks a shared [`Bytes`] buffer and hands out values as zero-copy slices of it.
//! Nested elements are read by remembering the end offset of the parent value and passing it to
//! every read inside the parent.

use bytes::Bytes;

use super::types::is_critical;
use crate::wire::DecodingError;

/// Decodes a nonNegativeInteger from its 1, 2, 4 or 8 byte big-endian form.
pub(crate) fn decode_non_negative_integer(bytes: &[u8]) -> Result<u64, DecodingError> {
    match *bytes {
        [a] => Ok(a as u64),
        [a, b] => Ok(u16::from_be_bytes([a, b]) as u64),
        [a, b, c, d] => Ok(u32::from_be_bytes([a, b, c, d]) as u64),
        [a, b, c, d, e, f, g, h] => Ok(u64::from_be_bytes([a, b, c, d, e, f, g, h])),
        _ => Err(DecodingError::InvalidNonNegativeIntegerLength(bytes.len())),
    }
}

/// Reads TLV elements from a buffer.
pub(crate) struct TlvReader<'a> {
    input: &'a Bytes,
    offset: usize,
}
impl<'a> TlvReader<'a> {
    pub(crate) fn new(input: &'a Bytes) -> Self {
        Self { input, offset: 0 }
    }

    /// Current read offset.
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Reads a type or length number.
    fn read_var_number(&mut self) -> Result<u64, DecodingError> {
        let first = *self
            .input
            .get(self.offset)
            .ok_or(DecodingError::Truncated {
                offset: self.offset,
            })?;
        let width = match first {
            253 => 2,
            254 => 4,
            255 => 8,
            value => {
                self.offset += 1;
                return Ok(value as u64);
            }
        };

        let start = self.offset + 1;
        let bytes = self
            .input
            .get(start..start + width)
            .ok_or(DecodingError::Truncated { offset: start })?;
        let value = decode_non_negative_integer(bytes)?;
        self.offset = start + width;
        Ok(value)
    }

    /// Reads an element header, returning the type and the end offset of its value.
    ///
    /// The value must end within `parent_end`.
    fn read_header(&mut self, parent_end: usize) -> Result<(u64, usize), DecodingError> {
        let element_offset = self.offset;
        let tlv_type = self.read_var_number()?;
        let length = self.read_var_number()?;

        let value_end = usize::try_from(length)
            .ok()
            .and_then(|length| self.offset.checked_add(length))
            .ok_or(DecodingError::Truncated {
                offset: self.offset,
            })?;
        if value_end > self.input.len() {
            return Err(DecodingError::Truncated {
                offset: self.input.len(),
            });
        }
        if value_end > parent_end {
            return Err(DecodingError::Overrun {
                offset: element_offset,
                parent_end,
            });
        }
        Ok((tlv_type, value_end))
    }

    /// Returns the type of the next element without consuming it, or `None` at `parent_end`.
    pub(crate) fn peek_type(&self, parent_end: usize) -> Option<u64> {
        if self.offset >= parent_end {
            return None;
        }
        let mut probe = TlvReader {
            input: self.input,
            offset: self.offset,
        };
        probe.read_var_number().ok()
    }

    /// Returns true if the next element has type `tlv_type`.
    pub(crate) fn peek(&self, tlv_type: u64, parent_end: usize) -> bool {
        self.peek_type(parent_end) == Some(tlv_type)
    }

    /// Enters an element of type `expected` and returns the end offset of its value.
    pub(crate) fn read_nested_begin(
        &mut self,
        expected: u64,
        parent_end: usize,
    ) -> Result<usize, DecodingError> {
        let element_offset = self.offset;
        let (tlv_type, value_end) = self.read_header(parent_end)?;
        if tlv_type != expected {
            return Err(DecodingError::UnexpectedType {
                expected,
                actual: tlv_type,
                offset: element_offset,
            });
        }
        Ok(value_end)
    }

    /// Leaves a nested element, skipping trailing non-critical elements.
    pub(crate) fn finish_nested(&mut self, value_end: usize) -> Result<(), DecodingError> {
        while self.offset < value_end {
            let (tlv_type, end) = self.read_header(value_end)?;
            if is_critical(tlv_type) {
                return Err(DecodingError::UnrecognizedCriticalType(tlv_type));
            }
            tracing::trace!(tlv_type, "skipping unrecognized non-critical element");
            self.offset = end;
        }
        Ok(())
    }

    /// Reads any element, returning its type and value.
    pub(crate) fn read_any(&mut self, parent_end: usize) -> Result<(u64, Bytes), DecodingError> {
        let (tlv_type, value_end) = self.read_header(parent_end)?;
        let value = self.input.slice(self.offset..value_end);
        self.offset = value_end;
        Ok((tlv_type, value))
    }

    /// Reads an element of type `expected` and returns its value.
    pub(crate) fn read_blob_tlv(
        &mut self,
        expected: u64,
        parent_end: usize,
    ) -> Result<Bytes, DecodingError> {
        let value_end = self.read_nested_begin(expected, parent_end)?;
        let value = self.input.slice(self.offset..value_end);
        self.offset = value_end;
        Ok(value)
    }

    pub(crate) fn read_optional_blob_tlv(
        &mut self,
        expected: u64,
        parent_end: usize,
    ) -> Result<Option<Bytes>, DecodingError> {
        if self.peek(expected, parent_end) {
            self.read_blob_tlv(expected, parent_end).map(Some)
        } else {
            Ok(None)
        }
    }

    pub(crate) fn read_non_negative_integer_tlv(
        &mut self,
        expected: u64,
        parent_end: usize,
    ) -> Result<u64, DecodingError> {
        let value = self.read_blob_tlv(expected, parent_end)?;
        decode_non_negative_integer(&value)
    }

    pub(crate) fn read_optional_non_negative_integer_tlv(
        &mut self,
        expected: u64,
        parent_end: usize,
    ) -> Result<Option<u64>, DecodingError> {
        if self.peek(expected, parent_end) {
            self.read_non_negative_integer_tlv(expected, parent_end)
                .map(Some)
        } else {
            Ok(None)
        }
    }

    /// Reads a presence flag element, returning whether it was there.
    pub(crate) fn read_boolean_tlv(
        &mut self,
        expected: u64,
        parent_end: usize,
    ) -> Result<bool, DecodingError> {
        if self.peek(expected, parent_end) {
            self.read_blob_tlv(expected, parent_end)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Returns `start..self.offset()` of the input.
    pub(crate) fn slice_from(&self, start: usize) -> Bytes {
        self.input.slice(start..self.offset)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn should_decode_integer_widths() {
        assert_eq!(decode_non_negative_integer(&[7]).unwrap(), 7);
        assert_eq!(decode_non_negative_integer(&[1, 0]).unwrap(), 256);
        assert_eq!(decode_non_negative_integer(&[0, 1, 0, 0]).unwrap(), 0x1_0000);
        assert_eq!(
            decode_non_negative_integer(&[0, 0, 0, 1, 0, 0, 0, 0]).unwrap(),
            1 << 32
        );
        assert_eq!(
            decode_non_negative_integer(&[0, 0, 0]),
            Err(DecodingError::InvalidNonNegativeIntegerLength(3))
        );
        assert!(decode_non_negative_integer(&[]).is_err());
    }

    #[test]
    fn should_read_long_var_numbers() {
        let input = Bytes::from_static(&[253, 0x03, 0x20, 0x00]);
        let mut reader = TlvReader::new(&input);
        let (tlv_type, value) = reader.read_any(input.len()).unwrap();
        assert_eq!(tlv_type, 0x0320);
        assert!(value.is_empty());
    }

    #[test]
    fn should_reject_truncated_value() {
        let input = Bytes::from_static(&[0x08, 5, b'a']);
        let mut reader = TlvReader::new(&input);
        assert_matches!(
            reader.read_blob_tlv(0x08, input.len()),
            Err(DecodingError::Truncated { .. })
        );
    }

    #[test]
    fn should_reject_overrun_of_parent() {
        let input = Bytes::from_static(&[0x07, 2, 0x08, 2, b'a', b'b']);
        let mut reader = TlvReader::new(&input);
        let end = reader.read_nested_begin(0x07, input.len()).unwrap();
        assert_matches!(
            reader.read_blob_tlv(0x08, end),
            Err(DecodingError::Overrun { offset: 2, parent_end: 4 })
        );
    }

    #[test]
    fn should_report_unexpected_type() {
        let input = Bytes::from_static(&[0x06, 0]);
        let mut reader = TlvReader::new(&input);
        assert_eq!(
            reader.read_nested_begin(0x05, input.len()),
            Err(DecodingError::UnexpectedType {
                expected: 0x05,
                actual: 0x06,
                offset: 0
            })
        );
    }

    #[test_log::test]
    fn should_skip_non_critical_and_reject_critical_leftovers() {
        let non_critical = Bytes::from_static(&[0x07, 3, 0x80, 1, 0xaa]);
        let mut reader = TlvReader::new(&non_critical);
        let end = reader.read_nested_begin(0x07, non_critical.len()).unwrap();
        reader.finish_nested(end).unwrap();
        assert_eq!(reader.offset(), non_critical.len());

        let critical = Bytes::from_static(&[0x07, 2, 0x81, 0]);
        let mut reader = TlvReader::new(&critical);
        let end = reader.read_nested_begin(0x07, critical.len()).unwrap();
        assert_eq!(
            reader.finish_nested(end),
            Err(DecodingError::UnrecognizedCriticalType(0x81))
        );
    }

    #[test]
    fn should_slice_without_copying() {
        let input = Bytes::from(vec![0x15, 3, 1, 2, 3]);
        let mut reader = TlvReader::new(&input);
        let value = reader.read_blob_tlv(0x15, input.len()).unwrap();
        assert_eq!(value.as_ptr(), input[2..].as_ptr());
    }
}
