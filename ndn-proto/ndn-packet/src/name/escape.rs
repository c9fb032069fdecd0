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

//! Percent-escaping of component values in NDN URIs.

use std::fmt::Write as _;

use super::NameParseError;

/// Returns true for bytes written verbatim in a URI.
#[inline]
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'-' | b'.' | b'_')
}

/// Appends the escaped form of `value` to `out`.
///
/// Values consisting only of periods (including the empty value) get three extra periods, since
/// `.` and `..` are reserved in URIs.
pub(crate) fn escape_value(value: &[u8], out: &mut String) {
    if value.iter().all(|b| *b == b'.') {
        out.push_str("...");
        out.extend(std::iter::repeat_n('.', value.len()));
        return;
    }

    for &byte in value {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            // Writing to a String cannot fail.
            let _ = write!(out, "%{byte:02X}");
        }
    }
}

/// Reverses [`escape_value`] on a single URI segment.
///
/// Returns `None` for `.` and `..`, which do not denote a component.
pub(crate) fn unescape_value(text: &str) -> Result<Option<Vec<u8>>, NameParseError> {
    let raw = text.as_bytes();
    let mut value = Vec::with_capacity(raw.len());

    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' {
            let byte = raw
                .get(i + 1..i + 3)
                .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| NameParseError::InvalidEscape(text.to_string()))?;
            value.push(byte);
            i += 3;
        } else {
            value.push(raw[i]);
            i += 1;
        }
    }

    if value.iter().all(|b| *b == b'.') {
        if value.len() <= 2 {
            return Ok(None);
        }
        value.truncate(value.len() - 3);
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(value: &[u8]) -> String {
        let mut out = String::new();
        escape_value(value, &mut out);
        out
    }

    #[test]
    fn should_keep_unreserved_bytes() {
        assert_eq!(escaped(b"abc-XYZ_0.9+"), "abc-XYZ_0.9+");
    }

    #[test]
    fn should_escape_reserved_bytes_upper_case() {
        assert_eq!(escaped(b"a b/c"), "a%20b%2Fc");
        assert_eq!(escaped(&[0x00, 0xfd, 0x3d]), "%00%FD%3D");
    }

    #[test]
    fn should_pad_period_only_values() {
        assert_eq!(escaped(b""), "...");
        assert_eq!(escaped(b"."), "....");
        assert_eq!(escaped(b".."), ".....");
    }

    #[test]
    fn should_reverse_escaping() {
        for value in [&b""[..], b".", b"..", b"a%b", &[0x00, 0xff, b'/']] {
            assert_eq!(
                unescape_value(&escaped(value)).unwrap(),
                Some(value.to_vec()),
                "value {value:?}"
            );
        }
    }

    #[test]
    fn should_ignore_dot_segments() {
        assert_eq!(unescape_value(".").unwrap(), None);
        assert_eq!(unescape_value("..").unwrap(), None);
        assert_eq!(unescape_value("").unwrap(), None);
    }

    #[test]
    fn should_reject_broken_escapes() {
        assert!(unescape_value("%4").is_err());
        assert!(unescape_value("%zz").is_err());
    }

    #[test]
    fn should_reject_signed_escapes() {
        assert!(unescape_value("%+f").is_err());
        assert!(unescape_value("%-1").is_err());
        assert_eq!(unescape_value("%0f").unwrap(), Some(vec![0x0f]));
    }
}
