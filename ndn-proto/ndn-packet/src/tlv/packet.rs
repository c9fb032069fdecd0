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

//! NDN-TLV encoding of names, interests, data packets and delegation sets.

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use rand::RngCore;

use super::{reader::TlvReader, types, writer::TlvWriter};
use crate::{
    config::PacketConfig,
    data::Data,
    delegation_set::DelegationSet,
    exclude::{Exclude, ExcludeEntry},
    interest::{ChildSelector, Interest},
    key_locator::{KeyLocator, KeyLocatorKind, KeyNameType},
    meta_info::{ContentType, MetaInfo},
    name::{Component, ComponentType, Name},
    signature::{
        DigestSha256Signature, GenericSignature, HmacWithSha256Signature, Sha256WithEcdsaSignature,
        Sha256WithRsaSignature, Signature, SignatureType, ValidityPeriod,
    },
    wire::{DecodingError, EncodingError, SignedBlob},
};

/// Text form of validity period bounds.
const VALIDITY_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

// Name
//

/// Writes a Name element.
///
/// Returns the range from the first component to the start of the last component, relative to
/// `writer`.
pub(super) fn write_name(
    writer: &mut TlvWriter,
    name: &Name,
) -> Result<(usize, usize), EncodingError> {
    let mut last_component_start = 0;
    let value_offset = writer.put_nested(types::NAME, |w| {
        for component in name {
            last_component_start = w.len();
            w.put_tlv(component.component_type().code(), component.value());
        }
        Ok(())
    })?;
    Ok((value_offset, value_offset + last_component_start))
}

/// Reads a Name element.
///
/// Returns the name and the absolute range from the first component to the start of the last
/// component.
pub(super) fn read_name(
    reader: &mut TlvReader<'_>,
    parent_end: usize,
) -> Result<(Name, (usize, usize)), DecodingError> {
    let end = reader.read_nested_begin(types::NAME, parent_end)?;
    let begin = reader.offset();
    let mut last_component_start = begin;

    let mut components = Vec::new();
    while reader.offset() < end {
        last_component_start = reader.offset();
        let (tlv_type, value) = reader.read_any(end)?;
        components.push(Component::with_type(value, ComponentType::from(tlv_type)));
    }

    Ok((Name::from_components(components), (begin, last_component_start)))
}

// Interest
//

pub(super) fn encode_interest(
    config: &PacketConfig,
    interest: &Interest,
) -> Result<SignedBlob, EncodingError> {
    let mut writer = TlvWriter::new();
    let mut signed = (0, 0);
    let value_offset = writer.put_nested(types::INTEREST, |w| {
        signed = write_name(w, interest.name())?;

        if has_selectors(interest) {
            w.put_nested(types::SELECTORS, |w| write_selectors(w, interest))?;
        }

        let mut nonce = interest.nonce();
        if nonce.is_empty() {
            let mut generated = vec![0u8; config.nonce_length];
            rand::thread_rng().fill_bytes(&mut generated);
            nonce = Bytes::from(generated);
        }
        w.put_tlv(types::NONCE, &nonce);

        w.put_optional_non_negative_integer_tlv(types::SCOPE, interest.scope().map(u64::from));
        w.put_optional_non_negative_integer_tlv(
            types::INTEREST_LIFETIME,
            interest.interest_lifetime().map(duration_millis),
        );
        if interest.has_link() {
            w.put_raw(interest.link_wire_encoding());
        }
        w.put_optional_non_negative_integer_tlv(
            types::SELECTED_DELEGATION,
            interest.selected_delegation_index().map(u64::from),
        );
        Ok(())
    })?;

    Ok(SignedBlob::new(
        writer.freeze(),
        value_offset + signed.0,
        value_offset + signed.1,
    ))
}

fn has_selectors(interest: &Interest) -> bool {
    interest.min_suffix_components().is_some()
        || interest.max_suffix_components().is_some()
        || !interest.key_locator().is_none()
        || !interest.exclude().is_empty()
        || interest.child_selector().is_some()
        || interest.must_be_fresh()
}

fn write_selectors(writer: &mut TlvWriter, interest: &Interest) -> Result<(), EncodingError> {
    writer.put_optional_non_negative_integer_tlv(
        types::MIN_SUFFIX_COMPONENTS,
        interest.min_suffix_components().map(u64::from),
    );
    writer.put_optional_non_negative_integer_tlv(
        types::MAX_SUFFIX_COMPONENTS,
        interest.max_suffix_components().map(u64::from),
    );
    if !interest.key_locator().is_none() {
        writer.put_nested(types::PUBLISHER_PUBLIC_KEY_LOCATOR, |w| {
            write_key_locator_value(w, interest.key_locator())
        })?;
    }
    if !interest.exclude().is_empty() {
        writer.put_nested(types::EXCLUDE, |w| {
            write_exclude_value(w, interest.exclude());
            Ok(())
        })?;
    }
    writer.put_optional_non_negative_integer_tlv(
        types::CHILD_SELECTOR,
        interest.child_selector().map(ChildSelector::code),
    );
    if interest.must_be_fresh() {
        writer.put_empty_tlv(types::MUST_BE_FRESH);
    }
    Ok(())
}

fn write_exclude_value(writer: &mut TlvWriter, exclude: &Exclude) {
    for entry in exclude.entries() {
        match entry {
            ExcludeEntry::Any => writer.put_empty_tlv(types::ANY),
            ExcludeEntry::Component(component) => {
                writer.put_tlv(component.component_type().code(), component.value());
            }
        }
    }
}

pub(super) fn decode_interest(input: &Bytes) -> Result<(Interest, SignedBlob), DecodingError> {
    let mut reader = TlvReader::new(input);
    let end = reader.read_nested_begin(types::INTEREST, input.len())?;

    let mut interest = Interest::new();
    let (name, signed) = read_name(&mut reader, end)?;
    interest.set_name(name);

    if reader.peek(types::SELECTORS, end) {
        let selectors_end = reader.read_nested_begin(types::SELECTORS, end)?;
        read_selectors(&mut reader, selectors_end, &mut interest)?;
        reader.finish_nested(selectors_end)?;
    } else {
        interest.set_must_be_fresh(false);
    }

    let nonce = reader.read_blob_tlv(types::NONCE, end)?;
    interest.set_scope(read_optional_u32(&mut reader, types::SCOPE, end)?);
    interest.set_interest_lifetime(
        reader
            .read_optional_non_negative_integer_tlv(types::INTEREST_LIFETIME, end)?
            .map(Duration::from_millis),
    );
    if reader.peek(types::DATA, end) {
        let link_start = reader.offset();
        reader.read_blob_tlv(types::DATA, end)?;
        interest.set_link_wire_encoding(reader.slice_from(link_start));
    }
    interest.set_selected_delegation_index(read_optional_u32(
        &mut reader,
        types::SELECTED_DELEGATION,
        end,
    )?);
    reader.finish_nested(end)?;

    // Last, since every other setter invalidates the nonce.
    interest.set_nonce(nonce);

    let encoding = SignedBlob::new(reader.slice_from(0), signed.0, signed.1);
    Ok((interest, encoding))
}

fn read_selectors(
    reader: &mut TlvReader<'_>,
    end: usize,
    interest: &mut Interest,
) -> Result<(), DecodingError> {
    interest.set_min_suffix_components(read_optional_u32(
        reader,
        types::MIN_SUFFIX_COMPONENTS,
        end,
    )?);
    interest.set_max_suffix_components(read_optional_u32(
        reader,
        types::MAX_SUFFIX_COMPONENTS,
        end,
    )?);

    if reader.peek(types::PUBLISHER_PUBLIC_KEY_LOCATOR, end) {
        let locator_end = reader.read_nested_begin(types::PUBLISHER_PUBLIC_KEY_LOCATOR, end)?;
        interest.set_key_locator(read_key_locator_value(reader, locator_end)?);
        reader.finish_nested(locator_end)?;
    }

    if reader.peek(types::EXCLUDE, end) {
        let exclude_end = reader.read_nested_begin(types::EXCLUDE, end)?;
        let mut exclude = Exclude::new();
        while reader.offset() < exclude_end {
            let (tlv_type, value) = reader.read_any(exclude_end)?;
            if tlv_type == types::ANY {
                exclude.append_any();
            } else {
                exclude.append_component(Component::with_type(value, ComponentType::from(tlv_type)));
            }
        }
        interest.set_exclude(exclude);
    }

    interest.set_child_selector(
        reader
            .read_optional_non_negative_integer_tlv(types::CHILD_SELECTOR, end)?
            .map(ChildSelector::try_from)
            .transpose()?,
    );
    let must_be_fresh = reader.read_boolean_tlv(types::MUST_BE_FRESH, end)?;
    interest.set_must_be_fresh(must_be_fresh);
    Ok(())
}

// Data
//

pub(super) fn encode_data(data: &Data) -> Result<SignedBlob, EncodingError> {
    let mut writer = TlvWriter::new();
    let mut signed = (0, 0);
    let value_offset = writer.put_nested(types::DATA, |w| {
        let begin = w.len();
        write_name(w, data.name())?;
        w.put_nested(types::META_INFO, |w| {
            write_meta_info_value(w, data.meta_info());
            Ok(())
        })?;
        w.put_tlv(types::CONTENT, data.content());
        write_signature_info(w, data.signature())?;
        signed = (begin, w.len());
        w.put_tlv(types::SIGNATURE_VALUE, data.signature().signature());
        Ok(())
    })?;

    Ok(SignedBlob::new(
        writer.freeze(),
        value_offset + signed.0,
        value_offset + signed.1,
    ))
}

fn write_meta_info_value(writer: &mut TlvWriter, meta_info: &MetaInfo) {
    if meta_info.content_type() != ContentType::Blob {
        writer.put_non_negative_integer_tlv(types::CONTENT_TYPE, meta_info.content_type().into());
    }
    writer.put_optional_non_negative_integer_tlv(
        types::FRESHNESS_PERIOD,
        meta_info.freshness_period().map(duration_millis),
    );
    if let Some(final_block_id) = meta_info.final_block_id() {
        let mut component = TlvWriter::new();
        component.put_tlv(final_block_id.component_type().code(), final_block_id.value());
        writer.put_tlv(types::FINAL_BLOCK_ID, &component.freeze());
    }
}

pub(super) fn decode_data(input: &Bytes) -> Result<(Data, SignedBlob), DecodingError> {
    let mut reader = TlvReader::new(input);
    let end = reader.read_nested_begin(types::DATA, input.len())?;
    let signed_begin = reader.offset();

    let mut data = Data::new();
    let (name, _) = read_name(&mut reader, end)?;
    data.set_name(name);

    if reader.peek(types::META_INFO, end) {
        let meta_end = reader.read_nested_begin(types::META_INFO, end)?;
        data.set_meta_info(read_meta_info_value(&mut reader, meta_end)?);
        reader.finish_nested(meta_end)?;
    }

    data.set_content(
        reader
            .read_optional_blob_tlv(types::CONTENT, end)?
            .unwrap_or_default(),
    );

    let info_start = reader.offset();
    reader.read_blob_tlv(types::SIGNATURE_INFO, end)?;
    let signed_end = reader.offset();
    let signature_info = reader.slice_from(info_start);

    let value_start = reader.offset();
    reader.read_blob_tlv(types::SIGNATURE_VALUE, end)?;
    let signature_value = reader.slice_from(value_start);
    data.set_signature(decode_signature(&signature_info, &signature_value)?);
    reader.finish_nested(end)?;

    let encoding = SignedBlob::new(reader.slice_from(0), signed_begin, signed_end);
    Ok((data, encoding))
}

fn read_meta_info_value(reader: &mut TlvReader<'_>, end: usize) -> Result<MetaInfo, DecodingError> {
    let mut meta_info = MetaInfo::new();
    if let Some(code) = reader.read_optional_non_negative_integer_tlv(types::CONTENT_TYPE, end)? {
        let content_type = ContentType::from(code);
        if let ContentType::Other(code) = content_type {
            tracing::debug!(code, "unrecognized content type");
        }
        meta_info.set_content_type(content_type);
    }
    meta_info.set_freshness_period(
        reader
            .read_optional_non_negative_integer_tlv(types::FRESHNESS_PERIOD, end)?
            .map(Duration::from_millis),
    );
    if reader.peek(types::FINAL_BLOCK_ID, end) {
        let id_end = reader.read_nested_begin(types::FINAL_BLOCK_ID, end)?;
        let (tlv_type, value) = reader.read_any(id_end)?;
        meta_info.set_final_block_id(Some(Component::with_type(
            value,
            ComponentType::from(tlv_type),
        )));
        reader.finish_nested(id_end)?;
    }
    Ok(meta_info)
}

// Signature
//

/// Writes the SignatureInfo element of `signature`.
pub(super) fn write_signature_info(
    writer: &mut TlvWriter,
    signature: &Signature,
) -> Result<(), EncodingError> {
    if let Signature::Generic(generic) = signature {
        if generic.signature_info().is_empty() {
            return Err(EncodingError::InvalidStructure(
                "generic signature without signature info",
            ));
        }
        writer.put_raw(generic.signature_info());
        return Ok(());
    }

    writer.put_nested(types::SIGNATURE_INFO, |w| {
        let signature_type = signature
            .signature_type()
            .ok_or(EncodingError::InvalidStructure("missing signature type"))?;
        w.put_non_negative_integer_tlv(types::SIGNATURE_TYPE, signature_type.into());

        if let Some(key_locator) = signature.key_locator()
            && !key_locator.is_none()
        {
            w.put_nested(types::KEY_LOCATOR, |w| write_key_locator_value(w, key_locator))?;
        }
        if let Some(validity_period) = signature.validity_period() {
            write_validity_period(w, validity_period)?;
        }
        Ok(())
    })?;
    Ok(())
}

fn write_validity_period(
    writer: &mut TlvWriter,
    validity_period: &ValidityPeriod,
) -> Result<(), EncodingError> {
    let (Some(not_before), Some(not_after)) =
        (validity_period.not_before(), validity_period.not_after())
    else {
        return Ok(());
    };
    writer.put_nested(types::VALIDITY_PERIOD, |w| {
        w.put_tlv(
            types::NOT_BEFORE,
            not_before.format(VALIDITY_TIME_FORMAT).to_string().as_bytes(),
        );
        w.put_tlv(
            types::NOT_AFTER,
            not_after.format(VALIDITY_TIME_FORMAT).to_string().as_bytes(),
        );
        Ok(())
    })?;
    Ok(())
}

/// Decodes a signature from its SignatureInfo and SignatureValue elements.
pub(super) fn decode_signature(
    signature_info: &Bytes,
    signature_value: &Bytes,
) -> Result<Signature, DecodingError> {
    let mut reader = TlvReader::new(signature_info);
    let end = reader.read_nested_begin(types::SIGNATURE_INFO, signature_info.len())?;
    let type_code = reader.read_non_negative_integer_tlv(types::SIGNATURE_TYPE, end)?;

    let mut signature = match SignatureType::from(type_code) {
        SignatureType::DigestSha256 => Signature::from(DigestSha256Signature::new()),
        SignatureType::HmacWithSha256 => {
            let mut hmac = HmacWithSha256Signature::new();
            if let Some(key_locator) = read_optional_key_locator(&mut reader, end)? {
                hmac.set_key_locator(key_locator);
            }
            Signature::from(hmac)
        }
        SignatureType::Sha256WithRsa => {
            let mut rsa = Sha256WithRsaSignature::new();
            if let Some(key_locator) = read_optional_key_locator(&mut reader, end)? {
                rsa.set_key_locator(key_locator);
            }
            if let Some(period) = read_optional_validity_period(&mut reader, end)? {
                rsa.set_validity_period(period);
            }
            Signature::from(rsa)
        }
        SignatureType::Sha256WithEcdsa => {
            let mut ecdsa = Sha256WithEcdsaSignature::new();
            if let Some(key_locator) = read_optional_key_locator(&mut reader, end)? {
                ecdsa.set_key_locator(key_locator);
            }
            if let Some(period) = read_optional_validity_period(&mut reader, end)? {
                ecdsa.set_validity_period(period);
            }
            Signature::from(ecdsa)
        }
        SignatureType::Other(code) => {
            tracing::debug!(code, "unrecognized signature type, keeping signature info as is");
            let mut generic = GenericSignature::new();
            generic.set_signature_info(signature_info.clone(), Some(code));
            Signature::from(generic)
        }
    };
    if !matches!(signature, Signature::Generic(_)) {
        reader.finish_nested(end)?;
    }

    let mut value_reader = TlvReader::new(signature_value);
    signature.set_signature(
        value_reader.read_blob_tlv(types::SIGNATURE_VALUE, signature_value.len())?,
    );
    Ok(signature)
}

fn read_optional_key_locator(
    reader: &mut TlvReader<'_>,
    end: usize,
) -> Result<Option<KeyLocator>, DecodingError> {
    if !reader.peek(types::KEY_LOCATOR, end) {
        return Ok(None);
    }
    let locator_end = reader.read_nested_begin(types::KEY_LOCATOR, end)?;
    let key_locator = read_key_locator_value(reader, locator_end)?;
    reader.finish_nested(locator_end)?;
    Ok(Some(key_locator))
}

fn read_optional_validity_period(
    reader: &mut TlvReader<'_>,
    end: usize,
) -> Result<Option<ValidityPeriod>, DecodingError> {
    if !reader.peek(types::VALIDITY_PERIOD, end) {
        return Ok(None);
    }
    let period_end = reader.read_nested_begin(types::VALIDITY_PERIOD, end)?;
    let not_before = parse_validity_time(&reader.read_blob_tlv(types::NOT_BEFORE, period_end)?)?;
    let not_after = parse_validity_time(&reader.read_blob_tlv(types::NOT_AFTER, period_end)?)?;
    reader.finish_nested(period_end)?;
    Ok(Some(ValidityPeriod::with_period(not_before, not_after)))
}

fn parse_validity_time(value: &[u8]) -> Result<DateTime<Utc>, DecodingError> {
    let invalid = |reason: String| {
        DecodingError::InvalidValue {
            field: "ValidityPeriod",
            reason,
        }
    };
    let text = std::str::from_utf8(value).map_err(|err| invalid(err.to_string()))?;
    NaiveDateTime::parse_from_str(text, VALIDITY_TIME_FORMAT)
        .map(|time| time.and_utc())
        .map_err(|err| invalid(format!("{text:?}: {err}")))
}

// KeyLocator
//

fn write_key_locator_value(
    writer: &mut TlvWriter,
    key_locator: &KeyLocator,
) -> Result<(), EncodingError> {
    match key_locator.kind() {
        KeyLocatorKind::None => Ok(()),
        KeyLocatorKind::KeyName { name, .. } => write_name(writer, name.get()).map(|_| ()),
        KeyLocatorKind::KeyLocatorDigest(digest) => {
            writer.put_tlv(types::KEY_LOCATOR_DIGEST, digest);
            Ok(())
        }
        KeyLocatorKind::Key(_) | KeyLocatorKind::Certificate(_) => {
            Err(EncodingError::Unsupported("KeyLocator with embedded key or certificate"))
        }
    }
}

fn read_key_locator_value(
    reader: &mut TlvReader<'_>,
    end: usize,
) -> Result<KeyLocator, DecodingError> {
    if reader.peek(types::NAME, end) {
        let (name, _) = read_name(reader, end)?;
        let mut key_locator = KeyLocator::new();
        key_locator.set_key_name(name, KeyNameType::None);
        return Ok(key_locator);
    }
    if let Some(digest) = reader.read_optional_blob_tlv(types::KEY_LOCATOR_DIGEST, end)? {
        return Ok(KeyLocator::from_key_digest(digest));
    }
    Ok(KeyLocator::new())
}

// DelegationSet
//

pub(super) fn encode_delegation_set(set: &DelegationSet) -> Result<Bytes, EncodingError> {
    let mut writer = TlvWriter::new();
    for delegation in set {
        writer.put_nested(types::LINK_DELEGATION, |w| {
            w.put_non_negative_integer_tlv(types::LINK_PREFERENCE, delegation.preference);
            write_name(w, &delegation.name).map(|_| ())
        })?;
    }
    Ok(writer.freeze())
}

pub(super) fn decode_delegation_set(input: &Bytes) -> Result<DelegationSet, DecodingError> {
    let mut reader = TlvReader::new(input);
    let mut set = DelegationSet::new();
    while reader.offset() < input.len() {
        let end = reader.read_nested_begin(types::LINK_DELEGATION, input.len())?;
        let preference = reader.read_non_negative_integer_tlv(types::LINK_PREFERENCE, end)?;
        let (name, _) = read_name(&mut reader, end)?;
        reader.finish_nested(end)?;
        set.add_unsorted(preference, name);
    }
    Ok(set)
}

// Helpers
//

fn read_optional_u32(
    reader: &mut TlvReader<'_>,
    tlv_type: u64,
    end: usize,
) -> Result<Option<u32>, DecodingError> {
    reader
        .read_optional_non_negative_integer_tlv(tlv_type, end)?
        .map(|value| {
            u32::try_from(value).map_err(|_| {
                DecodingError::InvalidValue {
                    field: "selector",
                    reason: format!("{value} does not fit 32 bits"),
                }
            })
        })
        .transpose()
}

/// Milliseconds of `duration`, saturating at `u64::MAX`.
pub(super) fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn name(uri: &str) -> Name {
        Name::from_uri(uri).unwrap()
    }

    #[test]
    fn should_encode_name_components_with_their_types() {
        let mut n = name("/a");
        n.append(Component::with_type("x", ComponentType::Other(0xfd)));
        let mut writer = TlvWriter::new();
        let signed = write_name(&mut writer, &n).unwrap();

        assert_eq!(
            writer.freeze().as_ref(),
            &[0x07, 8, 0x08, 1, b'a', 0xfd, 0x00, 0xfd, 1, b'x'][..]
        );
        assert_eq!(signed, (2, 5));
    }

    #[test]
    fn should_sign_interest_name_without_last_component() {
        let mut interest = Interest::with_name(name("/a/b"));
        interest.set_nonce(vec![0; 4]);
        let encoding = encode_interest(&PacketConfig::default(), &interest).unwrap();

        // Interest header, Name header, then the first component only.
        assert_eq!(encoding.signed_begin(), 4);
        assert_eq!(encoding.signed_portion().as_ref(), &[0x08, 1, b'a']);

        let (_, decoded) = decode_interest(encoding.bytes()).unwrap();
        assert_eq!(decoded, encoding);
    }

    #[test]
    fn should_generate_nonce_of_configured_length() {
        let config = PacketConfig {
            nonce_length: 8,
            ..Default::default()
        };
        let encoding = encode_interest(&config, &Interest::with_name(name("/a"))).unwrap();
        let (decoded, _) = decode_interest(encoding.bytes()).unwrap();
        assert_eq!(decoded.nonce().len(), 8);
    }

    #[test]
    fn should_omit_blob_content_type() {
        let mut writer = TlvWriter::new();
        write_meta_info_value(&mut writer, &MetaInfo::new());
        assert!(writer.freeze().is_empty());
    }

    #[test]
    fn should_sign_data_from_name_through_signature_info() {
        let mut data = Data::with_name(name("/a"));
        data.set_signature(DigestSha256Signature::new());
        data.set_content(&b"c"[..]);
        let encoding = encode_data(&data).unwrap();

        let signed = encoding.signed_portion();
        assert_eq!(signed[0], 0x07);
        assert_eq!(&signed[signed.len() - 5..], &[0x16, 3, 0x1b, 1, 0]);

        let (_, decoded) = decode_data(encoding.bytes()).unwrap();
        assert_eq!(decoded, encoding);
    }

    #[test]
    fn should_reject_embedded_key_locators() {
        let mut rsa = Sha256WithRsaSignature::new();
        rsa.set_key_locator(KeyLocator::from_kind(KeyLocatorKind::Certificate(
            Bytes::from_static(b"cert"),
        )));
        let mut writer = TlvWriter::new();
        assert_eq!(
            write_signature_info(&mut writer, &rsa.into()),
            Err(EncodingError::Unsupported(
                "KeyLocator with embedded key or certificate"
            ))
        );
    }

    #[test]
    fn should_roundtrip_validity_period() {
        let mut ecdsa = Sha256WithEcdsaSignature::new();
        let not_before = Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 0).unwrap();
        let not_after = Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap();
        ecdsa.validity_period_mut().set_period(not_before, not_after);
        ecdsa.set_signature(vec![1, 2]);
        let signature = Signature::from(ecdsa);

        let mut info = TlvWriter::new();
        write_signature_info(&mut info, &signature).unwrap();
        let info = info.freeze();
        assert!(
            info.windows(15)
                .any(|window| window == b"20240229T123000")
        );

        let mut value = TlvWriter::new();
        value.put_tlv(types::SIGNATURE_VALUE, &[1, 2]);
        let decoded = decode_signature(&info, &value.freeze()).unwrap();
        assert_eq!(decoded, signature);
    }

    #[test_log::test]
    fn should_keep_unknown_signature_info_verbatim() {
        let info = Bytes::from_static(&[0x16, 6, 0x1b, 1, 200, 0x80, 1, 0xaa]);
        let value = Bytes::from_static(&[0x17, 1, 0x55]);
        let signature = decode_signature(&info, &value).unwrap();

        assert_eq!(signature.signature_type(), Some(SignatureType::Other(200)));
        let Signature::Generic(generic) = &signature else {
            panic!("expected generic signature, got {signature:?}");
        };
        assert_eq!(generic.signature_info(), &info);

        let mut writer = TlvWriter::new();
        write_signature_info(&mut writer, &signature).unwrap();
        assert_eq!(writer.freeze(), info);
    }

    #[test]
    fn should_reject_invalid_validity_time() {
        assert!(parse_validity_time(b"2024-01-01").is_err());
        assert_eq!(
            parse_validity_time(b"20240101T000000").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }
}
