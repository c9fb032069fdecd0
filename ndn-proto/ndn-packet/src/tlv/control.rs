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

//! NDN-TLV encoding of link-layer nacks and forwarder management records.

use std::time::Duration;

use bytes::Bytes;

use super::{
    packet::{duration_millis, read_name, write_name},
    reader::TlvReader,
    types,
    writer::TlvWriter,
};
use crate::{
    control::{ControlParameters, ControlResponse, ForwardingFlags},
    nack::{NackReason, NetworkNack},
    wire::{DecodingError, EncodingError},
};

// NetworkNack
//

pub(super) fn encode_network_nack(nack: &NetworkNack) -> Result<Bytes, EncodingError> {
    let mut writer = TlvWriter::new();
    writer.put_nested(types::LP_NACK, |w| {
        if nack.reason() != NackReason::None {
            w.put_non_negative_integer_tlv(types::LP_NACK_REASON, nack.reason().into());
        }
        Ok(())
    })?;
    Ok(writer.freeze())
}

pub(super) fn decode_network_nack(input: &Bytes) -> Result<NetworkNack, DecodingError> {
    let mut reader = TlvReader::new(input);
    let end = reader.read_nested_begin(types::LP_NACK, input.len())?;
    let reason = reader
        .read_optional_non_negative_integer_tlv(types::LP_NACK_REASON, end)?
        .map(NackReason::from)
        .unwrap_or_default();
    if let NackReason::Other(code) = reason {
        tracing::debug!(code, "unrecognized nack reason");
    }
    reader.finish_nested(end)?;
    Ok(NetworkNack::with_reason(reason))
}

// ControlParameters
//

pub(super) fn encode_control_parameters(
    parameters: &ControlParameters,
) -> Result<Bytes, EncodingError> {
    let mut writer = TlvWriter::new();
    write_control_parameters(&mut writer, parameters)?;
    Ok(writer.freeze())
}

fn write_control_parameters(
    writer: &mut TlvWriter,
    parameters: &ControlParameters,
) -> Result<(), EncodingError> {
    writer.put_nested(types::CONTROL_PARAMETERS, |w| {
        if let Some(name) = &parameters.name {
            write_name(w, name)?;
        }
        w.put_optional_non_negative_integer_tlv(types::FACE_ID, parameters.face_id);
        if let Some(uri) = &parameters.uri {
            w.put_tlv(types::URI, uri.as_bytes());
        }
        w.put_optional_non_negative_integer_tlv(
            types::LOCAL_CONTROL_FEATURE,
            parameters.local_control_feature,
        );
        w.put_optional_non_negative_integer_tlv(types::ORIGIN, parameters.origin);
        w.put_optional_non_negative_integer_tlv(types::COST, parameters.cost);
        if parameters.forwarding_flags != ForwardingFlags::default() {
            w.put_non_negative_integer_tlv(types::FLAGS, parameters.forwarding_flags.bits());
        }
        if let Some(strategy) = &parameters.strategy {
            w.put_nested(types::STRATEGY, |w| write_name(w, strategy).map(|_| ()))?;
        }
        w.put_optional_non_negative_integer_tlv(
            types::EXPIRATION_PERIOD,
            parameters.expiration_period.map(duration_millis),
        );
        Ok(())
    })?;
    Ok(())
}

pub(super) fn decode_control_parameters(
    input: &Bytes,
) -> Result<ControlParameters, DecodingError> {
    let mut reader = TlvReader::new(input);
    read_control_parameters(&mut reader, input.len())
}

fn read_control_parameters(
    reader: &mut TlvReader<'_>,
    parent_end: usize,
) -> Result<ControlParameters, DecodingError> {
    let end = reader.read_nested_begin(types::CONTROL_PARAMETERS, parent_end)?;
    let mut parameters = ControlParameters::new();

    if reader.peek(types::NAME, end) {
        parameters.name = Some(read_name(reader, end)?.0);
    }
    parameters.face_id = reader.read_optional_non_negative_integer_tlv(types::FACE_ID, end)?;
    parameters.uri = reader
        .read_optional_blob_tlv(types::URI, end)?
        .map(|uri| utf8_field("Uri", &uri))
        .transpose()?;
    parameters.local_control_feature =
        reader.read_optional_non_negative_integer_tlv(types::LOCAL_CONTROL_FEATURE, end)?;
    parameters.origin = reader.read_optional_non_negative_integer_tlv(types::ORIGIN, end)?;
    parameters.cost = reader.read_optional_non_negative_integer_tlv(types::COST, end)?;
    if let Some(bits) = reader.read_optional_non_negative_integer_tlv(types::FLAGS, end)? {
        parameters.forwarding_flags = ForwardingFlags::from_bits_retain(bits);
    }
    if reader.peek(types::STRATEGY, end) {
        let strategy_end = reader.read_nested_begin(types::STRATEGY, end)?;
        parameters.strategy = Some(read_name(reader, strategy_end)?.0);
        reader.finish_nested(strategy_end)?;
    }
    parameters.expiration_period = reader
        .read_optional_non_negative_integer_tlv(types::EXPIRATION_PERIOD, end)?
        .map(Duration::from_millis);

    reader.finish_nested(end)?;
    Ok(parameters)
}

// ControlResponse
//

pub(super) fn encode_control_response(response: &ControlResponse) -> Result<Bytes, EncodingError> {
    let mut writer = TlvWriter::new();
    writer.put_nested(types::CONTROL_RESPONSE, |w| {
        w.put_non_negative_integer_tlv(types::STATUS_CODE, response.status_code);
        w.put_tlv(types::STATUS_TEXT, response.status_text.as_bytes());
        if let Some(body) = &response.body {
            write_control_parameters(w, body)?;
        }
        Ok(())
    })?;
    Ok(writer.freeze())
}

pub(super) fn decode_control_response(input: &Bytes) -> Result<ControlResponse, DecodingError> {
    let mut reader = TlvReader::new(input);
    let end = reader.read_nested_begin(types::CONTROL_RESPONSE, input.len())?;

    let status_code = reader.read_non_negative_integer_tlv(types::STATUS_CODE, end)?;
    let status_text = utf8_field("StatusText", &reader.read_blob_tlv(types::STATUS_TEXT, end)?)?;
    let mut response = ControlResponse::new(status_code, status_text);
    if reader.peek(types::CONTROL_PARAMETERS, end) {
        response.body = Some(read_control_parameters(&mut reader, end)?);
    }

    reader.finish_nested(end)?;
    Ok(response)
}

fn utf8_field(field: &'static str, value: &[u8]) -> Result<String, DecodingError> {
    String::from_utf8(value.to_vec()).map_err(|err| {
        DecodingError::InvalidValue {
            field,
            reason: err.to_string(),
        }
    })
}
