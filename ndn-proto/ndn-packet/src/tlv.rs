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

//! The NDN-TLV wire format.
//!
//! Every element is a type number, a length and a value. Type and length use a variable width
//! encoding of 1, 3, 5 or 9 bytes. Decoding skips unknown elements of non-critical types and
//! fails on unknown elements of critical types, see [`types::is_critical`].

use bytes::Bytes;

use crate::{
    config::PacketConfig,
    control::{ControlParameters, ControlResponse},
    data::Data,
    delegation_set::DelegationSet,
    interest::Interest,
    nack::NetworkNack,
    name::Name,
    signature::Signature,
    wire::{DecodingError, EncodingError, SignedBlob, WireFormat},
};

mod control;
mod packet;
pub(crate) mod reader;
pub mod types;
pub(crate) mod writer;

/// The NDN-TLV wire format.
#[derive(Debug, Clone, Default)]
pub struct TlvWireFormat {
    config: PacketConfig,
}
impl TlvWireFormat {
    /// Creates the wire format with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the wire format with the given configuration.
    pub fn with_config(config: PacketConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PacketConfig {
        &self.config
    }

    fn check_size(&self, input: &Bytes) -> Result<(), DecodingError> {
        if input.len() > self.config.max_packet_size {
            tracing::debug!(
                size = input.len(),
                max = self.config.max_packet_size,
                "rejecting oversized input"
            );
            return Err(DecodingError::PacketTooLarge {
                size: input.len(),
                max: self.config.max_packet_size,
            });
        }
        Ok(())
    }
}

impl WireFormat for TlvWireFormat {
    fn encode_name(&self, name: &Name) -> Result<Bytes, EncodingError> {
        let mut writer = writer::TlvWriter::new();
        packet::write_name(&mut writer, name)?;
        Ok(writer.freeze())
    }

    fn decode_name(&self, input: &Bytes) -> Result<Name, DecodingError> {
        self.check_size(input)?;
        let mut reader = reader::TlvReader::new(input);
        Ok(packet::read_name(&mut reader, input.len())?.0)
    }

    fn encode_interest(&self, interest: &Interest) -> Result<SignedBlob, EncodingError> {
        packet::encode_interest(&self.config, interest)
    }

    fn decode_interest(&self, input: &Bytes) -> Result<(Interest, SignedBlob), DecodingError> {
        self.check_size(input)?;
        packet::decode_interest(input)
    }

    fn encode_data(&self, data: &Data) -> Result<SignedBlob, EncodingError> {
        packet::encode_data(data)
    }

    fn decode_data(&self, input: &Bytes) -> Result<(Data, SignedBlob), DecodingError> {
        self.check_size(input)?;
        packet::decode_data(input)
    }

    fn encode_signature_info(&self, signature: &Signature) -> Result<Bytes, EncodingError> {
        let mut writer = writer::TlvWriter::new();
        packet::write_signature_info(&mut writer, signature)?;
        Ok(writer.freeze())
    }

    fn decode_signature_info_and_value(
        &self,
        signature_info: &Bytes,
        signature_value: &Bytes,
    ) -> Result<Signature, DecodingError> {
        self.check_size(signature_info)?;
        self.check_size(signature_value)?;
        packet::decode_signature(signature_info, signature_value)
    }

    fn encode_delegation_set(&self, set: &DelegationSet) -> Result<Bytes, EncodingError> {
        packet::encode_delegation_set(set)
    }

    fn decode_delegation_set(&self, input: &Bytes) -> Result<DelegationSet, DecodingError> {
        self.check_size(input)?;
        packet::decode_delegation_set(input)
    }

    fn encode_network_nack(&self, nack: &NetworkNack) -> Result<Bytes, EncodingError> {
        control::encode_network_nack(nack)
    }

    fn decode_network_nack(&self, input: &Bytes) -> Result<NetworkNack, DecodingError> {
        self.check_size(input)?;
        control::decode_network_nack(input)
    }

    fn encode_control_parameters(
        &self,
        parameters: &ControlParameters,
    ) -> Result<Bytes, EncodingError> {
        control::encode_control_parameters(parameters)
    }

    fn decode_control_parameters(&self, input: &Bytes) -> Result<ControlParameters, DecodingError> {
        self.check_size(input)?;
        control::decode_control_parameters(input)
    }

    fn encode_control_response(&self, response: &ControlResponse) -> Result<Bytes, EncodingError> {
        control::encode_control_response(response)
    }

    fn decode_control_response(&self, input: &Bytes) -> Result<ControlResponse, DecodingError> {
        self.check_size(input)?;
        control::decode_control_response(input)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn should_reject_oversized_input() {
        let format = TlvWireFormat::with_config(PacketConfig {
            max_packet_size: 4,
            ..Default::default()
        });
        let input = Bytes::from_static(&[0x07, 3, 0x08, 1, b'a']);
        assert_eq!(
            format.decode_name(&input),
            Err(DecodingError::PacketTooLarge { size: 5, max: 4 })
        );
        assert_eq!(
            TlvWireFormat::new().decode_name(&input).unwrap().to_uri(),
            "/a"
        );
    }

    #[test]
    fn should_encode_signature_info_without_value() {
        let format = TlvWireFormat::new();
        let info = format
            .encode_signature_info(&Signature::DigestSha256(Default::default()))
            .unwrap();
        assert_eq!(info.as_ref(), &[0x16, 3, 0x1b, 1, 0]);

        let value = Bytes::from_static(&[0x17, 2, 0xab, 0xcd]);
        let signature = format.decode_signature_info_and_value(&info, &value).unwrap();
        assert_eq!(signature.signature().as_ref(), &[0xab, 0xcd]);
    }

    #[test]
    fn should_reject_unknown_critical_interest_element() {
        // Interest { Name, Nonce, 0x25 (critical) }
        let input = Bytes::from_static(&[
            0x05, 0x0c, 0x07, 0x00, 0x0a, 0x04, 1, 2, 3, 4, 0x25, 0x02, 0, 0,
        ]);
        assert_eq!(
            TlvWireFormat::new().decode_interest(&input),
            Err(DecodingError::UnrecognizedCriticalType(0x25))
        );
    }

    #[test_log::test]
    fn should_skip_unknown_non_critical_interest_element() {
        let input = Bytes::from_static(&[
            0x05, 0x0c, 0x07, 0x00, 0x0a, 0x04, 1, 2, 3, 4, 0x24, 0x02, 0, 0,
        ]);
        let (interest, encoding) = TlvWireFormat::new().decode_interest(&input).unwrap();
        assert_eq!(interest.nonce().as_ref(), &[1, 2, 3, 4]);
        assert_eq!(encoding.bytes(), &input);
    }

    #[test]
    fn should_require_interest_type() {
        assert_matches!(
            TlvWireFormat::new().decode_interest(&Bytes::from_static(&[0x06, 0])),
            Err(DecodingError::UnexpectedType { expected: 0x05, .. })
        );
    }
}
