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

//! Tests for encoding and decoding packets with the NDN-TLV wire format.
//!
//! 1. Decoding an encoded packet yields an equal packet
//! 2. The decoded packet reports the same signed portion as the encoder
//! 3. Decoding arbitrary input fails cleanly instead of panicking

use std::time::Duration;

use bytes::Bytes;
use chrono::DateTime;
use ndn_packet::{
    Component, ComponentType, Data, Interest, Name,
    control::{ControlParameters, ControlResponse, ForwardingFlags},
    delegation_set::DelegationSet,
    exclude::Exclude,
    interest::ChildSelector,
    key_locator::KeyLocator,
    meta_info::ContentType,
    nack::{NackReason, NetworkNack},
    signature::{
        DigestSha256Signature, HmacWithSha256Signature, Sha256WithEcdsaSignature,
        Sha256WithRsaSignature, Signature, validity_period::ValidityPeriod,
    },
    tlv::TlvWireFormat,
};
use proptest::{
    collection::vec,
    option,
    prelude::{Just, Strategy, any},
    prop_assert_eq, prop_oneof, proptest,
    test_runner::Config as ProptestConfig,
};

fn component() -> impl Strategy<Value = Component> {
    prop_oneof![
        4 => vec(any::<u8>(), 0..8).prop_map(Component::new),
        1 => (vec(any::<u8>(), 0..4), 3u64..0x300)
            .prop_map(|(value, code)| Component::with_type(value, ComponentType::from(code))),
        1 => vec(any::<u8>(), 32)
            .prop_map(|digest| Component::with_type(digest, ComponentType::ImplicitSha256Digest)),
    ]
}

fn name() -> impl Strategy<Value = Name> {
    vec(component(), 0..5).prop_map(Name::from_components)
}

fn exclude() -> impl Strategy<Value = Exclude> {
    vec(option::of(vec(any::<u8>(), 0..4)), 0..4).prop_map(|entries| {
        let mut exclude = Exclude::new();
        for entry in entries {
            match entry {
                Some(value) => exclude.append_component(Component::new(value)),
                None => exclude.append_any(),
            };
        }
        exclude
    })
}

fn key_locator() -> impl Strategy<Value = KeyLocator> {
    prop_oneof![
        Just(KeyLocator::new()),
        name().prop_map(KeyLocator::from_key_name),
        vec(any::<u8>(), 1..33).prop_map(KeyLocator::from_key_digest),
    ]
}

fn validity_period() -> impl Strategy<Value = ValidityPeriod> {
    option::of((0i64..4_000_000_000, 0i64..4_000_000_000)).prop_map(|bounds| {
        match bounds {
            Some((a, b)) => {
                ValidityPeriod::with_period(
                    DateTime::from_timestamp(a.min(b), 0).unwrap(),
                    DateTime::from_timestamp(a.max(b), 0).unwrap(),
                )
            }
            None => ValidityPeriod::new(),
        }
    })
}

fn signature() -> impl Strategy<Value = Signature> {
    let value = vec(any::<u8>(), 0..64);
    prop_oneof![
        value.clone().prop_map(|value| {
            let mut digest = DigestSha256Signature::new();
            digest.set_signature(value);
            Signature::from(digest)
        }),
        (value.clone(), key_locator()).prop_map(|(value, key_locator)| {
            let mut hmac = HmacWithSha256Signature::new();
            hmac.set_signature(value);
            hmac.set_key_locator(key_locator);
            Signature::from(hmac)
        }),
        (value.clone(), key_locator(), validity_period()).prop_map(
            |(value, key_locator, period)| {
                let mut rsa = Sha256WithRsaSignature::new();
                rsa.set_signature(value);
                rsa.set_key_locator(key_locator);
                rsa.set_validity_period(period);
                Signature::from(rsa)
            }
        ),
        (value, key_locator(), validity_period()).prop_map(|(value, key_locator, period)| {
            let mut ecdsa = Sha256WithEcdsaSignature::new();
            ecdsa.set_signature(value);
            ecdsa.set_key_locator(key_locator);
            ecdsa.set_validity_period(period);
            Signature::from(ecdsa)
        }),
    ]
}

#[derive(Debug, Clone)]
struct InterestFields {
    name: Name,
    min_suffix: Option<u32>,
    max_suffix: Option<u32>,
    key_locator: KeyLocator,
    exclude: Exclude,
    child_selector: Option<ChildSelector>,
    must_be_fresh: bool,
    scope: Option<u32>,
    lifetime_ms: Option<u32>,
    nonce: Vec<u8>,
    selected_delegation: Option<u32>,
}
impl InterestFields {
    fn build(self) -> Interest {
        let mut interest = Interest::with_name(self.name);
        interest
            .set_min_suffix_components(self.min_suffix)
            .set_max_suffix_components(self.max_suffix)
            .set_key_locator(self.key_locator)
            .set_exclude(self.exclude)
            .set_child_selector(self.child_selector)
            .set_must_be_fresh(self.must_be_fresh)
            .set_scope(self.scope)
            .set_interest_lifetime(self.lifetime_ms.map(|ms| Duration::from_millis(ms.into())))
            .set_selected_delegation_index(self.selected_delegation)
            // Last, every other setter clears the nonce.
            .set_nonce(self.nonce);
        interest
    }
}

fn interest() -> impl Strategy<Value = Interest> {
    let selectors = (
        option::of(any::<u32>()),
        option::of(any::<u32>()),
        key_locator(),
        exclude(),
        option::of(prop_oneof![
            Just(ChildSelector::Leftmost),
            Just(ChildSelector::Rightmost)
        ]),
        any::<bool>(),
    );
    let rest = (
        option::of(any::<u32>()),
        option::of(any::<u32>()),
        vec(any::<u8>(), 1..9),
        option::of(any::<u32>()),
    );
    (name(), selectors, rest).prop_map(
        |(
            name,
            (min_suffix, max_suffix, key_locator, exclude, child_selector, must_be_fresh),
            (scope, lifetime_ms, nonce, selected_delegation),
        )| {
            InterestFields {
                name,
                min_suffix,
                max_suffix,
                key_locator,
                exclude,
                child_selector,
                must_be_fresh,
                scope,
                lifetime_ms,
                nonce,
                selected_delegation,
            }
            .build()
        },
    )
}

fn data() -> impl Strategy<Value = Data> {
    (
        name(),
        any::<u64>().prop_map(ContentType::from),
        option::of(any::<u32>()),
        option::of(component()),
        vec(any::<u8>(), 0..128),
        signature(),
    )
        .prop_map(
            |(name, content_type, freshness_ms, final_block_id, content, signature)| {
                let mut data = Data::with_name(name);
                data.meta_info_mut()
                    .set_content_type(content_type)
                    .set_freshness_period(freshness_ms.map(|ms| Duration::from_millis(ms.into())))
                    .set_final_block_id(final_block_id);
                data.set_content(content).set_signature(signature);
                data
            },
        )
}

fn control_parameters() -> impl Strategy<Value = ControlParameters> {
    (
        option::of(name()),
        option::of(any::<u64>()),
        option::of("[a-z]{2,5}://[ -~]{0,12}"),
        option::of(any::<u64>()),
        option::of(any::<u64>()),
        option::of(any::<u64>()),
        any::<u64>().prop_map(ForwardingFlags::from_bits_retain),
        option::of(name()),
        option::of(any::<u32>()),
    )
        .prop_map(
            |(name, face_id, uri, local_control_feature, origin, cost, flags, strategy, ms)| {
                ControlParameters {
                    name,
                    face_id,
                    uri,
                    local_control_feature,
                    origin,
                    cost,
                    forwarding_flags: flags,
                    strategy,
                    expiration_period: ms.map(|ms| Duration::from_millis(ms.into())),
                }
            },
        )
}

#[test]
fn interest_should_roundtrip() {
    proptest!(ProptestConfig::with_cases(500), |(interest in interest())| {
        let encoding = interest.wire_encode().unwrap();

        let mut decoded = Interest::new();
        decoded.wire_decode(encoding.bytes().clone()).unwrap();

        prop_assert_eq!(&decoded, &interest);
        prop_assert_eq!(decoded.must_be_fresh(), interest.must_be_fresh());
        prop_assert_eq!(decoded.wire_encode_with(&TlvWireFormat::new()).unwrap(), encoding);
    });
}

#[test]
fn interest_signed_portion_should_exclude_last_component() {
    proptest!(|(interest in interest())| {
        let encoding = interest.wire_encode().unwrap();
        let prefix = interest.name().get_prefix(-1);

        let signed = encoding.signed_portion();
        let mut expected = 0;
        for component in prefix.components() {
            // Every component here is shorter than 253 bytes.
            expected += 2 + component.value().len()
                + usize::from(component.component_type().code() >= 253) * 2;
        }
        prop_assert_eq!(signed.len(), expected);
    });
}

#[test]
fn data_should_roundtrip() {
    proptest!(ProptestConfig::with_cases(500), |(data in data())| {
        let encoding = data.wire_encode().unwrap();

        let mut decoded = Data::new();
        decoded.wire_decode(encoding.bytes().clone()).unwrap();

        prop_assert_eq!(&decoded, &data);
        let reencoded = decoded.wire_encode_with(&TlvWireFormat::new()).unwrap();
        prop_assert_eq!(reencoded.bytes(), encoding.bytes());
        prop_assert_eq!(reencoded.signed_begin(), encoding.signed_begin());
        prop_assert_eq!(reencoded.signed_end(), encoding.signed_end());
    });
}

#[test]
fn delegation_set_should_keep_encoded_order() {
    proptest!(|(entries in vec((any::<u64>(), name()), 0..6))| {
        let mut set = DelegationSet::new();
        for (preference, name) in entries {
            set.add_unsorted(preference, name);
        }

        let decoded = DelegationSet::wire_decode(&set.wire_encode().unwrap()).unwrap();
        prop_assert_eq!(decoded, set);
    });
}

#[test]
fn network_nack_should_roundtrip_every_reason() {
    proptest!(|(code in any::<u64>())| {
        let nack = NetworkNack::with_reason(NackReason::from(code));
        let decoded = NetworkNack::wire_decode(&nack.wire_encode().unwrap()).unwrap();
        prop_assert_eq!(decoded.reason(), NackReason::from(code));
    });
}

#[test]
fn network_nack_should_keep_unknown_reason_code() {
    let mut nack = NetworkNack::new();
    nack.set_other_reason_code(7);
    assert_eq!(nack.reason(), NackReason::Other(7));

    let decoded = NetworkNack::wire_decode(&nack.wire_encode().unwrap()).unwrap();
    assert_eq!(decoded.reason(), NackReason::Other(7));
    assert_eq!(decoded.other_reason_code(), Some(7));
}

#[test]
fn control_parameters_should_roundtrip() {
    proptest!(|(parameters in control_parameters())| {
        let encoding = parameters.wire_encode().unwrap();
        prop_assert_eq!(ControlParameters::wire_decode(&encoding).unwrap(), parameters);
    });
}

#[test]
fn control_response_should_roundtrip() {
    proptest!(|(
        status_code in any::<u64>(),
        status_text in "\\PC{0,24}",
        body in option::of(control_parameters()),
    )| {
        let mut response = ControlResponse::new(status_code, status_text);
        response.body = body;

        let encoding = response.wire_encode().unwrap();
        prop_assert_eq!(ControlResponse::wire_decode(&encoding).unwrap(), response);
    });
}

#[test]
fn decoding_arbitrary_input_should_not_panic() {
    proptest!(ProptestConfig::with_cases(2000), |(input in vec(any::<u8>(), 0..96))| {
        let input = Bytes::from(input);
        let _ = Interest::new().wire_decode(input.clone());
        let _ = Data::new().wire_decode(input.clone());
        let _ = DelegationSet::wire_decode(&input);
        let _ = NetworkNack::wire_decode(&input);
        let _ = ControlParameters::wire_decode(&input);
        let _ = ControlResponse::wire_decode(&input);
    });
}

#[test]
fn decoding_truncated_packets_should_fail() {
    proptest!(|(data in data(), cut in any::<proptest::sample::Index>())| {
        let encoding = data.wire_encode().unwrap().into_bytes();
        let cut = cut.index(encoding.len());
        let truncated = encoding.slice(..cut);
        prop_assert_eq!(Data::new().wire_decode(truncated).is_err(), true);
    });
}
