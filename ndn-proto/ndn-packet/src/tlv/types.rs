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

//! NDN-TLV type numbers.

// Packet types
/// Interest packet.
pub const INTEREST: u64 = 0x05;
/// Data packet.
pub const DATA: u64 = 0x06;

// Common fields
/// Name.
pub const NAME: u64 = 0x07;
/// Implicit SHA-256 digest component.
pub const IMPLICIT_SHA256_DIGEST_COMPONENT: u64 = 0x01;
/// Generic name component.
pub const NAME_COMPONENT: u64 = 0x08;

// Interest fields
/// Selectors.
pub const SELECTORS: u64 = 0x09;
/// Nonce.
pub const NONCE: u64 = 0x0A;
/// Scope.
pub const SCOPE: u64 = 0x0B;
/// InterestLifetime.
pub const INTEREST_LIFETIME: u64 = 0x0C;
/// MinSuffixComponents.
pub const MIN_SUFFIX_COMPONENTS: u64 = 0x0D;
/// MaxSuffixComponents.
pub const MAX_SUFFIX_COMPONENTS: u64 = 0x0E;
/// PublisherPublicKeyLocator.
pub const PUBLISHER_PUBLIC_KEY_LOCATOR: u64 = 0x0F;
/// Exclude.
pub const EXCLUDE: u64 = 0x10;
/// ChildSelector.
pub const CHILD_SELECTOR: u64 = 0x11;
/// MustBeFresh.
pub const MUST_BE_FRESH: u64 = 0x12;
/// Any, within Exclude.
pub const ANY: u64 = 0x13;
/// SelectedDelegation.
pub const SELECTED_DELEGATION: u64 = 0x20;

// Data fields
/// MetaInfo.
pub const META_INFO: u64 = 0x14;
/// Content.
pub const CONTENT: u64 = 0x15;
/// SignatureInfo.
pub const SIGNATURE_INFO: u64 = 0x16;
/// SignatureValue.
pub const SIGNATURE_VALUE: u64 = 0x17;
/// ContentType.
pub const CONTENT_TYPE: u64 = 0x18;
/// FreshnessPeriod.
pub const FRESHNESS_PERIOD: u64 = 0x19;
/// FinalBlockId.
pub const FINAL_BLOCK_ID: u64 = 0x1A;
/// SignatureType.
pub const SIGNATURE_TYPE: u64 = 0x1B;
/// KeyLocator.
pub const KEY_LOCATOR: u64 = 0x1C;
/// KeyLocatorDigest.
pub const KEY_LOCATOR_DIGEST: u64 = 0x1D;
/// ValidityPeriod.
pub const VALIDITY_PERIOD: u64 = 0xFD;
/// NotBefore.
pub const NOT_BEFORE: u64 = 0xFE;
/// NotAfter.
pub const NOT_AFTER: u64 = 0xFF;

// Link fields
/// Preference.
pub const LINK_PREFERENCE: u64 = 0x1E;
/// Delegation.
pub const LINK_DELEGATION: u64 = 0x1F;

// NDNLPv2
/// Nack header.
pub const LP_NACK: u64 = 0x0320;
/// NackReason.
pub const LP_NACK_REASON: u64 = 0x0321;

// Management
/// ControlParameters.
pub const CONTROL_PARAMETERS: u64 = 0x68;
/// FaceId.
pub const FACE_ID: u64 = 0x69;
/// Cost.
pub const COST: u64 = 0x6A;
/// Strategy.
pub const STRATEGY: u64 = 0x6B;
/// Flags.
pub const FLAGS: u64 = 0x6C;
/// ExpirationPeriod.
pub const EXPIRATION_PERIOD: u64 = 0x6D;
/// LocalControlFeature.
pub const LOCAL_CONTROL_FEATURE: u64 = 0x6E;
/// Origin.
pub const ORIGIN: u64 = 0x6F;
/// Uri.
pub const URI: u64 = 0x72;
/// ControlResponse.
pub const CONTROL_RESPONSE: u64 = 0x65;
/// StatusCode.
pub const STATUS_CODE: u64 = 0x66;
/// StatusText.
pub const STATUS_TEXT: u64 = 0x67;

/// Returns true if an unrecognized element of this type must fail decoding.
///
/// Types below 32 are always critical, above that odd types are.
#[inline]
pub const fn is_critical(tlv_type: u64) -> bool {
    tlv_type < 32 || tlv_type & 1 == 1
}
