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

//! Data packet signatures.
//!
//! [`Signature`] is a closed set of schemes. Every scheme carries the signature bytes, which are
//! empty until the packet is signed. Which other fields exist depends on the scheme:
//!
//! | Scheme                 | KeyLocator | ValidityPeriod |
//! |------------------------|:----------:|:--------------:|
//! | DigestSha256           |            |                |
//! | HmacWithSha256         |     x      |                |
//! | Sha256WithRsa          |     x      |       x        |
//! | Sha256WithEcdsa        |     x      |       x        |
//! | Generic                |            |                |
//!
//! Nested key locators and validity periods are owned through [`ChangeTracker`]s, so edits made
//! through the `_mut` accessors show up in the signature's change count.

use bytes::Bytes;

use crate::{
    change::{ChangeCount, ChangeCountable, ChangeTracker},
    key_locator::KeyLocator,
};

pub mod validity_period;

pub use validity_period::ValidityPeriod;

/// Signature type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureType {
    /// Plain SHA-256 digest.
    DigestSha256,
    /// RSA over SHA-256.
    Sha256WithRsa,
    /// ECDSA over SHA-256.
    Sha256WithEcdsa,
    /// HMAC with SHA-256.
    HmacWithSha256,
    /// Other, unrecognized signature types.
    Other(u64),
}
impl From<u64> for SignatureType {
    fn from(value: u64) -> Self {
        match value {
            0 => SignatureType::DigestSha256,
            1 => SignatureType::Sha256WithRsa,
            3 => SignatureType::Sha256WithEcdsa,
            4 => SignatureType::HmacWithSha256,
            other => SignatureType::Other(other),
        }
    }
}
impl From<SignatureType> for u64 {
    fn from(val: SignatureType) -> Self {
        match val {
            SignatureType::DigestSha256 => 0,
            SignatureType::Sha256WithRsa => 1,
            SignatureType::Sha256WithEcdsa => 3,
            SignatureType::HmacWithSha256 => 4,
            SignatureType::Other(other) => other,
        }
    }
}

/// A SHA-256 digest over the signed portion, without a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestSha256Signature {
    signature: Bytes,
    changes: ChangeCount,
}
impl DigestSha256Signature {
    /// Creates an unsigned signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the signature bytes.
    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    /// Sets the signature bytes.
    pub fn set_signature(&mut self, signature: impl Into<Bytes>) {
        self.signature = signature.into();
        self.changes.bump();
    }
}
impl ChangeCountable for DigestSha256Signature {
    fn change_count(&self) -> u64 {
        self.changes.get()
    }
}

/// An HMAC with SHA-256, keyed by a shared secret named by the key locator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HmacWithSha256Signature {
    signature: Bytes,
    key_locator: ChangeTracker<KeyLocator>,
    changes: ChangeCount,
}
impl HmacWithSha256Signature {
    /// Creates an unsigned signature without key locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the signature bytes.
    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    /// Sets the signature bytes.
    pub fn set_signature(&mut self, signature: impl Into<Bytes>) {
        self.signature = signature.into();
        self.changes.bump();
    }

    /// Returns the key locator.
    pub fn key_locator(&self) -> &KeyLocator {
        self.key_locator.get()
    }

    /// Returns the key locator for in-place editing.
    pub fn key_locator_mut(&mut self) -> &mut KeyLocator {
        self.key_locator.get_mut()
    }

    /// Replaces the key locator.
    pub fn set_key_locator(&mut self, key_locator: KeyLocator) {
        self.key_locator.set(key_locator);
        self.changes.bump();
    }
}
impl ChangeCountable for HmacWithSha256Signature {
    fn change_count(&self) -> u64 {
        if self.key_locator.check_changed() {
            self.changes.bump();
        }
        self.changes.get()
    }
}

/// Generates a public-key signature scheme carrying a key locator and a validity period.
macro_rules! gen_public_key_signature {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            signature: Bytes,
            key_locator: ChangeTracker<KeyLocator>,
            validity_period: ChangeTracker<ValidityPeriod>,
            changes: ChangeCount,
        }
        impl $name {
            /// Creates an unsigned signature without key locator or validity period.
            pub fn new() -> Self {
                Self::default()
            }

            /// Returns the signature bytes.
            pub fn signature(&self) -> &Bytes {
                &self.signature
            }

            /// Sets the signature bytes.
            pub fn set_signature(&mut self, signature: impl Into<Bytes>) {
                self.signature = signature.into();
                self.changes.bump();
            }

            /// Returns the key locator.
            pub fn key_locator(&self) -> &KeyLocator {
                self.key_locator.get()
            }

            /// Returns the key locator for in-place editing.
            pub fn key_locator_mut(&mut self) -> &mut KeyLocator {
                self.key_locator.get_mut()
            }

            /// Replaces the key locator.
            pub fn set_key_locator(&mut self, key_locator: KeyLocator) {
                self.key_locator.set(key_locator);
                self.changes.bump();
            }

            /// Returns the validity period.
            pub fn validity_period(&self) -> &ValidityPeriod {
                self.validity_period.get()
            }

            /// Returns the validity period for in-place editing.
            pub fn validity_period_mut(&mut self) -> &mut ValidityPeriod {
                self.validity_period.get_mut()
            }

            /// Replaces the validity period.
            pub fn set_validity_period(&mut self, validity_period: ValidityPeriod) {
                self.validity_period.set(validity_period);
                self.changes.bump();
            }
        }
        impl ChangeCountable for $name {
            fn change_count(&self) -> u64 {
                let changed =
                    self.key_locator.check_changed() | self.validity_period.check_changed();
                if changed {
                    self.changes.bump();
                }
                self.changes.get()
            }
        }
    };
}

gen_public_key_signature!(
    /// An RSA signature over the SHA-256 digest of the signed portion.
    Sha256WithRsaSignature
);
gen_public_key_signature!(
    /// An ECDSA signature over the SHA-256 digest of the signed portion.
    Sha256WithEcdsaSignature
);

/// A signature of a scheme this crate does not model.
///
/// Keeps the encoded signature info verbatim so that it is reproduced unchanged on encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericSignature {
    signature: Bytes,
    signature_info: Bytes,
    type_code: Option<u64>,
    changes: ChangeCount,
}
impl GenericSignature {
    /// Creates an empty generic signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the signature bytes.
    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    /// Sets the signature bytes.
    pub fn set_signature(&mut self, signature: impl Into<Bytes>) {
        self.signature = signature.into();
        self.changes.bump();
    }

    /// Returns the encoded signature info.
    pub fn signature_info(&self) -> &Bytes {
        &self.signature_info
    }

    /// Returns the signature type code found in the signature info, if known.
    pub fn type_code(&self) -> Option<u64> {
        self.type_code
    }

    /// Sets the encoded signature info together with the type code it carries.
    pub fn set_signature_info(&mut self, signature_info: impl Into<Bytes>, type_code: Option<u64>) {
        self.signature_info = signature_info.into();
        self.type_code = type_code;
        self.changes.bump();
    }
}
impl ChangeCountable for GenericSignature {
    fn change_count(&self) -> u64 {
        self.changes.get()
    }
}

/// A data packet signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// SHA-256 digest.
    DigestSha256(DigestSha256Signature),
    /// HMAC with SHA-256.
    HmacWithSha256(HmacWithSha256Signature),
    /// RSA over SHA-256.
    Sha256WithRsa(Sha256WithRsaSignature),
    /// ECDSA over SHA-256.
    Sha256WithEcdsa(Sha256WithEcdsaSignature),
    /// Unmodelled scheme.
    Generic(GenericSignature),
}
impl Default for Signature {
    fn default() -> Self {
        Signature::Sha256WithRsa(Sha256WithRsaSignature::new())
    }
}
impl Signature {
    /// Returns the signature type.
    ///
    /// Generic signatures report the type code found in their signature info, if any.
    pub fn signature_type(&self) -> Option<SignatureType> {
        match self {
            Signature::DigestSha256(_) => Some(SignatureType::DigestSha256),
            Signature::HmacWithSha256(_) => Some(SignatureType::HmacWithSha256),
            Signature::Sha256WithRsa(_) => Some(SignatureType::Sha256WithRsa),
            Signature::Sha256WithEcdsa(_) => Some(SignatureType::Sha256WithEcdsa),
            Signature::Generic(generic) => generic.type_code().map(SignatureType::from),
        }
    }

    /// Returns the signature bytes.
    pub fn signature(&self) -> &Bytes {
        match self {
            Signature::DigestSha256(s) => s.signature(),
            Signature::HmacWithSha256(s) => s.signature(),
            Signature::Sha256WithRsa(s) => s.signature(),
            Signature::Sha256WithEcdsa(s) => s.signature(),
            Signature::Generic(s) => s.signature(),
        }
    }

    /// Sets the signature bytes.
    pub fn set_signature(&mut self, signature: impl Into<Bytes>) {
        match self {
            Signature::DigestSha256(s) => s.set_signature(signature),
            Signature::HmacWithSha256(s) => s.set_signature(signature),
            Signature::Sha256WithRsa(s) => s.set_signature(signature),
            Signature::Sha256WithEcdsa(s) => s.set_signature(signature),
            Signature::Generic(s) => s.set_signature(signature),
        }
    }

    /// Returns the key locator of schemes carrying one.
    pub fn key_locator(&self) -> Option<&KeyLocator> {
        match self {
            Signature::HmacWithSha256(s) => Some(s.key_locator()),
            Signature::Sha256WithRsa(s) => Some(s.key_locator()),
            Signature::Sha256WithEcdsa(s) => Some(s.key_locator()),
            Signature::DigestSha256(_) | Signature::Generic(_) => None,
        }
    }

    /// Returns the key locator of schemes carrying one, for in-place editing.
    pub fn key_locator_mut(&mut self) -> Option<&mut KeyLocator> {
        match self {
            Signature::HmacWithSha256(s) => Some(s.key_locator_mut()),
            Signature::Sha256WithRsa(s) => Some(s.key_locator_mut()),
            Signature::Sha256WithEcdsa(s) => Some(s.key_locator_mut()),
            Signature::DigestSha256(_) | Signature::Generic(_) => None,
        }
    }

    /// Returns the validity period of schemes carrying one.
    pub fn validity_period(&self) -> Option<&ValidityPeriod> {
        match self {
            Signature::Sha256WithRsa(s) => Some(s.validity_period()),
            Signature::Sha256WithEcdsa(s) => Some(s.validity_period()),
            _ => None,
        }
    }

    /// Returns the validity period of schemes carrying one, for in-place editing.
    pub fn validity_period_mut(&mut self) -> Option<&mut ValidityPeriod> {
        match self {
            Signature::Sha256WithRsa(s) => Some(s.validity_period_mut()),
            Signature::Sha256WithEcdsa(s) => Some(s.validity_period_mut()),
            _ => None,
        }
    }
}
impl ChangeCountable for Signature {
    fn change_count(&self) -> u64 {
        match self {
            Signature::DigestSha256(s) => s.change_count(),
            Signature::HmacWithSha256(s) => s.change_count(),
            Signature::Sha256WithRsa(s) => s.change_count(),
            Signature::Sha256WithEcdsa(s) => s.change_count(),
            Signature::Generic(s) => s.change_count(),
        }
    }
}
impl From<DigestSha256Signature> for Signature {
    fn from(value: DigestSha256Signature) -> Self {
        Signature::DigestSha256(value)
    }
}
impl From<HmacWithSha256Signature> for Signature {
    fn from(value: HmacWithSha256Signature) -> Self {
        Signature::HmacWithSha256(value)
    }
}
impl From<Sha256WithRsaSignature> for Signature {
    fn from(value: Sha256WithRsaSignature) -> Self {
        Signature::Sha256WithRsa(value)
    }
}
impl From<Sha256WithEcdsaSignature> for Signature {
    fn from(value: Sha256WithEcdsaSignature) -> Self {
        Signature::Sha256WithEcdsa(value)
    }
}
impl From<GenericSignature> for Signature {
    fn from(value: GenericSignature) -> Self {
        Signature::Generic(value)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::name::Name;

    #[test]
    fn should_default_to_rsa() {
        let signature = Signature::default();
        assert_eq!(signature.signature_type(), Some(SignatureType::Sha256WithRsa));
        assert!(signature.signature().is_empty());
        assert!(signature.key_locator().unwrap().is_none());
    }

    #[test]
    fn should_expose_fields_per_scheme() {
        let digest = Signature::from(DigestSha256Signature::new());
        assert!(digest.key_locator().is_none());
        assert!(digest.validity_period().is_none());

        let hmac = Signature::from(HmacWithSha256Signature::new());
        assert!(hmac.key_locator().is_some());
        assert!(hmac.validity_period().is_none());

        let ecdsa = Signature::from(Sha256WithEcdsaSignature::new());
        assert!(ecdsa.key_locator().is_some());
        assert!(ecdsa.validity_period().is_some());
    }

    #[test]
    fn should_roundtrip_type_codes() {
        for code in [0u64, 1, 2, 3, 4, 5, 200] {
            assert_eq!(u64::from(SignatureType::from(code)), code);
        }
        assert_eq!(SignatureType::from(2), SignatureType::Other(2));
    }

    #[test]
    fn should_count_nested_key_name_edits() {
        let mut signature = Signature::from(Sha256WithEcdsaSignature::new());
        signature
            .key_locator_mut()
            .unwrap()
            .set_key_name(Name::from_uri("/key").unwrap(), Default::default());
        let before = signature.change_count();
        assert_eq!(signature.change_count(), before);

        signature
            .key_locator_mut()
            .unwrap()
            .key_name_mut()
            .unwrap()
            .append_generic("KEY");
        let after = signature.change_count();
        assert!(after > before);
        assert_eq!(signature.change_count(), after);
    }

    #[test]
    fn should_poll_every_nested_tracker() {
        let mut rsa = Sha256WithRsaSignature::new();
        let before = rsa.change_count();

        rsa.key_locator_mut().set_key_name(Name::from_uri("/k").unwrap(), Default::default());
        rsa.validity_period_mut().set_period(
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        );
        let after = rsa.change_count();
        assert!(after > before);
        assert!(!rsa.validity_period.check_changed());
        assert_eq!(rsa.change_count(), after);
    }

    #[test]
    fn should_bump_on_set() {
        let mut signature = Signature::default();
        let before = signature.change_count();
        signature.set_signature(vec![1, 2, 3]);
        assert!(signature.change_count() > before);

        let mut hmac = HmacWithSha256Signature::new();
        let before = hmac.change_count();
        hmac.set_key_locator(KeyLocator::from_key_digest(vec![9]));
        assert!(hmac.change_count() > before);
    }

    #[test]
    fn should_deep_copy_nested_objects() {
        let mut original = Sha256WithRsaSignature::new();
        original.set_key_locator(KeyLocator::from_key_name(Name::from_uri("/a").unwrap()));
        let mut copy = original.clone();
        copy.key_locator_mut().key_name_mut().unwrap().append_generic("b");

        assert_eq!(original.key_locator().key_name().unwrap().to_uri(), "/a");
        assert_eq!(copy.key_locator().key_name().unwrap().to_uri(), "/a/b");
    }
}
