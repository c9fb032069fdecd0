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

//! Key locators, telling a verifier where to find the signing key.

use bytes::Bytes;

use crate::{
    change::{ChangeCount, ChangeCountable, ChangeTracker},
    name::Name,
};

/// Classification of a key name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyNameType {
    /// Plain key name.
    #[default]
    None,
    /// Digest of the publisher public key.
    PublisherPublicKeyDigest,
    /// Digest of the publisher certificate.
    PublisherCertificateDigest,
    /// Digest of the issuer key.
    PublisherIssuerKeyDigest,
    /// Digest of the issuer certificate.
    PublisherIssuerCertificateDigest,
}

/// The active variant of a [`KeyLocator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyLocatorKind {
    /// No key locator.
    #[default]
    None,
    /// The key itself.
    Key(Bytes),
    /// The certificate itself.
    Certificate(Bytes),
    /// Digest of the key.
    KeyLocatorDigest(Bytes),
    /// Name of the key.
    KeyName {
        /// The key name.
        name: ChangeTracker<Name>,
        /// Classification of the name.
        name_type: KeyNameType,
    },
}

/// A key locator.
///
/// Only the fields of the active [`KeyLocatorKind`] exist. The key name of a
/// [`KeyLocatorKind::KeyName`] can be edited in place through [`KeyLocator::key_name_mut`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyLocator {
    kind: KeyLocatorKind,
    changes: ChangeCount,
}
impl KeyLocator {
    /// Creates an empty key locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a key locator holding a key name.
    pub fn from_key_name(name: Name) -> Self {
        Self::from_kind(KeyLocatorKind::KeyName {
            name: ChangeTracker::new(name),
            name_type: KeyNameType::None,
        })
    }

    /// Creates a key locator holding a key digest.
    pub fn from_key_digest(digest: impl Into<Bytes>) -> Self {
        Self::from_kind(KeyLocatorKind::KeyLocatorDigest(digest.into()))
    }

    /// Creates a key locator with the given variant.
    pub fn from_kind(kind: KeyLocatorKind) -> Self {
        Self {
            kind,
            changes: ChangeCount::new(),
        }
    }

    /// Returns the active variant.
    pub fn kind(&self) -> &KeyLocatorKind {
        &self.kind
    }

    /// Replaces the active variant.
    pub fn set_kind(&mut self, kind: KeyLocatorKind) {
        self.kind = kind;
        self.changes.bump();
    }

    /// Resets to [`KeyLocatorKind::None`].
    pub fn clear(&mut self) {
        self.set_kind(KeyLocatorKind::None);
    }

    /// Returns true for [`KeyLocatorKind::None`].
    pub fn is_none(&self) -> bool {
        matches!(self.kind, KeyLocatorKind::None)
    }

    /// Sets the key name and its classification.
    pub fn set_key_name(&mut self, name: Name, name_type: KeyNameType) {
        self.set_kind(KeyLocatorKind::KeyName {
            name: ChangeTracker::new(name),
            name_type,
        });
    }

    /// Returns the key name, if this locator holds one.
    pub fn key_name(&self) -> Option<&Name> {
        match &self.kind {
            KeyLocatorKind::KeyName { name, .. } => Some(name.get()),
            _ => None,
        }
    }

    /// Returns the key name for in-place editing, if this locator holds one.
    pub fn key_name_mut(&mut self) -> Option<&mut Name> {
        match &mut self.kind {
            KeyLocatorKind::KeyName { name, .. } => Some(name.get_mut()),
            _ => None,
        }
    }

    /// Returns the key name classification, if this locator holds a key name.
    pub fn key_name_type(&self) -> Option<KeyNameType> {
        match &self.kind {
            KeyLocatorKind::KeyName { name_type, .. } => Some(*name_type),
            _ => None,
        }
    }

    /// Returns the key, certificate or digest bytes of the byte-carrying variants.
    pub fn key_data(&self) -> Option<&Bytes> {
        match &self.kind {
            KeyLocatorKind::Key(data)
            | KeyLocatorKind::Certificate(data)
            | KeyLocatorKind::KeyLocatorDigest(data) => Some(data),
            KeyLocatorKind::None | KeyLocatorKind::KeyName { .. } => None,
        }
    }
}
impl ChangeCountable for KeyLocator {
    fn change_count(&self) -> u64 {
        if let KeyLocatorKind::KeyName { name, .. } = &self.kind
            && name.check_changed()
        {
            self.changes.bump();
        }
        self.changes.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_only_expose_active_variant_fields() {
        let digest = KeyLocator::from_key_digest(vec![1, 2, 3]);
        assert_eq!(digest.key_data().unwrap().as_ref(), &[1, 2, 3]);
        assert_eq!(digest.key_name(), None);
        assert_eq!(digest.key_name_type(), None);

        let named = KeyLocator::from_key_name(Name::from_uri("/key").unwrap());
        assert_eq!(named.key_name().unwrap().to_uri(), "/key");
        assert_eq!(named.key_name_type(), Some(KeyNameType::None));
        assert_eq!(named.key_data(), None);
    }

    #[test]
    fn should_pick_up_in_place_name_edits() {
        let mut locator = KeyLocator::from_key_name(Name::from_uri("/a").unwrap());
        let before = locator.change_count();

        locator.key_name_mut().unwrap().append_generic("b");
        let after = locator.change_count();
        assert!(after > before);
        assert_eq!(locator.change_count(), after);
        assert_eq!(locator.key_name().unwrap().to_uri(), "/a/b");
    }

    #[test]
    fn should_bump_on_variant_change() {
        let mut locator = KeyLocator::new();
        assert!(locator.is_none());
        let before = locator.change_count();

        locator.set_key_name(
            Name::from_uri("/k").unwrap(),
            KeyNameType::PublisherCertificateDigest,
        );
        assert!(locator.change_count() > before);
        assert_eq!(
            locator.key_name_type(),
            Some(KeyNameType::PublisherCertificateDigest)
        );

        let before = locator.change_count();
        locator.clear();
        assert!(locator.change_count() > before);
        assert!(locator.is_none());
    }

    #[test]
    fn should_deep_copy() {
        let original = KeyLocator::from_key_name(Name::from_uri("/a").unwrap());
        let mut copy = original.clone();
        copy.key_name_mut().unwrap().append_generic("b");
        assert_eq!(original.key_name().unwrap().to_uri(), "/a");
        assert_ne!(original, copy);
    }
}
