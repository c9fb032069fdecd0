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

//! Data packets.

use bytes::Bytes;
use sha2::{Digest, Sha256};

use crate::{
    change::{ChangeCount, ChangeCountable, ChangeTracker},
    meta_info::MetaInfo,
    name::{Component, ComponentType, Name},
    signature::Signature,
    wire::{
        DecodingError, EncodingCache, EncodingError, SignedBlob, WireFormat, default_wire_format,
    },
};

/// A data packet.
///
/// Equality compares the observable fields only.
#[derive(Debug, Clone, Default)]
pub struct Data {
    name: ChangeTracker<Name>,
    meta_info: ChangeTracker<MetaInfo>,
    signature: ChangeTracker<Signature>,
    content: Bytes,
    changes: ChangeCount,
    cache: EncodingCache,
}
impl Data {
    /// Creates a data packet with an empty name, no content and an unsigned RSA signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a data packet named `name`.
    pub fn with_name(name: Name) -> Self {
        Self {
            name: ChangeTracker::new(name),
            ..Default::default()
        }
    }

    /// Returns the name.
    pub fn name(&self) -> &Name {
        self.name.get()
    }

    /// Returns the name for in-place editing.
    pub fn name_mut(&mut self) -> &mut Name {
        self.name.get_mut()
    }

    /// Replaces the name.
    pub fn set_name(&mut self, name: Name) -> &mut Self {
        self.name.set(name);
        self.changes.bump();
        self
    }

    /// Returns the meta information.
    pub fn meta_info(&self) -> &MetaInfo {
        self.meta_info.get()
    }

    /// Returns the meta information for in-place editing.
    pub fn meta_info_mut(&mut self) -> &mut MetaInfo {
        self.meta_info.get_mut()
    }

    /// Replaces the meta information.
    pub fn set_meta_info(&mut self, meta_info: MetaInfo) -> &mut Self {
        self.meta_info.set(meta_info);
        self.changes.bump();
        self
    }

    /// Returns the signature.
    pub fn signature(&self) -> &Signature {
        self.signature.get()
    }

    /// Returns the signature for in-place editing.
    pub fn signature_mut(&mut self) -> &mut Signature {
        self.signature.get_mut()
    }

    /// Replaces the signature.
    pub fn set_signature(&mut self, signature: impl Into<Signature>) -> &mut Self {
        self.signature.set(signature.into());
        self.changes.bump();
        self
    }

    /// Returns the content.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Sets the content.
    pub fn set_content(&mut self, content: impl Into<Bytes>) -> &mut Self {
        self.content = content.into();
        self.changes.bump();
        self
    }

    /// Returns the name with the implicit SHA-256 digest of the default wire encoding appended.
    pub fn full_name(&self) -> Result<Name, EncodingError> {
        let encoding = self.wire_encode()?;
        let digest = Sha256::digest(encoding.bytes());

        let mut full_name = self.name.get().clone();
        full_name.append(Component::with_type(
            Bytes::copy_from_slice(&digest),
            ComponentType::ImplicitSha256Digest,
        ));
        Ok(full_name)
    }

    /// Encodes the data packet with the default wire format.
    ///
    /// The encoding is cached until the packet changes.
    pub fn wire_encode(&self) -> Result<SignedBlob, EncodingError> {
        let count = self.change_count();
        if let Some(cached) = self.cache.get(count) {
            return Ok(cached);
        }

        let encoding = default_wire_format().encode_data(self)?;
        self.cache.store(encoding.clone(), count);
        Ok(encoding)
    }

    /// Encodes the data packet with `format`. The result is not cached.
    pub fn wire_encode_with(&self, format: &dyn WireFormat) -> Result<SignedBlob, EncodingError> {
        format.encode_data(self)
    }

    /// Replaces all fields with the ones decoded from `input` by the default wire format.
    ///
    /// On success the input becomes the cached encoding, so a re-encoding reproduces the input
    /// byte for byte. On failure the packet is unchanged.
    pub fn wire_decode(&mut self, input: impl Into<Bytes>) -> Result<(), DecodingError> {
        let (decoded, encoding) = default_wire_format().decode_data(&input.into())?;
        self.replace_with_decoded(decoded);
        self.cache.store(encoding, self.change_count());
        Ok(())
    }

    /// Replaces all fields with the ones decoded from `input` by `format`.
    pub fn wire_decode_with(
        &mut self,
        input: impl Into<Bytes>,
        format: &dyn WireFormat,
    ) -> Result<(), DecodingError> {
        let (decoded, _) = format.decode_data(&input.into())?;
        self.replace_with_decoded(decoded);
        self.cache.clear();
        Ok(())
    }

    fn replace_with_decoded(&mut self, decoded: Data) {
        let floor = self.change_count() + 1;
        *self = decoded;
        self.changes.raise_to(floor);
    }
}
impl ChangeCountable for Data {
    fn change_count(&self) -> u64 {
        let changed = self.name.check_changed()
            | self.meta_info.check_changed()
            | self.signature.check_changed();
        if changed {
            self.changes.bump();
        }
        self.changes.get()
    }
}
impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.meta_info == other.meta_info
            && self.signature == other.signature
            && self.content == other.content
    }
}
impl Eq for Data {}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        key_locator::KeyLocator,
        meta_info::ContentType,
        signature::{DigestSha256Signature, Sha256WithRsaSignature},
    };

    fn name(uri: &str) -> Name {
        Name::from_uri(uri).unwrap()
    }

    #[test]
    fn should_count_nested_signature_edits() {
        let mut data = Data::with_name(name("/a"));
        let before = data.change_count();

        data.signature_mut()
            .key_locator_mut()
            .unwrap()
            .set_key_name(name("/key"), Default::default());
        let after = data.change_count();
        assert!(after > before);
        assert_eq!(data.change_count(), after);

        data.signature_mut()
            .key_locator_mut()
            .unwrap()
            .key_name_mut()
            .unwrap()
            .append_generic("KEY");
        assert!(data.change_count() > after);
    }

    #[test]
    fn should_strictly_increase_on_every_setter() {
        let mut data = Data::new();
        let mut last = data.change_count();
        let mut check = |data: &Data| {
            let now = data.change_count();
            assert!(now > last);
            last = now;
        };

        data.set_name(name("/x"));
        check(&data);
        data.set_content(&b"hello"[..]);
        check(&data);
        data.set_meta_info(MetaInfo::new());
        check(&data);
        data.set_signature(DigestSha256Signature::new());
        check(&data);
        data.meta_info_mut().set_content_type(ContentType::Key);
        check(&data);
    }

    #[test]
    fn should_cache_encoding_until_change() {
        let mut data = Data::with_name(name("/a"));
        data.set_content(&b"payload"[..]);
        let first = data.wire_encode().unwrap();
        assert_eq!(data.wire_encode().unwrap(), first);

        data.meta_info_mut()
            .set_freshness_period(Some(Duration::from_secs(10)));
        assert_ne!(data.wire_encode().unwrap(), first);
    }

    #[test]
    fn should_append_implicit_digest_to_full_name() {
        let mut data = Data::with_name(name("/a/b"));
        data.set_content(&b"c"[..]);
        let full_name = data.full_name().unwrap();

        assert_eq!(full_name.len(), 3);
        assert!(name("/a/b").is_prefix_of(&full_name));
        let digest = full_name.get(-1).unwrap();
        assert!(digest.is_implicit_sha256_digest());
        assert_eq!(
            digest.value().as_ref(),
            Sha256::digest(data.wire_encode().unwrap().bytes()).as_slice()
        );
    }

    #[test]
    fn should_reproduce_decoded_input() {
        let mut source = Data::with_name(name("/a"));
        let mut signature = Sha256WithRsaSignature::new();
        signature.set_key_locator(KeyLocator::from_key_name(name("/key")));
        signature.set_signature(vec![7; 16]);
        source.set_signature(signature).set_content(&b"x"[..]);
        let encoding = source.wire_encode().unwrap();

        let mut target = Data::new();
        target.wire_decode(encoding.bytes().clone()).unwrap();
        assert_eq!(target, source);
        assert_eq!(target.wire_encode().unwrap(), encoding);
    }

    #[test]
    fn should_keep_data_on_decode_failure() {
        let mut data = Data::with_name(name("/keep"));
        let before = data.change_count();
        assert!(data.wire_decode(vec![0x06, 0x01, 0x00]).is_err());
        assert_eq!(data.name(), &name("/keep"));
        assert_eq!(data.change_count(), before);
    }
}
