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

//! Link objects.
//!
//! A [`Link`] is a data packet of content type [`ContentType::Link`] whose content is an encoded
//! [`DelegationSet`]. The link keeps the decoded set next to the data packet and re-encodes the
//! content after every change to the set.

use bytes::Bytes;

use crate::{
    data::Data,
    delegation_set::DelegationSet,
    meta_info::ContentType,
    name::Name,
    signature::Signature,
    wire::{DecodingError, EncodingError, SignedBlob, WireFormat, default_wire_format},
};

/// A data packet carrying a delegation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    data: Data,
    delegations: DelegationSet,
}
impl Default for Link {
    fn default() -> Self {
        Self::new()
    }
}
impl Link {
    /// Creates an unnamed link without delegations.
    pub fn new() -> Self {
        let mut data = Data::new();
        data.meta_info_mut().set_content_type(ContentType::Link);
        Self {
            data,
            delegations: DelegationSet::new(),
        }
    }

    /// Creates a link named `name` without delegations.
    pub fn with_name(name: Name) -> Self {
        let mut link = Self::new();
        link.data.set_name(name);
        link
    }

    /// Interprets a data packet as link.
    ///
    /// Fails unless the content type is [`ContentType::Link`]. Content that does not decode as a
    /// delegation set yields an empty set.
    pub fn from_data(data: Data) -> Result<Self, DecodingError> {
        let content_type = data.meta_info().content_type();
        if content_type != ContentType::Link {
            return Err(DecodingError::NotALink(content_type));
        }

        let delegations = default_wire_format()
            .decode_delegation_set(data.content())
            .unwrap_or_else(|err| {
                tracing::debug!(?err, name = %data.name(), "Link content is not a delegation set");
                DelegationSet::new()
            });
        Ok(Self { data, delegations })
    }

    /// Decodes a link from its data packet encoding.
    pub fn wire_decode(input: impl Into<Bytes>) -> Result<Self, DecodingError> {
        let mut data = Data::new();
        data.wire_decode(input)?;
        Self::from_data(data)
    }

    /// Encodes the underlying data packet with the default wire format.
    pub fn wire_encode(&self) -> Result<SignedBlob, EncodingError> {
        self.data.wire_encode()
    }

    /// Returns the delegations.
    pub fn delegations(&self) -> &DelegationSet {
        &self.delegations
    }

    /// Adds a delegation, or updates the preference of the existing one for `name`.
    pub fn add_delegation(&mut self, preference: u64, name: Name) -> Result<&mut Self, EncodingError> {
        self.delegations.add(preference, name);
        self.encode_content()?;
        Ok(self)
    }

    /// Removes every delegation for `name`. Returns true if anything was removed.
    pub fn remove_delegation(&mut self, name: &Name) -> Result<bool, EncodingError> {
        let removed = self.delegations.remove(name);
        if removed {
            self.encode_content()?;
        }
        Ok(removed)
    }

    fn encode_content(&mut self) -> Result<(), EncodingError> {
        let content = default_wire_format().encode_delegation_set(&self.delegations)?;
        self.data.set_content(content);
        self.data.meta_info_mut().set_content_type(ContentType::Link);
        Ok(())
    }

    /// Returns the name of the link.
    pub fn name(&self) -> &Name {
        self.data.name()
    }

    /// Replaces the name of the link.
    pub fn set_name(&mut self, name: Name) -> &mut Self {
        self.data.set_name(name);
        self
    }

    /// Returns the signature of the link.
    pub fn signature(&self) -> &Signature {
        self.data.signature()
    }

    /// Returns the signature for in-place editing, e.g. to sign the link.
    pub fn signature_mut(&mut self) -> &mut Signature {
        self.data.signature_mut()
    }

    /// Returns the underlying data packet.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Returns the underlying data packet.
    pub fn into_data(self) -> Data {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::change::ChangeCountable;

    fn name(uri: &str) -> Name {
        Name::from_uri(uri).unwrap()
    }

    fn entries(link: &Link) -> Vec<(u64, String)> {
        link.delegations()
            .iter()
            .map(|d| (d.preference, d.name.to_uri()))
            .collect()
    }

    #[test]
    fn should_sort_and_reencode_delegations() {
        let mut link = Link::with_name(name("/link"));
        link.add_delegation(10, name("/x")).unwrap();
        link.add_delegation(5, name("/y")).unwrap();
        link.add_delegation(20, name("/x")).unwrap();

        assert_eq!(entries(&link), vec![(5, "/y".into()), (20, "/x".into())]);
        assert_eq!(link.data().meta_info().content_type(), ContentType::Link);
        assert_eq!(
            DelegationSet::wire_decode(link.data().content()).unwrap(),
            *link.delegations()
        );
    }

    #[test]
    fn should_only_reencode_when_something_was_removed() {
        let mut link = Link::new();
        link.add_delegation(1, name("/a")).unwrap();
        let before = link.data().change_count();

        assert!(!link.remove_delegation(&name("/b")).unwrap());
        assert_eq!(link.data().change_count(), before);

        assert!(link.remove_delegation(&name("/a")).unwrap());
        assert!(link.data().change_count() > before);
        assert!(link.delegations().is_empty());
    }

    #[test]
    fn should_reject_other_content_types() {
        let data = Data::with_name(name("/not/a/link"));
        assert_eq!(
            Link::from_data(data),
            Err(DecodingError::NotALink(ContentType::Blob))
        );
    }

    #[test_log::test]
    fn should_fall_back_to_empty_delegations() {
        let mut data = Data::with_name(name("/broken"));
        data.meta_info_mut().set_content_type(ContentType::Link);
        data.set_content(&b"\xff\xff"[..]);

        let link = Link::from_data(data).unwrap();
        assert!(link.delegations().is_empty());
    }

    #[test]
    fn should_roundtrip_through_wire() {
        let mut link = Link::with_name(name("/link"));
        link.add_delegation(10, name("/net/a")).unwrap();
        link.add_delegation(20, name("/net/b")).unwrap();

        let decoded = Link::wire_decode(link.wire_encode().unwrap().into_bytes()).unwrap();
        assert_eq!(decoded.delegations(), link.delegations());
        assert_eq!(decoded.name(), link.name());
    }

    #[test]
    fn should_fail_on_undecodable_data() {
        assert_matches!(Link::wire_decode(vec![0x05, 0x00]), Err(DecodingError::UnexpectedType { .. }));
    }
}
