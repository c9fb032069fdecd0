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

//! Interest packets.
//!
//! An [`Interest`] asks for data under a name, narrowed down by its selectors. Every scalar
//! selector has an unset state (`None`) distinct from zero, and unset selectors are neither
//! encoded nor shown in [`Interest::to_uri`].
//!
//! ### Nonce
//!
//! The nonce identifies one transmission of an interest. A nonce set with [`Interest::set_nonce`]
//! is discarded as soon as any other field changes, since the modified interest is a different
//! request. The default wire format generates a random nonce when encoding an interest without
//! one.

use std::{cell::Cell, fmt, time::Duration};

use bytes::Bytes;

use crate::{
    change::{ChangeCount, ChangeCountable, ChangeTracker},
    config::PacketConfig,
    data::Data,
    exclude::Exclude,
    key_locator::{KeyLocator, KeyLocatorKind},
    link::Link,
    name::{Name, escape::escape_value},
    wire::{
        DecodingError, EncodingCache, EncodingError, SignedBlob, WireFormat, default_wire_format,
    },
};

/// Which of several matching data packets a forwarder should prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildSelector {
    /// The one with the smallest next component.
    Leftmost,
    /// The one with the largest next component.
    Rightmost,
}
impl ChildSelector {
    /// Returns the wire code.
    pub fn code(self) -> u64 {
        match self {
            ChildSelector::Leftmost => 0,
            ChildSelector::Rightmost => 1,
        }
    }
}
impl TryFrom<u64> for ChildSelector {
    type Error = DecodingError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ChildSelector::Leftmost),
            1 => Ok(ChildSelector::Rightmost),
            other => {
                Err(DecodingError::InvalidValue {
                    field: "ChildSelector",
                    reason: format!("unknown child selector {other}"),
                })
            }
        }
    }
}

bitflags::bitflags! {
    /// Where an answer to an interest may come from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AnswerOriginKind: u32 {
        /// Answers from a content store.
        const CONTENT_STORE = 0b0000_0001;
        /// Answers generated on demand.
        const GENERATED = 0b0000_0010;
        /// Stale answers.
        const STALE = 0b0000_0100;
        /// Mark answers stale in the content store.
        const MARK_STALE = 0b0001_0000;

        // Other bits are reserved.
        const _ = !0;
    }
}

/// An interest packet.
///
/// Equality compares the observable fields only.
#[derive(Debug, Clone, Default)]
pub struct Interest {
    name: ChangeTracker<Name>,
    min_suffix_components: Option<u32>,
    max_suffix_components: Option<u32>,
    key_locator: ChangeTracker<KeyLocator>,
    exclude: ChangeTracker<Exclude>,
    child_selector: Option<ChildSelector>,
    answer_origin_kind: Option<AnswerOriginKind>,
    scope: Option<u32>,
    interest_lifetime: Option<Duration>,
    nonce: Bytes,
    nonce_change_count: Cell<u64>,
    link_wire_encoding: Bytes,
    selected_delegation_index: Option<u32>,
    changes: ChangeCount,
    cache: EncodingCache,
}
impl Interest {
    /// Creates an interest for the empty name with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interest for `name` with nothing else set.
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

    /// Returns the minimum number of name components after the interest name.
    pub fn min_suffix_components(&self) -> Option<u32> {
        self.min_suffix_components
    }

    /// Sets the minimum number of name components after the interest name.
    pub fn set_min_suffix_components(&mut self, value: Option<u32>) -> &mut Self {
        self.min_suffix_components = value;
        self.changes.bump();
        self
    }

    /// Returns the maximum number of name components after the interest name.
    pub fn max_suffix_components(&self) -> Option<u32> {
        self.max_suffix_components
    }

    /// Sets the maximum number of name components after the interest name.
    pub fn set_max_suffix_components(&mut self, value: Option<u32>) -> &mut Self {
        self.max_suffix_components = value;
        self.changes.bump();
        self
    }

    /// Returns the child selector.
    pub fn child_selector(&self) -> Option<ChildSelector> {
        self.child_selector
    }

    /// Sets the child selector.
    pub fn set_child_selector(&mut self, value: Option<ChildSelector>) -> &mut Self {
        self.child_selector = value;
        self.changes.bump();
        self
    }

    /// Returns the answer origin kind.
    pub fn answer_origin_kind(&self) -> Option<AnswerOriginKind> {
        self.answer_origin_kind
    }

    /// Sets the answer origin kind.
    pub fn set_answer_origin_kind(&mut self, value: Option<AnswerOriginKind>) -> &mut Self {
        self.answer_origin_kind = value;
        self.changes.bump();
        self
    }

    /// Returns true unless the answer origin kind allows stale answers.
    ///
    /// An unset answer origin kind requires fresh answers.
    pub fn must_be_fresh(&self) -> bool {
        self.answer_origin_kind
            .is_none_or(|kind| !kind.contains(AnswerOriginKind::STALE))
    }

    /// Requires or allows stale answers by editing the stale bit of the answer origin kind.
    pub fn set_must_be_fresh(&mut self, must_be_fresh: bool) -> &mut Self {
        self.answer_origin_kind = match (self.answer_origin_kind, must_be_fresh) {
            (None, true) => None,
            (None, false) => Some(AnswerOriginKind::STALE),
            (Some(kind), true) => Some(kind.difference(AnswerOriginKind::STALE)),
            (Some(kind), false) => Some(kind.union(AnswerOriginKind::STALE)),
        };
        self.changes.bump();
        self
    }

    /// Returns the scope.
    pub fn scope(&self) -> Option<u32> {
        self.scope
    }

    /// Sets the scope.
    pub fn set_scope(&mut self, value: Option<u32>) -> &mut Self {
        self.scope = value;
        self.changes.bump();
        self
    }

    /// Returns the interest lifetime.
    pub fn interest_lifetime(&self) -> Option<Duration> {
        self.interest_lifetime
    }

    /// Sets the interest lifetime.
    pub fn set_interest_lifetime(&mut self, value: Option<Duration>) -> &mut Self {
        self.interest_lifetime = value;
        self.changes.bump();
        self
    }

    /// Returns the interest lifetime, or the configured default when unset.
    pub fn effective_lifetime(&self, config: &PacketConfig) -> Duration {
        self.interest_lifetime
            .unwrap_or_else(|| config.default_interest_lifetime())
    }

    /// Returns the nonce, empty if unset or invalidated by a later change.
    pub fn nonce(&self) -> Bytes {
        if self.nonce_change_count.get() == self.change_count() {
            self.nonce.clone()
        } else {
            Bytes::new()
        }
    }

    /// Sets the nonce.
    pub fn set_nonce(&mut self, nonce: impl Into<Bytes>) -> &mut Self {
        self.nonce = nonce.into();
        self.changes.bump();
        self.nonce_change_count.set(self.change_count());
        self
    }

    /// Returns the publisher public key locator.
    pub fn key_locator(&self) -> &KeyLocator {
        self.key_locator.get()
    }

    /// Returns the publisher public key locator for in-place editing.
    pub fn key_locator_mut(&mut self) -> &mut KeyLocator {
        self.key_locator.get_mut()
    }

    /// Replaces the publisher public key locator.
    pub fn set_key_locator(&mut self, key_locator: KeyLocator) -> &mut Self {
        self.key_locator.set(key_locator);
        self.changes.bump();
        self
    }

    /// Returns the publisher public key digest, empty unless the key locator holds a digest.
    pub fn publisher_public_key_digest(&self) -> Bytes {
        match self.key_locator.get().kind() {
            KeyLocatorKind::KeyLocatorDigest(digest) => digest.clone(),
            _ => Bytes::new(),
        }
    }

    /// Sets the key locator to the given publisher public key digest, or clears it when empty.
    pub fn set_publisher_public_key_digest(&mut self, digest: impl Into<Bytes>) -> &mut Self {
        let digest = digest.into();
        let key_locator = if digest.is_empty() {
            KeyLocator::new()
        } else {
            KeyLocator::from_key_digest(digest)
        };
        self.set_key_locator(key_locator)
    }

    /// Returns the exclude filter.
    pub fn exclude(&self) -> &Exclude {
        self.exclude.get()
    }

    /// Returns the exclude filter for in-place editing.
    pub fn exclude_mut(&mut self) -> &mut Exclude {
        self.exclude.get_mut()
    }

    /// Replaces the exclude filter.
    pub fn set_exclude(&mut self, exclude: Exclude) -> &mut Self {
        self.exclude.set(exclude);
        self.changes.bump();
        self
    }

    /// Returns true if a link is attached.
    pub fn has_link(&self) -> bool {
        !self.link_wire_encoding.is_empty()
    }

    /// Returns the wire encoding of the attached link, empty if none.
    pub fn link_wire_encoding(&self) -> &Bytes {
        &self.link_wire_encoding
    }

    /// Attaches a link by its wire encoding.
    pub fn set_link_wire_encoding(&mut self, encoding: impl Into<Bytes>) -> &mut Self {
        self.link_wire_encoding = encoding.into();
        self.changes.bump();
        self
    }

    /// Attaches `link` encoded with the default wire format.
    pub fn set_link(&mut self, link: &Link) -> Result<&mut Self, EncodingError> {
        let encoding = link.wire_encode()?.into_bytes();
        Ok(self.set_link_wire_encoding(encoding))
    }

    /// Detaches the link and clears the selected delegation.
    pub fn unset_link(&mut self) -> &mut Self {
        self.link_wire_encoding = Bytes::new();
        self.selected_delegation_index = None;
        self.changes.bump();
        self
    }

    /// Decodes the attached link.
    pub fn link(&self) -> Result<Option<Link>, DecodingError> {
        if !self.has_link() {
            return Ok(None);
        }
        Link::wire_decode(self.link_wire_encoding.clone()).map(Some)
    }

    /// Returns the index of the delegation chosen by a forwarder.
    pub fn selected_delegation_index(&self) -> Option<u32> {
        self.selected_delegation_index
    }

    /// Sets the index of the delegation chosen by a forwarder.
    pub fn set_selected_delegation_index(&mut self, value: Option<u32>) -> &mut Self {
        self.selected_delegation_index = value;
        self.changes.bump();
        self
    }

    /// Returns true if a data packet named `name` would satisfy the interest, ignoring the
    /// implicit digest.
    ///
    /// Suffix component limits count the implicit digest as one more component.
    pub fn matches_name(&self, name: &Name) -> bool {
        let interest_name = self.name.get();
        if !interest_name.is_prefix_of(name) {
            return false;
        }

        let suffix_components = name.len() + 1 - interest_name.len();
        if self
            .min_suffix_components
            .is_some_and(|min| suffix_components < min as usize)
        {
            return false;
        }
        if self
            .max_suffix_components
            .is_some_and(|max| suffix_components > max as usize)
        {
            return false;
        }

        let exclude = self.exclude.get();
        if !exclude.is_empty()
            && let Some(next) = name.components().get(interest_name.len())
            && exclude.matches(next)
        {
            return false;
        }

        true
    }

    /// Returns true if `data` satisfies the interest.
    ///
    /// Unlike [`Interest::matches_name`] this considers the data's full name, including its
    /// implicit digest, and the publisher public key locator. Computing the full name requires
    /// encoding `data`.
    pub fn matches_data(&self, data: &Data) -> Result<bool, EncodingError> {
        let interest_name = self.name.get();
        let interest_len = interest_name.len();
        let data_name = data.name();
        let full_len = data_name.len() + 1;

        let min = self.min_suffix_components.unwrap_or(0) as usize;
        if interest_len + min > full_len {
            return Ok(false);
        }
        if let Some(max) = self.max_suffix_components
            && interest_len + (max as usize) < full_len
        {
            return Ok(false);
        }

        if interest_len == full_len {
            let ends_in_digest = interest_name
                .get(-1)
                .is_some_and(|last| last.is_implicit_sha256_digest());
            if !ends_in_digest || *interest_name != data.full_name()? {
                return Ok(false);
            }
        } else if !interest_name.is_prefix_of(data_name) {
            return Ok(false);
        }

        let exclude = self.exclude.get();
        if !exclude.is_empty() && full_len > interest_len {
            let excluded = if interest_len == full_len - 1 {
                let full_name = data.full_name()?;
                full_name
                    .components()
                    .get(interest_len)
                    .is_some_and(|digest| exclude.matches(digest))
            } else {
                data_name
                    .components()
                    .get(interest_len)
                    .is_some_and(|next| exclude.matches(next))
            };
            if excluded {
                return Ok(false);
            }
        }

        let key_locator = self.key_locator.get();
        if !key_locator.is_none() {
            match data.signature().key_locator() {
                Some(data_key_locator) if data_key_locator == key_locator => {}
                _ => return Ok(false),
            }
        }

        Ok(true)
    }

    /// Returns the name URI followed by the set selectors as query parameters.
    pub fn to_uri(&self) -> String {
        let mut selectors: Vec<(&str, String)> = Vec::new();
        if let Some(value) = self.min_suffix_components {
            selectors.push(("ndn.MinSuffixComponents", value.to_string()));
        }
        if let Some(value) = self.max_suffix_components {
            selectors.push(("ndn.MaxSuffixComponents", value.to_string()));
        }
        if let Some(value) = self.child_selector {
            selectors.push(("ndn.ChildSelector", value.code().to_string()));
        }
        if let Some(value) = self.answer_origin_kind {
            selectors.push(("ndn.AnswerOriginKind", value.bits().to_string()));
        }
        if let Some(value) = self.scope {
            selectors.push(("ndn.Scope", value.to_string()));
        }
        if let Some(value) = self.interest_lifetime {
            selectors.push(("ndn.InterestLifetime", value.as_millis().to_string()));
        }
        let digest = self.publisher_public_key_digest();
        if !digest.is_empty() {
            let mut escaped = String::new();
            escape_value(&digest, &mut escaped);
            selectors.push(("ndn.PublisherPublicKeyDigest", escaped));
        }
        let nonce = self.nonce();
        if !nonce.is_empty() {
            let mut escaped = String::new();
            escape_value(&nonce, &mut escaped);
            selectors.push(("ndn.Nonce", escaped));
        }
        let exclude = self.exclude.get();
        if !exclude.is_empty() {
            selectors.push(("ndn.Exclude", exclude.to_uri()));
        }

        let mut uri = self.name.get().to_uri();
        for (i, (key, value)) in selectors.iter().enumerate() {
            uri.push(if i == 0 { '?' } else { '&' });
            uri.push_str(key);
            uri.push('=');
            uri.push_str(value);
        }
        uri
    }

    /// Encodes the interest with the default wire format.
    ///
    /// The encoding is cached until the interest changes.
    pub fn wire_encode(&self) -> Result<SignedBlob, EncodingError> {
        let count = self.change_count();
        if let Some(cached) = self.cache.get(count) {
            return Ok(cached);
        }

        let encoding = default_wire_format().encode_interest(self)?;
        self.cache.store(encoding.clone(), count);
        Ok(encoding)
    }

    /// Encodes the interest with `format`. The result is not cached.
    pub fn wire_encode_with(&self, format: &dyn WireFormat) -> Result<SignedBlob, EncodingError> {
        format.encode_interest(self)
    }

    /// Replaces all fields with the ones decoded from `input` by the default wire format.
    ///
    /// On success the input becomes the cached encoding. On failure the interest is unchanged.
    pub fn wire_decode(&mut self, input: impl Into<Bytes>) -> Result<(), DecodingError> {
        let (decoded, encoding) = default_wire_format().decode_interest(&input.into())?;
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
        let (decoded, _) = format.decode_interest(&input.into())?;
        self.replace_with_decoded(decoded);
        self.cache.clear();
        Ok(())
    }

    /// Moves `decoded` into `self`, keeping the change count monotonic and the nonce valid.
    fn replace_with_decoded(&mut self, decoded: Interest) {
        let floor = self.change_count() + 1;
        *self = decoded;
        self.changes.raise_to(floor);
        if !self.nonce.is_empty() {
            self.nonce_change_count.set(self.change_count());
        }
    }
}
impl ChangeCountable for Interest {
    fn change_count(&self) -> u64 {
        let changed = self.name.check_changed()
            | self.key_locator.check_changed()
            | self.exclude.check_changed();
        if changed {
            self.changes.bump();
        }
        self.changes.get()
    }
}
impl PartialEq for Interest {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.min_suffix_components == other.min_suffix_components
            && self.max_suffix_components == other.max_suffix_components
            && self.key_locator == other.key_locator
            && self.exclude == other.exclude
            && self.child_selector == other.child_selector
            && self.answer_origin_kind == other.answer_origin_kind
            && self.scope == other.scope
            && self.interest_lifetime == other.interest_lifetime
            && self.nonce() == other.nonce()
            && self.link_wire_encoding == other.link_wire_encoding
            && self.selected_delegation_index == other.selected_delegation_index
    }
}
impl Eq for Interest {}
impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
