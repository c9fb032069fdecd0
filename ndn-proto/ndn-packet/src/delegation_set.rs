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

//! Delegation sets carried by [`crate::link::Link`] objects.

use bytes::Bytes;

use crate::{
    name::Name,
    wire::{DecodingError, EncodingError, WireFormat, default_wire_format},
};

/// A name a producer can be reached under, with a preference. Lower is preferred.
///
/// Delegations order by preference first, then by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Delegation {
    /// Preference, lower is better.
    pub preference: u64,
    /// The delegated name.
    pub name: Name,
}
impl Delegation {
    /// Creates a delegation.
    pub fn new(preference: u64, name: Name) -> Self {
        Self { preference, name }
    }
}

/// An ordered set of delegations.
///
/// Entries added through [`DelegationSet::add`] are kept sorted by preference then name, with at
/// most one entry per name. [`DelegationSet::add_unsorted`] appends as-is, which decoders use to
/// keep the encoded order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelegationSet {
    delegations: Vec<Delegation>,
}
impl DelegationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a delegation, or updates the preference of the existing delegation for `name`.
    pub fn add(&mut self, preference: u64, name: Name) {
        match self.delegations.iter_mut().find(|d| d.name == name) {
            Some(existing) => existing.preference = preference,
            None => self.delegations.push(Delegation::new(preference, name)),
        }
        self.delegations.sort();
    }

    /// Appends a delegation without sorting or deduplication.
    pub fn add_unsorted(&mut self, preference: u64, name: Name) {
        self.delegations.push(Delegation::new(preference, name));
    }

    /// Removes every delegation for `name`. Returns true if anything was removed.
    pub fn remove(&mut self, name: &Name) -> bool {
        let before = self.delegations.len();
        self.delegations.retain(|d| d.name != *name);
        self.delegations.len() != before
    }

    /// Removes all delegations.
    pub fn clear(&mut self) {
        self.delegations.clear();
    }

    /// Returns the number of delegations.
    pub fn len(&self) -> usize {
        self.delegations.len()
    }

    /// Returns true if there are no delegations.
    pub fn is_empty(&self) -> bool {
        self.delegations.is_empty()
    }

    /// Returns the delegation at `index`.
    pub fn get(&self, index: usize) -> Option<&Delegation> {
        self.delegations.get(index)
    }

    /// Returns the index of the first delegation for `name`.
    pub fn find(&self, name: &Name) -> Option<usize> {
        self.delegations.iter().position(|d| d.name == *name)
    }

    /// Iterates over the delegations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Delegation> {
        self.delegations.iter()
    }

    /// Encodes the set with the default wire format.
    pub fn wire_encode(&self) -> Result<Bytes, EncodingError> {
        default_wire_format().encode_delegation_set(self)
    }

    /// Decodes a set with the default wire format, keeping the encoded order.
    pub fn wire_decode(input: &Bytes) -> Result<Self, DecodingError> {
        default_wire_format().decode_delegation_set(input)
    }
}
impl<'a> IntoIterator for &'a DelegationSet {
    type Item = &'a Delegation;
    type IntoIter = std::slice::Iter<'a, Delegation>;

    fn into_iter(self) -> Self::IntoIter {
        self.delegations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(uri: &str) -> Name {
        Name::from_uri(uri).unwrap()
    }

    fn entries(set: &DelegationSet) -> Vec<(u64, String)> {
        set.iter().map(|d| (d.preference, d.name.to_uri())).collect()
    }

    #[test]
    fn should_update_existing_name_in_place() {
        let mut set = DelegationSet::new();
        set.add(10, name("/x"));
        set.add(5, name("/y"));
        set.add(20, name("/x"));
        assert_eq!(entries(&set), vec![(5, "/y".into()), (20, "/x".into())]);
    }

    #[test]
    fn should_break_preference_ties_by_name() {
        let mut set = DelegationSet::new();
        set.add(1, name("/b"));
        set.add(1, name("/a"));
        set.add(0, name("/c"));
        assert_eq!(
            entries(&set),
            vec![(0, "/c".into()), (1, "/a".into()), (1, "/b".into())]
        );
    }

    #[test]
    fn should_remove_every_match() {
        let mut set = DelegationSet::new();
        set.add_unsorted(3, name("/x"));
        set.add_unsorted(1, name("/y"));
        set.add_unsorted(2, name("/x"));

        assert!(set.remove(&name("/x")));
        assert_eq!(entries(&set), vec![(1, "/y".into())]);
        assert!(!set.remove(&name("/x")));
    }

    #[test]
    fn should_keep_unsorted_order() {
        let mut set = DelegationSet::new();
        set.add_unsorted(9, name("/z"));
        set.add_unsorted(1, name("/a"));
        assert_eq!(set.get(0).unwrap().preference, 9);
        assert_eq!(set.find(&name("/a")), Some(1));
        assert_eq!(set.find(&name("/q")), None);
    }

    #[test]
    fn should_roundtrip_through_default_wire_format() {
        let mut set = DelegationSet::new();
        set.add_unsorted(20, name("/b"));
        set.add_unsorted(10, name("/a/long/name"));
        let decoded = DelegationSet::wire_decode(&set.wire_encode().unwrap()).unwrap();
        assert_eq!(decoded, set);
    }
}
