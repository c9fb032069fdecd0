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

//! Hierarchical NDN names.
//!
//! A [`Name`] is an ordered sequence of immutable [`Component`]s. Names are mutable in place, and
//! every mutation bumps the name's change count, so packets holding a name can tell whether their
//! cached encoding is still valid.
//!
//! ### URI form
//!
//! The canonical text form is `/`-separated escaped components, e.g. `/ndn/%00%01/...`. See
//! [`Component::to_uri`] for the escaping rules. Parsing accepts and skips an `ndn:` scheme and
//! an `//authority` part.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use bytes::Bytes;

use crate::change::{ChangeCount, ChangeCountable};

pub mod component;
pub(crate) mod escape;

pub use component::{Component, ComponentType};

/// Errors that can occur while parsing names and components from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameParseError {
    /// A `%` was not followed by two hex digits.
    #[error("invalid percent-escape in {0:?}")]
    InvalidEscape(String),
    /// A digest component holds invalid hex.
    #[error("invalid hex digest {0:?}")]
    InvalidDigest(String),
    /// A digest component does not hold exactly 32 bytes.
    #[error("SHA-256 digest must be 32 bytes, got {0}")]
    InvalidDigestLength(usize),
    /// The text does not denote a component, e.g. `.` or `..`.
    #[error("{0:?} is not a name component")]
    IllegalComponent(String),
    /// A typed component has an unparsable type code.
    #[error("invalid component type in {0:?}")]
    InvalidType(String),
}

/// An NDN name.
///
/// Names order component-wise, with a name ordering before every name it is a proper prefix of.
/// Equality, ordering and hashing only consider the components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    components: Vec<Component>,
    changes: ChangeCount,
}
impl Name {
    /// Creates an empty name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a name from components.
    pub fn from_components(components: impl IntoIterator<Item = Component>) -> Self {
        Self {
            components: components.into_iter().collect(),
            changes: ChangeCount::new(),
        }
    }

    /// Parses a name from its URI form.
    pub fn from_uri(uri: &str) -> Result<Self, NameParseError> {
        let mut name = Self::new();
        name.set_uri(uri)?;
        Ok(name)
    }

    /// Replaces all components with the ones parsed from `uri`.
    ///
    /// The name is left unchanged if parsing fails.
    pub fn set_uri(&mut self, uri: &str) -> Result<(), NameParseError> {
        let mut path = uri.trim();

        if let Some(colon) = path.find(':') {
            let is_scheme = match path.find('/') {
                Some(slash) => colon < slash,
                None => true,
            };
            if is_scheme {
                path = path[colon + 1..].trim();
            }
        }

        if let Some(rest) = path.strip_prefix("//") {
            path = match rest.find('/') {
                Some(slash) => &rest[slash + 1..],
                None => "",
            };
        } else if let Some(rest) = path.strip_prefix('/') {
            path = rest;
        }

        let mut components = Vec::new();
        if !path.is_empty() {
            for segment in path.split('/') {
                if let Some(component) = Component::parse_uri_segment(segment)? {
                    components.push(component);
                }
            }
        }

        self.components = components;
        self.changes.bump();
        Ok(())
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the name has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the components.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Iterates over the components.
    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    /// Returns the component at `index`.
    ///
    /// A negative index counts from the end, `-1` being the last component.
    pub fn get(&self, index: isize) -> Option<&Component> {
        self.resolve_index(index).and_then(|i| self.components.get(i))
    }

    fn resolve_index(&self, index: isize) -> Option<usize> {
        if index >= 0 {
            Some(index as usize)
        } else {
            self.components.len().checked_sub(index.unsigned_abs())
        }
    }

    /// Appends a component.
    pub fn append(&mut self, component: Component) -> &mut Self {
        self.components.push(component);
        self.changes.bump();
        self
    }

    /// Appends a generic component with the given value.
    pub fn append_generic(&mut self, value: impl Into<Bytes>) -> &mut Self {
        self.append(Component::new(value))
    }

    /// Appends all components of `other`.
    pub fn append_name(&mut self, other: &Name) -> &mut Self {
        self.components.extend(other.components.iter().cloned());
        self.changes.bump();
        self
    }

    /// Appends a segment number component.
    pub fn append_segment(&mut self, segment: u64) -> &mut Self {
        self.append(Component::from_segment(segment))
    }

    /// Appends a segment byte offset component.
    pub fn append_segment_offset(&mut self, offset: u64) -> &mut Self {
        self.append(Component::from_segment_offset(offset))
    }

    /// Appends a version component.
    pub fn append_version(&mut self, version: u64) -> &mut Self {
        self.append(Component::from_version(version))
    }

    /// Appends a timestamp component, in microseconds since the UNIX epoch.
    pub fn append_timestamp(&mut self, micros: u64) -> &mut Self {
        self.append(Component::from_timestamp(micros))
    }

    /// Appends a sequence number component.
    pub fn append_sequence_number(&mut self, sequence: u64) -> &mut Self {
        self.append(Component::from_sequence_number(sequence))
    }

    /// Appends an implicit SHA-256 digest component.
    pub fn append_implicit_sha256_digest(
        &mut self,
        digest: impl Into<Bytes>,
    ) -> Result<&mut Self, NameParseError> {
        let component = Component::from_implicit_sha256_digest(digest)?;
        Ok(self.append(component))
    }

    /// Removes all components.
    pub fn clear(&mut self) {
        self.components.clear();
        self.changes.bump();
    }

    /// Returns the first `count` components as a new name.
    ///
    /// A negative `count` drops that many components from the end instead.
    pub fn get_prefix(&self, count: isize) -> Name {
        let end = if count >= 0 {
            count as usize
        } else {
            self.components.len().saturating_sub(count.unsigned_abs())
        };
        self.get_sub_name(0, end)
    }

    /// Returns up to `count` components starting at `start` as a new name.
    ///
    /// A negative `start` counts from the end. Out-of-range parts yield fewer components.
    pub fn get_sub_name(&self, start: isize, count: usize) -> Name {
        let start = self.resolve_index(start).unwrap_or(0).min(self.components.len());
        let end = start.saturating_add(count).min(self.components.len());
        Name::from_components(self.components[start..end].iter().cloned())
    }

    /// Returns true if the components of `self` are a prefix of the components of `other`.
    ///
    /// Every name is a prefix of itself, and the empty name is a prefix of every name.
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        self.components.len() <= other.components.len()
            && self.components[..] == other.components[..self.components.len()]
    }

    /// Returns the canonical URI form, `/` for the empty name.
    pub fn to_uri(&self) -> String {
        if self.components.is_empty() {
            return "/".to_string();
        }

        let mut out = String::new();
        for component in &self.components {
            out.push('/');
            component.write_uri(&mut out);
        }
        out
    }
}
impl ChangeCountable for Name {
    fn change_count(&self) -> u64 {
        self.changes.get()
    }
}
impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}
impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.cmp(&other.components)
    }
}
impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
impl FromStr for Name {
    type Err = NameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uri(s)
    }
}
impl FromIterator<Component> for Name {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self::from_components(iter)
    }
}
impl<'a> IntoIterator for &'a Name {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
