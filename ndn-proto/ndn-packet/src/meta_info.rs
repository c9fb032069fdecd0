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

//! Data packet meta information.

use std::time::Duration;

use crate::{
    change::{ChangeCount, ChangeCountable},
    name::Component,
};

/// Content types of data packets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Opaque payload.
    #[default]
    Blob,
    /// A delegation set, see [`crate::link::Link`].
    Link,
    /// A public key.
    Key,
    /// An application-level negative acknowledgement.
    Nack,
    /// Other, unrecognized content types.
    Other(u64),
}
impl From<u64> for ContentType {
    fn from(value: u64) -> Self {
        match value {
            0 => ContentType::Blob,
            1 => ContentType::Link,
            2 => ContentType::Key,
            3 => ContentType::Nack,
            other => ContentType::Other(other),
        }
    }
}
impl From<ContentType> for u64 {
    fn from(val: ContentType) -> Self {
        match val {
            ContentType::Blob => 0,
            ContentType::Link => 1,
            ContentType::Key => 2,
            ContentType::Nack => 3,
            ContentType::Other(other) => other,
        }
    }
}

/// Meta information of a data packet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaInfo {
    content_type: ContentType,
    freshness_period: Option<Duration>,
    final_block_id: Option<Component>,
    changes: ChangeCount,
}
impl MetaInfo {
    /// Creates meta information with content type blob and nothing else set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content type.
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Sets the content type.
    pub fn set_content_type(&mut self, content_type: ContentType) -> &mut Self {
        self.content_type = content_type;
        self.changes.bump();
        self
    }

    /// Returns the freshness period.
    pub fn freshness_period(&self) -> Option<Duration> {
        self.freshness_period
    }

    /// Sets the freshness period.
    pub fn set_freshness_period(&mut self, freshness_period: Option<Duration>) -> &mut Self {
        self.freshness_period = freshness_period;
        self.changes.bump();
        self
    }

    /// Returns the id of the last segment.
    pub fn final_block_id(&self) -> Option<&Component> {
        self.final_block_id.as_ref()
    }

    /// Sets the id of the last segment.
    pub fn set_final_block_id(&mut self, final_block_id: Option<Component>) -> &mut Self {
        self.final_block_id = final_block_id;
        self.changes.bump();
        self
    }
}
impl ChangeCountable for MetaInfo {
    fn change_count(&self) -> u64 {
        self.changes.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_normalize_known_content_type_codes() {
        assert_eq!(ContentType::from(1), ContentType::Link);
        assert_eq!(ContentType::from(1024), ContentType::Other(1024));
        assert_eq!(u64::from(ContentType::Other(1024)), 1024);
        assert_eq!(u64::from(ContentType::Nack), 3);
    }

    #[test]
    fn should_bump_on_every_setter() {
        let mut meta = MetaInfo::new();
        let start = meta.change_count();
        meta.set_content_type(ContentType::Key);
        let after_type = meta.change_count();
        assert!(after_type > start);
        meta.set_freshness_period(Some(Duration::from_secs(1)));
        let after_freshness = meta.change_count();
        assert!(after_freshness > after_type);
        meta.set_final_block_id(Some(Component::from_segment(9)));
        assert!(meta.change_count() > after_freshness);
        assert_eq!(meta.final_block_id().unwrap().to_segment().unwrap(), 9);
    }
}
