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

//! ndn-packet: A mutable object model for Named Data Networking packets.
//!
//! Applications build and edit [`Interest`], [`Data`] and [`Link`] packets field by field.
//! Every packet keeps its last wire encoding and re-encodes only when something changed. Change
//! detection is pull-based: each object carries a change count, and composite objects compare
//! the counts of their children whenever they are asked for their own, see [`change`].
//!
//! Objects never encode themselves. Encoding and decoding go through a [`WireFormat`], by default
//! the NDN-TLV format in [`tlv`].
//!
//! ```
//! use ndn_packet::{ChangeCountable, Data, Interest, Name};
//!
//! let mut data = Data::with_name(Name::from_uri("/example/data/1").unwrap());
//! data.set_content(&b"hello"[..]);
//! let encoding = data.wire_encode().unwrap();
//!
//! let mut decoded = Data::new();
//! decoded.wire_decode(encoding.bytes().clone()).unwrap();
//! assert_eq!(decoded, data);
//!
//! let interest = Interest::with_name(Name::from_uri("/example/data").unwrap());
//! assert!(interest.matches_data(&decoded).unwrap());
//!
//! let count = decoded.change_count();
//! decoded.name_mut().append_segment(0);
//! assert!(decoded.change_count() > count);
//! ```

pub mod change;
pub mod config;
pub mod control;
pub mod data;
pub mod delegation_set;
pub mod exclude;
pub mod interest;
pub mod interest_filter;
pub mod key_locator;
pub mod link;
pub mod meta_info;
pub mod nack;
pub mod name;
pub mod regex;
pub mod signature;
pub mod tlv;
pub mod wire;

pub use change::{ChangeCount, ChangeCountable, ChangeTracker};
pub use config::PacketConfig;
pub use data::Data;
pub use interest::Interest;
pub use interest_filter::InterestFilter;
pub use link::Link;
pub use name::{Component, ComponentType, Name};
pub use wire::{DecodingError, EncodingError, SignedBlob, WireFormat};
