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

//! Interest exclude filters.
//!
//! An exclude is an ordered list of entries, each either a component or `ANY`. Read left to
//! right, the entries describe ranges of excluded components:
//!
//! * a component entry excludes exactly that component
//! * `ANY` between two components excludes everything strictly between them
//! * a leading `ANY` excludes everything below the first component, a trailing one everything
//!   above the last component, and a lone `ANY` excludes everything
//!
//! Entries are kept in insertion order and never validated.

use std::fmt;

use crate::{
    change::{ChangeCount, ChangeCountable},
    name::Component,
};

/// An exclude entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExcludeEntry {
    /// Open range between the neighbouring component entries.
    Any,
    /// A single excluded component.
    Component(Component),
}
impl ExcludeEntry {
    fn component(&self) -> Option<&Component> {
        match self {
            ExcludeEntry::Any => None,
            ExcludeEntry::Component(component) => Some(component),
        }
    }
}

/// An ordered list of exclude entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclude {
    entries: Vec<ExcludeEntry>,
    changes: ChangeCount,
}
impl Exclude {
    /// Creates an empty exclude.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`.
    pub fn get(&self, index: usize) -> Option<&ExcludeEntry> {
        self.entries.get(index)
    }

    /// Returns all entries in order.
    pub fn entries(&self) -> &[ExcludeEntry] {
        &self.entries
    }

    /// Appends an `ANY` entry.
    pub fn append_any(&mut self) -> &mut Self {
        self.entries.push(ExcludeEntry::Any);
        self.changes.bump();
        self
    }

    /// Appends a component entry.
    pub fn append_component(&mut self, component: Component) -> &mut Self {
        self.entries.push(ExcludeEntry::Component(component));
        self.changes.bump();
        self
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.changes.bump();
    }

    /// Returns true if `component` is excluded.
    pub fn matches(&self, component: &Component) -> bool {
        let mut i = 0;
        while i < self.entries.len() {
            let Some(entry) = self.entries[i].component() else {
                let lower = i.checked_sub(1).and_then(|j| self.entries[j].component());
                let upper = self.entries[i + 1..]
                    .iter()
                    .position(|entry| entry.component().is_some())
                    .map(|offset| i + 1 + offset);

                match (lower, upper) {
                    (lower, Some(upper_index)) => {
                        let upper = self.entries[upper_index].component();
                        let above_lower = lower.is_none_or(|lower| component > lower);
                        if above_lower && upper.is_some_and(|upper| component < upper) {
                            return true;
                        }
                        // The upper bound itself is checked as a component entry next.
                        i = upper_index;
                        continue;
                    }
                    (Some(lower), None) => return component > lower,
                    (None, None) => return true,
                }
            };

            if entry == component {
                return true;
            }
            i += 1;
        }

        false
    }

    /// Returns the entries as comma-separated escaped components, `*` for `ANY`.
    pub fn to_uri(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            match entry {
                ExcludeEntry::Any => out.push('*'),
                ExcludeEntry::Component(component) => component.write_uri(&mut out),
            }
        }
        out
    }
}
impl ChangeCountable for Exclude {
    fn change_count(&self) -> u64 {
        self.changes.get()
    }
}
impl fmt::Display for Exclude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
