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

//! Filters selecting which incoming interests an application handles.

use crate::{
    name::Name,
    regex::{NdnRegex, RegexParseError},
};

/// A name prefix, optionally narrowed by a regex over the components after the prefix.
#[derive(Debug, Clone)]
pub struct InterestFilter {
    prefix: Name,
    regex: Option<NdnRegex>,
}
impl InterestFilter {
    /// Creates a filter matching every name under `prefix`.
    pub fn new(prefix: Name) -> Self {
        Self {
            prefix,
            regex: None,
        }
    }

    /// Creates a filter matching names under `prefix` whose remaining components fully match
    /// `regex_filter`.
    ///
    /// The regex is anchored at both ends, `^` and `$` are added when absent.
    pub fn with_regex(prefix: Name, regex_filter: &str) -> Result<Self, RegexParseError> {
        let mut pattern = String::with_capacity(regex_filter.len() + 2);
        if !regex_filter.starts_with('^') {
            pattern.push('^');
        }
        pattern.push_str(regex_filter);
        if !regex_filter.ends_with('$') {
            pattern.push('$');
        }

        Ok(Self {
            prefix,
            regex: Some(NdnRegex::parse(&pattern)?),
        })
    }

    /// Returns the prefix.
    pub fn prefix(&self) -> &Name {
        &self.prefix
    }

    /// Returns the anchored regex, if the filter has one.
    pub fn regex_filter(&self) -> Option<&NdnRegex> {
        self.regex.as_ref()
    }

    /// Checks whether `name` passes the filter.
    pub fn matches(&self, name: &Name) -> bool {
        if !self.prefix.is_prefix_of(name) {
            return false;
        }
        match &self.regex {
            None => true,
            Some(regex) => regex.matches(&name.components()[self.prefix.len()..]),
        }
    }
}
impl From<Name> for InterestFilter {
    fn from(prefix: Name) -> Self {
        Self::new(prefix)
    }
}
