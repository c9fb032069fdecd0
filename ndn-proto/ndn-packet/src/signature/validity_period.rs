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

//! Certificate validity periods.

use chrono::{DateTime, Utc};

use crate::change::{ChangeCount, ChangeCountable};

/// The time span a signature is valid for.
///
/// An unset period has neither bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidityPeriod {
    period: Option<(DateTime<Utc>, DateTime<Utc>)>,
    changes: ChangeCount,
}
impl ValidityPeriod {
    /// Creates an unset validity period.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validity period spanning `not_before..=not_after`.
    pub fn with_period(not_before: DateTime<Utc>, not_after: DateTime<Utc>) -> Self {
        Self {
            period: Some((not_before, not_after)),
            changes: ChangeCount::new(),
        }
    }

    /// Returns true if both bounds are set.
    pub fn has_period(&self) -> bool {
        self.period.is_some()
    }

    /// Returns the start of the period.
    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        self.period.map(|(not_before, _)| not_before)
    }

    /// Returns the end of the period.
    pub fn not_after(&self) -> Option<DateTime<Utc>> {
        self.period.map(|(_, not_after)| not_after)
    }

    /// Sets both bounds.
    pub fn set_period(&mut self, not_before: DateTime<Utc>, not_after: DateTime<Utc>) {
        self.period = Some((not_before, not_after));
        self.changes.bump();
    }

    /// Unsets the period.
    pub fn clear(&mut self) {
        self.period = None;
        self.changes.bump();
    }

    /// Returns true if `at` lies within the period, bounds included.
    ///
    /// An unset period is never valid.
    pub fn is_valid(&self, at: DateTime<Utc>) -> bool {
        self.period
            .is_some_and(|(not_before, not_after)| not_before <= at && at <= not_after)
    }

    /// Returns true if the current time lies within the period.
    pub fn is_valid_now(&self) -> bool {
        self.is_valid(Utc::now())
    }
}
impl ChangeCountable for ValidityPeriod {
    fn change_count(&self) -> u64 {
        self.changes.get()
    }
}
