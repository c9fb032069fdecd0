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

//! Packet codec configuration.
//!
//! ```json
//! {
//!   "max_packet_size": 8800,
//!   "nonce_length": 4,
//!   "default_interest_lifetime_ms": 4000
//! }
//! ```
//!
//! Every field is optional and falls back to its default.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

/// Default maximum packet size in bytes.
pub const DEFAULT_MAX_PACKET_SIZE: usize = 8800;
/// Default length of generated interest nonces in bytes.
pub const DEFAULT_NONCE_LENGTH: usize = 4;
/// Default interest lifetime in milliseconds.
pub const DEFAULT_INTEREST_LIFETIME_MS: u64 = 4000;

/// Configuration of the packet codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacketConfig {
    /// Inputs larger than this fail to decode.
    pub max_packet_size: usize,
    /// Length of nonces generated for interests without one.
    pub nonce_length: usize,
    /// Lifetime assumed for interests that do not set one.
    pub default_interest_lifetime_ms: u64,
}
impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            max_packet_size: DEFAULT_MAX_PACKET_SIZE,
            nonce_length: DEFAULT_NONCE_LENGTH,
            default_interest_lifetime_ms: DEFAULT_INTEREST_LIFETIME_MS,
        }
    }
}
impl PacketConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Returns the default interest lifetime.
    pub fn default_interest_lifetime(&self) -> Duration {
        Duration::from_millis(self.default_interest_lifetime_ms)
    }

    /// Checks the configured values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nonce_length == 0 {
            return Err(ConfigError::Invalid("nonce_length must be at least 1"));
        }
        if self.max_packet_size == 0 {
            return Err(ConfigError::Invalid("max_packet_size must be at least 1"));
        }
        Ok(())
    }
}

/// Errors that can occur while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid JSON for [`PacketConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A configured value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
