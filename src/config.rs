//! Configuration for vectorrep
//!
//! Centralized memtable configuration with sensible defaults.

use std::fmt;
use std::str::FromStr;

use crate::error::{MemTableError, Result};

/// Main configuration for a vector memtable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemTableConfig {
    /// Expected number of entries per memtable.
    /// Only used to pre-reserve the backing vector.
    pub reserve_count: usize,
}

impl MemTableConfig {
    /// Name of the representation in option strings
    pub const REP_NAME: &'static str = "vector";

    /// Create a new config builder
    pub fn builder() -> MemTableConfigBuilder {
        MemTableConfigBuilder::default()
    }
}

/// Parses the engine option form: `vector` or `vector:<count>`
impl FromStr for MemTableConfig {
    type Err = MemTableError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, count) = match s.split_once(':') {
            Some((name, count)) => (name.trim(), Some(count.trim())),
            None => (s, None),
        };

        if name != Self::REP_NAME {
            return Err(MemTableError::Config(format!(
                "unknown memtable representation '{}'",
                name
            )));
        }

        let reserve_count = match count {
            None => 0,
            Some(count) => count.parse::<usize>().map_err(|e| {
                MemTableError::Config(format!("invalid reserve count '{}': {}", count, e))
            })?,
        };

        Ok(Self { reserve_count })
    }
}

impl fmt::Display for MemTableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", Self::REP_NAME, self.reserve_count)
    }
}

/// Builder for MemTableConfig
#[derive(Default)]
pub struct MemTableConfigBuilder {
    config: MemTableConfig,
}

impl MemTableConfigBuilder {
    /// Set the expected entry count (pre-reserved capacity)
    pub fn reserve_count(mut self, count: usize) -> Self {
        self.config.reserve_count = count;
        self
    }

    pub fn build(self) -> MemTableConfig {
        self.config
    }
}
