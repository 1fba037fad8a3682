//! compression/config.rs
//! Tunables for building a registry.

use serde::{Deserialize, Serialize};

use crate::compression::constants::{algorithm_ids, DEFAULT_LEVEL_FLATE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Deflate level, 0..=9.
    pub flate_level: u32,
    /// Algorithm returned by `Registry::lookup` on a miss.
    pub default_algorithm: u16,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            flate_level: DEFAULT_LEVEL_FLATE,
            default_algorithm: algorithm_ids::FLATE,
        }
    }
}
