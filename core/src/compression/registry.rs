//! compression/registry.rs
//! Algorithm registry: resolves wire ids to shared implementations.
//!
//! - Entries are `Arc`s swapped in whole under a write lock, so readers see a
//!   complete implementation or a miss, never anything in between.
//! - `lookup` falls back to a default; `get` does not. Decode paths must use
//!   `get`, because decoding with a guessed algorithm yields garbage.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;

use crate::compression::codecs::{tag_addressable, FlateCompression, SnappyCompression};
use crate::compression::config::CompressionConfig;
use crate::compression::constants::algorithm_ids;
use crate::compression::types::{Algorithm, CodecError, Compression, Result};
use crate::utils::enum_name_or_hex;

pub struct Registry {
    entries: RwLock<HashMap<u16, Arc<dyn Compression>>>,
    default: RwLock<Arc<dyn Compression>>,
}

impl Registry {
    /// An empty registry whose `lookup` misses fall back to `default`.
    pub fn new(default: Arc<dyn Compression>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default: RwLock::new(default),
        }
    }

    /// Flate and Snappy registered, Flate as the default.
    pub fn with_defaults() -> Self {
        Self::build(Arc::new(FlateCompression::new()))
    }

    /// Like `with_defaults`, tuned by `config`.
    pub fn from_config(config: &CompressionConfig) -> Result<Self> {
        let registry = Self::build(Arc::new(FlateCompression::with_level(config.flate_level)?));
        let default = registry
            .get(config.default_algorithm)
            .ok_or(CodecError::UnknownCompression { raw: config.default_algorithm })?;
        registry.set_default(default);
        Ok(registry)
    }

    fn build(flate: Arc<FlateCompression>) -> Self {
        let registry = Self::new(flate.clone());
        registry.insert(flate);
        registry.insert(Arc::new(SnappyCompression));
        registry
    }

    /// Shared process-wide registry, built with `with_defaults` on first use.
    pub fn global() -> Arc<Registry> {
        static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(Registry::with_defaults())).clone()
    }

    /// Insert or replace the entry for `compression.algorithm_id()`.
    /// Returns the entry that was replaced, if any.
    ///
    /// Any `u16` other than the on-the-fly id is accepted, but entries at
    /// `0x00FF` and above (including `NONE`) are never reached from an
    /// on-the-fly tag; they resolve only through `lookup`/`get`.
    pub fn register(&self, compression: Arc<dyn Compression>) -> Result<Option<Arc<dyn Compression>>> {
        let id = compression.algorithm_id();
        if id == algorithm_ids::ON_THE_FLY {
            return Err(CodecError::ReservedAlgorithm { id });
        }
        Ok(self.insert(compression))
    }

    fn insert(&self, compression: Arc<dyn Compression>) -> Option<Arc<dyn Compression>> {
        let id = compression.algorithm_id();
        let name = compression.name();
        let previous = self.entries.write().insert(id, compression);
        if !tag_addressable(id) {
            debug!(
                algorithm = %enum_name_or_hex::<Algorithm>(id),
                "registered id has no on-the-fly tag, reachable through lookup/get only"
            );
        }
        debug!(
            algorithm = %enum_name_or_hex::<Algorithm>(id),
            algorithm_name = name,
            replaced = previous.is_some(),
            "registered compression"
        );
        previous
    }

    /// Permissive lookup. On a miss returns the default and `false`.
    pub fn lookup(&self, id: u16) -> (Arc<dyn Compression>, bool) {
        match self.get(id) {
            Some(found) => (found, true),
            None => (self.default_compression(), false),
        }
    }

    /// Strict lookup.
    pub fn get(&self, id: u16) -> Option<Arc<dyn Compression>> {
        self.entries.read().get(&id).cloned()
    }

    pub fn contains(&self, id: u16) -> bool {
        self.entries.read().contains_key(&id)
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self.entries.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn default_compression(&self) -> Arc<dyn Compression> {
        self.default.read().clone()
    }

    pub fn set_default(&self, compression: Arc<dyn Compression>) {
        debug!(
            algorithm = %enum_name_or_hex::<Algorithm>(compression.algorithm_id()),
            "default compression changed"
        );
        *self.default.write() = compression;
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("ids", &self.ids())
            .field("default", &self.default_compression().algorithm_id())
            .finish()
    }
}
