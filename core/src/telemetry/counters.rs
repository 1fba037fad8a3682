//! telemetry/counters.rs
//! Live counters kept by each resource pool.
//!
//! Summary: bumped on the acquire/release hot path, so they are plain relaxed
//! atomics. Converted into an immutable `PoolStats` on demand.
use std::sync::atomic::{AtomicU64, Ordering};

use crate::telemetry::snapshot::PoolStats;

#[derive(Default, Debug)]
pub struct PoolCounters {
    created: AtomicU64,
    reused: AtomicU64,
    released: AtomicU64,
    discarded: AtomicU64,
}

impl PoolCounters {
    /// A new instance had to be constructed because the pool was empty.
    pub fn add_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    /// An idle instance was handed out again.
    pub fn add_reused(&self) {
        self.reused.fetch_add(1, Ordering::Relaxed);
    }

    /// An instance was reset and put back.
    pub fn add_released(&self) {
        self.released.fetch_add(1, Ordering::Relaxed);
    }

    /// An instance was dropped instead of being put back.
    pub fn add_discarded(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, idle: usize) -> PoolStats {
        PoolStats {
            created: self.created.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            idle: idle as u64,
        }
    }
}
