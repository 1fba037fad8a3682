//! telemetry/snapshot.rs
//! Immutable pool statistics.
use std::ops::AddAssign;
use serde::{Serialize, Deserialize};

/// Point-in-time view of a pool's counters.
///
/// Counters are read independently, so under concurrent use the fields are
/// individually exact but not a single atomic cut.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    pub created: u64,
    pub reused: u64,
    pub released: u64,
    pub discarded: u64,
    pub idle: u64,
}

impl PoolStats {
    /// Total number of acquisitions served.
    pub fn acquired(&self) -> u64 {
        self.created + self.reused
    }

    /// Fraction of acquisitions served from idle instances.
    pub fn reuse_ratio(&self) -> f64 {
        let acquired = self.acquired();
        if acquired == 0 {
            0.0
        } else {
            self.reused as f64 / acquired as f64
        }
    }

    /// Instances currently checked out.
    pub fn in_flight(&self) -> u64 {
        self.acquired().saturating_sub(self.released + self.discarded)
    }
}

impl AddAssign for PoolStats {
    fn add_assign(&mut self, rhs: Self) {
        self.created   += rhs.created;
        self.reused    += rhs.reused;
        self.released  += rhs.released;
        self.discarded += rhs.discarded;
        self.idle      += rhs.idle;
    }
}
