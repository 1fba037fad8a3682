//! telemetry/mod.rs
//! Pool counters and their immutable snapshots.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
