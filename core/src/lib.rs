//! packet-compression
//!
//! Pluggable compression for packet streams.
//! Synchronous, no I/O, no internal threads.

#![forbid(unsafe_code)]

// Shared and top level
pub mod utils;

pub mod compression;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        algorithm_ids, CodecError, Compression, CompressionConfig, CompressionError,
        FlateCompression, NoCompression, OnTheFlyCompression, Operation, Registry,
        SnappyCompression,
    };
}
