//! compression/mod.rs
//! Packet compression with interchangeable algorithms.
//!
//! - Every algorithm implements `Compression` and is shared behind `Arc`.
//! - `Registry` resolves wire ids to algorithms.
//! - `OnTheFlyCompression` tags each payload so the decoder can pick the
//!   algorithm without prior negotiation.

pub mod codecs;
pub mod config;
pub mod constants;
pub mod pool;
pub mod registry;
pub mod types;

pub use codecs::*;
pub use config::*;
pub use constants::*;
pub use registry::*;
pub use types::*;
