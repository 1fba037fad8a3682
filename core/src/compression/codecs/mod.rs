//! compression/codecs/mod.rs
//! Concrete algorithms plus the on-the-fly tagging codec.

pub mod flate;
pub mod none;
pub mod on_the_fly;
pub mod snappy;

pub use flate::*;
pub use none::*;
pub use on_the_fly::*;
pub use snappy::*;
