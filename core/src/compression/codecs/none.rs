//! codecs/none.rs
//! Pass-through codec.

use std::borrow::Cow;

use crate::compression::constants::algorithm_ids;
use crate::compression::types::{Compression, Result};

/// Sends payloads as-is. Both directions borrow the input and never fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCompression;

impl Compression for NoCompression {
    fn algorithm_id(&self) -> u16 {
        algorithm_ids::NONE
    }

    fn name(&self) -> &'static str {
        "none"
    }

    fn compress<'a>(&self, decompressed: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Borrowed(decompressed))
    }

    fn decompress<'a>(&self, compressed: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Borrowed(compressed))
    }
}
