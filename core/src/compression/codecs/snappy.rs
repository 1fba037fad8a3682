//! codecs/snappy.rs
//! Snappy raw block format via `snap`.
//!
//! The block format starts with the decoded length, so both directions size
//! their output exactly once. Nothing here is pooled.

use std::borrow::Cow;

use snap::raw::{Decoder, Encoder};

use crate::compression::constants::algorithm_ids;
use crate::compression::types::{Compression, CompressionError, Operation, Result};

const NAME: &str = "snappy";

#[derive(Debug, Default, Clone, Copy)]
pub struct SnappyCompression;

impl Compression for SnappyCompression {
    fn algorithm_id(&self) -> u16 {
        algorithm_ids::SNAPPY
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn compress<'a>(&self, decompressed: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let compressed = Encoder::new()
            .compress_vec(decompressed)
            .map_err(|e| CompressionError::new(Operation::Compress, NAME, e))?;
        Ok(Cow::Owned(compressed))
    }

    fn decompress<'a>(&self, compressed: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let decompressed = Decoder::new()
            .decompress_vec(compressed)
            .map_err(|e| CompressionError::new(Operation::Decompress, NAME, e))?;
        Ok(Cow::Owned(decompressed))
    }
}
