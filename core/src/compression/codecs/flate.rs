//! codecs/flate.rs
//! Raw deflate (no zlib header) via flate2, with pooled encoder/decoder state.
//!
//! Design notes:
//! - `flate2::Compress`/`Decompress` carry the large window and hash tables, so
//!   they are pooled and reset between calls instead of rebuilt per packet.
//! - The writer pool binds each encoder to its own output buffer. The compressed
//!   bytes are copied out before the buffer goes back to the pool.
//! - Bad input leaves the pooled object reusable once reset. Only a failed
//!   finish/reset, or a panic mid-call, keeps it out of the pool.

use std::borrow::Cow;
use std::io;

use flate2::{Compress, Compression as Level, Decompress, FlushCompress, FlushDecompress, Status};

use crate::compression::constants::{
    algorithm_ids, DECOMPRESS_GROWTH_HINT, DEFAULT_LEVEL_FLATE, MAX_LEVEL_FLATE, MIN_BUFFER_GROWTH,
};
use crate::compression::pool::{Pool, Pooled, Recycle};
use crate::compression::types::{CodecError, Compression, CompressionError, Operation, Result};
use crate::telemetry::PoolStats;

const NAME: &str = "flate";

/// Keep stream state out of the pool when finishing or resetting it failed.
fn discard_on_resource_failure<T: Recycle>(pooled: &mut Pooled<'_, T>, err: &CompressionError) {
    if matches!(err.op(), Operation::Close | Operation::Reset) {
        pooled.discard();
    }
}

/// Make sure the next `*_vec` call has somewhere to write.
fn reserve_spare(buf: &mut Vec<u8>) {
    if buf.len() == buf.capacity() {
        buf.reserve(buf.capacity().max(MIN_BUFFER_GROWTH));
    }
}

/// Encoder bound to a reusable output buffer.
struct FlateWriter {
    encoder: Compress,
    buf: Vec<u8>,
}

impl FlateWriter {
    fn new(level: u32) -> Self {
        Self {
            encoder: Compress::new(Level::new(level), false),
            buf: Vec::new(),
        }
    }

    /// Encode `input` as one complete deflate stream into the pooled buffer.
    fn deflate(&mut self, input: &[u8]) -> std::result::Result<&[u8], CompressionError> {
        self.encoder.reset();
        self.buf.clear();

        while (self.encoder.total_in() as usize) < input.len() {
            reserve_spare(&mut self.buf);
            let consumed = self.encoder.total_in() as usize;
            self.encoder
                .compress_vec(&input[consumed..], &mut self.buf, FlushCompress::None)
                .map_err(|e| CompressionError::new(Operation::Compress, NAME, e))?;
        }

        loop {
            reserve_spare(&mut self.buf);
            let status = self
                .encoder
                .compress_vec(&[], &mut self.buf, FlushCompress::Finish)
                .map_err(|e| CompressionError::new(Operation::Close, NAME, e))?;
            if matches!(status, Status::StreamEnd) {
                return Ok(&self.buf);
            }
        }
    }
}

impl Recycle for FlateWriter {
    fn recycle(&mut self) {
        self.encoder.reset();
        self.buf.clear();
    }
}

struct FlateReader {
    decoder: Decompress,
}

impl FlateReader {
    fn new() -> Self {
        Self { decoder: Decompress::new(false) }
    }

    /// Decode one complete deflate stream into a freshly sized buffer.
    fn inflate(&mut self, input: &[u8]) -> std::result::Result<Vec<u8>, CompressionError> {
        self.decoder.reset(false);

        let hint = input.len().saturating_mul(DECOMPRESS_GROWTH_HINT);
        let mut out = Vec::with_capacity(hint.max(MIN_BUFFER_GROWTH));

        loop {
            reserve_spare(&mut out);
            let consumed = self.decoder.total_in() as usize;
            let produced = self.decoder.total_out();

            let status = self
                .decoder
                .decompress_vec(&input[consumed..], &mut out, FlushDecompress::None)
                .map_err(|e| CompressionError::new(Operation::Decompress, NAME, e))?;

            if matches!(status, Status::StreamEnd) {
                return Ok(out);
            }

            // Output has room, so no progress means the input ran out early.
            let stalled = self.decoder.total_in() as usize == consumed
                && self.decoder.total_out() == produced;
            if stalled {
                return Err(CompressionError::new(
                    Operation::Decompress,
                    NAME,
                    io::Error::new(io::ErrorKind::UnexpectedEof, "truncated deflate stream"),
                ));
            }
        }
    }
}

impl Recycle for FlateReader {
    fn recycle(&mut self) {
        self.decoder.reset(false);
    }
}

/// Raw deflate, the protocol's default algorithm.
pub struct FlateCompression {
    level: u32,
    writers: Pool<FlateWriter>,
    readers: Pool<FlateReader>,
}

impl FlateCompression {
    /// Deflate at the default level (6).
    pub fn new() -> Self {
        Self::build(DEFAULT_LEVEL_FLATE)
    }

    /// Deflate at an explicit level, 0 (store) through 9 (best).
    pub fn with_level(level: u32) -> Result<Self> {
        if level > MAX_LEVEL_FLATE {
            return Err(CodecError::InvalidLevel { level });
        }
        Ok(Self::build(level))
    }

    fn build(level: u32) -> Self {
        Self {
            level,
            writers: Pool::new("flate-writer", move || FlateWriter::new(level)),
            readers: Pool::new("flate-reader", FlateReader::new),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn writer_stats(&self) -> PoolStats {
        self.writers.stats()
    }

    pub fn reader_stats(&self) -> PoolStats {
        self.readers.stats()
    }

    /// Writer and reader pools summed.
    pub fn pool_stats(&self) -> PoolStats {
        let mut stats = self.writer_stats();
        stats += self.reader_stats();
        stats
    }
}

impl Default for FlateCompression {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlateCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlateCompression")
            .field("level", &self.level)
            .field("writers", &self.writers)
            .field("readers", &self.readers)
            .finish()
    }
}

impl Compression for FlateCompression {
    fn algorithm_id(&self) -> u16 {
        algorithm_ids::FLATE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn compress<'a>(&self, decompressed: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let mut writer = self.writers.acquire();
        let result = writer.deflate(decompressed).map(<[u8]>::to_vec);
        if let Err(e) = &result {
            discard_on_resource_failure(&mut writer, e);
        }
        Ok(Cow::Owned(result?))
    }

    fn decompress<'a>(&self, compressed: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let mut reader = self.readers.acquire();
        let result = reader.inflate(compressed);
        if let Err(e) = &result {
            discard_on_resource_failure(&mut reader, e);
        }
        Ok(Cow::Owned(result?))
    }
}
