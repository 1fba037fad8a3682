//! compression/types.rs
//! Algorithm identifiers, the `Compression` capability and its error types.
use std::borrow::Cow;
use std::fmt;

use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::compression::constants::algorithm_ids;
use crate::utils::enum_name_or_hex;

/// Known algorithm identifiers. The registry is keyed by raw `u16`, so ids
/// outside this enum can still be registered; the enum only names them.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum Algorithm {
    Flate        = algorithm_ids::FLATE,
    Snappy       = algorithm_ids::SNAPPY,
    Uncompressed = algorithm_ids::NONE,
    OnTheFly     = algorithm_ids::ON_THE_FLY,
}

/// A compression algorithm usable on a packet stream.
///
/// Implementations are shared across connections behind `Arc`, so they must not
/// keep per-call mutable state of their own. Outputs are `Cow` so pass-through
/// paths can hand the input back without allocating.
pub trait Compression: Send + Sync {
    /// Stable wire identifier of this algorithm.
    fn algorithm_id(&self) -> u16;

    /// Short human readable name, used in error messages.
    fn name(&self) -> &'static str;

    /// Compress one complete payload.
    fn compress<'a>(&self, decompressed: &'a [u8]) -> Result<Cow<'a, [u8]>>;

    /// Decompress one complete payload.
    fn decompress<'a>(&self, compressed: &'a [u8]) -> Result<Cow<'a, [u8]>>;
}

impl fmt::Debug for dyn Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compression")
            .field("name", &self.name())
            .field("id", &enum_name_or_hex::<Algorithm>(self.algorithm_id()))
            .finish()
    }
}

/// The step of a compress/decompress call that failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Compress,
    Decompress,
    Reset,
    Close,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Compress   => "compress",
            Operation::Decompress => "decompress",
            Operation::Reset      => "reset",
            Operation::Close      => "close",
        };
        f.write_str(s)
    }
}

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure inside one algorithm, labelled with the operation that produced it.
/// The original cause stays reachable through `Error::source`.
#[derive(Debug, Error)]
#[error("{op} {algorithm}: {source}")]
pub struct CompressionError {
    op: Operation,
    algorithm: &'static str,
    #[source]
    source: BoxedCause,
}

impl CompressionError {
    pub fn new<E>(op: Operation, algorithm: &'static str, cause: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        Self { op, algorithm, source: cause.into() }
    }

    pub fn op(&self) -> Operation {
        self.op
    }

    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    /// Borrow the wrapped cause, e.g. to `downcast_ref::<std::io::Error>()`.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error("unknown compression algorithm: {}", enum_name_or_hex::<Algorithm>(*raw))]
    UnknownCompression { raw: u16 },

    #[error("algorithm id 0x{id:04x} does not fit the one-byte on-the-fly tag")]
    TagOutOfRange { id: u16 },

    #[error("algorithm id 0x{id:04x} is reserved and cannot be registered")]
    ReservedAlgorithm { id: u16 },

    #[error("on-the-fly payload is missing its algorithm tag")]
    MissingTag,

    #[error("invalid flate level {level}, expected 0..=9")]
    InvalidLevel { level: u32 },
}

impl CodecError {
    /// The operation label, when the error came from inside an algorithm.
    pub fn op(&self) -> Option<Operation> {
        match self {
            CodecError::Compression(e) => Some(e.op()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
