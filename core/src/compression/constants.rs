/// Stable algorithm IDs (u16) for the wire format and handshake settings.
pub mod algorithm_ids {
    pub const FLATE: u16      = 0x0000;
    pub const SNAPPY: u16     = 0x0001;
    /// Low byte doubles as the on-the-fly "uncompressed" tag.
    pub const NONE: u16       = 0xFFFF;
    /// Meta id reported by the on-the-fly codec. Never registrable, never on the wire.
    pub const ON_THE_FLY: u16 = 0xFFFE;
}

/// On-the-fly tag meaning "the remaining bytes are not compressed".
pub const TAG_UNCOMPRESSED: u8 = 0xFF;

/// Default deflate level (balanced).
pub const DEFAULT_LEVEL_FLATE: u32 = 6;
pub const MAX_LEVEL_FLATE: u32 = 9;

/// Decompressed output is pre-sized to this multiple of the compressed length.
pub const DECOMPRESS_GROWTH_HINT: usize = 2;

/// Smallest reservation made when a deflate output buffer runs out of room.
pub const MIN_BUFFER_GROWTH: usize = 64;
