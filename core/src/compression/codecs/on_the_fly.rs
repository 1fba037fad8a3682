//! codecs/on_the_fly.rs
//! Self-describing codec: every payload carries a one-byte algorithm tag.
//!
//! Wire format: `[tag: u8][payload]`. Tag `0xFF` means the payload is not
//! compressed; any other tag is looked up in the registry. Encoding always uses
//! the wrapped algorithm, decoding always follows the tag.

use std::borrow::Cow;
use std::sync::Arc;

use crate::compression::constants::{algorithm_ids, TAG_UNCOMPRESSED};
use crate::compression::registry::Registry;
use crate::compression::types::{CodecError, Compression, Result};

/// Wire tag for `id`. `NONE` maps onto the uncompressed sentinel; any other id
/// must fit below it.
pub fn wire_tag(id: u16) -> Result<u8> {
    if id == algorithm_ids::NONE {
        return Ok(TAG_UNCOMPRESSED);
    }
    u8::try_from(id)
        .ok()
        .filter(|tag| *tag != TAG_UNCOMPRESSED)
        .ok_or(CodecError::TagOutOfRange { id })
}

/// Whether an on-the-fly tag can ever dispatch to a registry entry under `id`.
/// `0xFF` is always the sentinel, so only ids below it qualify.
pub fn tag_addressable(id: u16) -> bool {
    id < u16::from(TAG_UNCOMPRESSED)
}

pub struct OnTheFlyCompression {
    inner: Arc<dyn Compression>,
    tag: u8,
    registry: Arc<Registry>,
}

impl OnTheFlyCompression {
    /// Encode with `inner`, decode through `registry`.
    ///
    /// Fails with `TagOutOfRange` if `inner`'s id cannot be carried in the tag.
    pub fn new(inner: Arc<dyn Compression>, registry: Arc<Registry>) -> Result<Self> {
        let tag = wire_tag(inner.algorithm_id())?;
        Ok(Self { inner, tag, registry })
    }

    /// The algorithm used for encoding.
    pub fn inner(&self) -> &Arc<dyn Compression> {
        &self.inner
    }

    pub fn tag(&self) -> u8 {
        self.tag
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl std::fmt::Debug for OnTheFlyCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnTheFlyCompression")
            .field("inner", &self.inner)
            .field("tag", &self.tag)
            .finish()
    }
}

impl Compression for OnTheFlyCompression {
    fn algorithm_id(&self) -> u16 {
        algorithm_ids::ON_THE_FLY
    }

    fn name(&self) -> &'static str {
        "on-the-fly"
    }

    fn compress<'a>(&self, decompressed: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let compressed = self.inner.compress(decompressed)?;
        let mut out = Vec::with_capacity(1 + compressed.len());
        out.push(self.tag);
        out.extend_from_slice(&compressed);
        Ok(Cow::Owned(out))
    }

    fn decompress<'a>(&self, compressed: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let (&tag, payload) = compressed.split_first().ok_or(CodecError::MissingTag)?;
        if tag == TAG_UNCOMPRESSED {
            return Ok(Cow::Borrowed(payload));
        }
        let compression = self
            .registry
            .get(u16::from(tag))
            .ok_or(CodecError::UnknownCompression { raw: u16::from(tag) })?;
        compression.decompress(payload)
    }
}
