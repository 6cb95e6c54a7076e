//! Source image cache.
//!
//! A script may reference the same image from several directives; the cache
//! decodes each distinct reference once and hands out borrows of the
//! normalized buffer for the rest of the run. Keys are the reference
//! strings exactly as written in the script, so `./a.png` and `a.png` are
//! distinct entries. The cache lives for one run and is never shared across
//! threads, so there is no eviction and no locking.

use std::collections::HashMap;
use std::path::Path;

use chanpack_core::PixelBuffer;
use tracing::debug;

use crate::error::LoadError;

/// Per-run cache of decoded source images, normalized to RGBA8.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, PixelBuffer>,
}

impl ImageCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct images loaded so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the buffer for `reference`, decoding it on first use.
    ///
    /// `reference` is resolved against `base_dir` (the script's directory);
    /// whatever format the file is in, the decoded image is normalized to
    /// interleaved RGBA8.
    pub fn get_or_load(
        &mut self,
        reference: &str,
        base_dir: &Path,
    ) -> Result<&PixelBuffer, LoadError> {
        if !self.entries.contains_key(reference) {
            let resolved = base_dir.join(reference);
            debug!(reference, path = %resolved.display(), "loading source image");
            let decoded = image::open(&resolved)?.to_rgba8();
            let (width, height) = decoded.dimensions();
            let buffer = PixelBuffer::from_rgba(width, height, decoded.into_raw())?;
            self.entries.insert(reference.to_string(), buffer);
        } else {
            debug!(reference, "cache hit");
        }
        Ok(&self.entries[reference])
    }
}
