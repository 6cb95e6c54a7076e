//! The channel-mapping algorithm.
//!
//! [`map_channels`] moves planes from a source buffer into selected channels
//! of a destination buffer. The relative lengths of the two specifiers pick
//! one of three modes ([`MapMode`]); every other length combination is
//! ambiguous and rejected. All validation runs before the first write, so a
//! failed call leaves the destination byte-identical.

use crate::buffer::PixelBuffer;
use crate::spec::{CHANNEL_COUNT, DestMap, Reducer, SourceChannel, SourceMap};
use crate::{Error, Result};

/// The cardinality relation between a directive's source and destination
/// specifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    /// Equal lengths: `src[i]` is written to `dst[i]`.
    OneToOne,
    /// Many source channels reduced into one destination channel.
    Combine,
    /// One source channel copied into many destination channels.
    Broadcast,
}

impl MapMode {
    /// Selects the mode for a specifier pair, or rejects it as ambiguous.
    pub fn select(src_map: &SourceMap, dst_map: &DestMap) -> Result<Self> {
        let (src_len, dst_len) = (src_map.len(), dst_map.len());
        if src_len == dst_len {
            Ok(MapMode::OneToOne)
        } else if src_len > 1 && dst_len == 1 {
            Ok(MapMode::Combine)
        } else if src_len == 1 && dst_len > 1 {
            Ok(MapMode::Broadcast)
        } else {
            Err(Error::ambiguous(src_map.as_str(), dst_map.as_str()))
        }
    }
}

/// Resolves one source entry to a deinterleaved plane.
///
/// Physical entries are an identity slice of the source; pseudo entries
/// reduce all four physical components of each pixel.
fn resolve_plane(src: &PixelBuffer, entry: SourceChannel) -> Vec<u8> {
    match entry {
        SourceChannel::Physical(channel) => src.plane(channel),
        SourceChannel::Pseudo(reducer) => src
            .data()
            .chunks_exact(CHANNEL_COUNT)
            .map(|px| reducer.reduce(px))
            .collect(),
    }
}

/// Maps channels of `src` into selected channels of `dst`, in place.
///
/// `combine` is only consulted in [`MapMode::Combine`]; callers without an
/// opinion pass [`Reducer::Mean`], the conventional default for packing
/// scripts.
///
/// # Errors
///
/// - [`Error::DimensionMismatch`] if the buffers' spatial dimensions differ
/// - [`Error::AmbiguousMapping`] if the specifier lengths match no mode
///
/// Specifier-content errors (unknown or duplicate channels) cannot occur
/// here; they are caught when the maps are parsed.
pub fn map_channels(
    src: &PixelBuffer,
    src_map: &SourceMap,
    dst: &mut PixelBuffer,
    dst_map: &DestMap,
    combine: Reducer,
) -> Result<()> {
    if src.dimensions() != dst.dimensions() {
        return Err(Error::dimension_mismatch(src.dimensions(), dst.dimensions()));
    }
    let mode = MapMode::select(src_map, dst_map)?;

    match mode {
        MapMode::OneToOne => {
            for (entry, channel) in src_map.channels().iter().zip(dst_map.channels()) {
                let plane = resolve_plane(src, *entry);
                dst.write_plane(*channel, &plane)?;
            }
        }
        MapMode::Combine => {
            let planes: Vec<Vec<u8>> = src_map
                .channels()
                .iter()
                .map(|entry| resolve_plane(src, *entry))
                .collect();
            let mut reduced = vec![0u8; src.pixel_count()];
            let mut samples = [0u8; CHANNEL_COUNT];
            for (i, out) in reduced.iter_mut().enumerate() {
                for (slot, plane) in samples.iter_mut().zip(&planes) {
                    *slot = plane[i];
                }
                *out = combine.reduce(&samples[..planes.len()]);
            }
            dst.write_plane(dst_map.channels()[0], &reduced)?;
        }
        MapMode::Broadcast => {
            let plane = resolve_plane(src, src_map.channels()[0]);
            for channel in dst_map.channels() {
                dst.write_plane(*channel, &plane)?;
            }
        }
    }
    Ok(())
}
