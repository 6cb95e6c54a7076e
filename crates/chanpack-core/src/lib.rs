//! # chanpack-core
//!
//! Channel-mapping engine for texture channel packing.
//!
//! Texture pipelines often store scalar masks (roughness, metallic, ambient
//! occlusion) in separate grayscale images and need them packed into the
//! channels of a single RGBA texture. This crate implements the pure mapping
//! engine for that job: no I/O, just buffers and channel specifiers.
//!
//! # Modules
//!
//! - [`buffer`] - Owned RGBA8 pixel buffers
//! - [`spec`] - Channel specifier parsing ([`SourceMap`], [`DestMap`])
//! - [`map`] - The mapping algorithm ([`map_channels`])
//!
//! # Example
//!
//! ```rust
//! use chanpack_core::{map_channels, DestMap, PixelBuffer, Reducer, SourceMap};
//!
//! // 1x1 source pixel: r=10, g=20, b=30, a=40
//! let src = PixelBuffer::from_rgba(1, 1, vec![10, 20, 30, 40]).unwrap();
//! let mut dst = PixelBuffer::filled(1, 1, 255).unwrap();
//!
//! // Pack the source red plane into the destination green channel.
//! let src_map: SourceMap = "r".parse().unwrap();
//! let dst_map: DestMap = "g".parse().unwrap();
//! map_channels(&src, &src_map, &mut dst, &dst_map, Reducer::Mean).unwrap();
//!
//! assert_eq!(dst.data(), &[255, 10, 255, 255]);
//! ```
//!
//! # Channel specifiers
//!
//! A specifier is a short string of channel letters. Source maps draw from
//! the physical channels `r g b a` plus the pseudo-channels `A` (per-pixel
//! mean of all channels), `M` (maximum) and `m` (minimum). Destination maps
//! allow only unique physical channels. The relative lengths of the two maps
//! select the mapping mode:
//!
//! | src len | dst len | mode       | behavior                               |
//! |---------|---------|------------|----------------------------------------|
//! | n       | n       | one-to-one | `src[i]` plane written to `dst[i]`     |
//! | >1      | 1       | combine    | planes reduced per pixel into one      |
//! | 1       | >1      | broadcast  | one plane copied to every destination  |
//!
//! Any other combination (e.g. 2 -> 3) is ambiguous and rejected before any
//! buffer is touched.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

pub mod buffer;
pub mod map;
pub mod spec;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use map::{MapMode, map_channels};
pub use spec::{Channel, DestMap, Reducer, SourceChannel, SourceMap};
