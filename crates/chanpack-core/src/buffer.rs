//! RGBA8 pixel buffers.
//!
//! [`PixelBuffer`] is the only image container the engine knows about: an
//! owned, interleaved, row-major RGBA buffer with 8 bits per component.
//! Sources are treated as read-only after creation; the destination buffer
//! of a packing run is mutated in place by [`crate::map_channels`].
//!
//! # Memory layout
//!
//! ```text
//! [R G B A R G B A ...]  <- row 0, left to right
//! [R G B A R G B A ...]  <- row 1
//! ```

use crate::spec::{CHANNEL_COUNT, Channel};
use crate::{Error, Result};

/// Owned interleaved RGBA8 image buffer.
///
/// Dimensions are fixed at construction and always non-zero. The channel
/// count is always 4; images with fewer channels must be normalized to RGBA
/// before they reach the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Creates a buffer from raw interleaved RGBA data.
    ///
    /// Fails if either dimension is zero or `data.len()` is not exactly
    /// `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "width and height must be non-zero",
            ));
        }
        let expected = width as usize * height as usize * CHANNEL_COUNT;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a buffer with every component set to `value`.
    ///
    /// The script runner allocates destinations with `filled(w, h, 255)` so
    /// channels never targeted by a directive stay opaque white.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "width and height must be non-zero",
            ));
        }
        let len = width as usize * height as usize * CHANNEL_COUNT;
        Ok(Self {
            data: vec![value; len],
            width,
            height,
        })
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Spatial dimensions as `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved RGBA data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns the raw interleaved data.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The four components of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the buffer.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; CHANNEL_COUNT] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let base = (y as usize * self.width as usize + x as usize) * CHANNEL_COUNT;
        [
            self.data[base],
            self.data[base + 1],
            self.data[base + 2],
            self.data[base + 3],
        ]
    }

    /// Extracts one physical plane as a deinterleaved copy.
    ///
    /// The result has [`pixel_count`](Self::pixel_count) samples in row-major
    /// order.
    pub fn plane(&self, channel: Channel) -> Vec<u8> {
        let offset = channel.index();
        self.data
            .chunks_exact(CHANNEL_COUNT)
            .map(|px| px[offset])
            .collect()
    }

    /// Writes a deinterleaved plane into one physical channel.
    ///
    /// Fails if `plane` does not hold exactly one sample per pixel; nothing
    /// is written in that case.
    pub fn write_plane(&mut self, channel: Channel, plane: &[u8]) -> Result<()> {
        let expected = self.pixel_count();
        if plane.len() != expected {
            return Err(Error::PlaneSizeMismatch {
                expected,
                got: plane.len(),
            });
        }
        let offset = channel.index();
        for (px, value) in self.data.chunks_exact_mut(CHANNEL_COUNT).zip(plane) {
            px[offset] = *value;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_validates_length() {
        let err = PixelBuffer::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSizeMismatch {
                expected: 16,
                got: 15
            }
        ));
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(PixelBuffer::from_rgba(0, 4, vec![]).is_err());
        assert!(PixelBuffer::filled(4, 0, 255).is_err());
    }

    #[test]
    fn test_filled_is_uniform() {
        let buf = PixelBuffer::filled(3, 2, 255).unwrap();
        assert_eq!(buf.dimensions(), (3, 2));
        assert!(buf.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_pixel_indexing_is_row_major() {
        // 2x2, pixel values encode position: component = y*2 + x
        let data = vec![
            0, 0, 0, 0, // (0,0)
            1, 1, 1, 1, // (1,0)
            2, 2, 2, 2, // (0,1)
            3, 3, 3, 3, // (1,1)
        ];
        let buf = PixelBuffer::from_rgba(2, 2, data).unwrap();
        assert_eq!(buf.pixel(0, 0), [0; 4]);
        assert_eq!(buf.pixel(1, 0), [1; 4]);
        assert_eq!(buf.pixel(0, 1), [2; 4]);
        assert_eq!(buf.pixel(1, 1), [3; 4]);
    }

    #[test]
    fn test_plane_roundtrip() {
        let data = vec![10, 20, 30, 40, 50, 60, 70, 80];
        let buf = PixelBuffer::from_rgba(2, 1, data).unwrap();
        assert_eq!(buf.plane(Channel::R), vec![10, 50]);
        assert_eq!(buf.plane(Channel::G), vec![20, 60]);
        assert_eq!(buf.plane(Channel::B), vec![30, 70]);
        assert_eq!(buf.plane(Channel::A), vec![40, 80]);

        let mut dst = PixelBuffer::filled(2, 1, 0).unwrap();
        dst.write_plane(Channel::B, &[9, 8]).unwrap();
        assert_eq!(dst.data(), &[0, 0, 9, 0, 0, 0, 8, 0]);
    }

    #[test]
    fn test_into_data_returns_raw_layout() {
        let data = vec![1, 2, 3, 4];
        let buf = PixelBuffer::from_rgba(1, 1, data.clone()).unwrap();
        assert_eq!(buf.into_data(), data);
    }

    #[test]
    fn test_write_plane_length_checked() {
        let mut buf = PixelBuffer::filled(2, 2, 0).unwrap();
        let err = buf.write_plane(Channel::R, &[1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::PlaneSizeMismatch {
                expected: 4,
                got: 3
            }
        ));
        // nothing written
        assert!(buf.data().iter().all(|&v| v == 0));
    }
}
