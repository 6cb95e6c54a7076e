//! Error types for the channel-mapping engine.
//!
//! Every validation failure the engine can produce is a variant of [`Error`].
//! All checks run before the first write to a destination buffer, so a
//! returned error guarantees the buffer was not touched.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by channel-specifier parsing and the mapping engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A destination specifier used a character outside `r g b a`.
    #[error("unknown destination channel '{ch}' (expected one of r, g, b, a)")]
    UnknownChannel {
        /// The offending character.
        ch: char,
    },

    /// A source specifier used a character that is neither a physical
    /// channel nor a pseudo-channel code.
    #[error("unknown source channel '{ch}' (expected r, g, b, a or pseudo-channel A, M, m)")]
    UnknownSourceChannel {
        /// The offending character.
        ch: char,
    },

    /// A destination specifier named the same channel twice.
    #[error("duplicate destination channel '{ch}' (destination channels must be unique)")]
    DuplicateChannel {
        /// The repeated channel letter.
        ch: char,
    },

    /// A specifier was empty.
    #[error("empty channel map")]
    EmptyMap,

    /// A specifier named more channels than an RGBA image has.
    #[error("channel map '{map}' is too long ({len} channels, maximum {max})")]
    MapTooLong {
        /// The specifier as written.
        map: String,
        /// Number of channels it named.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// The source/destination lengths match no mapping mode.
    ///
    /// Returned for combinations like 2 -> 3 where neither one-to-one,
    /// combine, nor broadcast applies.
    #[error("channel mapping {src} -> {dst} is ambiguous")]
    AmbiguousMapping {
        /// Source specifier as written.
        src: String,
        /// Destination specifier as written.
        dst: String,
    },

    /// Source and destination buffers have different spatial dimensions.
    #[error("dimension mismatch: source {src_width}x{src_height} vs destination {dst_width}x{dst_height}")]
    DimensionMismatch {
        /// Source width.
        src_width: u32,
        /// Source height.
        src_height: u32,
        /// Destination width.
        dst_width: u32,
        /// Destination height.
        dst_height: u32,
    },

    /// Width or height was zero when creating a buffer.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Why the dimensions are invalid.
        reason: String,
    },

    /// Raw data length does not match `width * height * 4`.
    #[error("buffer size mismatch: expected {expected} bytes, got {got}")]
    BufferSizeMismatch {
        /// Required byte count.
        expected: usize,
        /// Provided byte count.
        got: usize,
    },

    /// A plane's sample count does not match the buffer's pixel count.
    #[error("plane size mismatch: expected {expected} samples, got {got}")]
    PlaneSizeMismatch {
        /// Required sample count.
        expected: usize,
        /// Provided sample count.
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::DimensionMismatch`] from `(width, height)` pairs.
    #[inline]
    pub fn dimension_mismatch(src: (u32, u32), dst: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            src_width: src.0,
            src_height: src.1,
            dst_width: dst.0,
            dst_height: dst.1,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::AmbiguousMapping`] error.
    #[inline]
    pub fn ambiguous(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self::AmbiguousMapping {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Returns `true` if this error came from specifier parsing rather than
    /// buffer-shape validation.
    #[inline]
    pub fn is_spec_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownChannel { .. }
                | Self::UnknownSourceChannel { .. }
                | Self::DuplicateChannel { .. }
                | Self::EmptyMap
                | Self::MapTooLong { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_message_names_both_maps() {
        let err = Error::ambiguous("rg", "rgb");
        let msg = err.to_string();
        assert!(msg.contains("rg"));
        assert!(msg.contains("rgb"));
        assert!(msg.contains("ambiguous"));
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = Error::dimension_mismatch((640, 480), (512, 512));
        let msg = err.to_string();
        assert!(msg.contains("640x480"));
        assert!(msg.contains("512x512"));
    }

    #[test]
    fn test_spec_error_classification() {
        assert!(Error::UnknownChannel { ch: 'x' }.is_spec_error());
        assert!(Error::EmptyMap.is_spec_error());
        assert!(!Error::dimension_mismatch((1, 1), (2, 2)).is_spec_error());
    }
}
