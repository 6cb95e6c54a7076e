//! Error types for script loading and execution.
//!
//! Every failure tied to a script line carries the script path and 1-based
//! line number, so diagnostics read `pack.txt:3: ...`. All errors abort the
//! run; no output is written on failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::directive::ParseError;

/// Result type alias using [`ScriptError`] as the error type.
pub type ScriptResult<T> = std::result::Result<T, ScriptError>;

/// A failure while loading one source image into the cache.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or decoded.
    #[error(transparent)]
    Decode(#[from] image::ImageError),

    /// The decoded image could not back a pixel buffer (zero-sized image).
    #[error(transparent)]
    Buffer(#[from] chanpack_core::Error),
}

/// Errors produced while executing a packing script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file itself could not be read.
    #[error("failed to read script {}: {source}", path.display())]
    Io {
        /// Script path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line did not parse into a valid directive.
    #[error("{}:{line}: {source}", path.display())]
    Parse {
        /// Script path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        #[source]
        source: ParseError,
    },

    /// A referenced source image failed to load.
    #[error("{}:{line}: failed to open file {reference}: {source}", path.display())]
    ImageLoad {
        /// Script path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The source reference as written in the script.
        reference: String,
        /// Underlying load failure.
        #[source]
        source: LoadError,
    },

    /// A directive was rejected by the mapping engine.
    #[error("{}:{line}: {source}", path.display())]
    Map {
        /// Script path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The engine error.
        #[source]
        source: chanpack_core::Error,
    },

    /// The script contained no directives, so there is no buffer to save.
    #[error("{}: script must contain at least one directive", path.display())]
    EmptyScript {
        /// Script path.
        path: PathBuf,
    },

    /// The finished buffer could not be encoded or written.
    #[error("failed to write output {}: {source}", path.display())]
    Encode {
        /// Output path.
        path: PathBuf,
        /// Underlying encode failure.
        #[source]
        source: image::ImageError,
    },
}

impl ScriptError {
    pub(crate) fn parse(path: &std::path::Path, line: usize, source: ParseError) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            line,
            source,
        }
    }

    pub(crate) fn image_load(
        path: &std::path::Path,
        line: usize,
        reference: &str,
        source: LoadError,
    ) -> Self {
        Self::ImageLoad {
            path: path.to_path_buf(),
            line,
            reference: reference.to_string(),
            source,
        }
    }

    pub(crate) fn map(path: &std::path::Path, line: usize, source: chanpack_core::Error) -> Self {
        Self::Map {
            path: path.to_path_buf(),
            line,
            source,
        }
    }
}
