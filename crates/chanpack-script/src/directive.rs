//! Directive parsing.
//!
//! One script line, one [`Directive`]. The line format is
//!
//! ```text
//! DDDD = path SSSS
//! ```
//!
//! four whitespace-separated fields: a destination specifier, a literal
//! equals sign, a source image reference, and a source specifier. Extra
//! fields beyond the fourth are ignored, which leaves room for trailing
//! notes. Specifier validation happens here, at parse time, so a directive
//! that reaches the runner is already well-formed.

use chanpack_core::{DestMap, SourceMap};
use thiserror::Error;

/// Why a line failed to parse.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The line did not split into four fields with a literal `=` second.
    #[error("expected format `cccc = filename cccc`")]
    Shape,

    /// A specifier field was invalid.
    #[error(transparent)]
    Spec(#[from] chanpack_core::Error),
}

/// One parsed mapping instruction.
#[derive(Debug, Clone)]
pub struct Directive {
    /// Destination channels to write.
    pub dest: DestMap,
    /// Source image reference, exactly as written (also the cache key).
    pub source: String,
    /// Source channels to read.
    pub src: SourceMap,
    /// 1-based script line this directive came from.
    pub line: usize,
}

impl Directive {
    /// Parses one non-empty script line.
    pub fn parse(text: &str, line: usize) -> Result<Self, ParseError> {
        let mut fields = text.split_whitespace();
        let (Some(dest), Some(eq), Some(source), Some(src)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseError::Shape);
        };
        if eq != "=" {
            return Err(ParseError::Shape);
        }
        Ok(Self {
            dest: dest.parse()?,
            source: source.to_string(),
            src: src.parse()?,
            line,
        })
    }
}
