//! # chanpack-script
//!
//! Script loading and execution for chanpack.
//!
//! A packing script is a plain-text file with one mapping directive per
//! line:
//!
//! ```text
//! r    = roughness.png   r
//! g    = metallic.png    A
//! ba   = masks.png       rg
//! ```
//!
//! Each directive writes channels of a source image into channels of one
//! shared destination buffer, in file order; later lines may overwrite
//! channels written by earlier ones. Source paths are resolved relative to
//! the script's directory and each distinct path is decoded once. The
//! finished buffer is saved as `<script_stem>.png` next to the script.
//!
//! The mapping semantics live in [`chanpack_core`]; this crate is the I/O
//! glue: [`directive`] parses lines, [`cache`] loads and normalizes source
//! images, [`runner`] drives a whole run.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cache;
pub mod directive;
mod error;
pub mod runner;

pub use cache::ImageCache;
pub use directive::Directive;
pub use error::{LoadError, ScriptError, ScriptResult};
pub use runner::{RunOutput, execute, run_script};
