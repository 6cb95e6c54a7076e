//! Script execution.
//!
//! [`run_script`] turns a script file into a finished destination buffer;
//! [`execute`] additionally writes it out as PNG. Directives run strictly
//! in file order because later lines may intentionally overwrite channels
//! written by earlier ones. Any failure aborts the run before output is
//! written.

use std::fs;
use std::path::{Path, PathBuf};

use chanpack_core::{PixelBuffer, Reducer, map_channels};
use tracing::{debug, info};

use crate::cache::ImageCache;
use crate::directive::Directive;
use crate::error::{ScriptError, ScriptResult};

/// Default fill for destination buffers: channels never targeted by a
/// directive stay opaque white.
const DEFAULT_FILL: u8 = 255;

/// The result of a successful script run.
#[derive(Debug)]
pub struct RunOutput {
    /// The packed destination buffer.
    pub buffer: PixelBuffer,
    /// Where [`execute`] would save it: `<script_stem>.png` in the
    /// script's directory.
    pub output_path: PathBuf,
}

/// Derives the output path for a script: same directory, same stem, `.png`.
fn output_path_for(script_path: &Path) -> PathBuf {
    let stem = script_path
        .file_stem()
        .unwrap_or_else(|| script_path.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".png");
    script_dir(script_path).join(name)
}

/// The directory source references are resolved against.
fn script_dir(script_path: &Path) -> &Path {
    match script_path.parent() {
        Some(parent) => parent,
        None => Path::new(""),
    }
}

/// Executes every directive of a script and returns the packed buffer.
///
/// Blank lines are skipped; every other line must parse into a directive.
/// The destination buffer is allocated when the first source image loads,
/// sized to that image and filled with 255. Later sources whose dimensions
/// differ are a hard error, surfaced with the offending line.
pub fn run_script(script_path: &Path) -> ScriptResult<RunOutput> {
    let text = fs::read_to_string(script_path).map_err(|source| ScriptError::Io {
        path: script_path.to_path_buf(),
        source,
    })?;
    let base_dir = script_dir(script_path);

    let mut cache = ImageCache::new();
    let mut dst: Option<PixelBuffer> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let directive = Directive::parse(raw, line)
            .map_err(|e| ScriptError::parse(script_path, line, e))?;
        let src = cache
            .get_or_load(&directive.source, base_dir)
            .map_err(|e| ScriptError::image_load(script_path, line, &directive.source, e))?;

        if dst.is_none() {
            let buffer = PixelBuffer::filled(src.width(), src.height(), DEFAULT_FILL)
                .map_err(|e| ScriptError::map(script_path, line, e))?;
            debug!(
                width = buffer.width(),
                height = buffer.height(),
                "allocated destination buffer"
            );
            dst = Some(buffer);
        }
        if let Some(buffer) = dst.as_mut() {
            map_channels(src, &directive.src, buffer, &directive.dest, Reducer::Mean)
                .map_err(|e| ScriptError::map(script_path, line, e))?;
            debug!(
                line,
                dest = directive.dest.as_str(),
                source = %directive.source,
                src = directive.src.as_str(),
                "applied directive"
            );
        }
    }

    let buffer = dst.ok_or_else(|| ScriptError::EmptyScript {
        path: script_path.to_path_buf(),
    })?;
    Ok(RunOutput {
        buffer,
        output_path: output_path_for(script_path),
    })
}

/// Runs a script and saves the result, returning the output path.
pub fn execute(script_path: &Path) -> ScriptResult<PathBuf> {
    let output = run_script(script_path)?;
    save_png(&output.output_path, &output.buffer)?;
    info!(path = %output.output_path.display(), "saved packed image");
    Ok(output.output_path)
}

/// Encodes a buffer as PNG at `path`.
fn save_png(path: &Path, buffer: &PixelBuffer) -> ScriptResult<()> {
    let (width, height) = buffer.dimensions();
    image::save_buffer(
        path,
        buffer.data(),
        width,
        height,
        image::ExtendedColorType::Rgba8,
    )
    .map_err(|source| ScriptError::Encode {
        path: path.to_path_buf(),
        source,
    })
}
