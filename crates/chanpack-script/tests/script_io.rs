//! End-to-end script runs against real files on disk.

use std::fs;
use std::path::Path;

use chanpack_core::Channel;
use chanpack_script::{ScriptError, execute, run_script};
use image::{Rgba, RgbaImage};

fn write_png(dir: &Path, name: &str, width: u32, height: u32, px: [u8; 4]) {
    RgbaImage::from_pixel(width, height, Rgba(px))
        .save(dir.join(name))
        .unwrap();
}

fn write_script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn packs_channels_from_two_sources() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "rough.png", 4, 3, [200, 0, 0, 255]);
    write_png(dir.path(), "metal.png", 4, 3, [0, 90, 0, 255]);

    let script = write_script(
        dir.path(),
        "packed.txt",
        "r = rough.png r\ng = metal.png g\n",
    );
    let output = execute(&script).unwrap();
    assert_eq!(output, dir.path().join("packed.png"));

    let result = image::open(&output).unwrap().to_rgba8();
    assert_eq!(result.dimensions(), (4, 3));
    // targeted channels carry source data, the rest stay at the 255 fill
    assert_eq!(result.get_pixel(0, 0).0, [200, 90, 255, 255]);
}

#[test]
fn pseudo_average_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "src.png", 2, 2, [10, 20, 30, 40]);

    let script = write_script(
        dir.path(),
        "avg.txt",
        "\nrgb = src.png AAA\n\n   \na = src.png M\n",
    );
    let output = execute(&script).unwrap();

    let result = image::open(&output).unwrap().to_rgba8();
    // mean(10,20,30,40) = 25, max = 40
    assert_eq!(result.get_pixel(1, 1).0, [25, 25, 25, 40]);
}

#[test]
fn later_directives_overwrite_earlier() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "src.png", 1, 1, [11, 22, 33, 44]);

    let script = write_script(
        dir.path(),
        "over.txt",
        "r = src.png g\nr = src.png b\n",
    );
    let output = run_script(&script).unwrap();
    assert_eq!(output.buffer.plane(Channel::R), vec![33]);
}

#[test]
fn relative_paths_resolve_against_script_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sources")).unwrap();
    write_png(&dir.path().join("sources"), "a.png", 1, 1, [5, 6, 7, 8]);

    let script = write_script(dir.path(), "nested.txt", "rgba = sources/a.png rgba\n");
    let output = run_script(&script).unwrap();
    assert_eq!(output.buffer.pixel(0, 0), [5, 6, 7, 8]);
}

#[test]
fn first_image_fixes_output_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "big.png", 4, 4, [1, 1, 1, 1]);
    write_png(dir.path(), "small.png", 2, 2, [2, 2, 2, 2]);

    let script = write_script(
        dir.path(),
        "mixed.txt",
        "r = big.png r\ng = small.png g\n",
    );
    let err = execute(&script).unwrap_err();
    match err {
        ScriptError::Map { line, source, .. } => {
            assert_eq!(line, 2);
            assert!(matches!(
                source,
                chanpack_core::Error::DimensionMismatch { .. }
            ));
        }
        other => panic!("expected dimension mismatch, got {other}"),
    }
    // no partial output
    assert!(!dir.path().join("mixed.png").exists());
}

#[test]
fn parse_error_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "src.png", 1, 1, [1, 2, 3, 4]);

    let script = write_script(
        dir.path(),
        "bad.txt",
        "r = src.png r\nthis is not a directive\n",
    );
    let err = execute(&script).unwrap_err();
    match err {
        ScriptError::Parse { line, .. } => assert_eq!(line, 2),
        other => panic!("expected parse error, got {other}"),
    }
    assert!(!dir.path().join("bad.png").exists());
}

#[test]
fn missing_source_reports_line_and_reference() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "gone.txt", "r = missing.png r\n");

    let err = execute(&script).unwrap_err();
    match &err {
        ScriptError::ImageLoad { line, reference, .. } => {
            assert_eq!(*line, 1);
            assert_eq!(reference, "missing.png");
        }
        other => panic!("expected image load error, got {other}"),
    }
    let msg = err.to_string();
    assert!(msg.contains("gone.txt:1:"));
    assert!(msg.contains("missing.png"));
}

#[test]
fn empty_script_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    for body in ["", "\n\n  \n"] {
        let script = write_script(dir.path(), "empty.txt", body);
        let err = execute(&script).unwrap_err();
        assert!(matches!(err, ScriptError::EmptyScript { .. }));
    }
    assert!(!dir.path().join("empty.png").exists());
}

#[test]
fn untouched_channels_default_to_white() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "src.png", 2, 1, [40, 50, 60, 70]);

    let script = write_script(dir.path(), "fill.txt", "b = src.png m\n");
    let output = run_script(&script).unwrap();

    assert_eq!(output.buffer.pixel(0, 0), [255, 255, 40, 255]);
}

#[test]
fn combine_broadcast_modes_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "src.png", 1, 1, [10, 200, 30, 255]);

    // many-to-one (mean of r and g), then one-to-many broadcast of blue
    let script = write_script(
        dir.path(),
        "modes.txt",
        "a = src.png rg\nrg = src.png b\n",
    );
    let output = run_script(&script).unwrap();
    // mean(10, 200) truncates to 105
    assert_eq!(output.buffer.pixel(0, 0), [30, 30, 255, 105]);
}
