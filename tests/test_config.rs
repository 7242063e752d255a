use std::path::PathBuf;

use clap::Parser;
use street_shooter::config::*;
use street_shooter::GameError;

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["street_shooter"];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
}

#[test]
fn canvas_follows_terminal_size() {
    let c = Config::resolve(args(&["--data-dir", "/tmp/ss"]), 120, 41).unwrap();
    assert_eq!(c.canvas_width, 1200.0);
    assert_eq!(c.canvas_height, 800.0); // HUD row excluded
}

#[test]
fn defaults() {
    let c = Config::resolve(args(&["--data-dir", "/tmp/ss"]), 80, 25).unwrap();
    assert_eq!(c.fps, 60);
    assert_eq!(c.frame_ms(), 16);
    assert_eq!(c.seed, None);
    assert!(!c.mute);
    assert_eq!(c.assets_dir, PathBuf::from("assets"));
}

#[test]
fn paths_derive_from_data_dir() {
    let c = Config::resolve(args(&["--data-dir", "/tmp/ss"]), 80, 25).unwrap();
    assert_eq!(c.storage_path(), PathBuf::from("/tmp/ss/local_storage.json"));
    assert_eq!(c.log_file, PathBuf::from("/tmp/ss/street_shooter.log"));
}

#[test]
fn explicit_options_win() {
    let c = Config::resolve(
        args(&[
            "--fps",
            "30",
            "--seed",
            "9",
            "--mute",
            "--log-file",
            "/tmp/game.log",
            "--canvas-width",
            "640",
            "--canvas-height",
            "480",
        ]),
        200,
        60,
    )
    .unwrap();
    assert_eq!(c.fps, 30);
    assert_eq!(c.frame_ms(), 33);
    assert_eq!(c.seed, Some(9));
    assert!(c.mute);
    assert_eq!(c.log_file, PathBuf::from("/tmp/game.log"));
    assert_eq!((c.canvas_width, c.canvas_height), (640.0, 480.0));
}

#[test]
fn zero_fps_is_rejected() {
    let err = Config::resolve(args(&["--fps", "0"]), 80, 25).unwrap_err();
    assert!(matches!(err, GameError::Config(_)));
}

#[test]
fn empty_canvas_is_rejected() {
    let err = Config::resolve(args(&[]), 0, 0).unwrap_err();
    assert!(matches!(err, GameError::Config(_)));
}

#[test]
fn non_finite_canvas_is_rejected() {
    for (flag, value) in [
        ("--canvas-width", "inf"),
        ("--canvas-width", "NaN"),
        ("--canvas-height", "inf"),
        ("--canvas-height", "NaN"),
    ] {
        let err = Config::resolve(args(&[flag, value]), 80, 25).unwrap_err();
        assert!(matches!(err, GameError::Config(_)), "{} {}", flag, value);
    }
}
