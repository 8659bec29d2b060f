use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
  <path d="M8 8 h16 v16 h-16 z"/>
</svg>
"#;

const NO_PATHS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="4"/></svg>"#;

const NO_ROOT: &str = r#"<html><path d="M0 0 L1 1"/></html>"#;

fn svgfit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_svgfit"))
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn run(args: &[&str]) -> Output {
    svgfit().args(args).output().expect("run svgfit")
}

#[test]
fn cli_updates_file_in_place() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let file = write(tmp.path(), "square.svg", SQUARE);

    let out = run(&[file.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(
        text(&out.stdout),
        format!("[updated] {} → viewBox 8 8 16 16\n", file.display())
    );

    let written = fs::read_to_string(&file).unwrap();
    assert!(written.contains(r#"viewBox="8 8 16 16" width="16" height="16""#));
    assert!(written.contains(r#"<path d="M8 8 h16 v16 h-16 z"/>"#));
}

#[test]
fn cli_padding_and_precision() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let file = write(tmp.path(), "square.svg", SQUARE);

    let out = run(&["-p", "-0.333", "--precision", "1", file.to_str().unwrap()]);
    assert!(out.status.success(), "{}", text(&out.stderr));
    assert!(text(&out.stdout).ends_with("→ viewBox 8.3 8.3 15.3 15.3\n"));
}

#[test]
fn cli_dry_run_leaves_file_untouched() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let file = write(tmp.path(), "square.svg", SQUARE);

    let out = run(&["--dry-run", "--padding", "2", file.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(
        text(&out.stdout),
        format!("[dry-run] {} → viewBox 6 6 20 20\n", file.display())
    );
    assert_eq!(fs::read_to_string(&file).unwrap(), SQUARE);

    let out = run(&["--padding", "2", file.to_str().unwrap()]);
    assert!(text(&out.stdout).ends_with("→ viewBox 6 6 20 20\n"));
}

#[test]
fn cli_skips_and_continues() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let no_root = write(tmp.path(), "no-root.svg", NO_ROOT);
    let no_paths = write(tmp.path(), "no-paths.svg", NO_PATHS);
    let square = write(tmp.path(), "square.svg", SQUARE);

    let out = run(&[
        no_root.to_str().unwrap(),
        no_paths.to_str().unwrap(),
        square.to_str().unwrap(),
    ]);
    assert!(out.status.success());

    let stderr = text(&out.stderr);
    assert!(stderr.contains(&format!(
        "Skipping {}: <svg> root not found",
        no_root.display()
    )));
    assert!(stderr.contains(&format!(
        "Skipping {}: no <path> elements with calculable bounds",
        no_paths.display()
    )));

    assert_eq!(fs::read_to_string(&no_root).unwrap(), NO_ROOT);
    assert_eq!(fs::read_to_string(&no_paths).unwrap(), NO_PATHS);

    let stdout = text(&out.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("[updated]"));
}

#[test]
fn cli_warns_about_bad_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let file = write(
        tmp.path(),
        "mixed.svg",
        r#"<svg><path d="M0 0 L4 4"/><path d="M0 0 L"/></svg>"#,
    );

    let out = run(&[file.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(text(&out.stderr).contains(&format!(
        "Unable to compute bounds for a path in {}:",
        file.display()
    )));
    assert!(text(&out.stdout).ends_with("→ viewBox 0 0 4 4\n"));
}

#[test]
fn cli_target_starting_with_dash() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dashed = write(tmp.path(), "-logo.svg", SQUARE);
    let square = write(tmp.path(), "square.svg", SQUARE);

    let out = svgfit()
        .current_dir(tmp.path())
        .args(["-logo.svg", "--precision", "1", "square.svg"])
        .output()
        .expect("run svgfit");
    assert!(out.status.success(), "{}", text(&out.stderr));
    assert_eq!(
        text(&out.stdout),
        "[updated] -logo.svg → viewBox 8 8 16 16\n[updated] square.svg → viewBox 8 8 16 16\n"
    );
    assert!(fs::read_to_string(&dashed).unwrap().contains(r#"viewBox="8 8 16 16""#));
    assert!(fs::read_to_string(&square).unwrap().contains(r#"viewBox="8 8 16 16""#));
}

#[test]
fn cli_unknown_option_is_a_missing_target() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let square = write(tmp.path(), "square.svg", SQUARE);

    let out = svgfit()
        .current_dir(tmp.path())
        .args(["--bogus", "square.svg"])
        .output()
        .expect("run svgfit");
    assert!(!out.status.success());
    assert!(text(&out.stderr).contains("--bogus"));
    assert_eq!(fs::read_to_string(&square).unwrap(), SQUARE);
}

#[test]
fn cli_help_exits_zero() {
    svgfit().arg("--help").assert().success();
    svgfit().arg("-h").assert().success();
}

#[test]
fn cli_usage_errors() {
    svgfit().assert().failure();
    svgfit().arg("--dry-run").assert().failure();
    svgfit().args(["--padding", "wide", "a.svg"]).assert().failure();
    svgfit().args(["--padding", "NaN", "a.svg"]).assert().failure();
    svgfit().args(["--precision", "-1", "a.svg"]).assert().failure();
    svgfit().args(["a.svg", "--precision"]).assert().failure();
}

#[test]
fn cli_usage_error_touches_nothing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let file = write(tmp.path(), "square.svg", SQUARE);

    svgfit()
        .args([file.to_str().unwrap(), "--precision", "x"])
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&file).unwrap(), SQUARE);
}

#[test]
fn cli_missing_file_is_fatal() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let missing = tmp.path().join("missing.svg");
    let square = write(tmp.path(), "square.svg", SQUARE);

    svgfit()
        .args([missing.to_str().unwrap(), square.to_str().unwrap()])
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&square).unwrap(), SQUARE);
}
