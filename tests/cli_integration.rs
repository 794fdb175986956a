//! Integration tests for the `iml` binary.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn iml_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_iml"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("iml-cli-test").join(name);
    // Clean up from previous runs
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn render_prints_expected_html() {
    let output = Command::new(iml_bin())
        .args(["render", fixture("page.haml").to_str().unwrap()])
        .output()
        .expect("failed to run iml render");

    assert!(output.status.success(), "iml render should succeed");
    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected = fs::read_to_string(fixture("page.html")).unwrap();
    assert_eq!(stdout.trim_end(), expected.trim_end());
}

#[test]
fn render_reads_stdin_and_honours_mode() {
    let mut child = Command::new(iml_bin())
        .args(["render", "-", "--mode", "html5"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn iml render");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"%img{src: \"a.png\"}\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "<img src=\"a.png\">\n");
}

#[test]
fn render_writes_out_file() {
    let dir = temp_dir("render-out");
    let out = dir.join("page.html");
    let status = Command::new(iml_bin())
        .args([
            "render",
            fixture("irregular.haml").to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run iml render");

    assert!(status.success());
    let written = fs::read_to_string(&out).unwrap();
    let expected = fs::read_to_string(fixture("irregular.html")).unwrap();
    assert_eq!(written, expected);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn check_reports_warnings_with_codes() {
    let dir = temp_dir("check");
    let src = dir.join("bad.haml");
    fs::write(&src, "%div\n  %br text\n  %p{title: x\n").unwrap();

    let output = Command::new(iml_bin())
        .args(["check", src.to_str().unwrap()])
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run iml check");

    // Warnings alone do not fail the check.
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[W002]"), "missing W002 in {stdout}");
    assert!(stdout.contains("[W001]"), "missing W001 in {stdout}");
    assert!(stdout.contains("bad.haml:2"), "missing line number in {stdout}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn check_clean_file_is_ok() {
    let output = Command::new(iml_bin())
        .args(["check", fixture("irregular.haml").to_str().unwrap()])
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run iml check");

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("OK"));
}

#[test]
fn parse_emits_json_lines() {
    let dir = temp_dir("parse");
    let src = dir.join("one.haml");
    fs::write(&src, "%a#x.y{href: \"/\"} Home\nplain\n").unwrap();

    let output = Command::new(iml_bin())
        .args(["parse", src.to_str().unwrap()])
        .output()
        .expect("failed to run iml parse");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["line"], 1);
    assert_eq!(record["spec"]["tag_name"], "a");
    assert_eq!(record["spec"]["id"], "x");
    assert_eq!(record["spec"]["attributes"]["href"], "/");
    assert_eq!(record["spec"]["inline_content"], "Home");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn build_mirrors_source_tree() {
    let src = temp_dir("build-src");
    let out = temp_dir("build-out");
    fs::create_dir_all(src.join("blog")).unwrap();
    fs::write(src.join("index.haml"), "%h1 Home\n").unwrap();
    fs::write(src.join("blog/post.haml"), "%article\n  %p Post\n").unwrap();
    fs::write(src.join("readme.txt"), "not a source").unwrap();

    let status = Command::new(iml_bin())
        .args([
            "build",
            src.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--quiet",
        ])
        .status()
        .expect("failed to run iml build");

    assert!(status.success(), "iml build should succeed");
    assert_eq!(fs::read_to_string(out.join("index.html")).unwrap(), "<h1>Home</h1>\n");
    assert_eq!(
        fs::read_to_string(out.join("blog/post.html")).unwrap(),
        "<article>\n  <p>Post</p>\n</article>\n"
    );
    assert!(!out.join("readme.html").exists());

    let _ = fs::remove_dir_all(&src);
    let _ = fs::remove_dir_all(&out);
}
