use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn render_reads_stdin_and_writes_an_svg_document_to_stdout() {
    let exe = assert_cmd::cargo_bin!("glyphgraph-cli");
    let assert = Command::new(exe)
        .args(["render"])
        .write_stdin("flowchart LR\n  A[Start] --> B[End]\n")
        .assert()
        .success();

    let output = assert.get_output();
    let svg = String::from_utf8_lossy(&output.stdout);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">Start</text>"));
    assert!(svg.contains(">End</text>"));
}

#[test]
fn render_writes_to_the_path_given_by_out() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("diagram.svg");

    let exe = assert_cmd::cargo_bin!("glyphgraph-cli");
    Command::new(exe)
        .args(["render", "--out", out.to_string_lossy().as_ref()])
        .write_stdin("flowchart LR\n  A --> B\n")
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read output svg");
    assert!(svg.starts_with("<svg"));
}

#[test]
fn render_reads_a_source_file_given_by_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("diagram.mmd");
    fs::write(&input, "flowchart LR\n  A[Start] --> B[End]\n").expect("write fixture");

    let exe = assert_cmd::cargo_bin!("glyphgraph-cli");
    let assert = Command::new(exe)
        .args(["render", input.to_string_lossy().as_ref()])
        .assert()
        .success();

    let svg = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(svg.contains(">Start</text>"));
}

#[test]
fn render_applies_a_named_theme() {
    let exe = assert_cmd::cargo_bin!("glyphgraph-cli");
    let assert = Command::new(exe)
        .args(["render", "--theme", "dracula"])
        .write_stdin("flowchart LR\n  A --> B\n")
        .assert()
        .success();

    let svg = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(svg.contains("--bg:#282a36"));
}

#[test]
fn render_rejects_an_unknown_theme() {
    let exe = assert_cmd::cargo_bin!("glyphgraph-cli");
    Command::new(exe)
        .args(["render", "--theme", "not-a-real-theme"])
        .write_stdin("flowchart LR\n  A --> B\n")
        .assert()
        .failure();
}

#[test]
fn ascii_renders_a_plain_text_diagram_with_no_diagonal_glyphs() {
    let exe = assert_cmd::cargo_bin!("glyphgraph-cli");
    let assert = Command::new(exe)
        .args(["ascii", "--ascii"])
        .write_stdin("flowchart LR\n  A[Start] --> B[End]\n")
        .assert()
        .success();

    let text = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(text.contains("Start"));
    assert!(!text.contains('/'));
    assert!(!text.contains('\\'));
}

#[test]
fn unrecognised_flag_exits_with_usage() {
    let exe = assert_cmd::cargo_bin!("glyphgraph-cli");
    Command::new(exe)
        .args(["--not-a-flag"])
        .assert()
        .code(2);
}
