//! End-to-end checks of the `sview` binary against the fixture corpus.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn fixture_corpus() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scripts.json")
}

/// Run sview with an isolated config and the given stdin.
fn sview(args: &[&str], stdin: &str) -> Output {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, r#"{"schema_version": 1}"#).expect("write config");

    let mut child = Command::new(env!("CARGO_BIN_EXE_sview"))
        .arg("--config")
        .arg(&config_path)
        .arg("--corpus")
        .arg(fixture_corpus())
        .args(args)
        .env_remove("SVIEW_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn sview");
    if let Some(mut pipe) = child.stdin.take() {
        // The child may exit without reading; a broken pipe is fine here.
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().expect("wait for sview")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn named_lists_non_blank_matches() {
    let output = sview(&["named", "Scene_"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Scene_Base\nScene_Map\n");

    let output = sview(&["named", "Insert"], "");
    assert_eq!(stdout(&output), "(no matches)\n");
}

#[test]
fn named_accepts_a_pattern() {
    let output = sview(&["named", "--regex", "^(Main|Vocab)$"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Vocab\nMain\n");
}

#[test]
fn defining_matches_class_and_module() {
    let output = sview(&["defining", "Scene_"], "");
    assert_eq!(stdout(&output), "Scene_Base\nScene_Map\n");

    let output = sview(&["defining", "Game::Vocab"], "");
    assert_eq!(stdout(&output), "Vocab\n");
}

#[test]
fn line_prints_a_single_line() {
    let output = sview(&["line", "Scene_Base", "7", "--surround", "0"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "  def self.snapshot\n");
}

#[test]
fn browse_pages_until_the_end() {
    let output = sview(&["--lines-per-page", "4", "browse", "Scene_Base"], "\n\n");
    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.matches(": ").count(), 2, "{text}");
    assert!(text.starts_with("class Scene_Base\n"));
    assert!(text.ends_with("  end\nend\n"));
}

#[test]
fn browse_stops_on_quit() {
    let output = sview(&["--lines-per-page", "4", "browse", "Scene_Base"], "q\n");
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(!text.contains("terminate"), "{text}");
}

#[test]
fn find_starts_at_the_method() {
    let output = sview(&["find", "Scene_Base.snapshot"], "");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "  def self.snapshot\n    Graphics.snap_to_bitmap\n  end\nend\n"
    );
}

#[test]
fn unknown_script_fails() {
    let output = sview(&["browse", "Window_Base"], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no script named like \"Window_Base\""), "{stderr}");
}

#[test]
fn unresolved_signature_fails() {
    let output = sview(&["find", "Scene_Map#terminate"], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot resolve"), "{stderr}");
}

#[test]
fn shell_runs_operations() {
    let output = sview(&["shell"], "named Scene_\nline Main 0 0\nbrowse Nope\nquit\n");
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Scene_Base\nScene_Map\n"), "{text}");
    assert!(text.contains("rgss_main { SceneManager.run }\n"), "{text}");
    assert!(text.contains("no script named like \"Nope\""), "{text}");
}

#[test]
fn shell_survives_a_bad_pattern() {
    let output = sview(&["shell"], "named --regex (\nnamed Main\nquit\n");
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("invalid pattern"), "{text}");
    assert!(text.contains("Main\n"), "{text}");
}
