//! Integration tests for the cmd-doc binary.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn cmd_doc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cmd-doc"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_parse_file_renders_markdown() {
    let output = Command::new(cmd_doc_bin())
        .args(["parse-file", "--input"])
        .arg(fixture("cmd-doc-help.txt"))
        .output()
        .expect("failed to run cmd-doc");

    assert!(
        output.status.success(),
        "parse-file failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# cmd-doc\n"));
    assert!(stdout.contains("> generates markdown from commands\n"));
    assert!(stdout.contains("> version: v0.0.0\n"));
    assert!(stdout.contains("```\nNAME:\n"));
}

#[test]
fn test_parse_file_missing_input_fails() {
    let output = Command::new(cmd_doc_bin())
        .args(["parse-file", "--input", "no-such-fixture.txt"])
        .output()
        .expect("failed to run cmd-doc");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr was: {stderr}");
}

#[test]
fn test_parse_stdin_with_header_and_footer() {
    use std::io::Write;

    let mut child = Command::new(cmd_doc_bin())
        .args(["parse-stdin", "--header", "<!-- generated -->\n", "--footer", "\n<!-- end -->"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn cmd-doc");

    child
        .stdin
        .take()
        .expect("stdin not piped")
        .write_all(b"NAME:\n   app - demo\n")
        .expect("failed to write stdin");

    let output = child.wait_with_output().expect("failed to wait for cmd-doc");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<!-- generated -->\n# app\n"));
    assert!(stdout.ends_with("\n<!-- end -->"));
}

#[cfg(unix)]
mod generate {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Writes a fake urfave-style target with one nested sub-command.
    fn write_demo_script(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("demo");
        let script = r#"#!/bin/sh
if [ "$1" = "run" ]; then
    printf 'NAME:\n   run - executes the thing\n'
else
    printf 'NAME:\n   demo - demo program\n\nVERSION:\n   1.0.0\n\nCOMMANDS:\n   run\truns it\n   help\tshow help\n'
fi
"#;
        fs::write(&path, script).expect("failed to write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to chmod script");
        path
    }

    #[test]
    fn test_generate_builds_nested_document() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_demo_script(dir.path());

        let output = Command::new(cmd_doc_bin())
            .args(["generate", "--timeout-secs", "10"])
            .arg(&script)
            .output()
            .expect("failed to run cmd-doc");

        assert!(
            output.status.success(),
            "generate failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8_lossy(&output.stdout);
        let root = stdout.find("# demo\n").expect("missing root heading");
        let child = stdout.find("## run\n").expect("missing child heading");
        assert!(root < child);
        assert!(stdout.contains("> demo program\n"));
        assert!(stdout.contains("> version: 1.0.0\n"));
        assert!(stdout.contains("> name: run\n"));
    }

    #[test]
    fn test_generate_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_demo_script(dir.path());
        let out_path = dir.path().join("doc.md");

        let output = Command::new(cmd_doc_bin())
            .args(["generate", "--header", "HEAD\n", "--footer", "FOOT\n", "--output"])
            .arg(&out_path)
            .arg(&script)
            .output()
            .expect("failed to run cmd-doc");

        assert!(output.status.success());
        assert!(output.stdout.is_empty());

        let document = fs::read_to_string(&out_path).expect("output file missing");
        assert!(document.starts_with("HEAD\n# demo\n"));
        assert!(document.ends_with("FOOT\n"));
    }

    #[test]
    fn test_generate_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken");
        // The sub-command probe exits non-zero, so the build must abort.
        let script = r#"#!/bin/sh
if [ "$1" = "run" ]; then
    echo 'run is not a valid command' 1>&2
    exit 2
fi
printf 'NAME:\n   broken - fails on recursion\n\nCOMMANDS:\n   run\truns it\n'
"#;
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let out_path = dir.path().join("doc.md");
        let output = Command::new(cmd_doc_bin())
            .args(["generate", "--output"])
            .arg(&out_path)
            .arg(&path)
            .output()
            .expect("failed to run cmd-doc");

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("error:"), "stderr was: {stderr}");
        assert!(stderr.contains("run, --help"), "stderr was: {stderr}");
        assert!(!out_path.exists(), "no output may be written on failure");
    }

    #[test]
    fn test_generate_missing_binary_fails() {
        let output = Command::new(cmd_doc_bin())
            .args(["generate", "cmd-doc-test-no-such-binary"])
            .output()
            .expect("failed to run cmd-doc");

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("cmd-doc-test-no-such-binary, --help"),
            "stderr was: {stderr}"
        );
    }
}
