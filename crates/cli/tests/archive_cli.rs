use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn promptmap() -> Command {
    Command::cargo_bin("promptmap").expect("binary")
}

#[test]
fn create_jsonl_strips_basedir_and_warns_on_outsiders() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("a")).unwrap();
    fs::write(root.join("a/b.txt"), "inside").unwrap();
    fs::write(root.join("c.txt"), "outside").unwrap();

    let output = promptmap()
        .current_dir(root)
        .args(["archive", "--create", "--basedir", "a/", "a/b.txt", "c.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("c.txt does not have prefix a/"))
        .get_output()
        .stdout
        .clone();

    let lines: Vec<&str> = std::str::from_utf8(&output).unwrap().trim().lines().collect();
    assert_eq!(lines.len(), 1);
    let entry: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(entry["path"], "b.txt");
    assert_eq!(entry["content"], "inside");
}

#[test]
fn create_then_extract_round_trips_through_stdin() {
    let src = tempdir().unwrap();
    fs::create_dir_all(src.path().join("sub")).unwrap();
    fs::write(src.path().join("one.txt"), "first file").unwrap();
    fs::write(src.path().join("sub/two.txt"), "second file").unwrap();

    let archive = promptmap()
        .current_dir(src.path())
        .args(["archive", "--create", "one.txt", "sub/two.txt"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let dst = tempdir().unwrap();
    promptmap()
        .current_dir(dst.path())
        .args(["archive", "--extract"])
        .write_stdin(archive)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dst.path().join("one.txt")).unwrap(),
        "first file"
    );
    assert_eq!(
        fs::read_to_string(dst.path().join("sub/two.txt")).unwrap(),
        "second file"
    );
}

#[test]
fn extract_with_basename_resolves_collisions_last_wins() {
    let temp = tempdir().unwrap();
    let archive = "{\"path\":\"x/f.txt\",\"content\":\"1\"}\n{\"path\":\"y/f.txt\",\"content\":\"2\"}\n";

    promptmap()
        .current_dir(temp.path())
        .args(["archive", "--extract", "--basename"])
        .write_stdin(archive)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(temp.path().join("f.txt")).unwrap(), "2");
    assert!(!temp.path().join("x").exists());
}

#[test]
fn extract_with_basedir_writes_under_it() {
    let temp = tempdir().unwrap();
    let archive = "{\"path\":\"sub/f.txt\",\"content\":\"body\"}\n";

    promptmap()
        .current_dir(temp.path())
        .args(["archive", "--extract", "--basedir", "out"])
        .write_stdin(archive)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/sub/f.txt")).unwrap(),
        "body"
    );
}

#[test]
fn extract_fails_on_malformed_archive() {
    let temp = tempdir().unwrap();
    promptmap()
        .current_dir(temp.path())
        .args(["archive", "--extract"])
        .write_stdin("this is not jsonl\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed jsonl input"));
}

#[test]
fn create_and_extract_flags_conflict() {
    promptmap()
        .args(["archive", "--create", "--extract"])
        .assert()
        .failure();
}

#[test]
fn unknown_format_is_rejected() {
    promptmap()
        .args(["archive", "--create", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown archive format"));
}

#[test]
fn xml_create_escapes_markup() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("page.html"), "<em>I am cool</em>").unwrap();

    promptmap()
        .current_dir(temp.path())
        .args(["archive", "--create", "--format", "xml", "page.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("&lt;em&gt;I am cool&lt;/em&gt;"))
        .stdout(predicate::str::contains("<page_html>"));
}

#[test]
fn create_with_no_files_yields_empty_archive() {
    promptmap()
        .args(["archive", "--create", "--format", "json"])
        .assert()
        .success()
        .stdout("{}\n");
}
