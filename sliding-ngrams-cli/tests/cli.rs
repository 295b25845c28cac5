use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ngrams() -> Command {
    Command::cargo_bin("ngrams").unwrap()
}

#[test]
fn test_stdin_default_range() {
    ngrams()
        .write_stdin("foo bar baz quux")
        .assert()
        .success()
        .stdout("foo\nfoo bar\nbar\nfoo bar baz\nbar baz\nbaz\nbar baz quux\nbaz quux\nquux\n");
}

#[test]
fn test_input_file_exact_range() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, "foo bar\nbaz\tquux\n").unwrap();

    ngrams()
        .arg("-i")
        .arg(&path)
        .args(["-n", "3", "-m", "3"])
        .assert()
        .success()
        .stdout("foo bar baz\nbar baz quux\n");
}

#[test]
fn test_not_enough_words() {
    ngrams()
        .args(["-n", "3", "-m", "3"])
        .write_stdin("foo bar")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_exclude_prefix() {
    ngrams()
        .args(["-x", "b"])
        .write_stdin("foo bar foobar baz quux")
        .assert()
        .success()
        .stdout("foo\nfoo foobar\nfoobar\nfoo foobar quux\nfoobar quux\nquux\n");
}

#[test]
fn test_stopwords() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stopwords.txt");
    fs::write(&path, "the\nof and\n").unwrap();

    ngrams()
        .args(["-n", "2", "-m", "2", "-w"])
        .arg(&path)
        .write_stdin("the town of books and curry")
        .assert()
        .success()
        .stdout("town books\nbooks curry\n");
}

#[test]
fn test_count_top_k() {
    ngrams()
        .args(["-n", "1", "-m", "2", "-c", "-k", "2"])
        .write_stdin("a b a b a")
        .assert()
        .success()
        .stdout("3\ta\n2\ta b\n");
}

#[test]
fn test_top_k_requires_count() {
    ngrams()
        .args(["-k", "2"])
        .write_stdin("a b a b a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--count"));
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    ngrams()
        .arg("-i")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}

#[test]
fn test_too_large_max_n() {
    ngrams()
        .args(["-m", "1000000"])
        .write_stdin("foo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_n must not exceed"));
}
