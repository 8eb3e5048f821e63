use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn openapi_prints_book_paths() {
    Command::cargo_bin("bookshelf-cli")
        .unwrap()
        .arg("openapi")
        .assert()
        .success()
        .stdout(predicate::str::contains("/api/books/{id}"))
        .stdout(predicate::str::contains("\"BookDraft\""));
}

#[test]
fn missing_subcommand_fails() {
    Command::cargo_bin("bookshelf-cli")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
