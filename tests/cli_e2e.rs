//! End-to-end CLI tests for the flibusta binary.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use support::feeds::{author_entry, books_page, feed};
use support::socket_guard::start_mock_server_or_skip;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn flibusta() -> Command {
    let mut cmd = Command::cargo_bin("flibusta").unwrap();
    cmd.env_remove("RUST_LOG").write_stdin("");
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    flibusta()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search for books and authors"))
        .stdout(predicate::str::contains("author-books"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    flibusta()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flibusta"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    flibusta()
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Without a subcommand and without a terminal the binary prints a hint.
#[test]
fn test_binary_without_command_prints_usage_hint() {
    flibusta()
        .assert()
        .success()
        .stdout(predicate::str::contains("flibusta search <QUERY>"));
}

#[test]
fn test_binary_rejects_invalid_base_url() {
    flibusta()
        .args(["--base-url", "not a url", "search", "war"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--base-url"));
}

#[test]
fn test_binary_search_requires_query() {
    flibusta()
        .arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("QUERY"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_search_json_output() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/opds/search"))
        .and(query_param("searchType", "books"))
        .respond_with(ResponseTemplate::new(200).set_body_string(books_page(1, 2, None)))
        .mount(&server)
        .await;

    let output = flibusta()
        .args(["--base-url", &server.uri(), "--json", "search", "war"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let books: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(books.as_array().unwrap().len(), 2);
    assert_eq!(books[1]["title"], "Book 2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_search_table_output() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/opds/search"))
        .and(query_param("searchType", "authors"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed(
            &[author_entry(2312, "Bulgakov Mikhail", "57")],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/opds/search"))
        .and(query_param("searchType", "books"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[], None)))
        .mount(&server)
        .await;

    flibusta()
        .args(["--base-url", &server.uri(), "search", "bulgakov", "--authors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found Authors (1)"))
        .stdout(predicate::str::contains("Bulgakov Mikhail"))
        .stdout(predicate::str::contains("No books found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_parse_error_exits_non_zero() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed(
            &[author_entry(1, "Broken", "abc")],
            None,
        )))
        .mount(&server)
        .await;

    flibusta()
        .args(["--base-url", &server.uri(), "search", "x", "--authors", "--no-books"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("abc"));
}
