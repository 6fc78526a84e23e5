//! Tests the kvs-extra binary end to end with assert_cmd, using the fixture
//! server for the commands that need a live store.

mod common;

use std::io::Write;
use std::process::Command;
use assert_cmd::prelude::*;
use common::TestServer;
use kvs_extra::Scalar;
use predicates::prelude::*;

fn kvs_extra() -> Command {
    Command::cargo_bin("kvs-extra").unwrap()
}

#[test]
fn version_flag_prints_the_version() {
    kvs_extra()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kvs-extra").from_utf8());
}

#[test]
fn bare_invocation_prints_help() {
    kvs_extra()
        .assert()
        .success()
        .stdout(predicate::str::contains("extended functionality").from_utf8());
}

#[test]
fn import_without_a_file_name_fails_with_code_200() {
    kvs_extra()
        .args(&["kv", "import"])
        .assert()
        .failure()
        .code(200)
        .stderr(predicate::str::contains("no file name specified").from_utf8());
}

#[test]
fn unreachable_server_fails_with_code_200() {
    kvs_extra()
        .args(&["kv", "export", "config", "--addr", "127.0.0.1:1"])
        .assert()
        .failure()
        .code(200);
}

#[test]
fn kv_export_prints_the_nested_document() {
    let server = TestServer::start(&[
        ("config/db/host", Scalar::String("localhost".to_string())),
        ("config/db/port", Scalar::String("5432".to_string())),
    ]);

    let expected = "{\n  \"config\": {\n    \"db\": {\n      \"host\": \"localhost\",\n      \"port\": \"5432\"\n    }\n  }\n}\n";

    kvs_extra()
        .args(&["kv", "export", "config", "--addr", &server.addr_arg()])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn kv_import_writes_keys_and_logs_each_one() {
    let server = TestServer::start(&[]);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{{\n  // imported by the test\n  a: {{ b: 1, c: 'two' }},\n}}").unwrap();

    kvs_extra()
        .args(&[
            "kv",
            "import",
            file.path().to_str().unwrap(),
            "--addr",
            &server.addr_arg(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Set key 'a/b' to '1'").from_utf8());

    let data = server.snapshot();
    assert_eq!(data.get("a/b"), Some(&Scalar::Number(1.into())));
    assert_eq!(data.get("a/c"), Some(&Scalar::String("two".to_string())));
}

#[test]
fn status_leader_prints_the_leader() {
    let server = TestServer::start(&[]);

    kvs_extra()
        .args(&["status", "leader", "--addr", &server.addr_arg()])
        .assert()
        .success()
        .stdout("node-1 127.0.0.1:8300\n");
}

#[test]
fn status_peers_prints_every_peer() {
    let server = TestServer::start(&[]);

    kvs_extra()
        .args(&["status", "peers", "--addr", &server.addr_arg()])
        .assert()
        .success()
        .stdout("node-1 127.0.0.1:8300\nnode-2 127.0.0.1:8301\n");
}
