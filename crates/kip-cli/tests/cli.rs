use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn kip() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("kip"));
    cmd.env_remove("KIP_FAMILY")
        .env_remove("KIP_PRETTY")
        .env_remove("KIP_MAX_LINE_BYTES");
    cmd
}

#[test]
fn help_mentions_commands_and_flags() {
    let output = std::process::Command::new(assert_cmd::cargo::cargo_bin!("kip"))
        .arg("--help")
        .output()
        .expect("run help");
    assert!(output.status.success(), "--help should succeed");
    let text = String::from_utf8_lossy(&output.stdout);
    for needle in ["catalog", "decode", "samples", "--family", "--pretty", "--json"] {
        assert!(text.contains(needle), "help output should contain '{needle}'");
    }
}

#[test]
fn catalog_lists_both_families() {
    kip()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("command\tSubmitCode"))
        .stdout(predicate::str::contains("event\tWorkingDirectoryChanged"));
}

#[test]
fn catalog_json_for_one_family() {
    let assert = kip()
        .args(["catalog", "--family", "event", "--json"])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).expect("json");
    let events = json["data"]["event"].as_array().expect("event list");
    assert_eq!(events.len(), 20);
    assert!(json["data"].get("command").is_none());
}

#[test]
fn samples_decode_cleanly() {
    let samples = kip()
        .args(["samples", "--family", "event"])
        .assert()
        .success();
    let text = String::from_utf8(samples.get_output().stdout.clone()).unwrap();
    assert!(text.lines().count() >= 20);

    kip()
        .args(["decode", "--family", "event"])
        .write_stdin(text)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind":"PackageAdded""#));
}

#[test]
fn samples_filter_by_kind() {
    kip()
        .args(["samples", "--family", "command", "--kind", "SubmitCode"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""targetKernelName":"csharp""#))
        .stdout(predicate::str::contains("AddPackage").not());
}

#[test]
fn decode_reports_bad_lines_and_keeps_going() {
    let tmp = TempDir::new().expect("tmpdir");
    let input = tmp.path().join("commands.jsonl");
    fs::write(
        &input,
        concat!(
            r#"{"kind":"DisplayError","payload":{"message":"oops!"}}"#,
            "\n",
            r#"{"kind":"SubmitCode"}"#,
            "\n",
            r#"{"kind":"SubmitCode","payload":{"code":"123"},"token":"abc"}"#,
            "\n",
        ),
    )
    .unwrap();

    kip()
        .args(["decode", "--family", "command"])
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""kind":"DisplayError""#))
        .stdout(predicate::str::contains(r#""token":"abc""#))
        .stderr(predicate::str::contains("line 2: malformed command envelope"))
        .stderr(predicate::str::contains("1 of 3 lines failed to decode"));
}

#[test]
fn decode_json_lists_failures() {
    let assert = kip()
        .args(["decode", "--json"])
        .env("KIP_FAMILY", "event")
        .write_stdin("{\"kind\":\"Nope\",\"payload\":{}}\n")
        .assert()
        .failure();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(json["data"]["decoded"].as_array().map(Vec::len), Some(0));
    assert_eq!(json["data"]["failed"][0]["line"], 1);
    assert_eq!(
        json["data"]["failed"][0]["error"],
        "unknown event discriminator 'Nope'"
    );
}

#[test]
fn decode_without_family_fails() {
    kip()
        .arg("decode")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--family"));
}

#[test]
fn pretty_samples_are_multi_line_envelopes() {
    let assert = kip()
        .args(["samples", "--family", "command", "--kind", "SubmitCode", "--pretty"])
        .assert()
        .success();
    let text = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(text.starts_with("{\n  \"kind\": \"SubmitCode\",\n  \"payload\": {"), "{text}");
    let value: serde_json::Value = serde_json::from_str(&text).expect("one envelope");
    assert_eq!(value["payload"]["code"], "123");
}

#[test]
fn pretty_decode_keeps_causing_command() {
    kip()
        .args(["decode", "--family", "event", "--pretty"])
        .write_stdin(concat!(
            r#"{"kind":"CommandSucceeded","payload":{},"#,
            r#""causingCommandEnvelope":{"kind":"SubmitCode","payload":{"code":"1"},"token":"t-1"}}"#,
            "\n",
        ))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"kind\": \"CommandSucceeded\""))
        .stdout(predicate::str::contains("\n  \"causingCommandEnvelope\": {"))
        .stdout(predicate::str::contains("\"token\": \"t-1\""));
}
