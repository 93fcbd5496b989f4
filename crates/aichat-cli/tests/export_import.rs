//! Integration tests for `aichat export` and `aichat import`.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn write_session(temp_dir: &TempDir, id: &str, name: &str, messages: &[(&str, &str)]) {
    let sessions_dir = temp_dir.path().join("sessions");
    fs::create_dir_all(&sessions_dir).unwrap();

    let messages: Vec<serde_json::Value> = messages
        .iter()
        .enumerate()
        .map(|(i, (role, content))| {
            json!({
                "id": format!("msg{i}"),
                "content": content,
                "role": role,
                "timestamp": format!("2024-01-01T00:00:0{i}Z")
            })
        })
        .collect();

    let session = json!({
        "id": id,
        "name": name,
        "messages": messages,
        "created_at": "2024-01-01T00:00:00Z"
    });

    fs::write(
        sessions_dir.join(format!("{id}.json")),
        serde_json::to_string_pretty(&session).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_export_json_writes_versioned_document() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("export.json");

    write_session(
        &temp_dir,
        "session-abc",
        "My Session",
        &[("user", "hi"), ("assistant", "hello")],
    );

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .args(["export", "--session", "session-abc"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported session 'My Session'"));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(document["version"], "1.0.0");
    assert_eq!(document["sessionName"], "My Session");
    assert_eq!(document["messages"].as_array().unwrap().len(), 2);
    assert_eq!(document["messages"][0]["content"], "hi");
    assert_eq!(document["messages"][1]["role"], "assistant");
}

#[test]
fn test_export_markdown_transcript() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("export.md");

    write_session(
        &temp_dir,
        "session-md",
        "Review Notes",
        &[("user", "first question"), ("assistant", "first answer")],
    );

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .args(["export", "--format", "markdown", "--session", "session-md"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let markdown = fs::read_to_string(&out).unwrap();
    assert!(markdown.starts_with("# Review Notes"));
    assert!(markdown.contains("## User ("));
    assert!(markdown.contains("## Assistant ("));
    assert!(markdown.contains("first question"));
}

#[test]
fn test_export_defaults_to_latest_session() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("latest.json");

    write_session(&temp_dir, "older", "Older", &[("user", "old")]);
    std::thread::sleep(std::time::Duration::from_millis(10));
    write_session(&temp_dir, "newer", "Newer", &[("user", "new")]);

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .args(["export"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Newer"));
}

#[test]
fn test_export_without_sessions_fails() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .args(["export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no saved sessions"));
}

#[test]
fn test_import_creates_session_from_export() {
    let temp_dir = TempDir::new().unwrap();
    let file_dir = TempDir::new().unwrap();
    let file = file_dir.path().join("export.json");

    let document = json!({
        "messages": [
            { "id": "m1", "content": "hi", "role": "user", "timestamp": "2024-01-01T00:00:00Z" },
            { "id": "m2", "content": "hello", "role": "assistant", "timestamp": "2024-01-01T00:00:01Z" }
        ],
        "timestamp": "2024-01-01T00:00:02Z",
        "version": "1.0.0",
        "sessionName": "Imported Chat"
    });
    fs::write(&file, document.to_string()).unwrap();

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 2 messages into session 'Imported Chat'",
        ));

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported Chat"))
        .stdout(predicate::str::contains("2 messages"));
}

#[test]
fn test_import_round_trip_via_export() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("round-trip.json");

    write_session(
        &temp_dir,
        "origin",
        "Round Trip",
        &[("user", "apple pie"), ("assistant", "banana split")],
    );

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .args(["export", "--session", "origin"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .arg("import")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 messages"));
}

#[test]
fn test_import_into_existing_session_replaces_messages() {
    let temp_dir = TempDir::new().unwrap();
    let file_dir = TempDir::new().unwrap();
    let file = file_dir.path().join("export.json");

    write_session(&temp_dir, "target", "Target", &[("user", "old message")]);

    let document = json!({
        "messages": [
            { "id": "m1", "content": "replacement", "role": "user", "timestamp": "2024-01-01T00:00:00Z" }
        ]
    });
    fs::write(&file, document.to_string()).unwrap();

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .arg("import")
        .arg(&file)
        .args(["--session", "target"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 1 messages into session target",
        ));

    let saved: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp_dir.path().join("sessions").join("target.json")).unwrap(),
    )
    .unwrap();
    let messages = saved["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["content"], "replacement");
    assert_eq!(saved["name"], "Target");
}

#[test]
fn test_import_rejects_malformed_json() {
    let temp_dir = TempDir::new().unwrap();
    let file_dir = TempDir::new().unwrap();
    let file = file_dir.path().join("broken.json");
    fs::write(&file, "{ not json").unwrap();

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse file"));
}

#[test]
fn test_import_rejects_missing_messages_array() {
    let temp_dir = TempDir::new().unwrap();
    let file_dir = TempDir::new().unwrap();
    let file = file_dir.path().join("no-messages.json");
    fs::write(&file, json!({ "version": "1.0.0" }).to_string()).unwrap();

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid file format"))
        .stderr(predicate::str::contains("messages array not found"));
}

#[test]
fn test_import_names_offending_element() {
    let temp_dir = TempDir::new().unwrap();
    let file_dir = TempDir::new().unwrap();
    let file = file_dir.path().join("bad-element.json");

    let document = json!({
        "messages": [
            { "id": "m1", "content": "ok", "role": "user", "timestamp": "2024-01-01T00:00:00Z" },
            { "id": "m2", "role": "assistant", "timestamp": "2024-01-01T00:00:01Z" }
        ]
    });
    fs::write(&file, document.to_string()).unwrap();

    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("index 1"));

    // All-or-nothing: no session was created.
    cargo_bin_cmd!("aichat")
        .env("AICHAT_HOME", temp_dir.path())
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved sessions."));
}
