//! End-to-end tests of the `subcue` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture, temp_file};

/// Command with an isolated config location so the host's config never leaks in.
fn subcue(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_subcue"));
    cmd.env("SUBCUE_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn events_lists_sequenced_timeline() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(subcue(&home).arg("events").arg(fixture("scenario.json")));

    insta::assert_snapshot!(stdout, @r"
    #0 00:00:00,000 <silence>
    #1 00:00:01,000 Hello
    #2 00:00:04,001 <silence>
    #3 00:00:06,000 Bye
    #4 00:00:08,501 <silence>
    ");
}

#[test]
fn events_json_is_parseable() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(
        subcue(&home)
            .args(["events", "--json"])
            .arg(fixture("scenario.json")),
    );

    let events: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events[2]["offset_ms"], 4_001);
    assert_eq!(events[2]["kind"], "Silence");
    assert_eq!(events[3]["kind"]["Caption"], "Bye");
}

#[test]
fn events_reads_stdin() {
    let home = TempDir::new().unwrap();
    let input = std::fs::read_to_string(fixture("short.json")).unwrap();
    let stdout = stdout_of(subcue(&home).args(["events", "-"]).write_stdin(input));

    assert!(stdout.starts_with("#0 00:00:00,000 <silence>\n#1 00:00:00,005 one / more line\n"));
}

#[test]
fn lookup_prints_event_per_offset_in_order() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(
        subcue(&home)
            .arg("lookup")
            .arg(fixture("scenario.json"))
            .args(["4001", "500", "00:00:07,250", "99999"]),
    );

    assert_eq!(
        stdout,
        "00:00:04,001 -> #2 00:00:04,001 <silence>\n\
         00:00:00,500 -> #0 00:00:00,000 <silence>\n\
         00:00:07,250 -> #3 00:00:06,000 Bye\n\
         00:01:39,999 -> #4 00:00:08,501 <silence>\n"
    );
}

#[test]
fn lookup_rejects_malformed_offset() {
    let home = TempDir::new().unwrap();
    subcue(&home)
        .arg("lookup")
        .arg(fixture("scenario.json"))
        .arg("1:2:3:4")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid offset"));
}

#[test]
fn overlapping_captions_fail_to_build() {
    let home = TempDir::new().unwrap();
    subcue(&home)
        .arg("events")
        .arg(fixture("overlapping.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid caption #1"));
}

#[test]
fn unknown_caption_fields_are_rejected() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_file(
        "captions.json",
        r#"[{ "start_ms": 0, "end_ms": 10, "text": "hi", "style": "bold" }]"#,
    );

    subcue(&home)
        .arg("events")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("style"));
}

#[test]
fn missing_caption_file_is_reported() {
    let home = TempDir::new().unwrap();
    subcue(&home)
        .args(["events", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.json"));
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(subcue(&home).args(["config", "show"]));

    assert!(stdout.contains("[player]"));
    assert!(stdout.contains("[index]"));
    assert!(stdout.contains("top_exponent = 8"));
    assert!(stdout.contains("resolution_exponent = 3"));
}

#[test]
fn config_path_honours_env() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(subcue(&home).args(["config", "path"]));

    assert_eq!(
        stdout.trim_end(),
        home.path().join("config.toml").display().to_string()
    );
}

#[test]
fn config_file_changes_layout() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        "[index]\ntop_exponent = 3\nresolution_exponent = 0\n",
    )
    .unwrap();

    // Largest offset for a four-digit layout is 9999ms
    subcue(&home)
        .arg("events")
        .arg(fixture("scenario.json"))
        .assert()
        .success();

    let (_dir, path) = temp_file(
        "long.json",
        r#"[{ "start_ms": 20000, "end_ms": 21000, "text": "late" }]"#,
    );
    subcue(&home)
        .arg("events")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the indexable maximum"));
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        "[player]\npoll_interval_ms = 0\n",
    )
    .unwrap();

    subcue(&home)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn play_deadline_prints_every_transition() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(
        subcue(&home)
            .args(["play", "--deadline"])
            .arg(fixture("short.json")),
    );

    assert_eq!(
        stdout,
        "[00:00:00,000]\n\
         [00:00:00,005] one\n\
         [00:00:00,005] more line\n\
         [00:00:00,010]\n\
         [00:00:00,015] two\n\
         [00:00:00,020]\n"
    );
}

#[test]
fn play_polling_stops_at_last_event() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(
        subcue(&home)
            .args(["play", "--interval-ms", "2"])
            .arg(fixture("short.json")),
    );

    // Coarse ticks may skip short events, but the final blank is always shown
    assert!(stdout.ends_with("[00:00:00,020]\n"), "got: {stdout}");
}

#[test]
fn play_from_offset_starts_mid_caption() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(
        subcue(&home)
            .args(["play", "--deadline", "--from", "16"])
            .arg(fixture("short.json")),
    );

    assert_eq!(stdout, "[00:00:00,015] two\n[00:00:00,020]\n");
}

#[test]
fn play_prints_a_line_for_empty_caption_text() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_file(
        "empty.json",
        r#"[{ "start_ms": 5, "end_ms": 9, "text": "" }, { "start_ms": 15, "end_ms": 19, "text": [] }]"#,
    );
    let stdout = stdout_of(subcue(&home).args(["play", "--deadline"]).arg(&path));

    assert_eq!(
        stdout,
        "[00:00:00,000]\n\
         [00:00:00,005] \n\
         [00:00:00,010]\n\
         [00:00:00,015] \n\
         [00:00:00,020]\n"
    );
}

#[test]
fn config_flag_overrides_env_location() {
    let home = TempDir::new().unwrap();
    let (_dir, config) = temp_file(
        "explicit.toml",
        "[index]\ntop_exponent = 3\nresolution_exponent = 0\n",
    );

    let stdout = stdout_of(subcue(&home).arg("--config").arg(&config).args(["config", "path"]));
    assert_eq!(stdout.trim_end(), config.display().to_string());

    // The explicit file's four-digit layout cannot hold a 20s caption
    let (_captions_dir, captions) = temp_file(
        "long.json",
        r#"[{ "start_ms": 20000, "end_ms": 21000, "text": "late" }]"#,
    );
    subcue(&home)
        .arg("events")
        .arg(&captions)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the indexable maximum"));

    // Without the flag the default layout applies
    subcue(&home).arg("events").arg(&captions).assert().success();
}
