use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn statusline() -> Command {
    Command::cargo_bin("claude-statusline").expect("binary")
}

fn write_git_repo(root: &Path, head: &str, origin_url: Option<&str>) {
    let git = root.join(".git");
    fs::create_dir_all(&git).expect("git dir");
    fs::write(git.join("HEAD"), head).expect("HEAD");
    if let Some(url) = origin_url {
        let config = format!("[remote \"origin\"]\n\turl = {url}\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n");
        fs::write(git.join("config"), config).expect("config");
    }
}

#[test]
fn empty_stdin_renders_nothing() {
    statusline()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn malformed_stdin_renders_nothing() {
    statusline()
        .write_stdin("{\"model\": broken")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn full_snapshot_renders_all_fields() {
    let tmp = TempDir::new().expect("temp dir");
    let project = tmp.path().join("home").join("dev").join("app");
    fs::create_dir_all(&project).expect("project dir");
    write_git_repo(
        &project,
        "ref: refs/heads/main\n",
        Some("git@github.com:acme/tool.git"),
    );

    let transcript = tmp.path().join("transcript.jsonl");
    fs::write(
        &transcript,
        concat!(
            r#"{"type":"user","message":{"content":"hi"}}"#,
            "\n",
            r#"{"type":"assistant","message":{"content":[{"type":"tool_use","name":"Read","input":{"file_path":"/tmp/a"}}]}}"#,
            "\n",
        ),
    )
    .expect("transcript");

    let input = format!(
        r#"{{
            "model": {{"display_name": "Sonnet 4.5"}},
            "workspace": {{"current_dir": "{project}", "project_dir": "{project}"}},
            "transcript_path": "{transcript}",
            "context_window": {{"used_percentage": 42.7, "total_input_tokens": 1500, "total_output_tokens": 300}},
            "cost": {{"total_cost_usd": 1.5, "total_duration_ms": 65000}}
        }}"#,
        project = project.display(),
        transcript = transcript.display(),
    );

    statusline()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Read")
                .and(predicate::str::contains("Sonnet 4.5"))
                .and(predicate::str::contains("acme/tool:main"))
                .and(predicate::str::contains("home/dev/app"))
                .and(predicate::str::contains("1.5k"))
                .and(predicate::str::contains("300"))
                .and(predicate::str::contains("1.8k"))
                .and(predicate::str::contains("$1.50"))
                .and(predicate::str::contains("1m 5s"))
                .and(predicate::str::contains("42%")),
        )
        .stderr(predicate::str::is_empty());
}

#[test]
fn snapshot_without_transcript_or_git_uses_sentinels() {
    let tmp = TempDir::new().expect("temp dir");
    let input = format!(
        r#"{{"workspace": {{"current_dir": "{dir}"}}}}"#,
        dir = tmp.path().display(),
    );

    statusline()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Idle")
                .and(predicate::str::contains("no-git"))
                .and(predicate::str::contains("unknown"))
                .and(predicate::str::contains("$0.00"))
                .and(predicate::str::contains("0s")),
        );
}

#[test]
fn output_has_no_trailing_newline() {
    let output = statusline()
        .write_stdin("{}")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf-8");
    assert_eq!(text.matches('\n').count(), 3);
    assert!(!text.ends_with('\n'));
}

#[test]
fn help_lists_subcommands() {
    statusline()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("install")
                .and(predicate::str::contains("uninstall")),
        );
}

#[test]
fn install_then_uninstall_round_trips_settings() {
    let tmp = TempDir::new().expect("temp dir");
    let config_dir = tmp.path().join("claude");
    fs::create_dir_all(&config_dir).expect("config dir");
    let settings_path = config_dir.join("settings.json");
    fs::write(&settings_path, "{\"theme\": \"dark\"}\n").expect("settings");

    statusline()
        .arg("install")
        .env("CLAUDE_CONFIG_DIR", &config_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("statusLine entry added"));

    let command_file = config_dir.join(if cfg!(windows) {
        "statusline-command.exe"
    } else {
        "statusline-command"
    });
    assert!(command_file.exists());

    let settings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&settings_path).expect("read")).expect("json");
    assert_eq!(settings["theme"], "dark");
    assert_eq!(settings["statusLine"]["type"], "command");
    assert_eq!(
        settings["statusLine"]["command"],
        command_file.display().to_string()
    );

    // A second install must not replace the existing entry.
    statusline()
        .arg("install")
        .env("CLAUDE_CONFIG_DIR", &config_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("already configured"));

    statusline()
        .arg("uninstall")
        .env("CLAUDE_CONFIG_DIR", &config_dir)
        .assert()
        .success();

    assert!(!command_file.exists());
    let settings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&settings_path).expect("read")).expect("json");
    assert_eq!(settings["theme"], "dark");
    assert!(settings.get("statusLine").is_none());
}

#[test]
fn install_leaves_malformed_settings_untouched() {
    let tmp = TempDir::new().expect("temp dir");
    let config_dir = tmp.path().join("claude");
    fs::create_dir_all(&config_dir).expect("config dir");
    let settings_path = config_dir.join("settings.json");
    fs::write(&settings_path, "{not json").expect("settings");

    statusline()
        .arg("install")
        .env("CLAUDE_CONFIG_DIR", &config_dir)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&settings_path).expect("read"),
        "{not json"
    );
    assert!(config_dir.join(if cfg!(windows) {
        "statusline-command.exe"
    } else {
        "statusline-command"
    })
    .exists());
}
