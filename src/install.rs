use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use tracing::warn;

const SETTINGS_KEY: &str = "statusLine";

#[cfg(windows)]
const COMMAND_FILE: &str = "statusline-command.exe";
#[cfg(not(windows))]
const COMMAND_FILE: &str = "statusline-command";

/// Copies the current executable into the Claude config directory and
/// registers it as the `statusLine` command in `settings.json`.
pub fn install() -> Result<()> {
    let config_dir = claude_config_dir()?;
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("failed to create {}", config_dir.display()))?;

    let dest = config_dir.join(COMMAND_FILE);
    let exe = env::current_exe().context("failed to resolve current executable path")?;
    fs::copy(&exe, &dest)
        .with_context(|| format!("failed to copy renderer to {}", dest.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(&dest, fs::Permissions::from_mode(0o755));
    }
    println!("renderer copied to {}", dest.display());

    let settings_path = config_dir.join("settings.json");
    match load_settings(&settings_path) {
        Some(mut settings) => {
            if register_status_line(&mut settings, &dest.display().to_string()) {
                write_settings(&settings_path, &settings)?;
                println!("statusLine entry added to {}", settings_path.display());
            } else {
                println!("statusLine already configured in {}", settings_path.display());
            }
        }
        None => warn!(
            "could not parse {}; leaving it untouched",
            settings_path.display()
        ),
    }

    println!("Restart Claude Code to see the statusline.");
    Ok(())
}

/// Removes the copied renderer and deletes the `statusLine` settings entry.
pub fn uninstall() -> Result<()> {
    let config_dir = claude_config_dir()?;

    let dest = config_dir.join(COMMAND_FILE);
    if dest.exists() {
        fs::remove_file(&dest)
            .with_context(|| format!("failed to remove {}", dest.display()))?;
        println!("removed {}", dest.display());
    } else {
        warn!("{} not found", dest.display());
    }

    let settings_path = config_dir.join("settings.json");
    if settings_path.exists() {
        match load_settings(&settings_path) {
            Some(mut settings) => {
                if settings.remove(SETTINGS_KEY).is_some() {
                    write_settings(&settings_path, &settings)?;
                    println!("statusLine entry removed from {}", settings_path.display());
                }
            }
            None => warn!(
                "could not parse {}; leaving it untouched",
                settings_path.display()
            ),
        }
    }

    println!("Done. Restart Claude Code to apply.");
    Ok(())
}

/// Inserts the `statusLine` entry when absent. Returns whether a write is
/// needed; an existing entry is never overwritten.
fn register_status_line(settings: &mut Map<String, Value>, command: &str) -> bool {
    if settings.contains_key(SETTINGS_KEY) {
        return false;
    }
    settings.insert(
        SETTINGS_KEY.to_string(),
        json!({
            "type": "command",
            "command": command,
        }),
    );
    true
}

/// Missing file reads as an empty object; unreadable or non-object JSON
/// reads as `None` so the caller can skip the merge with a warning.
fn load_settings(path: &Path) -> Option<Map<String, Value>> {
    if !path.exists() {
        return Some(Map::new());
    }
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str::<Value>(&raw)
        .ok()?
        .as_object()
        .cloned()
}

fn write_settings(path: &Path, settings: &Map<String, Value>) -> Result<()> {
    let mut data = serde_json::to_string_pretty(&Value::Object(settings.clone()))?;
    data.push('\n');
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

/// `CLAUDE_CONFIG_DIR` overrides the default `~/.claude` location.
fn claude_config_dir() -> Result<PathBuf> {
    if let Ok(custom) = env::var("CLAUDE_CONFIG_DIR") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    let home = dirs::home_dir().context("failed to determine home directory")?;
    Ok(home.join(".claude"))
}
