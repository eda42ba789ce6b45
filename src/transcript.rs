use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

/// Upper bound on the transcript bytes read per invocation; the scan cost
/// must not grow with the transcript.
const TAIL_WINDOW_BYTES: u64 = 16 * 1024;

const IDLE_LABEL: &str = "Idle";
const TASK_DESCRIPTION_CHARS: usize = 25;

/// One JSON line of the transcript. Anything that is not an assistant turn
/// collapses into `Other`; lines that fail to parse at all (the first line
/// of the byte window is routinely cut mid-record) are skipped by the scan.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum TranscriptRecord {
    #[serde(rename = "assistant")]
    Assistant {
        #[serde(default)]
        message: AssistantMessage,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "tool_use")]
    ToolUse {
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Other,
}

/// Derives the "current activity" label from the tail of the transcript:
/// the last tool-use block of the most recent assistant turn that invoked
/// any tool. An absent or unreadable transcript reads as idle.
pub fn current_activity(transcript_path: Option<&Path>) -> String {
    let Some(path) = transcript_path else {
        return IDLE_LABEL.to_string();
    };
    let Ok(tail) = read_tail(path) else {
        return IDLE_LABEL.to_string();
    };
    scan_tail(&tail).unwrap_or_else(|| IDLE_LABEL.to_string())
}

/// One stat, one seek, one bounded read.
fn read_tail(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let window = len.min(TAIL_WINDOW_BYTES);
    file.seek(SeekFrom::Start(len - window))?;

    let mut buf = Vec::with_capacity(window as usize);
    file.take(window).read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn scan_tail(tail: &str) -> Option<String> {
    for line in tail.lines().rev().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        let Ok(record) = serde_json::from_str::<TranscriptRecord>(line) else {
            continue;
        };
        let TranscriptRecord::Assistant { message } = record else {
            continue;
        };
        // A turn may carry several tool calls; the most recent one wins.
        let last_tool = message.content.iter().rev().find_map(|block| match block {
            ContentBlock::ToolUse { name, input } => Some((name.as_str(), input)),
            ContentBlock::Other => None,
        });
        if let Some((name, input)) = last_tool {
            return Some(tool_label(name, input));
        }
    }
    None
}

fn tool_label(name: &str, input: &Value) -> String {
    match name {
        "Task" => {
            let Some(agent) = input.get("subagent_type").and_then(Value::as_str) else {
                return name.to_string();
            };
            match input.get("description").and_then(Value::as_str) {
                Some(description) => {
                    let head: String = description.chars().take(TASK_DESCRIPTION_CHARS).collect();
                    format!("Task({agent}: {head})")
                }
                None => format!("Task({agent})"),
            }
        }
        "Skill" => match input.get("skill").and_then(Value::as_str) {
            Some(skill) => format!("Skill({skill})"),
            None => name.to_string(),
        },
        _ => name.to_string(),
    }
}
