use std::path::Path;

use serde::Deserialize;

use crate::util::clamp_percentage;

/// Session snapshot piped by the host on each statusline tick.
///
/// Every field is optional. The accessor methods hand back concrete
/// defaults so nothing downstream has to branch on raw `Option`s.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub model: ModelInfo,
    pub workspace: WorkspaceInfo,
    pub cwd: Option<String>,
    pub transcript_path: Option<String>,
    pub context_window: ContextWindow,
    pub cost: CostInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkspaceInfo {
    pub current_dir: Option<String>,
    pub project_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContextWindow {
    pub used_percentage: Option<f64>,
    pub total_input_tokens: Option<u64>,
    pub total_output_tokens: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CostInfo {
    pub total_cost_usd: Option<f64>,
    pub total_duration_ms: Option<u64>,
}

impl SessionSnapshot {
    /// Parses the raw stdin document. Empty or malformed input yields
    /// `None`, which the caller turns into a silent no-op render.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        serde_json::from_str(trimmed).ok()
    }

    pub fn model_name(&self) -> &str {
        self.model.display_name.as_deref().unwrap_or("unknown")
    }

    /// Working directory, falling back to the top-level `cwd` field.
    pub fn current_dir(&self) -> &str {
        self.workspace
            .current_dir
            .as_deref()
            .or(self.cwd.as_deref())
            .unwrap_or("")
    }

    pub fn project_dir(&self) -> &str {
        self.workspace
            .project_dir
            .as_deref()
            .unwrap_or_else(|| self.current_dir())
    }

    pub fn transcript_path(&self) -> Option<&Path> {
        self.transcript_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(Path::new)
    }

    /// Context use, floored and clamped to 0..=100.
    pub fn used_percentage(&self) -> u8 {
        clamp_percentage(self.context_window.used_percentage)
    }

    pub fn input_tokens(&self) -> u64 {
        self.context_window.total_input_tokens.unwrap_or(0)
    }

    pub fn output_tokens(&self) -> u64 {
        self.context_window.total_output_tokens.unwrap_or(0)
    }

    pub fn total_cost_usd(&self) -> f64 {
        let value = self.cost.total_cost_usd.unwrap_or(0.0);
        if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        }
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.cost.total_duration_ms.unwrap_or(0)
    }
}
