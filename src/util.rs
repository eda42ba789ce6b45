use tracing_subscriber::{EnvFilter, fmt};

pub fn setup_tracing() {
    // Default to warn so the render path stays silent on stderr; the host
    // embeds our stdout in its prompt line.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).without_time().try_init();
}

/// Floors and clamps a context-use percentage into 0..=100.
pub fn clamp_percentage(raw: Option<f64>) -> u8 {
    let value = raw.unwrap_or(0.0);
    if !value.is_finite() {
        return 0;
    }
    value.floor().clamp(0.0, 100.0) as u8
}

pub fn format_tokens(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}k", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}

pub fn format_cost(cost_usd: f64) -> String {
    if !cost_usd.is_finite() || cost_usd <= 0.0 {
        return "$0.00".to_string();
    }
    if cost_usd < 0.01 {
        format!("${cost_usd:.4}")
    } else {
        format!("${cost_usd:.2}")
    }
}

pub fn format_duration_ms(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Compresses a working-directory path to its last three segments.
/// Backslashes normalize to `/`; an empty path reads as `~`.
pub fn dir_label(raw: &str) -> String {
    let normalized = raw.replace('\\', "/");
    let parts: Vec<&str> = normalized
        .split('/')
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return "~".to_string();
    }
    let start = parts.len().saturating_sub(3);
    parts[start..].join("/")
}
