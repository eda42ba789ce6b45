use std::io::{Read, Write};

use anyhow::Result;
use tracing::debug;

use crate::gitref;
use crate::render::{self, DEFAULT_THEME, StatusFields};
use crate::snapshot::SessionSnapshot;
use crate::transcript;
use crate::util::{dir_label, format_cost, format_duration_ms, format_tokens};

/// Single-shot render: snapshot JSON on stdin, one ANSI block on stdout.
/// Every failure degrades to empty output; the host prompt line must never
/// see an error from us.
pub fn render_status() -> Result<()> {
    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        debug!("stdin was not readable as UTF-8; rendering nothing");
        return Ok(());
    }

    let Some(snapshot) = SessionSnapshot::parse(&input) else {
        debug!("stdin empty or malformed; rendering nothing");
        return Ok(());
    };

    let block = render::compose(&build_fields(&snapshot), &DEFAULT_THEME);
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(block.as_bytes());
    let _ = stdout.flush();
    Ok(())
}

fn build_fields(snapshot: &SessionSnapshot) -> StatusFields {
    let tokens_in = snapshot.input_tokens();
    let tokens_out = snapshot.output_tokens();

    StatusFields {
        activity: transcript::current_activity(snapshot.transcript_path()),
        model: snapshot.model_name().to_string(),
        git_ref: gitref::git_ref(snapshot.project_dir()),
        directory: dir_label(snapshot.current_dir()),
        tokens_in: format_tokens(tokens_in),
        tokens_out: format_tokens(tokens_out),
        // Sum first, format once.
        tokens_total: format_tokens(tokens_in.saturating_add(tokens_out)),
        cost: format_cost(snapshot.total_cost_usd()),
        duration: format_duration_ms(snapshot.total_duration_ms()),
        context_pct: snapshot.used_percentage(),
    }
}
