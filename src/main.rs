use std::process::ExitCode;

use clap::Parser;

use claude_statusline::app;
use claude_statusline::cli::{Cli, Commands};
use claude_statusline::install;
use claude_statusline::util::setup_tracing;

fn main() -> ExitCode {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Install) => run(install::install()),
        Some(Commands::Uninstall) => run(install::uninstall()),
        None => {
            // The render path never fails visibly: a hook that prints
            // errors or exits non-zero would corrupt the host UI.
            let _ = app::render_status();
            ExitCode::SUCCESS
        }
    }
}

fn run(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("claude-statusline error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
