use clap::{Parser, Subcommand};

/// Statusline renderer for Claude Code. With no subcommand it reads a
/// session snapshot from stdin and writes the rendered lines to stdout.
#[derive(Parser, Debug)]
#[command(name = "claude-statusline", version, about = "Claude Code statusline renderer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy the renderer into the Claude config directory and register it
    /// in settings.json
    Install,
    /// Remove the installed renderer and its settings.json entry
    Uninstall,
}
