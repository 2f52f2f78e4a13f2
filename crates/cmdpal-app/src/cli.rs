use std::path::PathBuf;

use clap::Parser;

/// cmdpal: a keyboard-driven command palette over browser tabs, bookmarks
/// and page commands.
#[derive(Parser, Debug)]
#[command(name = "cmdpal", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (e.g. `debug`, `cmdpal_palette=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Browser state (tabs and bookmarks) as JSON.
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Event script to replay. Read from stdin when omitted.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Tab the palette opens over. Defaults to the first tab.
    #[arg(long)]
    pub host_tab: Option<u32>,

    /// Print each palette state as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Open URLs in the system browser and write to the system clipboard.
    #[arg(long)]
    pub system: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub dump_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
