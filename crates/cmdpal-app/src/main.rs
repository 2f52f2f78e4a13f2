mod app;
mod cli;
mod prompt;
mod render;
mod script;

use std::sync::Arc;

use cmdpal_common::{CmdpalError, TabId};
use cmdpal_config::{CmdpalConfig, LogLevel};
use cmdpal_platform::{BrowserFixture, DesktopBrowser};
use tokio::io::{AsyncBufRead, BufReader};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::app::{OutputFormat, PaletteApp};

const DEFAULT_DIRECTIVE: &str = "cmdpal=info";

/// Turn a `--log-level` value into a filter directive. Bare level names
/// apply to this application's crates only.
fn log_directive(raw: &str) -> String {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => LogLevel::Trace.directive().to_string(),
        "debug" => LogLevel::Debug.directive().to_string(),
        "info" => LogLevel::Info.directive().to_string(),
        "warn" => LogLevel::Warn.directive().to_string(),
        "error" => LogLevel::Error.directive().to_string(),
        _ => raw.to_string(),
    }
}

fn init_logging(directive: &str) {
    let directive: Directive = directive.parse().unwrap_or_else(|_| {
        DEFAULT_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

async fn run(args: cli::Args, config: CmdpalConfig) -> Result<(), CmdpalError> {
    if let Err(e) = cmdpal_platform::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let fixture_path = match args.fixture {
        Some(path) => Some(path),
        None => cmdpal_platform::fixture_file()
            .ok()
            .filter(|path| path.exists()),
    };
    let fixture = match &fixture_path {
        Some(path) => {
            tracing::info!("Browser state: {}", path.display());
            BrowserFixture::load(path)?
        }
        None => {
            tracing::info!("No browser state file, starting with no tabs or bookmarks");
            BrowserFixture::default()
        }
    };
    let browser = Arc::new(DesktopBrowser::new(fixture).with_system_access(args.system));

    let script: Box<dyn AsyncBufRead + Unpin + Send> = match &args.script {
        Some(path) => Box::new(BufReader::new(tokio::fs::File::open(path).await?)),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut app = PaletteApp::open(
        &config,
        browser,
        args.host_tab.map(TabId),
        format,
        std::io::stdout(),
    )
    .await?;
    app.run(script).await
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    // Config is read before logging starts so its level can apply; any
    // failure is reported once the subscriber is up.
    let loaded = cmdpal_config::load_config(args.config.as_deref());

    let directive = match (&args.log_level, &loaded) {
        (Some(raw), _) => log_directive(raw),
        (None, Ok(config)) => config.logging.level.directive().to_string(),
        (None, Err(_)) => DEFAULT_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    tracing::info!("cmdpal v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_some() => {
            tracing::error!("Config load failed: {e}");
            std::process::exit(2);
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            CmdpalConfig::default()
        }
    };

    if args.dump_config {
        println!("{}", cmdpal_config::config_to_json(&config));
        return;
    }

    if let Err(e) = run(args, config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
