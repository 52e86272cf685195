//! `netscope` — live network throughput dashboard for the terminal.
//!
//! Five tabs (Live Speed, Interfaces, Connections, Graph, System) driven by
//! a tick-based event loop from `netscope-core`. Data comes from Linux
//! `/proc` by default or from a deterministic simulator (`--provider
//! simulated`).
//!
//! Logs are written to a file (default `/tmp/netscope.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, config layering, tracing setup, panic
//! hooks, and app launch.

mod app;
mod event;
mod keymap;
mod theme;
mod tui;
mod views;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use netscope_config::Config;
use netscope_core::{EventLoop, ProviderKind, build_provider};

use crate::app::App;
use crate::theme::Theme;
use crate::views::ViewConfig;

/// Terminal dashboard for live network throughput, sockets and host health.
#[derive(Parser, Debug)]
#[command(name = "netscope", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, env = "NETSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Metrics source: procfs or simulated
    #[arg(short, long)]
    provider: Option<ProviderKind>,

    /// Milliseconds between samples
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Samples kept per interface
    #[arg(long, value_name = "SAMPLES")]
    history: Option<usize>,

    /// Watch only this interface (repeatable; disables discovery)
    #[arg(short, long = "entity", value_name = "NAME")]
    entities: Vec<String>,

    /// Interface featured on the Speed and Graph tabs
    #[arg(long, value_name = "NAME")]
    primary: Option<String>,

    /// Report disk usage for the filesystem holding this path
    #[arg(long, value_name = "PATH")]
    disk_path: Option<PathBuf>,

    /// Disable colours
    #[arg(long)]
    no_color: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/netscope.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(provider) = self.provider {
            config.engine.provider = provider;
        }
        if let Some(ms) = self.interval_ms {
            config.engine.tick_interval_ms = ms;
        }
        if let Some(history) = self.history {
            config.engine.history_capacity = history;
        }
        if !self.entities.is_empty() {
            config.engine.entities.clone_from(&self.entities);
            config.engine.discover = false;
        }
        if let Some(primary) = &self.primary {
            config.engine.primary = Some(primary.clone());
        }
        if let Some(path) = &self.disk_path {
            config.engine.disk_path.clone_from(path);
        }
        if self.no_color {
            config.display.color = false;
        }
    }
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "netscope={log_level},netscope_core={log_level},netscope_config={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("netscope.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

fn load(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => netscope_config::load_from(path)?,
        None => netscope_config::load_config()?,
    };
    cli.apply(&mut config);
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let config = load(&cli)?;
    if cli.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let engine = config.to_engine_config();
    info!(
        provider = %engine.provider,
        tick_ms = config.engine.tick_interval_ms,
        entities = ?engine.entities,
        "starting netscope"
    );

    let theme = if config.display.color {
        Theme::neon()
    } else {
        Theme::plain()
    };
    let event_loop = EventLoop::new(&engine, build_provider(&engine));
    let mut app = App::new(event_loop, ViewConfig::from_display(&config.display), theme);
    app.run().await
}
