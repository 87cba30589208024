mod app;
mod config;
mod entry;
mod error;
mod io;
mod manager;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use config::Config;
use io::NativeFileSystem;
use manager::FileManager;
use state::SelectionState;
use std::env;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use ui::ConsoleUi;

#[derive(Parser, Debug)]
#[command(name = "fmgr", version, about = "Browse directories and copy, move or delete files by index")]
struct Cli {
    /// Directory to start in (default: home directory)
    #[arg(short, long)]
    start_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Leave dot files out of listings
    #[arg(long)]
    hide_dotfiles: bool,

    /// Log at TRACE level
    #[arg(short, long)]
    verbose: bool,

    /// Log to stderr instead of the log file
    #[arg(long)]
    log_stderr: bool,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli);
    tracing::trace!("CLI arguments: {:?}", cli);

    if cli.init_config {
        let path = Config::create_default(cli.config.as_deref())?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref());
    if cli.hide_dotfiles {
        config.listing.show_hidden = false;
    }
    tracing::debug!("Config: {:?}", config);

    let start = start_directory(&cli, &config);
    let manager = FileManager::new(
        start,
        SelectionState::new(),
        NativeFileSystem::from_config(&config),
        ConsoleUi::stdio(),
    );
    App::new(manager, config.operations.confirm_delete).run();

    Ok(())
}

/// Sets up the global subscriber. The returned guard flushes the log file
/// on drop and must live until exit.
fn init_logging(cli: &Cli) -> Option<WorkerGuard> {
    let level = if cli.verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    let filter = LevelFilter::from_level(level);

    if cli.log_stderr {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_filter(filter),
            )
            .init();
        return None;
    }

    let logs_dir = directories::ProjectDirs::from("", "", "fmgr")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "fmgr.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(filter),
        )
        .init();
    Some(guard)
}

/// `--start-dir`, then the config file, then home, then the process
/// working directory.
fn start_directory(cli: &Cli, config: &Config) -> PathBuf {
    let path = cli
        .start_dir
        .clone()
        .or_else(|| config.general.start_dir.clone())
        .or_else(|| directories::UserDirs::new().map(|ud| ud.home_dir().to_path_buf()))
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("/"));
    std::path::absolute(&path).unwrap_or(path)
}
