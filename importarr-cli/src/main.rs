//! importarr CLI
//!
//! Reconciles local media folders against Radarr/Sonarr: looks up each
//! folder name, skips anything already in the library, and adds the rest
//! in paced batches.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use importarr_arr::config::BackendSettings;
use importarr_arr::{ImportConfig, RadarrBackend, SonarrBackend, config_path, movies, series};
use importarr_lib::scan_media_folders;
use importarr_lib::sync::{Backend, SyncOptions, run_sync};

mod report;

#[derive(Parser)]
#[command(name = "importarr")]
#[command(about = "Bulk-import media folders into Radarr and Sonarr", long_about = None)]
struct Cli {
    /// Config file path (default: ~/.config/importarr/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Classify folders without issuing any add requests
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Enable debug logging (request tracing)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// With no subcommand, every configured backend is run in turn
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync movie folders into Radarr only
    Movies,
    /// Sync series folders into Sonarr only
    Series,
    /// Print the config file path
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if matches!(cli.command, Some(Commands::Config)) {
        println!("{}", config_path().display());
        return;
    }

    let path = cli.config.clone().unwrap_or_else(config_path);
    log::debug!("Loading config from {}", path.display());
    let config = match ImportConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            report::fatal(&e.to_string());
            std::process::exit(1);
        }
    };

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let ok = rt.block_on(run_selected(&cli, &config));
    if !ok {
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Run the backends selected by the subcommand (or all configured ones).
/// Returns false if any run ended fatally.
async fn run_selected(cli: &Cli, config: &ImportConfig) -> bool {
    let want_movies = matches!(cli.command, None | Some(Commands::Movies));
    let want_series = matches!(cli.command, None | Some(Commands::Series));
    let mut ok = true;

    if want_movies {
        match &config.radarr {
            Some(settings) => ok &= run_movies(settings, cli.dry_run).await,
            None if matches!(cli.command, Some(Commands::Movies)) => {
                report::fatal("No [radarr] section in the config file");
                ok = false;
            }
            None => {}
        }
    }

    if want_series {
        match &config.sonarr {
            Some(settings) => ok &= run_series(settings, cli.dry_run).await,
            None if matches!(cli.command, Some(Commands::Series)) => {
                report::fatal("No [sonarr] section in the config file");
                ok = false;
            }
            None => {}
        }
    }

    ok
}

async fn run_movies(settings: &BackendSettings, dry_run: bool) -> bool {
    let backend = match RadarrBackend::new(settings) {
        Ok(backend) => backend,
        Err(e) => {
            report::fatal(&e.to_string());
            return false;
        }
    };
    let options = sync_options(
        settings,
        movies::DEFAULT_BATCH_SIZE,
        movies::DEFAULT_BATCH_DELAY_SECS,
        dry_run,
    );
    run_backend(&backend, settings, &options).await
}

async fn run_series(settings: &BackendSettings, dry_run: bool) -> bool {
    let backend = match SonarrBackend::new(settings) {
        Ok(backend) => backend,
        Err(e) => {
            report::fatal(&e.to_string());
            return false;
        }
    };
    let options = sync_options(
        settings,
        series::DEFAULT_BATCH_SIZE,
        series::DEFAULT_BATCH_DELAY_SECS,
        dry_run,
    );
    run_backend(&backend, settings, &options).await
}

fn sync_options(
    settings: &BackendSettings,
    default_batch_size: usize,
    default_delay_secs: u64,
    dry_run: bool,
) -> SyncOptions {
    SyncOptions {
        batch_size: settings.batch_size.unwrap_or(default_batch_size),
        batch_delay: Duration::from_secs(settings.batch_delay_secs.unwrap_or(default_delay_secs)),
        dry_run,
    }
}

/// Scan the source directory and drive one backend run to completion.
/// Returns false on a fatal failure (unreadable source, snapshot failure).
async fn run_backend<B: Backend>(
    backend: &B,
    settings: &BackendSettings,
    options: &SyncOptions,
) -> bool {
    let folders = match scan_media_folders(&settings.source_dir) {
        Ok(folders) => folders,
        Err(e) => {
            report::fatal(&format!(
                "Could not list {}: {e}",
                settings.source_dir.display()
            ));
            return false;
        }
    };

    report::run_header(backend.name(), folders.len(), options.batch_size, options.dry_run);

    match run_sync(backend, &folders, options, report::render_event).await {
        Ok(summary) => {
            report::run_summary(backend.name(), &summary);
            true
        }
        Err(e) => {
            report::fatal(&format!("{}: {e}", backend.name()));
            false
        }
    }
}
