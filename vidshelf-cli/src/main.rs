//! Vidshelf CLI - Interactive video player
//!
//! Loads a catalog, then reads player commands from stdin or a script.

mod commands;
mod render;
mod repl;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use vidshelf_core::tracing_setup::{CliLogLevel, init_tracing};
use vidshelf_core::{Catalog, VidshelfConfig, VidshelfError, VideoPlayer};

#[derive(Parser)]
#[command(name = "vidshelf")]
#[command(about = "Video catalog with playback, playlists and moderation")]
#[command(version)]
struct Cli {
    /// Catalog file: `title | id | tags` lines, or a JSON array
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Seed for PLAY_RANDOM, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Console log level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Directory for the full debug log
    #[arg(long)]
    logs_dir: Option<PathBuf>,

    /// Replay commands from a file instead of reading stdin
    #[arg(short, long)]
    script: Option<PathBuf>,
}

impl Cli {
    /// Layers command-line flags over the environment-derived config.
    fn apply(&self, mut config: VidshelfConfig) -> VidshelfConfig {
        if let Some(path) = &self.catalog {
            config.catalog.source = Some(path.clone());
        }
        if let Some(seed) = self.seed {
            config.playback.random_seed = Some(seed);
        }
        if let Some(level) = self.log_level {
            config.logging.console_level = level.as_tracing_level();
        }
        if let Some(dir) = &self.logs_dir {
            config.logging.logs_dir = dir.clone();
        }
        config
    }
}

fn load_catalog(config: &VidshelfConfig) -> vidshelf_core::Result<Catalog> {
    match &config.catalog.source {
        Some(path) => Ok(Catalog::load(path)?),
        None => {
            tracing::info!("No catalog configured, using the sample library");
            Ok(Catalog::sample())
        }
    }
}

fn open_script(path: &Path) -> vidshelf_core::Result<BufReader<File>> {
    let file = File::open(path)?;
    tracing::debug!("Replaying commands from {}", path.display());
    Ok(BufReader::new(file))
}

/// Wraps a startup error so the user-facing message leads the report.
fn report(e: VidshelfError) -> anyhow::Error {
    let message = e.user_message();
    anyhow::Error::new(e).context(message)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(VidshelfConfig::from_env().map_err(report)?);

    init_tracing(config.logging.console_level, &config.logging.logs_dir)
        .map_err(report)
        .context("Failed to initialize logging")?;

    let catalog = load_catalog(&config).map_err(report)?;
    let mut player = VideoPlayer::new(catalog, &config.playback);

    match &cli.script {
        Some(path) => {
            let script = open_script(path)
                .map_err(report)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            repl::run(&mut player, script, io::stdout().lock())?;
        }
        None => repl::run(&mut player, io::stdin().lock(), io::stdout().lock())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_environment_config() {
        let cli = Cli::parse_from([
            "vidshelf",
            "--catalog",
            "videos.json",
            "--seed",
            "9",
            "--log-level",
            "debug",
        ]);
        let config = cli.apply(VidshelfConfig::for_testing());

        assert_eq!(config.catalog.source, Some(PathBuf::from("videos.json")));
        assert_eq!(config.playback.random_seed, Some(9));
        assert_eq!(config.logging.console_level, tracing::Level::DEBUG);
        assert_eq!(config.logging.logs_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_missing_script_reports_file_system_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_script(&dir.path().join("missing.txt")).unwrap_err();

        assert!(matches!(err, VidshelfError::Io(_)));
        let rendered = format!("{:#}", report(err));
        assert!(rendered.starts_with("File system error occurred: I/O error:"));
    }

    #[test]
    fn test_sample_library_without_catalog_flag() {
        let config = VidshelfConfig::for_testing();
        assert_eq!(load_catalog(&config).unwrap().len(), 5);
    }
}
