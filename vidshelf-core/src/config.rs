//! Centralized configuration for vidshelf.
//!
//! Defaults live here; the environment and command-line flags override
//! them in that order.

use std::path::PathBuf;

use tracing::Level;

use crate::{Result, VidshelfError};

/// Central configuration for a vidshelf session.
#[derive(Debug, Clone, Default)]
pub struct VidshelfConfig {
    pub catalog: CatalogConfig,
    pub playback: PlaybackConfig,
    pub logging: LoggingConfig,
}

/// Where the video catalog comes from.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// Catalog file to load (None = bundled sample library)
    pub source: Option<PathBuf>,
}

/// Playback behavior settings.
#[derive(Debug, Clone, Default)]
pub struct PlaybackConfig {
    /// Seed for random video selection (None = seeded from the OS)
    pub random_seed: Option<u64>,
}

/// Log output settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory for the full debug log of the last run
    pub logs_dir: PathBuf,
    /// Level shown on the console
    pub console_level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
            console_level: Level::WARN, // Keep the console for command output
        }
    }
}

impl VidshelfConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Blank paths are ignored and the default is kept.
    ///
    /// # Errors
    /// - `VidshelfError::Configuration` - `VIDSHELF_RANDOM_SEED` is not an unsigned integer
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("VIDSHELF_CATALOG")
            && !path.trim().is_empty()
        {
            config.catalog.source = Some(PathBuf::from(path));
        }

        if let Ok(seed) = std::env::var("VIDSHELF_RANDOM_SEED") {
            let seed_value = seed.trim().parse::<u64>().map_err(|_| {
                VidshelfError::Configuration {
                    reason: format!("VIDSHELF_RANDOM_SEED must be an unsigned integer, got '{seed}'"),
                }
            })?;
            config.playback.random_seed = Some(seed_value);
        }

        if let Ok(dir) = std::env::var("VIDSHELF_LOGS_DIR")
            && !dir.trim().is_empty()
        {
            config.logging.logs_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Creates a configuration for reproducible tests.
    pub fn for_testing() -> Self {
        Self {
            playback: PlaybackConfig {
                random_seed: Some(42), // Fixed seed for reproducible tests
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = VidshelfConfig::default();

        assert_eq!(config.catalog.source, None);
        assert_eq!(config.playback.random_seed, None);
        assert_eq!(config.logging.logs_dir, PathBuf::from("logs"));
        assert_eq!(config.logging.console_level, Level::WARN);
    }

    #[test]
    fn test_testing_preset_is_seeded() {
        let config = VidshelfConfig::for_testing();
        assert_eq!(config.playback.random_seed, Some(42));
        assert_eq!(config.catalog.source, None);
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("VIDSHELF_CATALOG", "/srv/videos.txt");
            std::env::set_var("VIDSHELF_RANDOM_SEED", "12345");
            std::env::set_var("VIDSHELF_LOGS_DIR", "/tmp/vidshelf-logs");
        }

        let config = VidshelfConfig::from_env().unwrap();

        assert_eq!(
            config.catalog.source,
            Some(PathBuf::from("/srv/videos.txt"))
        );
        assert_eq!(config.playback.random_seed, Some(12345));
        assert_eq!(config.logging.logs_dir, PathBuf::from("/tmp/vidshelf-logs"));

        unsafe {
            std::env::set_var("VIDSHELF_RANDOM_SEED", "not-a-number");
        }
        let err = VidshelfConfig::from_env().unwrap_err();
        assert!(matches!(err, VidshelfError::Configuration { .. }));
        assert_eq!(
            err.user_message(),
            "Invalid configuration: VIDSHELF_RANDOM_SEED must be an unsigned integer, got 'not-a-number'"
        );

        // Cleanup
        unsafe {
            std::env::remove_var("VIDSHELF_CATALOG");
            std::env::remove_var("VIDSHELF_RANDOM_SEED");
            std::env::remove_var("VIDSHELF_LOGS_DIR");
        }
    }
}
