//! Vidshelf Core - In-memory video catalog with playback and playlists
//!
//! This crate holds all mutable state of a vidshelf session: the video
//! catalog with its moderation flags, user playlists, and the single
//! playback slot. [`VideoPlayer`] enforces the rules between them.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod playback;
pub mod player;
pub mod playlist;
pub mod search;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use catalog::{Catalog, CatalogLoadError, Video, VideoId};
pub use config::VidshelfConfig;
pub use errors::PlayerError;
pub use playback::{PlaybackSession, PlaybackState};
pub use player::{Moderation, NowPlaying, PlayTransition, PlaylistView, VideoPlayer};
pub use playlist::{Playlist, PlaylistKey, PlaylistStore};
pub use search::{SearchField, SearchResults};

/// Errors that can stop a vidshelf session from starting.
///
/// Command failures never surface here; those are [`PlayerError`] values
/// returned by the individual [`VideoPlayer`] operations.
#[derive(Debug, thiserror::Error)]
pub enum VidshelfError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogLoadError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VidshelfError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            VidshelfError::Catalog(e) => match e {
                CatalogLoadError::MalformedLine { line, .. } => {
                    format!("Catalog line {line} is not of the form 'title | id | tags'")
                }
                CatalogLoadError::DuplicateId { video_id } => {
                    format!("Catalog lists video {video_id} more than once")
                }
                CatalogLoadError::InvalidJson(_) => "Catalog JSON could not be decoded".to_string(),
                CatalogLoadError::Io { path, .. } => {
                    format!("Could not read catalog file {}", path.display())
                }
            },
            VidshelfError::Configuration { reason } => format!("Invalid configuration: {reason}"),
            VidshelfError::Io(_) => "File system error occurred".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VidshelfError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_user_message_names_offending_line() {
        let err = VidshelfError::from(CatalogLoadError::MalformedLine {
            line: 3,
            content: "just a title".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "Catalog line 3 is not of the form 'title | id | tags'"
        );
    }

    #[test]
    fn test_user_message_for_unreadable_catalog() {
        let err = VidshelfError::from(CatalogLoadError::Io {
            path: PathBuf::from("/missing/videos.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        });
        assert_eq!(
            err.user_message(),
            "Could not read catalog file /missing/videos.txt"
        );
    }
}
