//! Failure taxonomy for player commands.
//!
//! Every command on [`crate::VideoPlayer`] either succeeds or returns one of
//! these variants. None of them are fatal: the session keeps running and
//! the player state is left exactly as it was before the failed call.

use crate::catalog::{VideoId, display_reason};

/// A recoverable, user-visible reason why a command was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error("Video does not exist")]
    VideoNotFound { video_id: VideoId },

    #[error("Playlist does not exist")]
    PlaylistNotFound { name: String },

    #[error("A playlist with the same name already exists")]
    DuplicatePlaylist { name: String },

    #[error("Video is already flagged")]
    AlreadyFlagged { video_id: VideoId },

    #[error("Video is not flagged")]
    NotFlagged { video_id: VideoId },

    #[error("Video already added")]
    AlreadyInPlaylist { video_id: VideoId },

    #[error("Video is not in playlist")]
    NotInPlaylist { video_id: VideoId },

    #[error("Video is currently flagged (reason: {})", display_reason(.reason))]
    VideoFlagged { video_id: VideoId, reason: String },

    #[error("No video is currently playing")]
    NothingPlaying,

    #[error("Video already paused")]
    AlreadyPaused { video_id: VideoId },

    #[error("Video is not paused")]
    NotPaused { video_id: VideoId },

    #[error("No videos available")]
    NoVideosAvailable,

    #[error("No search results for {term}")]
    NoResults { term: String },
}
