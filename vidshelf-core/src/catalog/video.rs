//! Video entity and its moderation state.

use std::borrow::Borrow;
use std::fmt;

use serde::Deserialize;

use crate::errors::PlayerError;

/// Shown in place of a flag reason when none was given.
pub const UNSPECIFIED_REASON: &str = "Not supplied";

/// Returns the flag reason to show a user, substituting a placeholder for
/// an empty one. The stored reason is never rewritten.
pub fn display_reason(reason: &str) -> &str {
    if reason.is_empty() {
        UNSPECIFIED_REASON
    } else {
        reason
    }
}

/// Unique, immutable identifier of a catalog video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Creates a video ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for VideoId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VideoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VideoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Moderation status of a video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum FlagStatus {
    #[default]
    Allowed,
    /// Hidden from playback, playlists and search. The reason may be empty.
    Flagged { reason: String },
}

/// A catalog entry.
///
/// Identity, title and tags never change after load. The flag status is
/// only mutated through [`crate::VideoPlayer`], which keeps it consistent
/// with the playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    id: VideoId,
    title: String,
    tags: Vec<String>,
    status: FlagStatus,
}

impl Video {
    /// Creates an unflagged video.
    pub fn new(id: impl Into<VideoId>, title: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags,
            status: FlagStatus::Allowed,
        }
    }

    /// Marks the video as flagged.
    ///
    /// # Errors
    /// - `PlayerError::AlreadyFlagged` - Video carries a flag already
    pub fn flag(&mut self, reason: impl Into<String>) -> Result<(), PlayerError> {
        if self.is_flagged() {
            return Err(PlayerError::AlreadyFlagged {
                video_id: self.id.clone(),
            });
        }
        self.status = FlagStatus::Flagged {
            reason: reason.into(),
        };
        Ok(())
    }

    /// Removes the flag and its reason.
    ///
    /// # Errors
    /// - `PlayerError::NotFlagged` - Video is not flagged
    pub fn unflag(&mut self) -> Result<(), PlayerError> {
        if !self.is_flagged() {
            return Err(PlayerError::NotFlagged {
                video_id: self.id.clone(),
            });
        }
        self.status = FlagStatus::Allowed;
        Ok(())
    }

    /// Rejects flagged videos for playback or playlist use.
    ///
    /// # Errors
    /// - `PlayerError::VideoFlagged` - Video is flagged, carrying its reason
    pub fn ensure_allowed(&self) -> Result<(), PlayerError> {
        match &self.status {
            FlagStatus::Allowed => Ok(()),
            FlagStatus::Flagged { reason } => Err(PlayerError::VideoFlagged {
                video_id: self.id.clone(),
                reason: reason.clone(),
            }),
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self.status, FlagStatus::Flagged { .. })
    }

    /// Stored flag reason, `None` when the video is not flagged.
    pub fn flag_reason(&self) -> Option<&str> {
        match &self.status {
            FlagStatus::Allowed => None,
            FlagStatus::Flagged { reason } => Some(reason),
        }
    }

    // Getters
    pub fn id(&self) -> &VideoId {
        &self.id
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}
