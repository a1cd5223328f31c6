//! User playlists keyed by a normalized name.
//!
//! A playlist is looked up by [`PlaylistKey`], derived from whatever name
//! the caller typed. "My List", "my_list" and "MY---LIST!" all refer to the
//! same playlist. Playlists hold video IDs only; video details are read
//! from the catalog when a playlist is shown.

use std::fmt;

use crate::catalog::{Catalog, Video, VideoId};
use crate::errors::PlayerError;

/// Collapses every run of non-ASCII-alphanumeric characters into one `_`
/// and drops separators at either end. Case is preserved.
pub fn collapse_name(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Lookup identifier: the collapsed name, lower-cased.
pub fn normalize_name(name: &str) -> String {
    collapse_name(name).to_ascii_lowercase()
}

/// Store key for a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistKey(String);

impl PlaylistKey {
    /// Derives the key for a user-supplied playlist name.
    pub fn from_name(name: &str) -> Self {
        Self(normalize_name(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered list of unique video IDs with a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    key: PlaylistKey,
    display_name: String,
    video_ids: Vec<VideoId>,
}

impl Playlist {
    /// Creates an empty playlist. The display name keeps the caller's
    /// casing with separator runs collapsed.
    pub fn new(name: &str) -> Self {
        Self {
            key: PlaylistKey::from_name(name),
            display_name: collapse_name(name),
            video_ids: Vec::new(),
        }
    }

    /// Appends a video.
    ///
    /// # Errors
    /// - `PlayerError::AlreadyInPlaylist` - Video is already listed
    /// - `PlayerError::VideoFlagged` - Video is flagged
    pub fn add_video(&mut self, video: &Video) -> Result<(), PlayerError> {
        if self.contains(video.id()) {
            return Err(PlayerError::AlreadyInPlaylist {
                video_id: video.id().clone(),
            });
        }
        video.ensure_allowed()?;
        self.video_ids.push(video.id().clone());
        Ok(())
    }

    /// Removes a listed video.
    ///
    /// # Errors
    /// - `PlayerError::NotInPlaylist` - Video is not listed
    pub fn remove_video(&mut self, video_id: &VideoId) -> Result<(), PlayerError> {
        let position = self
            .video_ids
            .iter()
            .position(|id| id == video_id)
            .ok_or_else(|| PlayerError::NotInPlaylist {
                video_id: video_id.clone(),
            })?;
        self.video_ids.remove(position);
        Ok(())
    }

    /// Removes every video, keeping the playlist itself.
    pub fn clear(&mut self) {
        self.video_ids.clear();
    }

    pub fn contains(&self, video_id: &VideoId) -> bool {
        self.video_ids.contains(video_id)
    }

    // Getters
    pub fn key(&self) -> &PlaylistKey {
        &self.key
    }
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
    pub fn video_ids(&self) -> &[VideoId] {
        &self.video_ids
    }
    pub fn len(&self) -> usize {
        self.video_ids.len()
    }
    pub fn is_empty(&self) -> bool {
        self.video_ids.is_empty()
    }
}

/// Owns every playlist of the session, in creation order.
#[derive(Debug, Clone, Default)]
pub struct PlaylistStore {
    playlists: Vec<Playlist>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty playlist.
    ///
    /// # Errors
    /// - `PlayerError::DuplicatePlaylist` - A playlist with the same key exists
    pub fn create(&mut self, name: &str) -> Result<&Playlist, PlayerError> {
        let playlist = Playlist::new(name);
        if self.position(playlist.key()).is_some() {
            return Err(PlayerError::DuplicatePlaylist {
                name: name.to_string(),
            });
        }
        self.playlists.push(playlist);
        Ok(&self.playlists[self.playlists.len() - 1])
    }

    /// Finds a playlist by any spelling of its name.
    ///
    /// # Errors
    /// - `PlayerError::PlaylistNotFound` - No playlist has this key
    pub fn find(&self, name: &str) -> Result<&Playlist, PlayerError> {
        let slot = self.slot(name)?;
        Ok(&self.playlists[slot])
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Playlist, PlayerError> {
        let slot = self.slot(name)?;
        Ok(&mut self.playlists[slot])
    }

    /// Adds a catalog video to a playlist and returns it.
    ///
    /// Checks run in a fixed order, and the first failure wins.
    ///
    /// # Errors
    /// - `PlayerError::PlaylistNotFound` - No playlist has this name
    /// - `PlayerError::VideoNotFound` - Catalog has no such video
    /// - `PlayerError::AlreadyInPlaylist` - Video is already listed
    /// - `PlayerError::VideoFlagged` - Video is flagged
    pub fn add_video<'c>(
        &mut self,
        name: &str,
        video_id: &str,
        catalog: &'c Catalog,
    ) -> Result<&'c Video, PlayerError> {
        let playlist = self.find_mut(name)?;
        let video = catalog.get(video_id)?;
        playlist.add_video(video)?;
        Ok(video)
    }

    /// Removes a video from a playlist and returns it.
    ///
    /// # Errors
    /// - `PlayerError::PlaylistNotFound` - No playlist has this name
    /// - `PlayerError::VideoNotFound` - Catalog has no such video
    /// - `PlayerError::NotInPlaylist` - Video is not listed
    pub fn remove_video<'c>(
        &mut self,
        name: &str,
        video_id: &str,
        catalog: &'c Catalog,
    ) -> Result<&'c Video, PlayerError> {
        let playlist = self.find_mut(name)?;
        let video = catalog.get(video_id)?;
        playlist.remove_video(video.id())?;
        Ok(video)
    }

    /// Empties a playlist.
    ///
    /// # Errors
    /// - `PlayerError::PlaylistNotFound` - No playlist has this name
    pub fn clear(&mut self, name: &str) -> Result<(), PlayerError> {
        self.find_mut(name)?.clear();
        Ok(())
    }

    /// Removes a playlist entirely and hands it back.
    ///
    /// # Errors
    /// - `PlayerError::PlaylistNotFound` - No playlist has this name
    pub fn delete(&mut self, name: &str) -> Result<Playlist, PlayerError> {
        let slot = self.slot(name)?;
        Ok(self.playlists.remove(slot))
    }

    /// Playlists in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    fn slot(&self, name: &str) -> Result<usize, PlayerError> {
        self.position(&PlaylistKey::from_name(name))
            .ok_or_else(|| PlayerError::PlaylistNotFound {
                name: name.to_string(),
            })
    }

    fn position(&self, key: &PlaylistKey) -> Option<usize> {
        self.playlists.iter().position(|p| p.key() == key)
    }
}
