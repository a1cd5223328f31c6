//! The video player: one catalog, one playlist store, one playback slot.
//!
//! [`VideoPlayer`] is the only place where the three interact. It is what
//! stops a video that gets flagged, refuses to play or list flagged
//! videos, and resolves playlist entries back to catalog videos.
//!
//! Every command returns `Result<_, PlayerError>`. On `Err` nothing has
//! changed. Successful commands return owned snapshots where they mutate
//! the player, so callers can render them without holding a borrow.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{Catalog, Video, VideoId};
use crate::config::PlaybackConfig;
use crate::errors::PlayerError;
use crate::playback::{PlaybackSession, PlaybackState};
use crate::playlist::{Playlist, PlaylistStore};
use crate::search::{self, SearchField, SearchResults};

/// Result of starting a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayTransition {
    /// Video that was loaded before and got stopped to make room.
    pub stopped: Option<Video>,
    pub started: Video,
}

/// Result of flagging or unflagging a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moderation {
    /// Set when the moderated video was loaded and had to be stopped.
    pub stopped: Option<Video>,
    /// The video after the change.
    pub video: Video,
}

/// What the player is showing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NowPlaying<'a> {
    pub video: &'a Video,
    pub paused: bool,
}

/// A playlist with its entries resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistView<'a> {
    pub playlist: &'a Playlist,
    pub videos: Vec<&'a Video>,
}

/// Single-session video player.
///
/// Not synchronized; wrap it in a lock if several threads need it.
#[derive(Debug)]
pub struct VideoPlayer {
    catalog: Catalog,
    playlists: PlaylistStore,
    session: PlaybackSession,
    rng: StdRng,
}

impl VideoPlayer {
    /// Creates a player over a loaded catalog.
    pub fn new(catalog: Catalog, config: &PlaybackConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        tracing::debug!(
            "Player created with {} videos (seeded: {})",
            catalog.len(),
            config.random_seed.is_some()
        );
        Self {
            catalog,
            playlists: PlaylistStore::new(),
            session: PlaybackSession::new(),
            rng,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn playback_state(&self) -> &PlaybackState {
        self.session.state()
    }

    pub fn number_of_videos(&self) -> usize {
        self.catalog.len()
    }

    /// Every video in title order, flagged ones included.
    pub fn list_videos(&self) -> Vec<&Video> {
        self.catalog.sorted_by_title()
    }

    /// Plays a video, stopping whatever was loaded.
    ///
    /// # Errors
    /// - `PlayerError::VideoNotFound` - No video has this ID
    /// - `PlayerError::VideoFlagged` - Video is flagged
    pub fn play(&mut self, video_id: &str) -> Result<PlayTransition, PlayerError> {
        let video = self.catalog.get(video_id)?;
        video.ensure_allowed().inspect_err(|e| {
            tracing::debug!("Refusing to play {}: {}", video_id, e);
        })?;

        let started = video.clone();
        let stopped = match self.session.state().current() {
            Some(previous) => Some(self.snapshot(previous)?),
            None => None,
        };
        self.session.start(started.id().clone());

        tracing::info!("Playing {}", started.id());
        Ok(PlayTransition { stopped, started })
    }

    /// Stops the loaded video.
    ///
    /// # Errors
    /// - `PlayerError::NothingPlaying` - Nothing is loaded
    pub fn stop(&mut self) -> Result<Video, PlayerError> {
        let video_id = self.session.stop()?;
        tracing::info!("Stopped {}", video_id);
        self.snapshot(&video_id)
    }

    /// Plays a uniformly chosen unflagged video.
    ///
    /// # Errors
    /// - `PlayerError::NoVideosAvailable` - Every video is flagged, or the catalog is empty
    pub fn play_random(&mut self) -> Result<PlayTransition, PlayerError> {
        let candidates = self.catalog.unflagged();
        if candidates.is_empty() {
            return Err(PlayerError::NoVideosAvailable);
        }
        let chosen = candidates[self.rng.random_range(0..candidates.len())]
            .id()
            .clone();
        tracing::debug!("Random pick among {} videos: {}", candidates.len(), chosen);
        self.play(chosen.as_str())
    }

    /// Pauses the loaded video.
    ///
    /// # Errors
    /// - `PlayerError::NothingPlaying` - Nothing is loaded
    /// - `PlayerError::AlreadyPaused` - Loaded video is paused already
    pub fn pause(&mut self) -> Result<&Video, PlayerError> {
        let video_id = self.session.pause()?;
        tracing::info!("Paused {}", video_id);
        self.catalog.get(video_id.as_str())
    }

    /// Resumes the paused video.
    ///
    /// # Errors
    /// - `PlayerError::NothingPlaying` - Nothing is loaded
    /// - `PlayerError::NotPaused` - Loaded video is not paused
    pub fn resume(&mut self) -> Result<&Video, PlayerError> {
        let video_id = self.session.resume()?;
        tracing::info!("Resumed {}", video_id);
        self.catalog.get(video_id.as_str())
    }

    /// The loaded video, if any.
    pub fn now_playing(&self) -> Option<NowPlaying<'_>> {
        let state = self.session.state();
        let video = self.catalog.get(state.current()?.as_str()).ok()?;
        Some(NowPlaying {
            video,
            paused: state.is_paused(),
        })
    }

    /// # Errors
    /// - `PlayerError::DuplicatePlaylist` - Name collides with an existing playlist
    pub fn create_playlist(&mut self, name: &str) -> Result<&Playlist, PlayerError> {
        let playlist = self.playlists.create(name)?;
        tracing::info!("Created playlist {}", playlist.key());
        Ok(playlist)
    }

    /// Appends a video to a playlist and returns the video.
    ///
    /// # Errors
    /// - `PlayerError::PlaylistNotFound` - No playlist has this name
    /// - `PlayerError::VideoNotFound` - No video has this ID
    /// - `PlayerError::AlreadyInPlaylist` - Video is already listed
    /// - `PlayerError::VideoFlagged` - Video is flagged
    pub fn add_to_playlist(&mut self, name: &str, video_id: &str) -> Result<&Video, PlayerError> {
        self.playlists.add_video(name, video_id, &self.catalog)
    }

    /// Removes a video from a playlist and returns the video.
    ///
    /// # Errors
    /// - `PlayerError::PlaylistNotFound` - No playlist has this name
    /// - `PlayerError::VideoNotFound` - No video has this ID
    /// - `PlayerError::NotInPlaylist` - Video is not listed
    pub fn remove_from_playlist(
        &mut self,
        name: &str,
        video_id: &str,
    ) -> Result<&Video, PlayerError> {
        self.playlists.remove_video(name, video_id, &self.catalog)
    }

    /// # Errors
    /// - `PlayerError::PlaylistNotFound` - No playlist has this name
    pub fn clear_playlist(&mut self, name: &str) -> Result<(), PlayerError> {
        self.playlists.clear(name)
    }

    /// # Errors
    /// - `PlayerError::PlaylistNotFound` - No playlist has this name
    pub fn delete_playlist(&mut self, name: &str) -> Result<Playlist, PlayerError> {
        let playlist = self.playlists.delete(name)?;
        tracing::info!("Deleted playlist {}", playlist.key());
        Ok(playlist)
    }

    /// Resolves a playlist's entries to catalog videos, in playlist order.
    ///
    /// # Errors
    /// - `PlayerError::PlaylistNotFound` - No playlist has this name
    pub fn show_playlist(&self, name: &str) -> Result<PlaylistView<'_>, PlayerError> {
        let playlist = self.playlists.find(name)?;
        let videos = playlist
            .video_ids()
            .iter()
            .map(|id| self.catalog.get(id.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PlaylistView { playlist, videos })
    }

    /// Playlists in creation order.
    pub fn show_all_playlists(&self) -> Vec<&Playlist> {
        self.playlists.iter().collect()
    }

    /// # Errors
    /// - `PlayerError::NoResults` - Nothing matched
    pub fn search(&self, term: &str) -> Result<SearchResults, PlayerError> {
        search::search_catalog(&self.catalog, term, SearchField::Title)
    }

    /// # Errors
    /// - `PlayerError::NoResults` - Nothing matched
    pub fn search_by_tag(&self, tag: &str) -> Result<SearchResults, PlayerError> {
        search::search_catalog(&self.catalog, tag, SearchField::Tag)
    }

    /// Plays the search match picked by `answer`. Returns `None` when the
    /// answer does not select a match.
    ///
    /// # Errors
    /// - `PlayerError::VideoFlagged` - Match was flagged after the search ran
    pub fn play_selection(
        &mut self,
        results: &SearchResults,
        answer: &str,
    ) -> Result<Option<PlayTransition>, PlayerError> {
        match results.select(answer) {
            Some(video) => self.play(video.id().as_str()).map(Some),
            None => {
                tracing::debug!("No search selection for answer '{}'", answer);
                Ok(None)
            }
        }
    }

    /// Flags a video, stopping it first if it is loaded. An empty reason
    /// is stored as-is.
    ///
    /// # Errors
    /// - `PlayerError::VideoNotFound` - No video has this ID
    /// - `PlayerError::AlreadyFlagged` - Video is flagged already
    pub fn flag(&mut self, video_id: &str, reason: Option<&str>) -> Result<Moderation, PlayerError> {
        let mut video = self.catalog.get(video_id)?.clone();
        video.flag(reason.unwrap_or_default())?;

        let stopped = self.stop_if_loaded(video.id())?;
        *self.catalog.get_mut(video_id)? = video.clone();
        tracing::info!("Flagged {}", video.id());
        Ok(Moderation { stopped, video })
    }

    /// Lifts a flag, stopping the video first if it is loaded.
    ///
    /// # Errors
    /// - `PlayerError::VideoNotFound` - No video has this ID
    /// - `PlayerError::NotFlagged` - Video is not flagged
    pub fn unflag(&mut self, video_id: &str) -> Result<Moderation, PlayerError> {
        let mut video = self.catalog.get(video_id)?.clone();
        video.unflag()?;

        let stopped = self.stop_if_loaded(video.id())?;
        *self.catalog.get_mut(video_id)? = video.clone();
        tracing::info!("Unflagged {}", video.id());
        Ok(Moderation { stopped, video })
    }

    /// Snapshots the loaded video before stopping it.
    fn stop_if_loaded(&mut self, video_id: &VideoId) -> Result<Option<Video>, PlayerError> {
        if self.session.state().current() != Some(video_id) {
            return Ok(None);
        }
        let stopped = self.snapshot(video_id)?;
        self.session.stop_if_current(video_id);
        Ok(Some(stopped))
    }

    fn snapshot(&self, video_id: &VideoId) -> Result<Video, PlayerError> {
        self.catalog.get(video_id.as_str()).cloned()
    }
}
