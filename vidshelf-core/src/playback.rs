//! The single playback slot.
//!
//! ```text
//!            play            pause
//!   Idle ----------> Playing -------> Paused
//!    ^  <----------    |  <-----------  |
//!    |      stop       |     resume     |
//!    +-----------------+----------------+
//!                   stop
//! ```
//!
//! Starting a video while another one is loaded replaces it; the previous
//! video is reported back so callers can announce that it was stopped.

use std::fmt;

use crate::catalog::VideoId;
use crate::errors::PlayerError;

/// Snapshot of what is loaded in the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(VideoId),
    Paused(VideoId),
}

impl PlaybackState {
    /// The loaded video, playing or paused.
    pub fn current(&self) -> Option<&VideoId> {
        match self {
            PlaybackState::Idle => None,
            PlaybackState::Playing(id) | PlaybackState::Paused(id) => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PlaybackState::Idle)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Paused(_))
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "Idle"),
            PlaybackState::Playing(id) => write!(f, "Playing {id}"),
            PlaybackState::Paused(id) => write!(f, "Paused {id}"),
        }
    }
}

/// Playback state machine. Knows nothing about the catalog; callers decide
/// whether a video may be played before calling [`PlaybackSession::start`].
#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    state: PlaybackState,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Loads a video in the playing state, returning the video it replaced.
    pub fn start(&mut self, video_id: VideoId) -> Option<VideoId> {
        let previous = std::mem::replace(&mut self.state, PlaybackState::Playing(video_id));
        match previous {
            PlaybackState::Idle => None,
            PlaybackState::Playing(id) | PlaybackState::Paused(id) => Some(id),
        }
    }

    /// Unloads the current video and returns it.
    ///
    /// # Errors
    /// - `PlayerError::NothingPlaying` - Session is idle
    pub fn stop(&mut self) -> Result<VideoId, PlayerError> {
        match std::mem::take(&mut self.state) {
            PlaybackState::Idle => Err(PlayerError::NothingPlaying),
            PlaybackState::Playing(id) | PlaybackState::Paused(id) => Ok(id),
        }
    }

    /// Pauses the current video.
    ///
    /// # Errors
    /// - `PlayerError::NothingPlaying` - Session is idle
    /// - `PlayerError::AlreadyPaused` - Current video is paused already
    pub fn pause(&mut self) -> Result<VideoId, PlayerError> {
        match &self.state {
            PlaybackState::Idle => Err(PlayerError::NothingPlaying),
            PlaybackState::Paused(id) => Err(PlayerError::AlreadyPaused {
                video_id: id.clone(),
            }),
            PlaybackState::Playing(id) => {
                let id = id.clone();
                self.state = PlaybackState::Paused(id.clone());
                Ok(id)
            }
        }
    }

    /// Resumes a paused video.
    ///
    /// # Errors
    /// - `PlayerError::NothingPlaying` - Session is idle
    /// - `PlayerError::NotPaused` - Current video is already playing
    pub fn resume(&mut self) -> Result<VideoId, PlayerError> {
        match &self.state {
            PlaybackState::Idle => Err(PlayerError::NothingPlaying),
            PlaybackState::Playing(id) => Err(PlayerError::NotPaused {
                video_id: id.clone(),
            }),
            PlaybackState::Paused(id) => {
                let id = id.clone();
                self.state = PlaybackState::Playing(id.clone());
                Ok(id)
            }
        }
    }

    /// Stops playback only if `video_id` is the loaded video.
    pub fn stop_if_current(&mut self, video_id: &VideoId) -> Option<VideoId> {
        if self.state.current() == Some(video_id) {
            self.stop().ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> VideoId {
        VideoId::from(raw)
    }

    #[test]
    fn test_start_from_idle() {
        let mut session = PlaybackSession::new();
        assert_eq!(session.start(id("a")), None);
        assert_eq!(session.state(), &PlaybackState::Playing(id("a")));
    }

    #[test]
    fn test_start_replaces_paused_video() {
        let mut session = PlaybackSession::new();
        session.start(id("a"));
        session.pause().unwrap();

        assert_eq!(session.start(id("b")), Some(id("a")));
        // The new video never inherits the paused flag.
        assert_eq!(session.state(), &PlaybackState::Playing(id("b")));
    }

    #[test]
    fn test_stop_on_idle_reports_nothing_playing() {
        let mut session = PlaybackSession::new();
        assert_eq!(session.stop(), Err(PlayerError::NothingPlaying));
        assert!(session.state().is_idle());
    }

    #[test]
    fn test_stop_clears_paused_state() {
        let mut session = PlaybackSession::new();
        session.start(id("a"));
        session.pause().unwrap();
        assert_eq!(session.stop(), Ok(id("a")));
        assert_eq!(session.state(), &PlaybackState::Idle);
    }

    #[test]
    fn test_pause_resume_round_trip() {
        let mut session = PlaybackSession::new();
        session.start(id("a"));

        assert_eq!(session.pause(), Ok(id("a")));
        assert_eq!(
            session.pause(),
            Err(PlayerError::AlreadyPaused { video_id: id("a") })
        );
        assert!(session.state().is_paused());

        assert_eq!(session.resume(), Ok(id("a")));
        assert_eq!(
            session.resume(),
            Err(PlayerError::NotPaused { video_id: id("a") })
        );
        assert_eq!(session.state(), &PlaybackState::Playing(id("a")));
    }

    #[test]
    fn test_pause_and_resume_need_a_video() {
        let mut session = PlaybackSession::new();
        assert_eq!(session.pause(), Err(PlayerError::NothingPlaying));
        assert_eq!(session.resume(), Err(PlayerError::NothingPlaying));
    }

    #[test]
    fn test_stop_if_current_ignores_other_videos() {
        let mut session = PlaybackSession::new();
        session.start(id("a"));
        assert_eq!(session.stop_if_current(&id("b")), None);
        assert_eq!(session.state().current(), Some(&id("a")));
        assert_eq!(session.stop_if_current(&id("a")), Some(id("a")));
        assert!(session.state().is_idle());
    }
}
