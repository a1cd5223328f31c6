//! Session command parsing and execution

use std::str::FromStr;

use vidshelf_core::{PlayerError, SearchResults, VideoPlayer};

use crate::render;

/// Commands accepted at the prompt. Command words are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NumberOfVideos,
    ShowAllVideos,
    Play { video_id: String },
    Stop,
    PlayRandom,
    Pause,
    Continue,
    ShowPlaying,
    CreatePlaylist { name: String },
    AddToPlaylist { name: String, video_id: String },
    RemoveFromPlaylist { name: String, video_id: String },
    ClearPlaylist { name: String },
    DeletePlaylist { name: String },
    ShowPlaylist { name: String },
    ShowAllPlaylists,
    SearchVideos { term: String },
    SearchVideosWithTag { tag: String },
    FlagVideo { video_id: String, reason: Option<String> },
    AllowVideo { video_id: String },
    Help,
    Exit,
}

/// Why a line could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Please enter a valid command, type HELP for a list of available commands.")]
    Unknown { word: String },

    #[error("Usage: {usage}")]
    Usage { usage: &'static str },

    #[error("Empty command")]
    Empty,
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().ok_or(ParseError::Empty)?;
        let args: Vec<&str> = words.collect();

        let command = match word.to_ascii_uppercase().as_str() {
            "NUMBER_OF_VIDEOS" => Command::NumberOfVideos,
            "SHOW_ALL_VIDEOS" => Command::ShowAllVideos,
            "PLAY" => Command::Play {
                video_id: single(&args, "PLAY <video_id>")?,
            },
            "STOP" => Command::Stop,
            "PLAY_RANDOM" => Command::PlayRandom,
            "PAUSE" => Command::Pause,
            "CONTINUE" => Command::Continue,
            "SHOW_PLAYING" => Command::ShowPlaying,
            "CREATE_PLAYLIST" => Command::CreatePlaylist {
                name: single(&args, "CREATE_PLAYLIST <playlist_name>")?,
            },
            "ADD_TO_PLAYLIST" => {
                let (name, video_id) = pair(&args, "ADD_TO_PLAYLIST <playlist_name> <video_id>")?;
                Command::AddToPlaylist { name, video_id }
            }
            "REMOVE_FROM_PLAYLIST" => {
                let (name, video_id) =
                    pair(&args, "REMOVE_FROM_PLAYLIST <playlist_name> <video_id>")?;
                Command::RemoveFromPlaylist { name, video_id }
            }
            "CLEAR_PLAYLIST" => Command::ClearPlaylist {
                name: single(&args, "CLEAR_PLAYLIST <playlist_name>")?,
            },
            "DELETE_PLAYLIST" => Command::DeletePlaylist {
                name: single(&args, "DELETE_PLAYLIST <playlist_name>")?,
            },
            "SHOW_PLAYLIST" => Command::ShowPlaylist {
                name: single(&args, "SHOW_PLAYLIST <playlist_name>")?,
            },
            "SHOW_ALL_PLAYLISTS" => Command::ShowAllPlaylists,
            "SEARCH_VIDEOS" => Command::SearchVideos {
                term: rest(&args, "SEARCH_VIDEOS <search_term>")?,
            },
            "SEARCH_VIDEOS_WITH_TAG" => Command::SearchVideosWithTag {
                tag: rest(&args, "SEARCH_VIDEOS_WITH_TAG <video_tag>")?,
            },
            "FLAG_VIDEO" => match args.split_first() {
                Some((video_id, reason)) => Command::FlagVideo {
                    video_id: (*video_id).to_string(),
                    reason: (!reason.is_empty()).then(|| reason.join(" ")),
                },
                None => {
                    return Err(ParseError::Usage {
                        usage: "FLAG_VIDEO <video_id> [flag_reason]",
                    });
                }
            },
            "ALLOW_VIDEO" => Command::AllowVideo {
                video_id: single(&args, "ALLOW_VIDEO <video_id>")?,
            },
            "HELP" => Command::Help,
            "EXIT" => Command::Exit,
            _ => {
                return Err(ParseError::Unknown {
                    word: word.to_string(),
                });
            }
        };

        Ok(command)
    }
}

fn single(args: &[&str], usage: &'static str) -> Result<String, ParseError> {
    match args {
        [arg] => Ok((*arg).to_string()),
        _ => Err(ParseError::Usage { usage }),
    }
}

fn pair(args: &[&str], usage: &'static str) -> Result<(String, String), ParseError> {
    match args {
        [first, second] => Ok(((*first).to_string(), (*second).to_string())),
        _ => Err(ParseError::Usage { usage }),
    }
}

fn rest(args: &[&str], usage: &'static str) -> Result<String, ParseError> {
    if args.is_empty() {
        Err(ParseError::Usage { usage })
    } else {
        Ok(args.join(" "))
    }
}

/// What the session loop should do after a command ran.
#[derive(Debug)]
pub enum Response {
    /// Print these lines and carry on.
    Lines(Vec<String>),
    /// Print these lines, then ask the user to pick a match.
    Search {
        lines: Vec<String>,
        results: SearchResults,
    },
    Exit,
}

/// Runs one command against the player.
pub fn handle_command(player: &mut VideoPlayer, command: Command) -> Response {
    tracing::debug!("Handling {:?}", command);

    let lines = match command {
        Command::NumberOfVideos => {
            vec![format!("{} videos in the library", player.number_of_videos())]
        }
        Command::ShowAllVideos => {
            let mut lines = vec!["Here's a list of all available videos:".to_string()];
            lines.extend(player.list_videos().into_iter().map(render::video_detail));
            lines
        }
        Command::Play { video_id } => match player.play(&video_id) {
            Ok(transition) => render::transition(&transition),
            Err(e) => vec![render::failure("Cannot play video", &e)],
        },
        Command::Stop => match player.stop() {
            Ok(video) => vec![render::stopping(&video)],
            Err(e) => vec![render::failure("Cannot stop video", &e)],
        },
        Command::PlayRandom => match player.play_random() {
            Ok(transition) => render::transition(&transition),
            Err(e) => vec![e.to_string()],
        },
        Command::Pause => pause(player),
        Command::Continue => match player.resume() {
            Ok(video) => vec![format!("Continuing video: {}", video.title())],
            Err(e) => vec![render::failure("Cannot continue video", &e)],
        },
        Command::ShowPlaying => match player.now_playing() {
            Some(now) => vec![format!(
                "Currently playing: {}{}",
                render::video_detail(now.video),
                if now.paused { " - PAUSED" } else { "" }
            )],
            None => vec![PlayerError::NothingPlaying.to_string()],
        },
        Command::CreatePlaylist { name } => match player.create_playlist(&name) {
            Ok(playlist) => vec![format!(
                "Successfully created new playlist: {}",
                playlist.display_name()
            )],
            Err(e) => vec![render::failure("Cannot create playlist", &e)],
        },
        Command::AddToPlaylist { name, video_id } => {
            match player.add_to_playlist(&name, &video_id) {
                Ok(video) => vec![format!("Added video to {name}: {}", video.title())],
                Err(e) => vec![render::failure(&format!("Cannot add video to {name}"), &e)],
            }
        }
        Command::RemoveFromPlaylist { name, video_id } => {
            match player.remove_from_playlist(&name, &video_id) {
                Ok(video) => vec![format!("Removed video from {name}: {}", video.title())],
                Err(e) => vec![render::failure(
                    &format!("Cannot remove video from {name}"),
                    &e,
                )],
            }
        }
        Command::ClearPlaylist { name } => match player.clear_playlist(&name) {
            Ok(()) => vec![format!("Successfully removed all videos from {name}")],
            Err(e) => vec![render::failure(&format!("Cannot clear playlist {name}"), &e)],
        },
        Command::DeletePlaylist { name } => match player.delete_playlist(&name) {
            Ok(_) => vec![format!("Deleted playlist: {name}")],
            Err(e) => vec![render::failure(&format!("Cannot delete playlist {name}"), &e)],
        },
        Command::ShowPlaylist { name } => match player.show_playlist(&name) {
            Ok(view) if view.videos.is_empty() => {
                vec![format!("Showing playlist: {name}"), "No videos here yet.".to_string()]
            }
            Ok(view) => {
                let mut lines = vec![format!("Showing playlist: {name}")];
                lines.extend(view.videos.into_iter().map(render::video_detail));
                lines
            }
            Err(e) => vec![render::failure(&format!("Cannot show playlist {name}"), &e)],
        },
        Command::ShowAllPlaylists => {
            let playlists = player.show_all_playlists();
            if playlists.is_empty() {
                vec!["No playlists exist yet".to_string()]
            } else {
                let mut lines = vec!["Showing all playlists:".to_string()];
                lines.extend(playlists.iter().map(|p| p.display_name().to_string()));
                lines
            }
        }
        Command::SearchVideos { term } => return search(player.search(&term)),
        Command::SearchVideosWithTag { tag } => return search(player.search_by_tag(&tag)),
        Command::FlagVideo { video_id, reason } => {
            match player.flag(&video_id, reason.as_deref()) {
                Ok(outcome) => render::flagged(&outcome),
                Err(e) => vec![render::failure("Cannot flag video", &e)],
            }
        }
        Command::AllowVideo { video_id } => match player.unflag(&video_id) {
            Ok(outcome) => render::unflagged(&outcome),
            Err(e) => vec![render::failure("Cannot remove flag from video", &e)],
        },
        Command::Help => HELP.lines().map(str::to_string).collect(),
        Command::Exit => return Response::Exit,
    };

    Response::Lines(lines)
}

fn pause(player: &mut VideoPlayer) -> Vec<String> {
    match player.pause() {
        Ok(video) => vec![format!("Pausing video: {}", video.title())],
        Err(PlayerError::AlreadyPaused { video_id }) => {
            let title = player
                .catalog()
                .get(video_id.as_str())
                .map(|video| video.title().to_string())
                .unwrap_or_else(|_| video_id.to_string());
            vec![format!("Video already paused: {title}")]
        }
        Err(e) => vec![render::failure("Cannot pause video", &e)],
    }
}

fn search(outcome: Result<SearchResults, PlayerError>) -> Response {
    match outcome {
        Ok(results) => Response::Search {
            lines: render::search_results(&results),
            results,
        },
        Err(e) => Response::Lines(vec![e.to_string()]),
    }
}

const HELP: &str = "\
Available commands:
    ADD_TO_PLAYLIST <playlist_name> <video_id> - Adds a video to a playlist.
    ALLOW_VIDEO <video_id> - Removes a flag from a video.
    CLEAR_PLAYLIST <playlist_name> - Removes all videos from a playlist.
    CONTINUE - Resumes playing the current video.
    CREATE_PLAYLIST <playlist_name> - Creates a new (empty) playlist.
    DELETE_PLAYLIST <playlist_name> - Deletes a playlist.
    EXIT - Terminates the program execution.
    FLAG_VIDEO <video_id> [flag_reason] - Flags a video with an optional reason.
    HELP - Displays help.
    NUMBER_OF_VIDEOS - Shows how many videos are in the library.
    PAUSE - Pauses the current video.
    PLAY <video_id> - Plays specified video.
    PLAY_RANDOM - Plays a random video from the library.
    REMOVE_FROM_PLAYLIST <playlist_name> <video_id> - Removes a video from a playlist.
    SEARCH_VIDEOS <search_term> - Displays all videos whose titles contain the search_term.
    SEARCH_VIDEOS_WITH_TAG <tag_name> - Searches videos by tag.
    SHOW_ALL_PLAYLISTS - Displays all available playlists.
    SHOW_ALL_VIDEOS - Lists all videos from the library.
    SHOW_PLAYING - Displays the title, video_id, video tags and paused status of the video that is currently playing (or paused).
    SHOW_PLAYLIST <playlist_name> - Displays videos and details from a playlist.
    STOP - Stops the current video.";
