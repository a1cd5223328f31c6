//! Message formatting for command outcomes.
//!
//! Wording lives here and only here. The core reports what happened; this
//! module decides how it reads.

use vidshelf_core::catalog::display_reason;
use vidshelf_core::{Moderation, PlayTransition, PlayerError, SearchResults, Video};

/// `Title (id) [#tag1 #tag2]`, with a flag note for flagged videos.
pub fn video_detail(video: &Video) -> String {
    let mut line = format!("{} ({}) [{}]", video.title(), video.id(), video.tags().join(" "));
    if let Some(reason) = video.flag_reason() {
        line.push_str(&format!(" - FLAGGED (reason: {})", display_reason(reason)));
    }
    line
}

/// A failed command, prefixed with what was attempted.
pub fn failure(action: &str, err: &PlayerError) -> String {
    format!("{action}: {err}")
}

pub fn stopping(video: &Video) -> String {
    format!("Stopping video: {}", video.title())
}

pub fn transition(transition: &PlayTransition) -> Vec<String> {
    let mut lines: Vec<String> = transition.stopped.iter().map(stopping).collect();
    lines.push(format!("Playing video: {}", transition.started.title()));
    lines
}

pub fn flagged(outcome: &Moderation) -> Vec<String> {
    let mut lines: Vec<String> = outcome.stopped.iter().map(stopping).collect();
    lines.push(format!(
        "Successfully flagged video: {} (reason: {})",
        outcome.video.title(),
        display_reason(outcome.video.flag_reason().unwrap_or_default())
    ));
    lines
}

pub fn unflagged(outcome: &Moderation) -> Vec<String> {
    let mut lines: Vec<String> = outcome.stopped.iter().map(stopping).collect();
    lines.push(format!(
        "Successfully removed flag from video: {}",
        outcome.video.title()
    ));
    lines
}

/// Numbered search matches followed by the selection prompt.
pub fn search_results(results: &SearchResults) -> Vec<String> {
    let mut lines = vec![format!("Here are the results for {}:", results.term())];
    lines.extend(
        results
            .matches()
            .iter()
            .enumerate()
            .map(|(slot, video)| format!("{}) {}", slot + 1, video_detail(video))),
    );
    lines.push(
        "Would you like to play any of the above? If yes, specify the number of the video."
            .to_string(),
    );
    lines.push("If your answer is not a valid number, we will assume it's a no.".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use vidshelf_core::VideoId;

    use super::*;

    #[test]
    fn test_video_detail_formats_tags() {
        let video = Video::new(
            "amazing_cats_video_id",
            "Amazing Cats",
            vec!["#cat".to_string(), "#animal".to_string()],
        );
        assert_eq!(
            video_detail(&video),
            "Amazing Cats (amazing_cats_video_id) [#cat #animal]"
        );
    }

    #[test]
    fn test_video_detail_notes_flag() {
        let mut video = Video::new("nothing_video_id", "Video about nothing", vec![]);
        video.flag("").unwrap();
        assert_eq!(
            video_detail(&video),
            "Video about nothing (nothing_video_id) [] - FLAGGED (reason: Not supplied)"
        );
    }

    #[test]
    fn test_failure_prefix() {
        let err = PlayerError::VideoNotFound {
            video_id: VideoId::from("x"),
        };
        assert_eq!(
            failure("Cannot play video", &err),
            "Cannot play video: Video does not exist"
        );
    }

    #[test]
    fn test_transition_announces_stop_first() {
        let replaced = PlayTransition {
            stopped: Some(Video::new("a", "First", vec![])),
            started: Video::new("b", "Second", vec![]),
        };
        assert_eq!(
            transition(&replaced),
            ["Stopping video: First", "Playing video: Second"]
        );
    }
}
