//! Immutable video catalog loaded once at startup.

mod loader;
mod video;

use std::collections::HashMap;
use std::path::Path;

pub use loader::{CatalogLoadError, parse_catalog_json, parse_catalog_text};
pub use video::{UNSPECIFIED_REASON, Video, VideoId, display_reason};

use crate::errors::PlayerError;

const SAMPLE_LIBRARY: &str = include_str!("sample_videos.txt");

/// Fixed set of videos keyed by ID.
///
/// Videos are never added or removed after construction. Iteration follows
/// load order; callers wanting display order use [`Catalog::sorted_by_title`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    videos: Vec<Video>,
    index: HashMap<VideoId, usize>,
}

impl Catalog {
    /// Builds a catalog from videos in load order.
    ///
    /// # Errors
    /// - `CatalogLoadError::DuplicateId` - Two videos share an ID
    pub fn from_videos(
        videos: impl IntoIterator<Item = Video>,
    ) -> Result<Self, CatalogLoadError> {
        let mut catalog = Self::default();
        for video in videos {
            if catalog.index.contains_key(video.id()) {
                return Err(CatalogLoadError::DuplicateId {
                    video_id: video.id().clone(),
                });
            }
            catalog.index.insert(video.id().clone(), catalog.videos.len());
            catalog.videos.push(video);
        }
        tracing::debug!("Catalog built with {} videos", catalog.videos.len());
        Ok(catalog)
    }

    /// Loads a catalog file. Files ending in `.json` are decoded as JSON,
    /// anything else as `title | id | tags` lines.
    ///
    /// # Errors
    /// - `CatalogLoadError::Io` - File could not be read
    /// - `CatalogLoadError::MalformedLine` - Text line missing its ID field
    /// - `CatalogLoadError::InvalidJson` - JSON did not match the record shape
    /// - `CatalogLoadError::DuplicateId` - Two videos share an ID
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let videos = if is_json {
            parse_catalog_json(&contents)?
        } else {
            parse_catalog_text(&contents)?
        };

        tracing::info!("Loaded {} videos from {}", videos.len(), path.display());
        Self::from_videos(videos)
    }

    /// Bundled sample library used when no catalog file is configured.
    pub fn sample() -> Self {
        // Parsing the bundled file is covered by test_sample_library_has_five_videos.
        parse_catalog_text(SAMPLE_LIBRARY)
            .and_then(Self::from_videos)
            .unwrap_or_else(|e| {
                tracing::warn!("Bundled sample library is invalid: {}", e);
                Self::default()
            })
    }

    /// Looks up a video by ID.
    ///
    /// # Errors
    /// - `PlayerError::VideoNotFound` - No video has this ID
    pub fn get(&self, video_id: &str) -> Result<&Video, PlayerError> {
        self.index
            .get(video_id)
            .map(|&slot| &self.videos[slot])
            .ok_or_else(|| PlayerError::VideoNotFound {
                video_id: VideoId::from(video_id),
            })
    }

    /// Mutable lookup, reserved for moderation through the player.
    pub(crate) fn get_mut(&mut self, video_id: &str) -> Result<&mut Video, PlayerError> {
        match self.index.get(video_id) {
            Some(&slot) => Ok(&mut self.videos[slot]),
            None => Err(PlayerError::VideoNotFound {
                video_id: VideoId::from(video_id),
            }),
        }
    }

    /// All videos in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Video> {
        self.videos.iter()
    }

    /// All videos ordered by title, using plain ordinal string comparison.
    pub fn sorted_by_title(&self) -> Vec<&Video> {
        let mut videos: Vec<&Video> = self.videos.iter().collect();
        sort_by_title(&mut videos);
        videos
    }

    /// Videos that are not flagged, in load order.
    pub fn unflagged(&self) -> Vec<&Video> {
        self.videos.iter().filter(|v| !v.is_flagged()).collect()
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Stable sort by title, ordinal and case-sensitive.
pub(crate) fn sort_by_title(videos: &mut [&Video]) {
    videos.sort_by(|a, b| a.title().cmp(b.title()));
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn pets() -> Catalog {
        Catalog::from_videos([
            Video::new("dog1", "Funny Dogs", vec!["#animal".to_string()]),
            Video::new("cat1", "Amazing Cats", vec!["#animal".to_string()]),
            Video::new("bird1", "birds at dawn", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = pets();
        assert_eq!(catalog.get("cat1").unwrap().title(), "Amazing Cats");
        assert_eq!(
            catalog.get("cow1").unwrap_err(),
            PlayerError::VideoNotFound {
                video_id: VideoId::from("cow1")
            }
        );
    }

    #[test]
    fn test_iteration_keeps_load_order() {
        let catalog = pets();
        let ids: Vec<&str> = catalog.iter().map(|v| v.id().as_str()).collect();
        assert_eq!(ids, ["dog1", "cat1", "bird1"]);
    }

    #[test]
    fn test_title_sort_is_case_sensitive() {
        let catalog = pets();
        let titles: Vec<&str> = catalog.sorted_by_title().into_iter().map(|v| v.title()).collect();
        // Uppercase letters order before lowercase ones.
        assert_eq!(titles, ["Amazing Cats", "Funny Dogs", "birds at dawn"]);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = Catalog::from_videos([
            Video::new("cat1", "Amazing Cats", vec![]),
            Video::new("cat1", "Other Cats", vec![]),
        ]);
        assert!(matches!(
            result,
            Err(CatalogLoadError::DuplicateId { video_id }) if video_id.as_str() == "cat1"
        ));
    }

    #[test]
    fn test_unflagged_excludes_flagged_videos() {
        let mut catalog = pets();
        catalog.get_mut("dog1").unwrap().flag("").unwrap();
        let ids: Vec<&str> = catalog.unflagged().into_iter().map(|v| v.id().as_str()).collect();
        assert_eq!(ids, ["cat1", "bird1"]);
    }

    #[test]
    fn test_sample_library_has_five_videos() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 5);
        let nothing = catalog.get("nothing_video_id").unwrap();
        assert_eq!(nothing.title(), "Video about nothing");
        assert!(nothing.tags().is_empty());
        assert_eq!(
            catalog.get("funny_dogs_video_id").unwrap().tags(),
            ["#dog", "#animal"]
        );
    }

    #[test]
    fn test_load_text_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Amazing Cats | cat1 | #cat, #animal").unwrap();
        writeln!(file, "Funny Dogs | dog1").unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("dog1").unwrap().tags().is_empty());
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r##"[{{"title": "Amazing Cats", "id": "cat1", "tags": ["#cat"]}}]"##
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.get("cat1").unwrap().tags(), ["#cat"]);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        match Catalog::load(&path) {
            Err(CatalogLoadError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }
}
