//! Catalog source parsing.
//!
//! Two formats are understood. The text format holds one video per line:
//!
//! ```text
//! Amazing Cats | amazing_cats_video_id | #cat , #animal
//! ```
//!
//! The JSON format is an array of `{ "title", "id", "tags" }` objects.

use std::path::PathBuf;

use serde::Deserialize;

use super::video::{Video, VideoId};

/// Errors raised while reading a catalog source.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("Invalid catalog JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Duplicate video ID in catalog: {video_id}")]
    DuplicateId { video_id: VideoId },
}

#[derive(Debug, Deserialize)]
struct VideoRecord {
    title: String,
    id: VideoId,
    #[serde(default)]
    tags: Vec<String>,
}

impl From<VideoRecord> for Video {
    fn from(record: VideoRecord) -> Self {
        Video::new(record.id, record.title, record.tags)
    }
}

/// Parses `title | id | tags` lines. Blank lines are skipped; the tag
/// field is optional and comma separated.
///
/// # Errors
/// - `CatalogLoadError::MalformedLine` - Line lacks a non-empty ID field
pub fn parse_catalog_text(contents: &str) -> Result<Vec<Video>, CatalogLoadError> {
    let mut videos = Vec::new();

    for (number, raw) in contents.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }

        let mut fields = raw.split('|').map(str::trim);
        let title = fields.next().unwrap_or_default();
        let id = match fields.next() {
            Some(id) if !id.is_empty() => id,
            _ => {
                return Err(CatalogLoadError::MalformedLine {
                    line: number + 1,
                    content: raw.to_string(),
                });
            }
        };
        let tags = fields
            .next()
            .map(|field| {
                field
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        videos.push(Video::new(id, title, tags));
    }

    Ok(videos)
}

/// Parses a JSON array of video records.
///
/// # Errors
/// - `CatalogLoadError::InvalidJson` - Input is not an array of records
pub fn parse_catalog_json(contents: &str) -> Result<Vec<Video>, CatalogLoadError> {
    let records: Vec<VideoRecord> = serde_json::from_str(contents)?;
    Ok(records.into_iter().map(Video::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_fields_and_tags() {
        let videos = parse_catalog_text("  Funny Dogs | dog1 |  #dog , #animal \n").unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title(), "Funny Dogs");
        assert_eq!(videos[0].id().as_str(), "dog1");
        assert_eq!(videos[0].tags(), ["#dog", "#animal"]);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_allows_empty_tags() {
        let videos = parse_catalog_text("\nA | a |\n\n   \nB | b\n").unwrap();
        let ids: Vec<&str> = videos.iter().map(|v| v.id().as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(videos.iter().all(|v| v.tags().is_empty()));
    }

    #[test]
    fn test_parse_reports_line_without_id() {
        let err = parse_catalog_text("A | a | #x\nno id here\n").unwrap_err();
        match err {
            CatalogLoadError::MalformedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "no id here");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_json_defaults_missing_tags() {
        let videos = parse_catalog_json(r#"[{"title": "A", "id": "a"}]"#).unwrap();
        assert_eq!(videos[0].title(), "A");
        assert!(videos[0].tags().is_empty());
    }

    #[test]
    fn test_parse_json_rejects_wrong_shape() {
        assert!(matches!(
            parse_catalog_json(r#"{"title": "A"}"#),
            Err(CatalogLoadError::InvalidJson(_))
        ));
    }
}
