//! Substring search over the unflagged part of the catalog.

use crate::catalog::{self, Catalog, Video};
use crate::errors::PlayerError;
use crate::playlist::normalize_name;

/// Which field a search claims to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    /// Tag searches currently match against titles as well.
    Tag,
}

/// Ranked matches of one search, numbered from 1 for selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    term: String,
    matches: Vec<Video>,
}

impl SearchResults {
    /// The term as the caller typed it.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Matches sorted by title.
    pub fn matches(&self) -> &[Video] {
        &self.matches
    }

    /// Resolves a user's answer to a match. Anything that is not a number
    /// between 1 and the match count means no selection.
    pub fn select(&self, answer: &str) -> Option<&Video> {
        let number: usize = answer.trim().parse().ok()?;
        number.checked_sub(1).and_then(|slot| self.matches.get(slot))
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Finds unflagged videos whose normalized text contains the normalized
/// term. Both sides go through the playlist-name normalization, so
/// punctuation and case are ignored.
///
/// # Errors
/// - `PlayerError::NoResults` - Nothing matched
pub fn search_catalog(
    catalog: &Catalog,
    term: &str,
    field: SearchField,
) -> Result<SearchResults, PlayerError> {
    let needle = normalize_name(term);

    let mut found: Vec<&Video> = catalog
        .unflagged()
        .into_iter()
        .filter(|video| normalize_name(searchable_text(video, field)).contains(&needle))
        .collect();

    tracing::debug!("Search for '{}' ({:?}) matched {} videos", term, field, found.len());

    if found.is_empty() {
        return Err(PlayerError::NoResults {
            term: term.to_string(),
        });
    }

    catalog::sort_by_title(&mut found);
    Ok(SearchResults {
        term: term.to_string(),
        matches: found.into_iter().cloned().collect(),
    })
}

fn searchable_text(video: &Video, field: SearchField) -> &str {
    match field {
        // Tag searches match titles until tag matching is specified.
        SearchField::Title | SearchField::Tag => video.title(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Catalog {
        Catalog::from_videos([
            Video::new("dog1", "Funny Dogs", vec!["#animal".to_string()]),
            Video::new("cat1", "Amazing Cats", vec!["#animal".to_string()]),
            Video::new("cat2", "Another Cat Video", vec!["#cat".to_string()]),
        ])
        .unwrap()
    }

    fn titles(results: &SearchResults) -> Vec<&str> {
        results.matches().iter().map(Video::title).collect()
    }

    #[test]
    fn test_matches_are_case_insensitive_and_sorted() {
        let results = search_catalog(&library(), "CAT", SearchField::Title).unwrap();
        assert_eq!(titles(&results), ["Amazing Cats", "Another Cat Video"]);
        assert_eq!(results.term(), "CAT");
    }

    #[test]
    fn test_punctuation_in_term_matches_word_boundaries() {
        let results = search_catalog(&library(), "cat   video!", SearchField::Title).unwrap();
        assert_eq!(titles(&results), ["Another Cat Video"]);
    }

    #[test]
    fn test_flagged_videos_are_hidden() {
        let mut catalog = library();
        catalog.get_mut("cat1").unwrap().flag("").unwrap();
        let results = search_catalog(&catalog, "cat", SearchField::Title).unwrap();
        assert_eq!(titles(&results), ["Another Cat Video"]);
    }

    #[test]
    fn test_no_results() {
        assert_eq!(
            search_catalog(&library(), "horse", SearchField::Title),
            Err(PlayerError::NoResults {
                term: "horse".to_string()
            })
        );
    }

    #[test]
    fn test_tag_search_behaves_like_title_search() {
        let catalog = library();
        // "#animal" is a tag on two videos but appears in no title.
        assert!(search_catalog(&catalog, "#animal", SearchField::Tag).is_err());
        assert_eq!(
            search_catalog(&catalog, "dogs", SearchField::Tag),
            search_catalog(&catalog, "dogs", SearchField::Title)
        );
    }

    #[test]
    fn test_select_answers() {
        let results = search_catalog(&library(), "cat", SearchField::Title).unwrap();
        assert_eq!(results.select("1").map(Video::title), Some("Amazing Cats"));
        assert_eq!(results.select(" 2 ").map(Video::title), Some("Another Cat Video"));
        assert_eq!(results.select("0"), None);
        assert_eq!(results.select("3"), None);
        assert_eq!(results.select("-1"), None);
        assert_eq!(results.select("no"), None);
        assert_eq!(results.select(""), None);
    }
}
