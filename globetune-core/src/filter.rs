//! Search and region-group filtering over the active playlist.
//!
//! Filtering never mutates or reorders the active playlist; it produces a
//! derived view whose entries remember their position in the active list, so
//! a click on a visible row always maps back to the right track.

use crate::catalog::Track;

/// Filter inputs applied to the active playlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackFilter {
    /// Free-text query, matched against title, artist and genre
    pub query: String,
    /// Region group that the selected region must belong to
    pub region_group: Option<String>,
}

impl TrackFilter {
    pub fn new(query: impl Into<String>, region_group: Option<String>) -> Self {
        Self {
            query: query.into(),
            region_group,
        }
    }

    /// Normalized query: trimmed and lowercased, empty means "match all"
    #[must_use]
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    /// Group filter with blank labels treated as "no filter"
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.region_group
            .as_deref()
            .map(str::trim)
            .filter(|group| !group.is_empty())
    }

    /// Whether neither part of the filter restricts anything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.group().is_none()
    }
}

/// A track that survived filtering, with its index in the active playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleTrack<'a> {
    pub index: usize,
    pub track: &'a Track,
}

/// Whether a track's text fields contain an already-normalized query
#[must_use]
pub fn matches_query(track: &Track, normalized_query: &str) -> bool {
    if normalized_query.is_empty() {
        return true;
    }
    format!("{} {} {}", track.title(), track.artist(), track.genre())
        .to_lowercase()
        .contains(normalized_query)
}

/// Compute the visible playlist.
///
/// `region_group` is the group of the currently selected region, if any.
/// A set group filter that differs from it hides every track; the query then
/// narrows by substring. Order follows `active`.
#[must_use]
pub fn recompute_visible<'a>(
    active: &'a [Track],
    region_group: Option<&str>,
    filter: &TrackFilter,
) -> Vec<VisibleTrack<'a>> {
    if let Some(wanted) = filter.group() {
        if region_group != Some(wanted) {
            return Vec::new();
        }
    }

    let query = filter.normalized_query();
    active
        .iter()
        .enumerate()
        .filter(|(_, track)| matches_query(track, &query))
        .map(|(index, track)| VisibleTrack { index, track })
        .collect()
}
