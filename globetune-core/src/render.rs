//! Presentation boundary.
//!
//! The controller describes what should be on screen with plain view values
//! and hands them to a [`Presenter`]. Nothing here knows about HTML, a
//! terminal or any widget toolkit.

use crate::error::CoreError;
use crate::filter::VisibleTrack;
use crate::player::PlaybackStatus;
use std::fmt;

/// Header shown before any region has been picked
pub const PROMPT_TITLE: &str = "Click a country to explore indie tracks";

/// Track list placeholder before any region has been picked
pub const SELECT_REGION_MESSAGE: &str = "Select a country on the map.";

/// Header subtitle for a region the catalog does not know
pub const NO_TRACKS_FOR_REGION: &str = "No tracks available for this country yet";

/// Track list placeholder when filtering leaves nothing
pub const NO_MATCHES_MESSAGE: &str = "No tracks match your search or filters.";

/// Transport label when nothing is loaded
pub const NO_TRACK_SELECTED: &str = "No track selected";

/// Region header contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionHeader {
    /// Nothing selected yet
    Prompt,
    /// A catalog region is selected
    Region { name: String, group: String },
    /// The map reported a region the catalog has no tracks for
    Empty { name: String },
}

impl RegionHeader {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Prompt => PROMPT_TITLE,
            Self::Region { name, .. } | Self::Empty { name } => name,
        }
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<String> {
        match self {
            Self::Prompt => None,
            Self::Region { group, .. } if group.is_empty() => None,
            Self::Region { group, .. } => Some(format!("Region: {group}")),
            Self::Empty { .. } => Some(NO_TRACKS_FOR_REGION.to_string()),
        }
    }
}

/// Track list contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackListView<'a> {
    pub tracks: Vec<VisibleTrack<'a>>,
    /// Active-playlist index of the highlighted (loaded) track
    pub highlight: Option<usize>,
    /// Placeholder to show instead of rows when `tracks` is empty
    pub empty_message: Option<&'static str>,
}

impl TrackListView<'_> {
    #[must_use]
    pub fn is_highlighted(&self, visible: &VisibleTrack<'_>) -> bool {
        self.highlight == Some(visible.index)
    }
}

/// Title and artist of the loaded track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
}

impl fmt::Display for NowPlaying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}

/// Transport bar contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportView {
    pub status: PlaybackStatus,
    pub now_playing: Option<NowPlaying>,
    /// Formatted elapsed time (`m:ss`)
    pub elapsed: String,
    /// Formatted duration (`m:ss`, `0:00` while unknown)
    pub duration: String,
}

impl TransportView {
    #[must_use]
    pub fn label(&self) -> String {
        self.now_playing
            .as_ref()
            .map_or_else(|| NO_TRACK_SELECTED.to_string(), ToString::to_string)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A user-facing message about a recoverable failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl From<&CoreError> for Notice {
    fn from(error: &CoreError) -> Self {
        let level = match error {
            CoreError::MapDataLoad { .. }
            | CoreError::RegionNotFound { .. }
            | CoreError::TrackIndexOutOfRange { .. } => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        Self {
            level,
            message: error.to_string(),
        }
    }
}

/// The presentation layer
pub trait Presenter: Send {
    fn render_region_header(&mut self, header: &RegionHeader);

    fn render_track_list(&mut self, list: &TrackListView<'_>);

    fn render_transport_state(&mut self, transport: &TransportView);

    fn render_notice(&mut self, notice: &Notice);
}
