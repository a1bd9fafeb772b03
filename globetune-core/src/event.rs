use crate::media::{LoadId, MediaEvent};
use std::time::Duration;

/// Transport surface buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Play,
    Pause,
    /// Play/pause button
    Toggle,
    Stop,
    Next,
    Previous,
    /// Seek slider moved to an absolute position
    Seek(Duration),
    /// Step forward by the configured seek step
    SeekForward,
    /// Step back by the configured seek step
    SeekBackward,
}

/// Everything the session reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The map reported a region click
    RegionSelected { key: String, display_name: String },
    /// A track row was clicked. The index is into the active playlist and may
    /// be out of range when it comes from a stale view.
    TrackChosen { index: i64 },
    /// A row's play button was clicked
    TrackPlayRequested { index: i64 },
    Transport(TransportCommand),
    /// Search box contents changed (debounced)
    SearchInput(String),
    /// Region-group dropdown changed, `None` for "all"
    RegionGroupFilter(Option<String>),
    /// Report from the media element for a given load
    Media { load: LoadId, event: MediaEvent },
    /// The map data could not be loaded
    MapDataFailed { reason: String },
}

impl Event {
    /// Short name for logging
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RegionSelected { .. } => "region_selected",
            Self::TrackChosen { .. } => "track_chosen",
            Self::TrackPlayRequested { .. } => "track_play_requested",
            Self::Transport(_) => "transport",
            Self::SearchInput(_) => "search_input",
            Self::RegionGroupFilter(_) => "region_group_filter",
            Self::Media { .. } => "media",
            Self::MapDataFailed { .. } => "map_data_failed",
        }
    }

    #[must_use]
    pub fn region_selected(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::RegionSelected {
            key: key.into(),
            display_name: display_name.into(),
        }
    }
}

impl From<TransportCommand> for Event {
    fn from(command: TransportCommand) -> Self {
        Self::Transport(command)
    }
}
