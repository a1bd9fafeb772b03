//! Player and playlist state machine.
//!
//! [`PlayerState`] is the single owned record of what is selected, what is
//! loaded and whether it is playing. Transitions are plain methods: they
//! update the state and record the media commands and screen changes they
//! imply into an [`Effects`] value. Nothing in here talks to the media
//! element or the screen directly; the controller applies the effects.

use crate::catalog::{Catalog, Track};
use crate::error::{CoreError, Result};
use crate::filter::{recompute_visible, TrackFilter, VisibleTrack};
use crate::media::{LoadId, MediaCommand};
use crate::render::{
    NowPlaying, Notice, RegionHeader, TrackListView, TransportView, NO_MATCHES_MESSAGE,
    SELECT_REGION_MESSAGE,
};
use crate::time::{format_clock, format_optional_clock};
use std::fmt;
use std::time::Duration;

/// Playback status of the loaded track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlaybackStatus {
    /// Nothing playing; a track may or may not be loaded
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the map last reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A catalog region
    Found {
        key: String,
        name: String,
        group: String,
    },
    /// A region the catalog has no entry for
    Missing { key: String, display_name: String },
}

impl Selection {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Found { key, .. } | Self::Missing { key, .. } => key,
        }
    }
}

/// Which parts of the screen a transition invalidated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub header: bool,
    pub list: bool,
    pub transport: bool,
}

impl Changes {
    #[must_use]
    pub const fn any(&self) -> bool {
        self.header || self.list || self.transport
    }
}

/// Side effects recorded by transitions
#[derive(Debug, Default)]
pub struct Effects {
    pub commands: Vec<MediaCommand>,
    pub changes: Changes,
    pub notices: Vec<Notice>,
}

impl Effects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn command(&mut self, command: MediaCommand) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && !self.changes.any() && self.notices.is_empty()
    }
}

/// The complete player state
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    selection: Option<Selection>,
    active_playlist: Vec<Track>,
    filter: TrackFilter,
    current_index: Option<usize>,
    status: PlaybackStatus,
    position: Duration,
    duration: Option<Duration>,
    loaded: Option<LoadId>,
    last_load: LoadId,
}

impl PlayerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn selected_region_key(&self) -> Option<&str> {
        self.selection.as_ref().map(Selection::key)
    }

    /// Group of the selected catalog region
    #[must_use]
    pub fn region_group(&self) -> Option<&str> {
        match &self.selection {
            Some(Selection::Found { group, .. }) => Some(group),
            _ => None,
        }
    }

    #[must_use]
    pub fn active_playlist(&self) -> &[Track] {
        &self.active_playlist
    }

    #[must_use]
    pub const fn filter(&self) -> &TrackFilter {
        &self.filter
    }

    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    #[must_use]
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index
            .and_then(|index| self.active_playlist.get(index))
    }

    #[must_use]
    pub const fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[must_use]
    pub const fn position(&self) -> Duration {
        self.position
    }

    #[must_use]
    pub const fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Load id of the source currently handed to the media element
    #[must_use]
    pub const fn loaded(&self) -> Option<LoadId> {
        self.loaded
    }

    /// Whether a media event tagged `load` belongs to the loaded source
    #[must_use]
    pub fn is_current(&self, load: LoadId) -> bool {
        self.loaded == Some(load)
    }

    /// The filtered view of the active playlist
    #[must_use]
    pub fn visible_playlist(&self) -> Vec<VisibleTrack<'_>> {
        recompute_visible(&self.active_playlist, self.region_group(), &self.filter)
    }

    /// Replace the selection and active playlist with the region the map
    /// reported.
    ///
    /// The previous track is unloaded. On a catalog miss the state is still
    /// replaced, with an empty playlist, and the miss is returned so the
    /// caller can show the empty state.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RegionNotFound`] when neither the key nor the
    /// display name is in the catalog.
    pub fn load_region(
        &mut self,
        catalog: &Catalog,
        key: &str,
        display_name: &str,
        effects: &mut Effects,
    ) -> Result<usize> {
        self.unload(effects);

        let outcome = match catalog.resolve(key, display_name) {
            Ok(region) => {
                self.selection = Some(Selection::Found {
                    key: region.key().to_string(),
                    name: region.name().to_string(),
                    group: region.group().to_string(),
                });
                self.active_playlist = region.tracks().to_vec();
                Ok(self.active_playlist.len())
            }
            Err(e) => {
                self.selection = Some(Selection::Missing {
                    key: key.to_string(),
                    display_name: display_name.to_string(),
                });
                self.active_playlist.clear();
                Err(e)
            }
        };

        effects.changes.header = true;
        effects.changes.list = true;
        effects.changes.transport = true;
        outcome
    }

    fn unload(&mut self, effects: &mut Effects) {
        if self.loaded.take().is_some() {
            effects.command(MediaCommand::Unload);
        }
        self.current_index = None;
        self.status = PlaybackStatus::Stopped;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    /// Convert an index reported by the UI into a valid playlist index.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TrackIndexOutOfRange`] for negative indices and
    /// indices past the end of the active playlist.
    pub fn check_index(&self, index: i64) -> Result<usize> {
        let len = self.active_playlist.len();
        usize::try_from(index)
            .ok()
            .filter(|&index| index < len)
            .ok_or(CoreError::TrackIndexOutOfRange { index, len })
    }

    /// Load the track at `index` without starting playback.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TrackIndexOutOfRange`] and leaves the state
    /// untouched if `index` is past the end of the active playlist.
    pub fn select_track(&mut self, index: usize, effects: &mut Effects) -> Result<&Track> {
        let len = self.active_playlist.len();
        if index >= len {
            return Err(CoreError::TrackIndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len,
            });
        }

        let load = self.last_load.next();
        self.last_load = load;
        self.loaded = Some(load);
        self.current_index = Some(index);
        self.status = PlaybackStatus::Stopped;
        self.position = Duration::ZERO;

        let track = &self.active_playlist[index];
        self.duration = track.duration();
        effects.command(MediaCommand::Load {
            load,
            source: track.source().to_string(),
        });
        effects.changes.list = true;
        effects.changes.transport = true;
        Ok(track)
    }

    /// Start or resume playback. Returns whether anything changed.
    pub fn play(&mut self, effects: &mut Effects) -> bool {
        if self.loaded.is_none() || self.status == PlaybackStatus::Playing {
            return false;
        }
        effects.command(MediaCommand::Play);
        self.status = PlaybackStatus::Playing;
        effects.changes.transport = true;
        true
    }

    /// Pause playback. Only valid while playing.
    pub fn pause(&mut self, effects: &mut Effects) -> bool {
        if self.status != PlaybackStatus::Playing {
            return false;
        }
        effects.command(MediaCommand::Pause);
        self.status = PlaybackStatus::Paused;
        effects.changes.transport = true;
        true
    }

    /// Pause when playing, play otherwise
    pub fn toggle(&mut self, effects: &mut Effects) -> bool {
        if self.status == PlaybackStatus::Playing {
            self.pause(effects)
        } else {
            self.play(effects)
        }
    }

    /// Stop playback and rewind. Only valid while playing or paused.
    pub fn stop(&mut self, effects: &mut Effects) -> bool {
        if self.status == PlaybackStatus::Stopped {
            return false;
        }
        effects.command(MediaCommand::Pause);
        effects.command(MediaCommand::Seek(Duration::ZERO));
        self.status = PlaybackStatus::Stopped;
        self.position = Duration::ZERO;
        effects.changes.transport = true;
        true
    }

    /// Load the following track, wrapping to the first after the last.
    ///
    /// With nothing loaded the first track is selected. Returns the new
    /// index, or `None` for an empty playlist.
    pub fn next(&mut self, effects: &mut Effects) -> Option<usize> {
        let len = self.active_playlist.len();
        if len == 0 {
            return None;
        }
        let index = match self.current_index {
            Some(current) if current + 1 < len => current + 1,
            _ => 0,
        };
        self.select_track(index, effects).ok().map(|_| index)
    }

    /// Load the preceding track, wrapping to the last from the first.
    ///
    /// With nothing loaded the last track is selected.
    pub fn previous(&mut self, effects: &mut Effects) -> Option<usize> {
        let len = self.active_playlist.len();
        if len == 0 {
            return None;
        }
        let index = match self.current_index {
            Some(current) if current > 0 => current - 1,
            _ => len - 1,
        };
        self.select_track(index, effects).ok().map(|_| index)
    }

    /// Move the playback position, clamped to the known duration
    pub fn seek(&mut self, position: Duration, effects: &mut Effects) -> bool {
        if self.loaded.is_none() {
            return false;
        }
        let position = self
            .duration
            .map_or(position, |duration| position.min(duration));
        effects.command(MediaCommand::Seek(position));
        self.position = position;
        effects.changes.transport = true;
        true
    }

    /// Apply a reported duration. Stale loads are ignored.
    pub fn metadata_loaded(&mut self, load: LoadId, duration: Duration, effects: &mut Effects) -> bool {
        if !self.is_current(load) {
            return false;
        }
        self.duration = Some(duration);
        effects.changes.transport = true;
        true
    }

    /// Apply a reported playback position. Stale loads are ignored.
    pub fn position_changed(&mut self, load: LoadId, position: Duration, effects: &mut Effects) -> bool {
        if !self.is_current(load) {
            return false;
        }
        self.position = position;
        effects.changes.transport = true;
        true
    }

    /// Handle the natural end of the loaded track.
    ///
    /// Advances and keeps playing unless this was the last track, in which
    /// case playback stops on it. Unlike a manual skip this never wraps.
    pub fn track_ended(&mut self, load: LoadId, effects: &mut Effects) -> bool {
        if !self.is_current(load) {
            return false;
        }
        let len = self.active_playlist.len();
        match self.current_index {
            Some(current) if current + 1 < len => {
                if self.next(effects).is_some() {
                    self.play(effects);
                }
            }
            _ => {
                if !self.stop(effects) {
                    self.position = Duration::ZERO;
                    effects.changes.transport = true;
                }
            }
        }
        true
    }

    /// Handle a load or playback failure reported by the media element
    pub fn media_failed(&mut self, load: LoadId, reason: &str, effects: &mut Effects) -> bool {
        if !self.is_current(load) {
            return false;
        }
        let uri = self
            .current_track()
            .map(|track| track.source().to_string())
            .unwrap_or_default();
        let error = CoreError::MediaLoad {
            uri,
            reason: reason.to_string(),
        };
        effects.notices.push(Notice::from(&error));
        self.status = PlaybackStatus::Stopped;
        self.position = Duration::ZERO;
        effects.changes.transport = true;
        true
    }

    /// Replace the text query
    pub fn set_query(&mut self, query: impl Into<String>, effects: &mut Effects) -> bool {
        let query = query.into();
        if self.filter.query == query {
            return false;
        }
        self.filter.query = query;
        effects.changes.list = true;
        true
    }

    /// Replace the region-group filter
    pub fn set_region_group_filter(&mut self, group: Option<String>, effects: &mut Effects) -> bool {
        if self.filter.region_group == group {
            return false;
        }
        self.filter.region_group = group;
        effects.changes.list = true;
        true
    }

    #[must_use]
    pub fn header(&self) -> RegionHeader {
        match &self.selection {
            None => RegionHeader::Prompt,
            Some(Selection::Found { name, group, .. }) => RegionHeader::Region {
                name: name.clone(),
                group: group.clone(),
            },
            Some(Selection::Missing { display_name, .. }) => RegionHeader::Empty {
                name: display_name.clone(),
            },
        }
    }

    #[must_use]
    pub fn track_list_view(&self) -> TrackListView<'_> {
        let tracks = self.visible_playlist();
        let empty_message = if !tracks.is_empty() {
            None
        } else if self.selection.is_none() {
            Some(SELECT_REGION_MESSAGE)
        } else {
            Some(NO_MATCHES_MESSAGE)
        };
        TrackListView {
            tracks,
            highlight: self.current_index,
            empty_message,
        }
    }

    #[must_use]
    pub fn transport_view(&self) -> TransportView {
        TransportView {
            status: self.status,
            now_playing: self.current_track().map(|track| NowPlaying {
                title: track.title().to_string(),
                artist: track.artist().to_string(),
            }),
            elapsed: format_clock(self.position),
            duration: format_optional_clock(self.duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Region;

    fn track(id: &str, title: &str) -> Track {
        Track::new(id, title, "Artist", "Indie", format!("https://cdn.example/{id}.mp3"))
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Region::new(
                "FR",
                "France",
                "Europe",
                vec![track("fr1", "Left Bank Sketches").with_duration_secs(174)],
            ),
            Region::new(
                "US",
                "United States",
                "Americas",
                vec![track("us1", "Dawn Drive"), track("us2", "Neon Alleys")],
            ),
            Region::new(
                "IN",
                "India",
                "Asia",
                vec![
                    track("in1", "Monsoon Streets"),
                    track("in2", "Desert Echoes"),
                    track("in3", "Harbour Lights"),
                ],
            ),
            Region::new("AQ", "Antarctica", "Antarctica", vec![]),
        ])
        .unwrap()
    }

    fn loaded(key: &str) -> PlayerState {
        let mut state = PlayerState::new();
        let mut effects = Effects::new();
        state.load_region(&catalog(), key, "", &mut effects).unwrap();
        state
    }

    #[test]
    fn test_initial_state() {
        let state = PlayerState::new();
        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert!(state.selection().is_none());
        assert!(state.active_playlist().is_empty());
        assert_eq!(state.current_index(), None);
        assert_eq!(state.header(), RegionHeader::Prompt);
        assert_eq!(
            state.track_list_view().empty_message,
            Some(SELECT_REGION_MESSAGE)
        );
    }

    #[test]
    fn test_load_region_copies_tracks() {
        let catalog = catalog();
        let mut state = PlayerState::new();
        let mut effects = Effects::new();

        let count = state.load_region(&catalog, "US", "United States", &mut effects).unwrap();

        assert_eq!(count, 2);
        assert_eq!(state.active_playlist(), catalog.lookup("US").unwrap().tracks());
        assert_eq!(state.selected_region_key(), Some("US"));
        assert_eq!(state.region_group(), Some("Americas"));
        assert_eq!(state.current_index(), None);
        assert!(effects.changes.header && effects.changes.list);
        assert!(effects.commands.is_empty());
    }

    #[test]
    fn test_load_region_by_name_fallback() {
        let mut state = PlayerState::new();
        let mut effects = Effects::new();
        state.load_region(&catalog(), "USA", "united states", &mut effects).unwrap();
        assert_eq!(state.selected_region_key(), Some("US"));
    }

    #[test]
    fn test_load_region_miss_yields_empty_state() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        state.select_track(1, &mut effects).unwrap();
        state.play(&mut effects);

        let mut effects = Effects::new();
        let result = state.load_region(&catalog(), "BR", "Brazil", &mut effects);

        assert!(matches!(result, Err(CoreError::RegionNotFound { .. })));
        assert!(state.active_playlist().is_empty());
        assert_eq!(state.current_index(), None);
        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert_eq!(effects.commands, vec![MediaCommand::Unload]);
        assert_eq!(
            state.header(),
            RegionHeader::Empty {
                name: "Brazil".into()
            }
        );
        assert_eq!(state.track_list_view().empty_message, Some(NO_MATCHES_MESSAGE));
    }

    #[test]
    fn test_select_track_loads_without_playing() {
        let mut state = loaded("US");
        let mut effects = Effects::new();

        let title = state.select_track(1, &mut effects).unwrap().title().to_string();

        assert_eq!(title, "Neon Alleys");
        assert_eq!(state.current_index(), Some(1));
        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert!(matches!(
            effects.commands.as_slice(),
            [MediaCommand::Load { source, .. }] if source == "https://cdn.example/us2.mp3"
        ));
    }

    #[test]
    fn test_select_track_out_of_range_rejected() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();
        let loaded_before = state.loaded();

        let mut effects = Effects::new();
        let result = state.select_track(2, &mut effects);

        assert!(matches!(
            result,
            Err(CoreError::TrackIndexOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(state.current_index(), Some(0));
        assert_eq!(state.loaded(), loaded_before);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_check_index_rejects_negative_and_len() {
        let state = loaded("US");
        assert!(matches!(
            state.check_index(-1),
            Err(CoreError::TrackIndexOutOfRange { index: -1, len: 2 })
        ));
        assert!(state.check_index(2).is_err());
        assert_eq!(state.check_index(1).unwrap(), 1);
    }

    #[test]
    fn test_play_without_track_is_noop() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        assert!(!state.play(&mut effects));
        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_play_pause_stop_cycle() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();

        assert!(state.play(&mut effects));
        assert_eq!(state.status(), PlaybackStatus::Playing);
        assert!(!state.play(&mut effects));

        assert!(state.pause(&mut effects));
        assert_eq!(state.status(), PlaybackStatus::Paused);
        assert!(!state.pause(&mut effects));

        let mut effects = Effects::new();
        assert!(state.stop(&mut effects));
        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert_eq!(
            effects.commands,
            vec![MediaCommand::Pause, MediaCommand::Seek(Duration::ZERO)]
        );
        assert!(!state.stop(&mut effects));
    }

    #[test]
    fn test_toggle() {
        let mut state = loaded("FR");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();

        state.toggle(&mut effects);
        assert_eq!(state.status(), PlaybackStatus::Playing);
        state.toggle(&mut effects);
        assert_eq!(state.status(), PlaybackStatus::Paused);
        state.toggle(&mut effects);
        assert_eq!(state.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn test_next_wraps_from_last() {
        let mut state = loaded("IN");
        let mut effects = Effects::new();
        state.select_track(2, &mut effects).unwrap();

        assert_eq!(state.next(&mut effects), Some(0));
        assert_eq!(state.current_index(), Some(0));
    }

    #[test]
    fn test_previous_wraps_from_first() {
        let mut state = loaded("IN");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();

        assert_eq!(state.previous(&mut effects), Some(2));
        assert_eq!(state.previous(&mut effects), Some(1));
    }

    #[test]
    fn test_two_track_next_next_returns_to_start() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        state.select_track(1, &mut effects).unwrap();

        state.next(&mut effects);
        state.next(&mut effects);
        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn test_next_previous_without_selection() {
        let mut state = loaded("IN");
        let mut effects = Effects::new();
        assert_eq!(state.next(&mut effects), Some(0));

        let mut state = loaded("IN");
        assert_eq!(state.previous(&mut effects), Some(2));
    }

    #[test]
    fn test_next_does_not_play() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();
        state.play(&mut effects);

        state.next(&mut effects);
        assert_eq!(state.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn test_transport_on_empty_region_is_noop() {
        let mut state = loaded("AQ");
        let mut effects = Effects::new();

        assert_eq!(state.next(&mut effects), None);
        assert_eq!(state.previous(&mut effects), None);
        assert!(!state.play(&mut effects));
        assert!(!state.pause(&mut effects));
        assert!(!state.stop(&mut effects));
        assert!(!state.seek(Duration::from_secs(3), &mut effects));
        assert!(effects.is_empty());
        assert_eq!(state.current_index(), None);
    }

    #[test]
    fn test_ended_advances_and_plays() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();
        state.play(&mut effects);
        let load = state.loaded().unwrap();

        let mut effects = Effects::new();
        assert!(state.track_ended(load, &mut effects));

        assert_eq!(state.current_index(), Some(1));
        assert_eq!(state.status(), PlaybackStatus::Playing);
        assert!(matches!(
            effects.commands.as_slice(),
            [MediaCommand::Load { .. }, MediaCommand::Play]
        ));
    }

    #[test]
    fn test_ended_at_last_stops_without_wrap() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        state.select_track(1, &mut effects).unwrap();
        state.play(&mut effects);
        let load = state.loaded().unwrap();

        state.track_ended(load, &mut effects);

        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert_eq!(state.current_index(), Some(1));
        assert_eq!(state.position(), Duration::ZERO);
    }

    #[test]
    fn test_single_track_scenario() {
        let mut state = PlayerState::new();
        let mut effects = Effects::new();
        let count = state.load_region(&catalog(), "FR", "France", &mut effects).unwrap();
        assert_eq!(count, 1);
        state.select_track(0, &mut effects).unwrap();

        state.play(&mut effects);
        assert_eq!(state.status(), PlaybackStatus::Playing);

        let load = state.loaded().unwrap();
        state.track_ended(load, &mut effects);
        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert_eq!(state.current_index(), Some(0));
    }

    #[test]
    fn test_stale_media_events_ignored() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();
        let stale = state.loaded().unwrap();
        state.select_track(1, &mut effects).unwrap();
        state.play(&mut effects);

        let mut effects = Effects::new();
        assert!(!state.metadata_loaded(stale, Duration::from_secs(999), &mut effects));
        assert!(!state.position_changed(stale, Duration::from_secs(5), &mut effects));
        assert!(!state.track_ended(stale, &mut effects));
        assert!(!state.media_failed(stale, "gone", &mut effects));

        assert!(effects.is_empty());
        assert_eq!(state.current_index(), Some(1));
        assert_eq!(state.status(), PlaybackStatus::Playing);
        assert_eq!(state.duration(), None);
    }

    #[test]
    fn test_metadata_and_position_update_transport() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();
        let load = state.loaded().unwrap();

        assert_eq!(state.transport_view().duration, "0:00");
        state.metadata_loaded(load, Duration::from_secs(203), &mut effects);
        state.position_changed(load, Duration::from_secs(61), &mut effects);

        let view = state.transport_view();
        assert_eq!(view.elapsed, "1:01");
        assert_eq!(view.duration, "3:23");
        assert_eq!(view.label(), "Dawn Drive - Artist");
    }

    #[test]
    fn test_catalog_duration_used_until_metadata() {
        let mut state = loaded("FR");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();
        assert_eq!(state.duration(), Some(Duration::from_secs(174)));
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut state = loaded("FR");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();

        let mut effects = Effects::new();
        assert!(state.seek(Duration::from_secs(500), &mut effects));
        assert_eq!(state.position(), Duration::from_secs(174));
        assert_eq!(
            effects.commands,
            vec![MediaCommand::Seek(Duration::from_secs(174))]
        );
    }

    #[test]
    fn test_media_failure_reverts_to_stopped() {
        let mut state = loaded("US");
        let mut effects = Effects::new();
        state.select_track(0, &mut effects).unwrap();
        state.play(&mut effects);
        let load = state.loaded().unwrap();

        let mut effects = Effects::new();
        assert!(state.media_failed(load, "404", &mut effects));

        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert_eq!(state.current_index(), Some(0));
        assert_eq!(effects.notices.len(), 1);
        assert!(effects.notices[0].message.contains("404"));
    }

    #[test]
    fn test_filter_does_not_touch_active_playlist() {
        let mut state = loaded("IN");
        let before = state.active_playlist().to_vec();
        let mut effects = Effects::new();

        assert!(state.set_query("echo", &mut effects));
        assert!(!state.set_query("echo", &mut effects));

        let visible: Vec<_> = state.visible_playlist().iter().map(|v| v.index).collect();
        assert_eq!(visible, vec![1]);
        assert_eq!(state.active_playlist(), before.as_slice());
    }

    #[test]
    fn test_group_filter_against_selected_region() {
        let mut state = loaded("IN");
        let mut effects = Effects::new();

        state.set_region_group_filter(Some("Europe".into()), &mut effects);
        assert!(state.visible_playlist().is_empty());
        assert_eq!(state.track_list_view().empty_message, Some(NO_MATCHES_MESSAGE));

        state.set_region_group_filter(Some("Asia".into()), &mut effects);
        assert_eq!(state.visible_playlist().len(), 3);
    }

    #[test]
    fn test_highlight_follows_active_index() {
        let mut state = loaded("IN");
        let mut effects = Effects::new();
        state.select_track(2, &mut effects).unwrap();
        state.set_query("harbour", &mut effects);

        let view = state.track_list_view();
        assert_eq!(view.tracks.len(), 1);
        assert!(view.is_highlighted(&view.tracks[0]));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PlaybackStatus::Paused.to_string(), "paused");
        assert_eq!(PlaybackStatus::default(), PlaybackStatus::Stopped);
    }
}
