//! Wires inbound events to the player state and drives the media element and
//! the presenter with the results.

use crate::catalog::Catalog;
use crate::config::{Config, PlayerConfig};
use crate::debounce::Debouncer;
use crate::error::CoreError;
use crate::event::{Event, TransportCommand};
use crate::media::{LoadId, MediaBackend, MediaEvent};
use crate::player::{Effects, PlayerState};
use crate::render::{Notice, Presenter};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const LOG_TARGET: &str = "globetune::controller";

/// Owns the player state and both outbound collaborators
pub struct Controller {
    catalog: Arc<Catalog>,
    policy: PlayerConfig,
    state: PlayerState,
    search: Debouncer<String>,
    media: Box<dyn MediaBackend>,
    presenter: Box<dyn Presenter>,
}

impl Controller {
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        config: &Config,
        media: Box<dyn MediaBackend>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            catalog,
            policy: config.player.clone(),
            state: PlayerState::new(),
            search: Debouncer::new(config.search.debounce()),
            media,
            presenter,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &PlayerState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Render the initial screen
    pub fn start(&mut self) {
        let mut effects = Effects::new();
        effects.changes.header = true;
        effects.changes.list = true;
        effects.changes.transport = true;
        self.apply(effects);
    }

    /// Process one inbound event to completion
    pub fn handle(&mut self, event: Event, now: Instant) {
        debug!(target: LOG_TARGET, "Handling {} event", event.kind());
        match event {
            Event::RegionSelected { key, display_name } => {
                self.select_region(&key, &display_name);
            }
            Event::TrackChosen { index } => {
                let play = self.policy.auto_play_on_track_select;
                self.choose_track(index, play);
            }
            Event::TrackPlayRequested { index } => self.choose_track(index, true),
            Event::Transport(command) => self.transport(command),
            Event::SearchInput(text) => self.search_input(text, now),
            Event::RegionGroupFilter(group) => self.set_region_group_filter(group),
            Event::Media { load, event } => self.media_event(load, event),
            Event::MapDataFailed { reason } => self.map_data_failed(reason),
        }
    }

    /// Earliest instant at which [`Controller::poll_timers`] has work to do
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Fire any timer whose deadline has passed
    pub fn poll_timers(&mut self, now: Instant) {
        if let Some(query) = self.search.fire(now) {
            self.apply_query(query);
        }
    }

    /// Load the region the map reported and select its first track
    pub fn select_region(&mut self, key: &str, display_name: &str) {
        let mut effects = Effects::new();
        match self
            .state
            .load_region(&self.catalog, key, display_name, &mut effects)
        {
            Ok(count) => {
                info!(target: LOG_TARGET, "Selected region {} with {} tracks", key, count);
                if count > 0
                    && self.state.select_track(0, &mut effects).is_ok()
                    && self.policy.auto_play_on_region_select
                {
                    self.state.play(&mut effects);
                }
            }
            Err(e) => {
                info!(target: LOG_TARGET, "{}, showing empty state", e);
            }
        }
        self.apply(effects);
    }

    /// Handle a click on a track row, optionally starting playback
    pub fn choose_track(&mut self, index: i64, play: bool) {
        let mut effects = Effects::new();
        let selected = self
            .state
            .check_index(index)
            .and_then(|index| self.state.select_track(index, &mut effects).map(|_| index));
        match selected {
            Ok(index) => {
                if let Some(track) = self.state.current_track() {
                    info!(target: LOG_TARGET, "Loaded track {}: {}", index, track.title());
                }
                if play {
                    self.state.play(&mut effects);
                }
            }
            Err(e) => {
                warn!(target: LOG_TARGET, "Ignoring track selection: {}", e);
            }
        }
        self.apply(effects);
    }

    pub fn transport(&mut self, command: TransportCommand) {
        let mut effects = Effects::new();
        let state = &mut self.state;
        match command {
            TransportCommand::Play => {
                state.play(&mut effects);
            }
            TransportCommand::Pause => {
                state.pause(&mut effects);
            }
            TransportCommand::Toggle => {
                state.toggle(&mut effects);
            }
            TransportCommand::Stop => {
                state.stop(&mut effects);
            }
            TransportCommand::Next => {
                if state.next(&mut effects).is_some() && self.policy.resume_on_skip {
                    state.play(&mut effects);
                }
            }
            TransportCommand::Previous => {
                if state.previous(&mut effects).is_some() && self.policy.resume_on_skip {
                    state.play(&mut effects);
                }
            }
            TransportCommand::Seek(position) => {
                state.seek(position, &mut effects);
            }
            TransportCommand::SeekForward | TransportCommand::SeekBackward => {
                let target = step_position(
                    self.media.current_position(),
                    self.policy.seek_step(),
                    command == TransportCommand::SeekForward,
                );
                state.seek(target, &mut effects);
            }
        }
        if effects.is_empty() {
            debug!(target: LOG_TARGET, "Transport {:?} had no effect", command);
        }
        self.apply(effects);
    }

    /// Queue a search query; it is applied once input goes quiet
    pub fn search_input(&mut self, text: String, now: Instant) {
        self.search.schedule(text, now);
    }

    fn apply_query(&mut self, query: String) {
        let mut effects = Effects::new();
        if self.state.set_query(query, &mut effects) {
            debug!(
                target: LOG_TARGET,
                "Search applied, {} tracks visible",
                self.state.visible_playlist().len()
            );
        }
        self.apply(effects);
    }

    /// Region-group filter changes apply immediately
    pub fn set_region_group_filter(&mut self, group: Option<String>) {
        let mut effects = Effects::new();
        self.state.set_region_group_filter(group, &mut effects);
        self.apply(effects);
    }

    pub fn media_event(&mut self, load: LoadId, event: MediaEvent) {
        let mut effects = Effects::new();
        let current = match event {
            MediaEvent::MetadataLoaded { duration } => {
                self.state.metadata_loaded(load, duration, &mut effects)
            }
            MediaEvent::PositionChanged { position } => {
                self.state.position_changed(load, position, &mut effects)
            }
            MediaEvent::Ended => {
                let ended = self.state.track_ended(load, &mut effects);
                if ended {
                    info!(target: LOG_TARGET, "Track ended, now {}", self.state.status());
                }
                ended
            }
            MediaEvent::Error { ref reason } => {
                let failed = self.state.media_failed(load, reason, &mut effects);
                if failed {
                    warn!(target: LOG_TARGET, "Media error for {}: {}", load, reason);
                }
                failed
            }
        };
        if !current {
            debug!(target: LOG_TARGET, "Ignoring stale media event for {}", load);
        }
        self.apply(effects);
    }

    /// The map could not be loaded; the player stays usable
    pub fn map_data_failed(&mut self, reason: String) {
        let error = CoreError::MapDataLoad { reason };
        warn!(target: LOG_TARGET, "{}", error);
        self.presenter.render_notice(&Notice::from(&error));
    }

    fn apply(&mut self, effects: Effects) {
        for command in &effects.commands {
            self.media.apply(command);
        }
        for notice in &effects.notices {
            self.presenter.render_notice(notice);
        }
        if effects.changes.header {
            self.presenter.render_region_header(&self.state.header());
        }
        if effects.changes.list {
            self.presenter.render_track_list(&self.state.track_list_view());
        }
        if effects.changes.transport {
            self.presenter
                .render_transport_state(&self.state.transport_view());
        }
    }
}

fn step_position(from: Duration, step: Duration, forward: bool) -> Duration {
    if forward {
        from + step
    } else {
        from.saturating_sub(step)
    }
}
