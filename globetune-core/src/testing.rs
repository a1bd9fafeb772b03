//! Recording doubles for the media and presentation boundaries.

use crate::catalog::{Catalog, Region, Track};
use crate::media::{LoadId, MediaBackend, MediaCommand};
use crate::render::{Notice, Presenter, RegionHeader, TrackListView, TransportView};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// A rendered track list reduced to owned values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedList {
    pub ids: Vec<String>,
    pub indices: Vec<usize>,
    pub highlight: Option<usize>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Default)]
pub struct Recording {
    pub commands: Vec<MediaCommand>,
    pub position: Duration,
    pub headers: Vec<RegionHeader>,
    pub lists: Vec<RenderedList>,
    pub transports: Vec<TransportView>,
    pub notices: Vec<Notice>,
}

/// Shared view of everything the doubles saw
#[derive(Debug, Clone, Default)]
pub struct Probe(Arc<Mutex<Recording>>);

impl Probe {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.0.lock().unwrap()
    }

    pub fn media(&self) -> Box<RecordingMedia> {
        Box::new(RecordingMedia(self.clone()))
    }

    pub fn presenter(&self) -> Box<RecordingPresenter> {
        Box::new(RecordingPresenter(self.clone()))
    }

    pub fn take_commands(&self) -> Vec<MediaCommand> {
        std::mem::take(&mut self.lock().commands)
    }

    pub fn set_position(&self, position: Duration) {
        self.lock().position = position;
    }

    pub fn last_header(&self) -> Option<RegionHeader> {
        self.lock().headers.last().cloned()
    }

    pub fn last_list(&self) -> Option<RenderedList> {
        self.lock().lists.last().cloned()
    }

    pub fn list_renders(&self) -> usize {
        self.lock().lists.len()
    }

    pub fn last_transport(&self) -> Option<TransportView> {
        self.lock().transports.last().cloned()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.lock().notices.clone()
    }
}

pub struct RecordingMedia(Probe);

impl MediaBackend for RecordingMedia {
    fn load(&mut self, load: LoadId, source: &str) {
        let mut recording = self.0.lock();
        recording.position = Duration::ZERO;
        recording.commands.push(MediaCommand::Load {
            load,
            source: source.to_string(),
        });
    }

    fn play(&mut self) {
        self.0.lock().commands.push(MediaCommand::Play);
    }

    fn pause(&mut self) {
        self.0.lock().commands.push(MediaCommand::Pause);
    }

    fn seek(&mut self, position: Duration) {
        let mut recording = self.0.lock();
        recording.position = position;
        recording.commands.push(MediaCommand::Seek(position));
    }

    fn unload(&mut self) {
        self.0.lock().commands.push(MediaCommand::Unload);
    }

    fn current_position(&self) -> Duration {
        self.0.lock().position
    }
}

pub struct RecordingPresenter(Probe);

impl Presenter for RecordingPresenter {
    fn render_region_header(&mut self, header: &RegionHeader) {
        self.0.lock().headers.push(header.clone());
    }

    fn render_track_list(&mut self, list: &TrackListView<'_>) {
        let rendered = RenderedList {
            ids: list.tracks.iter().map(|v| v.track.id().to_string()).collect(),
            indices: list.tracks.iter().map(|v| v.index).collect(),
            highlight: list.highlight,
            empty_message: list.empty_message,
        };
        self.0.lock().lists.push(rendered);
    }

    fn render_transport_state(&mut self, transport: &TransportView) {
        self.0.lock().transports.push(transport.clone());
    }

    fn render_notice(&mut self, notice: &Notice) {
        self.0.lock().notices.push(notice.clone());
    }
}

/// Small catalog shaped like the bundled sample data
pub fn sample_catalog() -> Catalog {
    let track = |id: &str, title: &str, artist: &str, genre: &str| {
        Track::new(id, title, artist, genre, format!("https://cdn.example/{id}.mp3"))
    };
    Catalog::new(vec![
        Region::new(
            "IN",
            "India",
            "Asia",
            vec![
                track("in1", "Monsoon Streets", "The Mumbai Lanes", "Indie Pop"),
                track("in2", "Desert Echoes", "Riya & The Deltas", "Indie Folk"),
            ],
        ),
        Region::new(
            "US",
            "United States",
            "Americas",
            vec![
                track("us1", "Dawn Drive", "Brooklyn Noises", "Indie Rock"),
                track("us2", "Neon Alleys", "Prairie Sun", "Indie Electronic"),
            ],
        ),
        Region::new(
            "FR",
            "France",
            "Europe",
            vec![track("fr1", "Left Bank Sketches", "Les Petits Moments", "Chanson Indie")
                .with_duration_secs(174)],
        ),
    ])
    .unwrap()
}
