pub mod catalog;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod event;
pub mod filter;
pub mod media;
pub mod paths;
pub mod player;
pub mod render;
pub mod session;
pub mod time;

#[cfg(test)]
mod testing;

pub use catalog::{Catalog, Region, Track};
pub use config::{
    CatalogConfig, Config, LoggingConfig, PlayerConfig, SearchConfig, CONFIG_TEMPLATE,
};
pub use controller::Controller;
pub use debounce::Debouncer;

pub use error::{CoreError, Result};
pub use event::{Event, TransportCommand};
pub use filter::{recompute_visible, TrackFilter, VisibleTrack};
pub use media::{LoadId, MediaBackend, MediaCommand, MediaEvent};
pub use paths::{
    config_dir, config_path, log_file_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_FILE_NAME,
};
pub use player::{Changes, Effects, PlaybackStatus, PlayerState, Selection};
pub use render::{
    Notice, NoticeLevel, NowPlaying, Presenter, RegionHeader, TrackListView, TransportView,
};
pub use session::{channel, Session, SessionEvents, SessionHandle};
pub use time::{format_clock, format_optional_clock, DurationExt};
