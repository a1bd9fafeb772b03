//! Boundary to the media element that actually plays audio.
//!
//! The player core never waits on the media element. Commands are
//! fire-and-forget, and everything the element learns later (duration,
//! position, end of track, failures) comes back as a [`MediaEvent`] tagged
//! with the [`LoadId`] of the load it belongs to.

use std::fmt;
use std::time::Duration;

/// Generation tag for a media load.
///
/// Every track selection allocates a new id. Events carrying an older id
/// describe a track that is no longer loaded and are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadId(u64);

impl LoadId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Events reported by the media element
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Metadata for the loaded source is available
    MetadataLoaded { duration: Duration },
    /// Periodic playback position update
    PositionChanged { position: Duration },
    /// Playback reached the end of the source
    Ended,
    /// Loading or playback failed
    Error { reason: String },
}

/// Commands the player core issues to the media element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCommand {
    Load { load: LoadId, source: String },
    Play,
    Pause,
    Seek(Duration),
    Unload,
}

/// The media element collaborator.
///
/// Implementations should return quickly and report results through the
/// session's event channel rather than through return values.
pub trait MediaBackend: Send {
    /// Replace the current source. Playback does not start until [`play`](Self::play).
    fn load(&mut self, load: LoadId, source: &str);

    /// Start or resume playback of the loaded source.
    fn play(&mut self);

    /// Pause playback, keeping the position.
    fn pause(&mut self);

    /// Move the playback position.
    fn seek(&mut self, position: Duration);

    /// Drop the current source entirely.
    fn unload(&mut self);

    /// Current playback position as the element sees it.
    fn current_position(&self) -> Duration;

    /// Apply a recorded command.
    fn apply(&mut self, command: &MediaCommand) {
        match command {
            MediaCommand::Load { load, source } => self.load(*load, source),
            MediaCommand::Play => self.play(),
            MediaCommand::Pause => self.pause(),
            MediaCommand::Seek(position) => self.seek(*position),
            MediaCommand::Unload => self.unload(),
        }
    }
}
