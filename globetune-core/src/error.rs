use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Config file not found at {path}. A template has been created - edit it and restart to change the defaults.")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse TOML: {0}")]
    TomlParseError(#[from] toml::de::Error),

    // Catalog errors
    #[error("Invalid catalog: {message}")]
    CatalogInvalid { message: String },

    #[error("Failed to parse catalog JSON: {0}")]
    CatalogJson(#[from] serde_json::Error),

    #[error("Unsupported catalog format: {path} (expected .toml or .json)")]
    UnsupportedCatalogFormat { path: PathBuf },

    #[error("No region found for {key}")]
    RegionNotFound { key: String },

    // Player errors
    #[error("Track index {index} out of range (playlist has {len} tracks)")]
    TrackIndexOutOfRange { index: i64, len: usize },

    #[error("Playback failed for {uri}: {reason}")]
    MediaLoad { uri: String, reason: String },

    #[error("Map failed to load: {reason}")]
    MapDataLoad { reason: String },

    #[error("Player session is closed")]
    SessionClosed,

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
