//! Read-only catalog of regions and their tracks.
//!
//! A catalog is built once from external data (a TOML or JSON file, or data
//! compiled into the binary) and shared for the rest of the session. Region
//! keys are ISO country codes or canonical country names, exactly as the map
//! layer reports them.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// A single playable track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    id: String,
    title: String,
    artist: String,
    genre: String,
    /// Audio source locator handed to the media element
    #[serde(alias = "src")]
    source: String,
    /// Known duration, if the catalog carries one
    #[serde(default, alias = "duration", skip_serializing_if = "Option::is_none")]
    duration_secs: Option<u32>,
}

impl Track {
    /// Create a new track with an unknown duration
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            genre: genre.into(),
            source: source.into(),
            duration_secs: None,
        }
    }

    /// Set the known duration
    #[must_use]
    pub const fn with_duration_secs(mut self, secs: u32) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn artist(&self) -> &str {
        &self.artist
    }

    #[must_use]
    pub fn genre(&self) -> &str {
        &self.genre
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Duration from the catalog data, `None` until the media element reports it
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(|secs| Duration::from_secs(u64::from(secs)))
    }
}

/// A selectable region (country) with its ordered track list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    key: String,
    name: String,
    group: String,
    tracks: Vec<Track>,
}

impl Region {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        group: impl Into<String>,
        tracks: Vec<Track>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            group: group.into(),
            tracks,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name shown in the region header
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Broader grouping label (continent or world region), empty if ungrouped
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Tracks in presentation order
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

/// On-disk shape of a region entry; the key comes from the enclosing map.
#[derive(Debug, Deserialize)]
struct RegionRecord {
    name: String,
    #[serde(default, alias = "region")]
    group: String,
    #[serde(default)]
    tracks: Vec<Track>,
}

/// Mapping from region key to region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    regions: BTreeMap<String, Region>,
}

impl Catalog {
    /// Build a catalog from regions, validating keys and track identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CatalogInvalid`] if a key is empty or repeated, or
    /// if a track has an empty or duplicate id or an empty source.
    pub fn new(regions: impl IntoIterator<Item = Region>) -> Result<Self> {
        let mut map = BTreeMap::new();
        let mut track_ids = HashSet::new();

        for region in regions {
            if region.key.trim().is_empty() {
                return Err(invalid(format!(
                    "region '{}' has an empty key",
                    region.name
                )));
            }

            for track in &region.tracks {
                if track.id.trim().is_empty() {
                    return Err(invalid(format!(
                        "track '{}' in region {} has an empty id",
                        track.title, region.key
                    )));
                }
                if track.source.trim().is_empty() {
                    return Err(invalid(format!(
                        "track {} in region {} has an empty source",
                        track.id, region.key
                    )));
                }
                if !track_ids.insert(track.id.clone()) {
                    return Err(invalid(format!("duplicate track id {}", track.id)));
                }
            }

            if map.contains_key(&region.key) {
                return Err(invalid(format!("duplicate region key {}", region.key)));
            }
            map.insert(region.key.clone(), region);
        }

        Ok(Self { regions: map })
    }

    /// Parse a catalog from TOML, one table per region key.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the catalog fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let records: BTreeMap<String, RegionRecord> = toml::from_str(content)?;
        Self::from_records(records)
    }

    /// Parse a catalog from JSON, one object per region key.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the catalog fails validation.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let records: BTreeMap<String, RegionRecord> = serde_json::from_str(content)?;
        Self::from_records(records)
    }

    /// Load a catalog file, choosing the parser from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension,
    /// or fails to parse or validate.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?),
            _ => Err(CoreError::UnsupportedCatalogFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn from_records(records: BTreeMap<String, RegionRecord>) -> Result<Self> {
        Self::new(
            records
                .into_iter()
                .map(|(key, record)| Region::new(key, record.name, record.group, record.tracks)),
        )
    }

    /// Look up a region by key
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Region> {
        self.regions.get(key)
    }

    /// Look up a region by display name, ignoring case.
    ///
    /// The first match in key order wins if names repeat.
    #[must_use]
    pub fn lookup_by_name(&self, name: &str) -> Option<&Region> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.regions
            .values()
            .find(|region| region.name.to_lowercase() == wanted)
    }

    /// Resolve a map selection: by key first, then by display name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RegionNotFound`] when neither lookup matches.
    pub fn resolve(&self, key: &str, display_name: &str) -> Result<&Region> {
        self.lookup(key)
            .or_else(|| self.lookup_by_name(display_name))
            .ok_or_else(|| CoreError::RegionNotFound {
                key: key.to_string(),
            })
    }

    /// All regions in key order
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Distinct non-empty grouping labels, sorted
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        self.regions
            .values()
            .map(Region::group)
            .filter(|group| !group.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn invalid(message: String) -> CoreError {
    CoreError::CatalogInvalid { message }
}
