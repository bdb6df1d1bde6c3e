//! Dashboard configuration.
//!
//! Resolved in three layers: built-in defaults pointing at the workspace
//! `data/` directory, an optional TOML file, then environment overrides for
//! the dataset locations.

use std::path::{Path, PathBuf};

use crime_dashboard_analytics::AggregationOptions;
use serde::{Deserialize, Serialize};

use crate::DashboardError;

/// Overrides the boundary dataset location.
pub const BOUNDARIES_ENV: &str = "CRIME_DASHBOARD_BOUNDARIES";
/// Overrides the incident dataset location.
pub const INCIDENTS_ENV: &str = "CRIME_DASHBOARD_INCIDENTS";
/// Overrides the socio-economic dataset location.
pub const SOCIO_ENV: &str = "CRIME_DASHBOARD_SOCIO";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`, falling back to the
/// current directory.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Where a dataset comes from.
///
/// Written in config as a plain string: anything starting with `http://` or
/// `https://` is fetched, everything else is read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataSource {
    /// Local file.
    File(PathBuf),
    /// Remote URL.
    Url(String),
}

impl From<String> for DataSource {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value)
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl From<DataSource> for String {
    fn from(source: DataSource) -> Self {
        match source {
            DataSource::File(path) => path.to_string_lossy().into_owned(),
            DataSource::Url(url) => url,
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Locations of the three datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// Borough boundary `GeoJSON`.
    pub boundaries: DataSource,
    /// Incident record JSON array.
    pub incidents: DataSource,
    /// Socio-economic JSON object keyed by borough name.
    pub socio: DataSource,
}

impl Default for DataSources {
    fn default() -> Self {
        let data = data_dir();
        Self {
            boundaries: DataSource::File(data.join("Final_Borough_Map.geojson")),
            incidents: DataSource::File(data.join("london_crimes_2025_flexible.json")),
            socio: DataSource::File(data.join("socio_data.json")),
        }
    }
}

/// Which `GeoJSON` feature properties hold the area code and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryProperties {
    /// Property holding the area code.
    pub code_property: String,
    /// Property holding the display name.
    pub name_property: String,
}

impl Default for BoundaryProperties {
    fn default() -> Self {
        Self {
            code_property: "GSS_CODE".to_string(),
            name_property: "NAME".to_string(),
        }
    }
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset locations.
    pub sources: DataSources,
    /// Boundary property names.
    pub boundaries: BoundaryProperties,
    /// Aggregation tunables.
    pub aggregation: AggregationOptions,
}

impl DashboardConfig {
    /// Parses a TOML config. Missing sections and keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Toml`] if the text is not valid TOML for
    /// this structure.
    pub fn from_toml_str(s: &str) -> Result<Self, DashboardError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads the config: defaults, then `path` if given, then environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, DashboardError> {
        let config = match path {
            Some(path) => {
                log::debug!("Reading config from {}", path.display());
                Self::from_toml_str(&std::fs::read_to_string(path)?)?
            }
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Applies the `CRIME_DASHBOARD_*` environment overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies dataset overrides from an arbitrary key lookup.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let overrides = [
            (BOUNDARIES_ENV, &mut self.sources.boundaries),
            (INCIDENTS_ENV, &mut self.sources.incidents),
            (SOCIO_ENV, &mut self.sources.socio),
        ];
        for (key, slot) in overrides {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                log::debug!("{key} overrides dataset location with {value}");
                *slot = DataSource::from(value);
            }
        }
        self
    }
}
