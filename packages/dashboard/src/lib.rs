#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record store, dataset loading, and the selection-driven dashboard
//! session.
//!
//! The three static datasets (borough boundaries, incident records,
//! socio-economic table) are fetched concurrently and all must succeed; a
//! failure in any one of them fails the whole load. Once loaded, the
//! [`RecordStore`] never changes. A [`Dashboard`] owns the current
//! selection, recomputes the full view bundle on every dispatched action,
//! and publishes each result on a `tokio::sync::watch` channel.

pub mod config;
pub mod loader;
pub mod session;
pub mod store;

use thiserror::Error;

pub use config::{BoundaryProperties, DashboardConfig, DataSource, DataSources};
pub use session::{Dashboard, Snapshot};
pub use store::RecordStore;

/// Errors that can occur while configuring or loading the dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Reading a local dataset or config file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching a remote dataset failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A dataset was not valid JSON for its expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The boundary dataset was not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The config file was not valid TOML for [`DashboardConfig`].
    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A dataset parsed but had the wrong overall structure.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
