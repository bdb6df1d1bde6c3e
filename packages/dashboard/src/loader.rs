//! Startup dataset loading.
//!
//! The three datasets are fetched and parsed concurrently and joined with
//! all-or-nothing semantics: the first failure aborts the load and no
//! partial store is ever built.

use crime_dashboard_crime_models::IncidentRecord;
use crime_dashboard_geography_models::{BoundaryFeature, GeoBoundary, SocioTable};
use geojson::{Feature, GeoJson};

use crate::{BoundaryProperties, DashboardConfig, DashboardError, DataSource, RecordStore};

/// Loads and parses all three datasets.
///
/// # Errors
///
/// Returns the first [`DashboardError`] from any fetch or parse. Nothing is
/// returned for the datasets that did succeed.
pub async fn load_store(config: &DashboardConfig) -> Result<RecordStore, DashboardError> {
    let client = reqwest::Client::new();

    let (boundary, incidents, socio) = tokio::try_join!(
        async {
            let text = read_source(&client, &config.sources.boundaries).await?;
            parse_boundary(&text, &config.boundaries)
        },
        async {
            let text = read_source(&client, &config.sources.incidents).await?;
            parse_incidents(&text)
        },
        async {
            let text = read_source(&client, &config.sources.socio).await?;
            parse_socio(&text)
        },
    )?;

    log::info!(
        "Loaded {} boundary features, {} incident records, {} socio-economic profiles",
        boundary.len(),
        incidents.len(),
        socio.len()
    );

    Ok(RecordStore::new(boundary, incidents, socio))
}

/// Reads a dataset's raw text from disk or over HTTP.
///
/// # Errors
///
/// Returns [`DashboardError`] if the file cannot be read, the request
/// fails, or the server responds with a non-success status.
pub async fn read_source(
    client: &reqwest::Client,
    source: &DataSource,
) -> Result<String, DashboardError> {
    log::debug!("Fetching {source}");
    match source {
        DataSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
        DataSource::Url(url) => {
            let resp = client.get(url).send().await?;
            if !resp.status().is_success() {
                return Err(DashboardError::Conversion {
                    message: format!("Request for {url} failed with status {}", resp.status()),
                });
            }
            Ok(resp.text().await?)
        }
    }
}

/// Parses the boundary `GeoJSON`, keeping only each feature's code and name.
///
/// Features missing either property are skipped with a warning.
///
/// # Errors
///
/// Returns [`DashboardError`] if the text is not `GeoJSON` or is a bare
/// geometry rather than a feature or feature collection.
pub fn parse_boundary(
    text: &str,
    properties: &BoundaryProperties,
) -> Result<GeoBoundary, DashboardError> {
    let features = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(DashboardError::Conversion {
                message: "Boundary GeoJSON is a bare geometry, expected features".to_string(),
            });
        }
    };

    let features = features
        .iter()
        .enumerate()
        .filter_map(|(i, feature)| {
            let boundary = boundary_feature(feature, properties);
            if boundary.is_none() {
                log::warn!(
                    "Skipping boundary feature {i}: missing {} or {}",
                    properties.code_property,
                    properties.name_property
                );
            }
            boundary
        })
        .collect();

    Ok(GeoBoundary { features })
}

fn boundary_feature(feature: &Feature, properties: &BoundaryProperties) -> Option<BoundaryFeature> {
    let code = property_string(feature, &properties.code_property)?;
    let name = property_string(feature, &properties.name_property)?;
    Some(BoundaryFeature { code, name })
}

fn property_string(feature: &Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses the incident JSON array.
///
/// # Errors
///
/// Returns [`DashboardError::Json`] if the text is not a JSON array of
/// objects. Individual malformed counts are not errors; they read as `0`.
pub fn parse_incidents(text: &str) -> Result<Vec<IncidentRecord>, DashboardError> {
    Ok(serde_json::from_str(text)?)
}

/// Parses the socio-economic JSON object.
///
/// # Errors
///
/// Returns [`DashboardError::Json`] if the text is not a JSON object of
/// borough rows.
pub fn parse_socio(text: &str) -> Result<SocioTable, DashboardError> {
    Ok(serde_json::from_str(text)?)
}
