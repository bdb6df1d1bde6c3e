#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Borough boundary and socio-economic profile types.
//!
//! These types describe the static per-borough context shown next to the
//! crime figures: which boundary polygon belongs to which borough code, and
//! each borough's pay, employment, deprivation and education indicators.
//! They are independent of the incident data itself.

pub mod socio;

use serde::{Deserialize, Serialize};

pub use socio::{EducationProfile, SocioEconomicEntry, SocioTable, WeeklyPay};

/// Rounds to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The two identifying properties of a borough boundary feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryFeature {
    /// Stable area code (e.g. GSS code "E09000007"). Joins against incident
    /// `areaCode`.
    pub code: String,
    /// Borough display name (e.g. "Camden").
    pub name: String,
}

/// The borough boundary collection, reduced to the fields the dashboard
/// joins on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBoundary {
    /// Features in source order.
    pub features: Vec<BoundaryFeature>,
}

impl GeoBoundary {
    /// Looks up a feature by display name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&BoundaryFeature> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
