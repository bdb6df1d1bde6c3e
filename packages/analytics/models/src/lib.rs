#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection state and derived view types for the crime dashboard.
//!
//! The aggregation engine turns a [`SelectionState`] into a [`ViewBundle`].
//! These are the shapes the map, trend chart, category chart and headline
//! panel render from.

pub mod selection;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use selection::{ALL, Selection, SelectionAction, SelectionState};

/// Headline figures for the current filter scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineStats {
    /// Sum of `Offences` counts.
    pub total_offences: u64,
    /// Sum of `Positive Outcomes` counts.
    pub total_positive_outcomes: u64,
    /// Positive outcomes as a percentage of offences, one decimal place.
    /// `0.0` when there are no offences.
    pub efficiency_rate: f64,
}

/// One point of the monthly trend line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Month label.
    pub month: String,
    /// Summed count for the month.
    pub total: u64,
}

/// One bar of the category ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRank {
    /// Crime type label.
    #[serde(rename = "type")]
    pub crime_type: String,
    /// Summed count for the type.
    pub total: u64,
    /// Whether the type is in the selected category set (highlight only).
    pub selected: bool,
}

/// Everything the dashboard renders for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBundle {
    /// Area code -> summed count, for choropleth shading.
    pub area_totals: BTreeMap<String, u64>,
    /// Largest value in `area_totals`, never below 1.
    pub max_crimes: u64,
    /// Monthly totals, ascending by month label.
    pub trend: Vec<TrendPoint>,
    /// Top categories, descending by total.
    pub category_ranking: Vec<CategoryRank>,
    /// Headline figures.
    pub stats: HeadlineStats,
}

impl Default for ViewBundle {
    fn default() -> Self {
        Self {
            area_totals: BTreeMap::new(),
            max_crimes: 1,
            trend: Vec::new(),
            category_ranking: Vec::new(),
            stats: HeadlineStats::default(),
        }
    }
}

impl ViewBundle {
    /// Total for an area code, `0` if the area has no rows in scope.
    #[must_use]
    pub fn area_total(&self, code: &str) -> u64 {
        self.area_totals.get(code).copied().unwrap_or(0)
    }
}

/// A boundary feature joined with its choropleth total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaShade {
    /// Area code.
    pub code: String,
    /// Borough display name.
    pub name: String,
    /// Summed count for the area.
    pub total: u64,
    /// Fill intensity in `[0, 0.9]`: `0` for empty areas, otherwise
    /// `0.1 + 0.8 * total / maxCrimes`.
    pub intensity: f64,
    /// Whether this is the selected area.
    pub selected: bool,
}
