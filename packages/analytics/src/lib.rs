#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation engine for the crime dashboard.
//!
//! [`compute_view_bundle`] is a pure function of the incident records and
//! the current selection. It is rerun in full on every selection change;
//! nothing is cached between runs. Each of the four views applies its own
//! subset of the selection dimensions (see [`views`]).

pub mod choropleth;
pub mod filters;
pub mod measure;
pub mod views;

use std::collections::BTreeSet;

use crime_dashboard_analytics_models::{SelectionState, ViewBundle};
use crime_dashboard_crime_models::{EXCLUDED_CATEGORY, IncidentRecord};
use serde::{Deserialize, Serialize};

/// Number of bars in the category ranking.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Tunables for [`compute_view_bundle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationOptions {
    /// Crime type dropped from every view.
    pub excluded_category: String,
    /// Maximum number of entries in the category ranking.
    pub ranking_limit: usize,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            excluded_category: EXCLUDED_CATEGORY.to_string(),
            ranking_limit: DEFAULT_RANKING_LIMIT,
        }
    }
}

/// Derives every dashboard view for `selection`.
///
/// An empty record list yields [`ViewBundle::default`].
#[must_use]
pub fn compute_view_bundle(
    records: &[IncidentRecord],
    selection: &SelectionState,
    options: &AggregationOptions,
) -> ViewBundle {
    if records.is_empty() {
        return ViewBundle::default();
    }

    let base = filters::base_records(records, &options.excluded_category);
    log::trace!(
        "Aggregating {} of {} records for {selection:?}",
        base.len(),
        records.len()
    );

    let stats = views::headline_stats(&base, selection);
    let (area_totals, max_crimes) = views::area_totals(&base, selection);
    let trend = views::trend(&base, selection);
    let category_ranking = views::category_ranking(&base, selection, options.ranking_limit);

    ViewBundle {
        area_totals,
        max_crimes,
        trend,
        category_ranking,
        stats,
    }
}

/// Every distinct month label in the raw records, ascending. Reads the
/// unfiltered list, so months that only hold excluded rows still appear.
#[must_use]
pub fn available_months(records: &[IncidentRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.month.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crime_dashboard_analytics_models::{CategoryRank, TrendPoint};
    use crime_dashboard_crime_models::Measure;

    use super::*;

    fn camden() -> Vec<IncidentRecord> {
        vec![
            IncidentRecord::new("Camden", "C1", "2025-01", "BURGLARY", Measure::Offences, 10),
            IncidentRecord::new(
                "Camden",
                "C1",
                "2025-01",
                "BURGLARY",
                Measure::PositiveOutcomes,
                2,
            ),
        ]
    }

    #[test]
    fn camden_scenario_all_selected() {
        let bundle = compute_view_bundle(
            &camden(),
            &SelectionState::default(),
            &AggregationOptions::default(),
        );

        assert_eq!(bundle.stats.total_offences, 10);
        assert_eq!(bundle.stats.total_positive_outcomes, 2);
        assert!((bundle.stats.efficiency_rate - 20.0).abs() < 1e-9);
        assert_eq!(bundle.area_totals, BTreeMap::from([("C1".to_string(), 10)]));
        assert_eq!(bundle.max_crimes, 10);
        assert_eq!(
            bundle.trend,
            vec![TrendPoint {
                month: "2025-01".to_string(),
                total: 10
            }]
        );
        assert_eq!(
            bundle.category_ranking,
            vec![CategoryRank {
                crime_type: "BURGLARY".to_string(),
                total: 10,
                selected: false
            }]
        );
    }

    #[test]
    fn camden_scenario_category_selected() {
        let records = camden();
        let options = AggregationOptions::default();
        let unselected = compute_view_bundle(&records, &SelectionState::default(), &options);
        let selection = SelectionState::default().toggle_category("BURGLARY");
        let bundle = compute_view_bundle(&records, &selection, &options);

        assert!(bundle.category_ranking[0].selected);
        assert_eq!(bundle.area_totals, BTreeMap::from([("C1".to_string(), 10)]));
        assert_eq!(bundle.trend, unselected.trend);
    }

    #[test]
    fn without_offences_views_use_whole_working_set() {
        let records = vec![
            IncidentRecord::new("Camden", "C1", "2025-01", "BURGLARY", Measure::PositiveOutcomes, 2),
            IncidentRecord::new("Camden", "C1", "2025-02", "THEFT", Measure::PositiveOutcomes, 6),
        ];
        let bundle = compute_view_bundle(
            &records,
            &SelectionState::default(),
            &AggregationOptions::default(),
        );

        assert_eq!(bundle.area_totals["C1"], 8);
        assert_eq!(bundle.trend.len(), 2);
        assert_eq!(bundle.category_ranking[0].crime_type, "THEFT");
        assert_eq!(bundle.stats.total_offences, 0);
        assert!(bundle.stats.efficiency_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn excluded_category_never_reaches_any_view() {
        let mut records = camden();
        records.push(IncidentRecord::new(
            "Camden",
            "C1",
            "2025-01",
            EXCLUDED_CATEGORY,
            Measure::Offences,
            500,
        ));
        let selection = SelectionState::default().toggle_category(EXCLUDED_CATEGORY);
        let bundle = compute_view_bundle(&records, &selection, &AggregationOptions::default());

        assert_eq!(bundle.stats.total_offences, 0);
        assert!(bundle.area_totals.is_empty());
        assert_eq!(bundle.max_crimes, 1);
        assert!(bundle.trend.is_empty());
        assert!(
            bundle
                .category_ranking
                .iter()
                .all(|r| r.crime_type != EXCLUDED_CATEGORY)
        );
    }

    #[test]
    fn selection_with_no_matches_is_empty_not_an_error() {
        let selection = SelectionState::default().toggle_month("2030-12");
        let bundle = compute_view_bundle(&camden(), &selection, &AggregationOptions::default());

        assert_eq!(bundle.stats.total_offences, 0);
        assert!(bundle.stats.efficiency_rate.abs() < f64::EPSILON);
        assert!(bundle.area_totals.is_empty());
        assert_eq!(bundle.max_crimes, 1);
        assert!(bundle.category_ranking.is_empty());
        assert_eq!(bundle.trend.len(), 1);
    }

    #[test]
    fn empty_store_yields_default_bundle() {
        let bundle = compute_view_bundle(
            &[],
            &SelectionState::default(),
            &AggregationOptions::default(),
        );
        assert_eq!(bundle, ViewBundle::default());
    }

    #[test]
    fn custom_ranking_limit() {
        let records: Vec<_> = ["A", "B", "C", "D"]
            .iter()
            .map(|t| IncidentRecord::new("Camden", "C1", "2025-01", *t, Measure::Offences, 1))
            .collect();
        let options = AggregationOptions {
            ranking_limit: 2,
            ..AggregationOptions::default()
        };
        let bundle = compute_view_bundle(&records, &SelectionState::default(), &options);
        assert_eq!(bundle.category_ranking.len(), 2);
    }

    #[test]
    fn months_come_from_raw_records() {
        let mut records = camden();
        records.push(IncidentRecord::new(
            "Camden",
            "C1",
            "2024-12",
            EXCLUDED_CATEGORY,
            Measure::Offences,
            1,
        ));
        records.push(IncidentRecord::new("Hackney", "H1", "2025-01", "THEFT", Measure::Offences, 1));
        assert_eq!(available_months(&records), ["2024-12", "2025-01"]);
    }
}
