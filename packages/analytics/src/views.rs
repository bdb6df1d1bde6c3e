//! Per-view aggregations.
//!
//! Each view takes the base set (excluded category already removed) and the
//! full selection, and applies only the dimensions it lists:
//!
//! | View | Month | Area | Categories | Measure |
//! |------|:-----:|:----:|:----------:|---------|
//! | [`headline_stats`] | yes | yes | yes | both, summed separately |
//! | [`area_totals`] | yes | no | yes | offences, else all |
//! | [`trend`] | no | yes | yes | offences, else all |
//! | [`category_ranking`] | yes | yes | no | offences, else all |

use std::collections::{BTreeMap, HashMap};

use crime_dashboard_analytics_models::{CategoryRank, HeadlineStats, SelectionState, TrendPoint};
use crime_dashboard_crime_models::{IncidentRecord, Measure};
use crime_dashboard_geography_models::round1;

use crate::filters::{Dimension, narrow};
use crate::measure::offences_or_all;

/// Headline statistics see every dimension.
pub const STATS_DIMENSIONS: &[Dimension] =
    &[Dimension::Month, Dimension::Area, Dimension::Categories];

/// The map keeps every area visible; a selected area is only outlined.
pub const AREA_TOTALS_DIMENSIONS: &[Dimension] = &[Dimension::Month, Dimension::Categories];

/// The trend keeps every month so the selected month stays clickable.
pub const TREND_DIMENSIONS: &[Dimension] = &[Dimension::Area, Dimension::Categories];

/// The ranking keeps every category so each one can be toggled.
pub const RANKING_DIMENSIONS: &[Dimension] = &[Dimension::Month, Dimension::Area];

/// Offences, positive outcomes, and the ratio between them.
#[must_use]
pub fn headline_stats(base: &[&IncidentRecord], selection: &SelectionState) -> HeadlineStats {
    let mut total_offences = 0_u64;
    let mut total_positive_outcomes = 0_u64;

    for record in narrow(base, selection, STATS_DIMENSIONS) {
        match record.measure {
            Measure::Offences => {
                total_offences = total_offences.saturating_add(record.count);
            }
            Measure::PositiveOutcomes => {
                total_positive_outcomes = total_positive_outcomes.saturating_add(record.count);
            }
            Measure::Unrecognized => {}
        }
    }

    HeadlineStats {
        total_offences,
        total_positive_outcomes,
        efficiency_rate: efficiency_rate(total_offences, total_positive_outcomes),
    }
}

/// `round1(100 * outcomes / offences)`, or `0.0` with no offences.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn efficiency_rate(total_offences: u64, total_positive_outcomes: u64) -> f64 {
    if total_offences == 0 {
        return 0.0;
    }
    round1(100.0 * total_positive_outcomes as f64 / total_offences as f64)
}

/// Per-area-code totals for the choropleth, plus the shading maximum.
#[must_use]
pub fn area_totals(
    base: &[&IncidentRecord],
    selection: &SelectionState,
) -> (BTreeMap<String, u64>, u64) {
    let working = offences_or_all(base);

    let mut totals = BTreeMap::new();
    for record in narrow(&working, selection, AREA_TOTALS_DIMENSIONS) {
        let total = totals.entry(record.area_code.clone()).or_insert(0_u64);
        *total = total.saturating_add(record.count);
    }

    let max_crimes = max_crimes(&totals);
    (totals, max_crimes)
}

/// Largest area total with a floor of 1, so shading never divides by zero.
#[must_use]
pub fn max_crimes(totals: &BTreeMap<String, u64>) -> u64 {
    totals.values().copied().max().unwrap_or(0).max(1)
}

/// Monthly totals in ascending month-label order.
#[must_use]
pub fn trend(base: &[&IncidentRecord], selection: &SelectionState) -> Vec<TrendPoint> {
    let working = offences_or_all(base);

    let mut by_month: BTreeMap<&str, u64> = BTreeMap::new();
    for record in narrow(&working, selection, TREND_DIMENSIONS) {
        let total = by_month.entry(record.month.as_str()).or_insert(0);
        *total = total.saturating_add(record.count);
    }

    by_month
        .into_iter()
        .map(|(month, total)| TrendPoint {
            month: month.to_string(),
            total,
        })
        .collect()
}

/// The `limit` largest crime types, descending by total. Ties keep the order
/// in which the types first appear in the data. Each entry is flagged with
/// whether the type is in the selected category set.
#[must_use]
pub fn category_ranking(
    base: &[&IncidentRecord],
    selection: &SelectionState,
    limit: usize,
) -> Vec<CategoryRank> {
    let working = offences_or_all(base);

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, u64)> = Vec::new();
    for record in narrow(&working, selection, RANKING_DIMENSIONS) {
        let crime_type = record.crime_type.as_str();
        if let Some(&i) = index.get(crime_type) {
            totals[i].1 = totals[i].1.saturating_add(record.count);
        } else {
            index.insert(crime_type, totals.len());
            totals.push((crime_type, record.count));
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));

    totals
        .into_iter()
        .take(limit)
        .map(|(crime_type, total)| CategoryRank {
            crime_type: crime_type.to_string(),
            total,
            selected: selection.is_category_selected(crime_type),
        })
        .collect()
}
