//! Joins area totals onto boundary features for map shading.

use crime_dashboard_analytics_models::{AreaShade, SelectionState, ViewBundle};
use crime_dashboard_geography_models::GeoBoundary;

/// Minimum fill for an area with any incidents.
pub const BASE_INTENSITY: f64 = 0.1;

/// Fill range above [`BASE_INTENSITY`] scaled by the area's share of the
/// maximum.
pub const INTENSITY_RANGE: f64 = 0.8;

/// Fill intensity for an area: `0` when it has no incidents, otherwise
/// scaled linearly between [`BASE_INTENSITY`] and
/// `BASE_INTENSITY + INTENSITY_RANGE`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn intensity(total: u64, max_crimes: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    BASE_INTENSITY + (total as f64 / max_crimes.max(1) as f64) * INTENSITY_RANGE
}

/// One shade per boundary feature, in feature order.
///
/// Features join on area code. The selected flag compares the feature's
/// display name with the area selection, which is how map clicks set it.
#[must_use]
pub fn shade_areas(
    boundary: &GeoBoundary,
    bundle: &ViewBundle,
    selection: &SelectionState,
) -> Vec<AreaShade> {
    boundary
        .features
        .iter()
        .map(|feature| {
            let total = bundle.area_total(&feature.code);
            AreaShade {
                code: feature.code.clone(),
                name: feature.name.clone(),
                total,
                intensity: intensity(total, bundle.max_crimes),
                selected: selection.area.is_active(&feature.name),
            }
        })
        .collect()
}
