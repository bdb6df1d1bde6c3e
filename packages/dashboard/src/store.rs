//! The immutable record store.

use crime_dashboard_analytics::{AggregationOptions, available_months, compute_view_bundle};
use crime_dashboard_analytics_models::{Selection, SelectionState, ViewBundle};
use crime_dashboard_crime_models::IncidentRecord;
use crime_dashboard_geography_models::{GeoBoundary, SocioEconomicEntry, SocioTable};

/// Everything loaded at startup. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    boundary: GeoBoundary,
    incidents: Vec<IncidentRecord>,
    socio: SocioTable,
}

impl RecordStore {
    /// Builds a store from already-parsed datasets.
    #[must_use]
    pub const fn new(boundary: GeoBoundary, incidents: Vec<IncidentRecord>, socio: SocioTable) -> Self {
        Self {
            boundary,
            incidents,
            socio,
        }
    }

    /// Borough boundary features.
    #[must_use]
    pub const fn boundary(&self) -> &GeoBoundary {
        &self.boundary
    }

    /// Raw incident rows, including the excluded category.
    #[must_use]
    pub fn incidents(&self) -> &[IncidentRecord] {
        &self.incidents
    }

    /// Socio-economic table keyed by borough name.
    #[must_use]
    pub const fn socio(&self) -> &SocioTable {
        &self.socio
    }

    /// Socio-economic profile for the selected area. `None` when no area is
    /// selected or the table has no row for it.
    #[must_use]
    pub fn socio_profile(&self, area: &Selection) -> Option<&SocioEconomicEntry> {
        area.value().and_then(|name| self.socio.get(name))
    }

    /// Whether `name` is the display name of a loaded boundary feature.
    /// Area selections are only meaningful for these names.
    #[must_use]
    pub fn has_area(&self, name: &str) -> bool {
        self.boundary.by_name(name).is_some()
    }

    /// Month labels for the month picker.
    #[must_use]
    pub fn available_months(&self) -> Vec<String> {
        available_months(&self.incidents)
    }

    /// Computes the view bundle for `selection`.
    #[must_use]
    pub fn view(&self, selection: &SelectionState, options: &AggregationOptions) -> ViewBundle {
        compute_view_bundle(&self.incidents, selection, options)
    }
}
