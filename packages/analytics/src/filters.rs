//! Shared record predicates.
//!
//! Every view starts from the same base set (the excluded category removed)
//! and then applies some subset of the three selection dimensions. Views
//! name their subset as a `&[Dimension]` constant so the inclusion rules
//! stay explicit.

use crime_dashboard_analytics_models::SelectionState;
use crime_dashboard_crime_models::IncidentRecord;

/// A selection dimension a view may filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Exact match on `month` unless the month selection is "all".
    Month,
    /// Exact match on `area` (display name) unless the area selection is
    /// "all".
    Area,
    /// Membership of `type` in the category set, or everything when the set
    /// is empty.
    Categories,
}

impl Dimension {
    /// Whether `record` passes this dimension under `selection`.
    #[must_use]
    pub fn passes(self, record: &IncidentRecord, selection: &SelectionState) -> bool {
        match self {
            Self::Month => selection.month.matches(&record.month),
            Self::Area => selection.area.matches(&record.area),
            Self::Categories => {
                selection.categories.is_empty()
                    || selection.categories.contains(&record.crime_type)
            }
        }
    }
}

/// Whether `record` passes every listed dimension.
#[must_use]
pub fn passes_all(
    record: &IncidentRecord,
    selection: &SelectionState,
    dimensions: &[Dimension],
) -> bool {
    dimensions.iter().all(|d| d.passes(record, selection))
}

/// Drops the excluded category. Applied before anything else, whatever the
/// selection.
#[must_use]
pub fn base_records<'a>(
    records: &'a [IncidentRecord],
    excluded_category: &str,
) -> Vec<&'a IncidentRecord> {
    records
        .iter()
        .filter(|r| !r.is_excluded(excluded_category))
        .collect()
}

/// Narrows a working set to the records passing `dimensions`.
pub fn narrow<'a, 's>(
    records: &'s [&'a IncidentRecord],
    selection: &'s SelectionState,
    dimensions: &'s [Dimension],
) -> impl Iterator<Item = &'a IncidentRecord> + 's
where
    'a: 's,
{
    records
        .iter()
        .copied()
        .filter(move |r| passes_all(r, selection, dimensions))
}
