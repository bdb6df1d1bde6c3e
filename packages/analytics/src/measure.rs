//! Which measure the count views aggregate.

use crime_dashboard_crime_models::{IncidentRecord, Measure};

/// Restricts a base set to `Offences` rows.
///
/// If the base set has no `Offences` rows at all, the whole base set is
/// returned instead so the view still has something to show. Headline
/// statistics do not go through this; they sum each measure separately.
#[must_use]
pub fn offences_or_all<'a>(base: &[&'a IncidentRecord]) -> Vec<&'a IncidentRecord> {
    let offences: Vec<_> = base
        .iter()
        .copied()
        .filter(|r| r.measure == Measure::Offences)
        .collect();

    if offences.is_empty() {
        log::trace!(
            "No Offences rows among {} base records; using all measures",
            base.len()
        );
        base.to_vec()
    } else {
        offences
    }
}
