//! Text and JSON renderings of dashboard snapshots.

use std::collections::BTreeSet;
use std::fmt;

use crime_dashboard::Snapshot;
use crime_dashboard_analytics_models::{AreaShade, Selection, SelectionAction};
use crime_dashboard_geography_models::{EducationProfile, SocioEconomicEntry};
use serde::Serialize;

/// How many boroughs the text summary lists.
const BUSIEST_AREAS: usize = 5;

/// Turns `view` arguments into the gestures that produce that selection
/// from the initial state. Repeated categories count once.
#[must_use]
pub fn actions_from_args(
    month: Option<&str>,
    area: Option<&str>,
    categories: &[String],
) -> Vec<SelectionAction> {
    let mut actions = Vec::new();

    if let Some(month) = month {
        actions.push(SelectionAction::SetMonth(Selection::from(month)));
    }
    if let Some(Selection::Only(area)) = area.map(Selection::from) {
        actions.push(SelectionAction::ToggleArea(area));
    }
    actions.extend(
        categories
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|c| SelectionAction::ToggleCategory(c.to_string())),
    );

    actions
}

/// Everything `view` prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewReport<'a> {
    #[serde(flatten)]
    pub snapshot: &'a Snapshot,
    pub areas: Vec<AreaShade>,
    pub socio: Option<&'a SocioEconomicEntry>,
    pub education: Option<EducationProfile>,
}

impl<'a> ViewReport<'a> {
    #[must_use]
    pub fn new(
        snapshot: &'a Snapshot,
        areas: Vec<AreaShade>,
        socio: Option<&'a SocioEconomicEntry>,
    ) -> Self {
        Self {
            snapshot,
            areas,
            socio,
            education: socio.map(SocioEconomicEntry::education),
        }
    }
}

/// Multi-line text summary of a snapshot.
pub struct Summary<'a> {
    pub snapshot: &'a Snapshot,
    pub shades: &'a [AreaShade],
    pub socio: Option<&'a SocioEconomicEntry>,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let selection = &self.snapshot.selection;
        let bundle = &self.snapshot.bundle;

        let categories = if selection.categories.is_empty() {
            "all".to_string()
        } else {
            selection
                .categories
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(
            f,
            "Month: {}   Area: {}   Categories: {categories}",
            selection.month, selection.area
        )?;
        writeln!(
            f,
            "Offences: {}   Positive outcomes: {}   Efficiency: {:.1}%",
            bundle.stats.total_offences,
            bundle.stats.total_positive_outcomes,
            bundle.stats.efficiency_rate
        )?;

        let mut busiest: Vec<&AreaShade> = self.shades.iter().filter(|s| s.total > 0).collect();
        busiest.sort_by(|a, b| b.total.cmp(&a.total));
        if !busiest.is_empty() {
            writeln!(f, "Busiest areas:")?;
            for shade in busiest.into_iter().take(BUSIEST_AREAS) {
                let marker = if shade.selected { '*' } else { ' ' };
                writeln!(f, "{marker} {:<24} {:>8}", shade.name, shade.total)?;
            }
        }

        if !bundle.trend.is_empty() {
            writeln!(f, "Trend:")?;
            for point in &bundle.trend {
                let marker = if selection.month.is_active(&point.month) {
                    '*'
                } else {
                    ' '
                };
                writeln!(f, "{marker} {:<24} {:>8}", point.month, point.total)?;
            }
        }

        if !bundle.category_ranking.is_empty() {
            writeln!(f, "Top categories:")?;
            for rank in &bundle.category_ranking {
                let marker = if rank.selected { '*' } else { ' ' };
                writeln!(f, "{marker} {:<24} {:>8}", rank.crime_type, rank.total)?;
            }
        }

        if let (Some(area), Some(entry)) = (selection.area.value(), self.socio) {
            write!(f, "{}", SocioSummary { area, entry })?;
        }

        Ok(())
    }
}

/// A borough's socio-economic profile as text.
pub struct SocioSummary<'a> {
    pub area: &'a str,
    pub entry: &'a SocioEconomicEntry,
}

impl fmt::Display for SocioSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let education = self.entry.education();
        writeln!(f, "{}", self.area)?;
        writeln!(f, "  Weekly pay:   {}", self.entry.weekly_pay)?;
        writeln!(f, "  Unemployment: {}%", self.entry.unemployment_rate)?;
        writeln!(f, "  Deprivation:  {}%", self.entry.deprivation_rate)?;
        writeln!(
            f,
            "  Education:    no qualifications {}%, level 4+ {}%, other {}%",
            education.no_qualification, education.level4_plus, education.other
        )
    }
}

#[cfg(test)]
mod tests {
    use crime_dashboard::{Dashboard, RecordStore};
    use crime_dashboard_analytics::AggregationOptions;
    use crime_dashboard_crime_models::{IncidentRecord, Measure};
    use crime_dashboard_geography_models::{BoundaryFeature, GeoBoundary, SocioTable, WeeklyPay};

    use super::*;

    fn dashboard() -> Dashboard {
        let boundary = GeoBoundary {
            features: vec![BoundaryFeature {
                code: "C1".to_string(),
                name: "Camden".to_string(),
            }],
        };
        let incidents = vec![
            IncidentRecord::new("Camden", "C1", "2025-01", "BURGLARY", Measure::Offences, 10),
            IncidentRecord::new("Camden", "C1", "2025-01", "BURGLARY", Measure::PositiveOutcomes, 2),
        ];
        let socio = SocioTable::from([(
            "Camden".to_string(),
            SocioEconomicEntry {
                weekly_pay: WeeklyPay::NotAvailable,
                unemployment_rate: 4.0,
                deprivation_rate: 50.0,
                no_qualification: 10.0,
                level4_plus: 60.0,
            },
        )]);
        Dashboard::new(
            RecordStore::new(boundary, incidents, socio),
            AggregationOptions::default(),
        )
    }

    #[test]
    fn args_become_actions() {
        let actions = actions_from_args(
            Some("2025-01"),
            Some("Camden"),
            &["THEFT".to_string(), "BURGLARY".to_string(), "THEFT".to_string()],
        );
        assert_eq!(
            actions,
            vec![
                SelectionAction::SetMonth(Selection::only("2025-01")),
                SelectionAction::ToggleArea("Camden".to_string()),
                SelectionAction::ToggleCategory("BURGLARY".to_string()),
                SelectionAction::ToggleCategory("THEFT".to_string()),
            ]
        );
    }

    #[test]
    fn all_area_is_no_action() {
        let actions = actions_from_args(Some("ALL"), Some("all"), &[]);
        assert_eq!(actions, vec![SelectionAction::SetMonth(Selection::All)]);
    }

    #[test]
    fn summary_lists_views_and_profile() {
        let mut dashboard = dashboard();
        let snapshot = dashboard.dispatch(&SelectionAction::ToggleArea("Camden".to_string()));
        let shades = dashboard.area_shades();
        let text = Summary {
            snapshot: &snapshot,
            shades: &shades,
            socio: dashboard.socio_profile(),
        }
        .to_string();

        assert!(text.contains("Area: Camden"));
        assert!(text.contains("Categories: all"));
        assert!(text.contains("Efficiency: 20.0%"));
        assert!(text.contains("BURGLARY"));
        assert!(text.contains("Weekly pay:   N/A"));
        assert!(text.contains("other 30%"));
    }

    #[test]
    fn report_flattens_snapshot() {
        let mut dashboard = dashboard();
        dashboard.dispatch(&SelectionAction::ToggleArea("Camden".to_string()));
        let snapshot = dashboard.snapshot();
        let report = ViewReport::new(&snapshot, dashboard.area_shades(), dashboard.socio_profile());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["selection"]["area"], "Camden");
        assert_eq!(json["bundle"]["stats"]["totalOffences"], 10);
        assert_eq!(json["areas"][0]["selected"], true);
        assert_eq!(json["education"]["other"], 30.0);
    }
}
