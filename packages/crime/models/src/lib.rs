#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record types for the London crime dashboard.
//!
//! One [`IncidentRecord`] is one row of the borough-by-month crime table:
//! a count of some [`Measure`] for a crime type in a borough during a
//! calendar month. Source rows are loosely typed (counts arrive as numbers,
//! numeric strings, or not at all), so deserialization goes through a raw
//! wire shape and every count is normalized by [`parse_count`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

/// Crime type removed from every dashboard view regardless of selection.
pub const EXCLUDED_CATEGORY: &str = "KNIFE CRIME";

/// What an incident row's `count` is counting.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Measure {
    /// Reported crimes.
    #[strum(to_string = "Offences")]
    Offences,
    /// Cases with a favorable resolution (charge, caution, etc.).
    #[strum(to_string = "Positive Outcomes", serialize = "PositiveOutcomes")]
    PositiveOutcomes,
    /// Any measure label the dashboard does not know about.
    #[strum(to_string = "Unrecognized")]
    Unrecognized,
}

impl Measure {
    /// Parses a source measure label, mapping anything unknown (or missing)
    /// to [`Measure::Unrecognized`]. Labels match exactly, case included.
    #[must_use]
    pub fn parse(label: Option<&str>) -> Self {
        label
            .and_then(|s| s.trim().parse::<Self>().ok())
            .unwrap_or(Self::Unrecognized)
    }
}

/// Parses a count field from a source row.
///
/// Accepts JSON numbers and numeric strings. Anything missing, negative,
/// non-finite, or non-numeric counts as `0`. Fractional values are
/// truncated.
#[must_use]
pub fn parse_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(count_from_f64))
            .unwrap_or(0),
        Value::String(s) => parse_count_str(s),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => 0,
    }
}

/// String form of [`parse_count`].
#[must_use]
pub fn parse_count_str(s: &str) -> u64 {
    let s = s.trim();
    s.parse::<u64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(count_from_f64))
        .unwrap_or(0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from_f64(v: f64) -> Option<u64> {
    (v.is_finite() && v >= 0.0).then(|| v.trunc() as u64)
}

/// One row of the incident table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawIncidentRecord")]
pub struct IncidentRecord {
    /// Borough display name. Used for area filtering.
    pub area: String,
    /// Stable borough code. The only valid join key against boundaries.
    pub area_code: String,
    /// Calendar month label, ISO ordered (e.g. "2025-01").
    pub month: String,
    /// Crime type label (e.g. "BURGLARY").
    #[serde(rename = "type")]
    pub crime_type: String,
    /// What `count` measures.
    pub measure: Measure,
    /// Normalized count.
    pub count: u64,
}

impl IncidentRecord {
    /// Builds a record from already-normalized parts.
    #[must_use]
    pub fn new(
        area: impl Into<String>,
        area_code: impl Into<String>,
        month: impl Into<String>,
        crime_type: impl Into<String>,
        measure: Measure,
        count: u64,
    ) -> Self {
        Self {
            area: area.into(),
            area_code: area_code.into(),
            month: month.into(),
            crime_type: crime_type.into(),
            measure,
            count,
        }
    }

    /// Whether this row belongs to the always-excluded crime type.
    #[must_use]
    pub fn is_excluded(&self, excluded_category: &str) -> bool {
        self.crime_type == excluded_category
    }
}

/// Wire shape of an incident row as published in the source JSON.
///
/// Accepts both the source spelling (`area_code`, `Measure`) and the
/// camelCase form this crate serializes to.
#[derive(Debug, Deserialize)]
struct RawIncidentRecord {
    #[serde(default)]
    area: Option<String>,
    #[serde(default, alias = "areaCode")]
    area_code: Option<String>,
    #[serde(default)]
    month: Option<String>,
    #[serde(default, rename = "type")]
    crime_type: Option<String>,
    #[serde(default, alias = "Measure")]
    measure: Option<String>,
    #[serde(default)]
    count: Value,
}

impl From<RawIncidentRecord> for IncidentRecord {
    fn from(raw: RawIncidentRecord) -> Self {
        Self {
            area: raw.area.unwrap_or_default(),
            area_code: raw.area_code.unwrap_or_default(),
            month: raw.month.unwrap_or_default(),
            crime_type: raw.crime_type.unwrap_or_default(),
            measure: Measure::parse(raw.measure.as_deref()),
            count: parse_count(&raw.count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_count_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_count(&json!(12)), 12);
        assert_eq!(parse_count(&json!("42")), 42);
        assert_eq!(parse_count(&json!(" 7 ")), 7);
        assert_eq!(parse_count(&json!(3.9)), 3);
        assert_eq!(parse_count(&json!("1e3")), 1000);
    }

    #[test]
    fn parse_count_falls_back_to_zero() {
        assert_eq!(parse_count(&Value::Null), 0);
        assert_eq!(parse_count(&json!("")), 0);
        assert_eq!(parse_count(&json!("n/a")), 0);
        assert_eq!(parse_count(&json!(-5)), 0);
        assert_eq!(parse_count(&json!(true)), 0);
        assert_eq!(parse_count(&json!([1, 2])), 0);
    }

    #[test]
    fn measure_parses_source_labels() {
        assert_eq!(Measure::parse(Some("Offences")), Measure::Offences);
        assert_eq!(
            Measure::parse(Some("Positive Outcomes")),
            Measure::PositiveOutcomes
        );
        assert_eq!(
            Measure::parse(Some("PositiveOutcomes")),
            Measure::PositiveOutcomes
        );
        assert_eq!(Measure::parse(Some("offences")), Measure::Unrecognized);
        assert_eq!(
            Measure::parse(Some("POSITIVE OUTCOMES")),
            Measure::Unrecognized
        );
        assert_eq!(Measure::parse(Some("Arrests")), Measure::Unrecognized);
        assert_eq!(Measure::parse(None), Measure::Unrecognized);
        assert_eq!(Measure::PositiveOutcomes.to_string(), "Positive Outcomes");
    }

    #[test]
    fn deserializes_source_row() {
        let record: IncidentRecord = serde_json::from_value(json!({
            "area": "Camden",
            "area_code": "E09000007",
            "month": "2025-01",
            "type": "BURGLARY",
            "Measure": "Positive Outcomes",
            "count": "17"
        }))
        .unwrap();

        assert_eq!(
            record,
            IncidentRecord::new(
                "Camden",
                "E09000007",
                "2025-01",
                "BURGLARY",
                Measure::PositiveOutcomes,
                17
            )
        );
    }

    #[test]
    fn deserializes_row_with_missing_fields() {
        let record: IncidentRecord = serde_json::from_value(json!({
            "area": "Hackney",
            "areaCode": "E09000012",
            "month": "2025-02",
            "type": "ROBBERY"
        }))
        .unwrap();

        assert_eq!(record.measure, Measure::Unrecognized);
        assert_eq!(record.count, 0);
        assert_eq!(record.area_code, "E09000012");
    }

    #[test]
    fn null_text_fields_read_as_empty() {
        let record: IncidentRecord = serde_json::from_value(json!({
            "area": null,
            "area_code": "E09000007",
            "month": null,
            "type": null,
            "Measure": null,
            "count": 4
        }))
        .unwrap();

        assert_eq!(record.area, "");
        assert_eq!(record.month, "");
        assert_eq!(record.crime_type, "");
        assert_eq!(record.measure, Measure::Unrecognized);
        assert_eq!(record.count, 4);
    }

    #[test]
    fn serialized_form_reads_back() {
        let record = IncidentRecord::new(
            "Camden",
            "E09000007",
            "2025-01",
            "BURGLARY",
            Measure::Offences,
            10,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["areaCode"], "E09000007");
        assert_eq!(json["type"], "BURGLARY");
        assert_eq!(json["measure"], "Offences");

        let back: IncidentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn excluded_category_matches_exactly() {
        let knife = IncidentRecord::new("A", "A1", "2025-01", "KNIFE CRIME", Measure::Offences, 1);
        let burglary = IncidentRecord::new("A", "A1", "2025-01", "BURGLARY", Measure::Offences, 1);
        assert!(knife.is_excluded(EXCLUDED_CATEGORY));
        assert!(!burglary.is_excluded(EXCLUDED_CATEGORY));
    }
}
