//! Per-borough socio-economic indicators.
//!
//! The published table is keyed by borough display name and mixes numbers,
//! numeric strings and a `"#"` placeholder for unavailable pay figures.
//! Rows deserialize through a raw wire shape so that every indicator ends
//! up as a plain number.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::round1;

/// Socio-economic table keyed by borough display name.
pub type SocioTable = BTreeMap<String, SocioEconomicEntry>;

/// Placeholder the source uses for a missing weekly pay figure.
pub const PAY_NOT_AVAILABLE: &str = "#";

/// Median weekly pay, which the source does not publish for every borough.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeeklyPay {
    /// Pay in pounds.
    Amount(f64),
    /// No figure published.
    NotAvailable,
}

impl WeeklyPay {
    /// Parses a source pay value: a number, a numeric string, or anything
    /// else (including `"#"`) meaning not available.
    #[must_use]
    pub fn parse(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(Self::NotAvailable, Self::Amount),
            Value::String(s) if s.trim() != PAY_NOT_AVAILABLE => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map_or(Self::NotAvailable, Self::Amount),
            _ => Self::NotAvailable,
        }
    }

    /// The amount, if published.
    #[must_use]
    pub const fn amount(self) -> Option<f64> {
        match self {
            Self::Amount(v) => Some(v),
            Self::NotAvailable => None,
        }
    }
}

impl std::fmt::Display for WeeklyPay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amount(v) => write!(f, "£{v}"),
            Self::NotAvailable => write!(f, "N/A"),
        }
    }
}

/// Education attainment split for a borough, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationProfile {
    /// Residents with no qualifications.
    pub no_qualification: f64,
    /// Residents with level 4 (degree) or higher.
    pub level4_plus: f64,
    /// Everyone else: `100 - noQualification - level4Plus`, one decimal,
    /// never negative.
    pub other: f64,
}

impl EducationProfile {
    /// Derives the profile from the two published percentages.
    #[must_use]
    pub fn new(no_qualification: f64, level4_plus: f64) -> Self {
        Self {
            no_qualification,
            level4_plus,
            other: round1((100.0 - no_qualification - level4_plus).max(0.0)),
        }
    }
}

/// One borough's row of the socio-economic table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSocioEconomicEntry")]
pub struct SocioEconomicEntry {
    /// Median weekly pay.
    pub weekly_pay: WeeklyPay,
    /// Unemployment rate (%).
    pub unemployment_rate: f64,
    /// Households in deprivation (%).
    pub deprivation_rate: f64,
    /// Residents with no qualifications (%).
    pub no_qualification: f64,
    /// Residents qualified to level 4 or above (%).
    pub level4_plus: f64,
}

impl SocioEconomicEntry {
    /// Education split including the derived remainder.
    #[must_use]
    pub fn education(&self) -> EducationProfile {
        EducationProfile::new(self.no_qualification, self.level4_plus)
    }
}

/// Source spelling of a socio-economic row. Also accepts the camelCase form
/// this crate serializes to.
#[derive(Debug, Deserialize)]
struct RawSocioEconomicEntry {
    #[serde(default, alias = "weeklyPay")]
    weekly_pay: Value,
    #[serde(default, alias = "unemploymentRate")]
    unemployment: Value,
    #[serde(default, alias = "deprivationRate")]
    deprived: Value,
    #[serde(default, rename = "noQual", alias = "noQualification")]
    no_qual: Value,
    #[serde(default, rename = "highQual", alias = "level4Plus")]
    high_qual: Value,
}

impl From<RawSocioEconomicEntry> for SocioEconomicEntry {
    fn from(raw: RawSocioEconomicEntry) -> Self {
        Self {
            weekly_pay: WeeklyPay::parse(&raw.weekly_pay),
            unemployment_rate: parse_percent(&raw.unemployment),
            deprivation_rate: parse_percent(&raw.deprived),
            no_qualification: parse_percent(&raw.no_qual),
            level4_plus: parse_percent(&raw.high_qual),
        }
    }
}

/// Parses a percentage indicator; anything non-numeric reads as `0.0`.
fn parse_percent(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parses_source_row() {
        let entry: SocioEconomicEntry = serde_json::from_value(json!({
            "weekly_pay": 812.5,
            "unemployment": 5.1,
            "deprived": "48.2",
            "noQual": 14.2,
            "highQual": 56.8
        }))
        .unwrap();

        assert_eq!(entry.weekly_pay, WeeklyPay::Amount(812.5));
        assert!(approx(entry.unemployment_rate, 5.1));
        assert!(approx(entry.deprivation_rate, 48.2));
        assert!(approx(entry.no_qualification, 14.2));
        assert!(approx(entry.level4_plus, 56.8));
    }

    #[test]
    fn hash_pay_is_not_available() {
        assert_eq!(WeeklyPay::parse(&json!("#")), WeeklyPay::NotAvailable);
        assert_eq!(WeeklyPay::parse(&Value::Null), WeeklyPay::NotAvailable);
        assert_eq!(WeeklyPay::parse(&json!("701.2")), WeeklyPay::Amount(701.2));
        assert_eq!(WeeklyPay::NotAvailable.to_string(), "N/A");
        assert_eq!(WeeklyPay::NotAvailable.amount(), None);
    }

    #[test]
    fn education_remainder_is_derived() {
        let profile = EducationProfile::new(14.2, 56.8);
        assert!(approx(profile.other, 29.0));
        assert!(profile.no_qualification + profile.level4_plus <= 100.0);

        let profile = EducationProfile::new(17.3, 40.0);
        assert!(approx(profile.other, 42.7));
    }

    #[test]
    fn education_remainder_clamps_at_zero() {
        let profile = EducationProfile::new(60.0, 45.0);
        assert!(approx(profile.other, 0.0));
    }

    #[test]
    fn table_keyed_by_borough_name() {
        let table: SocioTable = serde_json::from_value(json!({
            "Camden": { "weekly_pay": "#", "unemployment": 4.0, "deprived": 50.0, "noQual": 10.0, "highQual": 60.0 },
            "Hackney": { "weekly_pay": 700, "unemployment": 6.0, "deprived": 55.0, "noQual": 15.0, "highQual": 50.0 }
        }))
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table["Camden"].weekly_pay, WeeklyPay::NotAvailable);
        assert_eq!(table["Hackney"].weekly_pay.amount(), Some(700.0));
        assert!(approx(table["Hackney"].education().other, 35.0));
    }

    #[test]
    fn serialized_form_reads_back() {
        let entry = SocioEconomicEntry {
            weekly_pay: WeeklyPay::Amount(650.0),
            unemployment_rate: 3.5,
            deprivation_rate: 41.0,
            no_qualification: 12.0,
            level4_plus: 58.0,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["weeklyPay"], 650.0);
        let back: SocioEconomicEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
