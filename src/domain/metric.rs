use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The measurement carried by a series. Decides the plausible range applied
/// when rows are ingested.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Metric {
    Glucose,
    Weight,
}

impl Metric {
    /// Inclusive `(min, max)` of values accepted for this metric
    pub fn plausible_range(&self) -> (f64, f64) {
        match self {
            Metric::Glucose => (50.0, 300.0),
            Metric::Weight => (20.0, 400.0),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Glucose => "mg/dL",
            Metric::Weight => "kg",
        }
    }

    /// The metric measured in `unit` (`"mg/dL"`, `"kg"`), ignoring case
    pub fn from_unit(unit: &str) -> Option<Metric> {
        Metric::iter().find(|metric| metric.unit().eq_ignore_ascii_case(unit.trim()))
    }

    pub fn is_plausible(&self, value: f64) -> bool {
        let (min, max) = self.plausible_range();
        value.is_finite() && value >= min && value <= max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Metric::from_str("Glucose").unwrap(), Metric::Glucose);
        assert_eq!(Metric::from_str("weight").unwrap(), Metric::Weight);
        assert!(Metric::from_str("pressure").is_err());
    }

    #[test]
    fn test_plausible_ranges() {
        assert!(Metric::Glucose.is_plausible(50.0));
        assert!(Metric::Glucose.is_plausible(300.0));
        assert!(!Metric::Glucose.is_plausible(301.0));
        assert!(!Metric::Weight.is_plausible(f64::NAN));
        for metric in Metric::iter() {
            let (min, max) = metric.plausible_range();
            assert!(min < max, "{} range is inverted", metric);
        }
    }

    #[test]
    fn test_from_unit() {
        assert_eq!(Metric::from_unit("mg/dL"), Some(Metric::Glucose));
        assert_eq!(Metric::from_unit(" KG "), Some(Metric::Weight));
        assert_eq!(Metric::from_unit("mmol/L"), None);
    }
}
