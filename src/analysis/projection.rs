//! Exponential-decay projection toward an asymptotic target
//!
//! Model: `value(t) = (V0 - A) * exp(-k * t) + A` for day offsets `t >= 0`.
//! The curve depends only on [`TrendParameters`]; no other reading is used.
//!
//! The inverse, `t = -ln((tau - A) / (V0 - A)) / k`, answers "how many days until
//! the projection first reaches `tau`". Thresholds the curve never reaches come
//! back as [`Eta::Unreachable`], never as a number.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::TrendParameters;
use crate::error::{Result, TrendError};
use crate::utils::TimeUtils;
use crate::utils::maths_utils::sign;

/// One projected day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub day: usize,
    pub date: NaiveDate,
    pub value: f64,
}

/// Projected value at real-valued day offset `t` (t >= 0)
pub fn value_at(params: &TrendParameters, t: f64) -> f64 {
    let gap = params.base_value() - params.asymptote();
    gap * (-params.decay_constant() * t).exp() + params.asymptote()
}

/// The projection curve for days `0..horizon_days`, dated from the base point
pub fn project(params: &TrendParameters) -> Vec<ProjectionPoint> {
    let base_date = params.base_point().date;
    (0..params.horizon_days())
        .map(|day| ProjectionPoint {
            day,
            date: TimeUtils::add_days(base_date, day as u64),
            value: value_at(params, day as f64),
        })
        .collect()
}

/// Why a threshold has no finite ETA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnreachableReason {
    /// The asymptote is approached but never reached in finite time
    ThresholdIsAsymptote,
    /// The base value already sits on the asymptote, so the curve is constant
    BaseAtAsymptote,
    /// The threshold lies on the far side of the asymptote
    BeyondAsymptote,
    /// The threshold lies behind the base value, which the curve moves away from
    BehindBase,
    /// The analytic offset overflows to infinity (tiny `k` or a gap that underflows)
    NoFiniteOffset,
}

impl fmt::Display for UnreachableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnreachableReason::ThresholdIsAsymptote => "threshold equals the asymptote",
            UnreachableReason::BaseAtAsymptote => "projection is already flat at the asymptote",
            UnreachableReason::BeyondAsymptote => "threshold lies beyond the asymptote",
            UnreachableReason::BehindBase => "threshold lies behind the current value",
            UnreachableReason::NoFiniteOffset => "time to threshold is not representable",
        };
        write!(f, "{}", text)
    }
}

/// Result of an ETA query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Eta {
    /// `days` is the exact (fractional) offset; `date` is the first calendar day on or past it
    Reachable { days: f64, date: NaiveDate },
    Unreachable { reason: UnreachableReason },
}

impl Eta {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Eta::Reachable { .. })
    }

    pub fn days(&self) -> Option<f64> {
        match self {
            Eta::Reachable { days, .. } => Some(*days),
            Eta::Unreachable { .. } => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Eta::Reachable { date, .. } => Some(*date),
            Eta::Unreachable { .. } => None,
        }
    }

    /// For callers that need a number: unreachable becomes a `TrendError::Domain`
    pub fn days_or_err(&self) -> Result<f64> {
        match self {
            Eta::Reachable { days, .. } => Ok(*days),
            Eta::Unreachable { reason } => {
                Err(TrendError::domain(format!("no finite ETA: {}", reason)))
            }
        }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Reachable { days, date } => {
                write!(f, "{:.1} days ({})", days, TimeUtils::format_date(*date))
            }
            Eta::Unreachable { reason } => write!(f, "unreachable: {}", reason),
        }
    }
}

/// Day offset at which the projection first reaches `threshold`
pub fn eta_to_threshold(params: &TrendParameters, threshold: f64) -> Result<Eta> {
    if !threshold.is_finite() {
        return Err(TrendError::invalid_parameter(format!(
            "threshold must be finite, got {}",
            threshold
        )));
    }

    let asymptote = params.asymptote();
    let base_value = params.base_value();
    let target_gap = threshold - asymptote;
    let base_gap = base_value - asymptote;

    let unreachable =
        |reason: UnreachableReason| -> Result<Eta> { Ok(Eta::Unreachable { reason }) };

    if target_gap == 0.0 {
        return unreachable(UnreachableReason::ThresholdIsAsymptote);
    }
    if base_gap == 0.0 {
        return unreachable(UnreachableReason::BaseAtAsymptote);
    }
    if sign(target_gap) != sign(base_gap) {
        return unreachable(UnreachableReason::BeyondAsymptote);
    }
    if target_gap.abs() > base_gap.abs() {
        return unreachable(UnreachableReason::BehindBase);
    }

    // ratio is in [0, 1] here (0 only on underflow), so days >= 0
    let ratio = target_gap / base_gap;
    let days = (-ratio.ln() / params.decay_constant()).max(0.0);
    if !days.is_finite() {
        return unreachable(UnreachableReason::NoFiniteOffset);
    }
    let date = TimeUtils::add_days(params.base_point().date, days.ceil() as u64);

    Ok(Eta::Reachable { days, date })
}

/// A named threshold and its ETA
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Milestone {
    pub threshold: f64,
    pub eta: Eta,
}

/// ETAs for several thresholds against one projection
pub fn milestone_etas(params: &TrendParameters, thresholds: &[f64]) -> Result<Vec<Milestone>> {
    thresholds
        .iter()
        .map(|&threshold| -> Result<Milestone> {
            Ok(Milestone {
                threshold,
                eta: eta_to_threshold(params, threshold)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Reading;
    use crate::utils::maths_utils::{FLOAT_EPSILON, approx_eq};

    fn params(base_value: f64, asymptote: f64, k: f64, horizon: usize) -> TrendParameters {
        let base = Reading::new(NaiveDate::from_ymd_opt(2026, 2, 24).unwrap(), base_value);
        TrendParameters::new(asymptote, k, base, horizon).unwrap()
    }

    #[test]
    fn test_first_two_days() {
        let p = params(122.0, 90.0, 0.08, 30);
        let curve = project(&p);

        assert_eq!(curve.len(), 30);
        assert_eq!(curve[0].value, 122.0);
        assert!(approx_eq(curve[1].value, 90.0 + 32.0 * (-0.08f64).exp(), FLOAT_EPSILON));
        assert!((curve[1].value - 119.54).abs() < 0.01);
        assert_eq!(curve[1].date, NaiveDate::from_ymd_opt(2026, 2, 25).unwrap());
    }

    #[test]
    fn test_converges_to_asymptote() {
        let p = params(122.0, 90.0, 0.1, 1);
        assert!(approx_eq(value_at(&p, 500.0), 90.0, 1e-6));
    }

    #[test]
    fn test_monotonic_by_side() {
        let falling = project(&params(122.0, 90.0, 0.1, 60));
        assert!(falling.windows(2).all(|w| w[1].value < w[0].value));

        let rising = project(&params(70.0, 90.0, 0.1, 60));
        assert!(rising.windows(2).all(|w| w[1].value > w[0].value));

        let flat = project(&params(90.0, 90.0, 0.1, 60));
        assert!(flat.iter().all(|pt| pt.value == 90.0));
    }

    #[test]
    fn test_eta_inverse_consistency() {
        let p = params(122.0, 90.0, 0.08, 30);
        for threshold in [121.0, 110.0, 100.0, 91.0, 90.5] {
            let eta = eta_to_threshold(&p, threshold).unwrap();
            let days = eta.days().unwrap();
            assert!(
                approx_eq(value_at(&p, days), threshold, 1e-9),
                "threshold {} round trip failed",
                threshold
            );
        }
    }

    #[test]
    fn test_eta_rising_projection() {
        let p = params(70.0, 90.0, 0.1, 30);
        let eta = eta_to_threshold(&p, 80.0).unwrap();
        assert!(approx_eq(eta.days().unwrap(), 2f64.ln() / 0.1, 1e-9));
    }

    #[test]
    fn test_eta_date_rounds_up() {
        let p = params(122.0, 90.0, 0.08, 30);
        let eta = eta_to_threshold(&p, 110.0).unwrap();
        // -ln(20/32)/0.08 = 5.875 days -> first whole day at or past it is day 6
        assert!(approx_eq(eta.days().unwrap(), 5.875, 1e-3));
        assert_eq!(eta.date(), NaiveDate::from_ymd_opt(2026, 3, 2));
    }

    #[test]
    fn test_eta_at_base_is_zero() {
        let p = params(122.0, 90.0, 0.08, 30);
        let eta = eta_to_threshold(&p, 122.0).unwrap();
        assert_eq!(eta.days(), Some(0.0));
        assert_eq!(eta.date(), Some(p.base_point().date));
    }

    #[test]
    fn test_eta_unreachable_cases() {
        let p = params(122.0, 90.0, 0.08, 30);
        let reason = |threshold| match eta_to_threshold(&p, threshold).unwrap() {
            Eta::Unreachable { reason } => reason,
            other => panic!("expected unreachable, got {}", other),
        };

        assert_eq!(reason(90.0), UnreachableReason::ThresholdIsAsymptote);
        assert_eq!(reason(85.0), UnreachableReason::BeyondAsymptote);
        assert_eq!(reason(130.0), UnreachableReason::BehindBase);

        let flat = params(90.0, 90.0, 0.08, 30);
        assert_eq!(
            eta_to_threshold(&flat, 95.0).unwrap(),
            Eta::Unreachable {
                reason: UnreachableReason::BaseAtAsymptote
            }
        );
    }

    #[test]
    fn test_unreachable_is_never_numeric() {
        let p = params(122.0, 90.0, 0.08, 30);
        let eta = eta_to_threshold(&p, 90.0).unwrap();
        assert_eq!(eta.days(), None);
        assert!(matches!(eta.days_or_err(), Err(TrendError::Domain(_))));
        assert!(eta.to_string().starts_with("unreachable"));
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        let p = params(122.0, 90.0, 0.08, 30);
        assert!(eta_to_threshold(&p, f64::NAN).is_err());
    }

    #[test]
    fn test_infinite_offset_is_unreachable() {
        // 1e-320 / 1e10 underflows to 0, so ln(ratio) is -inf
        let underflow = params(1e10, 0.0, 0.1, 30);
        let eta = eta_to_threshold(&underflow, 1e-320).unwrap();
        assert_eq!(
            eta,
            Eta::Unreachable {
                reason: UnreachableReason::NoFiniteOffset
            }
        );

        // a subnormal k overflows the division
        let slow = params(122.0, 90.0, f64::from_bits(1), 30);
        assert!(!eta_to_threshold(&slow, 106.0).unwrap().is_reachable());
    }

    #[test]
    fn test_milestones() {
        let p = params(122.0, 90.0, 0.1, 30);
        let milestones = milestone_etas(&p, &[110.0, 100.0, 90.0]).unwrap();
        assert_eq!(milestones.len(), 3);
        assert!(milestones[0].eta.days() < milestones[1].eta.days());
        assert!(!milestones[2].eta.is_reachable());
    }
}
