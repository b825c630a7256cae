/// Absolute tolerance used when comparing projected values
pub const FLOAT_EPSILON: f64 = 1e-9;

#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Arithmetic mean as `sum / len`. Returns `None` for an empty slice.
/// Kept as a plain sum so exact inputs give exact means (e.g. 856 / 8 = 107.0).
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Linear interpolation between `v1` and `v2` at fraction `t` in [0, 1]
#[inline]
pub fn lerp(v1: f64, v2: f64, t: f64) -> f64 {
    v1 + (v2 - v1) * t
}

/// `-1`, `0` or `1` with an exact zero test
#[inline]
pub fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_exact() {
        let values = [110.0, 94.0, 107.0, 121.0, 97.0, 109.0, 109.0, 109.0];
        assert_eq!(mean(&values), Some(107.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(127.0, 123.5, 0.0), 127.0);
        assert_eq!(lerp(127.0, 123.5, 1.0), 123.5);
        assert!(approx_eq(lerp(127.0, 123.5, 0.5), 125.25, FLOAT_EPSILON));
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.2), 1);
        assert_eq!(sign(-0.1), -1);
        assert_eq!(sign(0.0), 0);
    }
}
