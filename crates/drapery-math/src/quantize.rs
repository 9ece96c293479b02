//! Fixed-precision keys for coordinate matching.
//!
//! Pin points are matched against particle rest positions after rounding to
//! one decimal place. Comparing rounded floats directly is fragile, so the
//! rounded value is carried as an integer count of tenths instead.

/// Rounds `value` to one decimal place and returns it as a count of tenths.
///
/// Halves round away from zero, so `-312.25` and `-312.75` land on
/// `-3123` and `-3128` respectively.
///
/// ```
/// use drapery_math::quantize_tenths;
/// assert_eq!(quantize_tenths(-312.25), -3123);
/// assert_eq!(quantize_tenths(-312.75), -3128);
/// assert_eq!(quantize_tenths(-312.5), -3125);
/// assert_eq!(quantize_tenths(12.04), 120);
/// ```
#[inline]
pub fn quantize_tenths(value: f32) -> i64 {
    (f64::from(value) * 10.0).round() as i64
}

/// Converts a tenths key back to a coordinate.
#[inline]
pub fn tenths_to_f32(key: i64) -> f32 {
    (key as f64 / 10.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest_tenth() {
        assert_eq!(quantize_tenths(0.0), 0);
        assert_eq!(quantize_tenths(0.04), 0);
        assert_eq!(quantize_tenths(0.06), 1);
        assert_eq!(quantize_tenths(-287.5), -2875);
    }

    #[test]
    fn exact_halves_round_away_from_zero() {
        assert_eq!(quantize_tenths(0.25), 3);
        assert_eq!(quantize_tenths(-0.25), -3);
        assert_eq!(quantize_tenths(-312.25), -3123);
        assert_eq!(quantize_tenths(-312.75), -3128);
    }

    #[test]
    fn float_noise_collapses_to_same_key() {
        let a = 12.3f32;
        let b = a + 2e-5;
        assert_ne!(a, b);
        assert_eq!(quantize_tenths(a), quantize_tenths(b));
    }

    #[test]
    fn key_back_to_coordinate() {
        assert!((tenths_to_f32(-3125) + 312.5).abs() < 1e-4);
    }
}
