//! Integration tests for drapery-math.

use drapery_math::{quantize_tenths, tenths_to_f32, Vec3};

#[test]
fn grid_columns_get_distinct_keys() {
    // Rest x of column u on a 25-segment, 625-wide sheet.
    let keys: Vec<i64> = (0..=25)
        .map(|u| quantize_tenths((u as f32 / 25.0 - 0.5) * 625.0))
        .collect();
    assert_eq!(keys[0], -3125);
    assert_eq!(keys[12], -125);
    assert_eq!(keys[25], 3125);
    for pair in keys.windows(2) {
        assert_eq!(pair[1] - pair[0], 250);
    }
}

#[test]
fn keys_survive_round_trip() {
    for key in [-3125, -1, 0, 7, 2875] {
        assert_eq!(quantize_tenths(tenths_to_f32(key)), key);
    }
}

#[test]
fn glam_reexport() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!((v.length() - 5.0).abs() < 1e-6);
    assert!((v.normalize_or_zero() - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-6);
}
