#![allow(dead_code)]

use gl_samples::{Vector4, matrix::Mat4};

pub const EPSILON: f32 = 1e-5;

/// Angles in radians covering every quadrant, both signs and more than one turn.
pub fn angle_sweep() -> Vec<f32> {
    (-16..=16).map(|i| i as f32 * 0.45).collect()
}

/// `(near, far)` pairs from wide to very narrow depth ranges.
pub fn clip_plane_sweep() -> Vec<(f32, f32)> {
    vec![
        (0.1, 1000.0),
        (0.01, 10.0),
        (0.5, 2.0),
        (1.0, 100.0),
        (3.0, 3.5),
        (10.0, 10.25),
    ]
}

pub fn vector_sweep() -> Vec<Vector4<f32>> {
    vec![
        Vector4::new(1.0, 0.0, 0.0, 0.0),
        Vector4::new(0.0, 1.0, 0.0, 0.0),
        Vector4::new(0.0, 0.0, 1.0, 0.0),
        Vector4::new(1.0, 1.0, 1.0, 1.0),
        Vector4::new(-2.5, 0.5, 3.0, 1.0),
        Vector4::new(0.25, -4.0, -1.5, 0.0),
    ]
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPSILON * expected.abs().max(1.0),
        "{} != {}",
        actual,
        expected
    );
}

pub fn assert_mat_close(actual: &Mat4, expected: &Mat4) {
    for (i, (a, e)) in actual.0.iter().zip(expected.0.iter()).enumerate() {
        assert!(
            (a - e).abs() <= EPSILON * e.abs().max(1.0),
            "element {} (column {}, row {}): {} != {}\n{:?}\n{:?}",
            i,
            i / 4,
            i % 4,
            a,
            e,
            actual,
            expected
        );
    }
}

pub fn assert_vec_close(actual: Vector4<f32>, expected: Vector4<f32>) {
    assert_close(actual.x, expected.x);
    assert_close(actual.y, expected.y);
    assert_close(actual.z, expected.z);
    assert_close(actual.w, expected.w);
}
