//! Integration tests for drapery-mesh.

use drapery_math::Vec3;
use drapery_mesh::generators::parametric_grid;
use drapery_mesh::normals::compute_vertex_normals;
use drapery_mesh::{ParametricSurface, Plane, TriangleMesh};

// ─── TriangleMesh Tests ───────────────────────────────────────

fn make_single_triangle() -> TriangleMesh {
    TriangleMesh {
        pos_x: vec![0.0, 1.0, 0.0],
        pos_y: vec![0.0, 0.0, 1.0],
        pos_z: vec![0.0, 0.0, 0.0],
        normal_x: vec![0.0, 0.0, 0.0],
        normal_y: vec![0.0, 0.0, 0.0],
        normal_z: vec![1.0, 1.0, 1.0],
        uv_u: vec![0.0, 1.0, 0.0],
        uv_v: vec![0.0, 0.0, 1.0],
        indices: vec![0, 1, 2],
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn position_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.position(1), [1.0, 0.0, 0.0]);
    assert_eq!(mesh.position_vec3(2), Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn set_position_roundtrips() {
    let mut mesh = make_single_triangle();
    mesh.set_position(0, Vec3::new(4.0, 5.0, 6.0));
    assert_eq!(mesh.position(0), [4.0, 5.0, 6.0]);
}

#[test]
fn interleaved_positions_layout() {
    let mesh = make_single_triangle();
    assert_eq!(
        mesh.interleaved_positions(),
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
    );
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = make_single_triangle();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_degenerate() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_err());
}

// ─── Surface Tests ────────────────────────────────────────────

#[test]
fn plane_corners() {
    let plane = Plane::from_segments(25, 12, 25.0);
    assert_eq!(plane.width, 625.0);
    assert_eq!(plane.height, 300.0);

    let bottom_left = plane.evaluate(0.0, 0.0);
    assert_eq!(bottom_left, Vec3::new(-312.5, 150.0, 0.0));

    let top_right = plane.evaluate(1.0, 1.0);
    assert_eq!(top_right, Vec3::new(312.5, 450.0, 0.0));
}

#[test]
fn closures_are_surfaces() {
    let tilted = |u: f32, v: f32| Vec3::new(u, v, u + v);
    assert_eq!(tilted.evaluate(0.5, 0.25), Vec3::new(0.5, 0.25, 0.75));
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn grid_2x2() {
    let mesh = parametric_grid(&Plane::new(1.0, 1.0), 2, 2);
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.triangle_count(), 8);
    assert!(mesh.validate().is_ok());
}

#[test]
fn grid_1x1() {
    let mesh = parametric_grid(&Plane::new(1.0, 1.0), 1, 1);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
    assert_eq!(mesh.triangle(1), [1, 3, 2]);
}

#[test]
fn grid_vertex_order_is_row_major() {
    let plane = Plane::from_segments(4, 2, 10.0);
    let mesh = parametric_grid(&plane, 4, 2);
    // index(u, v) = u + v * (w + 1)
    let idx = 3 + 2 * 5;
    let expected = plane.evaluate(3.0 / 4.0, 1.0);
    assert!((mesh.position_vec3(idx) - expected).length() < 1e-5);
}

#[test]
fn grid_uvs() {
    let mesh = parametric_grid(&Plane::new(1.0, 1.0), 2, 2);
    let last = mesh.vertex_count() - 1;
    assert!((mesh.uv_u[last] - 1.0).abs() < 1e-6);
    assert!((mesh.uv_v[last] - 1.0).abs() < 1e-6);
}

// ─── Normal Tests ─────────────────────────────────────────────

#[test]
fn flat_grid_normals_face_plus_z() {
    let mut mesh = parametric_grid(&Plane::new(100.0, 50.0), 4, 4);
    compute_vertex_normals(&mut mesh);
    for i in 0..mesh.vertex_count() {
        assert!(mesh.normal_x[i].abs() < 1e-5);
        assert!(mesh.normal_y[i].abs() < 1e-5);
        assert!(mesh.normal_z[i] > 0.99);
    }
}

#[test]
fn normals_are_unit_length() {
    let wavy = |u: f32, v: f32| Vec3::new(u * 10.0, v * 10.0, (u * 6.0).sin() * (v * 4.0).cos());
    let mut mesh = parametric_grid(&wavy, 10, 10);
    compute_vertex_normals(&mut mesh);
    for i in 0..mesh.vertex_count() {
        let len = mesh.normal_vec3(i).length();
        assert!((len - 1.0).abs() < 1e-5, "Normal at {} has length {}", i, len);
    }
}

#[test]
fn mesh_serializes() {
    let mesh = parametric_grid(&Plane::new(1.0, 1.0), 1, 1);
    let json = serde_json::to_string(&mesh).unwrap();
    let back: TriangleMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(back.indices, mesh.indices);
}
