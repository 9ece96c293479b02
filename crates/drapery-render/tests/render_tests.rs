//! Integration tests for drapery-render.

use drapery_math::Vec3;
use drapery_mesh::generators::parametric_grid;
use drapery_mesh::Plane;
use drapery_render::json_exporter::AnimationData;
use drapery_render::renderer::{HeadlessRenderer, RenderFrame, Renderer};
use drapery_render::JsonFrameExporter;
use drapery_solver::{ClothConfig, ClothSimulation};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("drapery_{name}_{}.json", std::process::id()))
}

#[test]
fn headless_init() {
    let mesh = parametric_grid(&Plane::new(1.0, 1.0), 2, 2);
    let mut renderer = HeadlessRenderer::new();
    renderer.init(&mesh).unwrap();
    assert_eq!(renderer.name(), "headless");
    assert_eq!(renderer.frame_count(), 0);
}

#[test]
fn headless_submit_frames() {
    let mesh = parametric_grid(&Plane::new(1.0, 1.0), 2, 2);
    let mut renderer = HeadlessRenderer::new();
    renderer.init(&mesh).unwrap();

    let frame = RenderFrame::from_mesh(0, &mesh);
    renderer.submit_frame(&frame).unwrap();
    renderer.submit_frame(&frame).unwrap();
    renderer.finalize().unwrap();
    assert_eq!(renderer.frame_count(), 2);
}

#[test]
fn render_frame_from_positions() {
    let frame = RenderFrame::from_positions(
        42,
        &[Vec3::new(1.0, 4.0, 7.0), Vec3::new(2.0, 5.0, 8.0)],
    );
    assert_eq!(frame.frame, 42);
    assert_eq!(frame.vertex_count(), 2);
    assert_eq!(frame.pos_y, vec![4.0, 5.0]);
    assert_eq!(frame.interleaved(), vec![1.0, 4.0, 7.0, 2.0, 5.0, 8.0]);
}

#[test]
fn json_export_writes_every_frame() {
    let mut sim = ClothSimulation::new(ClothConfig::preview()).unwrap();
    let mesh = sim.render_mesh();
    let path = temp_path("export");

    let mut exporter = JsonFrameExporter::new(&path);
    exporter.init(&mesh).unwrap();
    let mut now = 0.0;
    for _ in 0..4 {
        now += 16.0;
        let report = sim.step(now, None).unwrap();
        exporter
            .submit_frame(&RenderFrame::from_positions(report.frame, &sim.positions()))
            .unwrap();
    }
    assert_eq!(exporter.frame_count(), 4);
    exporter.finalize().unwrap();
    assert_eq!(exporter.frame_count(), 4);

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    let data: AnimationData = serde_json::from_str(&text).unwrap();
    assert_eq!(data.vertex_count, 66);
    assert_eq!(data.triangle_count, 100);
    assert_eq!(data.indices.len(), 300);
    assert_eq!(data.frames.len(), 4);
    assert_eq!(data.frames[3].frame, 3);
    assert_eq!(data.frames[0].positions.len(), 66 * 3);
}

#[test]
fn json_export_rejects_wrong_vertex_count() {
    let mesh = parametric_grid(&Plane::new(1.0, 1.0), 2, 2);
    let mut exporter = JsonFrameExporter::new(temp_path("mismatch"));
    exporter.init(&mesh).unwrap();
    let frame = RenderFrame::from_positions(0, &[Vec3::ZERO; 3]);
    assert!(exporter.submit_frame(&frame).is_err());
    assert_eq!(exporter.frame_count(), 0);
}
