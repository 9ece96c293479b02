//! Renderer trait and HeadlessRenderer.
//!
//! The renderer is called once per frame to present the current cloth
//! shape. Vertex `i` of every frame is particle `i` of the cloth.

use drapery_math::Vec3;
use drapery_mesh::TriangleMesh;
use drapery_types::DraperyResult;

/// A single render frame (SoA positions).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Frame index this data corresponds to.
    pub frame: u64,
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,
}

impl RenderFrame {
    /// Create a frame from particle positions in topology order.
    pub fn from_positions(frame: u64, positions: &[Vec3]) -> Self {
        Self {
            frame,
            pos_x: positions.iter().map(|p| p.x).collect(),
            pos_y: positions.iter().map(|p| p.y).collect(),
            pos_z: positions.iter().map(|p| p.z).collect(),
        }
    }

    /// Create a frame from a mesh's current vertex positions.
    pub fn from_mesh(frame: u64, mesh: &TriangleMesh) -> Self {
        Self {
            frame,
            pos_x: mesh.pos_x.clone(),
            pos_y: mesh.pos_y.clone(),
            pos_z: mesh.pos_z.clone(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Positions as `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count() * 3);
        for i in 0..self.vertex_count() {
            out.push(self.pos_x[i]);
            out.push(self.pos_y[i]);
            out.push(self.pos_z[i]);
        }
        out
    }
}

/// Trait for rendering simulation output.
///
/// # Implementations
/// - [`HeadlessRenderer`]: discards frames (benchmarks, CI)
/// - [`JsonFrameExporter`](crate::JsonFrameExporter): writes the animation to JSON
pub trait Renderer: Send {
    /// Initialize the renderer with the mesh topology.
    fn init(&mut self, mesh: &TriangleMesh) -> DraperyResult<()>;

    /// Submit a frame for rendering.
    fn submit_frame(&mut self, frame: &RenderFrame) -> DraperyResult<()>;

    /// Finalize rendering (flush buffers, close files, etc.).
    fn finalize(&mut self) -> DraperyResult<()>;

    fn name(&self) -> &str;

    /// Number of frames submitted so far.
    fn frame_count(&self) -> u64;
}

/// Headless renderer: counts frames and discards them.
pub struct HeadlessRenderer {
    frames: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self { frames: 0 }
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HeadlessRenderer {
    fn init(&mut self, _mesh: &TriangleMesh) -> DraperyResult<()> {
        Ok(())
    }

    fn submit_frame(&mut self, _frame: &RenderFrame) -> DraperyResult<()> {
        self.frames += 1;
        Ok(())
    }

    fn finalize(&mut self) -> DraperyResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }

    fn frame_count(&self) -> u64 {
        self.frames
    }
}
