//! JSON frame exporter: writes per-frame cloth positions for visual inspection.
//!
//! Captures vertex positions at each frame and serializes the whole
//! animation, together with the triangle indices, on `finalize()`.

use std::path::{Path, PathBuf};

use drapery_mesh::TriangleMesh;
use drapery_types::{DraperyError, DraperyResult};
use serde::{Deserialize, Serialize};

use crate::renderer::{RenderFrame, Renderer};

/// A single frame of captured positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    pub frame: u64,
    /// Interleaved `[x0, y0, z0, x1, y1, z1, ...]`.
    pub positions: Vec<f32>,
}

/// Complete animation as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationData {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub indices: Vec<u32>,
    pub frames: Vec<FrameData>,
}

/// Exports simulation frames to a JSON file.
///
/// ```text
/// let mut exporter = JsonFrameExporter::new("cloth.json");
/// exporter.init(&mesh)?;
/// // ... submit_frame() once per step ...
/// exporter.finalize()?; // writes the file
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    indices: Vec<u32>,
    vertex_count: usize,
    triangle_count: usize,
    frames: Vec<FrameData>,
    written: u64,
}

impl JsonFrameExporter {
    pub fn new(output_path: impl AsRef<Path>) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
            indices: Vec::new(),
            vertex_count: 0,
            triangle_count: 0,
            frames: Vec::new(),
            written: 0,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl Renderer for JsonFrameExporter {
    fn init(&mut self, mesh: &TriangleMesh) -> DraperyResult<()> {
        mesh.validate()?;
        self.vertex_count = mesh.vertex_count();
        self.triangle_count = mesh.triangle_count();
        self.indices = mesh.indices.clone();
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> DraperyResult<()> {
        if frame.vertex_count() != self.vertex_count {
            return Err(DraperyError::InvalidMesh(format!(
                "frame {} has {} vertices, exporter was initialised with {}",
                frame.frame,
                frame.vertex_count(),
                self.vertex_count
            )));
        }
        self.frames.push(FrameData {
            frame: frame.frame,
            positions: frame.interleaved(),
        });
        Ok(())
    }

    fn finalize(&mut self) -> DraperyResult<()> {
        let frames = std::mem::take(&mut self.frames);
        let frame_total = frames.len() as u64;
        let data = AnimationData {
            vertex_count: self.vertex_count,
            triangle_count: self.triangle_count,
            indices: self.indices.clone(),
            frames,
        };
        let json = serde_json::to_string(&data)
            .map_err(|e| DraperyError::Serialization(format!("JSON serialization failed: {e}")))?;
        std::fs::write(&self.output_path, json)?;
        self.written += frame_total;
        tracing::info!(
            path = %self.output_path.display(),
            frames = frame_total,
            "animation exported"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }

    fn frame_count(&self) -> u64 {
        self.written + self.frames.len() as u64
    }
}
