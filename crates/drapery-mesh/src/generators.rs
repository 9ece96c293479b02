//! Procedural mesh generation from parametric surfaces.

use crate::mesh::TriangleMesh;
use crate::surface::ParametricSurface;

/// Samples `surface` on a `slices × stacks` grid and triangulates it.
///
/// Vertex `u + v * (slices + 1)` is the surface point at
/// `(u / slices, v / stacks)`, the same order the cloth lays out its
/// particles in. Each cell `(u, v)` with corners
/// `a = (u, v)`, `b = (u+1, v)`, `c = (u+1, v+1)`, `d = (u, v+1)`
/// becomes triangles `[a, b, d]` and `[b, c, d]`, which face +Z on a
/// [`Plane`](crate::Plane).
///
/// # Example
/// ```
/// use drapery_mesh::generators::parametric_grid;
/// use drapery_mesh::Plane;
/// let mesh = parametric_grid(&Plane::new(2.0, 2.0), 2, 2);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 cells × 2 tris each
/// ```
pub fn parametric_grid<S: ParametricSurface + ?Sized>(
    surface: &S,
    slices: usize,
    stacks: usize,
) -> TriangleMesh {
    let verts_u = slices + 1;
    let verts_v = stacks + 1;
    let mut mesh = TriangleMesh::with_capacity(verts_u * verts_v, slices * stacks * 2);

    for v in 0..verts_v {
        for u in 0..verts_u {
            let s = u as f32 / slices.max(1) as f32;
            let t = v as f32 / stacks.max(1) as f32;
            let p = surface.evaluate(s, t);

            mesh.pos_x.push(p.x);
            mesh.pos_y.push(p.y);
            mesh.pos_z.push(p.z);

            // Recomputed from geometry once the cloth starts moving.
            mesh.normal_x.push(0.0);
            mesh.normal_y.push(0.0);
            mesh.normal_z.push(1.0);

            mesh.uv_u.push(s);
            mesh.uv_v.push(t);
        }
    }

    for v in 0..stacks {
        for u in 0..slices {
            let a = (v * verts_u + u) as u32;
            let b = a + 1;
            let d = a + verts_u as u32;
            let c = d + 1;

            mesh.indices.extend_from_slice(&[a, b, d]);
            mesh.indices.extend_from_slice(&[b, c, d]);
        }
    }

    mesh
}
