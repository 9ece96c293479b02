//! # drapery-mesh
//!
//! Render-side triangle mesh for the cloth, stored in Structure-of-Arrays
//! (SoA) layout, plus the parametric surfaces the cloth is laid out on.
//!
//! ## Key Types
//!
//! - [`ParametricSurface`] — maps grid coordinates `(u, v) ∈ [0,1]²` to a
//!   rest position. [`Plane`] is the flat sheet the cloth starts as.
//! - [`TriangleMesh`] — positions, normals, UVs, and triangle indices.
//! - [`generators::parametric_grid`] — builds a mesh whose vertex order
//!   matches the cloth particle order, so vertex `i` is particle `i`.
//! - [`normals::compute_vertex_normals`] — smooth normals of the deformed
//!   surface, the input of the wind force.

pub mod generators;
pub mod mesh;
pub mod normals;
pub mod surface;

pub use mesh::TriangleMesh;
pub use surface::{ParametricSurface, Plane};
