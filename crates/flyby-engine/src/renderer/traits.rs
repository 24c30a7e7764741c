//! Rendering collaborator contract.
//!
//! The engine never talks to a GPU API directly. Games issue draw calls
//! against this trait; the host supplies the implementation (in the web
//! build, a `CommandBuffer` whose stream is replayed by the page's WebGL
//! code). Resource creation other than geometry upload belongs to the
//! `AssetLoader`.

use glam::{Mat4, Vec3};
use crate::api::types::{GeometryHandle, ProgramHandle, TextureHandle};

/// Vertex data for one piece of static geometry.
/// Positions and texture coordinates are index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    pub positions: Vec<Vec3>,
    pub tex_coords: Vec<[f32; 2]>,
}

impl GeometryData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Interleaved `x, y, z, u, v` floats. Missing UVs are written as zero.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.positions.len() * 5);
        for (i, p) in self.positions.iter().enumerate() {
            let uv = self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]);
            out.extend_from_slice(&[p.x, p.y, p.z, uv[0], uv[1]]);
        }
        out
    }
}

/// Draw-call surface implemented by the host.
pub trait Renderer {
    /// Upload static vertex data. Called only during setup.
    fn upload_geometry(&mut self, geometry: &GeometryData) -> GeometryHandle;

    fn use_program(&mut self, program: ProgramHandle);

    fn bind_texture(&mut self, texture: TextureHandle);

    /// Set the matrices for subsequent draws.
    fn set_transform(&mut self, model_view: Mat4, projection: Mat4);

    /// Draw the geometry as a triangle list.
    fn draw_triangles(&mut self, geometry: GeometryHandle);

    /// Draw the geometry as a closed line loop (untextured).
    fn draw_line_loop(&mut self, geometry: GeometryHandle);

    fn set_viewport(&mut self, width: u32, height: u32);

    /// Toggle alpha blending (src-alpha, one-minus-src-alpha).
    fn set_blend(&mut self, enabled: bool);

    fn set_depth_write(&mut self, enabled: bool);

    fn set_face_culling(&mut self, enabled: bool);
}
