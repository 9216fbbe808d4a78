//! # Mesh: CPU-Side Geometry
//!
//! [`MeshData`] is the in-memory shape every mesh source produces: the
//! built-in generators below, and the JSON loader in
//! [`asset`](crate::asset). It mirrors the buffers a
//! [`Primitive`](crate::component::Primitive) uploads: one flat float array
//! per vertex attribute plus an index array.
//!
//! ```text
//! vertices   [x y z  x y z  ...]   3 floats per vertex
//! normals    [x y z  x y z  ...]   3 floats per vertex (or empty)
//! texCoords  [u v    u v    ...]   2 floats per vertex (or empty)
//! indices    [i j k  ...]          u32, < vertex count
//! ```
//!
//! ## Winding Order and Normals
//!
//! All triangles use counter-clockwise (CCW) winding when viewed from the
//! front face, matching `FrontFace::Ccw` with back-face culling. Flat faces
//! (cube faces, cylinder caps) get their own vertices so that each corner
//! can carry the face normal; sharing vertices across a hard edge would
//! smear the lighting.
//!
//! ## Orientation
//!
//! The cylinder's axis is Z: the demo scene rings spheres around it in the
//! XY plane. The sphere keeps Y as its polar axis.

use serde::{Deserialize, Serialize};

use crate::error::{OrreryError, Result};
use crate::math::Vec3;

/// Flat vertex/index arrays for one mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    #[serde(default)]
    pub normals: Vec<f32>,
    #[serde(default)]
    pub tex_coords: Vec<f32>,
}

impl MeshData {
    /// Number of vertices (positions / 3).
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Check attribute lengths and index ranges.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() % 3 != 0 {
            return Err(OrreryError::InvalidMesh(format!(
                "vertex array length {} is not a multiple of 3",
                self.vertices.len()
            )));
        }
        let count = self.vertex_count();
        if !self.normals.is_empty() && self.normals.len() != count * 3 {
            return Err(OrreryError::InvalidMesh(format!(
                "expected {} normal floats, found {}",
                count * 3,
                self.normals.len()
            )));
        }
        if !self.tex_coords.is_empty() && self.tex_coords.len() != count * 2 {
            return Err(OrreryError::InvalidMesh(format!(
                "expected {} texture coordinate floats, found {}",
                count * 2,
                self.tex_coords.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(OrreryError::InvalidMesh(format!(
                "index {bad} out of range for {count} vertices"
            )));
        }
        Ok(())
    }

    /// Fill missing normals / texture coordinates with zeros so every
    /// attribute buffer covers every vertex.
    pub fn padded(mut self) -> Self {
        let count = self.vertex_count();
        if self.normals.is_empty() {
            self.normals = vec![0.0; count * 3];
        }
        if self.tex_coords.is_empty() {
            self.tex_coords = vec![0.0; count * 2];
        }
        self
    }

    fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices * 3),
            indices: Vec::with_capacity(indices),
            normals: Vec::with_capacity(vertices * 3),
            tex_coords: Vec::with_capacity(vertices * 2),
        }
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        self.tex_coords.extend_from_slice(&uv);
        index
    }
}

/// A cube centered at the origin with side length `size`.
///
/// 24 vertices (4 per face, for correct normals) and 36 indices.
pub fn cube(size: f32) -> MeshData {
    let mut mesh = MeshData::with_capacity(24, 36);
    let h = 0.5 * size;

    // (normal, tangent_u, tangent_v) for each face
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    for (normal, u_dir, v_dir) in faces {
        let center = normal * h;
        let base = mesh.vertex_count() as u32;
        for ((cu, cv), uv) in corners.iter().zip(uvs) {
            let position = center + u_dir * (cu * h) + v_dir * (cv * h);
            mesh.push_vertex(position, normal, uv);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

/// A (possibly tapered) cylinder along the Z axis, centered at the origin.
///
/// `slices` divide the circumference, `stacks` divide the height. Both caps
/// are closed with a center fan.
pub fn cylinder(base_radius: f32, top_radius: f32, height: f32, slices: u32, stacks: u32) -> MeshData {
    let slices = slices.max(3);
    let stacks = stacks.max(1);
    let side_vertices = ((stacks + 1) * (slices + 1)) as usize;
    let cap_vertices = 2 * (slices + 1) as usize;
    let index_count = (stacks * slices * 6 + slices * 6) as usize;
    let mut mesh = MeshData::with_capacity(side_vertices + cap_vertices, index_count);

    let tau = std::f32::consts::TAU;
    let half = 0.5 * height;
    // The side normal leans toward the narrow end on a tapered cylinder.
    let slope = if height > 0.0 { (base_radius - top_radius) / height } else { 0.0 };

    // ── Side ──
    for stack in 0..=stacks {
        let t = stack as f32 / stacks as f32;
        let z = -half + t * height;
        let radius = base_radius + (top_radius - base_radius) * t;
        for slice in 0..=slices {
            let u = slice as f32 / slices as f32;
            let (sin, cos) = (u * tau).sin_cos();
            mesh.push_vertex(
                Vec3::new(cos * radius, sin * radius, z),
                Vec3::new(cos, sin, slope).normalize(),
                [u, 1.0 - t],
            );
        }
    }
    for stack in 0..stacks {
        for slice in 0..slices {
            let k1 = stack * (slices + 1) + slice;
            let k2 = k1 + slices + 1;
            mesh.indices
                .extend_from_slice(&[k1, k1 + 1, k2 + 1, k1, k2 + 1, k2]);
        }
    }

    // ── Caps ──
    for (z, radius, normal) in [(-half, base_radius, Vec3::NEG_Z), (half, top_radius, Vec3::Z)] {
        let center = mesh.push_vertex(Vec3::new(0.0, 0.0, z), normal, [0.5, 0.5]);
        for slice in 0..slices {
            let (sin, cos) = (slice as f32 / slices as f32 * tau).sin_cos();
            mesh.push_vertex(
                Vec3::new(cos * radius, sin * radius, z),
                normal,
                [0.5 + cos * 0.5, 0.5 + sin * 0.5],
            );
        }
        for slice in 0..slices {
            let curr = center + 1 + slice;
            let next = center + 1 + (slice + 1) % slices;
            if normal.z > 0.0 {
                mesh.indices.extend_from_slice(&[center, curr, next]);
            } else {
                // Seen from below the winding flips.
                mesh.indices.extend_from_slice(&[center, next, curr]);
            }
        }
    }

    mesh
}

/// A UV sphere centered at the origin.
///
/// `slices` are longitude divisions, `stacks` latitude divisions. U wraps
/// around longitude, V runs from the north pole (0) to the south pole (1).
pub fn sphere(radius: f32, slices: u32, stacks: u32) -> MeshData {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let mut mesh = MeshData::with_capacity(
        ((stacks + 1) * (slices + 1)) as usize,
        (stacks * slices * 6) as usize,
    );

    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let phi = v * std::f32::consts::PI;
        for slice in 0..=slices {
            let u = slice as f32 / slices as f32;
            let theta = u * std::f32::consts::TAU;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.push_vertex(normal * radius, normal, [u, v]);
        }
    }

    for stack in 0..stacks {
        for slice in 0..slices {
            let current = stack * (slices + 1) + slice;
            let next = current + slices + 1;
            mesh.indices.extend_from_slice(&[current, next, current + 1]);
            mesh.indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(mesh: &MeshData) {
        for n in mesh.normals.chunks(3) {
            let len = Vec3::new(n[0], n[1], n[2]).length();
            assert!((len - 1.0).abs() < 1e-5, "normal should be unit length, got {len}");
        }
    }

    #[test]
    fn cube_has_correct_counts() {
        let mesh = cube(1.0);
        assert_eq!(mesh.vertex_count(), 24, "cube should have 24 vertices (4 per face)");
        assert_eq!(mesh.indices.len(), 36, "cube should have 36 indices (6 per face)");
        mesh.validate().unwrap();
        assert_unit_normals(&mesh);
    }

    #[test]
    fn cube_size_scales_positions() {
        let mesh = cube(3.0);
        let max = mesh.vertices.iter().cloned().fold(f32::MIN, f32::max);
        assert!((max - 1.5).abs() < 1e-6);
    }

    #[test]
    fn cylinder_counts_and_ranges() {
        let mesh = cylinder(1.0, 1.0, 2.0, 36, 1);
        assert_eq!(mesh.vertex_count(), 2 * 37 + 2 * 37);
        assert_eq!(mesh.indices.len(), 36 * 6 + 36 * 6);
        mesh.validate().unwrap();
        assert_unit_normals(&mesh);
    }

    #[test]
    fn cylinder_spans_height_along_z() {
        let mesh = cylinder(1.0, 0.5, 2.0, 8, 3);
        let zs: Vec<f32> = mesh.vertices.chunks(3).map(|p| p[2]).collect();
        let min = zs.iter().cloned().fold(f32::MAX, f32::min);
        let max = zs.iter().cloned().fold(f32::MIN, f32::max);
        assert!((min + 1.0).abs() < 1e-6);
        assert!((max - 1.0).abs() < 1e-6);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn sphere_has_correct_counts() {
        let mesh = sphere(0.75, 18, 18);
        assert_eq!(mesh.vertex_count(), 19 * 19);
        assert_eq!(mesh.indices.len(), 18 * 18 * 6);
        mesh.validate().unwrap();
        assert_unit_normals(&mesh);
    }

    #[test]
    fn sphere_positions_lie_on_radius() {
        let mesh = sphere(0.75, 8, 4);
        for p in mesh.vertices.chunks(3) {
            let len = Vec3::new(p[0], p[1], p[2]).length();
            assert!((len - 0.75).abs() < 1e-5);
        }
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mesh = MeshData {
            vertices: vec![0.0; 9],
            indices: vec![0, 1, 3],
            ..Default::default()
        };
        assert!(matches!(mesh.validate(), Err(OrreryError::InvalidMesh(_))));
    }

    #[test]
    fn validate_rejects_mismatched_normals() {
        let mesh = MeshData {
            vertices: vec![0.0; 9],
            indices: vec![0, 1, 2],
            normals: vec![0.0; 6],
            tex_coords: Vec::new(),
        };
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn padded_fills_missing_attributes() {
        let mesh = MeshData {
            vertices: vec![0.0; 12],
            indices: vec![0, 1, 2, 0, 2, 3],
            ..Default::default()
        }
        .padded();
        assert_eq!(mesh.normals.len(), 12);
        assert_eq!(mesh.tex_coords.len(), 8);
        mesh.validate().unwrap();
    }
}
