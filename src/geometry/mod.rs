//! Procedural unit primitive meshes.
//!
//! Two templates are generated once at startup and shared by every solid:
//! a unit sphere (drawn at each polyhedron vertex) and a unit cylinder of
//! height 1 along +Y (stretched along each edge by the shader).
//!
//! Both meshes wind clockwise when viewed from outside, so the pipelines
//! that draw them declare [`wgpu::FrontFace::Cw`].

use std::f32::consts::{PI, TAU};
use std::fmt;

/// Fewest segments that still produce a closed ring.
pub const MIN_SEGMENTS: u32 = 3;

/// Errors produced by the mesh generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Segment count below [`MIN_SEGMENTS`].
    TooFewSegments(u32),
    /// The mesh would need more vertices than a 16-bit index can address.
    TooManyVertices {
        /// Requested segment count.
        segments: u32,
        /// Vertices the mesh would need.
        vertices: u64,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSegments(n) => {
                write!(f, "{n} segments is below the minimum of {MIN_SEGMENTS}")
            }
            Self::TooManyVertices { segments, vertices } => write!(
                f,
                "{segments} segments need {vertices} vertices, more than \
                 16-bit indices can address"
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// Vertex positions plus a triangle-list index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveMesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Triangle indices, three per triangle.
    pub indices: Vec<u16>,
}

impl PrimitiveMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of index entries (three per triangle).
    #[allow(clippy::cast_possible_truncation)]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

fn check_segments(segments: u32, vertices: u64) -> Result<(), MeshError> {
    if segments < MIN_SEGMENTS {
        return Err(MeshError::TooFewSegments(segments));
    }
    if vertices > u64::from(u16::MAX) + 1 {
        return Err(MeshError::TooManyVertices { segments, vertices });
    }
    Ok(())
}

/// Unit sphere as a latitude/longitude grid.
///
/// Produces `(segments + 1)²` vertices (the seam and pole rows are
/// duplicated) and `6 · segments²` indices.
///
/// # Errors
///
/// Returns [`MeshError`] if `segments` is below [`MIN_SEGMENTS`] or the grid
/// would not fit 16-bit indices.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn generate_sphere(segments: u32) -> Result<PrimitiveMesh, MeshError> {
    let row = u64::from(segments) + 1;
    check_segments(segments, row * row)?;

    let mut positions = Vec::with_capacity((row * row) as usize);
    for lat in 0..=segments {
        let theta = lat as f32 * PI / segments as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for lon in 0..=segments {
            let phi = lon as f32 * TAU / segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            positions.push([cos_p * sin_t, cos_t, sin_p * sin_t]);
        }
    }

    let stride = segments as u16 + 1;
    let mut indices = Vec::with_capacity(6 * (segments * segments) as usize);
    for lat in 0..segments as u16 {
        for lon in 0..segments as u16 {
            let a = lat * stride + lon;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }

    Ok(PrimitiveMesh { positions, indices })
}

/// Open unit cylinder: radius 1, spanning `y = 0` to `y = 1`.
///
/// Each ring step emits its top vertex then its bottom vertex, giving
/// `2 · (segments + 1)` vertices and `6 · segments` indices. No caps.
///
/// # Errors
///
/// Returns [`MeshError`] if `segments` is below [`MIN_SEGMENTS`] or the
/// ring would not fit 16-bit indices.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn generate_cylinder(segments: u32) -> Result<PrimitiveMesh, MeshError> {
    check_segments(segments, 2 * (u64::from(segments) + 1))?;

    let mut positions = Vec::with_capacity(2 * (segments as usize + 1));
    for i in 0..=segments {
        let angle = i as f32 * TAU / segments as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        positions.push([cos_a, 1.0, sin_a]);
        positions.push([cos_a, 0.0, sin_a]);
    }

    let mut indices = Vec::with_capacity(6 * segments as usize);
    for i in 0..segments as u16 {
        let a = i * 2;
        let b = a + 2;
        indices.extend_from_slice(&[a, a + 1, b, b, a + 1, b + 1]);
    }

    Ok(PrimitiveMesh { positions, indices })
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    /// Signed winding of each non-degenerate triangle relative to the
    /// outward direction `outward(centroid)`: negative means clockwise when
    /// viewed from outside.
    fn windings(
        mesh: &PrimitiveMesh,
        outward: impl Fn(Vec3) -> Vec3,
    ) -> Vec<f32> {
        mesh.indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let [a, b, c] = [tri[0], tri[1], tri[2]]
                    .map(|i| Vec3::from(mesh.positions[i as usize]));
                let normal = (b - a).cross(c - a);
                (normal.length() > 1e-6)
                    .then(|| normal.dot(outward((a + b + c) / 3.0)))
            })
            .collect()
    }

    #[test]
    fn sphere_counts() {
        let mesh = generate_sphere(10).unwrap();
        assert_eq!(mesh.vertex_count(), 121);
        assert_eq!(mesh.index_count(), 600);

        for n in [3, 4, 16, 32] {
            let mesh = generate_sphere(n).unwrap();
            assert_eq!(mesh.vertex_count(), ((n + 1) * (n + 1)) as usize);
            assert_eq!(mesh.index_count(), 6 * n * n);
        }
    }

    #[test]
    fn cylinder_counts() {
        let mesh = generate_cylinder(8).unwrap();
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.index_count(), 48);

        for n in [3, 5, 64] {
            let mesh = generate_cylinder(n).unwrap();
            assert_eq!(mesh.vertex_count(), 2 * (n as usize + 1));
            assert_eq!(mesh.index_count(), 6 * n);
        }
    }

    #[test]
    fn generators_are_deterministic() {
        assert_eq!(generate_sphere(10), generate_sphere(10));
        assert_eq!(generate_cylinder(8), generate_cylinder(8));
    }

    #[test]
    fn sphere_vertices_lie_on_unit_sphere() {
        let mesh = generate_sphere(10).unwrap();
        for p in &mesh.positions {
            assert!((Vec3::from(*p).length() - 1.0).abs() < 1e-5);
        }
        assert_eq!(mesh.positions[0][1], 1.0);
    }

    #[test]
    fn cylinder_vertices_alternate_top_and_bottom() {
        let mesh = generate_cylinder(8).unwrap();
        for pair in mesh.positions.chunks_exact(2) {
            assert_eq!(pair[0][1], 1.0);
            assert_eq!(pair[1][1], 0.0);
            let radius = pair[0][0].hypot(pair[0][2]);
            assert!((radius - 1.0).abs() < 1e-6);
            assert_eq!([pair[0][0], pair[0][2]], [pair[1][0], pair[1][2]]);
        }
    }

    #[test]
    fn indices_stay_in_range() {
        let meshes =
            [generate_sphere(10).unwrap(), generate_cylinder(8).unwrap()];
        for mesh in meshes {
            let n = mesh.vertex_count();
            assert!(mesh.indices.iter().all(|&i| (i as usize) < n));
        }
    }

    #[test]
    fn both_meshes_wind_clockwise_from_outside() {
        let sphere = generate_sphere(10).unwrap();
        let w = windings(&sphere, |c| c);
        assert!(!w.is_empty());
        assert!(w.iter().all(|&d| d < 0.0));

        let cylinder = generate_cylinder(8).unwrap();
        let w = windings(&cylinder, |c| Vec3::new(c.x, 0.0, c.z));
        assert_eq!(w.len(), 16);
        assert!(w.iter().all(|&d| d < 0.0));
    }

    #[test]
    fn rejects_degenerate_segment_counts() {
        assert_eq!(generate_sphere(2), Err(MeshError::TooFewSegments(2)));
        assert_eq!(generate_cylinder(0), Err(MeshError::TooFewSegments(0)));
    }

    #[test]
    fn rejects_meshes_beyond_u16_indices() {
        assert!(generate_sphere(255).is_ok());
        assert!(matches!(
            generate_sphere(256),
            Err(MeshError::TooManyVertices { .. })
        ));
        assert!(generate_cylinder(32_767).is_ok());
        assert!(generate_cylinder(32_768).is_err());
    }
}
