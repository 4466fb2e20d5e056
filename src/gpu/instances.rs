//! Per-instance vertex records and the per-solid uniform block.
//!
//! ```text
//! SphereInstance  12 bytes   location(1) center        Float32x3
//! EdgeInstance    24 bytes   location(1) start         Float32x3
//!                            location(2) end           Float32x3 (offset 12)
//! SolidUniform   160 bytes   mvp | model_view | near_color | far_color
//! ```
//!
//! Location 0 is always the unit primitive position (12-byte stride).

use bytemuck::{Pod, Zeroable};

use crate::catalog::Solid;
use crate::math::transform::Mat4;

/// Vertex layout of the shared unit sphere/cylinder templates.
pub const PRIMITIVE_POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> =
    wgpu::VertexBufferLayout {
        array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    };

/// One sphere per polyhedron vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SphereInstance {
    /// Sphere center in object space.
    pub center: [f32; 3],
}

impl SphereInstance {
    /// Instance-rate layout feeding `@location(1)`.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> =
        wgpu::VertexBufferLayout {
            array_stride: size_of::<SphereInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            }],
        };
}

/// One cylinder per polyhedron edge, stretched from `start` to `end`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct EdgeInstance {
    /// First endpoint in object space.
    pub start: [f32; 3],
    /// Second endpoint in object space.
    pub end: [f32; 3],
}

impl EdgeInstance {
    /// Instance-rate layout feeding `@location(1)` and `@location(2)`.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> =
        wgpu::VertexBufferLayout {
            array_stride: size_of::<EdgeInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        };
}

/// Per-solid uniform block, rewritten every frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SolidUniform {
    /// Model-view-projection matrix (column-major).
    pub mvp: Mat4,
    /// Model-view matrix (column-major), used for view-space depth.
    pub model_view: Mat4,
    /// Color at the near end of the depth gradient.
    pub near_color: [f32; 4],
    /// Color at the far end of the depth gradient.
    pub far_color: [f32; 4],
}

/// Size of [`SolidUniform`] in bytes.
pub const SOLID_UNIFORM_SIZE: u64 = size_of::<SolidUniform>() as u64;

const _: () = assert!(SOLID_UNIFORM_SIZE == 160);

/// Sphere instances for every vertex of `solid`, in vertex order.
pub fn sphere_instances(solid: &Solid) -> Vec<SphereInstance> {
    solid
        .vertices
        .iter()
        .map(|v| SphereInstance { center: v.to_array() })
        .collect()
}

/// Edge instances for every edge of `solid`, in edge order.
pub fn edge_instances(solid: &Solid) -> Vec<EdgeInstance> {
    solid
        .edges
        .iter()
        .map(|&edge| {
            let (start, end) = solid.endpoints(edge);
            EdgeInstance {
                start: start.to_array(),
                end: end.to_array(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{cube, platonic_solids};

    #[test]
    fn record_sizes_match_vertex_layouts() {
        assert_eq!(size_of::<SphereInstance>(), 12);
        assert_eq!(size_of::<EdgeInstance>(), 24);
        assert_eq!(SphereInstance::LAYOUT.array_stride, 12);
        assert_eq!(EdgeInstance::LAYOUT.array_stride, 24);
        assert_eq!(SOLID_UNIFORM_SIZE, 160);
        assert_eq!(size_of::<SolidUniform>() / size_of::<f32>(), 40);
    }

    #[test]
    fn instance_counts_follow_topology() {
        for solid in platonic_solids() {
            assert_eq!(sphere_instances(&solid).len(), solid.vertices.len());
            assert_eq!(edge_instances(&solid).len(), solid.edges.len());
        }
    }

    #[test]
    fn edge_instances_pack_both_endpoints() {
        let solid = cube();
        let edges = edge_instances(&solid);
        for (instance, &edge) in edges.iter().zip(&solid.edges) {
            assert_eq!(instance.start, solid.vertices[edge.a].to_array());
            assert_eq!(instance.end, solid.vertices[edge.b].to_array());
        }
        let floats: &[f32] = bytemuck::cast_slice(&edges);
        assert_eq!(floats.len(), 6 * solid.edges.len());
    }

    #[test]
    fn uniform_packs_in_declared_order() {
        let mut mvp = [0.0; 16];
        mvp[0] = 1.0;
        let uniform = SolidUniform {
            mvp,
            model_view: [2.0; 16],
            near_color: [3.0; 4],
            far_color: [4.0; 4],
        };
        let floats: &[f32] =
            bytemuck::cast_slice(std::slice::from_ref(&uniform));
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[16], 2.0);
        assert_eq!(floats[32], 3.0);
        assert_eq!(floats[36], 4.0);
        assert_eq!(floats.len(), 40);
    }
}
