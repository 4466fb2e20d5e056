//! GPU buffers and bind groups for the whole scene.
//!
//! Everything here is sized once at init. The two primitive meshes are
//! uploaded once and shared by all solids; each solid owns its instance
//! buffers, a 160-byte uniform buffer, and one bind group per pipeline.

use wgpu::util::DeviceExt;

use crate::catalog::Solid;
use crate::geometry::PrimitiveMesh;
use crate::gpu::instances::{
    edge_instances, sphere_instances, SolidUniform, SOLID_UNIFORM_SIZE,
};
use crate::renderer::SolidPipelines;

/// Immutable vertex + index buffer pair for one primitive mesh.
pub struct PrimitiveBuffers {
    /// Unit-space positions.
    pub vertex: wgpu::Buffer,
    /// 16-bit triangle indices.
    pub index: wgpu::Buffer,
    /// Number of indices to draw.
    pub index_count: u32,
}

impl PrimitiveBuffers {
    fn new(device: &wgpu::Device, label: &str, mesh: &PrimitiveMesh) -> Self {
        let vertex =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(&mesh.positions),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex,
            index,
            index_count: mesh.index_count(),
        }
    }
}

/// Instance data, uniform buffer, and bind groups for one solid.
pub struct SolidBuffers {
    /// One [`SphereInstance`](crate::gpu::instances::SphereInstance) per
    /// polyhedron vertex.
    pub vertex_instances: wgpu::Buffer,
    /// Sphere instance count.
    pub vertex_count: u32,
    /// One [`EdgeInstance`](crate::gpu::instances::EdgeInstance) per edge.
    pub edge_instances: wgpu::Buffer,
    /// Cylinder instance count.
    pub edge_count: u32,
    /// The solid's [`SolidUniform`] block.
    pub uniform: wgpu::Buffer,
    /// Group 0 for the sphere pipeline.
    pub sphere_bind_group: wgpu::BindGroup,
    /// Group 0 for the cylinder pipeline.
    pub cylinder_bind_group: wgpu::BindGroup,
}

impl SolidBuffers {
    #[allow(clippy::cast_possible_truncation)]
    fn new(
        device: &wgpu::Device,
        pipelines: &SolidPipelines,
        solid: &Solid,
    ) -> Self {
        let name = solid.name();
        let spheres = sphere_instances(solid);
        let edges = edge_instances(solid);

        let vertex_instances =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name} Vertex Instances")),
                contents: bytemuck::cast_slice(&spheres),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let edge_instances =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name} Edge Instances")),
                contents: bytemuck::cast_slice(&edges),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{name} Uniforms")),
            size: SOLID_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind = |layout: &wgpu::BindGroupLayout, pass: &str| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{name} {pass} Bind Group")),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform.as_entire_binding(),
                }],
            })
        };
        let sphere_bind_group =
            bind(&pipelines.sphere.bind_group_layout, "Sphere");
        let cylinder_bind_group =
            bind(&pipelines.cylinder.bind_group_layout, "Cylinder");

        Self {
            vertex_instances,
            vertex_count: spheres.len() as u32,
            edge_instances,
            edge_count: edges.len() as u32,
            uniform,
            sphere_bind_group,
            cylinder_bind_group,
        }
    }
}

/// All scene buffers: the shared primitives and the per-solid sets.
pub struct SceneResources {
    /// Unit sphere drawn at every polyhedron vertex.
    pub sphere: PrimitiveBuffers,
    /// Unit cylinder drawn along every polyhedron edge.
    pub cylinder: PrimitiveBuffers,
    /// Per-solid buffers, in solid index order.
    pub solids: Vec<SolidBuffers>,
}

impl SceneResources {
    /// Upload the primitives and allocate per-solid buffers for `solids`.
    ///
    /// Allocation failures surface through the device error scopes of the
    /// caller, not here.
    pub fn new(
        device: &wgpu::Device,
        pipelines: &SolidPipelines,
        sphere: &PrimitiveMesh,
        cylinder: &PrimitiveMesh,
        solids: &[Solid],
    ) -> Self {
        let sphere = PrimitiveBuffers::new(device, "Sphere", sphere);
        let cylinder = PrimitiveBuffers::new(device, "Cylinder", cylinder);
        let solids: Vec<_> = solids
            .iter()
            .map(|solid| SolidBuffers::new(device, pipelines, solid))
            .collect();
        log::debug!(
            "allocated scene buffers: {} solids, \
             {} sphere / {} cylinder indices",
            solids.len(),
            sphere.index_count,
            cylinder.index_count
        );
        Self {
            sphere,
            cylinder,
            solids,
        }
    }

    /// Overwrite solid `index`'s uniform block. Out-of-range indices are
    /// ignored.
    pub fn write_uniform(
        &self,
        queue: &wgpu::Queue,
        index: usize,
        uniform: &SolidUniform,
    ) {
        if let Some(solid) = self.solids.get(index) {
            queue.write_buffer(
                &solid.uniform,
                0,
                bytemuck::bytes_of(uniform),
            );
        }
    }
}
