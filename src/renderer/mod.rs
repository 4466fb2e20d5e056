//! Render pipelines for the two instanced draw passes.
//!
//! Both pipelines share the shader module, the depth state and the bind
//! group shape (one uniform block at group 0). Each keeps its own bind group
//! layout so every solid gets one bind group per pipeline.

pub(crate) mod pipeline_util;

use crate::gpu::instances::{
    EdgeInstance, SphereInstance, PRIMITIVE_POSITION_LAYOUT,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader::{ShaderProgram, FS_MAIN, VS_CYLINDER, VS_SPHERE};

/// One render pipeline plus the layout its bind groups must use.
pub struct SolidPipeline {
    /// The render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Layout of bind group 0 (the per-solid uniform block).
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl SolidPipeline {
    fn new(
        context: &RenderContext,
        shader: &wgpu::ShaderModule,
        label: &str,
        entry_point: &str,
        buffers: &[wgpu::VertexBufferLayout<'_>],
    ) -> Self {
        let device = &context.device;
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} Uniform Layout")),
                entries: &[pipeline_util::uniform_buffer(0)],
            });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} Pipeline Layout")),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(&format!("{label} Pipeline")),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some(entry_point),
                    buffers,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some(FS_MAIN),
                    targets: &pipeline_util::color_targets(context.format()),
                    compilation_options: Default::default(),
                }),
                primitive: pipeline_util::primitive_state(),
                depth_stencil: Some(pipeline_util::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        Self {
            pipeline,
            bind_group_layout,
        }
    }
}

/// The sphere and cylinder pipelines.
pub struct SolidPipelines {
    /// Unit sphere instanced per polyhedron vertex.
    pub sphere: SolidPipeline,
    /// Unit cylinder instanced per polyhedron edge.
    pub cylinder: SolidPipeline,
}

impl SolidPipelines {
    /// Build both pipelines from one validated shader program.
    pub fn new(context: &RenderContext, program: &ShaderProgram) -> Self {
        let shader = program.create_module(&context.device);
        let sphere = SolidPipeline::new(
            context,
            &shader,
            "Sphere",
            VS_SPHERE,
            &[PRIMITIVE_POSITION_LAYOUT, SphereInstance::LAYOUT],
        );
        let cylinder = SolidPipeline::new(
            context,
            &shader,
            "Cylinder",
            VS_CYLINDER,
            &[PRIMITIVE_POSITION_LAYOUT, EdgeInstance::LAYOUT],
        );
        Self { sphere, cylinder }
    }
}
