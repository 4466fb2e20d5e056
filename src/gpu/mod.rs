//! GPU resource management.
//!
//! Device and surface acquisition, shader loading, vertex/uniform record
//! layouts, scene buffers, and size-dependent textures.

/// Per-instance vertex records and the per-solid uniform block.
pub mod instances;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Scene buffers and bind groups, allocated once at init.
pub mod resources;
/// WGSL loading and validation.
pub mod shader;
/// Depth buffer and headless color target.
pub mod texture;
