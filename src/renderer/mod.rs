//! Main renderer module.
//!
//! GPU plumbing for the cube field: device and surface management, the cube pipeline, textures,
//! and the uniform and vertex layouts the shader expects.

/// Textured cube pipeline and per-cube GPU resources.
pub mod cube_renderer;
/// Pipeline building utilities for WGPU.
pub mod pipeline_builder;
/// Procedural and loaded cube textures.
pub mod textures;
pub mod uniform;
pub mod vertex;
/// Core WGPU library and utilities.
pub mod wgpu_lib;
