//! Per-cube uniform block.
//!
//! [`Uniforms`] holds the final model-view-projection matrix of one cube, laid out exactly as the
//! `mat4x4<f32>` the vertex shader reads at `@binding(0)`.

use crate::math::mat::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    /// Column-major MVP matrix.
    pub matrix: [[f32; 4]; 4],
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new()
    }
}

impl Uniforms {
    /// Identity transform.
    pub fn new() -> Self {
        Self::from_matrix(&Mat4::identity())
    }

    pub fn from_matrix(matrix: &Mat4) -> Self {
        Self { matrix: matrix.0 }
    }

    /// Raw bytes for `queue.write_buffer`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
