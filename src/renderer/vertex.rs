//! Vertex layout and cube mesh.
//!
//! The cube spans `[-1, 1]` on every axis; the per-cube scale of 0.5 brings it to unit size in
//! the world. Triangles are wound counter-clockwise when seen from outside the cube, matching the
//! pipeline's `FrontFace::Ccw` with back-face culling.

/// One mesh vertex: object-space position and texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Vertices in the cube mesh (6 faces, 2 triangles each).
pub const CUBE_VERTEX_COUNT: u32 = 36;

impl CubeVertex {
    const fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, z],
            uv: [u, v],
        }
    }

    /// Buffer layout: position at location 0, uv at location 1.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// The 36-vertex textured cube, faces in order +Z, -Z, -X, +X, +Y, -Y.
pub fn cube_vertices() -> [CubeVertex; CUBE_VERTEX_COUNT as usize] {
    let v = CubeVertex::new;
    [
        // +Z
        v(-1.0, -1.0, 1.0, 0.0, 1.0),
        v(1.0, -1.0, 1.0, 1.0, 1.0),
        v(1.0, 1.0, 1.0, 1.0, 0.0),
        v(-1.0, -1.0, 1.0, 0.0, 1.0),
        v(1.0, 1.0, 1.0, 1.0, 0.0),
        v(-1.0, 1.0, 1.0, 0.0, 0.0),
        // -Z
        v(1.0, -1.0, -1.0, 0.0, 1.0),
        v(-1.0, -1.0, -1.0, 1.0, 1.0),
        v(-1.0, 1.0, -1.0, 1.0, 0.0),
        v(1.0, -1.0, -1.0, 0.0, 1.0),
        v(-1.0, 1.0, -1.0, 1.0, 0.0),
        v(1.0, 1.0, -1.0, 0.0, 0.0),
        // -X
        v(-1.0, -1.0, -1.0, 0.0, 1.0),
        v(-1.0, -1.0, 1.0, 1.0, 1.0),
        v(-1.0, 1.0, 1.0, 1.0, 0.0),
        v(-1.0, -1.0, -1.0, 0.0, 1.0),
        v(-1.0, 1.0, 1.0, 1.0, 0.0),
        v(-1.0, 1.0, -1.0, 0.0, 0.0),
        // +X
        v(1.0, -1.0, 1.0, 0.0, 1.0),
        v(1.0, -1.0, -1.0, 1.0, 1.0),
        v(1.0, 1.0, -1.0, 1.0, 0.0),
        v(1.0, -1.0, 1.0, 0.0, 1.0),
        v(1.0, 1.0, -1.0, 1.0, 0.0),
        v(1.0, 1.0, 1.0, 0.0, 0.0),
        // +Y
        v(-1.0, 1.0, 1.0, 0.0, 1.0),
        v(1.0, 1.0, 1.0, 1.0, 1.0),
        v(1.0, 1.0, -1.0, 1.0, 0.0),
        v(-1.0, 1.0, 1.0, 0.0, 1.0),
        v(1.0, 1.0, -1.0, 1.0, 0.0),
        v(-1.0, 1.0, -1.0, 0.0, 0.0),
        // -Y
        v(-1.0, -1.0, -1.0, 0.0, 1.0),
        v(1.0, -1.0, -1.0, 1.0, 1.0),
        v(1.0, -1.0, 1.0, 1.0, 0.0),
        v(-1.0, -1.0, -1.0, 0.0, 1.0),
        v(1.0, -1.0, 1.0, 1.0, 0.0),
        v(-1.0, -1.0, 1.0, 0.0, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec::Vec3;

    #[test]
    fn vertex_stride_is_five_floats() {
        assert_eq!(std::mem::size_of::<CubeVertex>(), 20);
        assert_eq!(CubeVertex::desc().array_stride, 20);
    }

    #[test]
    fn every_triangle_faces_outward() {
        let vertices = cube_vertices();
        for (i, tri) in vertices.chunks_exact(3).enumerate() {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| Vec3::from(v.position));
            let normal = (b - a).cross(&(c - a));
            let centroid = (a + b + c) * (1.0 / 3.0);
            assert!(normal.dot(&centroid) > 0.0, "triangle {i} is wound inward");
        }
    }

    #[test]
    fn faces_cover_all_six_sides() {
        let vertices = cube_vertices();
        let mut normals: Vec<[i32; 3]> = vertices
            .chunks_exact(6)
            .map(|face| {
                let [a, b, c] = [face[0], face[1], face[2]].map(|v| Vec3::from(v.position));
                let n = (b - a).cross(&(c - a)).normalize();
                [n.x().round() as i32, n.y().round() as i32, n.z().round() as i32]
            })
            .collect();
        normals.sort();
        normals.dedup();
        assert_eq!(normals.len(), 6);
    }

    #[test]
    fn uvs_stay_in_unit_square() {
        for v in cube_vertices() {
            assert!(v.uv.iter().all(|c| (0.0..=1.0).contains(c)));
            assert!(v.position.iter().all(|c| c.abs() == 1.0));
        }
    }
}
