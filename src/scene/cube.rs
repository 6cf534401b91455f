//! Spawned cube state and its transform pipeline.
//!
//! A [`SpawnedCube`] has a fixed world position and spin rate, and an accumulated rotation. Each
//! frame it integrates its rotation and composes
//!
//! ```text
//! model = T(position) * (Rx(rot.x) * (Ry(rot.y) * Rz(rot.z))) * S(scale)
//! final = view_projection * model
//! ```
//!
//! so the unit cube is scaled first, then rotated about its own X, Y, Z axes in that order, then
//! moved to its world position.

use crate::math::mat::Mat4;
use crate::math::vec::Vec3;

/// Stable identifier a renderer uses to find the GPU resources of a cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedCube {
    id: CubeId,
    position: Vec3,
    angular_velocity: Vec3,
    /// Accumulated Euler angles in radians. Grows without wrapping.
    pub rotation: Vec3,
    texture_index: usize,
    scale: f32,
}

impl SpawnedCube {
    pub fn new(
        id: CubeId,
        position: Vec3,
        angular_velocity: Vec3,
        texture_index: usize,
        scale: f32,
    ) -> Self {
        Self {
            id,
            position,
            angular_velocity,
            rotation: Vec3::ZERO,
            texture_index,
            scale,
        }
    }

    pub fn id(&self) -> CubeId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Radians per second about each axis.
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    pub fn texture_index(&self) -> usize {
        self.texture_index
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Integrates the spin over `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.rotation = self.rotation + self.angular_velocity * dt;
    }

    /// Local-to-world matrix.
    pub fn model_matrix(&self) -> Mat4 {
        let translation = Mat4::translation(self.position.x(), self.position.y(), self.position.z());
        let scaling = Mat4::scaling(self.scale, self.scale, self.scale);
        let rotation = Mat4::rotation_x(self.rotation.x()).multiply(
            &Mat4::rotation_y(self.rotation.y()).multiply(&Mat4::rotation_z(self.rotation.z())),
        );

        translation.multiply(&rotation.multiply(&scaling))
    }

    /// The matrix uploaded for this cube: `view_projection * model`.
    pub fn final_matrix(&self, view_projection: &Mat4) -> Mat4 {
        view_projection.multiply(&self.model_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    fn cube_at(position: Vec3, angular_velocity: Vec3) -> SpawnedCube {
        SpawnedCube::new(CubeId(1), position, angular_velocity, 0, 0.5)
    }

    fn assert_point(actual: [f32; 4], expected: [f32; 4]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < EPS, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn update_integrates_angular_velocity() {
        let mut cube = cube_at(Vec3::ZERO, Vec3::new(0.5, -1.0, 1.2));
        cube.update(0.5);
        cube.update(0.5);
        assert!((cube.rotation - Vec3::new(0.5, -1.0, 1.2)).length() < EPS);
        assert_eq!(cube.position(), Vec3::ZERO);
        assert_eq!(cube.angular_velocity(), Vec3::new(0.5, -1.0, 1.2));
    }

    #[test]
    fn rotation_accumulates_without_wrapping() {
        let mut cube = cube_at(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        for _ in 0..100 {
            cube.update(0.1);
        }
        assert!((cube.rotation.x() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn unrotated_cube_scales_then_translates() {
        let cube = cube_at(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO);
        let m = cube.final_matrix(&Mat4::identity());
        assert_point(
            m.transform_point(Vec3::new(1.0, 1.0, 1.0)),
            [1.5, 0.5, 0.5, 1.0],
        );
    }

    #[test]
    fn rotations_apply_z_then_y_then_x() {
        let mut cube = cube_at(Vec3::ZERO, Vec3::ZERO);
        cube.rotation = Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0);
        // +X scaled to 0.5, Ry(90) sends it to -Z, Rx(90) then sends -Z to +Y
        assert_point(
            cube.model_matrix().transform_point(Vec3::X),
            [0.0, 0.5, 0.0, 1.0],
        );

        let reversed = Mat4::rotation_y(FRAC_PI_2)
            .multiply(&Mat4::rotation_x(FRAC_PI_2))
            .multiply(&Mat4::scaling(0.5, 0.5, 0.5));
        let other = reversed.transform_point(Vec3::X);
        assert!((other[1] - 0.5).abs() > 0.1, "{other:?}");
    }

    #[test]
    fn final_matrix_prepends_view_projection() {
        let mut cube = cube_at(Vec3::new(-2.0, 0.5, 3.0), Vec3::new(0.4, 0.9, -1.1));
        cube.update(0.7);
        let vp = Mat4::perspective(1.0, 1.6, 0.1, 100.0)
            .multiply(&Mat4::look_at(Vec3::new(0.0, 0.8, 6.0), Vec3::ZERO, Vec3::Y));
        let expected = vp.multiply(&cube.model_matrix());
        assert_eq!(cube.final_matrix(&vp), expected);
    }

    #[test]
    fn model_matrix_keeps_cube_centre_at_position() {
        let mut cube = cube_at(Vec3::new(3.0, -1.0, 4.5), Vec3::new(1.0, 1.0, 1.0));
        cube.update(1.3);
        assert_point(
            cube.model_matrix().transform_point(Vec3::ZERO),
            [3.0, -1.0, 4.5, 1.0],
        );
    }
}
