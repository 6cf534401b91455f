//! 4x4 matrices.
//!
//! # Convention
//!
//! [`Mat4`] stores `[[f32; 4]; 4]` where the **outer index is the column** and
//! the inner index is the row, i.e. the flattened layout is column-major with
//! `index = column * 4 + row`. This is the layout WGSL expects for a
//! `mat4x4<f32>` uniform, so the bytes upload as-is.
//!
//! Points are column vectors. `a.multiply(&b)` (or `a * b`) is the matrix
//! product `a * b`: transforming a point by the result applies `b` first and
//! then `a`. Every builder starts from [`Mat4::identity`] and overrides only
//! the entries its transform touches.

use crate::math::vec::Vec3;
use std::ops::Mul;

/// Squared length below which `look_at` treats `up` as parallel to the view axis.
const PARALLEL_EPSILON: f32 = 1e-12;

#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn identity() -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective projection onto a `[0, 1]` depth range.
    ///
    /// The near plane maps to depth 0 and the far plane to depth 1. Callers
    /// must pass `0 < z_near < z_far`.
    pub fn perspective(
        field_of_view_y_in_radians: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) -> Mat4 {
        let f = 1.0 / (field_of_view_y_in_radians * 0.5).tan();
        let range_reciprocal = 1.0 / (z_near - z_far);

        let mut m = Mat4::identity();
        m.0[0][0] = f / aspect;
        m.0[1][1] = f;
        m.0[2][2] = z_far * range_reciprocal;
        m.0[2][3] = -1.0;
        m.0[3][2] = z_far * z_near * range_reciprocal;
        m.0[3][3] = 0.0;
        m
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        let mut m = Mat4::identity();
        m.0[3][0] = tx;
        m.0[3][1] = ty;
        m.0[3][2] = tz;
        m
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Mat4 {
        let mut m = Mat4::identity();
        m.0[0][0] = sx;
        m.0[1][1] = sy;
        m.0[2][2] = sz;
        m
    }

    /// Counter-clockwise rotation about +X, looking from +X toward the origin.
    pub fn rotation_x(angle_in_radians: f32) -> Mat4 {
        let (s, c) = angle_in_radians.sin_cos();
        let mut m = Mat4::identity();
        m.0[1][1] = c;
        m.0[1][2] = s;
        m.0[2][1] = -s;
        m.0[2][2] = c;
        m
    }

    /// Counter-clockwise rotation about +Y, looking from +Y toward the origin.
    pub fn rotation_y(angle_in_radians: f32) -> Mat4 {
        let (s, c) = angle_in_radians.sin_cos();
        let mut m = Mat4::identity();
        m.0[0][0] = c;
        m.0[0][2] = -s;
        m.0[2][0] = s;
        m.0[2][2] = c;
        m
    }

    /// Counter-clockwise rotation about +Z, looking from +Z toward the origin.
    pub fn rotation_z(angle_in_radians: f32) -> Mat4 {
        let (s, c) = angle_in_radians.sin_cos();
        let mut m = Mat4::identity();
        m.0[0][0] = c;
        m.0[0][1] = s;
        m.0[1][0] = -s;
        m.0[1][1] = c;
        m
    }

    /// Right-handed view matrix. The camera looks down its local -Z axis.
    ///
    /// The rotation rows are the camera basis `x, y, z` and the translation
    /// column is `-dot(axis, eye)` for each axis, so `eye` maps to the origin.
    ///
    /// If `up` is parallel to `eye - target` the cross product that builds the
    /// x axis vanishes. In that case a substitute up vector is used (world Z,
    /// or world X when the view axis is itself along Z) so the basis stays
    /// orthonormal.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let z_axis = eye.subtract(&target).normalize();
        let mut side = up.cross(&z_axis);
        if side.dot(&side) < PARALLEL_EPSILON {
            let fallback_up = if z_axis.z().abs() < 0.9 {
                Vec3::Z
            } else {
                Vec3::X
            };
            side = fallback_up.cross(&z_axis);
        }
        let x_axis = side.normalize();
        let y_axis = z_axis.cross(&x_axis);

        let mut m = Mat4::identity();
        for column in 0..3 {
            m.0[column][0] = x_axis.as_array()[column];
            m.0[column][1] = y_axis.as_array()[column];
            m.0[column][2] = z_axis.as_array()[column];
        }
        m.0[3][0] = -x_axis.dot(&eye);
        m.0[3][1] = -y_axis.dot(&eye);
        m.0[3][2] = -z_axis.dot(&eye);
        m
    }

    /// Matrix product `self * b`: the result applies `b` first, then `self`.
    pub fn multiply(&self, b: &Mat4) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for (column, out_column) in result.iter_mut().enumerate() {
            for (row, cell) in out_column.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[k][row] * b.0[column][k]).sum();
            }
        }
        Mat4(result)
    }

    pub fn transpose(&self) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for (column, out_column) in result.iter_mut().enumerate() {
            for (row, cell) in out_column.iter_mut().enumerate() {
                *cell = self.0[row][column];
            }
        }
        Mat4(result)
    }

    /// Multiplies the column vector `v` by this matrix.
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (row, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|k| self.0[k][row] * v[k]).sum();
        }
        out
    }

    /// Transforms the point `p` (w = 1) without the perspective divide.
    pub fn transform_point(&self, p: Vec3) -> [f32; 4] {
        self.transform([p.x(), p.y(), p.z(), 1.0])
    }

    /// The 16 components in column-major order, as uploaded to the GPU.
    pub fn to_cols_array(&self) -> [f32; 16] {
        bytemuck::cast(self.0)
    }

    pub fn abs_diff_eq(&self, other: &Mat4, epsilon: f32) -> bool {
        self.to_cols_array()
            .iter()
            .zip(other.to_cols_array().iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}

impl From<[[f32; 4]; 4]> for Mat4 {
    fn from(matrix: [[f32; 4]; 4]) -> Self {
        Mat4(matrix)
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(matrix: Mat4) -> Self {
        matrix.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    const EPS: f32 = 1e-5;

    fn sample() -> Mat4 {
        Mat4([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ])
    }

    fn assert_point(actual: [f32; 4], expected: [f32; 4]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < EPS, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn identity_is_neutral_for_multiply() {
        let m = sample();
        assert_eq!(Mat4::identity().multiply(&m), m);
        assert_eq!(m.multiply(&Mat4::identity()), m);
    }

    #[test]
    fn storage_is_column_major() {
        let cols = Mat4::translation(7.0, 8.0, 9.0).to_cols_array();
        assert_eq!(&cols[12..15], &[7.0, 8.0, 9.0]);
        assert_eq!(cols[15], 1.0);

        let p = Mat4::perspective(FRAC_PI_3, 1.0, 0.1, 100.0).to_cols_array();
        assert_eq!(p[11], -1.0);
        assert_eq!(p[15], 0.0);
    }

    #[test]
    fn translation_moves_origin() {
        let m = Mat4::translation(1.5, -2.0, 3.25).multiply(&Mat4::scaling(1.0, 1.0, 1.0));
        assert_eq!(m.transform([0.0, 0.0, 0.0, 1.0]), [1.5, -2.0, 3.25, 1.0]);
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let s = Mat4::scaling(2.0, 2.0, 2.0);
        let p = Vec3::new(1.0, 1.0, 1.0);

        // scale then translate
        assert_point((t * s).transform_point(p), [3.0, 2.0, 2.0, 1.0]);
        // translate then scale
        assert_point((s * t).transform_point(p), [4.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn builders_leave_untouched_entries_at_identity() {
        let id = Mat4::identity().to_cols_array();
        let cases: [(Mat4, &[usize]); 5] = [
            (Mat4::translation(2.0, 3.0, 4.0), &[12, 13, 14]),
            (Mat4::scaling(2.0, 3.0, 4.0), &[0, 5, 10]),
            (Mat4::rotation_x(0.3), &[5, 6, 9, 10]),
            (Mat4::rotation_y(0.3), &[0, 2, 8, 10]),
            (Mat4::rotation_z(0.3), &[0, 1, 4, 5]),
        ];
        for (m, touched) in cases {
            let cols = m.to_cols_array();
            for i in (0..16).filter(|i| !touched.contains(i)) {
                assert_eq!(cols[i], id[i], "entry {i} of {m:?}");
            }
        }
    }

    #[test]
    fn rotations_are_orthonormal() {
        for theta in [0.0, 0.3, FRAC_PI_2, 2.0, -1.1, 7.5] {
            for r in [
                Mat4::rotation_x(theta),
                Mat4::rotation_y(theta),
                Mat4::rotation_z(theta),
            ] {
                assert!(r.multiply(&r.transpose()).abs_diff_eq(&Mat4::identity(), EPS));
            }
        }
    }

    #[test]
    fn rotations_are_counter_clockwise() {
        assert_point(
            Mat4::rotation_x(FRAC_PI_2).transform_point(Vec3::Y),
            [0.0, 0.0, 1.0, 1.0],
        );
        assert_point(
            Mat4::rotation_y(FRAC_PI_2).transform_point(Vec3::Z),
            [1.0, 0.0, 0.0, 1.0],
        );
        assert_point(
            Mat4::rotation_z(FRAC_PI_2).transform_point(Vec3::X),
            [0.0, 1.0, 0.0, 1.0],
        );
    }

    #[test]
    fn rotation_order_is_not_commutative() {
        let xy = Mat4::rotation_x(0.7) * Mat4::rotation_y(0.4);
        let yx = Mat4::rotation_y(0.4) * Mat4::rotation_x(0.7);
        assert!(!xy.abs_diff_eq(&yx, 1e-3));
    }

    #[test]
    fn perspective_maps_near_plane_to_zero_depth() {
        let proj = Mat4::perspective(60.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let clip = proj.transform_point(Vec3::new(0.0, 0.0, -0.1));
        assert!((clip[3] - 0.1).abs() < EPS);
        assert!((clip[2] / clip[3]).abs() < EPS);
    }

    #[test]
    fn perspective_maps_far_plane_to_unit_depth() {
        let proj = Mat4::perspective(60.0_f32.to_radians(), 1.5, 0.1, 100.0);
        let clip = proj.transform_point(Vec3::new(0.0, 0.0, -100.0));
        assert!((clip[2] / clip[3] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn perspective_divides_x_by_aspect() {
        let proj = Mat4::perspective(FRAC_PI_2, 2.0, 0.1, 100.0);
        let clip = proj.transform_point(Vec3::new(1.0, 1.0, -1.0));
        assert!((clip[0] / clip[3] - 0.5).abs() < EPS);
        assert!((clip[1] / clip[3] - 1.0).abs() < EPS);
    }

    #[test]
    fn look_at_maps_eye_to_origin() {
        let eyes = [
            Vec3::new(0.0, 0.8, 6.0),
            Vec3::new(-3.0, 2.0, 1.5),
            Vec3::new(10.0, -4.0, -7.0),
        ];
        let forward = Vec3::new(0.3, -0.2, -0.9).normalize();
        for eye in eyes {
            let view = Mat4::look_at(eye, eye + forward, Vec3::Y);
            assert_point(view.transform_point(eye), [0.0, 0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn look_at_places_target_on_negative_z() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let view = Mat4::look_at(eye, Vec3::new(1.0, 2.0, -2.0), Vec3::Y);
        assert_point(view.transform_point(Vec3::new(1.0, 2.0, -2.0)), [0.0, 0.0, -5.0, 1.0]);
        assert!(view.abs_diff_eq(&Mat4::translation(-1.0, -2.0, -3.0), EPS));
    }

    #[test]
    fn look_at_rows_match_basis_vectors() {
        let eye = Vec3::new(0.0, 0.0, 0.0);
        let view = Mat4::look_at(eye, Vec3::new(1.0, 0.0, 0.0), Vec3::Y);
        // looking down +X: camera z = -X, camera x = cross(Y, -X) = +Z
        let cols = view.to_cols_array();
        assert_point([cols[0], cols[4], cols[8], 0.0], [0.0, 0.0, 1.0, 0.0]);
        assert_point([cols[2], cols[6], cols[10], 0.0], [-1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn look_at_survives_parallel_up() {
        let eye = Vec3::new(0.0, 5.0, 0.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::Y);
        assert!(view.to_cols_array().iter().all(|c| c.is_finite()));

        // the rotation block stays orthonormal
        let mut rotation = view;
        rotation.0[3] = [0.0, 0.0, 0.0, 1.0];
        assert!(
            rotation
                .multiply(&rotation.transpose())
                .abs_diff_eq(&Mat4::identity(), EPS)
        );
        assert_point(view.transform_point(eye), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = sample();
        assert_eq!(m.transpose().0[0], [1.0, 5.0, 9.0, 13.0]);
        assert_eq!(m.transpose().transpose(), m);
    }
}
