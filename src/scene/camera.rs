//! First-person fly camera.
//!
//! This module defines the [`Camera`], which tracks position and yaw/pitch orientation, advances
//! them from the set of held [`InputAction`]s, and derives the view matrix.
//!
//! # Coordinate System
//!
//! Right-handed, Y up. Angles are in radians:
//! - **Yaw**: rotation about world up. `0` looks toward +X, `-PI/2` toward -Z.
//! - **Pitch**: elevation above the horizon, clamped to `±(PI/2 - 0.01)` so the forward vector
//!   never lines up with world up.

use crate::config::CameraConfig;
use crate::keys::InputAction;
use crate::math::mat::Mat4;
use crate::math::vec::Vec3;
use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;

/// World up axis shared by the view matrix and vertical movement.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Margin kept between pitch and straight up/down.
pub const PITCH_EPSILON: f32 = 0.01;

/// Largest allowed absolute pitch.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - PITCH_EPSILON;

#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space eye position.
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    move_speed: f32,
    turn_speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl Camera {
    /// Creates a camera at the configured start pose. The start pitch is clamped.
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::from(config.position),
            yaw: config.yaw,
            pitch: config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            move_speed: config.move_speed,
            turn_speed: config.turn_speed,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit view direction from yaw and pitch.
    pub fn forward(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            self.yaw.cos() * cos_pitch,
            sin_pitch,
            self.yaw.sin() * cos_pitch,
        )
        .normalize()
    }

    /// Unit vector to the right of the view direction, parallel to the ground.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(&WORLD_UP).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.forward(), WORLD_UP)
    }

    /// Advances the camera by `dt` seconds with the given actions held.
    ///
    /// Orientation is updated and clamped first, then movement uses the new basis. Opposing
    /// inputs cancel; simultaneous directions add up without renormalising, so diagonal motion
    /// is faster than straight motion. Actions that are not camera controls are ignored.
    pub fn update(&mut self, active: &HashSet<InputAction>, dt: f32) {
        let turn = self.turn_speed * dt;
        if active.contains(&InputAction::TurnLeft) {
            self.yaw -= turn;
        }
        if active.contains(&InputAction::TurnRight) {
            self.yaw += turn;
        }
        if active.contains(&InputAction::LookUp) {
            self.pitch += turn;
        }
        if active.contains(&InputAction::LookDown) {
            self.pitch -= turn;
        }
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let forward = self.forward();
        let right = self.right();
        let step = self.move_speed * dt;

        // Fixed order so the float sum does not depend on set iteration order.
        let moves = [
            (InputAction::MoveForward, forward),
            (InputAction::MoveBackward, -forward),
            (InputAction::StrafeLeft, -right),
            (InputAction::StrafeRight, right),
            (InputAction::MoveDown, -WORLD_UP),
            (InputAction::MoveUp, WORLD_UP),
        ];
        for (action, direction) in moves {
            if active.contains(&action) {
                self.position = self.position + direction.scale(step);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn held(actions: &[InputAction]) -> HashSet<InputAction> {
        actions.iter().copied().collect()
    }

    fn assert_vec(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < EPS,
            "{actual:?} != {expected:?}"
        );
    }

    fn still_camera() -> Camera {
        Camera::new(&CameraConfig {
            position: [0.0, 0.0, 0.0],
            yaw: -FRAC_PI_2,
            pitch: 0.0,
            move_speed: 2.0,
            turn_speed: 1.0,
        })
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        assert_vec(camera.position, Vec3::new(0.0, 0.8, 6.0));
        assert_vec(camera.forward(), Vec3::new(0.0, 0.0, -1.0));
        assert_vec(camera.right(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn forward_is_unit_length() {
        let mut camera = still_camera();
        for (yaw_steps, pitch_steps) in [(3, 1), (17, -12), (40, 25)] {
            camera.update(
                &held(&[InputAction::TurnRight]),
                0.01 * yaw_steps as f32,
            );
            camera.pitch = (0.05 * pitch_steps as f32).clamp(-PITCH_LIMIT, PITCH_LIMIT);
            assert!((camera.forward().length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn pitch_stays_clamped_when_looking_up_forever() {
        let mut camera = still_camera();
        for _ in 0..10_000 {
            camera.update(&held(&[InputAction::LookUp]), 0.033);
            assert!(camera.pitch() <= PITCH_LIMIT);
        }
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        assert!(camera.view_matrix().to_cols_array().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn pitch_stays_clamped_when_looking_down_forever() {
        let mut camera = still_camera();
        for _ in 0..10_000 {
            camera.update(&held(&[InputAction::LookDown, InputAction::TurnLeft]), 0.033);
            assert!(camera.pitch() >= -PITCH_LIMIT);
        }
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn start_pitch_is_clamped() {
        let camera = Camera::new(&CameraConfig {
            pitch: 3.0,
            ..CameraConfig::default()
        });
        assert_eq!(camera.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn turning_changes_yaw_by_turn_speed() {
        let mut camera = still_camera();
        camera.update(&held(&[InputAction::TurnRight]), 0.5);
        assert!((camera.yaw() - (-FRAC_PI_2 + 0.5)).abs() < EPS);
        camera.update(&held(&[InputAction::TurnLeft, InputAction::TurnRight]), 0.5);
        assert!((camera.yaw() - (-FRAC_PI_2 + 0.5)).abs() < EPS);
    }

    #[test]
    fn moving_follows_forward_right_and_up() {
        let mut camera = still_camera();
        camera.update(&held(&[InputAction::MoveForward]), 0.5);
        assert_vec(camera.position, Vec3::new(0.0, 0.0, -1.0));

        camera.update(&held(&[InputAction::StrafeRight]), 0.5);
        assert_vec(camera.position, Vec3::new(1.0, 0.0, -1.0));

        camera.update(&held(&[InputAction::MoveUp]), 0.25);
        assert_vec(camera.position, Vec3::new(1.0, 0.5, -1.0));

        camera.update(
            &held(&[InputAction::MoveBackward, InputAction::StrafeLeft, InputAction::MoveDown]),
            0.25,
        );
        assert_vec(camera.position, Vec3::new(0.5, 0.0, -0.5));
    }

    #[test]
    fn diagonal_movement_is_not_normalised() {
        let mut camera = still_camera();
        camera.update(
            &held(&[InputAction::MoveForward, InputAction::StrafeRight]),
            1.0,
        );
        let travelled = camera.position.length();
        assert!((travelled - 2.0 * 2.0_f32.sqrt()).abs() < EPS);
    }

    #[test]
    fn movement_is_independent_of_set_order() {
        let moves = [
            InputAction::MoveUp,
            InputAction::StrafeLeft,
            InputAction::MoveForward,
            InputAction::MoveDown,
            InputAction::StrafeRight,
            InputAction::MoveBackward,
        ];
        let mut start = still_camera();
        start.update(&held(&[InputAction::TurnRight, InputAction::LookUp]), 0.37);

        let mut expected = start.clone();
        let (forward, right, step) = (start.forward(), start.right(), start.move_speed * 0.1);
        for direction in [forward, -forward, -right, right, -WORLD_UP, WORLD_UP] {
            expected.position = expected.position + direction.scale(step);
        }

        // Each set gets fresh hasher keys, and the insertion order rotates.
        for shift in 0..moves.len() * 4 {
            let mut order = moves;
            order.rotate_left(shift % moves.len());
            let mut camera = start.clone();
            camera.update(&held(&order), 0.1);
            assert_eq!(camera.position, expected.position);
        }
    }

    #[test]
    fn vertical_movement_ignores_pitch() {
        let mut camera = still_camera();
        camera.pitch = 1.0;
        camera.update(&held(&[InputAction::MoveUp]), 1.0);
        assert_vec(camera.position, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn non_camera_actions_are_ignored() {
        let mut camera = still_camera();
        camera.update(
            &held(&[InputAction::SpawnCube, InputAction::ClearCubes, InputAction::Quit]),
            1.0,
        );
        assert_vec(camera.position, Vec3::ZERO);
        assert_eq!(camera.yaw(), -FRAC_PI_2);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let mut camera = Camera::default();
        camera.update(&held(&[InputAction::TurnLeft, InputAction::LookUp]), 0.3);
        let eye = camera.view_matrix().transform_point(camera.position);
        for c in &eye[..3] {
            assert!(c.abs() < EPS, "{eye:?}");
        }
        let ahead = camera
            .view_matrix()
            .transform_point(camera.position + camera.forward());
        assert!((ahead[2] + 1.0).abs() < EPS);
    }
}
