//! Math utilities and types for 3D graphics.
//!
//! This module provides the vector and matrix types used by the camera and
//! cube transforms. Both are plain `f32` value types that can be cast to
//! bytes for GPU uniform buffers.
//!
//! # Module Organization
//!
//! - [`vec`] module contains all vector operations
//! - [`mat`] module contains all matrix operations and documents the
//!   storage/multiplication convention every builder follows
//! - Angle conversion is provided at root level

pub mod mat;
pub mod vec;

/// Converts degrees to radians.
///
/// No wrapping is applied: `540.0` converts to `3 * PI`, not `PI`. Callers that need a bounded
/// angle, such as the projection's field of view, validate it before converting.
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}
