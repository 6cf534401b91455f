//! Application configuration (window, camera, projection, spawning, textures).
//!
//! Loaded from `cubefield.ron` at startup. Every field has a default, so a partial file (or no
//! file at all) is valid.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the current directory when no path is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "cubefield.ron";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub spawn: SpawnConfig,
    pub textures: TextureConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial width in physical pixels.
    pub width: u32,
    /// Initial height in physical pixels.
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "cubefield".to_string(),
        }
    }
}

/// Immutable camera tuning and start pose.
///
/// Runtime state (position, yaw, pitch) lives in [`Camera`](crate::scene::camera::Camera);
/// this struct is only read at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Radians about world up. `-PI/2` looks toward -Z.
    pub yaw: f32,
    /// Radians; clamped on use.
    pub pitch: f32,
    /// World units per second.
    pub move_speed: f32,
    /// Radians per second.
    pub turn_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.8, 6.0],
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            move_speed: 3.5,
            turn_speed: 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view. Must lie strictly between 0 and 180 degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Inclusive lower corner of the spawn region.
    pub min: [f32; 3],
    /// Inclusive upper corner of the spawn region.
    pub max: [f32; 3],
    /// Smallest per-axis spin magnitude, radians per second.
    pub angular_speed_min: f32,
    /// Largest per-axis spin magnitude, radians per second.
    pub angular_speed_max: f32,
    /// Uniform scale applied to the unit cube mesh.
    pub scale: f32,
    /// Maximum live cubes; spawning beyond it evicts the oldest.
    pub capacity: usize,
    /// Fixed RNG seed for reproducible scenes. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min: [-5.0, -1.0, -5.0],
            max: [5.0, 1.0, 5.0],
            angular_speed_min: 0.4,
            angular_speed_max: 1.2,
            scale: 0.5,
            capacity: 256,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Image used for the second texture slot. Missing files fall back to a procedural pattern.
    pub image_path: PathBuf,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("assets/cube.jpg"),
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn check_finite(field: &'static str, values: &[f32]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("camera.position", &self.position)?;
        check_finite("camera.yaw", &[self.yaw])?;
        check_finite("camera.pitch", &[self.pitch])?;
        check_finite("camera.move_speed", &[self.move_speed])?;
        check_finite("camera.turn_speed", &[self.turn_speed])
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("projection", &[self.fov_y_degrees, self.near, self.far])?;
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(invalid("projection.fov_y_degrees", "must be in (0, 180)"));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(invalid("projection.near", "must satisfy 0 < near < far"));
        }
        Ok(())
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("spawn.min", &self.min)?;
        check_finite("spawn.max", &self.max)?;
        if self.min.iter().zip(self.max.iter()).any(|(low, high)| low > high) {
            return Err(invalid("spawn.min", "must not exceed spawn.max"));
        }
        check_finite(
            "spawn.angular_speed",
            &[self.angular_speed_min, self.angular_speed_max],
        )?;
        if !(0.0 <= self.angular_speed_min && self.angular_speed_min <= self.angular_speed_max) {
            return Err(invalid(
                "spawn.angular_speed_min",
                "must satisfy 0 <= angular_speed_min <= angular_speed_max",
            ));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(invalid("spawn.scale", "must be finite and positive"));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Parses and validates a configuration from RON text.
    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the camera, projection or spawner cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        self.projection.validate()?;
        self.spawn.validate()
    }

    /// Reads and parses the configuration file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&data)
    }

    /// Loads the configuration, falling back to defaults if the file is missing, malformed or
    /// holds out-of-range values.
    ///
    /// `path` overrides the default `cubefield.ron` in the current directory.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }
}

fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_CONFIG_FILE)
}
