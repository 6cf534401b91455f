//! Random cube placement.

use crate::config::SpawnConfig;
use crate::math::vec::Vec3;
use crate::scene::cube::{CubeId, SpawnedCube};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws cube positions, spin rates and textures from a seedable RNG.
///
/// Two spawners built with the same seed and config produce identical cubes in the same order.
#[derive(Debug, Clone)]
pub struct CubeSpawner {
    rng: StdRng,
    config: SpawnConfig,
    texture_count: usize,
}

impl CubeSpawner {
    pub fn from_seed(seed: u64, config: SpawnConfig, texture_count: usize) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), config, texture_count)
    }

    pub fn from_entropy(config: SpawnConfig, texture_count: usize) -> Self {
        Self::with_rng(StdRng::from_entropy(), config, texture_count)
    }

    /// Seeds from `config.seed` when set, otherwise from the OS.
    pub fn from_config(config: SpawnConfig, texture_count: usize) -> Self {
        match config.seed {
            Some(seed) => Self::from_seed(seed, config, texture_count),
            None => Self::from_entropy(config, texture_count),
        }
    }

    fn with_rng(rng: StdRng, config: SpawnConfig, texture_count: usize) -> Self {
        Self {
            rng,
            config,
            texture_count: texture_count.max(1),
        }
    }

    pub fn spawn(&mut self, id: CubeId) -> SpawnedCube {
        let [min_x, min_y, min_z] = self.config.min;
        let [max_x, max_y, max_z] = self.config.max;
        let position = Vec3::new(
            self.range(min_x, max_x),
            self.range(min_y, max_y),
            self.range(min_z, max_z),
        );
        let angular_velocity = Vec3::new(
            self.signed_speed(),
            self.signed_speed(),
            self.signed_speed(),
        );
        let texture_index = self.rng.gen_range(0..self.texture_count);

        SpawnedCube::new(
            id,
            position,
            angular_velocity,
            texture_index,
            self.config.scale,
        )
    }

    /// Uniform in `[min, max]`; tolerates swapped or equal bounds.
    ///
    /// Non-finite bounds cannot be sampled and yield `0.0` (or the finite bound, if there is one).
    fn range(&mut self, a: f32, b: f32) -> f32 {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if !(low.is_finite() && high.is_finite()) {
            return [low, high].into_iter().find(|v| v.is_finite()).unwrap_or(0.0);
        }
        if low == high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn signed_speed(&mut self) -> f32 {
        let sign = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        sign * self.range(self.config.angular_speed_min, self.config.angular_speed_max)
    }
}
