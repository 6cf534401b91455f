//! Scene state and per-frame orchestration.
//!
//! [`Scene`] owns the camera and the live cubes. Each frame [`Scene::advance`] moves the camera,
//! builds one view-projection matrix, then spins every cube and hands its final matrix to a
//! [`TransformSink`].

pub mod camera;
pub mod cube;
pub mod spawner;

use crate::config::{AppConfig, ProjectionConfig};
use crate::keys::InputAction;
use crate::math::deg_to_rad;
use crate::math::mat::Mat4;
use camera::Camera;
use cube::{CubeId, SpawnedCube};
use spawner::CubeSpawner;
use std::collections::{HashSet, VecDeque};

/// Receives the final column-major matrix of each cube once per frame.
pub trait TransformSink {
    fn submit(&mut self, id: CubeId, matrix: &Mat4);
}

impl TransformSink for Vec<(CubeId, Mat4)> {
    fn submit(&mut self, id: CubeId, matrix: &Mat4) {
        self.push((id, *matrix));
    }
}

pub struct Scene {
    camera: Camera,
    projection: ProjectionConfig,
    spawner: CubeSpawner,
    cubes: VecDeque<SpawnedCube>,
    capacity: usize,
    next_id: u64,
}

impl Scene {
    pub fn new(config: &AppConfig, texture_count: usize) -> Self {
        let capacity = config.spawn.capacity.max(1);
        Self {
            camera: Camera::new(&config.camera),
            projection: config.projection,
            spawner: CubeSpawner::from_config(config.spawn, texture_count),
            cubes: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            next_id: 0,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Live cubes, oldest first.
    pub fn cubes(&self) -> impl ExactSizeIterator<Item = &SpawnedCube> {
        self.cubes.iter()
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adds a random cube. When the scene is full the oldest cube is removed and returned.
    pub fn spawn(&mut self) -> Option<SpawnedCube> {
        let evicted = if self.len() >= self.capacity() {
            self.cubes.pop_front()
        } else {
            None
        };
        if let Some(old) = &evicted {
            log::debug!("Evicted cube {:?} (capacity {})", old.id(), self.capacity());
        }

        let id = CubeId(self.next_id);
        self.next_id += 1;
        let cube = self.spawner.spawn(id);
        log::info!(
            "Spawned cube {} at ({:.2}, {:.2}, {:.2}) with texture {}",
            id.0,
            cube.position().x(),
            cube.position().y(),
            cube.position().z(),
            cube.texture_index()
        );
        self.cubes.push_back(cube);

        evicted
    }

    pub fn despawn_oldest(&mut self) -> Option<SpawnedCube> {
        let removed = self.cubes.pop_front();
        if let Some(cube) = &removed {
            log::info!("Despawned cube {}", cube.id().0);
        }
        removed
    }

    /// Removes every cube, returning how many were live.
    pub fn clear(&mut self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let count = self.len();
        self.cubes.clear();
        log::info!("Cleared {} cubes", count);
        count
    }

    /// Perspective matrix for a viewport of the given width/height ratio.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective(
            deg_to_rad(self.projection.fov_y_degrees),
            aspect,
            self.projection.near,
            self.projection.far,
        )
    }

    /// Runs one frame: camera first, then every cube against the same view-projection.
    pub fn advance(
        &mut self,
        active: &HashSet<InputAction>,
        dt: f32,
        aspect: f32,
        sink: &mut impl TransformSink,
    ) {
        self.camera.update(active, dt);
        let view_projection = self.projection(aspect).multiply(&self.camera.view_matrix());

        for cube in self.cubes.iter_mut() {
            cube.update(dt);
            sink.submit(cube.id(), &cube.final_matrix(&view_projection));
        }
    }
}
