//! Application state, created once the window exists.

use crate::config::AppConfig;
use crate::error::RenderError;
use crate::keys::{InputAction, KeyState};
use crate::renderer::wgpu_lib::WgpuRenderer;
use crate::scene::Scene;
use crate::time::FrameClock;

pub struct AppState {
    pub renderer: WgpuRenderer,
    pub scene: Scene,
    pub key_state: KeyState,
    pub clock: FrameClock,
}

impl AppState {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        config: &AppConfig,
    ) -> Result<Self, RenderError> {
        let renderer =
            WgpuRenderer::new(instance, surface, width, height, &config.textures.image_path)
                .await?;
        let scene = Scene::new(config, renderer.cube_renderer.texture_count());

        Ok(Self {
            renderer,
            scene,
            key_state: KeyState::new(),
            clock: FrameClock::new(),
        })
    }

    /// Applies a one-shot scene action. GPU slots of removed cubes are released on the next frame.
    pub fn trigger(&mut self, action: InputAction) {
        match action {
            InputAction::SpawnCube => {
                self.scene.spawn();
            }
            InputAction::DespawnCube => {
                self.scene.despawn_oldest();
            }
            InputAction::ClearCubes => {
                self.scene.clear();
            }
            _ => {}
        }
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }
}
