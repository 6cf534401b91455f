//! Event handler module.
//!
//! Contains the [`App`] struct and its winit event handling.

use crate::app::app_state::AppState;
use crate::config::AppConfig;
use crate::error::RenderError;
use crate::keys::{InputAction, winit_key_to_action};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

/// Owns the WGPU instance and, once resumed, the window and [`AppState`].
///
/// # Lifecycle
/// 1. Created with [`App::new`], which only builds the WGPU instance.
/// 2. `resumed` creates the window and blocks on [`App::set_window`] to set up the GPU.
/// 3. Window events drive input and redraws until the window closes or Escape is pressed.
pub struct App {
    pub instance: wgpu::Instance,
    pub config: AppConfig,
    pub state: Option<AppState>,
    pub window: Option<Arc<Window>>,
    /// Error that stopped the event loop, reported by `main`.
    pub fatal_error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            config,
            state: None,
            window: None,
            fatal_error: None,
        }
    }

    /// Creates the surface and all GPU state for `window`.
    pub async fn set_window(&mut self, window: Window) -> anyhow::Result<()> {
        let window = Arc::new(window);
        let size = window.inner_size();
        let (width, height) = if size.width > 0 && size.height > 0 {
            (size.width, size.height)
        } else {
            (self.config.window.width, self.config.window.height)
        };

        let surface = self
            .instance
            .create_surface(window.clone())
            .map_err(RenderError::from)?;
        let state = AppState::new(&self.instance, surface, width, height, &self.config).await?;

        self.window.get_or_insert(window);
        self.state.get_or_insert(state);
        Ok(())
    }

    pub fn handle_resized(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            match &mut self.state {
                Some(state) => state.resize_surface(width, height),
                None => log::warn!("Cannot resize surface without state initialized"),
            }
        }
    }

    /// Logs `error` and stops the event loop.
    pub(crate) fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.fatal_error = Some(error);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let Some(action) = winit_key_to_action(&event.logical_key) else {
            return;
        };
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event.state {
            ElementState::Pressed if action.is_one_shot() => {
                if event.repeat {
                    return;
                }
                if action == InputAction::Quit {
                    log::info!("Escape pressed; stopping");
                    event_loop.exit();
                } else {
                    state.trigger(action);
                }
            }
            ElementState::Pressed => state.key_state.press_key(action),
            ElementState::Released => state.key_state.release_key(action),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            if let Some(state) = self.state.as_mut() {
                state.clock.reset();
            }
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                self.fail(event_loop, err.into());
                return;
            }
        };

        if let Err(err) = pollster::block_on(self.set_window(window)) {
            self.fail(event_loop, err);
            return;
        }
        log::info!("Window ready; press P to spawn a cube");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("The close button was pressed; stopping");
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                self.handle_resized(new_size.width, new_size.height);
            }

            WindowEvent::Focused(false) => {
                if let Some(state) = self.state.as_mut() {
                    state.key_state.clear();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, &event);
            }

            WindowEvent::RedrawRequested => {
                self.handle_redraw(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
