//! Per-frame update for [`App`].

use super::event_handler::App;
use crate::error::{RenderError, SurfaceErrorAction};
use winit::event_loop::ActiveEventLoop;

impl App {
    /// Ticks the clock, advances the scene and presents a frame.
    ///
    /// Minimised windows are skipped. Lost or outdated surfaces are reconfigured and the frame is
    /// dropped; running out of memory stops the event loop.
    pub fn handle_redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.is_minimized().unwrap_or(false) {
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let frame = state.clock.tick();
        let result = state
            .renderer
            .render(&mut state.scene, &state.key_state.pressed_keys, frame.dt);

        let error = match result {
            Ok(()) => return,
            Err(RenderError::Surface(surface_error)) => {
                match SurfaceErrorAction::for_error(&surface_error) {
                    SurfaceErrorAction::Reconfigured => {
                        log::debug!("Surface {:?}; reconfiguring", surface_error);
                        state.renderer.reconfigure();
                        return;
                    }
                    SurfaceErrorAction::SkipFrame => {
                        log::warn!("Skipping frame {}: {}", frame.frame_index, surface_error);
                        return;
                    }
                    SurfaceErrorAction::Fatal => RenderError::Surface(surface_error),
                }
            }
            Err(other) => other,
        };
        self.fail(event_loop, error.into());
    }
}
