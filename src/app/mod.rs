//! Application shell.
//!
//! - [`app_state`]: [`AppState`], everything that exists once a window does
//! - [`event_handler`]: [`App`] and winit event routing
//! - [`update`]: the per-frame update and render
//!
//! Everything runs on the event loop thread. Held keys are sampled once per frame; one-shot keys
//! (spawn, despawn, clear, quit) act when pressed.

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
