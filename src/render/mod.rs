//! Software renderer for the planet view.
//!
//! Turns one model evaluation into an RGB frame: star field, atmosphere
//! glow, noise-colored terrain, drifting clouds and solar shading.

mod frame;
pub mod palette;

pub use frame::{render_frame, FrameParams, RenderConfig, RenderError};
