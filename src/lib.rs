//! Planet habitability model.
//!
//! Four independent variables (solar intensity, humidity, wind speed,
//! population) drive a fixed graph of eighteen clamped derived values. The
//! crate also carries the slider session, a software renderer for the planet
//! view, and PNG export of rendered frames.

pub mod export;
pub mod model;
pub mod noise;
pub mod render;
pub mod session;

pub use model::{
    evaluate, evaluate_json, evaluate_map, DependentVar, DependentVariables, IndependentVar,
    IndependentVariables, ModelError,
};
pub use noise::LayeredNoise;
pub use render::{render_frame, FrameParams, RenderConfig, RenderError};
pub use session::{Session, SessionError};
