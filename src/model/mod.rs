//! The habitability equation engine.
//!
//! Four independent variables feed a fixed dependency graph of eighteen
//! derived values. Each step saturates into a documented range before any
//! later step reads it, so evaluation is total and pure.

pub mod bounds;
pub mod equations;
mod engine;
mod error;
mod inputs;
mod outputs;

pub use bounds::Bounds;
pub use engine::{evaluate, evaluate_json, evaluate_map};
pub use error::ModelError;
pub use inputs::{IndependentVar, IndependentVariables};
pub use outputs::{validate_order, DependentVar, DependentVariables};
