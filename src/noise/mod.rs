//! Noise generation for planet terrain and cloud cover.
//!
//! Uses simdnoise for simplex noise.

mod layered;

pub use layered::{LayeredNoise, NoiseLayer};
