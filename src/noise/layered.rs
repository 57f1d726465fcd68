//! Weighted sums of 2D simplex noise layers, sampled in screen space.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use simdnoise::NoiseBuilder;

/// Peak magnitude of one octave of simdnoise 2D simplex.
///
/// simdnoise does not rescale its simplex output; dividing by this brings a
/// single layer into about [-1, 1].
const SIMPLEX_2D_PEAK: f32 = 0.02211;

/// One noise layer: coordinates are divided by `scale`, the sample is multiplied by `weight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    /// Feature size in pixels.
    pub scale: f32,
    /// Contribution of this layer to the sum.
    pub weight: f32,
}

impl NoiseLayer {
    pub const fn new(scale: f32, weight: f32) -> Self {
        Self { scale, weight }
    }
}

/// Configuration for layered noise. Each layer is unit-range; the sum is not normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredNoise {
    pub layers: Vec<NoiseLayer>,
    /// Random seed shared by all layers.
    pub seed: i32,
}

impl Default for LayeredNoise {
    fn default() -> Self {
        Self::terrain(42)
    }
}

impl LayeredNoise {
    /// Terrain: coarse continents plus two finer detail layers.
    pub fn terrain(seed: i32) -> Self {
        Self {
            layers: vec![
                NoiseLayer::new(50.0, 1.0),
                NoiseLayer::new(30.0, 0.5),
                NoiseLayer::new(10.0, 0.25),
            ],
            seed,
        }
    }

    /// Clouds: a single broad layer.
    pub fn clouds(seed: i32) -> Self {
        Self {
            layers: vec![NoiseLayer::new(80.0, 1.0)],
            seed,
        }
    }

    /// Samples the layered noise at a pixel position.
    pub fn sample(&self, pos: Vec2) -> f32 {
        self.sample_row(pos, 1.0, 1)[0]
    }

    /// Samples `count` positions along a row: `start`, `start + (step, 0)`, ...
    ///
    /// One simdnoise call per layer covers the whole row.
    pub fn sample_row(&self, start: Vec2, step: f32, count: usize) -> Vec<f32> {
        let mut out = vec![0.0; count];
        if count == 0 || step <= 0.0 {
            return out;
        }

        for layer in self.layers.iter().filter(|l| l.scale > 0.0) {
            // simdnoise samples (offset + i) * freq, so work in step units.
            let row = simplex_row(start / step, count, step / layer.scale, self.seed);
            for (acc, v) in out.iter_mut().zip(row) {
                *acc += layer.weight * v;
            }
        }
        out
    }
}

/// Single-octave simplex noise at `count` unit-spaced points from `offset`, scaled by `freq`.
fn simplex_row(offset: Vec2, count: usize, freq: f32, seed: i32) -> Vec<f32> {
    let (values, _, _) = NoiseBuilder::fbm_2d_offset(offset.x, count, offset.y, 1)
        .with_seed(seed)
        .with_freq(freq)
        .with_octaves(1)
        .generate();
    values.into_iter().map(|v| v / SIMPLEX_2D_PEAK).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_grid(noise: &LayeredNoise) -> Vec<f32> {
        (0..600)
            .step_by(10)
            .flat_map(|y| noise.sample_row(Vec2::new(0.0, y as f32), 10.0, 120))
            .collect()
    }

    #[test]
    fn test_terrain_layers() {
        let noise = LayeredNoise::terrain(7);
        assert_eq!(noise.layers.len(), 3);
        assert_eq!(noise.seed, 7);
    }

    #[test]
    fn test_noise_reproducibility() {
        let noise = LayeredNoise::terrain(12345);
        let pos = Vec2::new(613.3, 287.9);

        assert_eq!(noise.sample(pos), noise.sample(pos));
    }

    #[test]
    fn test_different_seeds_produce_different_results() {
        let pos = Vec2::new(613.3, 287.9);
        let a = LayeredNoise::terrain(1).sample(pos);
        let b = LayeredNoise::terrain(2).sample(pos);
        assert_ne!(a, b, "Different seeds should produce different results");
    }

    #[test]
    fn test_single_layer_is_unit_range() {
        let samples = screen_grid(&LayeredNoise::clouds(42));
        let min = samples.iter().copied().fold(f32::MAX, f32::min);
        let max = samples.iter().copied().fold(f32::MIN, f32::max);

        assert!(samples.iter().all(|v| v.is_finite()));
        assert!(min >= -1.01 && max <= 1.01, "range [{min}, {max}]");
        assert!(min < -0.8 && max > 0.8, "range [{min}, {max}] is too narrow");
    }

    #[test]
    fn test_samples_cross_render_thresholds() {
        let clouds = screen_grid(&LayeredNoise::clouds(42));
        let above = clouds.iter().filter(|&&v| v > 0.2).count();
        assert!(above > clouds.len() / 5, "only {above} cloud samples above 0.2");

        let terrain = screen_grid(&LayeredNoise::terrain(42));
        let low = terrain.iter().filter(|&&v| v < -0.1).count();
        let coast = terrain.iter().filter(|&&v| (-0.1..0.0).contains(&v)).count();
        let high = terrain.iter().filter(|&&v| v >= 0.0).count();
        assert!(low > 0 && coast > 0 && high > 0, "bands {low}/{coast}/{high}");
    }

    #[test]
    fn test_row_matches_single_samples() {
        let noise = LayeredNoise::default();
        let start = Vec2::new(400.0, 100.0);
        let row = noise.sample_row(start, 3.0, 50);
        assert_eq!(row.len(), 50);
        for (i, v) in row.iter().enumerate() {
            let single = noise.sample(start + Vec2::new(i as f32 * 3.0, 0.0));
            assert!((v - single).abs() < 1e-3, "index {i}: {v} vs {single}");
        }
    }

    #[test]
    fn test_empty_row() {
        assert!(LayeredNoise::default().sample_row(Vec2::ZERO, 3.0, 0).is_empty());
    }
}
