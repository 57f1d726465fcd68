//! Rasterization of one planet frame from model outputs.

use glam::Vec2;
use image::RgbImage;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::palette::{self, Rgb};
use crate::model::{DependentVariables, IndependentVariables};
use crate::noise::LayeredNoise;

/// Noise value above which a cloud puff is drawn.
const CLOUD_THRESHOLD: f32 = 0.2;
/// Glow ring offsets beyond the planet radius, drawn inner to outer.
const GLOW_RINGS: [f32; 3] = [5.0, 15.0, 25.0];
/// Opacity lost per pixel of ring offset.
const GLOW_FADE_PER_PX: f32 = 5.0;

/// Errors that can occur when rendering a frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid frame size: {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("Cell sizes must be at least 1 pixel")]
    InvalidCell,
    #[error("Planet radius {radius} does not fit a {width}x{height} frame")]
    RadiusOutOfRange { radius: u32, width: u32, height: u32 },
}

/// Presentation-side view of one model evaluation.
///
/// The scaling here (capping plant density, truncating cloud density) belongs
/// to the renderer, not to the equations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Plant density capped to the 0-100 color ramp.
    pub plant_density: f64,
    /// Rainfall area, used for wetness.
    pub rainfall: f64,
    /// Aggregate stability index, used for the glow.
    pub asi: f64,
    /// Whole-number cloud density (percent of planet radius covered).
    pub cloud_density: f64,
    pub solar_intensity: f64,
    pub wind_speed: f64,
}

impl FrameParams {
    pub fn from_model(inputs: &IndependentVariables, outputs: &DependentVariables) -> Self {
        Self {
            plant_density: outputs.plants_density.clamp(0.0, 100.0),
            rainfall: outputs.rainfall_area,
            asi: outputs.asi,
            cloud_density: outputs.cloud_density.trunc(),
            solar_intensity: inputs.solar_intensity(),
            wind_speed: inputs.wind_speed,
        }
    }

    /// Radius of the cloud layer, never larger than the planet.
    pub fn cloud_radius(&self, planet_radius: f32) -> f32 {
        let r = planet_radius as f64 * self.cloud_density / 100.0;
        r.clamp(0.0, planet_radius as f64) as f32
    }
}

/// Frame layout and appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub planet_radius: u32,
    /// Terrain block size in pixels.
    pub cell: u32,
    /// Spacing of cloud puffs in pixels; also the puff radius.
    pub cloud_cell: u32,
    pub star_count: usize,
    /// Seed for the star field.
    pub seed: u64,
    /// Animation frame; drifts stars and clouds.
    pub frame: u32,
    pub terrain: LayeredNoise,
    pub clouds: LayeredNoise,
    /// Draw the solar shading overlay on the disc.
    pub shading: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            planet_radius: 200,
            cell: 3,
            cloud_cell: 5,
            star_count: 120,
            seed: 42,
            frame: 0,
            terrain: LayeredNoise::terrain(42),
            clouds: LayeredNoise::clouds(42),
            shading: true,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSize(self.width, self.height));
        }
        if self.cell == 0 || self.cloud_cell == 0 {
            return Err(RenderError::InvalidCell);
        }
        if self.planet_radius == 0 || self.planet_radius.saturating_mul(2) > self.width.min(self.height) {
            return Err(RenderError::RadiusOutOfRange {
                radius: self.planet_radius,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Default layout with terrain, clouds and stars all derived from one seed.
    pub fn seeded(seed: i32) -> Self {
        Self {
            // Bit-preserving, so distinct seeds keep distinct star fields.
            seed: u64::from(seed as u32),
            terrain: LayeredNoise::terrain(seed),
            clouds: LayeredNoise::clouds(seed),
            ..Default::default()
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }
}

/// Square grid of blocks covering the planet's bounding box.
struct BlockGrid<T> {
    origin: Vec2,
    step: f32,
    n: usize,
    cells: Vec<T>,
}

impl<T: Copy + Send> BlockGrid<T> {
    /// Fills each block from its top-left corner and the noise sampled there,
    /// offset by `shift`. Rows are sampled in parallel, one noise call per row.
    fn build<F>(center: Vec2, half_extent: f32, step: u32, noise: &LayeredNoise, shift: Vec2, f: F) -> Self
    where
        F: Fn(Vec2, f32) -> T + Sync,
    {
        let origin = center - Vec2::splat(half_extent.floor());
        let n = ((2.0 * half_extent.floor()) / step as f32).ceil().max(0.0) as usize;
        let step = step as f32;
        let f = &f;
        let cells = (0..n)
            .into_par_iter()
            .flat_map_iter(|gy| {
                let row_origin = origin + Vec2::new(0.0, gy as f32 * step);
                noise
                    .sample_row(row_origin + shift, step, n)
                    .into_iter()
                    .enumerate()
                    .map(move |(gx, v)| f(row_origin + Vec2::new(gx as f32 * step, 0.0), v))
            })
            .collect();
        Self {
            origin,
            step,
            n,
            cells,
        }
    }

    /// Block containing pixel `p`, if any.
    fn at(&self, p: Vec2) -> Option<T> {
        let g = ((p - self.origin) / self.step).floor();
        if g.x < 0.0 || g.y < 0.0 {
            return None;
        }
        let (gx, gy) = (g.x as usize, g.y as usize);
        (gx < self.n && gy < self.n).then(|| self.cells[gy * self.n + gx])
    }

    fn block_origin(&self, gx: usize, gy: usize) -> Vec2 {
        self.origin + Vec2::new(gx as f32, gy as f32) * self.step
    }
}

/// Renders the planet, its glow, clouds and the star field.
///
/// Deterministic for a given `params` and `cfg`.
pub fn render_frame(params: &FrameParams, cfg: &RenderConfig) -> Result<RgbImage, RenderError> {
    cfg.validate()?;

    let (width, height) = (cfg.width, cfg.height);
    let center = cfg.center();
    let radius = cfg.planet_radius as f32;

    let mut buf = vec![0u8; width as usize * height as usize * 3];
    draw_stars(&mut buf, cfg);

    let terrain = BlockGrid::build(center, radius, cfg.cell, &cfg.terrain, Vec2::ZERO, |corner, n| {
        (corner.distance(center) <= radius)
            .then(|| palette::terrain_color(n, params.rainfall, params.plant_density))
    });

    let cloud_radius = params.cloud_radius(radius);
    let drift = Vec2::splat((params.wind_speed * 0.2 * cfg.frame as f64) as f32);
    let clouds = BlockGrid::build(center, cloud_radius, cfg.cloud_cell, &cfg.clouds, drift, |c, n| {
        c.distance(center) <= cloud_radius && n > CLOUD_THRESHOLD
    });
    let puff_radius = cfg.cloud_cell as f32;

    let glow = palette::glow_rgba(params.asi);
    let glow_rgb: Rgb = [glow[0], glow[1], glow[2]];
    let shade = palette::shading_alpha(params.solar_intensity);

    buf.par_chunks_mut(width as usize * 3)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width as usize {
                let p = Vec2::new(x as f32, y as f32);
                let d = p.distance(center);
                let px = &mut row[x * 3..x * 3 + 3];
                let mut color: Rgb = [px[0], px[1], px[2]];

                for offset in GLOW_RINGS {
                    if d <= radius + offset {
                        let alpha = (glow[3] as f32 - offset * GLOW_FADE_PER_PX).max(0.0) as u8;
                        color = palette::blend(color, glow_rgb, alpha);
                    }
                }

                if let Some(Some(ground)) = terrain.at(p) {
                    color = ground;
                }

                if puff_covers(&clouds, p, puff_radius) {
                    color = palette::blend(color, palette::WHITE, palette::CLOUD_ALPHA);
                }

                if cfg.shading && d <= radius {
                    color = palette::blend(color, palette::BLACK, shade);
                }

                px.copy_from_slice(&color);
            }
        });

    debug!(
        width,
        height,
        cloud_radius,
        shade,
        "Rendered planet frame"
    );

    RgbImage::from_raw(width, height, buf).ok_or(RenderError::InvalidSize(width, height))
}

/// True if any cloud puff (a disc of `puff_radius` at a set grid point) covers `p`.
fn puff_covers(clouds: &BlockGrid<bool>, p: Vec2, puff_radius: f32) -> bool {
    if clouds.n == 0 {
        return false;
    }
    let lo = ((p - Vec2::splat(puff_radius) - clouds.origin) / clouds.step).floor();
    let hi = ((p + Vec2::splat(puff_radius) - clouds.origin) / clouds.step).ceil();
    let max = (clouds.n - 1) as f32;
    let (x0, y0) = (lo.x.clamp(0.0, max) as usize, lo.y.clamp(0.0, max) as usize);
    let (x1, y1) = (hi.x.clamp(0.0, max) as usize, hi.y.clamp(0.0, max) as usize);

    for gy in y0..=y1 {
        for gx in x0..=x1 {
            if clouds.cells[gy * clouds.n + gx]
                && clouds.block_origin(gx, gy).distance(p) <= puff_radius
            {
                return true;
            }
        }
    }
    false
}

/// Scatters the star field; each star drifts one pixel right per frame.
fn draw_stars(buf: &mut [u8], cfg: &RenderConfig) {
    let (w, h) = (cfg.width as i64, cfg.height as i64);
    let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);

    for _ in 0..cfg.star_count {
        let x0 = rng.random_range(0..w);
        let y = rng.random_range(0..h);
        let size = rng.random_range(1..=3i64);
        let x = (x0 + cfg.frame as i64).rem_euclid(w);

        for dy in -size..=size {
            for dx in -size..=size {
                if dx * dx + dy * dy > size * size {
                    continue;
                }
                let (px, py) = (x + dx, y + dy);
                if px < 0 || py < 0 || px >= w || py >= h {
                    continue;
                }
                let i = ((py * w + px) * 3) as usize;
                buf[i..i + 3].copy_from_slice(&palette::WHITE);
            }
        }
    }
}
