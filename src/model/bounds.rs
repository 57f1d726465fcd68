//! Saturation ranges for the dependent variables.
//!
//! Each range is calibrated against the largest value the step can reach while
//! the independent variables move over the 0-100 slider range. Values outside a
//! range are saturated, never reported.

use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]` that a derived value is saturated into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Saturates `value` into the interval.
    ///
    /// `NaN` maps to `min`; infinities map to the nearest bound.
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Returns true if `value` lies within `[min, max]`.
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const TEMPERATURE: Bounds = Bounds::new(0.0, 102.0);
pub const CLOUD_DENSITY: Bounds = Bounds::new(0.0, 10_000.0);
pub const PHOTOSYNTHESIS: Bounds = Bounds::new(0.0, 101.0);
pub const PLANTS_DENSITY: Bounds = Bounds::new(0.0, 1_101.31);
pub const OXYGEN: Bounds = Bounds::new(0.0, 1_213_028.81);
pub const CARBON_DIOXIDE: Bounds = Bounds::new(39.49, 1_040.0);
pub const ASI: Bounds = Bounds::new(39.99, 1_213_028.81);
pub const RAINFALL_INTENSITY: Bounds = Bounds::new(0.0, 2_000.0);
pub const RADIUS_OF_WET_GROUND: Bounds = Bounds::new(0.0, 200_000.0);
pub const RAINFALL_AREA: Bounds = Bounds::new(0.0, 1_256_637.06);
pub const POWER: Bounds = Bounds::new(0.0, 10_504.0);
pub const UV_INDEX: Bounds = Bounds::new(0.0, 102.0);
pub const POLLUTION: Bounds = Bounds::new(0.0, 1_000.5);
pub const HEALTH_RISK: Bounds = Bounds::new(0.0, 11.53);
pub const CROP_YIELD: Bounds = Bounds::new(0.0, 437_991.30);
pub const HUNGER: Bounds = Bounds::new(0.0, 100.0);
pub const WATER_RESOURCES: Bounds = Bounds::new(5.0, 2_030.0);
pub const THIRST: Bounds = Bounds::new(0.0, 100.0);
