//! Per-step formulas of the habitability model.
//!
//! Every function returns a value already saturated into its step's bounds, so
//! downstream steps only ever see in-range inputs. `solar_intensity` is always
//! the raw temperature input; `temperature` is the adjusted value of step 1.

use std::f64::consts::PI;

use super::bounds;

/// Solar intensity above which crops grow.
pub const CROP_SOLAR_THRESHOLD: f64 = 20.0;

/// Step 1: humidity-adjusted temperature.
pub fn temperature(humidity: f64, solar_intensity: f64) -> f64 {
    bounds::TEMPERATURE.apply(0.02 * humidity + solar_intensity)
}

/// Step 2: cloud density. The denominator is floored at 1.
pub fn cloud_density(humidity: f64, solar_intensity: f64) -> f64 {
    bounds::CLOUD_DENSITY.apply(humidity.powi(2) / solar_intensity.max(1.0))
}

/// Step 3: photosynthesis, modulated by a cosine of cloud density.
pub fn photosynthesis(temperature: f64, cloud_density: f64) -> f64 {
    bounds::PHOTOSYNTHESIS.apply(temperature * (0.5 + 0.5 * cloud_density.cos()))
}

/// Step 4
pub fn plants_density(solar_intensity: f64, photosynthesis: f64) -> f64 {
    bounds::PLANTS_DENSITY.apply(solar_intensity.powi(2) / 10.0 + photosynthesis)
}

/// Step 5
pub fn oxygen(photosynthesis: f64, plants_density: f64, population: f64) -> f64 {
    bounds::OXYGEN.apply(5.0 + 1.5 * photosynthesis + plants_density.powi(2) - 0.05 * population)
}

/// Step 6
pub fn carbon_dioxide(photosynthesis: f64, population: f64) -> f64 {
    bounds::CARBON_DIOXIDE.apply(40.0 + 10.0 * population - 0.005 * photosynthesis)
}

/// Step 7: aggregate stability index, the magnitude of (oxygen, carbon dioxide).
pub fn asi(oxygen: f64, carbon_dioxide: f64) -> f64 {
    bounds::ASI.apply(oxygen.hypot(carbon_dioxide))
}

/// Step 8
pub fn rainfall_intensity(humidity: f64, solar_intensity: f64, wind_speed: f64) -> f64 {
    bounds::RAINFALL_INTENSITY.apply(0.1 * humidity * solar_intensity * (1.0 + wind_speed / 100.0))
}

/// Step 9
pub fn radius_of_wet_ground(rainfall_intensity: f64, wind_speed: f64) -> f64 {
    bounds::RADIUS_OF_WET_GROUND.apply(rainfall_intensity * wind_speed)
}

/// Step 10
pub fn rainfall_area(radius_of_wet_ground: f64) -> f64 {
    bounds::RAINFALL_AREA.apply(PI * radius_of_wet_ground * 2.0)
}

/// Step 11
pub fn power(temperature: f64, wind_speed: f64) -> f64 {
    bounds::POWER.apply(temperature.powi(2) + wind_speed)
}

/// Step 12
pub fn uv_index(temperature: f64, solar_intensity: f64) -> f64 {
    bounds::UV_INDEX.apply(0.01 * temperature * solar_intensity)
}

/// Step 13
pub fn pollution(population: f64, wind_speed: f64) -> f64 {
    bounds::POLLUTION.apply(10.0 * population + 0.005 * wind_speed)
}

/// Step 14: `ln(1 + uv_index + pollution)`.
///
/// Both arguments are non-negative once clamped, so the log argument is >= 1.
pub fn health_risk(uv_index: f64, pollution: f64) -> f64 {
    bounds::HEALTH_RISK.apply((uv_index + pollution).ln_1p())
}

/// Step 15: zero unless solar intensity exceeds [`CROP_SOLAR_THRESHOLD`].
pub fn crop_yield(solar_intensity: f64, humidity: f64, plants_density: f64) -> f64 {
    let raw = if solar_intensity > CROP_SOLAR_THRESHOLD {
        0.05 * (solar_intensity - CROP_SOLAR_THRESHOLD) * humidity * plants_density
    } else {
        0.0
    };
    bounds::CROP_YIELD.apply(raw)
}

/// Step 16: the denominator is floored at 1.
pub fn hunger(population: f64, crop_yield: f64) -> f64 {
    bounds::HUNGER.apply(population / crop_yield.max(1.0))
}

/// Step 17
pub fn water_resources(rainfall_intensity: f64, wind_speed: f64, population: f64) -> f64 {
    bounds::WATER_RESOURCES
        .apply(10.0 + rainfall_intensity + 0.2 * wind_speed - 0.05 * population)
}

/// Step 18: the denominator is floored at 1.
pub fn thirst(population: f64, rainfall_area: f64) -> f64 {
    bounds::THIRST.apply(population / rainfall_area.max(1.0))
}
