//! Orchestration of the eighteen derivation steps.

use std::collections::HashMap;

use serde_json::Value;

use super::equations as eq;
use super::{DependentVariables, IndependentVariables, ModelError};

/// Evaluates every dependent variable from the independent inputs.
///
/// A single top-to-bottom sweep in [`DependentVar::ALL`](super::DependentVar::ALL)
/// order; every step sees only clamped values of the steps before it. Pure and
/// total: any input, including NaN or infinities, yields in-bounds outputs.
pub fn evaluate(inputs: &IndependentVariables) -> DependentVariables {
    let solar = inputs.solar_intensity();
    let IndependentVariables {
        humidity,
        wind_speed,
        population,
        ..
    } = *inputs;

    let temperature = eq::temperature(humidity, solar);
    let cloud_density = eq::cloud_density(humidity, solar);
    let photosynthesis = eq::photosynthesis(temperature, cloud_density);
    let plants_density = eq::plants_density(solar, photosynthesis);
    let oxygen = eq::oxygen(photosynthesis, plants_density, population);
    let carbon_dioxide = eq::carbon_dioxide(photosynthesis, population);
    let asi = eq::asi(oxygen, carbon_dioxide);
    let rainfall_intensity = eq::rainfall_intensity(humidity, solar, wind_speed);
    let radius_of_wet_ground = eq::radius_of_wet_ground(rainfall_intensity, wind_speed);
    let rainfall_area = eq::rainfall_area(radius_of_wet_ground);
    let power = eq::power(temperature, wind_speed);
    let uv_index = eq::uv_index(temperature, solar);
    let pollution = eq::pollution(population, wind_speed);
    let health_risk = eq::health_risk(uv_index, pollution);
    let crop_yield = eq::crop_yield(solar, humidity, plants_density);
    let hunger = eq::hunger(population, crop_yield);
    let water_resources = eq::water_resources(rainfall_intensity, wind_speed, population);
    let thirst = eq::thirst(population, rainfall_area);

    DependentVariables {
        temperature,
        cloud_density,
        photosynthesis,
        plants_density,
        oxygen,
        carbon_dioxide,
        asi,
        rainfall_intensity,
        radius_of_wet_ground,
        rainfall_area,
        power,
        uv_index,
        pollution,
        health_risk,
        crop_yield,
        hunger,
        water_resources,
        thirst,
    }
}

/// Evaluates from a name → value map; fails only if a variable is missing.
pub fn evaluate_map(map: &HashMap<String, f64>) -> Result<DependentVariables, ModelError> {
    Ok(evaluate(&IndependentVariables::from_map(map)?))
}

/// Evaluates from a JSON object; fails if a variable is missing or not a number.
pub fn evaluate_json(value: &Value) -> Result<DependentVariables, ModelError> {
    Ok(evaluate(&IndependentVariables::from_json(value)?))
}
