//! Dependent (derived) variables and their dependency graph.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bounds::{self, Bounds};
use super::inputs::IndependentVar;
use super::ModelError;

/// Identifies one derivation step. Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependentVar {
    Temperature,
    CloudDensity,
    Photosynthesis,
    PlantsDensity,
    Oxygen,
    CarbonDioxide,
    Asi,
    RainfallIntensity,
    RadiusOfWetGround,
    RainfallArea,
    Power,
    UvIndex,
    Pollution,
    HealthRisk,
    CropYield,
    Hunger,
    WaterResources,
    Thirst,
}

impl DependentVar {
    /// All steps in evaluation order.
    pub const ALL: [DependentVar; 18] = [
        DependentVar::Temperature,
        DependentVar::CloudDensity,
        DependentVar::Photosynthesis,
        DependentVar::PlantsDensity,
        DependentVar::Oxygen,
        DependentVar::CarbonDioxide,
        DependentVar::Asi,
        DependentVar::RainfallIntensity,
        DependentVar::RadiusOfWetGround,
        DependentVar::RainfallArea,
        DependentVar::Power,
        DependentVar::UvIndex,
        DependentVar::Pollution,
        DependentVar::HealthRisk,
        DependentVar::CropYield,
        DependentVar::Hunger,
        DependentVar::WaterResources,
        DependentVar::Thirst,
    ];

    /// Key used in output maps.
    pub fn name(&self) -> &'static str {
        match self {
            DependentVar::Temperature => "temperature",
            DependentVar::CloudDensity => "cloud_density",
            DependentVar::Photosynthesis => "photosynthesis",
            DependentVar::PlantsDensity => "plants_density",
            DependentVar::Oxygen => "oxygen",
            DependentVar::CarbonDioxide => "carbon_dioxide",
            DependentVar::Asi => "asi",
            DependentVar::RainfallIntensity => "rainfall_intensity",
            DependentVar::RadiusOfWetGround => "radius_of_wet_ground",
            DependentVar::RainfallArea => "rainfall_area",
            DependentVar::Power => "power",
            DependentVar::UvIndex => "uv_index",
            DependentVar::Pollution => "pollution",
            DependentVar::HealthRisk => "health_risk",
            DependentVar::CropYield => "crop_yield",
            DependentVar::Hunger => "hunger",
            DependentVar::WaterResources => "water_resources",
            DependentVar::Thirst => "thirst",
        }
    }

    /// Saturation range of this step.
    pub fn bounds(&self) -> Bounds {
        match self {
            DependentVar::Temperature => bounds::TEMPERATURE,
            DependentVar::CloudDensity => bounds::CLOUD_DENSITY,
            DependentVar::Photosynthesis => bounds::PHOTOSYNTHESIS,
            DependentVar::PlantsDensity => bounds::PLANTS_DENSITY,
            DependentVar::Oxygen => bounds::OXYGEN,
            DependentVar::CarbonDioxide => bounds::CARBON_DIOXIDE,
            DependentVar::Asi => bounds::ASI,
            DependentVar::RainfallIntensity => bounds::RAINFALL_INTENSITY,
            DependentVar::RadiusOfWetGround => bounds::RADIUS_OF_WET_GROUND,
            DependentVar::RainfallArea => bounds::RAINFALL_AREA,
            DependentVar::Power => bounds::POWER,
            DependentVar::UvIndex => bounds::UV_INDEX,
            DependentVar::Pollution => bounds::POLLUTION,
            DependentVar::HealthRisk => bounds::HEALTH_RISK,
            DependentVar::CropYield => bounds::CROP_YIELD,
            DependentVar::Hunger => bounds::HUNGER,
            DependentVar::WaterResources => bounds::WATER_RESOURCES,
            DependentVar::Thirst => bounds::THIRST,
        }
    }

    /// Derived values this step reads. Each must be evaluated earlier.
    pub fn dependencies(&self) -> &'static [DependentVar] {
        use DependentVar::*;
        match self {
            Temperature | CloudDensity | RainfallIntensity | Pollution => &[],
            Photosynthesis => &[Temperature, CloudDensity],
            PlantsDensity => &[Photosynthesis],
            Oxygen => &[Photosynthesis, PlantsDensity],
            CarbonDioxide => &[Photosynthesis],
            Asi => &[Oxygen, CarbonDioxide],
            RadiusOfWetGround => &[RainfallIntensity],
            RainfallArea => &[RadiusOfWetGround],
            Power | UvIndex => &[Temperature],
            HealthRisk => &[UvIndex, Pollution],
            CropYield => &[PlantsDensity],
            Hunger => &[CropYield],
            WaterResources => &[RainfallIntensity],
            Thirst => &[RainfallArea],
        }
    }

    /// Independent variables this step reads directly.
    pub fn inputs(&self) -> &'static [IndependentVar] {
        use IndependentVar::*;
        match self {
            DependentVar::Temperature | DependentVar::CloudDensity => &[Humidity, Temperature],
            DependentVar::Photosynthesis | DependentVar::Asi => &[],
            DependentVar::RainfallArea | DependentVar::HealthRisk => &[],
            DependentVar::PlantsDensity | DependentVar::UvIndex => &[Temperature],
            DependentVar::Oxygen | DependentVar::CarbonDioxide => &[Population],
            DependentVar::Hunger | DependentVar::Thirst => &[Population],
            DependentVar::RainfallIntensity => &[Humidity, Temperature, WindSpeed],
            DependentVar::RadiusOfWetGround | DependentVar::Power => &[WindSpeed],
            DependentVar::Pollution | DependentVar::WaterResources => &[Population, WindSpeed],
            DependentVar::CropYield => &[Temperature, Humidity],
        }
    }

    /// Human-readable formula; `solar` is the raw temperature input.
    pub fn formula(&self) -> &'static str {
        match self {
            DependentVar::Temperature => "0.02*humidity + solar",
            DependentVar::CloudDensity => "humidity^2 / max(solar, 1)",
            DependentVar::Photosynthesis => "temperature * (0.5 + 0.5*cos(cloud_density))",
            DependentVar::PlantsDensity => "solar^2/10 + photosynthesis",
            DependentVar::Oxygen => "5 + 1.5*photosynthesis + plants_density^2 - 0.05*population",
            DependentVar::CarbonDioxide => "40 + 10*population - 0.005*photosynthesis",
            DependentVar::Asi => "sqrt(oxygen^2 + carbon_dioxide^2)",
            DependentVar::RainfallIntensity => "0.1*humidity*solar*(1 + wind_speed/100)",
            DependentVar::RadiusOfWetGround => "rainfall_intensity * wind_speed",
            DependentVar::RainfallArea => "pi * radius_of_wet_ground * 2",
            DependentVar::Power => "temperature^2 + wind_speed",
            DependentVar::UvIndex => "0.01 * temperature * solar",
            DependentVar::Pollution => "10*population + 0.005*wind_speed",
            DependentVar::HealthRisk => "ln(1 + uv_index + pollution)",
            DependentVar::CropYield => "0.05*(solar - 20)*humidity*plants_density if solar > 20 else 0",
            DependentVar::Hunger => "population / max(crop_yield, 1)",
            DependentVar::WaterResources => "10 + rainfall_intensity + 0.2*wind_speed - 0.05*population",
            DependentVar::Thirst => "population / max(rainfall_area, 1)",
        }
    }
}

impl fmt::Display for DependentVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DependentVar {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        DependentVar::ALL
            .into_iter()
            .find(|v| v.name() == key)
            .ok_or_else(|| ModelError::UnknownVariable(s.to_string()))
    }
}

/// Checks that every step in `order` comes after all of its dependencies.
///
/// Steps may be omitted; a dependency that is never listed counts as unmet.
pub fn validate_order(order: &[DependentVar]) -> Result<(), ModelError> {
    let mut done: Vec<DependentVar> = Vec::with_capacity(order.len());
    for step in order {
        for dep in step.dependencies() {
            if !done.contains(dep) {
                return Err(ModelError::OutOfOrder {
                    step: step.name(),
                    dependency: dep.name(),
                });
            }
        }
        done.push(*step);
    }
    Ok(())
}

/// The eighteen derived values of one evaluation, each within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DependentVariables {
    /// Humidity-adjusted temperature (°C).
    pub temperature: f64,
    pub cloud_density: f64,
    pub photosynthesis: f64,
    pub plants_density: f64,
    pub oxygen: f64,
    pub carbon_dioxide: f64,
    /// Aggregate stability index.
    pub asi: f64,
    pub rainfall_intensity: f64,
    pub radius_of_wet_ground: f64,
    pub rainfall_area: f64,
    pub power: f64,
    pub uv_index: f64,
    pub pollution: f64,
    pub health_risk: f64,
    pub crop_yield: f64,
    pub hunger: f64,
    pub water_resources: f64,
    pub thirst: f64,
}

impl DependentVariables {
    pub fn get(&self, var: DependentVar) -> f64 {
        match var {
            DependentVar::Temperature => self.temperature,
            DependentVar::CloudDensity => self.cloud_density,
            DependentVar::Photosynthesis => self.photosynthesis,
            DependentVar::PlantsDensity => self.plants_density,
            DependentVar::Oxygen => self.oxygen,
            DependentVar::CarbonDioxide => self.carbon_dioxide,
            DependentVar::Asi => self.asi,
            DependentVar::RainfallIntensity => self.rainfall_intensity,
            DependentVar::RadiusOfWetGround => self.radius_of_wet_ground,
            DependentVar::RainfallArea => self.rainfall_area,
            DependentVar::Power => self.power,
            DependentVar::UvIndex => self.uv_index,
            DependentVar::Pollution => self.pollution,
            DependentVar::HealthRisk => self.health_risk,
            DependentVar::CropYield => self.crop_yield,
            DependentVar::Hunger => self.hunger,
            DependentVar::WaterResources => self.water_resources,
            DependentVar::Thirst => self.thirst,
        }
    }

    /// Iterates `(variable, value)` pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (DependentVar, f64)> + '_ {
        DependentVar::ALL.into_iter().map(move |v| (v, self.get(v)))
    }

    /// Name → value view for key-lookup consumers.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter().map(|(v, x)| (v.name(), x)).collect()
    }

    /// Returns the first variable whose value is outside its bounds, if any.
    pub fn first_out_of_bounds(&self) -> Option<(DependentVar, f64)> {
        self.iter().find(|(v, x)| !v.bounds().contains(*x))
    }
}
