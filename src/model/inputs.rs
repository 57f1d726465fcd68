//! Independent (user-controlled) variables.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ModelError;

/// The four slider-driven inputs of the model.
///
/// Units:
/// - `temperature`: °C. The equations use it as the solar-intensity driver,
///   which is why the serialized form also accepts `solar_intensity`.
/// - `humidity`: %
/// - `wind_speed`: m/s
/// - `population`: density units (the slider spans 0-100)
///
/// No range is enforced here; the equations saturate every derived value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndependentVariables {
    #[serde(alias = "solar_intensity")]
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub population: f64,
}

impl Default for IndependentVariables {
    fn default() -> Self {
        Self {
            temperature: 20.0,
            humidity: 50.0,
            wind_speed: 10.0,
            population: 1000.0,
        }
    }
}

impl IndependentVariables {
    pub fn new(temperature: f64, humidity: f64, wind_speed: f64, population: f64) -> Self {
        Self {
            temperature,
            humidity,
            wind_speed,
            population,
        }
    }

    /// Solar intensity as seen by the equations.
    #[inline]
    pub fn solar_intensity(&self) -> f64 {
        self.temperature
    }

    pub fn get(&self, var: IndependentVar) -> f64 {
        match var {
            IndependentVar::Temperature => self.temperature,
            IndependentVar::Humidity => self.humidity,
            IndependentVar::WindSpeed => self.wind_speed,
            IndependentVar::Population => self.population,
        }
    }

    /// Assigns `value` to `var` as-is (no slider clamping).
    pub fn set(&mut self, var: IndependentVar, value: f64) -> &mut Self {
        match var {
            IndependentVar::Temperature => self.temperature = value,
            IndependentVar::Humidity => self.humidity = value,
            IndependentVar::WindSpeed => self.wind_speed = value,
            IndependentVar::Population => self.population = value,
        }
        self
    }

    /// Builds the record from a name → value map.
    ///
    /// Every variable must be present; `solar_intensity` is accepted in place
    /// of `temperature`.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, ModelError> {
        let mut vars = Self::default();
        for var in IndependentVar::ALL {
            let value = map
                .get(var.name())
                .or_else(|| var.alias().and_then(|a| map.get(a)))
                .copied()
                .ok_or(ModelError::MissingField(var.name()))?;
            vars.set(var, value);
        }
        Ok(vars)
    }

    /// Builds the record from a JSON object, reporting missing or non-numeric fields.
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ModelError::NotAnObject(json_kind(value).to_string()))?;

        let mut vars = Self::default();
        for var in IndependentVar::ALL {
            let field = obj
                .get(var.name())
                .or_else(|| var.alias().and_then(|a| obj.get(a)))
                .ok_or(ModelError::MissingField(var.name()))?;
            let number = field.as_f64().ok_or_else(|| ModelError::NonNumeric {
                field: var.name(),
                found: json_kind(field).to_string(),
            })?;
            vars.set(var, number);
        }
        Ok(vars)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Identifies one of the four independent variables (one slider each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndependentVar {
    Temperature,
    Humidity,
    WindSpeed,
    Population,
}

impl IndependentVar {
    /// All variables in slider order.
    pub const ALL: [IndependentVar; 4] = [
        IndependentVar::Temperature,
        IndependentVar::Humidity,
        IndependentVar::WindSpeed,
        IndependentVar::Population,
    ];

    /// Key used in maps and saved sessions.
    pub fn name(&self) -> &'static str {
        match self {
            IndependentVar::Temperature => "temperature",
            IndependentVar::Humidity => "humidity",
            IndependentVar::WindSpeed => "wind_speed",
            IndependentVar::Population => "population",
        }
    }

    /// Alternate key accepted on input.
    pub fn alias(&self) -> Option<&'static str> {
        match self {
            IndependentVar::Temperature => Some("solar_intensity"),
            _ => None,
        }
    }

    /// Slider label with units.
    pub fn label(&self) -> &'static str {
        match self {
            IndependentVar::Temperature => "Temperature (°C)",
            IndependentVar::Humidity => "Humidity (%)",
            IndependentVar::WindSpeed => "Wind Speed (m/s)",
            IndependentVar::Population => "Population (people/km²)",
        }
    }
}

impl fmt::Display for IndependentVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndependentVar {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        IndependentVar::ALL
            .into_iter()
            .find(|v| v.name() == key || v.alias() == Some(key.as_str()))
            .ok_or_else(|| ModelError::UnknownVariable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_slider_start_values() {
        let vars = IndependentVariables::default();
        assert_eq!(vars, IndependentVariables::new(20.0, 50.0, 10.0, 1000.0));
        assert_eq!(vars.solar_intensity(), 20.0);
    }

    #[test]
    fn test_from_map_requires_every_field() {
        let mut map = HashMap::new();
        map.insert("temperature".to_string(), 30.0);
        map.insert("humidity".to_string(), 40.0);
        map.insert("wind_speed".to_string(), 5.0);

        assert_eq!(
            IndependentVariables::from_map(&map),
            Err(ModelError::MissingField("population"))
        );

        map.insert("population".to_string(), 12.0);
        let vars = IndependentVariables::from_map(&map).unwrap();
        assert_eq!(vars, IndependentVariables::new(30.0, 40.0, 5.0, 12.0));
    }

    #[test]
    fn test_from_map_accepts_solar_intensity_alias() {
        let map: HashMap<String, f64> = [
            ("solar_intensity", 70.0),
            ("humidity", 1.0),
            ("wind_speed", 2.0),
            ("population", 3.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let vars = IndependentVariables::from_map(&map).unwrap();
        assert_eq!(vars.temperature, 70.0);
    }

    #[test]
    fn test_from_json_reports_non_numeric_field() {
        let value = json!({
            "temperature": 20,
            "humidity": "wet",
            "wind_speed": 10,
            "population": 1000
        });
        let err = IndependentVariables::from_json(&value).unwrap_err();
        assert_eq!(
            err,
            ModelError::NonNumeric {
                field: "humidity",
                found: "a string".to_string()
            }
        );
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let err = IndependentVariables::from_json(&json!([1, 2, 3, 4])).unwrap_err();
        assert_eq!(err, ModelError::NotAnObject("an array".to_string()));
    }

    #[test]
    fn test_serde_alias_loads_solar_intensity_records() {
        let vars: IndependentVariables = serde_json::from_str(
            r#"{"solar_intensity": 42.0, "humidity": 1.0, "wind_speed": 2.0, "population": 3.0}"#,
        )
        .unwrap();
        assert_eq!(vars.temperature, 42.0);
    }

    #[test]
    fn test_var_parsing() {
        assert_eq!("wind-speed".parse::<IndependentVar>().unwrap(), IndependentVar::WindSpeed);
        assert_eq!("Solar_Intensity".parse::<IndependentVar>().unwrap(), IndependentVar::Temperature);
        assert!("pressure".parse::<IndependentVar>().is_err());
    }
}
