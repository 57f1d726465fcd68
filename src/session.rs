//! Slider session: the mutable copy of the independent variables.
//!
//! The engine never owns state; a session holds the current slider values,
//! applies slider edits, and persists the record to a JSON file for the
//! save / load / reset-to-default actions.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::model::{evaluate, DependentVariables, IndependentVar, IndependentVariables};

/// Default session file, relative to the working directory.
pub const DEFAULT_SESSION_FILE: &str = "saved_variables.json";

/// Range every slider is confined to.
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 100.0;

/// Errors that can occur while loading or saving a session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed session file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Current slider values plus the file they are saved to.
#[derive(Debug, Clone)]
pub struct Session {
    pub variables: IndependentVariables,
    path: PathBuf,
}

impl Session {
    /// Creates a session with default values, bound to `path` (nothing is read).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            variables: IndependentVariables::default(),
            path: path.into(),
        }
    }

    /// Loads the saved record at `path`, or starts from defaults if no file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        if !path.exists() {
            debug!("No session file at {}, using defaults", path.display());
            return Ok(Self::new(path));
        }

        let text = fs::read_to_string(&path).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;
        let variables: IndependentVariables =
            serde_json::from_str(&text).map_err(|source| SessionError::Json {
                path: path.clone(),
                source,
            })?;
        info!("Loaded session from {}: {:?}", path.display(), variables);

        Ok(Self { variables, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sets a slider, confining the value to the slider range.
    pub fn set(&mut self, var: IndependentVar, value: f64) -> f64 {
        let value = if value.is_nan() {
            SLIDER_MIN
        } else {
            value.clamp(SLIDER_MIN, SLIDER_MAX)
        };
        self.variables.set(var, value);
        debug!("Slider {} = {:.2}", var, value);
        value
    }

    /// Sets a slider from a pointer position `relative_x` pixels along a track
    /// `width` pixels wide.
    pub fn drag(&mut self, var: IndependentVar, relative_x: f64, width: f64) -> f64 {
        let fraction = if width > 0.0 { relative_x / width } else { 0.0 };
        self.set(var, fraction * SLIDER_MAX)
    }

    /// Restores the default slider values. The file is left untouched.
    pub fn reset(&mut self) {
        self.variables = IndependentVariables::default();
        debug!("Session reset to defaults");
    }

    /// Writes the current values as pretty JSON, creating parent directories.
    pub fn save(&self) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let text = serde_json::to_string_pretty(&self.variables).map_err(|source| {
            SessionError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("Variables saved to {}: {:?}", self.path.display(), self.variables);
        Ok(())
    }

    /// Runs the equation engine on the current values.
    pub fn evaluate(&self) -> DependentVariables {
        evaluate(&self.variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let session = Session::open(dir.path().join("none.json")).unwrap();
        assert_eq!(session.variables, IndependentVariables::default());
    }

    #[test]
    fn test_save_then_open_restores_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut session = Session::new(&path);
        session.set(IndependentVar::Humidity, 72.5);
        session.set(IndependentVar::Population, 3.0);
        session.save().unwrap();

        let loaded = Session::open(&path).unwrap();
        assert_eq!(loaded.variables.humidity, 72.5);
        assert_eq!(loaded.variables.population, 3.0);
        assert_eq!(loaded.variables.temperature, 20.0);
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"temperature\": 1}").unwrap();

        let err = Session::open(&path).unwrap_err();
        assert!(matches!(err, SessionError::Json { .. }));
    }

    #[test]
    fn test_sliders_are_confined_to_range() {
        let mut session = Session::new("unused.json");
        assert_eq!(session.set(IndependentVar::WindSpeed, 250.0), 100.0);
        assert_eq!(session.set(IndependentVar::WindSpeed, -4.0), 0.0);
        assert_eq!(session.set(IndependentVar::WindSpeed, f64::NAN), 0.0);
        assert_eq!(session.variables.wind_speed, 0.0);
    }

    #[test]
    fn test_drag_maps_track_position_to_value() {
        let mut session = Session::new("unused.json");
        assert_eq!(session.drag(IndependentVar::Temperature, 150.0, 300.0), 50.0);
        assert_eq!(session.drag(IndependentVar::Temperature, 400.0, 300.0), 100.0);
        assert_eq!(session.drag(IndependentVar::Temperature, -20.0, 300.0), 0.0);
        assert_eq!(session.drag(IndependentVar::Temperature, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = Session::new("unused.json");
        session.set(IndependentVar::Humidity, 1.0);
        session.reset();
        assert_eq!(session.variables, IndependentVariables::default());
        assert_eq!(session.evaluate(), evaluate(&IndependentVariables::default()));
    }
}
