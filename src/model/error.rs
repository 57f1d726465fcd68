//! Errors surfaced at the map-shaped boundary of the model.

use thiserror::Error;

/// Errors that can occur when building model inputs from untyped data.
///
/// Numeric problems inside the equations (zero denominators, out-of-range
/// values) are never reported; they are saturated where they arise.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Missing independent variable '{0}'")]
    MissingField(&'static str),
    #[error("Independent variable '{field}' is not numeric: {found}")]
    NonNumeric { field: &'static str, found: String },
    #[error("Expected an object of independent variables, found {0}")]
    NotAnObject(String),
    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),
    #[error("Step '{step}' is ordered before its dependency '{dependency}'")]
    OutOfOrder {
        step: &'static str,
        dependency: &'static str,
    },
}
