use crate::utils::{collapse_whitespace, validate_coordinates};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MAX_CITY_LEN: usize = 255;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("The city field is required.")]
    EmptyCity,
    #[error("The city field must not be greater than 255 characters (got {len}).")]
    CityTooLong { len: usize },
    #[error("Invalid latitude: {0}. Must be between -90 and 90")]
    LatitudeOutOfRange(f64),
    #[error("Invalid longitude: {0}. Must be between -180 and 180")]
    LongitudeOutOfRange(f64),
    #[error("The selected units is invalid: {0}. Expected metric or imperial.")]
    InvalidUnits(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(ValidationError::InvalidUnits(s.to_string())),
        }
    }
}

/// Where a query points: a free-text place name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

/// A validated weather query. Build one per request through [`Query::city`]
/// or [`Query::coordinates`]; the fields can't be set to invalid values.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    target: Target,
    units: Units,
}

impl Query {
    pub fn city(name: &str, units: Units) -> Result<Self, ValidationError> {
        // Length is measured on the trimmed input, before inner runs collapse.
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCity);
        }
        let len = trimmed.chars().count();
        if len > MAX_CITY_LEN {
            return Err(ValidationError::CityTooLong { len });
        }
        Ok(Self {
            target: Target::City(collapse_whitespace(trimmed)),
            units,
        })
    }

    pub fn coordinates(lat: f64, lon: f64, units: Units) -> Result<Self, ValidationError> {
        if validate_coordinates(lat, 0.0).is_err() {
            return Err(ValidationError::LatitudeOutOfRange(lat));
        }
        if validate_coordinates(0.0, lon).is_err() {
            return Err(ValidationError::LongitudeOutOfRange(lon));
        }
        Ok(Self {
            target: Target::Coordinates { lat, lon },
            units,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Query-string parameters identifying this target upstream, minus the
    /// credential.
    pub fn upstream_params(&self) -> Vec<(&'static str, String)> {
        let mut params = match &self.target {
            Target::City(name) => vec![("q", name.clone())],
            Target::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        };
        params.push(("units", self.units.as_str().to_string()));
        params
    }
}
