use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::GoogleWeatherError;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = GoogleWeatherError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Validate and build coordinates. NaN never passes the range checks.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GoogleWeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GoogleWeatherError::InvalidCoordinates { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses `"LAT,LON"`, e.g. `"52.52,13.405"`.
impl FromStr for Coordinates {
    type Err = GoogleWeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            GoogleWeatherError::InvalidArgument(format!(
                "expected coordinates as LAT,LON but got '{value}'"
            ))
        };

        let (lat, lon) = value.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;

        Self::new(latitude, longitude)
    }
}
