use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::GoogleWeatherError;

/// Units system the API reports values in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitsSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitsSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitsSystem::Metric => "METRIC",
            UnitsSystem::Imperial => "IMPERIAL",
        }
    }

    pub const fn all() -> &'static [UnitsSystem] {
        &[UnitsSystem::Metric, UnitsSystem::Imperial]
    }
}

impl fmt::Display for UnitsSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitsSystem {
    type Err = GoogleWeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "METRIC" => Ok(UnitsSystem::Metric),
            "IMPERIAL" => Ok(UnitsSystem::Imperial),
            _ => Err(GoogleWeatherError::InvalidArgument(format!(
                "unknown units system '{value}', expected METRIC or IMPERIAL"
            ))),
        }
    }
}
