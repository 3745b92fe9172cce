use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config, GoogleWeatherApi, GoogleWeatherError,
    location::Coordinates,
    model::{CurrentConditionsResponse, DailyForecastResponse, HourlyForecastResponse},
};

/// Anything that can answer weather lookups for a location.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current_conditions(
        &self,
        location: &Coordinates,
    ) -> Result<CurrentConditionsResponse, GoogleWeatherError>;

    async fn hourly_forecast(
        &self,
        location: &Coordinates,
        hours: u16,
    ) -> Result<HourlyForecastResponse, GoogleWeatherError>;

    async fn daily_forecast(
        &self,
        location: &Coordinates,
        days: u8,
    ) -> Result<DailyForecastResponse, GoogleWeatherError>;
}

#[async_trait]
impl WeatherSource for GoogleWeatherApi {
    async fn current_conditions(
        &self,
        location: &Coordinates,
    ) -> Result<CurrentConditionsResponse, GoogleWeatherError> {
        GoogleWeatherApi::current_conditions(self, location).await
    }

    async fn hourly_forecast(
        &self,
        location: &Coordinates,
        hours: u16,
    ) -> Result<HourlyForecastResponse, GoogleWeatherError> {
        GoogleWeatherApi::hourly_forecast(self, location, hours).await
    }

    async fn daily_forecast(
        &self,
        location: &Coordinates,
        days: u8,
    ) -> Result<DailyForecastResponse, GoogleWeatherError> {
        GoogleWeatherApi::daily_forecast(self, location, days).await
    }
}

/// Construct a source from config. `api_key` overrides the configured key.
pub fn source_from_config(
    config: &Config,
    api_key: Option<&str>,
) -> anyhow::Result<Box<dyn WeatherSource>> {
    let api_key = config.resolve_api_key(api_key)?;
    let client = GoogleWeatherApi::with_options(api_key, config.client_options())?;

    Ok(Box::new(client))
}
