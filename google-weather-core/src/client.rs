//! HTTP client for the Google Weather API.

use reqwest::{Client, header};
use serde::de::DeserializeOwned;
use std::{fmt, time::Duration};
use tracing::{debug, instrument};

use crate::{
    error::{GoogleWeatherError, error_message},
    location::Coordinates,
    model::{CurrentConditionsResponse, DailyForecastResponse, HourlyForecastResponse},
    units::UnitsSystem,
};

pub const DEFAULT_BASE_URL: &str = "https://weather.googleapis.com/v1";
pub const DEFAULT_LANGUAGE_CODE: &str = "en";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_FORECAST_HOURS: u16 = 48;
pub const MAX_FORECAST_HOURS: u16 = 240;
pub const DEFAULT_FORECAST_DAYS: u8 = 10;
pub const MAX_FORECAST_DAYS: u8 = 10;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36";

const CURRENT_CONDITIONS: &str = "currentConditions:lookup";
const FORECAST_HOURS: &str = "forecast/hours:lookup";
const FORECAST_DAYS: &str = "forecast/days:lookup";

/// Per-client request settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    pub base_url: String,
    pub language_code: String,
    pub units_system: UnitsSystem,
    /// Sent as `Referer`; needed when the key is restricted to HTTP referrers.
    pub referrer: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            units_system: UnitsSystem::default(),
            referrer: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for the `weather.googleapis.com` lookup endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct GoogleWeatherApi {
    api_key: String,
    options: ClientOptions,
    http: Client,
}

impl fmt::Debug for GoogleWeatherApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleWeatherApi")
            .field("api_key", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl GoogleWeatherApi {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GoogleWeatherError> {
        Self::with_options(api_key, ClientOptions::default())
    }

    pub fn with_options(
        api_key: impl Into<String>,
        mut options: ClientOptions,
    ) -> Result<Self, GoogleWeatherError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GoogleWeatherError::InvalidArgument("API key must not be empty".into()));
        }

        options.base_url = options.base_url.trim_end_matches('/').to_string();

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout)
            .build()
            .map_err(GoogleWeatherError::Connection)?;

        Ok(Self { api_key, options, http })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Current conditions at `location`.
    #[instrument(skip(self, location), fields(location = %location))]
    pub async fn current_conditions(
        &self,
        location: &Coordinates,
    ) -> Result<CurrentConditionsResponse, GoogleWeatherError> {
        self.get(CURRENT_CONDITIONS, location, Vec::new()).await
    }

    /// Up to `hours` hourly records, fetched as a single page.
    #[instrument(skip(self, location), fields(location = %location))]
    pub async fn hourly_forecast(
        &self,
        location: &Coordinates,
        hours: u16,
    ) -> Result<HourlyForecastResponse, GoogleWeatherError> {
        self.hourly_forecast_page(location, hours, hours, None).await
    }

    /// One page of the hourly forecast. Pass the previous response's
    /// `next_page_token` to continue.
    #[instrument(skip(self, location, page_token), fields(location = %location))]
    pub async fn hourly_forecast_page(
        &self,
        location: &Coordinates,
        hours: u16,
        page_size: u16,
        page_token: Option<&str>,
    ) -> Result<HourlyForecastResponse, GoogleWeatherError> {
        check_range("hours", hours.into(), 1, MAX_FORECAST_HOURS.into())?;
        check_range("page_size", page_size.into(), 1, MAX_FORECAST_HOURS.into())?;

        let params = paged(hours.to_string(), "hours", page_size.to_string(), page_token);
        self.get(FORECAST_HOURS, location, params).await
    }

    /// Up to `days` daily records, fetched as a single page.
    #[instrument(skip(self, location), fields(location = %location))]
    pub async fn daily_forecast(
        &self,
        location: &Coordinates,
        days: u8,
    ) -> Result<DailyForecastResponse, GoogleWeatherError> {
        self.daily_forecast_page(location, days, days, None).await
    }

    #[instrument(skip(self, location, page_token), fields(location = %location))]
    pub async fn daily_forecast_page(
        &self,
        location: &Coordinates,
        days: u8,
        page_size: u8,
        page_token: Option<&str>,
    ) -> Result<DailyForecastResponse, GoogleWeatherError> {
        check_range("days", days.into(), 1, MAX_FORECAST_DAYS.into())?;
        check_range("page_size", page_size.into(), 1, MAX_FORECAST_DAYS.into())?;

        let params = paged(days.to_string(), "days", page_size.to_string(), page_token);
        self.get(FORECAST_DAYS, location, params).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        location: &Coordinates,
        extra: Vec<(&'static str, String)>,
    ) -> Result<T, GoogleWeatherError> {
        let url = format!("{}/{endpoint}", self.options.base_url);

        let mut params = extra;
        params.extend([
            ("language_code", self.options.language_code.clone()),
            ("units_system", self.options.units_system.as_str().to_string()),
            ("location.latitude", location.latitude().to_string()),
            ("location.longitude", location.longitude().to_string()),
        ]);
        debug!(%url, ?params, "GET");

        let mut request = self
            .http
            .get(&url)
            .query(&params)
            .query(&[("key", self.api_key.as_str())]);
        if let Some(referrer) = &self.options.referrer {
            request = request.header(header::REFERER, referrer);
        }

        let response = request.send().await.map_err(GoogleWeatherError::Connection)?;
        let status = response.status();
        let body = response.text().await.map_err(GoogleWeatherError::Connection)?;
        debug!(status = status.as_u16(), %url, "response");

        if !status.is_success() {
            return Err(GoogleWeatherError::Response {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(GoogleWeatherError::Decode)
    }
}

fn paged(
    count: String,
    count_name: &'static str,
    page_size: String,
    page_token: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![(count_name, count), ("page_size", page_size)];
    if let Some(token) = page_token {
        params.push(("page_token", token.to_string()));
    }
    params
}

fn check_range(name: &str, value: u32, min: u32, max: u32) -> Result<(), GoogleWeatherError> {
    if !(min..=max).contains(&value) {
        return Err(GoogleWeatherError::InvalidArgument(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, "https://weather.googleapis.com/v1");
        assert_eq!(options.language_code, "en");
        assert_eq!(options.units_system, UnitsSystem::Metric);
        assert_eq!(options.referrer, None);
        assert_eq!(options.timeout, Duration::from_secs(10));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let options = ClientOptions { base_url: "http://localhost:8080/v1/".into(), ..Default::default() };
        let client = GoogleWeatherApi::with_options("KEY", options).expect("client");
        assert_eq!(client.options().base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = GoogleWeatherApi::new("  ").unwrap_err();
        assert!(matches!(err, GoogleWeatherError::InvalidArgument(_)));
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = GoogleWeatherApi::new("SECRET_KEY").expect("client");
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("SECRET_KEY"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn check_range_bounds() {
        assert!(check_range("hours", 1, 1, 240).is_ok());
        assert!(check_range("hours", 240, 1, 240).is_ok());

        let err = check_range("hours", 0, 1, 240).unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: hours must be between 1 and 240, got 0");
        assert!(check_range("days", 11, 1, 10).is_err());
    }

    #[test]
    fn paged_params_include_token_only_when_given() {
        let params = paged("48".into(), "hours", "24".into(), None);
        assert_eq!(params, vec![("hours", "48".to_string()), ("page_size", "24".to_string())]);

        let params = paged("10".into(), "days", "5".into(), Some("abc"));
        assert_eq!(params.last(), Some(&("page_token", "abc".to_string())));
    }
}
