//! Async client library for the Google Weather API.
//!
//! This crate defines:
//! - `GoogleWeatherApi`, the HTTP client for the lookup endpoints
//! - Typed response records (current conditions, hourly and daily forecasts)
//! - Configuration & credentials handling for the `gweather` CLI
//!
//! It is used by `google-weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod source;
pub mod units;

pub use client::{ClientOptions, GoogleWeatherApi};
pub use config::Config;
pub use error::GoogleWeatherError;
pub use location::Coordinates;
pub use source::{WeatherSource, source_from_config};
pub use units::UnitsSystem;
