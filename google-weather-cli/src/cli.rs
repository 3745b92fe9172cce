use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use google_weather_core::{
    Config, Coordinates, UnitsSystem, WeatherSource,
    client::{DEFAULT_FORECAST_DAYS, DEFAULT_FORECAST_HOURS, MAX_FORECAST_DAYS, MAX_FORECAST_HOURS},
    source_from_config,
};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tracing::info;

use crate::display;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "gweather", version, about = "Google Weather API client")]
pub struct Cli {
    /// API key; overrides the configured one.
    #[arg(long, env = "GOOGLE_WEATHER_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// METRIC or IMPERIAL.
    #[arg(long, global = true)]
    pub units: Option<UnitsSystem>,

    /// Language code for descriptions, e.g. "en" or "de".
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// More logging (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively store the API key, language, units and default location.
    Configure,

    /// Show current conditions.
    Current {
        #[command(flatten)]
        target: Target,
    },

    /// Show the hourly forecast.
    Hourly {
        #[command(flatten)]
        target: Target,

        #[arg(long, default_value_t = DEFAULT_FORECAST_HOURS,
              value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_FORECAST_HOURS)))]
        hours: u16,
    },

    /// Show the daily forecast.
    Daily {
        #[command(flatten)]
        target: Target,

        #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS,
              value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_FORECAST_DAYS)))]
        days: u8,
    },
}

#[derive(Debug, Args)]
pub struct Target {
    /// LAT,LON; defaults to the configured location.
    #[arg(short, long, allow_hyphen_values = true)]
    pub location: Option<Coordinates>,

    /// Print the raw response as JSON.
    #[arg(long)]
    pub json: bool,
}

/// A lookup resolved against the config.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Lookup {
    Current,
    Hourly(u16),
    Daily(u8),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        let (lookup, target) = match self.command {
            Command::Configure => return configure(&mut config),
            Command::Current { target } => (Lookup::Current, target),
            Command::Hourly { target, hours } => (Lookup::Hourly(hours), target),
            Command::Daily { target, days } => (Lookup::Daily(days), target),
        };

        if let Some(units) = self.units {
            config.units_system = units;
        }
        if let Some(language) = self.language {
            config.language_code = language;
        }

        let location = config.resolve_location(target.location)?;
        let source = source_from_config(&config, self.api_key.as_deref())?;

        let output = execute(source.as_ref(), &location, lookup, target.json).await?;
        println!("{output}");

        Ok(())
    }
}

async fn execute(
    source: &dyn WeatherSource,
    location: &Coordinates,
    lookup: Lookup,
    json: bool,
) -> anyhow::Result<String> {
    info!(%location, ?lookup, "looking up weather");

    let output = match lookup {
        Lookup::Current => {
            let res = source
                .current_conditions(location)
                .await
                .context("Failed to fetch current conditions")?;
            if json { serde_json::to_string_pretty(&res)? } else { display::current_conditions(&res, location) }
        }
        Lookup::Hourly(hours) => {
            let res = source
                .hourly_forecast(location, hours)
                .await
                .context("Failed to fetch hourly forecast")?;
            if json { serde_json::to_string_pretty(&res)? } else { display::hourly_forecast(&res, location) }
        }
        Lookup::Daily(days) => {
            let res = source
                .daily_forecast(location, days)
                .await
                .context("Failed to fetch daily forecast")?;
            if json { serde_json::to_string_pretty(&res)? } else { display::daily_forecast(&res, location) }
        }
    };

    Ok(output)
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let help = if config.api_key.is_some() { "Leave empty to keep the current key" } else { "" };
    let api_key = Password::new("Google Weather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message(help)
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    } else if config.api_key.is_none() {
        anyhow::bail!("An API key is required");
    }

    let language = Text::new("Language code:").with_default(&config.language_code).prompt()?;
    config.language_code = language.trim().to_string();

    let units = UnitsSystem::all().to_vec();
    let cursor = units.iter().position(|u| *u == config.units_system).unwrap_or(0);
    config.units_system = Select::new("Units system:", units).with_starting_cursor(cursor).prompt()?;

    let current_location = config.location.map(|l| l.to_string()).unwrap_or_default();
    let location = Text::new("Default location (LAT,LON, empty for none):")
        .with_default(&current_location)
        .prompt()?;
    config.location = match location.trim() {
        "" => None,
        text => Some(text.parse::<Coordinates>()?),
    };

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use google_weather_core::{
        GoogleWeatherError,
        model::{CurrentConditionsResponse, DailyForecastResponse, HourlyForecastResponse},
    };

    /// Source that always fails, as if the API were down.
    #[derive(Debug)]
    struct Offline;

    fn down() -> GoogleWeatherError {
        GoogleWeatherError::Response { status: 503, message: "backend down".into() }
    }

    #[async_trait]
    impl WeatherSource for Offline {
        async fn current_conditions(
            &self,
            _location: &Coordinates,
        ) -> Result<CurrentConditionsResponse, GoogleWeatherError> {
            Err(down())
        }

        async fn hourly_forecast(
            &self,
            _location: &Coordinates,
            _hours: u16,
        ) -> Result<HourlyForecastResponse, GoogleWeatherError> {
            Err(down())
        }

        async fn daily_forecast(
            &self,
            _location: &Coordinates,
            _days: u8,
        ) -> Result<DailyForecastResponse, GoogleWeatherError> {
            Err(down())
        }
    }

    #[tokio::test]
    async fn execute_adds_context_to_source_errors() {
        let location = Coordinates::new(52.52, 13.405).unwrap();
        let err = execute(&Offline, &location, Lookup::Daily(3), false).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch daily forecast");
        assert!(format!("{err:#}").contains("HTTP 503: backend down"));
    }

    #[test]
    fn parses_hourly_with_negative_location() {
        let cli = Cli::try_parse_from([
            "gweather", "hourly", "--location", "-33.86,151.21", "--hours", "12", "--units", "imperial",
        ])
        .expect("should parse");

        assert_eq!(cli.units, Some(UnitsSystem::Imperial));
        match cli.command {
            Command::Hourly { target, hours } => {
                assert_eq!(hours, 12);
                assert_eq!(target.location, Some(Coordinates::new(-33.86, 151.21).unwrap()));
                assert!(!target.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn forecast_defaults() {
        let cli = Cli::try_parse_from(["gweather", "daily"]).expect("should parse");
        match cli.command {
            Command::Daily { days, target } => {
                assert_eq!(days, DEFAULT_FORECAST_DAYS);
                assert_eq!(target.location, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_counts() {
        assert!(Cli::try_parse_from(["gweather", "hourly", "--hours", "0"]).is_err());
        assert!(Cli::try_parse_from(["gweather", "hourly", "--hours", "241"]).is_err());
        assert!(Cli::try_parse_from(["gweather", "daily", "--days", "11"]).is_err());
    }

    #[test]
    fn rejects_bad_location() {
        assert!(Cli::try_parse_from(["gweather", "current", "-l", "paris"]).is_err());
        assert!(Cli::try_parse_from(["gweather", "current", "-l", "95,0"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["gweather", "-vv", "current"]).expect("should parse");
        assert_eq!(cli.verbose, 2);
    }
}
