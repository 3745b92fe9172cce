//! Plain-text rendering of API responses.

use chrono::{DateTime, Utc};
use google_weather_core::{
    Coordinates,
    model::{CurrentConditionsResponse, DailyForecastResponse, HourlyForecastResponse, Wind},
};

fn utc_time(t: &DateTime<Utc>) -> String {
    t.format("%H:%M UTC").to_string()
}

fn wind(wind: &Wind) -> String {
    format!(
        "{} {} (gusts {})",
        wind.direction.cardinal.abbreviation(),
        wind.speed,
        wind.gust
    )
}

pub fn current_conditions(res: &CurrentConditionsResponse, location: &Coordinates) -> String {
    let history = &res.current_conditions_history;
    let lines = [
        format!("Current conditions at {location} ({})", res.time_zone.id),
        format!("  Observed:     {}", res.current_time.format("%Y-%m-%d %H:%M UTC")),
        format!("  Condition:    {}", res.weather_condition.description.text),
        format!(
            "  Temperature:  {} (feels like {})",
            res.temperature, res.feels_like_temperature
        ),
        format!(
            "  Last 24h:     {} .. {}, {} precipitation",
            history.min_temperature, history.max_temperature, history.qpf
        ),
        format!("  Humidity:     {}%", res.relative_humidity),
        format!("  Dew point:    {}", res.dew_point),
        format!("  Wind:         {}", wind(&res.wind)),
        format!(
            "  Rain chance:  {}% ({} last hour)",
            res.precipitation.probability.percent, res.precipitation.qpf
        ),
        format!("  Pressure:     {:.1} mb", res.air_pressure.mean_sea_level_millibars),
        format!("  Visibility:   {}", res.visibility),
        format!("  Cloud cover:  {}%", res.cloud_cover),
        format!("  UV index:     {}", res.uv_index),
    ];
    lines.join("\n")
}

pub fn hourly_forecast(res: &HourlyForecastResponse, location: &Coordinates) -> String {
    let mut lines = vec![format!(
        "Hourly forecast for {location} ({}), {} hours",
        res.time_zone.id,
        res.forecast_hours.len()
    )];

    for hour in &res.forecast_hours {
        let when = hour
            .display_date_time
            .to_naive_date_time()
            .map(|t| t.format("%a %H:%M").to_string())
            .unwrap_or_else(|| utc_time(&hour.interval.start_time));

        lines.push(format!(
            "  {when:<10} {:>8}  {:>3}% rain  {:<28} {}",
            hour.temperature.to_string(),
            hour.precipitation.probability.percent,
            wind(&hour.wind),
            hour.weather_condition.description.text
        ));
    }

    lines.join("\n")
}

pub fn daily_forecast(res: &DailyForecastResponse, location: &Coordinates) -> String {
    let mut lines = vec![format!(
        "Daily forecast for {location} ({}), {} days",
        res.time_zone.id,
        res.forecast_days.len()
    )];

    for day in &res.forecast_days {
        let date = day
            .display_date
            .to_naive_date()
            .map(|d| d.format("%a %d %b").to_string())
            .unwrap_or_else(|| day.interval.start_time.format("%Y-%m-%d").to_string());

        let sun = match (&day.sun_events.sunrise_time, &day.sun_events.sunset_time) {
            (Some(rise), Some(set)) => format!("sun {}-{}", utc_time(rise), utc_time(set)),
            _ => "no sunrise/sunset".to_string(),
        };

        lines.push(format!(
            "  {date:<10} {:>8} / {:<8} {:>3}% rain  {}  ({sun})",
            day.max_temperature.to_string(),
            day.min_temperature.to_string(),
            day.daytime_forecast.precipitation.probability.percent,
            day.daytime_forecast.weather_condition.description.text,
        ));
    }

    lines.join("\n")
}
