//! Response records of the Weather API.
//!
//! Field names are camelCase on the wire and enum values UPPER_SNAKE_CASE;
//! everything here maps them one to one. Timestamps are RFC 3339 in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirPressure {
    pub mean_sea_level_millibars: f64,
}

/// A time interval, start inclusive and end exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

/// IANA time zone, e.g. `America/New_York`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeZone {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: String,
    /// BCP-47 code, e.g. `en-US`.
    pub language_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemperatureUnit {
    TemperatureUnitUnspecified,
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub degrees: f64,
    pub unit: TemperatureUnit,
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::TemperatureUnitUnspecified => "°",
        };
        write!(f, "{:.1}{suffix}", self.degrees)
    }
}

/// Unit of accumulated precipitation and of ice thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LengthUnit {
    UnitUnspecified,
    Millimeters,
    Inches,
}

impl LengthUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Millimeters => "mm",
            LengthUnit::Inches => "in",
            LengthUnit::UnitUnspecified => "",
        }
    }
}

/// Expected amount of melted precipitation (liquid water equivalent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitativePrecipitationForecast {
    pub quantity: f64,
    pub unit: LengthUnit,
}

impl fmt::Display for QuantitativePrecipitationForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {}", self.quantity, self.unit.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrecipitationType {
    PrecipitationTypeUnspecified,
    #[serde(rename = "NONE")]
    NoPrecipitation,
    Snow,
    Rain,
    LightRain,
    HeavyRain,
    RainAndSnow,
    Sleet,
    FreezingRain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationProbability {
    #[serde(rename = "type")]
    pub kind: PrecipitationType,
    /// 0 to 100.
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Precipitation {
    pub probability: PrecipitationProbability,
    pub qpf: QuantitativePrecipitationForecast,
    /// Snow accumulation as liquid water equivalent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow_qpf: Option<QuantitativePrecipitationForecast>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeedUnit {
    SpeedUnitUnspecified,
    KilometersPerHour,
    MilesPerHour,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindSpeed {
    pub value: f64,
    pub unit: SpeedUnit,
}

impl fmt::Display for WindSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            SpeedUnit::KilometersPerHour => " km/h",
            SpeedUnit::MilesPerHour => " mph",
            SpeedUnit::SpeedUnitUnspecified => "",
        };
        write!(f, "{:.0}{suffix}", self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardinalDirection {
    CardinalDirectionUnspecified,
    North,
    NorthNortheast,
    Northeast,
    EastNortheast,
    East,
    EastSoutheast,
    Southeast,
    SouthSoutheast,
    South,
    SouthSouthwest,
    Southwest,
    WestSouthwest,
    West,
    WestNorthwest,
    Northwest,
    NorthNorthwest,
}

impl CardinalDirection {
    /// Compass abbreviation, e.g. `NNE`.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::CardinalDirectionUnspecified => "-",
            Self::North => "N",
            Self::NorthNortheast => "NNE",
            Self::Northeast => "NE",
            Self::EastNortheast => "ENE",
            Self::East => "E",
            Self::EastSoutheast => "ESE",
            Self::Southeast => "SE",
            Self::SouthSoutheast => "SSE",
            Self::South => "S",
            Self::SouthSouthwest => "SSW",
            Self::Southwest => "SW",
            Self::WestSouthwest => "WSW",
            Self::West => "W",
            Self::WestNorthwest => "WNW",
            Self::Northwest => "NW",
            Self::NorthNorthwest => "NNW",
        }
    }
}

/// Direction the wind is coming from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindDirection {
    /// 0 to 360.
    pub degrees: u16,
    pub cardinal: CardinalDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub direction: WindDirection,
    pub speed: WindSpeed,
    pub gust: WindSpeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistanceUnit {
    UnitUnspecified,
    Kilometers,
    Miles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    pub distance: f64,
    pub unit: DistanceUnit,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            DistanceUnit::Kilometers => " km",
            DistanceUnit::Miles => " mi",
            DistanceUnit::UnitUnspecified => "",
        };
        write!(f, "{:.0}{suffix}", self.distance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherConditionType {
    TypeUnspecified,
    Clear,
    MostlyClear,
    PartlyCloudy,
    MostlyCloudy,
    Cloudy,
    Windy,
    WindAndRain,
    LightRainShowers,
    ChanceOfShowers,
    ScatteredShowers,
    RainShowers,
    HeavyRainShowers,
    LightToModerateRain,
    ModerateToHeavyRain,
    Rain,
    LightRain,
    HeavyRain,
    RainPeriodicallyHeavy,
    LightSnowShowers,
    ChanceOfSnowShowers,
    ScatteredSnowShowers,
    SnowShowers,
    HeavySnowShowers,
    LightToModerateSnow,
    ModerateToHeavySnow,
    Snow,
    LightSnow,
    HeavySnow,
    Snowstorm,
    SnowPeriodicallyHeavy,
    HeavySnowStorm,
    BlowingSnow,
    RainAndSnow,
    Hail,
    HailShowers,
    Thunderstorm,
    Thundershower,
    LightThunderstormRain,
    ScatteredThunderstorms,
    HeavyThunderstorm,
}

/// Image format of a condition icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    Svg,
    Png,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherCondition {
    /// Icon URI without the file extension.
    pub icon_base_uri: String,
    pub description: LocalizedText,
    #[serde(rename = "type")]
    pub kind: WeatherConditionType,
}

impl WeatherCondition {
    /// Full icon URL; the dark-theme variant carries a `_dark` suffix.
    pub fn icon_url(&self, format: IconFormat, dark: bool) -> String {
        let theme = if dark { "_dark" } else { "" };
        let ext = match format {
            IconFormat::Svg => "svg",
            IconFormat::Png => "png",
        };
        format!("{}{theme}.{ext}", self.icon_base_uri)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceThickness {
    pub thickness: f64,
    pub unit: LengthUnit,
}

/// Changes in the current conditions over the last 24 hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditionsHistory {
    /// Current temperature minus the temperature 24 hours ago.
    pub temperature_change: Temperature,
    pub max_temperature: Temperature,
    pub min_temperature: Temperature,
    pub qpf: QuantitativePrecipitationForecast,
}

/// Body of `currentConditions:lookup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditionsResponse {
    pub current_time: DateTime<Utc>,
    pub time_zone: TimeZone,
    pub weather_condition: WeatherCondition,
    pub temperature: Temperature,
    pub feels_like_temperature: Temperature,
    pub dew_point: Temperature,
    pub heat_index: Temperature,
    pub wind_chill: Temperature,
    /// Probability, and amount accumulated over the last hour.
    pub precipitation: Precipitation,
    pub air_pressure: AirPressure,
    pub wind: Wind,
    pub visibility: Visibility,
    pub current_conditions_history: CurrentConditionsHistory,
    /// Between local sunrise (inclusive) and sunset (exclusive).
    pub is_daytime: bool,
    pub relative_humidity: u8,
    pub uv_index: u8,
    pub thunderstorm_probability: u8,
    pub cloud_cover: u8,
}

/// Whole or partial calendar date. Zero components mean "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    /// `None` for partial or impossible dates.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        if self.year == 0 || self.month == 0 || self.day == 0 {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Daytime or nighttime half of a [`ForecastDay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDayPart {
    pub interval: Interval,
    pub weather_condition: WeatherCondition,
    pub precipitation: Precipitation,
    /// Average direction, maximum speed and gust.
    pub wind: Wind,
    pub relative_humidity: u8,
    pub uv_index: u8,
    pub thunderstorm_probability: u8,
    pub cloud_cover: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_thickness: Option<IceThickness>,
}

/// Both times are unset in polar regions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SunEvents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoonPhase {
    MoonPhaseUnspecified,
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonEvents {
    pub moon_phase: MoonPhase,
    #[serde(default)]
    pub moonrise_times: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub moonset_times: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub interval: Interval,
    /// Local date in the location's time zone.
    pub display_date: Date,
    pub daytime_forecast: ForecastDayPart,
    pub nighttime_forecast: ForecastDayPart,
    pub max_temperature: Temperature,
    pub min_temperature: Temperature,
    pub feels_like_max_temperature: Temperature,
    pub feels_like_min_temperature: Temperature,
    pub max_heat_index: Temperature,
    pub sun_events: SunEvents,
    pub moon_events: MoonEvents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_thickness: Option<IceThickness>,
}

/// Body of `forecast/days:lookup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecastResponse {
    pub forecast_days: Vec<ForecastDay>,
    pub time_zone: TimeZone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Civil (local) time as the API reports it; every component is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CivilDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nanos: Option<u32>,
    /// e.g. `"-14400s"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<TimeZone>,
}

impl CivilDateTime {
    /// Needs a full date. Zero-valued time components are left off the wire,
    /// so a missing hour, minute, second or nano counts as zero.
    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        let date = Date { year: self.year?, month: self.month?, day: self.day? }.to_naive_date()?;
        date.and_hms_nano_opt(
            self.hours.unwrap_or(0),
            self.minutes.unwrap_or(0),
            self.seconds.unwrap_or(0),
            self.nanos.unwrap_or(0),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastHour {
    /// The one-hour UTC interval this record is valid for.
    pub interval: Interval,
    pub display_date_time: CivilDateTime,
    pub weather_condition: WeatherCondition,
    pub temperature: Temperature,
    pub feels_like_temperature: Temperature,
    pub dew_point: Temperature,
    pub heat_index: Temperature,
    pub wind_chill: Temperature,
    pub wet_bulb_temperature: Temperature,
    pub precipitation: Precipitation,
    pub air_pressure: AirPressure,
    pub wind: Wind,
    pub visibility: Visibility,
    pub is_daytime: bool,
    pub relative_humidity: u8,
    pub uv_index: u8,
    pub thunderstorm_probability: u8,
    pub cloud_cover: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_thickness: Option<IceThickness>,
}

/// Body of `forecast/hours:lookup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecastResponse {
    pub forecast_hours: Vec<ForecastHour>,
    pub time_zone: TimeZone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_current_conditions() {
        let parsed: CurrentConditionsResponse =
            serde_json::from_value(fixtures::current_conditions()).expect("should parse");

        assert_eq!(parsed.time_zone.id, "America/Los_Angeles");
        assert_eq!(parsed.weather_condition.kind, WeatherConditionType::MostlyCloudy);
        assert_eq!(parsed.temperature.unit, TemperatureUnit::Celsius);
        assert!((parsed.temperature.degrees - 13.7).abs() < f64::EPSILON);
        assert_eq!(parsed.wind.direction.cardinal, CardinalDirection::NorthNorthwest);
        assert_eq!(parsed.precipitation.probability.kind, PrecipitationType::Rain);
        assert_eq!(parsed.precipitation.snow_qpf, None);
        assert_eq!(parsed.relative_humidity, 42);
        assert!(!parsed.is_daytime);
    }

    #[test]
    fn deserializes_daily_forecast() {
        let parsed: DailyForecastResponse =
            serde_json::from_value(fixtures::daily_forecast()).expect("should parse");

        assert_eq!(parsed.forecast_days.len(), 1);
        let day = &parsed.forecast_days[0];
        assert_eq!(day.display_date.to_naive_date(), NaiveDate::from_ymd_opt(2025, 2, 10));
        assert_eq!(day.moon_events.moon_phase, MoonPhase::WaxingGibbous);
        assert_eq!(day.moon_events.moonrise_times.len(), 1);
        assert!(day.sun_events.sunrise_time.is_some());
        assert_eq!(day.ice_thickness, None);
        assert_eq!(parsed.next_page_token.as_deref(), Some("ChYKEgm8dJNPPCpCQBGOyjFy5P9ewBAF"));
    }

    #[test]
    fn deserializes_hourly_forecast() {
        let parsed: HourlyForecastResponse =
            serde_json::from_value(fixtures::hourly_forecast()).expect("should parse");

        let hour = &parsed.forecast_hours[0];
        let local = hour.display_date_time.to_naive_date_time().expect("full date and hour");
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2025-02-05 15:00");
        assert_eq!(hour.display_date_time.utc_offset.as_deref(), Some("-28800s"));
        assert_eq!(hour.ice_thickness.as_ref().map(|i| i.unit), Some(LengthUnit::Millimeters));
        assert_eq!(parsed.next_page_token, None);
    }

    #[test]
    fn polar_sun_events_are_optional() {
        let parsed: SunEvents = serde_json::from_str("{}").expect("should parse");
        assert_eq!(parsed, SunEvents::default());
    }

    #[test]
    fn no_precipitation_maps_to_none_on_the_wire() {
        let parsed: PrecipitationProbability =
            serde_json::from_str(r#"{"type": "NONE", "percent": 0}"#).expect("should parse");
        assert_eq!(parsed.kind, PrecipitationType::NoPrecipitation);

        let json = serde_json::to_value(&parsed).expect("should serialize");
        assert_eq!(json["type"], "NONE");
    }

    #[test]
    fn unknown_condition_type_is_rejected() {
        let res = serde_json::from_str::<WeatherConditionType>(r#""VOLCANIC_ASH""#);
        assert!(res.is_err());
    }

    #[test]
    fn partial_dates_have_no_naive_date() {
        assert_eq!(Date { year: 2025, month: 0, day: 0 }.to_naive_date(), None);
        assert_eq!(Date { year: 2025, month: 2, day: 30 }.to_naive_date(), None);
        assert_eq!(CivilDateTime::default().to_naive_date_time(), None);
    }

    #[test]
    fn local_midnight_without_hours_field() {
        let midnight: CivilDateTime = serde_json::from_str(
            r#"{"year": 2025, "month": 2, "day": 6, "utcOffset": "-28800s"}"#,
        )
        .expect("should parse");

        let local = midnight.to_naive_date_time().expect("date alone is enough");
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2025-02-06 00:00");
    }

    #[test]
    fn icon_url_variants() {
        let parsed: CurrentConditionsResponse =
            serde_json::from_value(fixtures::current_conditions()).expect("should parse");
        let condition = &parsed.weather_condition;

        assert_eq!(
            condition.icon_url(IconFormat::Svg, false),
            "https://maps.gstatic.com/weather/v1/mostly_cloudy.svg"
        );
        assert_eq!(
            condition.icon_url(IconFormat::Png, true),
            "https://maps.gstatic.com/weather/v1/mostly_cloudy_dark.png"
        );
    }

    #[test]
    fn display_units() {
        let t = Temperature { degrees: 21.34, unit: TemperatureUnit::Fahrenheit };
        assert_eq!(t.to_string(), "21.3°F");

        let w = WindSpeed { value: 12.0, unit: SpeedUnit::KilometersPerHour };
        assert_eq!(w.to_string(), "12 km/h");

        let v = Visibility { distance: 10.0, unit: DistanceUnit::Miles };
        assert_eq!(v.to_string(), "10 mi");

        let q = QuantitativePrecipitationForecast { quantity: 0.3, unit: LengthUnit::Inches };
        assert_eq!(q.to_string(), "0.3 in");

        assert_eq!(CardinalDirection::SouthSouthwest.abbreviation(), "SSW");
    }
}
