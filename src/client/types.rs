use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Location;

/// Body of the satellites-above endpoint. A missing list means nothing is overhead.
#[derive(Debug, Deserialize)]
pub struct AboveResponse {
    #[serde(default)]
    pub above: Vec<SatelliteSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteSummary {
    #[serde(rename = "satid")]
    pub id: u32,
    #[serde(rename = "satname")]
    pub name: String,
    #[serde(rename = "satalt", default)]
    pub altitude_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct PassesResponse {
    #[serde(default)]
    pub passes: Vec<PassPrediction>,
}

/// A predicted pass; epoch seconds as reported by the tracking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassPrediction {
    #[serde(rename = "startUTC")]
    pub start_utc: i64,
    #[serde(rename = "endUTC", default)]
    pub end_utc: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(rename = "maxEl")]
    pub max_elevation_deg: f64,
}

impl PassPrediction {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.start_utc, 0)
    }

    pub fn duration_seconds(&self) -> i64 {
        self.duration
            .or_else(|| self.end_utc.map(|end| end - self.start_utc))
            .unwrap_or(0)
            .max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub condition_text: String,
    pub temperature_c: f64,
    pub wind_speed_mps: f64,
    pub humidity_pct: f64,
    pub visibility_km: Option<f64>,
}

/// Current-weather body as relayed by the gateway.
#[derive(Debug, Deserialize)]
pub struct WeatherBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub main: WeatherMain,
    #[serde(default)]
    pub wind: Option<WeatherWind>,
    /// Metres.
    #[serde(default)]
    pub visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct WeatherWind {
    pub speed: f64,
}

impl From<WeatherBody> for WeatherSnapshot {
    fn from(body: WeatherBody) -> Self {
        WeatherSnapshot {
            location_name: body.name,
            condition_text: body
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_default(),
            temperature_c: body.main.temp,
            wind_speed_mps: body.wind.map(|w| w.speed).unwrap_or(0.0),
            humidity_pct: body.main.humidity,
            visibility_km: body.visibility.map(|m| m / 1000.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    pub common_name: String,
    pub flag_glyph: String,
    pub capital: Option<Location>,
    pub centroid: Option<Location>,
    pub population: u64,
    pub area_km2: Option<f64>,
}

impl CountryRecord {
    /// The capital when known, else the country centroid.
    pub fn display_location(&self) -> Option<Location> {
        self.capital.or(self.centroid)
    }
}

/// One entry of the country-lookup service's name search.
#[derive(Debug, Deserialize)]
pub struct CountryBody {
    pub name: CountryName,
    #[serde(default)]
    pub flag: String,
    #[serde(rename = "capitalInfo", default)]
    pub capital_info: Option<CapitalInfo>,
    #[serde(default)]
    pub latlng: Vec<f64>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CountryName {
    pub common: String,
}

#[derive(Debug, Deserialize)]
pub struct CapitalInfo {
    #[serde(default)]
    pub latlng: Vec<f64>,
}

impl From<CountryBody> for CountryRecord {
    fn from(body: CountryBody) -> Self {
        CountryRecord {
            common_name: body.name.common,
            flag_glyph: body.flag,
            capital: body
                .capital_info
                .and_then(|c| Location::from_pair(&c.latlng)),
            centroid: Location::from_pair(&body.latlng),
            population: body.population,
            area_km2: body.area,
        }
    }
}
