use std::f64::consts::PI;
use strum_macros::Display;

use crate::geo::Location;

use super::types::{CountryRecord, PassPrediction, WeatherSnapshot};
use super::view::Popup;

const ARC_POINTS: usize = 32;
const ARC_HALF_WIDTH_DEG: f64 = 20.0;
const ARC_HEIGHT_DEG: f64 = 10.0;

/// Qualitative naked-eye rating of a pass from its peak elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
    Excellent,
    Good,
    Fair,
}

impl Visibility {
    pub fn from_elevation(max_elevation_deg: f64) -> Self {
        if max_elevation_deg > 30.0 {
            Visibility::Excellent
        } else if max_elevation_deg > 15.0 {
            Visibility::Good
        } else {
            Visibility::Fair
        }
    }
}

pub fn pass_popup(norad_id: u32, name: Option<&str>, pass: &PassPrediction) -> Popup {
    let title = match name {
        Some(name) => format!("{} (NORAD {})", name, norad_id),
        None => format!("NORAD {}", norad_id),
    };
    let start = pass
        .start_time()
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    Popup {
        title,
        lines: vec![
            format!("Next pass: {}", start),
            format!("Duration: {}", format_duration(pass.duration_seconds())),
            format!("Max elevation: {:.1}°", pass.max_elevation_deg),
            format!(
                "Visibility: {}",
                Visibility::from_elevation(pass.max_elevation_deg)
            ),
        ],
    }
}

pub fn format_duration(seconds: i64) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if minutes == 0 {
        format!("{}s", rest)
    } else {
        format!("{}m {}s", minutes, rest)
    }
}

/// Decorative curve through the observer's area. Not an orbital ground track.
pub fn illustrative_arc(center: Location) -> Vec<Location> {
    (0..ARC_POINTS)
        .map(|i| {
            let t = i as f64 / (ARC_POINTS - 1) as f64;
            let longitude = center.longitude + ARC_HALF_WIDTH_DEG * (2.0 * t - 1.0);
            let latitude =
                center.latitude + ARC_HEIGHT_DEG * (PI * t).sin() - ARC_HEIGHT_DEG / 2.0;
            Location {
                latitude: latitude.clamp(-90.0, 90.0),
                longitude: (longitude + 180.0).rem_euclid(360.0) - 180.0,
            }
        })
        .collect()
}

pub fn weather_lines(snapshot: &WeatherSnapshot) -> Vec<String> {
    let visibility = snapshot
        .visibility_km
        .map(|km| format!("{:.1} km", km))
        .unwrap_or_else(|| "unknown".to_string());
    vec![
        format!("Temperature: {:.1} °C", snapshot.temperature_c),
        format!("Conditions: {}", snapshot.condition_text),
        format!("Wind: {:.1} m/s", snapshot.wind_speed_mps),
        format!("Humidity: {:.0}%", snapshot.humidity_pct),
        format!("Visibility: {}", visibility),
    ]
}

pub fn country_popup(record: &CountryRecord) -> Popup {
    let area = record
        .area_km2
        .map(|a| format!("{} km²", group_thousands(a.round() as u64)))
        .unwrap_or_else(|| "unknown".to_string());
    Popup {
        title: format!("{} {}", record.flag_glyph, record.common_name)
            .trim()
            .to_string(),
        lines: vec![
            format!("Population: {}", group_thousands(record.population)),
            format!("Area: {}", area),
        ],
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
