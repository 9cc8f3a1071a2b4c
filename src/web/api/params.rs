use serde::Deserialize;
use utoipa::IntoParams;

use crate::geo::Location;
use crate::web::api::error::ApiError;

/// Query parameters shared by every coordinate endpoint.
///
/// Fields are kept as raw strings so a missing or malformed value becomes a
/// JSON 400 instead of the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CoordinateQuery {
    /// Observer latitude in degrees, -90 to 90
    #[param(value_type = f64)]
    pub latitude: Option<String>,
    /// Observer longitude in degrees, -180 to 180
    #[param(value_type = f64)]
    pub longitude: Option<String>,
}

impl CoordinateQuery {
    pub fn location(&self) -> Result<Location, ApiError> {
        let latitude = parse_number("latitude", self.latitude.as_deref())?;
        let longitude = parse_number("longitude", self.longitude.as_deref())?;
        Location::new(latitude, longitude).map_err(|e| ApiError::Validation(e.to_string()))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct PassQuery {
    /// NORAD catalog number
    #[param(value_type = u32)]
    pub satellite_id: Option<String>,
    #[param(value_type = f64)]
    pub latitude: Option<String>,
    #[param(value_type = f64)]
    pub longitude: Option<String>,
}

impl PassQuery {
    pub fn satellite_id(&self) -> Result<u32, ApiError> {
        let raw = required("satelliteId", self.satellite_id.as_deref())?;
        raw.parse()
            .map_err(|_| ApiError::Validation(format!("invalid satelliteId: {raw:?}")))
    }

    pub fn location(&self) -> Result<Location, ApiError> {
        CoordinateQuery {
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
        }
        .location()
    }
}

fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, ApiError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!(
            "missing required parameter: {name}"
        ))),
    }
}

fn parse_number(name: &str, value: Option<&str>) -> Result<f64, ApiError> {
    let raw = required(name, value)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::Validation(format!("invalid {name}: {raw:?}")))
}
