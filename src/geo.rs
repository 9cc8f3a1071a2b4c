use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_LATITUDE_DEG: f64 = 90.0;
pub const MAX_LONGITUDE_DEG: f64 = 180.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    #[error("expected \"latitude,longitude\", got {0:?}")]
    Format(String),
}

/// A point on the ground, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !(-MAX_LATITUDE_DEG..=MAX_LATITUDE_DEG).contains(&latitude) {
            return Err(LocationError::Latitude(latitude));
        }
        if !(-MAX_LONGITUDE_DEG..=MAX_LONGITUDE_DEG).contains(&longitude) {
            return Err(LocationError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses `"lat,lon"`, e.g. `"48.8566, 2.3522"`.
    pub fn from_coordinates(coordinates: &str) -> Result<Self, LocationError> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(LocationError::Format(coordinates.to_string()));
        }
        let lat = parts[0]
            .parse()
            .map_err(|_| LocationError::Format(coordinates.to_string()))?;
        let lon = parts[1]
            .parse()
            .map_err(|_| LocationError::Format(coordinates.to_string()))?;
        Self::new(lat, lon)
    }

    /// Builds a location from a `[lat, lng]` pair as returned by lookup services.
    pub fn from_pair(pair: &[f64]) -> Option<Self> {
        match pair {
            [lat, lon, ..] => Self::new(*lat, *lon).ok(),
            _ => None,
        }
    }

    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub south_west: Location,
    pub north_east: Location,
}

impl BoundingBox {
    /// A box extending `half_span_deg` in every direction, clamped to valid coordinates.
    pub fn around(center: Location, half_span_deg: f64) -> Self {
        let clamp_lat = |v: f64| v.clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG);
        let clamp_lon = |v: f64| v.clamp(-MAX_LONGITUDE_DEG, MAX_LONGITUDE_DEG);
        Self {
            south_west: Location {
                latitude: clamp_lat(center.latitude - half_span_deg),
                longitude: clamp_lon(center.longitude - half_span_deg),
            },
            north_east: Location {
                latitude: clamp_lat(center.latitude + half_span_deg),
                longitude: clamp_lon(center.longitude + half_span_deg),
            },
        }
    }

    pub fn contains(&self, point: Location) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_string() {
        let loc = Location::from_coordinates("48.8566, 2.3522").unwrap();
        assert_eq!(loc.latitude, 48.8566);
        assert_eq!(loc.longitude, 2.3522);
    }

    #[test]
    fn rejects_out_of_range_and_malformed_input() {
        assert_eq!(
            Location::new(91.0, 0.0),
            Err(LocationError::Latitude(91.0))
        );
        assert_eq!(
            Location::new(0.0, -180.5),
            Err(LocationError::Longitude(-180.5))
        );
        assert!(matches!(
            Location::from_coordinates("48.8"),
            Err(LocationError::Format(_))
        ));
        assert!(matches!(
            Location::from_coordinates("north,east"),
            Err(LocationError::Format(_))
        ));
    }

    #[test]
    fn pair_needs_two_valid_values() {
        assert_eq!(
            Location::from_pair(&[-33.45, -70.66]),
            Some(Location {
                latitude: -33.45,
                longitude: -70.66
            })
        );
        assert_eq!(Location::from_pair(&[10.0]), None);
        assert_eq!(Location::from_pair(&[120.0, 0.0]), None);
    }

    #[test]
    fn bounding_box_is_clamped_at_the_poles() {
        let bbox = BoundingBox::around(Location::new(88.0, 179.0).unwrap(), 5.0);
        assert_eq!(bbox.north_east.latitude, 90.0);
        assert_eq!(bbox.north_east.longitude, 180.0);
        assert_eq!(bbox.south_west.latitude, 83.0);
        assert!(bbox.contains(Location::new(88.0, 179.0).unwrap()));
    }
}
