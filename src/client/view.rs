//! Render targets owned by a map session.

use axum::body::Bytes;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::geo::{BoundingBox, Location};

use super::types::{SatelliteSummary, WeatherSnapshot};

pub const DEFAULT_ZOOM: u8 = 3;
pub const LOCATED_ZOOM: u8 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Location,
    pub zoom: u8,
    /// Set when the view was fitted to an area rather than centred on a point.
    pub bounds: Option<BoundingBox>,
}

impl Viewport {
    pub fn centered(center: Location, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            bounds: None,
        }
    }

    pub fn fitted(bounds: BoundingBox) -> Self {
        let center = Location {
            latitude: (bounds.south_west.latitude + bounds.north_east.latitude) / 2.0,
            longitude: (bounds.south_west.longitude + bounds.north_east.longitude) / 2.0,
        };
        Self {
            center,
            zoom: LOCATED_ZOOM,
            bounds: Some(bounds),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MarkerKind {
    /// Pulsing marker at the device position.
    Observer,
    Satellite { id: u32 },
    ArcStart,
    ArcEnd,
    Flag { glyph: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
}

impl fmt::Display for Popup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for line in &self.lines {
            write!(f, "\n  {}", line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Location,
    pub popup: Option<Popup>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum Panel {
    #[default]
    Hidden,
    /// The scan succeeded but nothing is overhead.
    NoSatellites,
    SatelliteList(Vec<SatelliteSummary>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient, dismissible message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherPanel {
    pub snapshot: WeatherSnapshot,
    pub lines: Vec<String>,
}

/// A locally held image, addressed by handle rather than by upstream URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    pub id: Uuid,
    pub content_type: String,
    pub bytes: Bytes,
}

/// The single displayed image. Replacing it hands back the old handle so the
/// caller can release it.
#[derive(Debug, Default)]
pub struct ImageSlot {
    current: Option<ImageHandle>,
}

impl ImageSlot {
    pub fn current(&self) -> Option<&ImageHandle> {
        self.current.as_ref()
    }

    pub fn replace(&mut self, content_type: String, bytes: Bytes) -> Option<ImageHandle> {
        self.current.replace(ImageHandle {
            id: Uuid::new_v4(),
            content_type,
            bytes,
        })
    }
}
