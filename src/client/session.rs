use std::collections::HashMap;
use uuid::Uuid;

use crate::geo::{BoundingBox, Location};
use crate::upstream::ImagePayload;

use super::error::ClientError;
use super::render::{country_popup, illustrative_arc, pass_popup, weather_lines};
use super::types::{CountryRecord, PassPrediction, SatelliteSummary, WeatherSnapshot};
use super::view::{
    ImageHandle, ImageSlot, Marker, MarkerKind, Notice, NoticeLevel, Panel, Popup, Viewport,
    WeatherPanel, DEFAULT_ZOOM, LOCATED_ZOOM,
};

/// Half-width of the area shown around a country.
pub const COUNTRY_VIEW_HALF_SPAN_DEG: f64 = 5.0;

const FALLBACK_IMAGE_TYPE: &str = "application/octet-stream";

/// Parts of the view that a single action overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    /// Current location and viewport centre.
    Location,
    /// Marker and overlay layers.
    Map,
    Panel,
    Weather,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    target: RenderTarget,
    seq: u64,
}

/// Outcome of handing a response to the session.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    Applied,
    /// A newer action on the same target had already rendered.
    Superseded,
}

impl Render {
    pub fn is_applied(self) -> bool {
        self == Render::Applied
    }
}

#[derive(Debug)]
pub struct MapSession {
    location: Location,
    viewport: Viewport,
    markers: Vec<Marker>,
    overlay: Vec<Location>,
    panel: Panel,
    weather: Option<WeatherPanel>,
    image: ImageSlot,
    notices: Vec<Notice>,
    status: String,
    issued: HashMap<RenderTarget, u64>,
    rendered: HashMap<RenderTarget, u64>,
}

impl Default for MapSession {
    fn default() -> Self {
        Self::new(Location::default())
    }
}

impl MapSession {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            viewport: Viewport::centered(location, DEFAULT_ZOOM),
            markers: Vec::new(),
            overlay: Vec::new(),
            panel: Panel::Hidden,
            weather: None,
            image: ImageSlot::default(),
            notices: Vec::new(),
            status: String::new(),
            issued: HashMap::new(),
            rendered: HashMap::new(),
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn overlay(&self) -> &[Location] {
        &self.overlay
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn weather(&self) -> Option<&WeatherPanel> {
        self.weather.as_ref()
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.current()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Issues the next ticket for `target`.
    pub fn begin(&mut self, target: RenderTarget) -> Ticket {
        let seq = self.issued.entry(target).or_insert(0);
        *seq += 1;
        Ticket { target, seq: *seq }
    }

    /// A ticket goes stale once an action issued after it has rendered the
    /// same target. Actions that fail never render, so they supersede nothing.
    pub fn is_stale(&self, ticket: Ticket) -> bool {
        self.rendered
            .get(&ticket.target)
            .is_some_and(|&seq| seq > ticket.seq)
    }

    fn accept(&mut self, ticket: Ticket, what: &str) -> bool {
        if self.is_stale(ticket) {
            log::debug!("Dropping stale {} response (ticket {})", what, ticket.seq);
            return false;
        }
        self.rendered.insert(ticket.target, ticket.seq);
        true
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    fn move_to(&mut self, location: Location) {
        self.location = location;
        self.viewport = Viewport::centered(location, LOCATED_ZOOM);
        self.status = format!("Location: {}", location.format_coordinates());
    }

    /// Moves to a typed-in position.
    pub fn apply_location(&mut self, ticket: Ticket, location: Location) -> Render {
        if !self.accept(ticket, "location") {
            return Render::Superseded;
        }
        self.move_to(location);
        Render::Applied
    }

    /// Moves to the device position. The observer marker is only drawn when no
    /// newer marker layer has rendered since the position was requested.
    pub fn apply_located(&mut self, place: Ticket, marker: Ticket, location: Location) -> Render {
        if !self.accept(place, "position") {
            return Render::Superseded;
        }
        self.move_to(location);
        if self.accept(marker, "observer marker") {
            self.markers.clear();
            self.overlay.clear();
            self.markers.push(Marker {
                kind: MarkerKind::Observer,
                position: location,
                popup: Some(Popup {
                    title: "You are here".to_string(),
                    lines: vec![location.format_coordinates()],
                }),
            });
        }
        Render::Applied
    }

    pub fn apply_above(&mut self, ticket: Ticket, satellites: Vec<SatelliteSummary>) -> Render {
        if !self.accept(ticket, "satellites-above") {
            return Render::Superseded;
        }
        self.panel = if satellites.is_empty() {
            Panel::NoSatellites
        } else {
            Panel::SatelliteList(satellites)
        };
        Render::Applied
    }

    pub fn select_satellite(&self, index: usize) -> Result<&SatelliteSummary, ClientError> {
        match &self.panel {
            Panel::SatelliteList(list) => list.get(index).ok_or(ClientError::NoSuchEntry(index)),
            _ => Err(ClientError::NoSuchEntry(index)),
        }
    }

    fn satellite_name(&self, norad_id: u32) -> Option<String> {
        match &self.panel {
            Panel::SatelliteList(list) => list
                .iter()
                .find(|s| s.id == norad_id)
                .map(|s| s.name.clone()),
            _ => None,
        }
    }

    /// Renders the first predicted pass. An empty list is a render error.
    pub fn apply_passes(
        &mut self,
        ticket: Ticket,
        norad_id: u32,
        passes: &[PassPrediction],
    ) -> Result<Render, ClientError> {
        if self.is_stale(ticket) {
            log::debug!("Dropping stale satellite-passes response (ticket {})", ticket.seq);
            return Ok(Render::Superseded);
        }
        let pass = passes.first().ok_or(ClientError::NoPasses(norad_id))?;
        self.rendered.insert(ticket.target, ticket.seq);

        let name = self.satellite_name(norad_id);
        let arc = illustrative_arc(self.location);

        self.markers.clear();
        self.markers.push(Marker {
            kind: MarkerKind::Satellite { id: norad_id },
            position: self.location,
            popup: Some(pass_popup(norad_id, name.as_deref(), pass)),
        });
        if let (Some(first), Some(last)) = (arc.first(), arc.last()) {
            self.markers.push(Marker {
                kind: MarkerKind::ArcStart,
                position: *first,
                popup: None,
            });
            self.markers.push(Marker {
                kind: MarkerKind::ArcEnd,
                position: *last,
                popup: None,
            });
        }
        self.overlay = arc;
        Ok(Render::Applied)
    }

    /// Shows a new image; the displaced handle is released.
    pub fn apply_image(&mut self, ticket: Ticket, image: ImagePayload) -> Render {
        if !self.accept(ticket, "earth-image") {
            return Render::Superseded;
        }
        let content_type = image
            .content_type
            .unwrap_or_else(|| FALLBACK_IMAGE_TYPE.to_string());
        if let Some(old) = self.image.replace(content_type, image.bytes) {
            log::debug!("Released image handle {}", old.id);
        }
        Render::Applied
    }

    pub fn apply_weather(&mut self, ticket: Ticket, snapshot: WeatherSnapshot) -> Render {
        if !self.accept(ticket, "weather") {
            return Render::Superseded;
        }
        let lines = weather_lines(&snapshot);
        self.weather = Some(WeatherPanel { snapshot, lines });
        Render::Applied
    }

    /// Centres on a looked-up country and drops its flag marker there.
    pub fn apply_country(
        &mut self,
        place: Ticket,
        marker: Ticket,
        record: &CountryRecord,
    ) -> Result<Render, ClientError> {
        if self.is_stale(place) && self.is_stale(marker) {
            log::debug!("Dropping stale country response (ticket {})", place.seq);
            return Ok(Render::Superseded);
        }
        let position = record
            .display_location()
            .ok_or_else(|| ClientError::MissingCoordinates(record.common_name.clone()))?;

        let mut render = Render::Superseded;
        if self.accept(place, "country location") {
            self.location = position;
            self.viewport =
                Viewport::fitted(BoundingBox::around(position, COUNTRY_VIEW_HALF_SPAN_DEG));
            self.status = format!(
                "Location: {} ({})",
                position.format_coordinates(),
                record.common_name
            );
            render = Render::Applied;
        }
        if self.accept(marker, "country marker") {
            self.markers.clear();
            self.overlay.clear();
            self.markers.push(Marker {
                kind: MarkerKind::Flag {
                    glyph: record.flag_glyph.clone(),
                },
                position,
                popup: Some(country_popup(record)),
            });
            render = Render::Applied;
        }
        Ok(render)
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) -> Uuid {
        let notice = Notice {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
        };
        let id = notice.id;
        self.notices.push(notice);
        id
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }
}
