use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::geo::Location;

use super::error::ClientError;
use super::gateway::GatewayClient;
use super::geolocation::{GeolocationError, PositionSource};
use super::session::{MapSession, Render, RenderTarget};
use super::view::NoticeLevel;

/// Drives a [`MapSession`] from user actions.
///
/// Each action reads the current location, makes one network call with the
/// session unlocked, then renders unless an action issued later has already
/// rendered the same part of the view. Failures become dismissible notices and
/// are also returned to the caller. Nothing is retried.
#[derive(Clone)]
pub struct MapClient {
    session: Arc<Mutex<MapSession>>,
    gateway: GatewayClient,
    locate_timeout: Duration,
}

impl MapClient {
    pub fn new(gateway: GatewayClient, initial: Location, locate_timeout: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(MapSession::new(initial))),
            gateway,
            locate_timeout,
        }
    }

    pub fn from_config(config: &ClientConfig, initial: Location) -> Result<Self, ClientError> {
        let gateway = GatewayClient::new(&config.gateway_url, &config.countries_base_url)?;
        Ok(Self::new(
            gateway,
            initial,
            Duration::from_secs(config.locate_timeout_secs),
        ))
    }

    fn lock(&self) -> MutexGuard<'_, MapSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the current session state.
    pub fn view<R>(&self, f: impl FnOnce(&MapSession) -> R) -> R {
        f(&self.lock())
    }

    fn report<T>(&self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(e) = &result {
            log::warn!("Map action failed: {}", e);
            self.lock().notify(NoticeLevel::Error, e.to_string());
        }
        result
    }

    /// Single-shot device position, then weather for the new spot.
    ///
    /// Returns [`Render::Superseded`] when a location entered or looked up
    /// after this call started has already been shown.
    pub async fn locate<P: PositionSource>(&self, source: &P) -> Result<Render, ClientError> {
        let (place, marker) = {
            let mut session = self.lock();
            session.set_status("Locating...");
            (
                session.begin(RenderTarget::Location),
                session.begin(RenderTarget::Map),
            )
        };

        let position = match tokio::time::timeout(self.locate_timeout, source.current_position())
            .await
        {
            Ok(result) => result,
            Err(_) => Err(GeolocationError::Timeout),
        };

        let location = match position {
            Ok(location) => location,
            Err(e) => {
                self.lock().set_status(e.to_string());
                return self.report(Err(e.into()));
            }
        };

        let render = self.lock().apply_located(place, marker, location);
        if render.is_applied() {
            // The position is already applied; a weather failure only adds a notice.
            let _ = self.refresh_weather().await;
        }
        Ok(render)
    }

    /// Moves to typed-in coordinates, overriding any position still pending.
    pub fn set_location(&self, latitude: f64, longitude: f64) -> Result<Location, ClientError> {
        let location = self.report(Location::new(latitude, longitude).map_err(ClientError::from))?;
        let mut session = self.lock();
        let ticket = session.begin(RenderTarget::Location);
        // Issued and applied under one lock, so nothing can be newer.
        let _ = session.apply_location(ticket, location);
        Ok(location)
    }

    pub async fn scan_overhead(&self) -> Result<Render, ClientError> {
        let (ticket, at) = {
            let mut session = self.lock();
            (session.begin(RenderTarget::Panel), session.location())
        };

        let satellites = self.report(self.gateway.satellites_above(at).await)?;
        Ok(self.lock().apply_above(ticket, satellites))
    }

    /// Tracks the `index`-th satellite of the last scan.
    pub async fn select_satellite(&self, index: usize) -> Result<Render, ClientError> {
        let norad_id = {
            let session = self.lock();
            session.select_satellite(index).map(|s| s.id)
        };
        let norad_id = self.report(norad_id)?;
        self.track_pass(norad_id).await
    }

    pub async fn track_pass(&self, norad_id: u32) -> Result<Render, ClientError> {
        let (ticket, at) = {
            let mut session = self.lock();
            (session.begin(RenderTarget::Map), session.location())
        };

        let passes = self.report(self.gateway.satellite_passes(norad_id, at).await)?;
        let applied = self.lock().apply_passes(ticket, norad_id, &passes);
        self.report(applied)
    }

    pub async fn refresh_earth_image(&self) -> Result<Render, ClientError> {
        let (ticket, at) = {
            let mut session = self.lock();
            (session.begin(RenderTarget::Image), session.location())
        };

        let image = self.report(self.gateway.earth_image(at).await)?;
        Ok(self.lock().apply_image(ticket, image))
    }

    pub async fn refresh_weather(&self) -> Result<Render, ClientError> {
        let (ticket, at) = {
            let mut session = self.lock();
            (session.begin(RenderTarget::Weather), session.location())
        };

        let snapshot = self.report(self.gateway.weather(at).await)?;
        Ok(self.lock().apply_weather(ticket, snapshot))
    }

    pub async fn search_country(&self, name: &str) -> Result<Render, ClientError> {
        let name = name.trim();
        let (place, marker) = {
            let mut session = self.lock();
            (
                session.begin(RenderTarget::Location),
                session.begin(RenderTarget::Map),
            )
        };

        let record = match self.report(self.gateway.country(name).await)? {
            Some(record) => record,
            None => return self.report(Err(ClientError::CountryNotFound(name.to_string()))),
        };
        let applied = self.lock().apply_country(place, marker, &record);
        self.report(applied)
    }

    pub fn dismiss_notice(&self, id: Uuid) -> bool {
        self.lock().dismiss(id)
    }
}
