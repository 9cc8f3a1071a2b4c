use reqwest::StatusCode;
use thiserror::Error;

use crate::geo::LocationError;

use super::geolocation::GeolocationError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gateway responded with {status}: {message}")]
    Gateway { status: StatusCode, message: String },
    #[error("unexpected response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("No upcoming passes found for satellite {0}")]
    NoPasses(u32),
    #[error("Country not found: {0}")]
    CountryNotFound(String),
    #[error("No coordinates available for {0}")]
    MissingCoordinates(String),
    #[error("No satellite at position {0} in the list")]
    NoSuchEntry(usize),
    #[error("Invalid location: {0}")]
    Location(#[from] LocationError),
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl ClientError {
    /// Errors raised while interpreting a successful response, as opposed to
    /// failures reaching the gateway or lookup service.
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            ClientError::Malformed(_)
                | ClientError::NoPasses(_)
                | ClientError::CountryNotFound(_)
                | ClientError::MissingCoordinates(_)
        )
    }
}
