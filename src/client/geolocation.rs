use std::future::Future;
use thiserror::Error;

use crate::geo::Location;

/// Why a single-shot position request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location access denied. Allow location access or enter coordinates manually.")]
    PermissionDenied,
    #[error("Location information is unavailable.")]
    Unavailable,
    #[error("Timed out while determining your location.")]
    Timeout,
}

/// Something that can report where the device is, once.
pub trait PositionSource: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Location, GeolocationError>> + Send;
}

/// A position source that always reports the same configured point.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Location>);

impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Location, GeolocationError> {
        self.0.ok_or(GeolocationError::Unavailable)
    }
}
