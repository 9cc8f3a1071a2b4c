//! Headless map view-model: session state, render helpers and the HTTP
//! calls that feed them.

mod error;
mod gateway;
mod geolocation;
mod map_client;
pub mod render;
mod session;
mod types;
pub mod view;

pub use error::ClientError;
pub use gateway::GatewayClient;
pub use geolocation::{FixedPosition, GeolocationError, PositionSource};
pub use map_client::MapClient;
pub use session::{MapSession, Render, RenderTarget, Ticket, COUNTRY_VIEW_HALF_SPAN_DEG};
pub use types::{CountryRecord, PassPrediction, SatelliteSummary, WeatherSnapshot};
