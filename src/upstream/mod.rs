mod client;
mod error;

pub use client::{ImagePayload, UpstreamClient};
pub use error::{Service, UpstreamError};

/// Search radius around the observer for the satellites-above lookup.
pub const ABOVE_SEARCH_RADIUS_DEG: u32 = 70;
/// Category 0 asks for every tracked object.
pub const ABOVE_CATEGORY_ALL: u32 = 0;
pub const OBSERVER_ALTITUDE_M: u32 = 0;
pub const PASS_WINDOW_DAYS: u32 = 7;
pub const PASS_MIN_ELEVATION_DEG: u32 = 10;
/// Width and height of the imagery tile, in degrees.
pub const IMAGE_FIELD_DEG: f64 = 0.2;
