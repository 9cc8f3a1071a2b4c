pub mod error;
pub mod health;
pub mod imagery;
pub mod params;
pub mod satellites;
pub mod weather;

use axum::{
    body::Bytes,
    http::header,
    response::{IntoResponse, Response},
};

/// Relays an upstream JSON body byte-for-byte.
pub(crate) fn json_passthrough(body: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
