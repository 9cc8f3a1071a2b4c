use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::params::CoordinateQuery;
use crate::web::state::AppState;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[utoipa::path(
    get,
    path = "/api/earth-image",
    tag = "imagery",
    params(CoordinateQuery),
    responses(
        (status = 200, description = "Imagery tile centred on the coordinates, in the upstream format", content_type = "image/png"),
        (status = 400, description = "Missing or invalid coordinates", body = ErrorResponse),
        (status = 500, description = "Imagery service unavailable", body = ErrorResponse)
    )
)]
pub async fn earth_image(
    State(state): State<AppState>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let at = query.location()?;

    let image = state.upstream.earth_image(at).await?;
    let content_type = image
        .content_type
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok())
        .unwrap_or(HeaderValue::from_static(FALLBACK_CONTENT_TYPE));

    Ok(([(header::CONTENT_TYPE, content_type)], image.bytes).into_response())
}
