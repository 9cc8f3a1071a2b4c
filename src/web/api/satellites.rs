use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
};

use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::json_passthrough;
use crate::web::api::params::{CoordinateQuery, PassQuery};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/satellites-above",
    tag = "satellites",
    params(CoordinateQuery),
    responses(
        (status = 200, description = "Objects above the observer, relayed as `{above: [...]}`", content_type = "application/json"),
        (status = 400, description = "Missing or invalid coordinates", body = ErrorResponse),
        (status = 500, description = "Satellite service unavailable", body = ErrorResponse)
    )
)]
pub async fn above(
    State(state): State<AppState>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let at = query.location()?;

    let body = state.upstream.satellites_above(at).await?;
    Ok(json_passthrough(body))
}

#[utoipa::path(
    get,
    path = "/api/satellite-passes",
    tag = "satellites",
    params(PassQuery),
    responses(
        (status = 200, description = "Upcoming radio passes, relayed as `{passes: [...]}`", content_type = "application/json"),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 500, description = "Satellite service unavailable", body = ErrorResponse)
    )
)]
pub async fn passes(
    State(state): State<AppState>,
    query: Result<Query<PassQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let norad_id = query.satellite_id()?;
    let at = query.location()?;

    let body = state.upstream.satellite_passes(norad_id, at).await?;
    Ok(json_passthrough(body))
}
