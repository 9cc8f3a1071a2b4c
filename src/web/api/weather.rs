use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
};

use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::json_passthrough;
use crate::web::api::params::CoordinateQuery;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "weather",
    params(CoordinateQuery),
    responses(
        (status = 200, description = "Current conditions in metric units", content_type = "application/json"),
        (status = 400, description = "Missing or invalid coordinates", body = ErrorResponse),
        (status = 500, description = "Weather service unavailable", body = ErrorResponse)
    )
)]
pub async fn current(
    State(state): State<AppState>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let at = query.location()?;

    let body = state.upstream.current_weather(at).await?;
    Ok(json_passthrough(body))
}
