use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::satellites::above,
        super::api::satellites::passes,
        super::api::imagery::earth_image,
        super::api::weather::current,
        super::api::health::health,
    ),
    components(schemas(ErrorResponse, HealthResponse)),
    info(
        title = "Skywatch Gateway API",
        description = "Credential-injecting proxy for satellite, imagery and weather lookups",
        version = "0.1.0"
    ),
    tags(
        (name = "satellites", description = "Objects overhead and pass predictions"),
        (name = "imagery", description = "Earth imagery snapshots"),
        (name = "weather", description = "Current conditions"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
