use axum::{extract::State, response::IntoResponse};

use crate::web::state::AppState;

use super::templates::{EndpointSummary, IndexTemplate};

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        endpoints: endpoints(),
        countries_base_url: state.config.client.countries_base_url.clone(),
    }
}

fn endpoints() -> Vec<EndpointSummary> {
    vec![
        EndpointSummary {
            path: "/api/satellites-above",
            params: "latitude, longitude",
            description: "Objects within 70° of the zenith",
        },
        EndpointSummary {
            path: "/api/satellite-passes",
            params: "satelliteId, latitude, longitude",
            description: "Radio passes over the next 7 days above 10° elevation",
        },
        EndpointSummary {
            path: "/api/earth-image",
            params: "latitude, longitude",
            description: "0.2° imagery tile, relayed as-is",
        },
        EndpointSummary {
            path: "/api/weather",
            params: "latitude, longitude",
            description: "Current conditions in metric units",
        },
    ]
}
