use axum::body::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use std::time::Duration;

use crate::config::{
    ConfigError, UpstreamConfig, DEFAULT_IMAGERY_BASE_URL, DEFAULT_SATELLITES_BASE_URL,
    DEFAULT_WEATHER_BASE_URL, IMAGERY_API_KEY_ENV, SATELLITES_API_KEY_ENV, WEATHER_API_KEY_ENV,
};
use crate::geo::Location;

use super::error::{Service, UpstreamError};
use super::{
    ABOVE_CATEGORY_ALL, ABOVE_SEARCH_RADIUS_DEG, IMAGE_FIELD_DEG, OBSERVER_ALTITUDE_M,
    PASS_MIN_ELEVATION_DEG, PASS_WINDOW_DAYS,
};

#[derive(Clone)]
struct Provider {
    base_url: String,
    api_key: String,
}

/// Raw image bytes as served by the imagery service.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Issues the credentialed calls to the third-party services.
///
/// Every method performs exactly one GET and never retries.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    satellites: Provider,
    imagery: Provider,
    weather: Provider,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let provider = |cfg: &crate::config::ProviderConfig, default: &str, env: &'static str| {
            Ok::<_, ConfigError>(Provider {
                base_url: cfg.base_url_or(default).to_string(),
                api_key: cfg.api_key(env)?.to_string(),
            })
        };

        Ok(Self {
            http: builder.build()?,
            satellites: provider(
                &config.satellites,
                DEFAULT_SATELLITES_BASE_URL,
                SATELLITES_API_KEY_ENV,
            )?,
            imagery: provider(&config.imagery, DEFAULT_IMAGERY_BASE_URL, IMAGERY_API_KEY_ENV)?,
            weather: provider(&config.weather, DEFAULT_WEATHER_BASE_URL, WEATHER_API_KEY_ENV)?,
        })
    }

    /// Objects currently above the observer, as a JSON body with an `above` list.
    pub async fn satellites_above(&self, at: Location) -> Result<Bytes, UpstreamError> {
        let url = format!(
            "{}/satellite/above/{}/{}/{}/{}/{}/",
            self.satellites.base_url,
            at.latitude,
            at.longitude,
            OBSERVER_ALTITUDE_M,
            ABOVE_SEARCH_RADIUS_DEG,
            ABOVE_CATEGORY_ALL
        );
        let request = self
            .http
            .get(url)
            .query(&[("apiKey", self.satellites.api_key.as_str())]);
        self.fetch_json(Service::Satellites, request).await
    }

    /// Radio passes of `norad_id` over the observer, as a JSON body with a `passes` list.
    pub async fn satellite_passes(
        &self,
        norad_id: u32,
        at: Location,
    ) -> Result<Bytes, UpstreamError> {
        let url = format!(
            "{}/satellite/radiopasses/{}/{}/{}/{}/{}/{}/",
            self.satellites.base_url,
            norad_id,
            at.latitude,
            at.longitude,
            OBSERVER_ALTITUDE_M,
            PASS_WINDOW_DAYS,
            PASS_MIN_ELEVATION_DEG
        );
        let request = self
            .http
            .get(url)
            .query(&[("apiKey", self.satellites.api_key.as_str())]);
        self.fetch_json(Service::Satellites, request).await
    }

    pub async fn earth_image(&self, at: Location) -> Result<ImagePayload, UpstreamError> {
        let url = format!("{}/planetary/earth/imagery", self.imagery.base_url);
        let request = self.http.get(url).query(&[
            ("lon", at.longitude.to_string()),
            ("lat", at.latitude.to_string()),
            ("dim", IMAGE_FIELD_DEG.to_string()),
            ("api_key", self.imagery.api_key.clone()),
        ]);

        let response = self.fetch(Service::Imagery, request).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::transport(Service::Imagery, e))?;

        Ok(ImagePayload {
            content_type,
            bytes,
        })
    }

    /// Current conditions in metric units.
    pub async fn current_weather(&self, at: Location) -> Result<Bytes, UpstreamError> {
        let url = format!("{}/weather", self.weather.base_url);
        let request = self.http.get(url).query(&[
            ("lat", at.latitude.to_string()),
            ("lon", at.longitude.to_string()),
            ("units", "metric".to_string()),
            ("appid", self.weather.api_key.clone()),
        ]);
        self.fetch_json(Service::Weather, request).await
    }

    async fn fetch(
        &self,
        service: Service,
        request: RequestBuilder,
    ) -> Result<Response, UpstreamError> {
        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::transport(service, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { service, status });
        }
        Ok(response)
    }

    /// Fetches a body that must be JSON. The bytes are returned untouched.
    async fn fetch_json(
        &self,
        service: Service,
        request: RequestBuilder,
    ) -> Result<Bytes, UpstreamError> {
        let body = self
            .fetch(service, request)
            .await?
            .bytes()
            .await
            .map_err(|e| UpstreamError::transport(service, e))?;

        serde_json::from_slice::<serde::de::IgnoredAny>(&body).map_err(|e| {
            UpstreamError::Malformed {
                service,
                message: e.to_string(),
            }
        })?;

        Ok(body)
    }
}
