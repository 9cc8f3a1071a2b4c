use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::geo::Location;
use crate::upstream::ImagePayload;

use super::error::ClientError;
use super::types::{
    AboveResponse, CountryBody, CountryRecord, PassPrediction, PassesResponse, SatelliteSummary,
    WeatherBody, WeatherSnapshot,
};

#[derive(Deserialize)]
struct GatewayErrorBody {
    error: String,
}

/// HTTP access for the map client: the credential-free gateway endpoints, plus
/// the public country lookup, which is called directly.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    gateway: Url,
    countries: Url,
}

impl GatewayClient {
    pub fn new(gateway_url: &str, countries_base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            gateway: parse_base(gateway_url)?,
            countries: parse_base(countries_base_url)?,
        })
    }

    pub async fn satellites_above(
        &self,
        at: Location,
    ) -> Result<Vec<SatelliteSummary>, ClientError> {
        let body: AboveResponse = self
            .get_json("api/satellites-above", &coordinate_query(at))
            .await?;
        Ok(body.above)
    }

    pub async fn satellite_passes(
        &self,
        norad_id: u32,
        at: Location,
    ) -> Result<Vec<PassPrediction>, ClientError> {
        let mut query = coordinate_query(at);
        query.push(("satelliteId", norad_id.to_string()));
        let body: PassesResponse = self.get_json("api/satellite-passes", &query).await?;
        Ok(body.passes)
    }

    pub async fn earth_image(&self, at: Location) -> Result<ImagePayload, ClientError> {
        let response = self
            .http
            .get(self.endpoint("api/earth-image")?)
            .query(&coordinate_query(at))
            .send()
            .await?;
        let response = check_gateway(response).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        Ok(ImagePayload {
            content_type,
            bytes: response.bytes().await?,
        })
    }

    pub async fn weather(&self, at: Location) -> Result<WeatherSnapshot, ClientError> {
        let body: WeatherBody = self.get_json("api/weather", &coordinate_query(at)).await?;
        Ok(body.into())
    }

    /// First record matching `name`, or `None` when the service knows no such country.
    pub async fn country(&self, name: &str) -> Result<Option<CountryRecord>, ClientError> {
        let mut url = self.countries.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(self.countries.to_string()))?
            .pop_if_empty()
            .push("name")
            .push(name);

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;
        let bytes = response.bytes().await?;
        let records: Vec<CountryBody> = serde_json::from_slice(&bytes)?;
        Ok(records.into_iter().next().map(CountryRecord::from))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.gateway
            .join(path)
            .map_err(|e| ClientError::Url(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.endpoint(path)?)
            .query(query)
            .send()
            .await?;
        let bytes = check_gateway(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn parse_base(raw: &str) -> Result<Url, ClientError> {
    // A trailing slash makes `join` append instead of replacing the last segment.
    let normalized = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalized).map_err(|e| ClientError::Url(format!("{raw}: {e}")))
}

fn coordinate_query(at: Location) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", at.latitude.to_string()),
        ("longitude", at.longitude.to_string()),
    ]
}

/// Turns a non-success gateway response into its `{error}` message.
async fn check_gateway(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<GatewayErrorBody>()
        .await
        .map(|b| b.error)
        .unwrap_or_else(|_| status.to_string());
    Err(ClientError::Gateway { status, message })
}
