use reqwest::StatusCode;
use strum_macros::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Service {
    #[strum(to_string = "satellite service")]
    Satellites,
    #[strum(to_string = "imagery service")]
    Imagery,
    #[strum(to_string = "weather service")]
    Weather,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{service} responded with {status}")]
    Status { service: Service, status: StatusCode },
    #[error("{service} request failed: {source}")]
    Transport {
        service: Service,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned a malformed body: {message}")]
    Malformed { service: Service, message: String },
}

impl UpstreamError {
    /// Wraps a transport error with the request URL stripped, since the URL carries the credential.
    pub fn transport(service: Service, source: reqwest::Error) -> Self {
        UpstreamError::Transport {
            service,
            source: source.without_url(),
        }
    }

    pub fn service(&self) -> Service {
        match self {
            UpstreamError::Status { service, .. }
            | UpstreamError::Transport { service, .. }
            | UpstreamError::Malformed { service, .. } => *service,
        }
    }

    /// The message returned to callers. Upstream detail stays in the server log.
    pub fn public_message(&self) -> String {
        format!("Failed to fetch data from the {}", self.service())
    }
}
