use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let upstream = UpstreamClient::new(&config.upstream)?;
        Ok(AppState {
            config: Arc::new(config),
            upstream: Arc::new(upstream),
        })
    }
}
