use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
    #[serde(default)]
    pub discard_stale_responses: bool,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub credentials: Option<Credentials>,
}

/// Query parameters the Marvel API wants on every request.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub ts: String,
    pub apikey: String,
    pub hash: String,
}

fn default_quiet_period_ms() -> u64 {
    800
}

impl Settings {
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(config::File::with_name(config_file))
            .build()?;
        builder.try_deserialize()
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}
