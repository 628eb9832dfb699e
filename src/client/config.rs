use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::driver::SlotPolicy;
use crate::error::{Error, Result};

const ENV_PREFIX: &str = "AIMHARDER_";
const DEFAULT_TIME_ID: &str = "1800_60";

/// Settings read once at startup from `AIMHARDER_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub box_id: String,
    pub cookie_name: String,
    pub cookie_value: String,
    #[serde(default)]
    pub log_requests: bool,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_time_id")]
    pub weekday_time_id: String,
    #[serde(default = "default_time_id")]
    pub last_day_time_id: String,
    #[serde(default = "default_pause_secs")]
    pub pause_secs: u64,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_time_id() -> String {
    DEFAULT_TIME_ID.to_string()
}

fn default_pause_secs() -> u64 {
    10
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine, the variables may already be set.
        let _ = dotenv::dotenv();
        Ok(envy::prefixed(ENV_PREFIX).from_env::<Config>()?)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter::<_, Config>(vars)?)
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&format!("{}://{}", self.scheme, self.host)).map_err(|e| Error::InvalidHost {
            host: self.host.clone(),
            reason: e.to_string(),
        })
    }

    pub fn slot_policy(&self) -> SlotPolicy {
        SlotPolicy {
            weekday: self.weekday_time_id.clone(),
            last_day: self.last_day_time_id.clone(),
        }
    }

    pub fn pause(&self) -> Duration {
        Duration::from_secs(self.pause_secs)
    }
}
