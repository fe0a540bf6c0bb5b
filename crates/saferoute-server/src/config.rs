//! Server configuration from environment.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub osrm_url: String,
    /// Bound on every outbound HTTP request (gateway, weather, LLM).
    pub http_timeout: Duration,
    pub zones_file: String,
    pub tourists_file: String,
    pub weather_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SAFEROUTE_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4000),
            osrm_url: env::var("OSRM_SERVER")
                .unwrap_or_else(|_| "https://router.project-osrm.org".to_string()),
            http_timeout: Duration::from_secs(
                env::var("SAFEROUTE_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(15),
            ),
            zones_file: env::var("SAFEROUTE_ZONES_FILE")
                .unwrap_or_else(|_| "data/highrisk.json".to_string()),
            tourists_file: env::var("SAFEROUTE_TOURISTS_FILE")
                .unwrap_or_else(|_| "data/tourists.json".to_string()),
            weather_api_key: env::var("WEATHER_KEY").ok().filter(|k| !k.is_empty()),
            openai_api_key: env::var("OPENAI_KEY").ok().filter(|k| !k.is_empty()),
        }
    }
}
