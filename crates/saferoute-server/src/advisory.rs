//! City travel-safety advisory: current weather plus an LLM summary.
//!
//! Both upstreams get the same treatment as the routing gateway: fallible,
//! bounded by the shared HTTP timeout, and never allowed to take the process
//! down.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const ADVISORY_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("advisory service not configured")]
    NotConfigured,
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("unexpected upstream response: {0}")]
    BadResponse(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub temp: f64,
    pub condition: String,
    pub wind: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

pub struct AdvisoryService {
    client: Client,
    weather_key: Option<String>,
    openai_key: Option<String>,
}

impl AdvisoryService {
    pub fn new(
        weather_key: Option<String>,
        openai_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            weather_key,
            openai_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.weather_key.is_some() && self.openai_key.is_some()
    }

    /// Fetch the weather for `city` and ask the model whether travel is
    /// advisable given those conditions.
    pub async fn city_advisory(&self, city: &str) -> Result<(WeatherReport, String), AdvisoryError> {
        let weather = self.fetch_weather(city).await?;
        let reply = self.ask_model(city, &weather).await?;
        Ok((weather, reply))
    }

    async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, AdvisoryError> {
        let key = self.weather_key.as_deref().ok_or(AdvisoryError::NotConfigured)?;

        #[derive(Deserialize)]
        struct Resp {
            main: MainBlock,
            weather: Vec<WeatherBlock>,
            wind: WindBlock,
            visibility: Option<f64>,
        }
        #[derive(Deserialize)]
        struct MainBlock {
            temp: f64,
        }
        #[derive(Deserialize)]
        struct WeatherBlock {
            description: String,
        }
        #[derive(Deserialize)]
        struct WindBlock {
            speed: f64,
        }

        let resp: Resp = self
            .client
            .get(WEATHER_URL)
            .query(&[("q", city), ("appid", key), ("units", "metric")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let condition = resp
            .weather
            .first()
            .map(|w| w.description.clone())
            .ok_or_else(|| AdvisoryError::BadResponse("missing weather block".to_string()))?;
        Ok(WeatherReport {
            temp: resp.main.temp,
            condition,
            wind: resp.wind.speed,
            visibility: resp.visibility,
        })
    }

    async fn ask_model(&self, city: &str, weather: &WeatherReport) -> Result<String, AdvisoryError> {
        let key = self.openai_key.as_deref().ok_or(AdvisoryError::NotConfigured)?;
        let visibility = weather
            .visibility
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let prompt = format!(
            "User wants to travel to {city}.\n\nWeather:\nTemperature: {} C\nCondition: {}\nWind: {} m/s\nVisibility: {}\n\nIs it safe to travel? Give short advice.",
            weather.temp, weather.condition, weather.wind, visibility,
        );
        let body = json!({
            "model": ADVISORY_MODEL,
            "messages": [
                { "role": "system", "content": "You are a travel safety expert." },
                { "role": "user", "content": prompt },
            ],
        });

        #[derive(Deserialize)]
        struct Completion {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct Message {
            content: String,
        }

        let resp: Completion = self
            .client
            .post(OPENAI_URL)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        resp.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AdvisoryError::BadResponse("empty completion".to_string()))
    }
}
