//! Cloud temperature sensor integration
//!
//! Reads the latest indoor temperature from a Netatmo-style weather
//! station API. Access uses a short-lived bearer token obtained via the
//! stored refresh credential and cached between runs in the key-value
//! store. The sensor is strictly best-effort: every failure on this path
//! degrades to "no reading" so the price- and schedule-derived setpoints
//! still apply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::CacheStore;
use crate::config::SensorConfig;
use crate::error::{CalorError, Result};
use crate::feedback::TemperatureReading;
use crate::logging::get_logger;

const TOKEN_CACHE_KEY: &str = "sensor_token";

/// Cached access token with its absolute expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedToken {
    access_token: String,
    /// Unix seconds after which the token must be refreshed
    expires_at: i64,
}

impl CachedToken {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Pull the named module's temperature out of a stations-data response
///
/// The station document nests modules under devices; the base station
/// itself also carries a readable module name. First name match wins.
pub fn extract_reading(body: &serde_json::Value, module: &str) -> Option<TemperatureReading> {
    let devices = body.get("body")?.get("devices")?.as_array()?;

    let mut candidates: Vec<&serde_json::Value> = Vec::new();
    for device in devices {
        candidates.push(device);
        if let Some(modules) = device.get("modules").and_then(|m| m.as_array()) {
            candidates.extend(modules.iter());
        }
    }

    for candidate in candidates {
        if candidate.get("module_name").and_then(|n| n.as_str()) != Some(module) {
            continue;
        }
        let dashboard = candidate.get("dashboard_data")?;
        let value = dashboard.get("Temperature")?.as_f64()?;
        let time_utc = dashboard.get("time_utc")?.as_i64()?;
        let observed_at = DateTime::from_timestamp(time_utc, 0)?;
        return Some(TemperatureReading { value, observed_at });
    }
    None
}

/// Cloud sensor client
pub struct SensorClient {
    config: SensorConfig,
    http: reqwest::Client,
    logger: crate::logging::StructuredLogger,
}

impl SensorClient {
    /// Create a new sensor client
    pub fn new(config: &SensorConfig) -> Result<Self> {
        let logger = get_logger("sensor");
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config: config.clone(),
            http,
            logger,
        })
    }

    /// Latest indoor temperature reading, or `None` on any failure
    pub async fn latest_reading(&self, cache: &mut CacheStore) -> Option<TemperatureReading> {
        if !self.config.enabled {
            return None;
        }
        match self.try_latest_reading(cache).await {
            Ok(reading) => reading,
            Err(e) => {
                self.logger
                    .warn(&format!("Sensor unavailable, skipping feedback: {}", e));
                None
            }
        }
    }

    async fn try_latest_reading(
        &self,
        cache: &mut CacheStore,
    ) -> Result<Option<TemperatureReading>> {
        let token = self.access_token(cache).await?;

        let url = format!("{}/api/getstationsdata", self.config.base_url);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await?;
        if !resp.status().is_success() {
            // An invalidated token should not poison the next run
            if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
                let _ = cache.remove(TOKEN_CACHE_KEY);
            }
            return Err(CalorError::api(format!(
                "Station data fetch failed with status {}",
                resp.status()
            )));
        }

        let body: serde_json::Value = resp.json().await?;
        Ok(extract_reading(&body, &self.config.module))
    }

    /// Cached access token, refreshed through the stored credential when
    /// missing or expired
    async fn access_token(&self, cache: &mut CacheStore) -> Result<String> {
        let now = Utc::now();

        if let Some(raw) = cache.get(TOKEN_CACHE_KEY) {
            if let Ok(token) = serde_json::from_str::<CachedToken>(raw) {
                if !token.is_expired(now) {
                    return Ok(token.access_token);
                }
            }
        }

        self.logger.debug("Refreshing sensor access token");
        let url = format!("{}/oauth2/token", self.config.base_url);
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.config.refresh_token.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        let resp = self.http.post(&url).form(&params).send().await?;
        if !resp.status().is_success() {
            return Err(CalorError::auth(format!(
                "Token refresh failed with status {}",
                resp.status()
            )));
        }
        let token: TokenResponse = resp.json().await?;

        // Refresh one minute early to absorb clock skew
        let cached = CachedToken {
            access_token: token.access_token.clone(),
            expires_at: now.timestamp() + token.expires_in - 60,
        };
        cache.put(TOKEN_CACHE_KEY, serde_json::to_string(&cached)?)?;

        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_expiry_check() {
        let now = Utc::now();
        let valid = CachedToken {
            access_token: "t".into(),
            expires_at: now.timestamp() + 100,
        };
        let expired = CachedToken {
            access_token: "t".into(),
            expires_at: now.timestamp(),
        };
        assert!(!valid.is_expired(now));
        assert!(expired.is_expired(now));
    }

    #[test]
    fn extracts_named_module_temperature() {
        let body = json!({
            "body": {
                "devices": [{
                    "module_name": "Base",
                    "dashboard_data": {"Temperature": 23.5, "time_utc": 1_788_000_000},
                    "modules": [{
                        "module_name": "Indoor",
                        "dashboard_data": {"Temperature": 21.4, "time_utc": 1_788_000_100}
                    }]
                }]
            }
        });
        let reading = extract_reading(&body, "Indoor").unwrap();
        assert_eq!(reading.value, 21.4);
        assert_eq!(reading.observed_at.timestamp(), 1_788_000_100);

        let base = extract_reading(&body, "Base").unwrap();
        assert_eq!(base.value, 23.5);
    }

    #[test]
    fn unknown_module_yields_none() {
        let body = json!({"body": {"devices": []}});
        assert!(extract_reading(&body, "Indoor").is_none());
    }
}
