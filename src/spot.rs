//! Spot price source
//!
//! Fetches the day-ahead hourly price series for the configured region
//! and caches the raw payload in the key-value store under a day-scoped
//! key, so the upstream API is hit at most once per calendar day. A fetch
//! failure is fatal for the run; there is no stale fallback.

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};

use crate::cache::CacheStore;
use crate::config::SpotConfig;
use crate::error::{CalorError, Result};
use crate::logging::get_logger;
use crate::prices::PricePoint;

/// Wire format of one price entry
///
/// The feed encodes the price as a JSON string; tolerate both string and
/// number so a feed change does not break parsing.
#[derive(Debug, Deserialize)]
struct SpotEntry {
    timestamp: DateTime<FixedOffset>,
    #[serde(deserialize_with = "flexible_f64")]
    value: f64,
}

fn flexible_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(v) => Ok(v),
        NumberOrString::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

/// Parse a raw payload into local-time price points, sorted by time
pub fn parse_series(body: &str, tz: Tz) -> Result<Vec<PricePoint>> {
    let entries: Vec<SpotEntry> = serde_json::from_str(body)?;
    let mut points: Vec<PricePoint> = entries
        .into_iter()
        .map(|e| PricePoint {
            timestamp: e.timestamp.with_timezone(&tz),
            value: e.value,
        })
        .collect();
    points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    Ok(points)
}

/// Restrict a series to the entries of one local calendar day
pub fn filter_day(series: &[PricePoint], day: NaiveDate) -> Vec<PricePoint> {
    series
        .iter()
        .filter(|p| p.timestamp.date_naive() == day)
        .cloned()
        .collect()
}

/// Spot price API client with a per-day cache
pub struct SpotClient {
    config: SpotConfig,
    http: reqwest::Client,
    logger: crate::logging::StructuredLogger,
}

impl SpotClient {
    /// Create a new spot price client
    pub fn new(config: &SpotConfig) -> Result<Self> {
        let logger = get_logger("spot");
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config: config.clone(),
            http,
            logger,
        })
    }

    /// Today's price series in local time
    ///
    /// The raw payload is cached under `prices<yyyymmdd>`; the series is
    /// re-derived from it on every invocation.
    pub async fn day_prices(
        &self,
        cache: &mut CacheStore,
        now: &DateTime<Tz>,
    ) -> Result<Vec<PricePoint>> {
        let key = format!("prices{}", now.format("%Y%m%d"));

        let body = match cache.get(&key) {
            Some(cached) => cached.to_string(),
            None => {
                let body = self.fetch_raw().await?;
                cache.put(&key, body.clone())?;
                body
            }
        };

        let series = parse_series(&body, now.timezone())?;
        let today = filter_day(&series, now.date_naive());
        self.logger.debug(&format!(
            "Price series for {} has {} entries",
            now.date_naive(),
            today.len()
        ));
        Ok(today)
    }

    async fn fetch_raw(&self) -> Result<String> {
        let url = format!("{}/{}/latest", self.config.base_url, self.config.region);
        self.logger.info(&format!("Fetching spot prices from {}", url));

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(CalorError::api(format!(
                "Spot price fetch failed with status {}",
                resp.status()
            )));
        }
        Ok(resp.text().await?)
    }
}
