//! Heat-pump controller actuator
//!
//! Talks to the controller's local REST gateway (Husdata H60 style):
//! `GET /api/alldata` returns every register as a map of hex id to raw
//! integer, `GET /api/set?idx=..&val=..` writes one register. Raw values
//! are tenths-scale. The [`Controller`] trait is the seam the driver and
//! tests program against.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::ControllerConfig;
use crate::error::{CalorError, Result};
use crate::logging::get_logger;

/// Abstract register-level controller access
#[async_trait]
pub trait Controller: Send + Sync {
    /// Read all registers as raw values
    async fn read_registers(&self) -> Result<HashMap<String, i64>>;

    /// Write one register
    async fn set_register(&self, idx: &str, value: i64) -> Result<()>;
}

/// Encode a temperature as a tenths-scale register value
pub fn temp_to_raw(temp: f64) -> i64 {
    (temp * 10.0).round() as i64
}

/// Parse the `alldata` JSON object into a raw register map
///
/// The gateway reports plain integers but some firmware versions emit
/// floats; both are accepted, anything else is skipped.
pub fn parse_alldata(body: &serde_json::Value) -> Result<HashMap<String, i64>> {
    let obj = body
        .as_object()
        .ok_or_else(|| CalorError::controller("alldata response is not an object"))?;

    let mut registers = HashMap::with_capacity(obj.len());
    for (idx, value) in obj {
        if let Some(v) = value.as_i64() {
            registers.insert(idx.clone(), v);
        } else if let Some(v) = value.as_f64() {
            registers.insert(idx.clone(), v.round() as i64);
        }
    }
    Ok(registers)
}

/// REST client for the controller gateway
pub struct HusdataClient {
    base_url: String,
    http: reqwest::Client,
    logger: crate::logging::StructuredLogger,
}

impl HusdataClient {
    /// Create a new gateway client
    pub fn new(config: &ControllerConfig) -> Result<Self> {
        let logger = get_logger("controller");
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.host.trim_end_matches('/').to_string(),
            http,
            logger,
        })
    }
}

#[async_trait]
impl Controller for HusdataClient {
    async fn read_registers(&self) -> Result<HashMap<String, i64>> {
        let url = format!("{}/api/alldata", self.base_url);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(CalorError::controller(format!(
                "Reading controller data failed with status {}",
                resp.status()
            )));
        }
        let body: serde_json::Value = resp.json().await?;
        parse_alldata(&body)
    }

    async fn set_register(&self, idx: &str, value: i64) -> Result<()> {
        let url = format!("{}/api/set?idx={}&val={}", self.base_url, idx, value);
        self.logger
            .info(&format!("Setting register {} to {}", idx, value));
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(CalorError::controller(format!(
                "Setting register {} failed with status {}",
                idx,
                resp.status()
            )));
        }
        Ok(())
    }
}

/// Converge the controller to the desired raw register values
///
/// Reads the current state once, then writes only registers whose
/// reported value differs from the desired one. A register absent from
/// the report counts as a mismatch. Returns the number of writes issued.
pub async fn converge(
    controller: &dyn Controller,
    desired: &[(String, i64)],
) -> Result<u32> {
    let logger = get_logger("controller");
    let current = controller.read_registers().await?;

    let mut writes = 0;
    for (idx, value) in desired {
        match current.get(idx) {
            Some(reported) if reported == value => {
                logger.debug(&format!("Register {} already at {}", idx, value));
            }
            _ => {
                controller.set_register(idx, *value).await?;
                writes += 1;
            }
        }
    }
    Ok(writes)
}
