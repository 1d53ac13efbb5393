//! One-shot control driver
//!
//! Ties the collaborators together for a single invocation: fetch the
//! tuning document, resolve overrides, derive today's price series,
//! compute the setpoints, apply sensor feedback, and converge the
//! controller. All computation happens before any register write, so a
//! fatal error in an earlier stage leaves the controller untouched.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::controller::{Controller, HusdataClient, converge, temp_to_raw};
use crate::error::Result;
use crate::feedback::{self, TemperatureReading};
use crate::logging::get_logger;
use crate::overrides::active_override;
use crate::prep;
use crate::prices::{DayClassification, PricePoint, comp_hour};
use crate::remote::RemoteTuningClient;
use crate::schedule;
use crate::sensor::SensorClient;
use crate::setpoints::{self, HeatingCommand};
use crate::spot::SpotClient;
use crate::tuning::{OverrideWindow, Tuning};

/// The two controller commands of one invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Targets {
    /// Hot-water target temperature in degrees Celsius
    pub hot_water_temp: f64,

    /// Heating-curve command
    pub command: HeatingCommand,
}

/// Compute the desired setpoints for one point in time
///
/// This is the whole decision engine as a pure function: an active
/// override is applied verbatim; otherwise schedule rules, prep planning
/// and price classification drive the hot-water target, and the
/// price-derived curve command is corrected against the optimal indoor
/// temperature when a fresh reading is available.
pub fn compute_targets(
    tuning: &Tuning,
    overrides: &[OverrideWindow],
    series: &[PricePoint],
    reading: Option<&TemperatureReading>,
    now: &DateTime<Tz>,
) -> Targets {
    if let Some(entry) = active_override(overrides, now) {
        return Targets {
            hot_water_temp: entry.watertemp,
            command: HeatingCommand {
                curve: entry.curve as i32,
                parallel: entry.parallel as i32,
            },
        };
    }

    let t = comp_hour(now);
    let class = DayClassification::classify(series, tuning);

    let no_need = schedule::is_no_need_active(&tuning.noneed, now);
    let prep_decision = prep::plan(&tuning.prepww, &class.low, series, tuning.blockprice, t);
    let hot_water_temp = setpoints::hot_water_target(tuning, &class, no_need, prep_decision, t);

    let adjustment = schedule::temperature_adjustment(&tuning.tempadjust, now);
    let optimal = setpoints::optimal_indoor_temperature(tuning, &class, adjustment, t);
    let command = setpoints::heating_command(tuning, &class, t);
    let command = feedback::correct(command, optimal, reading, now.with_timezone(&Utc));

    Targets {
        hot_water_temp,
        command,
    }
}

/// One-shot driver owning the collaborators
pub struct Driver {
    config: Config,
    tz: Tz,
    cache: CacheStore,
    remote: RemoteTuningClient,
    spot: SpotClient,
    sensor: SensorClient,
    controller: Box<dyn Controller>,
    logger: crate::logging::StructuredLogger,
}

impl Driver {
    /// Create a driver against the real controller gateway
    pub fn new(config: Config) -> Result<Self> {
        let controller = Box::new(HusdataClient::new(&config.controller)?);
        Self::with_controller(config, controller)
    }

    /// Create a driver with an externally supplied controller
    pub fn with_controller(config: Config, controller: Box<dyn Controller>) -> Result<Self> {
        config.validate()?;
        let tz = config.tz()?;
        let cache = CacheStore::open(&config.cache_file)?;
        let remote = RemoteTuningClient::new(&config.remote)?;
        let spot = SpotClient::new(&config.spot)?;
        let sensor = SensorClient::new(&config.sensor)?;
        let logger = get_logger("driver");

        Ok(Self {
            config,
            tz,
            cache,
            remote,
            spot,
            sensor,
            controller,
            logger,
        })
    }

    /// Run one decision pass and converge the controller
    ///
    /// Returns the number of register writes issued (0 means the
    /// controller already matched the computed state).
    pub async fn run(&mut self) -> Result<u32> {
        let document = self.remote.fetch().await?;
        let now = Utc::now().with_timezone(&self.tz);

        // An active override makes the price and sensor sources moot;
        // skip their fetches entirely.
        let targets = if active_override(&document.overrides, &now).is_some() {
            self.logger.info("Manual override active");
            compute_targets(&document.config, &document.overrides, &[], None, &now)
        } else {
            let series = self.spot.day_prices(&mut self.cache, &now).await?;
            let reading = self.sensor.latest_reading(&mut self.cache).await;
            compute_targets(
                &document.config,
                &document.overrides,
                &series,
                reading.as_ref(),
                &now,
            )
        };

        self.logger.info(&format!(
            "Desired state for {}: hot water {:.1} C, curve {}, parallel {}",
            self.config.controller.id,
            targets.hot_water_temp,
            targets.command.curve,
            targets.command.parallel
        ));

        let registers = &self.config.registers;
        let desired = vec![
            (
                registers.hot_water.clone(),
                temp_to_raw(targets.hot_water_temp),
            ),
            (registers.curve.clone(), i64::from(targets.command.curve)),
            (
                registers.parallel.clone(),
                i64::from(targets.command.parallel),
            ),
        ];

        let writes = converge(self.controller.as_ref(), &desired).await?;
        if writes == 0 {
            self.logger.info("Controller already converged, no writes");
        } else {
            self.logger.info(&format!("Issued {} register writes", writes));
        }
        Ok(writes)
    }
}
