//! # Calor - spot-price-driven heat-pump setpoint controller
//!
//! A periodic decision engine for a domestic water/space-heating
//! controller: given day-ahead electricity prices, a declarative schedule
//! of exceptions, an optional manual override and (optionally) a measured
//! indoor temperature, it computes the setpoints the heat pump should be
//! driven to and converges the controller to them only when they differ
//! from the reported state.
//!
//! One invocation is one run-to-completion pass; periodicity comes from
//! an external scheduler. The next run re-derives everything from scratch.
//!
//! ## Architecture
//!
//! - `config`: local application settings (endpoints, registers, timezone)
//! - `tuning`: the remote declarative tuning document and rule lists
//! - `remote`: tuning document fetch
//! - `cache`: file-backed key-value store (daily prices, sensor token)
//! - `prices`: price series model and low/high classification
//! - `spot`: spot price source with per-day caching
//! - `schedule`: no-need and temperature-adjustment windows
//! - `prep`: anticipatory hot-water planning
//! - `overrides`: manual override resolution
//! - `setpoints`: hot-water and heating-curve setpoint calculation
//! - `feedback`: sensor-based curve correction
//! - `sensor`: best-effort cloud temperature source
//! - `controller`: register-level actuator with idempotent convergence
//! - `driver`: one-shot orchestration
//! - `logging`: structured logging and tracing
//! - `error`: error types

pub mod cache;
pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod overrides;
pub mod prep;
pub mod prices;
pub mod remote;
pub mod schedule;
pub mod sensor;
pub mod setpoints;
pub mod spot;
pub mod tuning;

// Re-export commonly used types
pub use config::Config;
pub use driver::Driver;
pub use error::{CalorError, Result};
