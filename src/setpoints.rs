//! Setpoint calculation
//!
//! Composes price classification, schedule rules and prep decisions into
//! the two controller commands: the hot-water target temperature and the
//! heating-curve command (slope + parallel offset). Everything here is
//! computed fresh per invocation; there is no smoothing or hysteresis
//! beyond what the individual rules encode.

use crate::prep::PrepDecision;
use crate::prices::DayClassification;
use crate::tuning::Tuning;

/// Heating-curve command in tenths-scale register values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatingCommand {
    /// Curve slope register value
    pub curve: i32,

    /// Parallel offset register value
    pub parallel: i32,
}

/// Hot-water target temperature for the current tick
///
/// Precedence: bedtime cooldown sentinel, then no-need windows, then an
/// authoritative prep decision, then the plain price class. An
/// authoritative prep "do not heat" short-circuits the price fallback;
/// waiting for a cheaper slot must not be undone by the current hour
/// happening to be classified low.
pub fn hot_water_target(
    tuning: &Tuning,
    class: &DayClassification,
    no_need: bool,
    prep: Option<PrepDecision>,
    t: f64,
) -> f64 {
    if t >= tuning.bedtime - tuning.wwcooldown {
        return tuning.wwofftemp;
    }

    if no_need {
        return tuning.wwexpensivetemp;
    }

    if let Some(decision) = prep {
        return if decision.should_heat {
            tuning.wwcheaptemp
        } else {
            tuning.wwofftemp
        };
    }

    let hour = t.trunc() as u32;
    if class.is_low_hour(hour) {
        tuning.wwcheaptemp
    } else if class.is_high_hour(hour) {
        tuning.wwexpensivetemp
    } else {
        tuning.wwdefaulttemp
    }
}

/// Price-derived heating-curve command for the current tick
pub fn heating_command(tuning: &Tuning, class: &DayClassification, t: f64) -> HeatingCommand {
    let hour = t.trunc() as u32;
    let (curve_delta, para_delta) = if class.is_low_hour(hour) {
        (tuning.heatcheapcurve, tuning.heatcheappara)
    } else if class.is_high_hour(hour) {
        (tuning.heatexpensivecurve, tuning.heatexpensivepara)
    } else {
        (0.0, 0.0)
    };

    HeatingCommand {
        curve: (tuning.heatdefaultcurve + curve_delta) as i32,
        parallel: (tuning.heatdefaultpara + para_delta) as i32,
    }
}

/// Optimal indoor temperature for the current tick
///
/// Same low/high/default selection as the curve command, shifted by the
/// first matching temperature-adjustment window.
pub fn optimal_indoor_temperature(
    tuning: &Tuning,
    class: &DayClassification,
    adjustment: f64,
    t: f64,
) -> f64 {
    let hour = t.trunc() as u32;
    let base = if class.is_low_hour(hour) {
        tuning.tempcheap
    } else if class.is_high_hour(hour) {
        tuning.tempexpensive
    } else {
        tuning.tempdefault
    };
    base + adjustment
}
