//! Behavioral tuning document
//!
//! The tuning document is the declarative half of the system: numeric
//! thresholds for price classification and setpoint selection, plus the
//! rule lists (no-need windows, temperature adjustments, prep windows)
//! and the manual override list. It is normally fetched from a remote
//! store; every numeric field carries a hard-coded default so a partial
//! or missing document always yields a fully populated `Tuning`.
//!
//! Rule lists are ordered: evaluation is first-match-wins, there is no
//! merging of overlapping entries.

use serde::{Deserialize, Serialize};

fn default_cutter() -> f64 {
    60.0
}
fn default_maxdiff() -> f64 {
    50.0
}
fn default_lowprice() -> f64 {
    35.0
}
fn default_highprice() -> f64 {
    100.0
}
fn default_blockprice() -> f64 {
    150.0
}
fn default_bedtime() -> f64 {
    22.0
}
fn default_wwcooldown() -> f64 {
    2.0
}
fn default_ww_cheap_temp() -> f64 {
    54.0
}
fn default_ww_default_temp() -> f64 {
    50.0
}
fn default_ww_expensive_temp() -> f64 {
    45.0
}
fn default_ww_off_temp() -> f64 {
    35.0
}
fn default_heat_default_curve() -> f64 {
    300.0
}
fn default_heat_cheap_curve() -> f64 {
    20.0
}
fn default_heat_expensive_curve() -> f64 {
    -20.0
}
fn default_heat_default_para() -> f64 {
    0.0
}
fn default_heat_cheap_para() -> f64 {
    10.0
}
fn default_heat_expensive_para() -> f64 {
    -10.0
}
fn default_temp_default() -> f64 {
    21.0
}
fn default_temp_cheap() -> f64 {
    22.0
}
fn default_temp_expensive() -> f64 {
    20.0
}

/// Numeric thresholds and rule lists driving the decision engine
///
/// Field names match the wire format of the remote store, which grew out
/// of several generations of this controller; they are kept verbatim so
/// existing documents keep working.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tuning {
    /// Low cutpoint tolerance above the day minimum, in percent
    pub cutter: f64,

    /// Absolute cap on the low cutpoint distance from the day minimum
    pub maxdiff: f64,

    /// Prices below this are always classified low
    pub lowprice: f64,

    /// Upper bound on the high cutpoint
    pub highprice: f64,

    /// Hard price block: never heat hot water above this price
    pub blockprice: f64,

    /// Hour after which no more hot water is produced for the day
    pub bedtime: f64,

    /// Hours before bedtime at which hot-water production already stops
    pub wwcooldown: f64,

    /// Hot-water target during low-price hours
    pub wwcheaptemp: f64,

    /// Hot-water target during normal-price hours
    pub wwdefaulttemp: f64,

    /// Hot-water target during high-price hours (off-biased floor)
    pub wwexpensivetemp: f64,

    /// Hot-water target meaning "do not heat" (controller floor value)
    pub wwofftemp: f64,

    /// Heating-curve slope baseline, tenths scale
    pub heatdefaultcurve: f64,

    /// Curve delta added during low-price hours
    pub heatcheapcurve: f64,

    /// Curve delta added during high-price hours
    pub heatexpensivecurve: f64,

    /// Parallel offset baseline, tenths scale
    pub heatdefaultpara: f64,

    /// Parallel delta added during low-price hours
    pub heatcheappara: f64,

    /// Parallel delta added during high-price hours
    pub heatexpensivepara: f64,

    /// Optimal indoor temperature during normal-price hours
    pub tempdefault: f64,

    /// Optimal indoor temperature during low-price hours
    pub tempcheap: f64,

    /// Optimal indoor temperature during high-price hours
    pub tempexpensive: f64,

    /// Windows suppressing any heating need regardless of price
    pub noneed: Vec<NoNeedWindow>,

    /// Windows shifting the optimal indoor temperature
    pub tempadjust: Vec<TempAdjustmentWindow>,

    /// Declared future hot-water needs (anticipatory heating)
    pub prepww: Vec<PrepWindow>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cutter: default_cutter(),
            maxdiff: default_maxdiff(),
            lowprice: default_lowprice(),
            highprice: default_highprice(),
            blockprice: default_blockprice(),
            bedtime: default_bedtime(),
            wwcooldown: default_wwcooldown(),
            wwcheaptemp: default_ww_cheap_temp(),
            wwdefaulttemp: default_ww_default_temp(),
            wwexpensivetemp: default_ww_expensive_temp(),
            wwofftemp: default_ww_off_temp(),
            heatdefaultcurve: default_heat_default_curve(),
            heatcheapcurve: default_heat_cheap_curve(),
            heatexpensivecurve: default_heat_expensive_curve(),
            heatdefaultpara: default_heat_default_para(),
            heatcheappara: default_heat_cheap_para(),
            heatexpensivepara: default_heat_expensive_para(),
            tempdefault: default_temp_default(),
            tempcheap: default_temp_cheap(),
            tempexpensive: default_temp_expensive(),
            noneed: Vec::new(),
            tempadjust: Vec::new(),
            prepww: Vec::new(),
        }
    }
}

/// Time window during which heating need is suppressed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoNeedWindow {
    /// Window start as continuous hour of day (e.g. 8.5 for 08:30)
    pub start: f64,

    /// Window end, inclusive
    pub end: f64,

    /// ISO weekday digits the window applies to, e.g. "12345"
    pub weekdays: String,
}

/// Time window shifting the optimal indoor temperature
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TempAdjustmentWindow {
    /// Window start as continuous hour of day
    pub start: f64,

    /// Window end, inclusive
    pub end: f64,

    /// ISO weekday digits the window applies to
    pub weekdays: String,

    /// Delta added to the optimal indoor temperature while active
    pub adjustment: f64,
}

/// Declared future hot-water need with an allowed lookahead
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrepWindow {
    /// Earliest hour at which anticipatory heating may be considered
    pub earliest: f64,

    /// Hour by which hot water must be available
    pub needhour: f64,

    /// Length of the guaranteed window after `needhour`, in hours
    pub duration: f64,

    /// How many hours before `needhour` fallback heating kicks in when
    /// no cheap slot remains
    pub preptime: f64,
}

/// Absolute-time manual override; preempts all computed logic while active
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverrideWindow {
    /// RFC 3339 start instant
    pub start: String,

    /// RFC 3339 end instant, inclusive
    pub end: String,

    /// Hot-water target temperature to apply verbatim
    #[serde(default = "default_ww_default_temp")]
    pub watertemp: f64,

    /// Curve slope to apply verbatim, tenths scale
    #[serde(default = "default_heat_default_curve")]
    pub curve: f64,

    /// Parallel offset to apply verbatim, tenths scale
    #[serde(default = "default_heat_default_para")]
    pub parallel: f64,
}

/// The full remote document: tuning plus the override list
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TuningDocument {
    /// Behavioral tuning; missing fields fall back to defaults
    #[serde(default)]
    pub config: Tuning,

    /// Manual override windows, first active entry wins
    #[serde(default, rename = "override")]
    pub overrides: Vec<OverrideWindow>,
}
