//! Anticipatory ("prep") heating planner
//!
//! A prep window declares a future hot-water need: guaranteed availability
//! from `needhour` for `duration` hours, with early heating allowed from
//! `earliest` and a fallback lookahead of `preptime`. The planner decides,
//! ahead of the plain price logic, whether to heat right now to satisfy
//! that need.
//!
//! A decision is *authoritative* when the window has a definite opinion
//! for this tick; an authoritative decision short-circuits both remaining
//! prep windows and the price-class fallback.

use crate::prices::{PricePoint, price_at_hour};
use crate::tuning::PrepWindow;

/// Outcome of evaluating prep windows at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepDecision {
    /// Whether this decision preempts the price-based fallback
    pub authoritative: bool,

    /// Whether to heat hot water right now
    pub should_heat: bool,
}

impl PrepDecision {
    const PASS: Self = Self {
        authoritative: false,
        should_heat: false,
    };

    const fn decide(should_heat: bool) -> Self {
        Self {
            authoritative: true,
            should_heat,
        }
    }
}

/// Whether the current integer hour is priced above the hard block
fn blocked_now(series: &[PricePoint], t: f64, blockprice: f64) -> bool {
    price_at_hour(series, t.trunc() as u32).is_some_and(|v| v > blockprice)
}

/// Evaluate a single prep window at continuous hour `t`
///
/// `low` must be today's low-classified hours sorted by ascending price
/// (as produced by [`crate::prices::DayClassification`]); the cheapest
/// remaining slot before the deadline is its first matching entry.
pub fn evaluate_window(
    window: &PrepWindow,
    low: &[PricePoint],
    series: &[PricePoint],
    blockprice: f64,
    t: f64,
) -> PrepDecision {
    if t > window.needhour + window.duration {
        // The need has passed for today
        return PrepDecision::PASS;
    }

    if t < window.earliest {
        return PrepDecision::PASS;
    }

    if t >= window.needhour {
        // Inside the guaranteed window: heat unless hard-blocked by price
        return PrepDecision::decide(!blocked_now(series, t, blockprice));
    }

    // Between earliest and needhour: is a cheap slot still ahead of the
    // deadline? `low` is value-sorted, so the first match is the cheapest.
    let cheapest_ahead = low
        .iter()
        .find(|p| f64::from(p.hour()) >= t && f64::from(p.hour()) < window.needhour);

    match cheapest_ahead {
        None => {
            if t >= window.needhour - window.preptime {
                // No cheap slot will come; last chance to prepare in time
                PrepDecision::decide(!blocked_now(series, t, blockprice))
            } else {
                // Too early to bother, no cheap slot exists anyway
                PrepDecision::decide(false)
            }
        }
        Some(p) => {
            // Heat only while sitting on the cheapest remaining slot
            PrepDecision::decide(f64::from(p.hour()) == t.trunc())
        }
    }
}

/// Evaluate prep windows in list order; first authoritative decision wins
pub fn plan(
    windows: &[PrepWindow],
    low: &[PricePoint],
    series: &[PricePoint],
    blockprice: f64,
    t: f64,
) -> Option<PrepDecision> {
    windows
        .iter()
        .map(|w| evaluate_window(w, low, series, blockprice, t))
        .find(|d| d.authoritative)
}
