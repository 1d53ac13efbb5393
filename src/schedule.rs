//! Time-window schedule rules
//!
//! No-need windows suppress heating regardless of price; temperature
//! adjustment windows shift the optimal indoor temperature. Both match on
//! an inclusive continuous-hour range plus an ISO weekday digit mask, and
//! both are evaluated first-match-wins in list order.

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

use crate::prices::comp_hour;
use crate::tuning::{NoNeedWindow, TempAdjustmentWindow};

/// Whether a weekday digit mask ("12345", ISO numbering) contains today
fn mask_contains(weekdays: &str, now: &DateTime<Tz>) -> bool {
    let iso = now.weekday().number_from_monday();
    char::from_digit(iso, 10).is_some_and(|d| weekdays.contains(d))
}

/// Whether an inclusive hour window covers the current time
fn window_active(start: f64, end: f64, weekdays: &str, now: &DateTime<Tz>) -> bool {
    if !mask_contains(weekdays, now) {
        return false;
    }
    let t = comp_hour(now);
    start <= t && t <= end
}

/// True if any no-need window is active right now
pub fn is_no_need_active(windows: &[NoNeedWindow], now: &DateTime<Tz>) -> bool {
    windows
        .iter()
        .any(|w| window_active(w.start, w.end, &w.weekdays, now))
}

/// Temperature adjustment of the first matching window, or 0
pub fn temperature_adjustment(windows: &[TempAdjustmentWindow], now: &DateTime<Tz>) -> f64 {
    windows
        .iter()
        .find(|w| window_active(w.start, w.end, &w.weekdays, now))
        .map_or(0.0, |w| w.adjustment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Stockholm;

    // 2026-08-29 is a Saturday (ISO weekday 6)
    fn saturday(hour: u32, minute: u32) -> DateTime<Tz> {
        Stockholm
            .with_ymd_and_hms(2026, 8, 29, hour, minute, 0)
            .unwrap()
    }

    fn no_need(start: f64, end: f64, weekdays: &str) -> NoNeedWindow {
        NoNeedWindow {
            start,
            end,
            weekdays: weekdays.to_string(),
        }
    }

    #[test]
    fn weekday_mask_gates_the_window() {
        let windows = [no_need(8.0, 16.0, "12345")];
        assert!(!is_no_need_active(&windows, &saturday(10, 0)));

        let weekend = [no_need(8.0, 16.0, "67")];
        assert!(is_no_need_active(&weekend, &saturday(10, 0)));
    }

    #[test]
    fn hour_bounds_are_inclusive() {
        let windows = [no_need(8.0, 16.5, "6")];
        assert!(is_no_need_active(&windows, &saturday(8, 0)));
        assert!(is_no_need_active(&windows, &saturday(16, 30)));
        assert!(!is_no_need_active(&windows, &saturday(16, 31)));
        assert!(!is_no_need_active(&windows, &saturday(7, 59)));
    }

    #[test]
    fn adjustment_first_match_wins() {
        let windows = [
            TempAdjustmentWindow {
                start: 8.0,
                end: 20.0,
                weekdays: "1234567".to_string(),
                adjustment: -1.0,
            },
            TempAdjustmentWindow {
                start: 9.0,
                end: 11.0,
                weekdays: "1234567".to_string(),
                adjustment: 2.0,
            },
        ];
        // Both match at 10:00; list order decides
        assert_eq!(temperature_adjustment(&windows, &saturday(10, 0)), -1.0);
        assert_eq!(temperature_adjustment(&windows, &saturday(7, 0)), 0.0);
    }
}
