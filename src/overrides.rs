//! Manual override resolution
//!
//! Overrides are absolute-time directives from the remote document. While
//! one is active its values are applied verbatim and everything computed
//! is skipped. Entries are checked in list order and the first active one
//! wins; an entry with unparseable timestamps is skipped, not fatal.

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::debug;

use crate::tuning::OverrideWindow;

/// First override whose [start, end] interval contains `now`
pub fn active_override<'a>(
    overrides: &'a [OverrideWindow],
    now: &DateTime<Tz>,
) -> Option<&'a OverrideWindow> {
    for entry in overrides {
        let (start, end) = match (
            DateTime::parse_from_rfc3339(&entry.start),
            DateTime::parse_from_rfc3339(&entry.end),
        ) {
            (Ok(s), Ok(e)) => (s, e),
            _ => {
                debug!(
                    "Skipping override with malformed timestamps: {} / {}",
                    entry.start, entry.end
                );
                continue;
            }
        };

        if start <= *now && *now <= end {
            debug!("Override active: {} to {}", entry.start, entry.end);
            return Some(entry);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Stockholm;

    fn entry(start: &str, end: &str, watertemp: f64) -> OverrideWindow {
        OverrideWindow {
            start: start.to_string(),
            end: end.to_string(),
            watertemp,
            curve: 300.0,
            parallel: 0.0,
        }
    }

    #[test]
    fn active_window_matches_inclusive_bounds() {
        let overrides = vec![entry(
            "2026-08-29T10:00:00+02:00",
            "2026-08-29T12:00:00+02:00",
            54.0,
        )];

        let inside = Stockholm.with_ymd_and_hms(2026, 8, 29, 11, 0, 0).unwrap();
        assert!(active_override(&overrides, &inside).is_some());

        let at_end = Stockholm.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
        assert!(active_override(&overrides, &at_end).is_some());

        let after = Stockholm.with_ymd_and_hms(2026, 8, 29, 12, 0, 1).unwrap();
        assert!(active_override(&overrides, &after).is_none());
    }

    #[test]
    fn first_matching_entry_wins() {
        let overrides = vec![
            entry(
                "2026-08-29T00:00:00+02:00",
                "2026-08-29T23:00:00+02:00",
                40.0,
            ),
            entry(
                "2026-08-29T10:00:00+02:00",
                "2026-08-29T12:00:00+02:00",
                54.0,
            ),
        ];
        let now = Stockholm.with_ymd_and_hms(2026, 8, 29, 11, 0, 0).unwrap();
        assert_eq!(active_override(&overrides, &now).unwrap().watertemp, 40.0);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let overrides = vec![
            entry("yesterday-ish", "soon", 40.0),
            entry(
                "2026-08-29T10:00:00+02:00",
                "2026-08-29T12:00:00+02:00",
                54.0,
            ),
        ];
        let now = Stockholm.with_ymd_and_hms(2026, 8, 29, 11, 0, 0).unwrap();
        assert_eq!(active_override(&overrides, &now).unwrap().watertemp, 54.0);
    }

    #[test]
    fn utc_and_offset_timestamps_compare_correctly() {
        // 08:00Z == 10:00+02:00 in summer
        let overrides = vec![entry("2026-08-29T08:00:00Z", "2026-08-29T10:00:00Z", 54.0)];
        let now = Stockholm.with_ymd_and_hms(2026, 8, 29, 11, 0, 0).unwrap();
        assert!(active_override(&overrides, &now).is_some());
    }
}
