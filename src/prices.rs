//! Price series model and low/high classification
//!
//! One `PricePoint` per hour of the local calendar day. Classification
//! partitions the day into "low" and "high" hours relative to the day's
//! minimum price; everything else is implicitly normal.

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;

use crate::tuning::Tuning;

/// One hour of spot price, already converted to the local timezone
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    /// Start of the hour this price applies to
    pub timestamp: DateTime<Tz>,

    /// Spot price for the hour
    pub value: f64,
}

impl PricePoint {
    /// Local hour of day this price applies to
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

/// Continuous hour of day (hour + minute/60) in the local timezone
pub fn comp_hour(now: &DateTime<Tz>) -> f64 {
    f64::from(now.hour()) + f64::from(now.minute()) / 60.0
}

/// Price at a given integer hour of day, if the series covers it
pub fn price_at_hour(series: &[PricePoint], hour: u32) -> Option<f64> {
    series.iter().find(|p| p.hour() == hour).map(|p| p.value)
}

/// Low/high partition of a day's price series
///
/// `low` is kept sorted by ascending value: the prep planner's
/// "cheapest remaining slot" check depends on that order.
#[derive(Debug, Clone, Default)]
pub struct DayClassification {
    /// Hours classified as cheap, sorted by ascending price
    pub low: Vec<PricePoint>,

    /// Hours classified as expensive
    pub high: Vec<PricePoint>,
}

impl DayClassification {
    /// Classify a day's series against the tuning thresholds
    pub fn classify(series: &[PricePoint], tuning: &Tuning) -> Self {
        let Some(min_price) = series
            .iter()
            .map(|p| p.value)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        else {
            return Self::default();
        };

        // Low cutpoint: tolerance above the minimum, capped by an absolute
        // difference and the hard block price. A negative day minimum makes
        // the relative formula meaningless; fall back to the absolute cap.
        let cut_low = if min_price < 0.0 {
            tuning.maxdiff
        } else {
            (min_price * (1.0 + tuning.cutter / 100.0))
                .min(min_price + tuning.maxdiff)
                .min(tuning.blockprice)
        };

        // High cutpoint: same formula with 40% wider tolerance, additionally
        // bounded by the highprice ceiling. Negative minimum is clamped the
        // same way as on the low side.
        let cut_high = if min_price < 0.0 {
            (1.4 * tuning.maxdiff)
                .min(tuning.blockprice)
                .min(tuning.highprice)
        } else {
            (min_price * (1.0 + 1.4 * tuning.cutter / 100.0))
                .min(min_price + 1.4 * tuning.maxdiff)
                .min(tuning.blockprice)
                .min(tuning.highprice)
        };

        let is_low = |value: f64| value < cut_low || value < tuning.lowprice;

        let mut low: Vec<PricePoint> = series
            .iter()
            .filter(|p| is_low(p.value))
            .cloned()
            .collect();
        low.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));

        // With an extreme day minimum the high cutpoint can fall below the
        // lowprice floor; low takes precedence so the sets stay disjoint.
        let high: Vec<PricePoint> = series
            .iter()
            .filter(|p| p.value > cut_high && !is_low(p.value))
            .cloned()
            .collect();

        Self { low, high }
    }

    /// Whether the given integer hour of day is classified low
    pub fn is_low_hour(&self, hour: u32) -> bool {
        self.low.iter().any(|p| p.hour() == hour)
    }

    /// Whether the given integer hour of day is classified high
    pub fn is_high_hour(&self, hour: u32) -> bool {
        self.high.iter().any(|p| p.hour() == hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Stockholm;

    fn point(hour: u32, value: f64) -> PricePoint {
        PricePoint {
            timestamp: Stockholm
                .with_ymd_and_hms(2026, 8, 29, hour, 0, 0)
                .unwrap(),
            value,
        }
    }

    fn series(values: &[f64]) -> Vec<PricePoint> {
        values
            .iter()
            .enumerate()
            .map(|(h, v)| point(h as u32, *v))
            .collect()
    }

    #[test]
    fn comp_hour_is_continuous() {
        let now = Stockholm.with_ymd_and_hms(2026, 8, 29, 7, 30, 0).unwrap();
        assert!((comp_hour(&now) - 7.5).abs() < 1e-9);
    }

    #[test]
    fn minimum_hour_is_always_low() {
        let s = series(&[50.0, 40.0, 35.0, 60.0, 90.0]);
        let class = DayClassification::classify(&s, &Tuning::default());
        assert!(class.is_low_hour(2));
    }

    #[test]
    fn low_and_high_are_disjoint() {
        let s = series(&[10.0, 20.0, 35.0, 60.0, 95.0, 140.0, 15.0, 200.0]);
        let class = DayClassification::classify(&s, &Tuning::default());
        for p in &class.low {
            assert!(!class.is_high_hour(p.hour()), "hour {} in both sets", p.hour());
        }
    }

    #[test]
    fn single_point_series_does_not_crash() {
        let s = series(&[80.0]);
        let class = DayClassification::classify(&s, &Tuning::default());
        // 80 < 80*1.6 so the single point is its own low
        assert!(class.is_low_hour(0));
        assert!(!class.is_high_hour(0));

        let empty = DayClassification::classify(&[], &Tuning::default());
        assert!(empty.low.is_empty() && empty.high.is_empty());
    }

    #[test]
    fn negative_minimum_uses_absolute_caps() {
        let mut tuning = Tuning::default();
        tuning.maxdiff = 50.0;
        tuning.highprice = 60.0;
        let s = series(&[-5.0, 30.0, 55.0, 80.0]);
        let class = DayClassification::classify(&s, &tuning);
        // Low cutpoint is maxdiff = 50
        assert!(class.is_low_hour(0));
        assert!(class.is_low_hour(1));
        assert!(!class.is_low_hour(2));
        // High cutpoint clamps to min(1.4*50, blockprice, highprice) = 60
        assert!(class.is_high_hour(3));
        assert!(!class.is_high_hour(2));
    }

    #[test]
    fn lowprice_floor_admits_hours_above_cutpoint() {
        let mut tuning = Tuning::default();
        tuning.cutter = 10.0;
        tuning.maxdiff = 2.0;
        tuning.lowprice = 35.0;
        let s = series(&[20.0, 30.0, 40.0]);
        let class = DayClassification::classify(&s, &tuning);
        // 30 exceeds the cutpoint (22) but sits below the lowprice floor
        assert!(class.is_low_hour(1));
        assert!(!class.is_low_hour(2));
    }

    #[test]
    fn low_hours_sorted_by_ascending_value() {
        let s = series(&[30.0, 10.0, 20.0, 500.0]);
        let class = DayClassification::classify(&s, &Tuning::default());
        let values: Vec<f64> = class.low.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn spec_scenario_cutpoint() {
        // Minimum 35 with cutter=60, maxdiff=50 gives cutpoint min(56, 85, 150) = 56
        let mut values = vec![50.0, 40.0, 35.0];
        values.extend(std::iter::repeat(60.0).take(20));
        values.push(90.0);
        let s = series(&values);
        let class = DayClassification::classify(&s, &Tuning::default());
        assert!(class.is_low_hour(2));
        assert!(class.is_low_hour(0));
        assert!(!class.is_low_hour(10));
    }

    #[test]
    fn price_lookup_by_hour() {
        let s = series(&[50.0, 40.0]);
        assert_eq!(price_at_hour(&s, 1), Some(40.0));
        assert_eq!(price_at_hour(&s, 5), None);
    }
}
