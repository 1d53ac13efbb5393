//! Boundary matrix for the anticipatory planner: needhour 7, duration 1,
//! earliest 2, preptime 1, blockprice 150.

use calor::prep::{PrepDecision, evaluate_window};
use calor::prices::PricePoint;
use calor::tuning::PrepWindow;
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

fn window() -> PrepWindow {
    PrepWindow {
        earliest: 2.0,
        needhour: 7.0,
        duration: 1.0,
        preptime: 1.0,
    }
}

fn decision(authoritative: bool, should_heat: bool) -> PrepDecision {
    PrepDecision {
        authoritative,
        should_heat,
    }
}

#[test]
fn inside_guarantee_with_expensive_hour_blocks() {
    let series: Vec<PricePoint> = (0..24)
        .map(|h| point(h, if h == 7 { 200.0 } else { 100.0 }))
        .collect();
    assert_eq!(
        evaluate_window(&window(), &[], &series, 150.0, 7.5),
        decision(true, false)
    );
}

#[test]
fn inside_guarantee_with_affordable_hour_heats() {
    let series: Vec<PricePoint> = (0..24).map(|h| point(h, 100.0)).collect();
    assert_eq!(
        evaluate_window(&window(), &[], &series, 150.0, 7.5),
        decision(true, true)
    );
}

#[test]
fn before_earliest_is_not_authoritative() {
    let series: Vec<PricePoint> = (0..24).map(|h| point(h, 100.0)).collect();
    assert_eq!(
        evaluate_window(&window(), &[], &series, 150.0, 1.0),
        decision(false, false)
    );
}

#[test]
fn preptime_boundary_without_cheap_slot_heats() {
    let series: Vec<PricePoint> = (0..24).map(|h| point(h, 100.0)).collect();
    // No low hours remain in [6.5, 7); the preptime boundary (6.0) has
    // been reached, so heat now
    assert_eq!(
        evaluate_window(&window(), &[], &series, 150.0, 6.5),
        decision(true, true)
    );
}
