//! Destination arrival recomputation.
//!
//! The provider's total duration assumes its own walking pace. Rather than
//! re-query it, the difference between the caller's walk time and the
//! provider's estimate for the same approach distance is added to the
//! provider's duration.

use chrono::{DateTime, Duration, FixedOffset};

use crate::domain::Itinerary;

use super::feasibility::Approach;

/// Arrival at the destination, corrected for the caller's walking speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrivalEstimate {
    /// Provider duration plus the walking-speed correction (seconds).
    pub adjusted_duration_secs: f64,

    /// Absolute arrival instant.
    pub arrival: DateTime<FixedOffset>,
}

impl ArrivalEstimate {
    /// Recompute arrival for an itinerary started at `now`.
    ///
    /// Returns `None` when the arrival instant is not representable.
    pub fn compute(
        itinerary: &Itinerary,
        approach: &Approach<'_>,
        baseline_speed: f64,
        now: DateTime<FixedOffset>,
    ) -> Option<Self> {
        let provider_walk_secs = approach.walk_meters / baseline_speed;
        let delta = approach.walk_seconds as f64 - provider_walk_secs;
        let adjusted_duration_secs = itinerary.duration_secs as f64 + delta;
        if !adjusted_duration_secs.is_finite() {
            return None;
        }

        let millis = (adjusted_duration_secs * 1000.0).round() as i64;
        let arrival = now.checked_add_signed(Duration::try_milliseconds(millis)?)?;

        Some(Self {
            adjusted_duration_secs,
            arrival,
        })
    }

    /// Adjusted duration in whole minutes (truncated).
    pub fn duration_mins(&self) -> i64 {
        (self.adjusted_duration_secs / 60.0).trunc() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Leg, SpeedProfile, SpeedTable, TransitDetails};

    const NOW: i64 = 1_700_000_000;

    fn now() -> DateTime<FixedOffset> {
        DateTime::from_timestamp(NOW, 0).unwrap().fixed_offset()
    }

    fn itinerary(walk_meters: f64, duration_secs: i64) -> Itinerary {
        Itinerary {
            index: 0,
            legs: vec![
                Leg::Walk {
                    distance_meters: walk_meters,
                    instruction: "Walk".to_string(),
                },
                Leg::Transit(TransitDetails {
                    line_name: "Blue Line".to_string(),
                    departure_stop: "State".to_string(),
                    arrival_stop: "Airport".to_string(),
                    num_stops: 3,
                    departure_time: NOW + 900,
                    arrival_time: None,
                }),
            ],
            duration_secs,
            distance_text: "6 km".to_string(),
            polyline: None,
        }
    }

    fn estimate(it: &Itinerary, profile: SpeedProfile) -> ArrivalEstimate {
        let approach = Approach::plan(it, profile, &SpeedTable::default(), now()).unwrap();
        ArrivalEstimate::compute(it, &approach, 1.4, now()).unwrap()
    }

    #[test]
    fn baseline_pace_leaves_duration_unchanged() {
        // 280 m at 1.4 m/s = exactly 200 s either way
        let it = itinerary(280.0, 1500);
        let est = estimate(&it, SpeedProfile::Normal);

        assert_eq!(est.adjusted_duration_secs, 1500.0);
        assert_eq!(est.arrival, now() + Duration::seconds(1500));
        assert_eq!(est.duration_mins(), 25);
    }

    #[test]
    fn slow_pace_adds_time() {
        // 280 m: slow walk 311 s vs baseline 200 s, +111 s
        let it = itinerary(280.0, 1500);
        let est = estimate(&it, SpeedProfile::Slow);

        assert_eq!(est.adjusted_duration_secs, 1611.0);
        assert_eq!(est.arrival, now() + Duration::seconds(1611));
        assert_eq!(est.duration_mins(), 26);
    }

    #[test]
    fn fast_pace_removes_time() {
        // 280 m: fast walk 155 s vs baseline 200 s, -45 s
        let it = itinerary(280.0, 1500);
        let est = estimate(&it, SpeedProfile::Fast);

        assert_eq!(est.adjusted_duration_secs, 1455.0);
        assert_eq!(est.duration_mins(), 24);
    }

    #[test]
    fn fractional_baseline_kept_to_the_millisecond() {
        // 690 m: normal walk floors to 492 s, baseline is 492.857 s
        let it = itinerary(690.0, 1620);
        let est = estimate(&it, SpeedProfile::Normal);

        assert!((est.adjusted_duration_secs - 1619.142857).abs() < 1e-3);
        assert_eq!(est.arrival, now() + Duration::milliseconds(1_619_143));
        assert_eq!(est.duration_mins(), 26);
    }

    #[test]
    fn arrival_beyond_calendar_is_none() {
        let it = itinerary(280.0, 10_000_000_000_000);
        let approach = Approach::plan(&it, SpeedProfile::Normal, &SpeedTable::default(), now())
            .unwrap();

        assert!(ArrivalEstimate::compute(&it, &approach, 1.4, now()).is_none());
    }
}
