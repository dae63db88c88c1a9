//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::services::{CostEstimator, estimate_cost};
use domain::value_objects::{Coordinate, Distance, Humidity, WindSpeed};
use proptest::prelude::*;

// ============================================================================
// Cost estimator
// ============================================================================

mod cost_tests {
    use super::*;

    proptest! {
        #[test]
        fn cost_is_ten_times_distance(d in 0.0f64..100_000.0f64) {
            let cost = estimate_cost(d).unwrap();
            prop_assert!((cost - 10.0 * d).abs() < 1e-6);
        }

        #[test]
        fn negative_distance_never_priced(d in -100_000.0f64..-0.0001f64) {
            prop_assert!(estimate_cost(d).is_err());
        }

        #[test]
        fn cost_is_monotonic(a in 0.0f64..10_000.0f64, b in 0.0f64..10_000.0f64) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(estimate_cost(lo).unwrap() <= estimate_cost(hi).unwrap());
        }

        #[test]
        fn route_cost_matches_kilometer_cost(meters in 0.0f64..5_000_000.0f64) {
            let estimator = CostEstimator::default();
            let via_distance = estimator.cost_for(Distance::from_meters(meters)).unwrap();
            let via_km = estimator.cost_for_kilometers(meters / 1000.0).unwrap();
            prop_assert!((via_distance.amount() - via_km.amount()).abs() < 1e-6);
        }
    }
}

// ============================================================================
// Coordinate
// ============================================================================

mod coordinate_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_accepted(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let c = Coordinate::new(lat, lon);
            prop_assert!(c.is_ok());
            let c = c.unwrap();
            prop_assert!((c.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((c.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![(-1000.0f64..-90.1f64), (90.1f64..1000.0f64)],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(Coordinate::new(lat, lon).is_err());
        }
    }
}

// ============================================================================
// Weather values
// ============================================================================

mod weather_value_tests {
    use super::*;

    proptest! {
        #[test]
        fn wind_conversion_is_linear(mps in 0.0f64..100.0f64) {
            let kph = WindSpeed::from_meters_per_second(mps).kilometers_per_hour();
            prop_assert!((kph - mps * 3.6).abs() < 1e-9);
        }

        #[test]
        fn wind_display_has_one_decimal(mps in 0.0f64..100.0f64) {
            let shown = WindSpeed::from_meters_per_second(mps).display_kph();
            let decimals = shown.split('.').nth(1).map(str::len);
            prop_assert_eq!(decimals, Some(1));
        }

        #[test]
        fn humidity_never_exceeds_max(value in any::<u8>()) {
            prop_assert!(Humidity::from_percent(value).percent() <= Humidity::MAX);
        }
    }
}
