//! Departure/arrival balance of a station, bucketed for styling.

/// Discrete flow levels, from arrival-heavy to departure-heavy.
pub const FLOW_LEVELS: [f64; 3] = [0.0, 0.5, 1.0];

/// Departures as a share of total traffic. Stations without traffic report 0.
pub fn departure_ratio(departures: u32, total_traffic: u32) -> f64 {
    if total_traffic == 0 {
        return 0.0;
    }
    departures as f64 / total_traffic as f64
}

/// Quantize a ratio in `[0, 1]` into equal thirds.
///
/// Values below the domain and NaN land in the lowest level, values above it
/// in the highest.
pub fn classify_flow(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return FLOW_LEVELS[0];
    }
    let buckets = FLOW_LEVELS.len();
    let index = (1..buckets)
        .map(|i| i as f64 / buckets as f64)
        .filter(|threshold| *threshold <= ratio)
        .count();
    FLOW_LEVELS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_midpoint() {
        assert_eq!(classify_flow(0.0), 0.0);
        assert_eq!(classify_flow(1.0), 1.0);
        assert_eq!(classify_flow(0.5), 0.5);
    }

    #[test]
    fn thresholds_fall_at_thirds() {
        assert_eq!(classify_flow(0.33), 0.0);
        assert_eq!(classify_flow(1.0 / 3.0), 0.5);
        assert_eq!(classify_flow(0.66), 0.5);
        assert_eq!(classify_flow(2.0 / 3.0), 1.0);
    }

    #[test]
    fn output_is_always_a_level() {
        for step in 0..=100 {
            let level = classify_flow(step as f64 / 100.0);
            assert!(FLOW_LEVELS.contains(&level), "unexpected level {level}");
        }
        assert_eq!(classify_flow(f64::NAN), 0.0);
        assert_eq!(classify_flow(-0.2), 0.0);
        assert_eq!(classify_flow(3.0), 1.0);
    }

    #[test]
    fn zero_traffic_ratio_is_zero() {
        assert_eq!(departure_ratio(0, 0), 0.0);
        assert_eq!(departure_ratio(3, 4), 0.75);
    }
}
