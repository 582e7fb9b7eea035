use find_peaks::PeakFinder;

use crate::analysis::types::{Event, EventKind, VoltageSeries};

/// Samples per moving-average window
pub const MOVING_AVERAGE_WINDOW: usize = 5;
/// Voltage below which a sample is flagged
pub const LOW_VOLTAGE_THRESHOLD: f64 = 20.0;
/// A falling sample qualifies as an acceleration point when its second
/// difference drops below the negated tolerance
pub const DOWNWARD_ACCEL_TOLERANCE: f64 = 1e-6;

/// Dense moving average over the series as `(index, mean)` pairs.
///
/// Incomplete edge windows are dropped: the first derived point sits at
/// `MOVING_AVERAGE_WINDOW - 1`, and a series shorter than the window yields
/// an empty result.
pub fn moving_average(series: &VoltageSeries) -> Vec<(usize, f64)> {
    let samples = series.samples();
    if samples.len() < MOVING_AVERAGE_WINDOW {
        return Vec::new();
    }
    samples
        .windows(MOVING_AVERAGE_WINDOW)
        .enumerate()
        .map(|(i, window)| {
            let mean =
                window.iter().map(|s| s.voltage).sum::<f64>() / MOVING_AVERAGE_WINDOW as f64;
            (i + MOVING_AVERAGE_WINDOW - 1, mean)
        })
        .collect()
}

/// Local peaks and troughs, in series order.
///
/// Troughs are peaks of the negated series; tie-breaking is whatever the
/// peak-detection library does by default.
pub fn find_extrema(series: &VoltageSeries) -> (Vec<Event>, Vec<Event>) {
    if series.len() < 3 {
        return (Vec::new(), Vec::new());
    }
    let voltages = series.voltages();
    let negated: Vec<f64> = voltages.iter().map(|v| -v).collect();
    (
        collect_peaks(series, &voltages, EventKind::Peak),
        collect_peaks(series, &negated, EventKind::Trough),
    )
}

fn collect_peaks(series: &VoltageSeries, values: &[f64], kind: EventKind) -> Vec<Event> {
    let mut positions: Vec<usize> = PeakFinder::new(values)
        .find_peaks()
        .iter()
        .map(|p| p.middle_position())
        .collect();
    positions.sort_unstable();
    positions
        .into_iter()
        .filter_map(|i| series.get(i))
        .map(|s| Event::from_sample(s, kind))
        .collect()
}

/// Every sample with a voltage below [`LOW_VOLTAGE_THRESHOLD`], reported
/// individually (contiguous runs are not collapsed).
pub fn below_threshold(series: &VoltageSeries) -> Vec<Event> {
    series
        .samples()
        .iter()
        .filter(|s| s.voltage < LOW_VOLTAGE_THRESHOLD)
        .map(|s| Event::from_sample(s, EventKind::BelowThreshold))
        .collect()
}

/// Points where the series is falling and the drop is steepening.
///
/// Uses the backward second difference `v[i] - 2*v[i-1] + v[i-2]`; a point
/// qualifies when the sample is below its predecessor and the second
/// difference is negative beyond [`DOWNWARD_ACCEL_TOLERANCE`]. Restricting to
/// falling samples keeps acceleration points inside downward cycles, so a
/// strictly increasing series yields none.
pub fn downward_acceleration(series: &VoltageSeries) -> Vec<Event> {
    let samples = series.samples();
    let mut events = Vec::new();
    for i in 2..samples.len() {
        let slope = samples[i].voltage - samples[i - 1].voltage;
        let second_diff =
            samples[i].voltage - 2.0 * samples[i - 1].voltage + samples[i - 2].voltage;
        if slope < 0.0 && second_diff < -DOWNWARD_ACCEL_TOLERANCE {
            events.push(Event::from_sample(&samples[i], EventKind::Acceleration));
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::VoltageSample;

    fn series(values: &[f64]) -> VoltageSeries {
        VoltageSeries::new(
            values
                .iter()
                .map(|&voltage| VoltageSample {
                    index: 0,
                    timestamp: None,
                    voltage,
                })
                .collect(),
        )
    }

    #[test]
    fn test_moving_average_short_series_is_empty() {
        let short = series(&[1.0, 2.0, 3.0, 4.0]);
        assert!(moving_average(&short).is_empty());
    }

    #[test]
    fn test_moving_average_drops_edge_windows() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let ma = moving_average(&s);
        assert_eq!(ma, vec![(4, 3.0), (5, 4.0)]);
    }

    #[test]
    fn test_constant_series_has_no_extrema() {
        let flat = series(&[5.0; 10]);
        let (peaks, troughs) = find_extrema(&flat);
        assert!(peaks.is_empty());
        assert!(troughs.is_empty());
    }

    #[test]
    fn test_extrema_on_zigzag() {
        let s = series(&[1.0, 3.0, 1.0, 4.0, 1.0]);
        let (peaks, troughs) = find_extrema(&s);
        let peak_positions: Vec<usize> = peaks.iter().map(|e| e.index).collect();
        let trough_positions: Vec<usize> = troughs.iter().map(|e| e.index).collect();
        assert_eq!(peak_positions, vec![1, 3]);
        assert_eq!(trough_positions, vec![2]);
    }

    #[test]
    fn test_below_threshold_flags_single_sample() {
        let s = series(&[25.0, 30.0, 15.0, 28.0]);
        let events = below_threshold(&s);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].index, 2);
        assert_eq!(events[0].voltage, 15.0);
    }

    #[test]
    fn test_monotonic_series_has_no_acceleration() {
        // Strictly increasing, including a decelerating stretch
        let s = series(&[0.0, 10.0, 11.0, 11.5, 20.0]);
        assert!(downward_acceleration(&s).is_empty());
    }

    #[test]
    fn test_acceleration_detects_steepening_drop() {
        let s = series(&[10.0, 9.0, 5.0]);
        let events = downward_acceleration(&s);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].index, 2);
        assert_eq!(events[0].kind, EventKind::Acceleration);
    }

    #[test]
    fn test_flattening_drop_is_not_acceleration() {
        // Falling but decelerating: second difference is positive
        let s = series(&[10.0, 5.0, 4.0]);
        assert!(downward_acceleration(&s).is_empty());
    }
}
