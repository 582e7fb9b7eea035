use serde::Serialize;

use crate::analysis::signal;
use crate::analysis::types::{Event, VoltageSeries};

/// Every derived view of one voltage series, recomputed per request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub moving_average: Vec<(usize, f64)>,
    pub peaks: Vec<Event>,
    pub troughs: Vec<Event>,
    pub below_threshold: Vec<Event>,
    pub accelerations: Vec<Event>,
}

impl AnalysisReport {
    pub fn from_series(series: &VoltageSeries) -> Self {
        let (peaks, troughs) = signal::find_extrema(series);
        Self {
            moving_average: signal::moving_average(series),
            peaks,
            troughs,
            below_threshold: signal::below_threshold(series),
            accelerations: signal::downward_acceleration(series),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::VoltageSample;

    #[test]
    fn test_empty_series_degrades_to_no_events() {
        let report = AnalysisReport::from_series(&VoltageSeries::default());
        assert!(report.moving_average.is_empty());
        assert!(report.peaks.is_empty());
        assert!(report.troughs.is_empty());
        assert!(report.below_threshold.is_empty());
        assert!(report.accelerations.is_empty());
    }

    #[test]
    fn test_report_covers_all_views() {
        let samples = [25.0, 27.0, 24.0, 18.0, 26.0, 28.0, 27.5, 26.0, 29.0]
            .iter()
            .map(|&voltage| VoltageSample {
                index: 0,
                timestamp: None,
                voltage,
            })
            .collect();
        let report = AnalysisReport::from_series(&VoltageSeries::new(samples));
        assert!(!report.moving_average.is_empty());
        assert!(!report.peaks.is_empty());
        assert!(!report.troughs.is_empty());
        assert_eq!(report.below_threshold.len(), 1);
        assert!(!report.accelerations.is_empty());
    }
}
