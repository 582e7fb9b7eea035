use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamp format used by the voltage CSV, e.g. `01/01/24 14:30`.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%y %H:%M";

/// One sample of the voltage series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoltageSample {
    /// Position in the (chronologically ordered) series
    pub index: usize,
    /// Source timestamp, if the input file carries one
    pub timestamp: Option<NaiveDateTime>,
    pub voltage: f64,
}

/// Ordered voltage time series. Insertion order is chronological order;
/// sample indices always match their position in the series.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VoltageSeries {
    samples: Vec<VoltageSample>,
}

impl VoltageSeries {
    pub fn new(mut samples: Vec<VoltageSample>) -> Self {
        for (i, sample) in samples.iter_mut().enumerate() {
            sample.index = i;
        }
        Self { samples }
    }

    pub fn samples(&self) -> &[VoltageSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VoltageSample> {
        self.samples.get(index)
    }

    /// Voltage values alone, in series order
    pub fn voltages(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.voltage).collect()
    }
}

/// Category of a derived point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Peak,
    Trough,
    BelowThreshold,
    Acceleration,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Peak => "peak",
            EventKind::Trough => "trough",
            EventKind::BelowThreshold => "below_threshold",
            EventKind::Acceleration => "acceleration",
        }
    }
}

/// A derived point of interest, regenerated on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub index: usize,
    pub timestamp: Option<NaiveDateTime>,
    pub voltage: f64,
    pub kind: EventKind,
}

impl Event {
    pub fn from_sample(sample: &VoltageSample, kind: EventKind) -> Self {
        Self {
            index: sample.index,
            timestamp: sample.timestamp,
            voltage: sample.voltage,
            kind,
        }
    }

    /// Source timestamp formatted for display, `-` when absent
    pub fn timestamp_display(&self) -> String {
        self.timestamp
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_reindexes_samples() {
        let series = VoltageSeries::new(vec![
            VoltageSample {
                index: 7,
                timestamp: None,
                voltage: 1.0,
            },
            VoltageSample {
                index: 3,
                timestamp: None,
                voltage: 2.0,
            },
        ]);
        let indices: Vec<usize> = series.samples().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_timestamp_display_without_timestamp() {
        let event = Event {
            index: 0,
            timestamp: None,
            voltage: 1.0,
            kind: EventKind::Peak,
        };
        assert_eq!(event.timestamp_display(), "-");
    }
}
