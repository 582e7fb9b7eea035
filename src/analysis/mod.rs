pub mod loader;
pub mod report;
pub mod signal;
pub mod types;

pub use loader::load_series;
pub use report::AnalysisReport;
pub use types::{Event, EventKind, VoltageSample, VoltageSeries, TIMESTAMP_FORMAT};
