use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use tera::{Context, Tera};

use crate::analysis::{AnalysisReport, Event, VoltageSeries};
use crate::error::RenderError;
use crate::render::chart::{self, PlotStyle};

const DASHBOARD_TEMPLATE: &str = "dashboard.html";

/// Build the Tera registry holding the dashboard template.
pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        DASHBOARD_TEMPLATE,
        include_str!("../../templates/dashboard.html.tera"),
    )?;
    Ok(tera)
}

#[derive(Debug, Serialize)]
struct PlotView {
    title: String,
    uri: String,
}

#[derive(Debug, Serialize)]
struct EventRow {
    index: usize,
    timestamp: String,
    voltage: String,
}

impl EventRow {
    fn from_event(event: &Event) -> Self {
        Self {
            index: event.index,
            timestamp: event.timestamp_display(),
            voltage: format!("{:.2}", event.voltage),
        }
    }
}

fn rows(events: &[Event]) -> Vec<EventRow> {
    events.iter().map(EventRow::from_event).collect()
}

fn plot(title: &str, png: Vec<u8>) -> PlotView {
    PlotView {
        title: title.to_string(),
        uri: format!("data:image/png;base64,{}", STANDARD.encode(png)),
    }
}

/// Compose the full dashboard page from a series and its derived views.
pub fn render_dashboard(
    tera: &Tera,
    series: &VoltageSeries,
    report: &AnalysisReport,
    warning: Option<String>,
) -> Result<String, RenderError> {
    let style = PlotStyle::default();
    let plots = vec![
        plot("Original Voltage Data", chart::render_raw(series, &style)?),
        plot(
            "Voltage with 5-sample Moving Average",
            chart::render_moving_average(series, &report.moving_average, &style)?,
        ),
        plot(
            "Local Peaks & Troughs",
            chart::render_extrema(series, &report.peaks, &report.troughs, &style)?,
        ),
        plot(
            "Voltage Below 20",
            chart::render_threshold(series, &report.below_threshold, &style)?,
        ),
        plot(
            "Downward Acceleration Points",
            chart::render_acceleration(series, &report.accelerations, &style)?,
        ),
    ];

    let mut context = Context::new();
    context.insert("plots", &plots);
    context.insert("peaks", &rows(&report.peaks));
    context.insert("troughs", &rows(&report.troughs));
    context.insert("below_threshold", &rows(&report.below_threshold));
    context.insert("accelerations", &rows(&report.accelerations));
    context.insert("sample_count", &series.len());
    context.insert("error", &Option::<String>::None);
    context.insert("warning", &warning);
    Ok(tera.render(DASHBOARD_TEMPLATE, &context)?)
}

/// Render the page shell with an error banner and no charts.
pub fn render_error(tera: &Tera, message: &str) -> Result<String, RenderError> {
    let mut context = Context::new();
    context.insert("plots", &Vec::<PlotView>::new());
    context.insert("peaks", &Vec::<EventRow>::new());
    context.insert("troughs", &Vec::<EventRow>::new());
    context.insert("below_threshold", &Vec::<EventRow>::new());
    context.insert("accelerations", &Vec::<EventRow>::new());
    context.insert("sample_count", &0usize);
    context.insert("error", &Some(message));
    context.insert("warning", &Option::<String>::None);
    Ok(tera.render(DASHBOARD_TEMPLATE, &context)?)
}
