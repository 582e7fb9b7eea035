use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;

use crate::analysis::{Event, VoltageSeries};
use crate::error::RenderError;

/// Dimensions and colors shared by every chart.
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub series_color: RGBColor,
    pub overlay_color: RGBColor,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: WHITE,
            series_color: BLUE,
            overlay_color: RGBColor(230, 120, 20),
        }
    }
}

/// Marker overlay drawn on top of the voltage line.
struct MarkerSet<'a> {
    label: &'a str,
    color: RGBColor,
    events: &'a [Event],
}

pub fn render_raw(series: &VoltageSeries, style: &PlotStyle) -> Result<Vec<u8>, RenderError> {
    render_view("Original Voltage Data", series, None, &[], style)
}

pub fn render_moving_average(
    series: &VoltageSeries,
    moving_average: &[(usize, f64)],
    style: &PlotStyle,
) -> Result<Vec<u8>, RenderError> {
    render_view(
        "Voltage with 5-sample Moving Average",
        series,
        Some(("5-sample MA", moving_average)),
        &[],
        style,
    )
}

pub fn render_extrema(
    series: &VoltageSeries,
    peaks: &[Event],
    troughs: &[Event],
    style: &PlotStyle,
) -> Result<Vec<u8>, RenderError> {
    render_view(
        "Local Peaks & Troughs",
        series,
        None,
        &[
            MarkerSet {
                label: "Peaks",
                color: RED,
                events: peaks,
            },
            MarkerSet {
                label: "Troughs",
                color: GREEN,
                events: troughs,
            },
        ],
        style,
    )
}

pub fn render_threshold(
    series: &VoltageSeries,
    below_threshold: &[Event],
    style: &PlotStyle,
) -> Result<Vec<u8>, RenderError> {
    render_view(
        "Voltage Below 20",
        series,
        None,
        &[MarkerSet {
            label: "Voltage < 20",
            color: RED,
            events: below_threshold,
        }],
        style,
    )
}

pub fn render_acceleration(
    series: &VoltageSeries,
    accelerations: &[Event],
    style: &PlotStyle,
) -> Result<Vec<u8>, RenderError> {
    render_view(
        "Downward Acceleration Points",
        series,
        None,
        &[MarkerSet {
            label: "Downward Acceleration",
            color: MAGENTA,
            events: accelerations,
        }],
        style,
    )
}

fn render_view(
    caption: &str,
    series: &VoltageSeries,
    overlay: Option<(&str, &[(usize, f64)])>,
    markers: &[MarkerSet<'_>],
    style: &PlotStyle,
) -> Result<Vec<u8>, RenderError> {
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;

        let x_max = (series.len().max(2) - 1) as f64;
        let (y_min, y_max) = y_bounds(series, overlay);

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(caption, ("sans-serif", 20))
            .set_label_area_size(LabelAreaPosition::Left, 50)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Sample")
            .y_desc("Voltage")
            .draw()?;

        if !series.is_empty() {
            let color = style.series_color;
            chart
                .draw_series(LineSeries::new(
                    series
                        .samples()
                        .iter()
                        .map(|s| (s.index as f64, s.voltage)),
                    &color,
                ))?
                .label("Voltage")
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }

        if let Some((label, points)) = overlay {
            if !points.is_empty() {
                let color = style.overlay_color;
                chart
                    .draw_series(LineSeries::new(
                        points.iter().map(|&(i, v)| (i as f64, v)),
                        &color,
                    ))?
                    .label(label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
            }
        }

        for set in markers {
            if set.events.is_empty() {
                continue;
            }
            let color = set.color;
            chart
                .draw_series(
                    set.events
                        .iter()
                        .map(|e| Circle::new((e.index as f64, e.voltage), 4, color.filled())),
                )?
                .label(set.label)
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
        }

        if !series.is_empty() {
            chart
                .configure_series_labels()
                .border_style(&BLACK.mix(0.3))
                .background_style(&WHITE.mix(0.9))
                .draw()?;
        }
        root.present()?;
    }
    encode_png(buffer, style.width, style.height)
}

fn y_bounds(series: &VoltageSeries, overlay: Option<(&str, &[(usize, f64)])>) -> (f64, f64) {
    let mut values = series.voltages();
    if let Some((_, points)) = overlay {
        values.extend(points.iter().map(|&(_, v)| v));
    }
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer)
        .ok_or_else(|| RenderError::Chart("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
