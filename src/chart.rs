use crate::error::{ReportError, Result};
use crate::metrics::{Dimension, MetricSet, Tool};
use plotters::coord::{CoordTranslate, Shift};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

// Three 500px panels side by side
const CANVAS_SIZE: (u32, u32) = (1500, 500);

const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 16;
const DATA_LABEL_FONT_SIZE: u32 = 16;

const PANEL_MARGIN: u32 = 15;
const X_LABEL_AREA_SIZE: u32 = 40;
const Y_LABEL_AREA_SIZE: u32 = 70;
const BAR_WIDTH: f64 = 0.6;

const LINEAR_AXIS_HEADROOM: f64 = 1.3;
const LINEAR_LABEL_OFFSET: f64 = 0.02;
const LOG_AXIS_HEADROOM: f64 = 4.0;
const LOG_LABEL_FACTOR: f64 = 1.15;
const DEFAULT_LOG_FLOOR: f64 = 0.01;

const FASTSEEK_COLOR: RGBColor = RGBColor(0, 128, 0); // Green
const SAMTOOLS_COLOR: RGBColor = RGBColor(255, 165, 0); // Orange

fn get_tool_color(tool: Tool) -> RGBColor {
    match tool {
        Tool::FastSeek => FASTSEEK_COLOR,
        Tool::Samtools => SAMTOOLS_COLOR,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log,
}

/// Text drawn above a bar, and the y coordinate of its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub tool: Tool,
    pub value: f64,
    pub color: (u8, u8, u8),
    pub annotation: Annotation,
}

/// One two-bar panel of the comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub dimension: Dimension,
    pub title: &'static str,
    pub y_label: &'static str,
    pub scale: AxisScale,
    pub y_min: f64,
    pub y_max: f64,
    pub bars: Vec<Bar>,
}

/// Everything drawn in the comparison chart.
///
/// Built from a [`MetricSet`] before any drawing happens, so the plotted
/// values can be inspected independently of the rendered image.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonFigure {
    pub width: u32,
    pub height: u32,
    pub panels: Vec<Panel>,
}

pub fn axis_scale(dimension: Dimension) -> AxisScale {
    match dimension {
        Dimension::SearchTime => AxisScale::Log,
        Dimension::IndexTime | Dimension::IndexSize => AxisScale::Linear,
    }
}

fn panel_title(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::IndexTime => "Indexing time",
        Dimension::SearchTime => "Searching time (log scale)",
        Dimension::IndexSize => "Index file size",
    }
}

fn y_axis_label(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::IndexTime | Dimension::SearchTime => "Time (s)",
        Dimension::IndexSize => "Size (MB)",
    }
}

pub fn format_annotation(value: f64, unit: &str) -> String {
    format!("{:.2} {}", value, unit)
}

fn linear_axis_bounds(values: &[f64]) -> (f64, f64) {
    let largest = values.iter().copied().fold(0.0_f64, f64::max);
    if largest > 0.0 {
        (0.0, largest * LINEAR_AXIS_HEADROOM)
    } else {
        (0.0, 1.0)
    }
}

fn log_axis_bounds(values: &[f64]) -> (f64, f64) {
    let smallest = values
        .iter()
        .copied()
        .filter(|&v| v > 0.0)
        .fold(f64::MAX, f64::min);
    let largest = values.iter().copied().fold(0.0_f64, f64::max);

    let floor = if smallest < f64::MAX {
        smallest / LOG_AXIS_HEADROOM
    } else {
        DEFAULT_LOG_FLOOR
    };
    (floor, largest.max(floor) * LOG_AXIS_HEADROOM)
}

impl Panel {
    pub fn new(dimension: Dimension, values: [f64; 2]) -> Self {
        let scale = axis_scale(dimension);
        let (y_min, y_max) = match scale {
            AxisScale::Linear => linear_axis_bounds(&values),
            AxisScale::Log => log_axis_bounds(&values),
        };

        let bars = Tool::all()
            .iter()
            .zip(values)
            .map(|(&tool, value)| {
                let label_y = match scale {
                    AxisScale::Linear => value + y_max * LINEAR_LABEL_OFFSET,
                    AxisScale::Log => value.max(y_min) * LOG_LABEL_FACTOR,
                };
                let RGBColor(r, g, b) = get_tool_color(tool);
                Bar {
                    tool,
                    value,
                    color: (r, g, b),
                    annotation: Annotation {
                        text: format_annotation(value, dimension.unit()),
                        y: label_y,
                    },
                }
            })
            .collect();

        Self {
            dimension,
            title: panel_title(dimension),
            y_label: y_axis_label(dimension),
            scale,
            y_min,
            y_max,
            bars,
        }
    }
}

impl ComparisonFigure {
    pub fn from_metrics(metrics: &MetricSet) -> Self {
        let panels = Dimension::all()
            .iter()
            .map(|&dimension| Panel::new(dimension, metrics.pair(dimension)))
            .collect();

        Self {
            width: CANVAS_SIZE.0,
            height: CANVAS_SIZE.1,
            panels,
        }
    }
}

/// Render the three-panel comparison chart to `output` as SVG.
///
/// The chart is drawn in memory, written to a temporary file next to
/// `output` and renamed over it. On error `output` is left untouched.
pub fn render_comparison(metrics: &MetricSet, output: &Path) -> Result<ComparisonFigure> {
    metrics.validate()?;

    let figure = ComparisonFigure::from_metrics(metrics);
    let svg = render_svg(&figure)?;
    write_atomically(output, svg.as_bytes())?;

    info!(path = %output.display(), bytes = svg.len(), "wrote comparison chart");
    println!("Generated: {}", output.display());
    Ok(figure)
}

/// Draw a figure into an SVG document.
pub fn render_svg(figure: &ComparisonFigure) -> Result<String> {
    let mut svg = String::new();
    {
        // The drawing context borrows `svg` and is dropped at the end of this
        // block, including on early return.
        let root = SVGBackend::with_string(&mut svg, (figure.width, figure.height))
            .into_drawing_area();
        draw_figure(&root, figure).map_err(render_error)?;
        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

fn render_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ReportError {
    ReportError::Render(err.to_string())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &ComparisonFigure,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let areas = root.split_evenly((1, figure.panels.len()));
    for (area, panel) in areas.iter().zip(&figure.panels) {
        debug!(panel = panel.title, scale = ?panel.scale, "drawing panel");
        draw_panel(area, panel)?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let num_bars = panel.bars.len();
    let x_range = -0.5..(num_bars as f64 - 0.5);

    match panel.scale {
        AxisScale::Linear => {
            let mut chart = ChartBuilder::on(area)
                .caption(panel.title, ("sans-serif", TITLE_FONT_SIZE))
                .margin(PANEL_MARGIN)
                .x_label_area_size(X_LABEL_AREA_SIZE)
                .y_label_area_size(Y_LABEL_AREA_SIZE)
                .build_cartesian_2d(x_range, panel.y_min..panel.y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(num_bars)
                .x_label_formatter(&|x| bar_label(panel, *x))
                .y_desc(panel.y_label)
                .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
                .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
                .draw()?;

            draw_bars(&mut chart, panel)
        }
        AxisScale::Log => {
            let mut chart = ChartBuilder::on(area)
                .caption(panel.title, ("sans-serif", TITLE_FONT_SIZE))
                .margin(PANEL_MARGIN)
                .x_label_area_size(X_LABEL_AREA_SIZE)
                .y_label_area_size(Y_LABEL_AREA_SIZE)
                .build_cartesian_2d(x_range, (panel.y_min..panel.y_max).log_scale())?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(num_bars)
                .x_label_formatter(&|x| bar_label(panel, *x))
                .y_desc(panel.y_label)
                .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
                .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
                .draw()?;

            draw_bars(&mut chart, panel)
        }
    }
}

/// Tool name under the bar at `x`, blank between bars.
fn bar_label(panel: &Panel, x: f64) -> String {
    let idx = x.round() as usize;
    if x >= -0.3 && (x - idx as f64).abs() < 0.3 {
        panel
            .bars
            .get(idx)
            .map(|bar| bar.tool.name().to_string())
            .unwrap_or_default()
    } else {
        String::new()
    }
}

fn draw_bars<DB, CT>(
    chart: &mut ChartContext<'_, DB, CT>,
    panel: &Panel,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
    CT: CoordTranslate<From = (f64, f64)>,
{
    for (idx, bar) in panel.bars.iter().enumerate() {
        let (r, g, b) = bar.color;
        let x_center = idx as f64;
        let x_left = x_center - BAR_WIDTH / 2.0;
        let x_right = x_center + BAR_WIDTH / 2.0;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x_left, panel.y_min), (x_right, bar.value.max(panel.y_min))],
            RGBColor(r, g, b).filled(),
        )))?;

        chart.draw_series(std::iter::once(Text::new(
            bar.annotation.text.clone(),
            (x_center, bar.annotation.y),
            ("sans-serif", DATA_LABEL_FONT_SIZE)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )))?;
    }
    Ok(())
}

fn write_atomically(output: &Path, contents: &[u8]) -> Result<()> {
    let output_error = |source: std::io::Error| ReportError::OutputWrite {
        path: output.to_path_buf(),
        source,
    };

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(output_error)?;
    temp.write_all(contents).map_err(output_error)?;
    temp.as_file().sync_all().map_err(output_error)?;
    temp.persist(output).map_err(|e| output_error(e.error))?;
    Ok(())
}
