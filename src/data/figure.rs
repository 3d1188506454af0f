//! Pure view model of a plot, shared by the interactive plot and the exporters.

use egui::Color32;

use crate::data::plot::{AxisRange, PlotSettings};
use crate::data::session::Session;
use crate::data::trace::LineStyle;
use crate::data::transform;

/// Fraction of the data span added around auto-fitted bounds.
const AUTO_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct FigureSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
    pub style: LineStyle,
}

/// Everything needed to draw one plot, already in display units.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<FigureSeries>,
    pub show_markers: bool,
    /// User-defined bounds, already converted to display units.
    pub x_range: Option<AxisRange>,
    pub y_range: Option<AxisRange>,
}

impl Figure {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Bounds to draw: the user-defined ones, else the padded data extent.
    pub fn view_bounds(&self) -> Option<(AxisRange, AxisRange)> {
        let fitted = transform::data_bounds(self.series.iter().map(|s| s.points.as_slice()))
            .map(|(x, y)| {
                (
                    transform::pad_range(x, AUTO_MARGIN),
                    transform::pad_range(y, AUTO_MARGIN),
                )
            });
        match (self.x_range, self.y_range, fitted) {
            (Some(x), Some(y), _) => Some((x, y)),
            (_, _, None) => None,
            (x, y, Some((fx, fy))) => Some((x.unwrap_or(fx), y.unwrap_or(fy))),
        }
    }
}

/// Build the figure of plot `plot_name` from the current session state.
///
/// Traces whose experiment is no longer registered are skipped.
pub fn render(session: &Session, plot_name: &str) -> Option<Figure> {
    let plot = session.plots.get(plot_name)?;
    let settings = &plot.settings;
    let series = plot
        .traces
        .iter()
        .filter_map(|trace| {
            let Some(exp) = session.experiments.get(&trace.source.experiment) else {
                log::warn!(
                    "trace `{}` refers to missing experiment `{}`",
                    trace.name,
                    trace.source.experiment
                );
                return None;
            };
            Some(FigureSeries {
                name: trace.name.clone(),
                points: transform::transform_trace(trace, exp, settings),
                color: trace.color,
                style: trace.style,
            })
        })
        .collect();
    let (x_range, y_range) = user_ranges(settings);
    Some(Figure {
        title: plot.name.clone(),
        x_label: transform::x_axis_label(settings),
        y_label: transform::y_axis_label(settings),
        series,
        show_markers: settings.show_markers,
        x_range,
        y_range,
    })
}

fn user_ranges(settings: &PlotSettings) -> (Option<AxisRange>, Option<AxisRange>) {
    if settings.custom_range {
        (Some(settings.x_range), Some(settings.y_range()))
    } else {
        (None, None)
    }
}
