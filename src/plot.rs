//! Interactive drawing of a [`Figure`] with egui_plot.

use std::hash::Hash;

use eframe::egui;
use egui_plot::{Legend, Line, Plot, Points};

use crate::data::figure::Figure;
use crate::data::plot::AxisRange;

const LINE_WIDTH: f32 = 2.0;
const MARKER_RADIUS: f32 = 2.5;

/// What to do with the view bounds this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BoundsAction {
    Pin(AxisRange, AxisRange),
    /// Bounds were pinned last frame; go back to auto-fitting.
    Release,
    Keep,
}

fn bounds_action(was_pinned: bool, pinned: Option<(AxisRange, AxisRange)>) -> BoundsAction {
    match pinned {
        Some((x, y)) => BoundsAction::Pin(x, y),
        None if was_pinned => BoundsAction::Release,
        None => BoundsAction::Keep,
    }
}

/// Draw `figure` into `ui`. With user-defined bounds the view is pinned to
/// them; otherwise the plot auto-fits and can be panned/zoomed freely.
pub fn draw_figure(ui: &mut egui::Ui, id: impl Hash, figure: &Figure) {
    let id = egui::Id::new(id);
    let pinned = figure.x_range.zip(figure.y_range);
    let pinned_key = id.with("pinned");
    let was_pinned = ui
        .ctx()
        .data(|d| d.get_temp::<bool>(pinned_key))
        .unwrap_or(false);
    ui.ctx()
        .data_mut(|d| d.insert_temp(pinned_key, pinned.is_some()));
    let action = bounds_action(was_pinned, pinned);

    let plot = Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(figure.x_label)
        .y_axis_label(figure.y_label)
        .allow_drag(pinned.is_none())
        .allow_zoom(pinned.is_none())
        .allow_scroll(pinned.is_none())
        .allow_boxed_zoom(pinned.is_none());

    plot.show(ui, |plot_ui| {
        match action {
            BoundsAction::Pin(x, y) => {
                plot_ui.set_plot_bounds_x(x.min..=x.max);
                plot_ui.set_plot_bounds_y(y.min..=y.max);
            }
            BoundsAction::Release => plot_ui.set_auto_bounds(true),
            BoundsAction::Keep => {}
        }
        for series in &figure.series {
            let line = Line::new(series.name.as_str(), series.points.clone())
                .color(series.color)
                .width(LINE_WIDTH)
                .style(series.style.to_plot_style());
            plot_ui.line(line);
            if figure.show_markers && !series.points.is_empty() {
                let points = Points::new(series.name.as_str(), series.points.clone())
                    .radius(MARKER_RADIUS)
                    .color(series.color);
                plot_ui.points(points);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpinning_releases_bounds_once() {
        let x = AxisRange::new(-1.0, 1.0);
        let y = AxisRange::new(-0.5, 0.5);
        assert_eq!(bounds_action(false, Some((x, y))), BoundsAction::Pin(x, y));
        assert_eq!(bounds_action(true, Some((x, y))), BoundsAction::Pin(x, y));
        assert_eq!(bounds_action(true, None), BoundsAction::Release);
        assert_eq!(bounds_action(false, None), BoundsAction::Keep);
    }
}
