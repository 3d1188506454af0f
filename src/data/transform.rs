//! Unit transforms applied to traces at render time.

use crate::data::experiment::Experiment;
use crate::data::plot::{AxisRange, PlotSettings};
use crate::data::trace::Trace;

/// Express potentials against a different reference: `V - reference`.
pub fn shift(voltage: &[f64], reference: f64) -> Vec<f64> {
    voltage.iter().map(|v| v - reference).collect()
}

/// Current density: `I / area`. The area is validated positive on experiment creation.
pub fn normalize(current: &[f64], area: f64) -> Vec<f64> {
    current.iter().map(|i| i / area).collect()
}

/// Points of `trace` in the units selected by `settings`.
pub fn transform_trace(trace: &Trace, experiment: &Experiment, settings: &PlotSettings) -> Vec<[f64; 2]> {
    let vref = if settings.shift_by_reference {
        experiment.vref
    } else {
        0.0
    };
    let area = if settings.normalize_by_area {
        experiment.area()
    } else {
        1.0
    };
    trace
        .voltage
        .iter()
        .zip(trace.current.iter())
        .map(|(v, i)| [v - vref, i / area])
        .collect()
}

pub fn x_axis_label(settings: &PlotSettings) -> &'static str {
    if settings.shift_by_reference {
        "V vs S.H.E."
    } else {
        "V vs Ref."
    }
}

pub fn y_axis_label(settings: &PlotSettings) -> &'static str {
    if settings.normalize_by_area {
        "I (A/cm²)"
    } else {
        "I (A)"
    }
}

/// Bounding box of all finite points, `None` when there are none.
pub fn data_bounds<'a>(series: impl IntoIterator<Item = &'a [[f64; 2]]>) -> Option<(AxisRange, AxisRange)> {
    let mut x = AxisRange::new(f64::INFINITY, f64::NEG_INFINITY);
    let mut y = AxisRange::new(f64::INFINITY, f64::NEG_INFINITY);
    for pts in series {
        for p in pts.iter().filter(|p| p[0].is_finite() && p[1].is_finite()) {
            x.min = x.min.min(p[0]);
            x.max = x.max.max(p[0]);
            y.min = y.min.min(p[1]);
            y.max = y.max.max(p[1]);
        }
    }
    if x.min > x.max {
        return None;
    }
    Some((x, y))
}

/// Widen a range by `fraction` of its span on both sides; degenerate ranges get a unit span.
pub fn pad_range(r: AxisRange, fraction: f64) -> AxisRange {
    let span = r.max - r.min;
    if span <= 0.0 {
        let half = if r.min == 0.0 { 0.5 } else { r.min.abs() * 0.5 };
        return AxisRange::new(r.min - half, r.max + half);
    }
    AxisRange::new(r.min - span * fraction, r.max + span * fraction)
}
