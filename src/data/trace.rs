//! Traces: one plotted cycle with its display styling.

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Line dash style of a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dot,
    Dash,
    LongDash,
    DashDot,
    LongDashDot,
}

impl LineStyle {
    pub fn all() -> &'static [LineStyle] {
        &[
            LineStyle::Solid,
            LineStyle::Dot,
            LineStyle::Dash,
            LineStyle::LongDash,
            LineStyle::DashDot,
            LineStyle::LongDashDot,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dot => "dot",
            LineStyle::Dash => "dash",
            LineStyle::LongDash => "longdash",
            LineStyle::DashDot => "dashdot",
            LineStyle::LongDashDot => "longdashdot",
        }
    }

    /// Closest `egui_plot` style. egui_plot has no dash-dot patterns, so
    /// those are drawn as dashes of a distinct length.
    pub fn to_plot_style(self) -> egui_plot::LineStyle {
        match self {
            LineStyle::Solid => egui_plot::LineStyle::Solid,
            LineStyle::Dot => egui_plot::LineStyle::Dotted { spacing: 4.0 },
            LineStyle::Dash => egui_plot::LineStyle::Dashed { length: 6.0 },
            LineStyle::LongDash => egui_plot::LineStyle::Dashed { length: 14.0 },
            LineStyle::DashDot => egui_plot::LineStyle::Dashed { length: 3.0 },
            LineStyle::LongDashDot => egui_plot::LineStyle::Dashed { length: 10.0 },
        }
    }

    /// `(dash, gap)` in pixels for exported figures, `None` for solid lines.
    pub fn dash_pattern(self) -> Option<(u32, u32)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dot => Some((2, 4)),
            LineStyle::Dash => Some((8, 6)),
            LineStyle::LongDash => Some((18, 6)),
            LineStyle::DashDot => Some((8, 4)),
            LineStyle::LongDashDot => Some((16, 4)),
        }
    }
}

/// Where a trace came from: experiment name and valid-cycle index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceSource {
    pub experiment: String,
    pub cycle: usize,
}

impl TraceSource {
    pub fn new(experiment: impl Into<String>, cycle: usize) -> Self {
        Self {
            experiment: experiment.into(),
            cycle,
        }
    }

    /// Label a freshly added trace gets.
    pub fn default_label(&self) -> String {
        format!("{} / Cycle {}", self.experiment, self.cycle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub voltage: Vec<f64>,
    pub current: Vec<f64>,
    pub color: Color32,
    pub style: LineStyle,
    pub source: TraceSource,
}

impl Trace {
    /// New solid trace with the default `"{experiment} / Cycle {n}"` label.
    pub fn new(source: TraceSource, voltage: &[f64], current: &[f64], color: Color32) -> Self {
        Self {
            name: source.default_label(),
            voltage: voltage.to_vec(),
            current: current.to_vec(),
            color,
            style: LineStyle::Solid,
            source,
        }
    }

    pub fn len(&self) -> usize {
        self.voltage.len().min(self.current.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// User edit applied to a single trace; series and provenance are untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEdit {
    pub label: String,
    pub color: Color32,
    pub style: LineStyle,
}

impl TraceEdit {
    pub fn from_trace(trace: &Trace) -> Self {
        Self {
            label: trace.name.clone(),
            color: trace.color,
            style: trace.style,
        }
    }
}
