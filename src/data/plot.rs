//! Named plots, their trace lists and per-plot display settings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::trace::Trace;
use crate::error::ValidationError;

/// Closed interval used for user-defined axis bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, axis: &'static str) -> Result<(), ValidationError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(ValidationError::InvalidRange {
                axis,
                min: self.min,
                max: self.max,
            })
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }
}

/// Per-plot rendering preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSettings {
    /// Divide currents by the electrode area.
    pub normalize_by_area: bool,
    /// Subtract the reference potential from voltages.
    pub shift_by_reference: bool,
    /// Draw a marker at every data point.
    pub show_markers: bool,
    /// Use `x_range`/`y_range_ma` instead of fitting the view to the data.
    pub custom_range: bool,
    /// Potential bounds in V.
    pub x_range: AxisRange,
    /// Current bounds in mA (mA/cm² when normalized).
    pub y_range_ma: AxisRange,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            normalize_by_area: false,
            shift_by_reference: false,
            show_markers: false,
            custom_range: false,
            x_range: AxisRange::new(-1.0, 1.0),
            y_range_ma: AxisRange::new(-1.0, 1.0),
        }
    }
}

impl PlotSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.x_range.validate("potential")?;
        self.y_range_ma.validate("current")
    }

    /// Current bounds converted from mA to the native unit.
    pub fn y_range(&self) -> AxisRange {
        self.y_range_ma.scaled(1e-3)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub name: String,
    pub traces: Vec<Trace>,
    pub settings: PlotSettings,
}

impl Plot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            traces: Vec::new(),
            settings: PlotSettings::default(),
        }
    }

    /// Cycle indices of `experiment` currently shown, in trace order.
    pub fn selected_cycles(&self, experiment: &str) -> Vec<usize> {
        self.traces
            .iter()
            .filter(|t| t.source.experiment == experiment)
            .map(|t| t.source.cycle)
            .collect()
    }

    pub fn position_of(&self, experiment: &str, cycle: usize) -> Option<usize> {
        self.traces
            .iter()
            .position(|t| t.source.experiment == experiment && t.source.cycle == cycle)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.traces.iter().map(|t| t.name.as_str()).collect()
    }

    /// `base`, or the first of `base (2)`, `base (3)`, ... not used by a trace of this plot.
    pub fn unique_label(&self, base: &str) -> String {
        let taken = |l: &str| self.traces.iter().any(|t| t.name == l);
        if !taken(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base} ({n})"))
            .find(|l| !taken(l))
            .unwrap_or_else(|| base.to_string())
    }

    /// Append `trace`, renaming it if its label is already used in this plot.
    pub fn push_trace(&mut self, mut trace: Trace) {
        trace.name = self.unique_label(&trace.name);
        self.traces.push(trace);
    }

    /// Check that trace `index` may be renamed to `label`.
    pub fn check_label(&self, index: usize, label: &str) -> Result<(), ValidationError> {
        if label.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let taken = self
            .traces
            .iter()
            .enumerate()
            .any(|(i, t)| i != index && t.name == label);
        if taken {
            return Err(ValidationError::DuplicateLabel(label.to_string()));
        }
        Ok(())
    }
}

/// Plots keyed by name, iterated in creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotCollection {
    plots: HashMap<String, Plot>,
    order: Vec<String>,
}

impl PlotCollection {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Plot> {
        self.plots.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Plot> {
        self.plots.get_mut(name)
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plot> {
        self.order.iter().filter_map(|n| self.plots.get(n))
    }

    pub fn check_name(&self, name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.plots.contains_key(name) {
            return Err(ValidationError::DuplicatePlot(name.to_string()));
        }
        Ok(())
    }

    pub fn insert(&mut self, plot: Plot) -> Result<(), ValidationError> {
        self.check_name(&plot.name)?;
        self.order.push(plot.name.clone());
        self.plots.insert(plot.name.clone(), plot);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.plots.clear();
        self.order.clear();
    }
}
