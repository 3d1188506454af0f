//! The session state container and the commands that mutate it.
//!
//! [`Session`] owns every experiment and plot of one analysis. The UI never
//! mutates it while drawing: panels queue [`SessionCommand`]s that the app shell
//! applies once the frame has been rendered.

use crate::color_scheme::Palette;
use crate::data::colors;
use crate::data::experiment::{Experiment, ExperimentRegistry};
use crate::data::plot::{Plot, PlotCollection, PlotSettings};
use crate::data::trace::{Trace, TraceEdit, TraceSource};
use crate::error::{ValidationError, ViewerError};

/// Experiments and plots, without the session's behavioural settings.
/// This is what a session file carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContents {
    pub experiments: ExperimentRegistry,
    pub plots: PlotCollection,
}

/// Cycles added and removed by a [`Session::select_cycles`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub added: Vec<usize>,
    pub removed: Vec<usize>,
}

impl SelectionChange {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// A state change requested by the UI.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    AddExperiment {
        name: String,
        experiment: Box<Experiment>,
    },
    CreatePlot {
        name: String,
    },
    SelectCycles {
        plot: String,
        experiment: String,
        cycles: Vec<usize>,
    },
    EditTrace {
        plot: String,
        index: usize,
        edit: TraceEdit,
    },
    ClearPlot {
        plot: String,
    },
    UpdateSettings {
        plot: String,
        settings: PlotSettings,
    },
    Import(Box<SessionContents>),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub experiments: ExperimentRegistry,
    pub plots: PlotCollection,
    palette: Palette,
    populate_new_plots: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Palette::default(), true)
    }
}

impl Session {
    /// Empty session. `populate_new_plots` makes [`create_plot`](Self::create_plot)
    /// start with every valid cycle of every experiment.
    pub fn new(palette: Palette, populate_new_plots: bool) -> Self {
        Self {
            experiments: ExperimentRegistry::new(),
            plots: PlotCollection::default(),
            palette,
            populate_new_plots,
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty() && self.plots.is_empty()
    }

    pub fn add_experiment(&mut self, name: &str, experiment: Experiment) -> Result<(), ValidationError> {
        self.experiments.insert(name, experiment)?;
        log::info!("added experiment `{name}`");
        Ok(())
    }

    pub fn create_plot(&mut self, name: &str) -> Result<(), ValidationError> {
        self.plots.check_name(name)?;
        let mut plot = Plot::new(name);
        if self.populate_new_plots {
            for (exp_name, exp) in self.experiments.iter() {
                for cycle in 0..exp.valid_cycle_count() {
                    plot.push_trace(self.new_trace(exp_name, cycle)?);
                }
            }
        }
        let count = plot.traces.len();
        self.plots.insert(plot)?;
        log::info!("created plot `{name}` with {count} traces");
        Ok(())
    }

    /// Build a default-styled trace for cycle `cycle` of `experiment`.
    pub fn new_trace(&self, experiment: &str, cycle: usize) -> Result<Trace, ValidationError> {
        let exp = self
            .experiments
            .get(experiment)
            .ok_or_else(|| ValidationError::UnknownExperiment(experiment.to_string()))?;
        let (voltage, current) =
            exp.data
                .valid_cycle(cycle)
                .ok_or(ValidationError::CycleOutOfRange {
                    cycle,
                    available: exp.valid_cycle_count(),
                })?;
        let color = colors::trace_color(&self.experiments, self.palette, experiment, cycle)
            .ok_or_else(|| ValidationError::UnknownExperiment(experiment.to_string()))?;
        Ok(Trace::new(
            TraceSource::new(experiment, cycle),
            voltage,
            current,
            color,
        ))
    }

    /// Make the cycles of `experiment` shown in `plot` equal to `selection`.
    ///
    /// Traces of deselected cycles are removed; newly selected cycles are
    /// appended in selection order. Traces of other experiments and the
    /// styling of kept traces are untouched.
    pub fn select_cycles(
        &mut self,
        plot: &str,
        experiment: &str,
        selection: &[usize],
    ) -> Result<SelectionChange, ValidationError> {
        let available = self
            .experiments
            .get(experiment)
            .ok_or_else(|| ValidationError::UnknownExperiment(experiment.to_string()))?
            .valid_cycle_count();
        if let Some(&cycle) = selection.iter().find(|&&c| c >= available) {
            return Err(ValidationError::CycleOutOfRange { cycle, available });
        }
        let previous = self
            .plots
            .get(plot)
            .ok_or_else(|| ValidationError::UnknownPlot(plot.to_string()))?
            .selected_cycles(experiment);

        let removed: Vec<usize> = previous
            .iter()
            .copied()
            .filter(|c| !selection.contains(c))
            .collect();
        let mut added: Vec<usize> = Vec::new();
        for &c in selection {
            if !previous.contains(&c) && !added.contains(&c) {
                added.push(c);
            }
        }
        let new_traces = added
            .iter()
            .map(|&c| self.new_trace(experiment, c))
            .collect::<Result<Vec<_>, _>>()?;

        let target = self
            .plots
            .get_mut(plot)
            .ok_or_else(|| ValidationError::UnknownPlot(plot.to_string()))?;
        target
            .traces
            .retain(|t| t.source.experiment != experiment || !removed.contains(&t.source.cycle));
        for trace in new_traces {
            target.push_trace(trace);
        }

        Ok(SelectionChange { added, removed })
    }

    /// Replace label, color and line style of trace `index` of `plot`.
    /// Trace colors are opaque; any alpha in `edit.color` is dropped.
    pub fn edit_trace(&mut self, plot: &str, index: usize, edit: TraceEdit) -> Result<(), ValidationError> {
        let target = self
            .plots
            .get_mut(plot)
            .ok_or_else(|| ValidationError::UnknownPlot(plot.to_string()))?;
        if index >= target.traces.len() {
            return Err(ValidationError::UnknownTrace(index));
        }
        target.check_label(index, &edit.label)?;
        let trace = &mut target.traces[index];
        trace.name = edit.label;
        trace.color = colors::opaque(edit.color);
        trace.style = edit.style;
        Ok(())
    }

    /// Remove every trace of `plot`; the plot and its settings stay.
    pub fn clear_plot(&mut self, plot: &str) -> Result<(), ValidationError> {
        let target = self
            .plots
            .get_mut(plot)
            .ok_or_else(|| ValidationError::UnknownPlot(plot.to_string()))?;
        target.traces.clear();
        Ok(())
    }

    pub fn update_settings(&mut self, plot: &str, settings: PlotSettings) -> Result<(), ValidationError> {
        settings.validate()?;
        let target = self
            .plots
            .get_mut(plot)
            .ok_or_else(|| ValidationError::UnknownPlot(plot.to_string()))?;
        target.settings = settings;
        Ok(())
    }

    /// Copy of the experiments and plots, as written to a session file.
    pub fn contents(&self) -> SessionContents {
        SessionContents {
            experiments: self.experiments.clone(),
            plots: self.plots.clone(),
        }
    }

    /// Swap in imported contents wholesale.
    pub fn replace(&mut self, contents: SessionContents) {
        self.experiments = contents.experiments;
        self.plots = contents.plots;
    }

    pub fn clear(&mut self) {
        self.experiments.clear();
        self.plots.clear();
    }

    pub fn apply(&mut self, cmd: SessionCommand) -> Result<(), ViewerError> {
        log::debug!("applying {}", command_name(&cmd));
        match cmd {
            SessionCommand::AddExperiment { name, experiment } => {
                self.add_experiment(&name, *experiment)?
            }
            SessionCommand::CreatePlot { name } => self.create_plot(&name)?,
            SessionCommand::SelectCycles {
                plot,
                experiment,
                cycles,
            } => {
                let change = self.select_cycles(&plot, &experiment, &cycles)?;
                if !change.is_empty() {
                    log::debug!(
                        "plot `{plot}`: +{:?} -{:?} from `{experiment}`",
                        change.added,
                        change.removed
                    );
                }
            }
            SessionCommand::EditTrace { plot, index, edit } => self.edit_trace(&plot, index, edit)?,
            SessionCommand::ClearPlot { plot } => self.clear_plot(&plot)?,
            SessionCommand::UpdateSettings { plot, settings } => {
                self.update_settings(&plot, settings)?
            }
            SessionCommand::Import(contents) => {
                self.replace(*contents);
                log::info!(
                    "session imported: {} experiments, {} plots",
                    self.experiments.len(),
                    self.plots.len()
                );
            }
            SessionCommand::Clear => {
                self.clear();
                log::info!("session cleared");
            }
        }
        Ok(())
    }
}

fn command_name(cmd: &SessionCommand) -> &'static str {
    match cmd {
        SessionCommand::AddExperiment { .. } => "AddExperiment",
        SessionCommand::CreatePlot { .. } => "CreatePlot",
        SessionCommand::SelectCycles { .. } => "SelectCycles",
        SessionCommand::EditTrace { .. } => "EditTrace",
        SessionCommand::ClearPlot { .. } => "ClearPlot",
        SessionCommand::UpdateSettings { .. } => "UpdateSettings",
        SessionCommand::Import(_) => "Import",
        SessionCommand::Clear => "Clear",
    }
}
