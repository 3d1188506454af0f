use std::collections::HashMap;

use egui::Ui;
use egui_phosphor::regular::{BROOM, CHART_LINE, PENCIL_SIMPLE};

use super::panel_trait::{Panel, PanelContext, PanelState};
use crate::data::plot::Plot;
use crate::data::session::SessionCommand;
use crate::data::trace::{LineStyle, TraceEdit, TraceSource};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectorMode {
    #[default]
    AddRemove,
    Edit,
}

/// Selector state kept per plot.
#[derive(Debug, Clone, Default)]
struct SelectorState {
    mode: SelectorMode,
    experiment: Option<String>,
    edit: Option<EditBuffer>,
}

/// Pending edit of one trace. The trace's source is kept alongside its index
/// so the edit is dropped once another trace sits at that position.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    pub index: usize,
    pub source: TraceSource,
    pub edit: TraceEdit,
}

impl EditBuffer {
    /// Fresh buffer holding the current styling of trace `index`.
    pub fn for_trace(plot: &Plot, index: usize) -> Option<Self> {
        let trace = plot.traces.get(index)?;
        Some(Self {
            index,
            source: trace.source.clone(),
            edit: TraceEdit::from_trace(trace),
        })
    }

    /// Whether trace `index` of `plot` is still the trace this edit was started on.
    pub fn still_targets(&self, plot: &Plot) -> bool {
        plot.traces
            .get(self.index)
            .is_some_and(|t| t.source == self.source)
    }

    /// Keep `buffer` if it still targets its trace, otherwise start over on
    /// the trace now at the same position (or the last one).
    pub fn refresh(buffer: Option<Self>, plot: &Plot) -> Option<Self> {
        match buffer {
            Some(b) if b.still_targets(plot) => Some(b),
            Some(b) => Self::for_trace(plot, b.index.min(plot.traces.len().checked_sub(1)?)),
            None => Self::for_trace(plot, 0),
        }
    }
}

/// Adds, removes and restyles the traces of a plot.
pub struct TracesPanel {
    pub state: PanelState,
    per_plot: HashMap<String, SelectorState>,
}

impl Default for TracesPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Traces", CHART_LINE),
            per_plot: HashMap::new(),
        }
    }
}

impl TracesPanel {
    /// Selector for `plot`. Nothing is drawn if the plot does not exist.
    pub fn render_for_plot(&mut self, ui: &mut Ui, ctx: &mut PanelContext<'_>, plot: &str) {
        let Some(target) = ctx.session.plots.get(plot) else {
            return;
        };
        let sel = self.per_plot.entry(plot.to_string()).or_default();

        ui.horizontal(|ui| {
            ui.selectable_value(&mut sel.mode, SelectorMode::AddRemove, "Add/remove traces");
            ui.selectable_value(
                &mut sel.mode,
                SelectorMode::Edit,
                format!("{PENCIL_SIMPLE} Edit traces"),
            );
        });
        ui.separator();

        match sel.mode {
            SelectorMode::AddRemove => add_remove_ui(ui, ctx, sel, target),
            SelectorMode::Edit => edit_ui(ui, ctx, sel, target),
        }
    }

    /// Forget selector state of plots that no longer exist.
    pub fn retain_plots(&mut self, names: &[String]) {
        self.per_plot.retain(|k, _| names.contains(k));
    }
}

fn add_remove_ui(ui: &mut Ui, ctx: &mut PanelContext<'_>, sel: &mut SelectorState, plot: &Plot) {
    let registry = &ctx.session.experiments;
    if registry.is_empty() {
        ui.weak("Load an experiment first.");
        return;
    }
    if sel
        .experiment
        .as_deref()
        .is_none_or(|e| !registry.contains(e))
    {
        sel.experiment = registry.names().first().cloned();
    }
    let Some(current) = sel.experiment.clone() else {
        return;
    };

    egui::ComboBox::from_label("Experiment")
        .selected_text(current.as_str())
        .show_ui(ui, |ui| {
            for name in registry.names() {
                ui.selectable_value(&mut sel.experiment, Some(name.clone()), name.as_str());
            }
        });

    let Some(exp) = registry.get(&current) else {
        return;
    };
    let available = exp.valid_cycle_count();
    let selected = plot.selected_cycles(&current);

    if available == 0 {
        ui.weak("This experiment has no valid cycles.");
    }

    let mut next: Option<Vec<usize>> = None;
    ui.horizontal(|ui| {
        if ui.button("Select all").clicked() {
            let mut all = selected.clone();
            all.extend((0..available).filter(|c| !selected.contains(c)));
            next = Some(all);
        }
        if ui.button("Select none").clicked() {
            next = Some(Vec::new());
        }
    });

    egui::ScrollArea::vertical()
        .id_salt(("cycles", plot.name.as_str()))
        .max_height(220.0)
        .show(ui, |ui| {
            for cycle in 0..available {
                let mut on = selected.contains(&cycle);
                if ui.checkbox(&mut on, format!("Cycle {cycle}")).changed() {
                    let mut new_sel: Vec<usize> = selected.clone();
                    if on {
                        new_sel.push(cycle);
                    } else {
                        new_sel.retain(|&c| c != cycle);
                    }
                    next = Some(new_sel);
                }
            }
        });

    if let Some(cycles) = next {
        ctx.push(SessionCommand::SelectCycles {
            plot: plot.name.clone(),
            experiment: current,
            cycles,
        });
    }

    ui.separator();
    if ui
        .add_enabled(!plot.traces.is_empty(), egui::Button::new(format!("{BROOM} Remove all")))
        .on_hover_text("Remove every trace from this plot")
        .clicked()
    {
        ctx.push(SessionCommand::ClearPlot {
            plot: plot.name.clone(),
        });
        sel.edit = None;
    }
}

fn edit_ui(ui: &mut Ui, ctx: &mut PanelContext<'_>, sel: &mut SelectorState, plot: &Plot) {
    if plot.traces.is_empty() {
        ui.weak("This plot has no traces.");
        sel.edit = None;
        return;
    }
    let Some(buffer) = EditBuffer::refresh(sel.edit.take(), plot) else {
        return;
    };
    let buffer = sel.edit.insert(buffer);

    let mut picked = buffer.index;
    egui::ComboBox::from_label("Trace")
        .selected_text(plot.traces[buffer.index].name.as_str())
        .show_ui(ui, |ui| {
            for (i, t) in plot.traces.iter().enumerate() {
                ui.selectable_value(&mut picked, i, t.name.as_str());
            }
        });
    if picked != buffer.index {
        if let Some(fresh) = EditBuffer::for_trace(plot, picked) {
            *buffer = fresh;
        }
    }
    let index = buffer.index;
    let edit = &mut buffer.edit;

    ui.horizontal(|ui| {
        ui.label("Label");
        ui.text_edit_singleline(&mut edit.label);
    });
    ui.horizontal(|ui| {
        ui.label("Color");
        // trace colors are opaque
        let mut rgb = [edit.color.r(), edit.color.g(), edit.color.b()];
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            edit.color = egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
        }
    });
    egui::ComboBox::from_label("Line style")
        .selected_text(edit.style.label())
        .show_ui(ui, |ui| {
            for style in LineStyle::all() {
                ui.selectable_value(&mut edit.style, *style, style.label());
            }
        });

    let check = plot.check_label(index, &edit.label);
    if let Err(e) = &check {
        ui.colored_label(ui.visuals().warn_fg_color, e.to_string());
    }
    ui.horizontal(|ui| {
        if ui.add_enabled(check.is_ok(), egui::Button::new("Apply")).clicked() {
            ctx.push(SessionCommand::EditTrace {
                plot: plot.name.clone(),
                index,
                edit: edit.clone(),
            });
        }
        if ui.button("Revert").clicked() {
            *edit = TraceEdit::from_trace(&plot.traces[index]);
        }
    });
}

impl Panel for TracesPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }
}
