use std::collections::HashMap;

use egui::Ui;
use egui_phosphor::regular::SLIDERS_HORIZONTAL;

use super::panel_trait::{Panel, PanelContext, PanelState};
use crate::data::plot::PlotSettings;
use crate::data::session::SessionCommand;

/// Per-plot display options: unit transforms, markers and fixed bounds.
///
/// Edits that fail validation (for example `min >= max`) stay in a local
/// draft and are not sent to the session until they become valid again.
pub struct SettingsPanel {
    pub state: PanelState,
    drafts: HashMap<String, PlotSettings>,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Settings", SLIDERS_HORIZONTAL),
            drafts: HashMap::new(),
        }
    }
}

impl SettingsPanel {
    pub fn render_for_plot(&mut self, ui: &mut Ui, ctx: &mut PanelContext<'_>, plot: &str) {
        let Some(target) = ctx.session.plots.get(plot) else {
            return;
        };
        let mut draft = self
            .drafts
            .get(plot)
            .cloned()
            .unwrap_or_else(|| target.settings.clone());

        ui.strong(self.title_and_icon());
        ui.checkbox(&mut draft.normalize_by_area, "Normalize by area")
            .on_hover_text("Divide currents by the electrode area (A/cm²)");
        ui.checkbox(&mut draft.shift_by_reference, "Shift by reference")
            .on_hover_text("Subtract the reference potential (V vs S.H.E.)");
        ui.checkbox(&mut draft.show_markers, "Show markers");
        ui.checkbox(&mut draft.custom_range, "Custom axis ranges");

        ui.add_enabled_ui(draft.custom_range, |ui| {
            egui::Grid::new(("axis_ranges", plot))
                .num_columns(3)
                .show(ui, |ui| {
                    ui.label("");
                    ui.label("min");
                    ui.label("max");
                    ui.end_row();

                    ui.label("Potential (V)");
                    ui.add(egui::DragValue::new(&mut draft.x_range.min).speed(0.01));
                    ui.add(egui::DragValue::new(&mut draft.x_range.max).speed(0.01));
                    ui.end_row();

                    let unit = if draft.normalize_by_area {
                        "Current (mA/cm²)"
                    } else {
                        "Current (mA)"
                    };
                    ui.label(unit);
                    ui.add(egui::DragValue::new(&mut draft.y_range_ma.min).speed(0.01));
                    ui.add(egui::DragValue::new(&mut draft.y_range_ma.max).speed(0.01));
                    ui.end_row();
                });
        });

        match draft.validate() {
            Ok(()) => {
                self.drafts.remove(plot);
                if draft != target.settings {
                    ctx.push(SessionCommand::UpdateSettings {
                        plot: plot.to_string(),
                        settings: draft,
                    });
                }
            }
            Err(e) => {
                ui.colored_label(ui.visuals().warn_fg_color, e.to_string());
                self.drafts.insert(plot.to_string(), draft);
            }
        }
    }

    pub fn retain_plots(&mut self, names: &[String]) {
        self.drafts.retain(|k, _| names.contains(k));
    }
}

impl Panel for SettingsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }
}
