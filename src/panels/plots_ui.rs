use egui::Ui;
use egui_phosphor::regular::{CHART_SCATTER, PLUS};

use super::panel_trait::{Panel, PanelContext, PanelState};
use super::settings_ui::SettingsPanel;
use super::traces_ui::TracesPanel;
use crate::data::figure;
use crate::data::session::SessionCommand;
use crate::plot::draw_figure;

const SIDE_WIDTH: f32 = 260.0;

/// Plot creation, tab strip and the active plot with its controls.
pub struct PlotsPanel {
    pub state: PanelState,
    new_name: String,
    traces: TracesPanel,
    settings: SettingsPanel,
}

impl Default for PlotsPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Plots", CHART_SCATTER),
            new_name: String::new(),
            traces: TracesPanel::default(),
            settings: SettingsPanel::default(),
        }
    }
}

impl PlotsPanel {
    fn create_ui(&mut self, ui: &mut Ui, ctx: &mut PanelContext<'_>) {
        ui.horizontal(|ui| {
            ui.label("New plot");
            let resp = ui.text_edit_singleline(&mut self.new_name);
            let check = ctx.session.plots.check_name(&self.new_name);
            let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui
                .add_enabled(check.is_ok(), egui::Button::new(format!("{PLUS} Create")))
                .clicked();
            if check.is_ok() && (clicked || enter) {
                let name = std::mem::take(&mut self.new_name);
                ctx.push(SessionCommand::CreatePlot { name: name.clone() });
                *ctx.active_plot = Some(name);
            } else if let Err(e) = &check {
                if !self.new_name.is_empty() {
                    ui.colored_label(ui.visuals().warn_fg_color, e.to_string());
                }
            }
        });
    }

    fn tabs_ui(&mut self, ui: &mut Ui, ctx: &mut PanelContext<'_>) {
        let names = ctx.session.plots.names();
        let stale = ctx
            .active_plot
            .as_deref()
            .is_some_and(|a| !names.iter().any(|n| n == a) && !ctx.commands.iter().any(|c| creates(c, a)));
        if ctx.active_plot.is_none() || stale {
            *ctx.active_plot = names.first().cloned();
        }
        ui.horizontal_wrapped(|ui| {
            for name in names {
                ui.selectable_value(ctx.active_plot, Some(name.clone()), name.as_str());
            }
        });
        self.traces.retain_plots(names);
        self.settings.retain_plots(names);
    }
}

fn creates(cmd: &SessionCommand, plot: &str) -> bool {
    matches!(cmd, SessionCommand::CreatePlot { name } if name == plot)
}

impl Panel for PlotsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, ctx: &mut PanelContext<'_>) {
        self.create_ui(ui, ctx);
        ui.separator();
        if ctx.session.plots.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.weak("No plots yet. Load an experiment and create a plot.");
            });
            return;
        }
        self.tabs_ui(ui, ctx);
        ui.separator();

        let Some(active) = ctx.active_plot.clone() else {
            return;
        };
        let Some(fig) = figure::render(ctx.session, &active) else {
            return;
        };

        egui::SidePanel::right(egui::Id::new(("plot_controls", active.as_str())))
            .resizable(true)
            .default_width(SIDE_WIDTH)
            .show_inside(ui, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.settings.render_for_plot(ui, ctx, &active);
                    ui.separator();
                    ui.strong(self.traces.title_and_icon());
                    self.traces.render_for_plot(ui, ctx, &active);
                });
            });
        egui::CentralPanel::default().show_inside(ui, |ui| {
            draw_figure(ui, ("figure", active.as_str()), &fig);
        });
    }
}
