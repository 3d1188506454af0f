use egui::Ui;
use egui_phosphor::regular::{EXPORT, FILE_CSV, IMAGE};

use super::panel_trait::{Panel, PanelContext, PanelState};
use crate::data::export::{self, ExportFormat};
use crate::data::figure::{self, Figure};

/// Writes the active plot to an image/vector file or to CSV.
pub struct ExportPanel {
    pub state: PanelState,
}

impl Default for ExportPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Export", EXPORT),
        }
    }
}

fn active_figure(ctx: &PanelContext<'_>) -> Option<Figure> {
    let name = ctx.active_plot.as_deref()?;
    figure::render(ctx.session, name)
}

impl ExportPanel {
    fn save_figure(&self, ctx: &mut PanelContext<'_>, fig: &Figure) {
        let preferred = ctx.config.export.format;
        let mut dialog = rfd::FileDialog::new().set_file_name(export::default_file_name(
            &fig.title,
            preferred.extension(),
        ));
        // Put the configured format first so it is the dialog's default filter.
        let formats = std::iter::once(preferred)
            .chain(ExportFormat::all().iter().copied().filter(|f| *f != preferred));
        for f in formats {
            dialog = dialog.add_filter(f.label(), &[f.extension()]);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        match export::save_figure(fig, &path, ctx.config.export.size()) {
            Ok(format) => ctx.info(format!("Saved {} to {}", format.label(), path.display())),
            Err(e) => ctx.error(format!("Failed to export figure: {e}")),
        }
    }

    fn save_csv(&self, ctx: &mut PanelContext<'_>, fig: &Figure) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(export::default_file_name(&fig.title, "csv"))
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        match export::save_figure_csv(fig, &path) {
            Ok(()) => ctx.info(format!("Wrote {}", path.display())),
            Err(e) => ctx.error(format!("Failed to export CSV: {e}")),
        }
    }
}

impl Panel for ExportPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_menu(&mut self, ui: &mut Ui, ctx: &mut PanelContext<'_>) {
        ui.menu_button(self.title_and_icon(), |ui| {
            let fig = active_figure(ctx).filter(|f| !f.is_empty());
            let enabled = fig.is_some();
            if ui
                .add_enabled(enabled, egui::Button::new(format!("{IMAGE} Save plot…")))
                .on_disabled_hover_text("The active plot has no traces")
                .clicked()
            {
                ui.close();
                if let Some(fig) = &fig {
                    self.save_figure(ctx, fig);
                }
            }
            if ui
                .add_enabled(enabled, egui::Button::new(format!("{FILE_CSV} Plot data as CSV…")))
                .on_disabled_hover_text("The active plot has no traces")
                .clicked()
            {
                ui.close();
                if let Some(fig) = &fig {
                    self.save_csv(ctx, fig);
                }
            }
        });
    }
}
