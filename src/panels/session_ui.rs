use egui::Ui;
use egui_phosphor::regular::{FLOPPY_DISK, FOLDER_OPEN, TRASH};

use super::panel_trait::{Panel, PanelContext, PanelState};
use crate::data::session::SessionCommand;
use crate::persistence;

/// Save, load and clear the whole analysis.
pub struct SessionPanel {
    pub state: PanelState,
}

impl Default for SessionPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Session", FLOPPY_DISK),
        }
    }
}

impl SessionPanel {
    fn save(&self, ctx: &mut PanelContext<'_>) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.json", ctx.config.session_file_stem))
            .add_filter("Session", &["json"])
            .save_file()
        else {
            return;
        };
        match persistence::save_session_to_path(ctx.session, &path) {
            Ok(()) => ctx.info(format!("Session saved to {}", path.display())),
            Err(e) => ctx.error(format!("Failed to save session: {e}")),
        }
    }

    fn load(&self, ctx: &mut PanelContext<'_>) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Session", &["json"])
            .pick_file()
        else {
            return;
        };
        match persistence::load_session_from_path(&path) {
            Ok(contents) => {
                ctx.info(format!(
                    "Session loaded from {} ({} experiments, {} plots)",
                    path.display(),
                    contents.experiments.len(),
                    contents.plots.len()
                ));
                *ctx.active_plot = contents.plots.names().first().cloned();
                ctx.push(SessionCommand::Import(Box::new(contents)));
            }
            Err(e) => ctx.error(format!("Failed to load session: {e}")),
        }
    }
}

impl Panel for SessionPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_menu(&mut self, ui: &mut Ui, ctx: &mut PanelContext<'_>) {
        ui.menu_button(self.title_and_icon(), |ui| {
            if ui
                .add_enabled(!ctx.session.is_empty(), egui::Button::new(format!("{FLOPPY_DISK} Save session…")))
                .clicked()
            {
                ui.close();
                self.save(ctx);
            }
            if ui.button(format!("{FOLDER_OPEN} Load session…")).clicked() {
                ui.close();
                self.load(ctx);
            }
            ui.separator();
            if ui
                .add_enabled(!ctx.session.is_empty(), egui::Button::new(format!("{TRASH} Clear session")))
                .clicked()
            {
                ui.close();
                ctx.push(SessionCommand::Clear);
                *ctx.active_plot = None;
                ctx.info("Session cleared");
            }
        });
    }
}
