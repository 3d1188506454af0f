use std::path::PathBuf;
use std::sync::Arc;

use egui::Ui;
use egui_phosphor::regular::{FILE, UPLOAD_SIMPLE};

use super::panel_trait::{Panel, PanelContext, PanelState};
use crate::data::experiment::{Experiment, MIN_AREA};
use crate::data::session::SessionCommand;

/// File chosen in the form but not yet submitted.
#[derive(Clone)]
pub enum PendingFile {
    Path(PathBuf),
    Bytes { name: String, bytes: Arc<[u8]> },
}

impl PendingFile {
    pub fn display_name(&self) -> String {
        match self {
            PendingFile::Path(p) => p
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string()),
            PendingFile::Bytes { name, .. } => name.clone(),
        }
    }
}

/// Form for loading a new experiment.
pub struct UploadPanel {
    pub state: PanelState,
    /// `None` means "use the proposed default name".
    name: Option<String>,
    area: f64,
    vref: f64,
    file: Option<PendingFile>,
    defaults_applied: bool,
}

impl Default for UploadPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Load experiment", UPLOAD_SIMPLE),
            name: None,
            area: 1.0,
            vref: 0.0,
            file: None,
            defaults_applied: false,
        }
    }
}

impl UploadPanel {
    /// Take a file dropped onto the window as the pending upload.
    pub fn accept_dropped(&mut self, file: &egui::DroppedFile) {
        if let Some(path) = &file.path {
            self.file = Some(PendingFile::Path(path.clone()));
        } else if let Some(bytes) = &file.bytes {
            self.file = Some(PendingFile::Bytes {
                name: file.name.clone(),
                bytes: bytes.clone(),
            });
        }
    }

    fn load(&self, file: &PendingFile) -> Result<Experiment, crate::error::ViewerError> {
        match file {
            PendingFile::Path(p) => Experiment::from_file(p, self.area, self.vref),
            PendingFile::Bytes { name, bytes } => {
                Experiment::from_bytes(name, bytes, self.area, self.vref)
            }
        }
    }
}

impl Panel for UploadPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, ctx: &mut PanelContext<'_>) {
        if !self.defaults_applied {
            self.area = ctx.config.default_area.max(MIN_AREA);
            self.vref = ctx.config.default_vref;
            self.defaults_applied = true;
        }
        ui.heading(self.title_and_icon());

        let registry = &ctx.session.experiments;
        let name = self.name.get_or_insert_with(|| registry.default_name());
        ui.label("Experiment name");
        ui.text_edit_singleline(name);
        let name_check = registry.check_name(name);

        ui.horizontal(|ui| {
            ui.label("Electrode area (cm²)");
            ui.add(
                egui::DragValue::new(&mut self.area)
                    .range(MIN_AREA..=f64::MAX)
                    .speed(0.01)
                    .max_decimals(6),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Reference potential (V vs S.H.E.)");
            ui.add(egui::DragValue::new(&mut self.vref).speed(0.001).max_decimals(4));
        });

        ui.horizontal(|ui| {
            if ui.button(format!("{FILE} Choose file…")).clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Gamry data", &["dta", "DTA"])
                    .pick_file()
                {
                    self.file = Some(PendingFile::Path(path));
                }
            }
            match &self.file {
                Some(f) => ui.label(f.display_name()),
                None => ui.weak("no file selected (or drop one on the window)"),
            };
        });

        if let Err(e) = &name_check {
            ui.colored_label(ui.visuals().warn_fg_color, e.to_string());
        }

        let can_submit = name_check.is_ok() && self.file.is_some();
        if ui
            .add_enabled(can_submit, egui::Button::new("Submit"))
            .clicked()
        {
            if let (Some(file), Some(name)) = (self.file.clone(), self.name.clone()) {
                match self.load(&file) {
                    Ok(experiment) => {
                        ctx.info(format!(
                            "Loaded `{}` as `{name}` ({} cycles)",
                            file.display_name(),
                            experiment.valid_cycle_count()
                        ));
                        ctx.push(SessionCommand::AddExperiment {
                            name,
                            experiment: Box::new(experiment),
                        });
                        self.file = None;
                        self.name = None;
                    }
                    Err(e) => ctx.error(format!("Failed to load {}: {e}", file.display_name())),
                }
            }
        }
    }
}
