//! The eframe application: window layout, menu bar and command dispatch.

use eframe::egui;
use egui_phosphor::regular::PALETTE;

use crate::color_scheme::ColorScheme;
use crate::config::ViewerConfig;
use crate::data::session::{Session, SessionCommand, SessionContents};
use crate::error::SessionError;
use crate::panels::{
    ExperimentsPanel, ExportPanel, Panel, PanelContext, PlotsPanel, SessionPanel, Status,
    UploadPanel,
};
use crate::persistence;

const SIDEBAR_WIDTH: f32 = 300.0;

/// Everything panels read or write through a [`PanelContext`].
pub struct ViewerShared {
    pub session: Session,
    pub config: ViewerConfig,
    pub commands: Vec<SessionCommand>,
    pub status: Option<Status>,
    pub active_plot: Option<String>,
}

impl ViewerShared {
    fn panel_ctx(&mut self) -> PanelContext<'_> {
        PanelContext {
            session: &self.session,
            config: &self.config,
            commands: &mut self.commands,
            status: &mut self.status,
            active_plot: &mut self.active_plot,
        }
    }

    /// Apply the commands queued during the frame, in order. A failing
    /// command is reported and leaves the session as it was.
    pub fn apply_commands(&mut self) {
        for cmd in std::mem::take(&mut self.commands) {
            if let Err(e) = self.session.apply(cmd) {
                log::warn!("command rejected: {e}");
                self.status = Some(Status::Error(e.to_string()));
            }
        }
        let stale = self
            .active_plot
            .as_deref()
            .is_some_and(|a| self.session.plots.get(a).is_none());
        if stale {
            self.active_plot = self.session.plots.names().first().cloned();
        }
    }
}

/// Name of a dropped file, from its path or, for in-memory drops, its `name`.
fn dropped_name(file: &egui::DroppedFile) -> String {
    match &file.path {
        Some(path) => path.display().to_string(),
        None => file.name.clone(),
    }
}

/// Read a dropped `.json` file as a session document. `None` for any other
/// file. The extension comes from the path, or from `name` when the file
/// arrives as bytes only.
pub fn read_dropped_session(
    file: &egui::DroppedFile,
) -> Option<Result<SessionContents, SessionError>> {
    let is_json = |e: &std::ffi::OsStr| e.eq_ignore_ascii_case("json");
    let is_session = match &file.path {
        Some(path) => path.extension().is_some_and(is_json),
        None => std::path::Path::new(&file.name)
            .extension()
            .is_some_and(is_json),
    };
    if !is_session {
        return None;
    }
    Some(match (&file.path, &file.bytes) {
        (Some(path), _) => persistence::load_session_from_path(path),
        (None, Some(bytes)) => persistence::load_session_from_bytes(bytes),
        (None, None) => Err(SessionError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "dropped file has neither a path nor contents",
        ))),
    })
}

pub struct ViewerApp {
    pub shared: ViewerShared,
    upload: UploadPanel,
    experiments: ExperimentsPanel,
    plots: PlotsPanel,
    /// Panels that only contribute a menu to the menu bar.
    menu_panels: Vec<Box<dyn Panel>>,
    color_scheme_applied: bool,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        let session = Session::new(config.palette, config.populate_new_plots);
        Self {
            shared: ViewerShared {
                session,
                config,
                commands: Vec::new(),
                status: None,
                active_plot: None,
            },
            upload: UploadPanel::default(),
            experiments: ExperimentsPanel::default(),
            plots: PlotsPanel::default(),
            menu_panels: vec![
                Box::new(SessionPanel::default()),
                Box::new(ExportPanel::default()),
            ],
            color_scheme_applied: false,
        }
    }

    /// Session files dropped on the window are imported; anything else goes
    /// to the upload form.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            match read_dropped_session(&file) {
                Some(Ok(contents)) => {
                    self.shared.active_plot = contents.plots.names().first().cloned();
                    self.shared
                        .commands
                        .push(SessionCommand::Import(Box::new(contents)));
                    self.shared.status =
                        Some(Status::Info(format!("Session loaded from {}", dropped_name(&file))));
                }
                Some(Err(e)) => {
                    log::error!("failed to load dropped session {}: {e}", dropped_name(&file));
                    self.shared.status = Some(Status::Error(format!("Failed to load session: {e}")));
                }
                None => self.upload.accept_dropped(&file),
            }
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            for p in &mut self.menu_panels {
                let mut pctx = self.shared.panel_ctx();
                p.render_menu(ui, &mut pctx);
            }
            ui.menu_button(format!("{PALETTE} View"), |ui| {
                let mut scheme = self.shared.config.color_scheme;
                for s in ColorScheme::all() {
                    ui.selectable_value(&mut scheme, *s, s.label());
                }
                if scheme != self.shared.config.color_scheme {
                    scheme.apply(ui.ctx());
                    self.shared.config.color_scheme = scheme;
                    if let Err(e) = self.shared.config.save() {
                        log::warn!("could not persist color scheme: {e}");
                    }
                    ui.close();
                }
            });
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        match &self.shared.status {
            Some(Status::Info(msg)) => {
                ui.label(msg.as_str());
            }
            Some(Status::Error(msg)) => {
                ui.colored_label(ui.visuals().error_fg_color, msg.as_str());
            }
            None => {
                ui.weak("Ready");
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.color_scheme_applied {
            self.shared.config.color_scheme.apply(ctx);
            self.color_scheme_applied = true;
        }

        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("cvviewer_menu").show(ctx, |ui| {
            self.menu_bar(ui);
        });
        egui::TopBottomPanel::bottom("cvviewer_status").show(ctx, |ui| {
            self.status_bar(ui);
        });
        egui::SidePanel::left("cvviewer_sidebar")
            .resizable(true)
            .default_width(SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let mut pctx = self.shared.panel_ctx();
                    self.upload.render_panel(ui, &mut pctx);
                    ui.separator();
                    self.experiments.render_panel(ui, &mut pctx);
                });
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut pctx = self.shared.panel_ctx();
            self.plots.render_panel(ui, &mut pctx);
        });

        self.shared.apply_commands();
    }
}
