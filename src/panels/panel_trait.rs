use egui::Ui;

use crate::config::ViewerConfig;
use crate::data::session::{Session, SessionCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    pub title: &'static str,
    pub icon: &'static str,
    pub visible: bool,
}

impl PanelState {
    pub fn new(title: &'static str, icon: &'static str) -> Self {
        Self {
            title,
            icon,
            visible: true,
        }
    }
}

/// What a panel sees while drawing. The session is read-only; changes go
/// through `commands` and are applied after the frame.
pub struct PanelContext<'a> {
    pub session: &'a Session,
    pub config: &'a ViewerConfig,
    pub commands: &'a mut Vec<SessionCommand>,
    pub status: &'a mut Option<Status>,
    pub active_plot: &'a mut Option<String>,
}

impl PanelContext<'_> {
    pub fn push(&mut self, cmd: SessionCommand) {
        self.commands.push(cmd);
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        *self.status = Some(Status::Info(msg.into()));
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::error!("{msg}");
        *self.status = Some(Status::Error(msg));
    }
}

pub trait Panel {
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn title(&self) -> &'static str {
        self.state().title
    }

    fn title_and_icon(&self) -> String {
        format!("{} {}", self.state().icon, self.state().title)
    }

    // Optional hooks with default empty impls
    fn render_menu(&mut self, _ui: &mut Ui, _ctx: &mut PanelContext<'_>) {}
    fn render_panel(&mut self, _ui: &mut Ui, _ctx: &mut PanelContext<'_>) {}
}
