pub mod experiments_ui;
pub mod export_ui;
pub mod panel_trait;
pub mod plots_ui;
pub mod session_ui;
pub mod settings_ui;
pub mod traces_ui;
pub mod upload_ui;

pub use experiments_ui::ExperimentsPanel;
pub use export_ui::ExportPanel;
pub use panel_trait::{Panel, PanelContext, PanelState, Status};
pub use plots_ui::PlotsPanel;
pub use session_ui::SessionPanel;
pub use settings_ui::SettingsPanel;
pub use traces_ui::{EditBuffer, TracesPanel};
pub use upload_ui::UploadPanel;
