use egui::Ui;
use egui_phosphor::regular::TABLE;
use egui_table::{HeaderRow, Table, TableDelegate};

use super::panel_trait::{Panel, PanelContext, PanelState};
use crate::data::experiment::ExperimentRegistry;

/// Read-only overview of the loaded experiments.
pub struct ExperimentsPanel {
    pub state: PanelState,
}

impl Default for ExperimentsPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Experiment information", TABLE),
        }
    }
}

struct ExperimentsDelegate<'a> {
    registry: &'a ExperimentRegistry,
}

impl TableDelegate for ExperimentsDelegate<'_> {
    fn header_cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::HeaderCellInfo) {
        let text = match cell.col_range.start {
            0 => "Experiment",
            1 => "Filename",
            2 => "Cycles",
            3 => "Area (cm²)",
            4 => "Vref (V)",
            _ => "",
        };
        ui.add_space(4.0);
        ui.strong(text);
    }

    fn cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::CellInfo) {
        let Some(name) = self.registry.names().get(cell.row_nr as usize) else {
            return;
        };
        let Some(exp) = self.registry.get(name) else {
            return;
        };
        ui.add_space(4.0);
        match cell.col_nr {
            0 => {
                ui.add(egui::Label::new(name.as_str()).truncate());
            }
            1 => {
                ui.add(egui::Label::new(exp.filename.as_str()).truncate())
                    .on_hover_text(exp.data.header.title.clone().unwrap_or_default());
            }
            2 => {
                ui.label(exp.valid_cycle_count().to_string());
            }
            3 => {
                ui.label(format!("{}", exp.area()));
            }
            4 => {
                ui.label(format!("{:+.3}", exp.vref));
            }
            _ => {}
        }
    }
}

impl Panel for ExperimentsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, ctx: &mut PanelContext<'_>) {
        let registry = &ctx.session.experiments;
        if registry.is_empty() {
            return;
        }
        egui::CollapsingHeader::new(self.title_and_icon())
            .default_open(false)
            .show(ui, |ui| {
                let mut delegate = ExperimentsDelegate { registry };
                Table::new()
                    .id_salt("experiments_table")
                    .num_rows(registry.len() as u64)
                    .columns(vec![
                        egui_table::Column::new(110.0),
                        egui_table::Column::new(130.0),
                        egui_table::Column::new(55.0),
                        egui_table::Column::new(75.0),
                        egui_table::Column::new(65.0),
                    ])
                    .headers(vec![HeaderRow::new(24.0)])
                    .show(ui, &mut delegate);
            });
    }
}
