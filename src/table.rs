use std::path::PathBuf;

use crate::parser::ParseResult;

const HEADERS: [&str; 4] = ["Name", "Instability", "Abstraction", "Distance"];

#[derive(Default)]
pub struct RecordTable {
    source: Option<PathBuf>,
    records: ParseResult,
}

impl RecordTable {
    pub fn show_records(&mut self, source: PathBuf, records: ParseResult) {
        self.source = Some(source);
        self.records = records;
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    pub fn records(&self) -> &ParseResult {
        &self.records
    }

    pub fn summary(&self) -> Option<String> {
        self.source.as_ref().map(|path| {
            let n = self.records().len();
            let noun = if n == 1 { "record" } else { "records" };
            format!("{n} {noun} from {}", path.display())
        })
    }

    pub fn ui(&self, ui: &mut egui::Ui) {
        if self.source.is_none() {
            ui.centered_and_justified(|ui| {
                ui.weak("Open a CSV file via File → Open");
            });
            return;
        }
        egui::ScrollArea::both().auto_shrink(false).show(ui, |ui| {
            egui::Grid::new("records")
                .num_columns(HEADERS.len())
                .striped(true)
                .show(ui, |ui| {
                    for header in HEADERS {
                        ui.strong(header);
                    }
                    ui.end_row();
                    for record in self.records.iter() {
                        ui.label(&record.name);
                        ui.monospace(&record.instability);
                        ui.monospace(&record.abstraction);
                        ui.monospace(&record.distance);
                        ui.end_row();
                    }
                });
        });
    }
}
