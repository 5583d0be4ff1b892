use super::constants::{LOG_HEIGHT, PATH_FIELD_WIDTH};
use super::HeicConverter;
use eframe::egui::{self, RichText};
use rfd::FileDialog;
use std::path::Path;

impl HeicConverter {
    pub fn render(&mut self, ctx: &egui::Context) {
        let idle = !self.state.is_running();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                ui.heading("HEIC to JPEG Converter");
                ui.label(
                    RichText::new("Converts every .heic file that has no .jpg yet")
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            });
            ui.add_space(15.0);

            egui::Grid::new("folders")
                .num_columns(3)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Input folder:");
                    ui.add_enabled(
                        idle,
                        egui::TextEdit::singleline(&mut self.state.input_dir)
                            .desired_width(PATH_FIELD_WIDTH),
                    );
                    if ui.add_enabled(idle, egui::Button::new("Browse...")).clicked() {
                        if let Some(path) = pick_folder(self.state.base_dir()) {
                            self.state.input_dir = path;
                        }
                    }
                    ui.end_row();

                    ui.label("Output folder:");
                    ui.add_enabled(
                        idle,
                        egui::TextEdit::singleline(&mut self.state.output_dir)
                            .desired_width(PATH_FIELD_WIDTH),
                    );
                    if ui.add_enabled(idle, egui::Button::new("Browse...")).clicked() {
                        if let Some(path) = pick_folder(self.state.base_dir()) {
                            self.state.output_dir = path;
                        }
                    }
                    ui.end_row();
                });

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let start = egui::Button::new("Start Conversion").min_size(egui::vec2(160.0, 30.0));
                if ui.add_enabled(idle, start).clicked() {
                    self.start_conversion();
                }

                let output_exists = Path::new(self.state.output_dir.trim()).is_dir();
                if ui
                    .add_enabled(idle && output_exists, egui::Button::new("📂 Open output folder"))
                    .clicked()
                {
                    self.open_output_folder();
                }
            });

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.label("Status:");
                if self.state.is_running() {
                    ui.spinner();
                }
                ui.label(self.state.status.as_str());
            });

            ui.add_space(6.0);
            ui.label("Log:");
            egui::ScrollArea::vertical()
                .max_height(LOG_HEIGHT)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut self.state.log.as_str())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .desired_rows(10),
                    );
                });
        });
    }
}

fn pick_folder(start_dir: &Path) -> Option<String> {
    FileDialog::new()
        .set_directory(start_dir)
        .pick_folder()
        .map(|path| path.display().to_string())
}
