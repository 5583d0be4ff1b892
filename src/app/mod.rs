mod constants;
mod state;
mod ui;

use crate::convert::{self, HeifJpegCodec};
use crate::utils::app_dir::app_dir;
use eframe::{egui, App};
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use tracing::{info, warn};

pub use constants::{APP_TITLE, WINDOW_SIZE};
use state::SessionState;

pub struct HeicConverter {
    state: SessionState,
    codec: HeifJpegCodec,
}

impl HeicConverter {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let base_dir = app_dir();
        info!("Initializing {} in {:?}", APP_TITLE, base_dir);
        Self {
            state: SessionState::new(base_dir),
            codec: HeifJpegCodec,
        }
    }

    pub fn start_conversion(&mut self) {
        if self.state.is_running() {
            return;
        }

        let (input_dir, output_dir) = match self.state.prepare_start() {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Not starting conversion: {}", e);
                MessageDialog::new()
                    .set_level(MessageLevel::Error)
                    .set_title("Invalid input folder")
                    .set_description(e.to_string())
                    .set_buttons(MessageButtons::Ok)
                    .show();
                return;
            }
        };

        info!("Starting conversion: {:?} -> {:?}", input_dir, output_dir);
        let receiver = convert::spawn(input_dir, output_dir, self.codec);
        self.state.begin_run(receiver);
    }

    pub fn open_output_folder(&mut self) {
        let output = PathBuf::from(self.state.output_dir.trim());
        if let Err(e) = open::that(&output) {
            warn!("Failed to open {:?}: {}", output, e);
            self.state.status = format!("Could not open {}: {}", output.display(), e);
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.state.poll() {
            ctx.request_repaint();
        }
        ctx.request_repaint_after(constants::POLL_INTERVAL);
    }
}

impl App for HeicConverter {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
