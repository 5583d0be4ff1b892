mod app;
mod convert;
mod utils;

use app::{HeicConverter, APP_TITLE, WINDOW_SIZE};
use eframe::CreationContext;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heic_converter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(false),
        ..Default::default()
    };

    info!("Launching {}", APP_TITLE);
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc: &CreationContext| Box::new(HeicConverter::new(cc))),
    )
}
