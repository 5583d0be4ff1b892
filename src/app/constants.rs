use std::time::Duration;

pub const APP_TITLE: &str = "HEIC to JPEG Converter";
pub const WINDOW_SIZE: [f32; 2] = [640.0, 420.0];
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const PATH_FIELD_WIDTH: f32 = 400.0;
pub const LOG_HEIGHT: f32 = 200.0;
