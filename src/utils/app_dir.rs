use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_INPUT_FOLDER: &str = "folder_heic";
pub const DEFAULT_OUTPUT_FOLDER: &str = "folder_jpeg";

/// Directory holding the running executable, or the working directory if
/// that cannot be resolved.
pub fn app_dir() -> PathBuf {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    match exe_dir {
        Some(dir) => dir,
        None => {
            warn!("Could not resolve executable directory, using working directory");
            env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }
    }
}

pub fn default_input_dir(base: &Path) -> PathBuf {
    base.join(DEFAULT_INPUT_FOLDER)
}

pub fn default_output_dir(base: &Path) -> PathBuf {
    base.join(DEFAULT_OUTPUT_FOLDER)
}
