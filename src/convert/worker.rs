use crate::convert::codec::ImageCodec;
use crate::convert::discovery::discover;
use crate::convert::types::{ProgressMessage, SetupError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use tracing::{error, info, warn};

/// Runs one conversion pass, reporting through `emit`.
///
/// Creating the output directory is the only fatal step: on failure a single
/// `Error` is emitted and nothing else follows. Per-file failures are
/// reported and the pass moves on. Returns the number of files attempted.
pub fn run<C, F>(
    input_dir: &Path,
    output_dir: &Path,
    codec: &C,
    mut emit: F,
) -> Result<usize, SetupError>
where
    C: ImageCodec + ?Sized,
    F: FnMut(ProgressMessage),
{
    if let Err(e) = fs::create_dir_all(output_dir) {
        let err = SetupError::CreateOutputDir(e);
        error!("{} ({:?})", err, output_dir);
        emit(ProgressMessage::Error(err.to_string()));
        return Err(err);
    }

    let tasks = discover(input_dir, output_dir);
    let total = tasks.len();
    info!("Found {} file(s) to convert in {:?}", total, input_dir);
    emit(ProgressMessage::Info(format!(
        "Found {} HEIC file(s) without JPEG in output folder.",
        total
    )));

    for (idx, task) in tasks.iter().enumerate() {
        emit(ProgressMessage::Status(format!(
            "Converting ({}/{}): {}",
            idx + 1,
            total,
            display_name(&task.input_path)
        )));

        match codec.convert(&task.input_path, &task.output_path) {
            Ok(()) => {
                info!("Converted {:?} -> {:?}", task.input_path, task.output_path);
                emit(ProgressMessage::Info(format!(
                    "Converted: {}",
                    display_name(&task.output_path)
                )));
            }
            Err(e) => {
                warn!("Failed to convert {:?}: {}", task.input_path, e);
                emit(ProgressMessage::Error(format!(
                    "Error converting {}: {}",
                    task.input_path.display(),
                    e
                )));
            }
        }
    }

    emit(ProgressMessage::Done(format!(
        "Conversion complete. {} file(s) processed.",
        total
    )));
    Ok(total)
}

/// Starts [`run`] on its own thread. The returned receiver disconnects once
/// the worker has finished, whether or not a `Done` was sent.
pub fn spawn<C>(input_dir: PathBuf, output_dir: PathBuf, codec: C) -> Receiver<ProgressMessage>
where
    C: ImageCodec + 'static,
{
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        info!("Worker started: {:?} -> {:?}", input_dir, output_dir);
        let result = run(&input_dir, &output_dir, &codec, |msg| {
            // A closed window drops the receiver; the run is simply abandoned.
            let _ = sender.send(msg);
        });
        if let Ok(total) = result {
            info!("Worker finished, {} file(s) processed", total);
        }
    });

    receiver
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
