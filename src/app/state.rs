use crate::convert::ProgressMessage;
use crate::utils::app_dir::{default_input_dir, default_output_dir};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};
use thiserror::Error;

pub const IDLE_STATUS: &str = "Idle";
pub const STARTING_MESSAGE: &str = "Starting conversion...";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select an input directory.")]
    EmptyInput,
    #[error("Please select a valid input directory. {} is not a directory.", .0.display())]
    NotADirectory(PathBuf),
}

/// Everything the interface shows. Owned by the UI thread only; the worker
/// reaches it solely through `receiver`.
#[derive(Debug)]
pub struct SessionState {
    pub input_dir: String,
    pub output_dir: String,
    pub status: String,
    pub log: String,
    base_dir: PathBuf,
    is_running: bool,
    receiver: Option<Receiver<ProgressMessage>>,
}

impl SessionState {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            input_dir: default_input_dir(&base_dir).display().to_string(),
            output_dir: default_output_dir(&base_dir).display().to_string(),
            status: IDLE_STATUS.to_string(),
            log: String::new(),
            base_dir,
            is_running: false,
            receiver: None,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Checks the folder fields and resolves the paths for a run. An empty
    /// output field falls back to the default output folder and is filled in.
    pub fn prepare_start(&mut self) -> Result<(PathBuf, PathBuf), ValidationError> {
        let input = self.input_dir.trim();
        if input.is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        let input = PathBuf::from(input);
        if !input.is_dir() {
            return Err(ValidationError::NotADirectory(input));
        }

        let output = match self.output_dir.trim() {
            "" => {
                let fallback = default_output_dir(&self.base_dir);
                self.output_dir = fallback.display().to_string();
                fallback
            }
            trimmed => PathBuf::from(trimmed),
        };

        Ok((input, output))
    }

    pub fn begin_run(&mut self, receiver: Receiver<ProgressMessage>) {
        self.is_running = true;
        self.receiver = Some(receiver);
        self.apply(ProgressMessage::Info(STARTING_MESSAGE.to_string()));
    }

    pub fn apply(&mut self, message: ProgressMessage) {
        match message {
            ProgressMessage::Info(text)
            | ProgressMessage::Status(text)
            | ProgressMessage::Error(text) => {
                self.log.push_str(&text);
                self.log.push('\n');
                self.status = text;
            }
            ProgressMessage::Done(text) => {
                self.status = text;
                self.finish_run();
            }
        }
    }

    /// Drains every pending message without blocking. Returns true if
    /// anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Some(receiver) = &self.receiver {
            match receiver.try_recv() {
                Ok(message) => {
                    self.apply(message);
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Worker ended without Done (fatal setup error or panic).
                    self.finish_run();
                    changed = true;
                }
            }
        }

        changed
    }

    fn finish_run(&mut self) {
        self.is_running = false;
        self.receiver = None;
    }
}
