//! File logging. The terminal belongs to the TUI, so diagnostics go to
//! `~/.local/share/fuelroute/fuelroute.log`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

/// Errors that can occur while setting up the log file.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger already initialised: {0}")]
    AlreadySet(#[from] log::SetLoggerError),

    #[error("could not determine XDG data directory")]
    NoDataDir,
}

/// Installs the global logger writing to the default log file.
///
/// Returns the path of the file being written.
#[mutants::skip]
pub fn init(level: LevelFilter) -> Result<PathBuf, LoggingError> {
    let dir = dirs::data_dir()
        .ok_or(LoggingError::NoDataDir)?
        .join("fuelroute");
    let (file, path) = open_log_file(&dir)?;
    file_builder(level, file).try_init()?;
    Ok(path)
}

/// colog's format writing plain text to `file`.
///
/// colog colours level tags through `colored`, which looks at stdout rather
/// than the target, so colouring is switched off globally here.
fn file_builder(level: LevelFilter, file: File) -> Builder {
    colored::control::set_override(false);
    let mut builder = colog::default_builder();
    builder
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(file)));
    builder
}

/// Opens `<dir>/fuelroute.log` for appending, creating `dir` if needed.
fn open_log_file(dir: &Path) -> Result<(File, PathBuf), LoggingError> {
    fs::create_dir_all(dir)?;
    let path = dir.join("fuelroute.log");
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}
