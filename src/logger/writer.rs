//! File sink for the logger

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

/// Opens (or creates) the configured log file.
///
/// The returned `Mutex<File>` is a `MakeWriter`, so it can be handed to a
/// `fmt` layer directly.
pub(crate) fn open_log_writer(config: &FileConfig) -> Result<Mutex<File>, LoggerError> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(Mutex::new(open_log_file(&config.path, config.append)?))
}

fn open_log_file(path: &Path, append: bool) -> Result<File, LoggerError> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    Ok(options.open(path)?)
}
