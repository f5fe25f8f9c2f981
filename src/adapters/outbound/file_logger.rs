use crate::domains::logger::{DynLogger, FileLogger};
use std::sync::Arc;

/// Initialize the `fast_log` file backend and return a domain logger writing to it.
pub fn init_file_logger(path: &str, level: &str) -> Result<DynLogger, String> {
    let level: log::LevelFilter = level
        .parse()
        .map_err(|_| format!("Unknown log level {:?}", level))?;
    FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger))
}
