use crate::domains::logger::{DomainLogger, FileLogger};
use std::sync::Arc;

/// Initialize `fast_log` at `path` and return the domain logger writing into it.
pub fn init_file_logger(path: &str, level: log::LevelFilter) -> Result<Arc<dyn DomainLogger>, String> {
    FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log at {}: {}", path, e))?;
    Ok(Arc::new(FileLogger))
}
