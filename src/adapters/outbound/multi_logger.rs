use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards every line to a primary logger and an optional secondary one.
pub struct MultiLogger {
    primary: Arc<dyn DomainLogger>,
    secondary: Option<Arc<dyn DomainLogger>>,
}

impl MultiLogger {
    pub fn new(primary: Arc<dyn DomainLogger>, secondary: Option<Arc<dyn DomainLogger>>) -> Self {
        Self { primary, secondary }
    }

    fn each(&self, f: impl Fn(&dyn DomainLogger)) {
        f(self.primary.as_ref());
        if let Some(sec) = &self.secondary {
            f(sec.as_ref());
        }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.each(|l| l.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.each(|l| l.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.each(|l| l.error(msg));
    }

    fn debug(&self, msg: &str) {
        self.each(|l| l.debug(msg));
    }
}

/// File logger with tracing as secondary; tracing alone if the file cannot be opened.
pub fn init_combined_logger(path: &str) -> Arc<dyn DomainLogger> {
    let fallback = super::init_tracing_logger();
    match super::init_file_logger(path, log::LevelFilter::Info) {
        Ok(file_logger) => Arc::new(MultiLogger::new(file_logger, Some(fallback))) as Arc<dyn DomainLogger>,
        Err(e) => {
            fallback.warn(&e);
            fallback
        }
    }
}
