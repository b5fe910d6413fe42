use crate::config::Config;
use crate::core::cache::QueryCache;
use crate::core::lookup::LookupCache;
use crate::errors::Result;
use crate::logging::Logger;
use std::path::PathBuf;

/// Shared state threaded through the scheduling core: configuration, the
/// lookup and query caches, and the logger.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub lookups: LookupCache,
    pub cache: QueryCache,
    pub logger: Logger,
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppContext {
    pub fn new_with_paths(config_path: PathBuf, logs_dir: PathBuf) -> Result<Self> {
        let config = Config::load_from(&config_path)?;

        let logger = Logger::new();
        logger.set_log_dir(&logs_dir);
        logger.set_file_logging_enabled(config.file_logging_enabled());

        Ok(Self {
            config,
            lookups: LookupCache::new(),
            cache: QueryCache::new(),
            logger,
            config_path,
            logs_dir,
        })
    }
}
