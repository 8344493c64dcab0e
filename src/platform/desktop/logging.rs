use std::fs::File;

use anyhow::{Context, Result};
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};

use crate::platform::desktop::paths::default_log_file;

/// Installs the global logger: `latest.log` in the cache directory, or
/// stderr when no log file can be created.
pub fn init_logging(level: LevelFilter) -> Result<()> {
    match default_log_file().and_then(|path| {
        File::create(&path)
            .with_context(|| format!("failed to create log file: {}", path.display()))
    }) {
        Ok(file) => WriteLogger::init(level, Config::default(), file)
            .context("failed to initialize file logger"),
        Err(err) => {
            SimpleLogger::init(level, Config::default())
                .context("failed to initialize stderr logger")?;
            log::warn!("logging to stderr: {err:#}");
            Ok(())
        }
    }
}
