//! File logger setup

use std::fs;
use std::fs::File;

use anyhow::Context;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::paths;

/// Rotates old logs and starts writing `latest.log` in the cache directory.
///
/// Without a cache directory the binary runs without a log.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let rotated = paths::rotate_logs_in(dir, paths::KEEP_ARCHIVED_LOGS);

    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("initializing logger")?;
    log::info!("contracts {} starting", env!("CARGO_PKG_VERSION"));
    if let Err(err) = rotated {
        log::warn!("log rotation in {} failed: {err}", dir.display());
    }
    Ok(())
}
