use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use log::{LevelFilter, info};

use crate::EPOCH;
use crate::config::CliConfig;

pub mod cli;

/// Reads a JSON config file. Fields missing from the file keep their default value.
pub fn read_config(path: &Path) -> Result<CliConfig> {
    let file = File::open(path)
        .with_context(|| format!("could not open config file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("incorrect config file format: {}", path.display()))
}

/// Logs to stderr at `level_filter`, and appends every warning and error to `exception_log`
/// with a wall-clock timestamp.
pub fn init_logger(level_filter: LevelFilter, exception_log: &Path) -> Result<()> {
    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}]",
                record.level(),
                hours,
                min,
                sec,
            );

            out.finish(format_args!("{prefix:<20}{message}"))
        })
        .level(level_filter)
        .chain(std::io::stderr());

    let log_file = fern::log_file(exception_log)
        .with_context(|| format!("could not open exception log: {}", exception_log.display()))?;
    let exceptions = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                jiff::Zoned::now().strftime("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(LevelFilter::Warn)
        .chain(log_file);

    fern::Dispatch::new()
        .chain(console)
        .chain(exceptions)
        .apply()
        .context("could not initialize logger")?;

    info!("[MAIN] time: {}", jiff::Timestamp::now());
    Ok(())
}
