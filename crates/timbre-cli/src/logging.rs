use anyhow::Result;
use twyg::{LogLevel, OptsBuilder};

use crate::config::LoggingConfig;

/// Parse a configured level name.
pub fn parse_level(level: &str) -> Result<LogLevel> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LogLevel::Trace),
        "debug" => Ok(LogLevel::Debug),
        "info" => Ok(LogLevel::Info),
        "warn" | "warning" => Ok(LogLevel::Warn),
        "error" => Ok(LogLevel::Error),
        other => anyhow::bail!(
            "Unknown log level: {}\n\nValid levels: trace, debug, info, warn, error",
            other
        ),
    }
}

/// Install the global logger. `verbose` forces debug output.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        LogLevel::Debug
    } else {
        parse_level(&config.level)?
    };

    let opts = OptsBuilder::new()
        .coloured(config.coloured)
        .level(level)
        .report_caller(false)
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid logging options: {:?}", e))?;

    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Could not set up logger: {:?}", e))?;

    Ok(())
}
