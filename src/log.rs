use anyhow::Context;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LogFormat};

/// Installs the global subscriber. Debug output carries file and line.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("failed to parse log level {:?}", config.log_level))?;
    let with_caller = filter.max_level_hint().is_none_or(|level| level >= LevelFilter::DEBUG);

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_file(with_caller).with_line_number(with_caller))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_file(with_caller).with_line_number(with_caller))
            .try_init(),
    }
    .context("failed to install logger")?;

    tracing::info!(level = %config.log_level, format = ?config.log_format, "logger initialized");
    Ok(())
}
