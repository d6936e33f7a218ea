use std::{net::SocketAddr, str::FromStr};

use anyhow::{Context, bail};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => bail!("unknown log format {other:?}, expected json or pretty"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// `EnvFilter` directive, e.g. `info` or `phonechat=debug,tower_http=info`.
    pub log_level: String,
    pub log_format: LogFormat,
    /// Store live messages and push HTTP messages live, instead of keeping the two paths apart.
    pub unified_delivery: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
            log_format: LogFormat::Json,
            unified_delivery: false,
        }
    }
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let bind_addr: SocketAddr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned())
            .parse()
            .context("BIND_ADDR")?;

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned());

        let log_format = match lookup("LOG_FORMAT") {
            Some(format) => format.parse::<LogFormat>().context("LOG_FORMAT")?,
            None => LogFormat::Json,
        };

        let unified_delivery = match lookup("UNIFIED_DELIVERY") {
            Some(flag) => parse_flag(&flag).context("UNIFIED_DELIVERY")?,
            None => false,
        };

        Ok(Config { bind_addr, log_level, log_format, unified_delivery })
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
