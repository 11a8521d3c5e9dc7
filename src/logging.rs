// ABOUTME: Structured logging setup for the routine coach server
// ABOUTME: Chooses JSON or human-readable tracing output and quiets noisy HTTP dependencies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Logging is configured from `RUST_LOG` (filter directives) and `LOG_FORMAT`
//! (`json`, `pretty` or `compact`). Generated routine text is never logged;
//! handlers only record sizes, session ids and error codes.

use std::env;
use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::constants::service_names;

/// Directives appended to every filter so request plumbing stays quiet
const DEPENDENCY_DIRECTIVES: [&str; 4] = [
    "hyper=warn",
    "hyper_util=warn",
    "reqwest=warn",
    "tower_http=info",
];

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers
    Json,
    /// Multi-field human-readable lines
    Pretty,
    /// Single-line output without targets
    Compact,
}

impl LogFormat {
    /// Parse `LOG_FORMAT`; unknown values fall back to pretty
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base filter used when `RUST_LOG` is unset
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Emit span open/close events (useful to time generation and rendering)
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Pretty,
            include_spans: false,
        }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG`, `LOG_FORMAT`, and `LOG_INCLUDE_SPANS`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()),
            format: env::var("LOG_FORMAT")
                .map_or(LogFormat::Pretty, |value| LogFormat::from_str_or_default(&value)),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        DEPENDENCY_DIRECTIVES
            .into_iter()
            .filter_map(|directive| directive.parse().ok())
            .fold(EnvFilter::new(&self.level), EnvFilter::add_directive)
    }

    /// Install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer()
            .with_target(true)
            .with_writer(io::stdout)
            .with_span_events(span_events);
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => registry.with(layer.json()).try_init()?,
            LogFormat::Pretty => registry.with(layer.pretty()).try_init()?,
            LogFormat::Compact => registry
                .with(layer.compact().with_target(false))
                .try_init()?,
        }

        info!(
            service.name = service_names::ROUTINE_COACH,
            service.version = env!("CARGO_PKG_VERSION"),
            log.level = %self.level,
            log.format = ?self.format,
            "Logging configured"
        );
        Ok(())
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str_or_default("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_or_default("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_str_or_default("fancy"), LogFormat::Pretty);
    }

    #[test]
    fn test_filter_accepts_dependency_directives() {
        let config = LoggingConfig {
            level: "routine_coach=debug".to_owned(),
            ..LoggingConfig::default()
        };
        let filter = config.env_filter().to_string();
        assert!(filter.contains("routine_coach=debug"));
        assert!(filter.contains("reqwest=warn"));
    }

    // The only test in this binary that installs a global subscriber
    #[test]
    fn test_pretty_subscriber_installs_once() {
        let config = LoggingConfig {
            format: LogFormat::Pretty,
            ..LoggingConfig::default()
        };
        assert!(config.init().is_ok());
        assert!(config.init().is_err());
    }
}
