//! Logging configuration and initialization.
//!
//! This module provides structured logging with:
//! - Multiple presets (production, verbose, debug, trace, quiet)
//! - Per-target level overrides via CLI flags
//! - JSON output format
//! - Environment variable fallback (RUST_LOG)
//!
//! Logs are written to stderr; stdout carries command output only.

use std::collections::HashMap;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const TARGET_PREFIX: &str = "sessionview::";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: '{}'. Use 'text' or 'json'.", s)),
        }
    }
}

/// Logging preset levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Production: warnings, plus edit summaries
    #[default]
    Production,
    /// Verbose: operational detail
    Verbose,
    /// Debug: skipped lines, ignored patterns, per-call summaries
    Debug,
    /// Trace: per-event classification and highlight counts
    Trace,
    /// Quiet: errors only
    Quiet,
}

/// Logging configuration built from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Base preset to use
    pub preset: LogPreset,
    /// Per-target level overrides (e.g., "sessionview::finder" -> DEBUG)
    pub overrides: HashMap<String, Level>,
    /// Output format
    pub format: LogFormat,
}

impl LogConfig {
    /// Create a new LogConfig from CLI arguments.
    pub fn from_cli(
        verbose: bool,
        debug: bool,
        trace: bool,
        quiet: bool,
        log_overrides: Vec<String>,
        format: LogFormat,
    ) -> Self {
        let preset = if quiet {
            LogPreset::Quiet
        } else if trace {
            LogPreset::Trace
        } else if debug {
            LogPreset::Debug
        } else if verbose {
            LogPreset::Verbose
        } else {
            LogPreset::Production
        };

        // Format: "target=level", comma separated
        let mut overrides = HashMap::new();
        for override_str in log_overrides {
            for part in override_str.split(',') {
                let Some((target, level_str)) = part.split_once('=') else {
                    continue;
                };
                let target = target.trim();

                // "finder" -> "sessionview::finder"
                let full_target = if target == "sessionview" || target.starts_with(TARGET_PREFIX) {
                    target.to_string()
                } else {
                    format!("{}{}", TARGET_PREFIX, target)
                };

                if let Some(level) = parse_level(level_str.trim()) {
                    overrides.insert(full_target, level);
                }
            }
        }

        Self {
            preset,
            overrides,
            format,
        }
    }

    /// Build an EnvFilter from this configuration.
    pub fn build_filter(&self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }

        let mut directives: Vec<String> = match self.preset {
            LogPreset::Production => vec![
                "warn".into(),
                "sessionview::edit=info".into(),
            ],
            LogPreset::Verbose => vec![
                "warn".into(),
                "sessionview=info".into(),
            ],
            LogPreset::Debug => vec![
                "sessionview=debug".into(),
                "sessionview::classifier=off".into(),
            ],
            LogPreset::Trace => vec!["sessionview=trace".into()],
            LogPreset::Quiet => vec!["error".into()],
        };

        for (target, level) in &self.overrides {
            directives.push(format!("{}={}", target, level_to_str(*level)));
        }

        let filter_str = directives.join(",");
        EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Parse a level string (case-insensitive).
fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn level_to_str(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Initialize the tracing subscriber with the given configuration.
pub fn init(config: &LogConfig) {
    let filter = config.build_filter();

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(false)
                        .with_line_number(false),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }
}
